//! Scripted pilot for headless sessions.
//!
//! Hovers low, turns towards the nearest free creature, flies over it and
//! pulses the beam. It reads only what a player could see.

use std::f32::consts::{PI, TAU};

use crate::clock::Timestamp;
use crate::input::{InputFrame, Key};
use crate::simulation::Simulation;
use crate::terrain::Terrain;
use crate::vector_math::{heading_of, horizontal_direction, horizontal_distance};

const ALTITUDE_BAND: f32 = 0.5;
const HEADING_TOLERANCE: f32 = 0.05;
const THRUST_CONE: f32 = 0.6;
const ENGAGE_RANGE: f32 = 1.0;

/// Keyboard-free pilot producing one [`InputFrame`] per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Autopilot {
    cruise_altitude: f32,
    holding_trigger: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(9.0)
    }
}

impl Autopilot {
    /// Creates a pilot that cruises at `cruise_altitude` above the ground.
    #[must_use]
    pub const fn new(cruise_altitude: f32) -> Self {
        Self {
            cruise_altitude,
            holding_trigger: false,
        }
    }

    /// Decides the input for the tick about to run at `now`.
    pub fn next_input<T: Terrain>(&mut self, sim: &Simulation<T>, now: Timestamp) -> InputFrame {
        let mut frame = InputFrame::new();
        if self.holding_trigger {
            if !sim.beam().is_active() {
                self.holding_trigger = false;
                return frame.with_release();
            }
            return frame;
        }

        let altitude = sim.altitude();
        if altitude > self.cruise_altitude + ALTITUDE_BAND {
            frame.press(Key::Descend);
        } else if altitude < self.cruise_altitude - ALTITUDE_BAND {
            frame.press(Key::Ascend);
        }

        let vehicle = sim.vehicle();
        let nearest = sim
            .creatures()
            .iter()
            .filter(|creature| creature.is_free())
            .min_by(|a, b| {
                horizontal_distance(a.position, vehicle.position)
                    .total_cmp(&horizontal_distance(b.position, vehicle.position))
            });
        let Some(target) = nearest.map(|creature| creature.position) else {
            return frame;
        };

        let distance = horizontal_distance(target, vehicle.position);
        let desired = heading_of(horizontal_direction(vehicle.position, target));
        let turn = wrap_angle(desired - vehicle.yaw);
        if turn > HEADING_TOLERANCE {
            frame.press(Key::TurnLeft);
        } else if turn < -HEADING_TOLERANCE {
            frame.press(Key::TurnRight);
        }
        if distance > ENGAGE_RANGE && turn.abs() < THRUST_CONE {
            frame.press(Key::Forward);
        }

        if distance <= ENGAGE_RANGE && sim.beam().reticle_visible(now, altitude) {
            self.holding_trigger = true;
            return frame.with_engage();
        }
        frame
    }
}

fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}
