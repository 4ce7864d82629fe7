//! One simulation tick.

use glam::Vec3;
use log::{debug, info};

use super::{SimEvent, Simulation, TickReport};
use crate::beam::BeamTransition;
use crate::clock::Timestamp;
use crate::collision::{CollisionSystem, Mover};
use crate::creature::{Creature, MotionState};
use crate::input::InputFrame;
use crate::terrain::Terrain;
use crate::{BEAM_MAX_ALTITUDE, BEAM_SCATTER_RADIUS, CAPTURE_SCORE, VEHICLE_RADIUS};

/// Collects beam transitions as visual-state events.
fn record(events: &mut Vec<SimEvent>, transition: Option<BeamTransition>) {
    if let Some(change) = transition {
        debug!("beam {:?} ({:?})", change.visual, change.cause);
        events.push(SimEvent::BeamVisualStateChanged(change.visual));
    }
}

impl<T: Terrain> Simulation<T> {
    /// Advances the world by one tick.
    ///
    /// The order is fixed: refresh colliders and apply the trigger edges,
    /// advance the beam timers, move the vehicle, enforce the beam altitude
    /// limit, drop creatures when the beam went off, move creatures, resolve
    /// abductions and captures, then scatter creatures on a fresh beam.
    pub fn tick(&mut self, now: Timestamp, input: &InputFrame) -> TickReport {
        let mut events = Vec::new();
        self.ticks += 1;
        self.registry.refresh(now, false, &self.terrain);

        if input.beam_engage {
            let altitude = self.altitude();
            record(&mut events, self.beam.engage(now, altitude));
        }
        if input.beam_release {
            record(&mut events, self.beam.release());
        }
        record(&mut events, self.beam.advance(now));

        let altitude = self.fly(input);
        if altitude > BEAM_MAX_ALTITUDE && self.beam.is_active() {
            debug!("beam forced off at altitude {altitude}");
            record(&mut events, self.beam.force_deactivate());
        }

        if self.beam_was_active && !self.beam.is_active() {
            self.drop_abducted();
        }
        self.move_creatures();
        if self.beam.is_active() {
            self.resolve_beam(now, &mut events);
        }

        let beam_active = self.beam.is_active();
        if beam_active && !self.beam_was_active {
            self.scatter_from_beam();
        }
        self.beam_was_active = beam_active;

        TickReport {
            events,
            altitude,
            reticle_visible: self.beam.reticle_visible(now, altitude),
            score: self.score,
            beam: self.beam.visual(now),
        }
    }

    /// Applies the requested vehicle motion and returns the new altitude.
    fn fly(&mut self, input: &InputFrame) -> f32 {
        let candidate = self.vehicle.candidate(input.axes());
        self.vehicle.yaw = candidate.yaw;
        let collision = CollisionSystem::new(&self.terrain, self.registry.colliders());
        let mut proposed = candidate.position;
        if proposed != self.vehicle.position
            && !collision.would_collide(
                Mover::Vehicle {
                    current: self.vehicle.position,
                },
                &mut proposed,
                VEHICLE_RADIUS,
            )
        {
            self.vehicle.position = proposed;
        }
        collision.altitude_of(self.vehicle.position)
    }

    fn drop_abducted(&mut self) {
        let dropped = self
            .creatures
            .iter_mut()
            .map(Creature::drop_from_beam)
            .filter(|fell| *fell)
            .count();
        if dropped > 0 {
            debug!("beam off: {dropped} creatures falling");
        }
    }

    fn move_creatures(&mut self) {
        let vehicle = self.vehicle.position;
        let collision = CollisionSystem::new(&self.terrain, self.registry.colliders());
        for creature in &mut self.creatures {
            match creature.state() {
                MotionState::Free => {
                    creature.steer(vehicle, &mut self.rng);
                    creature.walk(&collision);
                }
                MotionState::Abducted { .. } => creature.lift(vehicle),
                MotionState::Falling { .. } => {
                    let ground = collision.ground_at(creature.position);
                    creature.fall(ground);
                }
            }
        }
    }

    /// Pulls creatures into the beam, takes aboard those that arrived and
    /// closes the activation once nothing is left mid-lift.
    fn resolve_beam(&mut self, now: Timestamp, events: &mut Vec<SimEvent>) {
        let vehicle = self.vehicle.position;
        let mut caught = false;
        let mut lifting = 0_usize;
        let mut captured = Vec::new();

        self.creatures.retain_mut(|creature| {
            if creature.is_under_beam(vehicle) && creature.begin_abduction(vehicle) {
                caught = true;
            }
            if !creature.is_abducted() {
                return true;
            }
            if creature.reached_vehicle(vehicle) {
                captured.push(creature.id());
                return false;
            }
            lifting += 1;
            true
        });

        if caught {
            record(events, self.beam.reset_cooldown());
        }
        for id in &captured {
            self.score = self.score.saturating_add(CAPTURE_SCORE);
            info!("creature {} captured, score {}", id.0, self.score);
            events.push(SimEvent::CreatureCaptured {
                creature: *id,
                score_delta: CAPTURE_SCORE,
            });
        }
        if captured.is_empty() {
            return;
        }
        if self.creatures.is_empty() && !self.victory_signalled {
            self.victory_signalled = true;
            info!("level {} cleared with score {}", self.level, self.score);
            events.push(SimEvent::AllCreaturesCaptured);
        }
        if lifting == 0 {
            record(events, self.beam.complete_capture(now));
        }
    }

    fn scatter_from_beam(&mut self) {
        let vehicle = self.vehicle.position;
        let impact = Vec3::new(
            vehicle.x,
            self.terrain.height_at(vehicle.x, vehicle.z),
            vehicle.z,
        );
        let scattered = self
            .creatures
            .iter_mut()
            .map(|creature| creature.flee_from(impact, BEAM_SCATTER_RADIUS))
            .filter(|fled| *fled)
            .count();
        debug!("beam engaged: {scattered} creatures scattered");
    }
}
