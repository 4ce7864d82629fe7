//! The player's flying vehicle.

use glam::{Vec2, Vec3};

use crate::input::ControlAxes;
use crate::terrain::Terrain;
use crate::vector_math::heading_vector;
use crate::{VEHICLE_CLIMB_SPEED, VEHICLE_SPEED, VEHICLE_START_ALTITUDE, VEHICLE_TURN_RATE};

/// Position and heading of the vehicle. The beam lives beside it in the
/// simulation context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vehicle {
    /// World position.
    pub position: Vec3,
    /// Heading in radians; zero faces `+z`.
    pub yaw: f32,
}

/// Motion requested for one tick, before collision filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Proposed position.
    pub position: Vec3,
    /// New yaw, applied whatever the collision verdict.
    pub yaw: f32,
}

impl Vehicle {
    /// Creates a vehicle at `position` facing `+z`.
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self { position, yaw: 0.0 }
    }

    /// Places a vehicle above the origin at its starting altitude.
    #[must_use]
    pub fn above_origin<T: Terrain + ?Sized>(terrain: &T) -> Self {
        Self::new(Vec3::new(0.0, terrain.height_at(0.0, 0.0) + VEHICLE_START_ALTITUDE, 0.0))
    }

    /// Unit horizontal heading.
    #[must_use]
    pub fn heading(&self) -> Vec2 {
        heading_vector(self.yaw)
    }

    /// Computes the move `axes` request this tick.
    ///
    /// Turning happens first so thrust follows the new heading.
    #[must_use]
    pub fn candidate(&self, axes: ControlAxes) -> Candidate {
        let yaw = axes.turn.mul_add(VEHICLE_TURN_RATE, self.yaw);
        let step = heading_vector(yaw) * axes.thrust * VEHICLE_SPEED;
        Candidate {
            position: self.position + Vec3::new(step.x, axes.climb * VEHICLE_CLIMB_SPEED, step.y),
            yaw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputFrame, Key};
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn idle_input_keeps_the_vehicle_still() {
        let vehicle = Vehicle::new(Vec3::new(1.0, 10.0, 2.0));
        let candidate = vehicle.candidate(ControlAxes::default());
        assert_eq!(candidate.position, vehicle.position);
        assert_relative_eq!(candidate.yaw, 0.0);
    }

    #[rstest]
    #[case::forward(Key::Forward, Vec3::new(0.0, 0.0, VEHICLE_SPEED))]
    #[case::backward(Key::Backward, Vec3::new(0.0, 0.0, -VEHICLE_SPEED))]
    #[case::ascend(Key::Ascend, Vec3::new(0.0, VEHICLE_CLIMB_SPEED, 0.0))]
    #[case::descend(Key::Descend, Vec3::new(0.0, -VEHICLE_CLIMB_SPEED, 0.0))]
    fn single_keys_move_along_one_axis(#[case] key: Key, #[case] delta: Vec3) {
        let vehicle = Vehicle::new(Vec3::ZERO);
        let candidate = vehicle.candidate(InputFrame::holding([key]).axes());
        assert!((candidate.position - delta).length() < 1e-6);
    }

    #[test]
    fn turning_changes_yaw_by_the_turn_rate() {
        let vehicle = Vehicle::new(Vec3::ZERO);
        let left = vehicle.candidate(InputFrame::holding([Key::TurnLeft]).axes());
        let right = vehicle.candidate(InputFrame::holding([Key::TurnRight]).axes());
        assert_relative_eq!(left.yaw, VEHICLE_TURN_RATE);
        assert_relative_eq!(right.yaw, -VEHICLE_TURN_RATE);
        assert_eq!(left.position, Vec3::ZERO);
    }

    #[test]
    fn thrust_follows_the_heading() {
        let mut vehicle = Vehicle::new(Vec3::ZERO);
        vehicle.yaw = std::f32::consts::FRAC_PI_2;
        let candidate = vehicle.candidate(InputFrame::holding([Key::Forward]).axes());
        let expected = vehicle.heading() * VEHICLE_SPEED;
        assert_relative_eq!(candidate.position.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(candidate.position.z, expected.y, epsilon = 1e-6);
        assert_relative_eq!(expected.x, VEHICLE_SPEED, epsilon = 1e-6);
    }
}
