//! Move validation against terrain and static obstacles.
//!
//! Two movers exist and each has its own policy. The vehicle flies, so it is
//! bounded by an altitude ceiling and a ground clearance and may pass over
//! obstacles that are low enough. Creatures walk: they are glued to the
//! ground and only buildings and fences stop them.

use glam::Vec3;

use crate::collider::{Collider, ColliderKind};
use crate::terrain::Terrain;
use crate::vector_math::horizontal_distance;
use crate::{VEHICLE_ALTITUDE_CEILING, VEHICLE_COLLIDER_SCAN_RANGE, VEHICLE_GROUND_CLEARANCE};

/// Entity attempting a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mover {
    /// The flying vehicle, currently at `current`.
    Vehicle {
        /// Position before the move.
        current: Vec3,
    },
    /// A ground-bound creature.
    Creature,
}

/// Borrowed view over terrain and the collider snapshot for one tick.
pub struct CollisionSystem<'a, T: Terrain + ?Sized> {
    terrain: &'a T,
    colliders: &'a [Collider],
}

impl<'a, T: Terrain + ?Sized> CollisionSystem<'a, T> {
    /// Creates a collision view.
    #[must_use]
    pub const fn new(terrain: &'a T, colliders: &'a [Collider]) -> Self {
        Self { terrain, colliders }
    }

    /// Altitude of `position` above the ground directly below it.
    #[must_use]
    pub fn altitude_of(&self, position: Vec3) -> f32 {
        position.y - self.ground_at(position)
    }

    /// Ground elevation directly below `position`.
    #[must_use]
    pub fn ground_at(&self, position: Vec3) -> f32 {
        self.terrain.height_at(position.x, position.z)
    }

    /// Returns `true` when `mover` may not move to `proposed`.
    ///
    /// For [`Mover::Creature`] the proposed height is snapped to the terrain
    /// before testing, and stays snapped whatever the verdict.
    pub fn would_collide(&self, mover: Mover, proposed: &mut Vec3, radius: f32) -> bool {
        match mover {
            Mover::Vehicle { current } => self.vehicle_blocked(current, *proposed, radius),
            Mover::Creature => {
                proposed.y = self.terrain.height_at(proposed.x, proposed.z);
                self.creature_blocked(*proposed, radius)
            }
        }
    }

    fn vehicle_blocked(&self, current: Vec3, proposed: Vec3, radius: f32) -> bool {
        let current_altitude = self.altitude_of(current);
        let ground = self.terrain.height_at(proposed.x, proposed.z);
        let proposed_altitude = proposed.y - ground;

        if current_altitude >= VEHICLE_ALTITUDE_CEILING && proposed_altitude > current_altitude {
            return true;
        }
        if proposed.y < ground + VEHICLE_GROUND_CLEARANCE {
            return true;
        }

        self.colliders.iter().any(|collider| {
            let distance = horizontal_distance(proposed, collider.position);
            distance < VEHICLE_COLLIDER_SCAN_RANGE
                && distance < radius + collider.radius()
                && (proposed.y - collider.position.y).abs() < collider.height()
        })
    }

    fn creature_blocked(&self, proposed: Vec3, radius: f32) -> bool {
        self.colliders
            .iter()
            .filter(|collider| collider.kind != ColliderKind::Tree)
            .any(|collider| horizontal_distance(proposed, collider.position) < radius + collider.radius())
    }
}
