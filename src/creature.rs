//! Per-creature motion: wandering, fleeing, abduction, free fall and landing.
//!
//! A creature is always in exactly one [`MotionState`]. Wandering and fleeing
//! are velocity policies inside [`MotionState::Free`], not states of their
//! own.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Vec2, Vec3};
use log::debug;
use rand::Rng;

use crate::collision::{CollisionSystem, Mover};
use crate::terrain::Terrain;
use crate::vector_math::{heading_of, heading_vector, horizontal, horizontal_direction, horizontal_distance};
use crate::{
    ABDUCTION_ESCAPE_DISTANCE, ABDUCTION_TARGET_OFFSET, BEAM_RADIUS, CAPTURE_BAND_RADIUS,
    CAPTURE_DISTANCE, CENTERING_MAX_STEP, CENTERING_STRENGTH, CREATURE_RADIUS,
    CREATURE_STANDING_HEIGHT, FALL_DECAY, FALL_GRAVITY, FALL_TERMINAL_VELOCITY, FLEE_DISTANCE,
    FLEE_SPEED, LIFT_SPEED_GROWTH, LIFT_SPEED_MAX, LIFT_SPEED_START, SPIN_RATE_START,
    TILT_CONVERGENCE, VELOCITY_DAMPING, WANDER_CHANCE, WANDER_SPEED,
};

/// Stable creature identifier, unique for the lifetime of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CreatureId(pub u64);

/// Lifecycle state of a creature's motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionState {
    /// On the ground, wandering or fleeing.
    Free,
    /// Held in the beam and drawn towards the vehicle.
    Abducted {
        /// Point below the vehicle the creature is pulled towards.
        target: Vec3,
        /// Current ascent per tick.
        lift_speed: f32,
        /// Yaw change per tick.
        spin_rate: f32,
    },
    /// Dropped by the beam and falling back to the ground.
    Falling {
        /// Vertical velocity per tick; negative is down.
        fall_velocity: f32,
        /// Yaw change per tick.
        spin_rate: f32,
    },
}

/// One mobile ground creature.
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    id: CreatureId,
    /// World position.
    pub position: Vec3,
    /// Horizontal velocity (`x`, `z`) per tick.
    pub velocity: Vec2,
    /// Euler rotation: `x` is forward tilt, `y` is yaw.
    pub rotation: Vec3,
    state: MotionState,
}

impl Creature {
    /// Creates a free, motionless creature.
    #[must_use]
    pub const fn new(id: CreatureId, position: Vec3) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            rotation: Vec3::ZERO,
            state: MotionState::Free,
        }
    }

    /// Returns the creature's identifier.
    #[must_use]
    pub const fn id(&self) -> CreatureId {
        self.id
    }

    /// Returns the current motion state.
    #[must_use]
    pub const fn state(&self) -> MotionState {
        self.state
    }

    /// Returns `true` while on the ground.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        matches!(self.state, MotionState::Free)
    }

    /// Returns `true` while held by the beam.
    #[must_use]
    pub const fn is_abducted(&self) -> bool {
        matches!(self.state, MotionState::Abducted { .. })
    }

    /// Returns `true` while falling.
    #[must_use]
    pub const fn is_falling(&self) -> bool {
        matches!(self.state, MotionState::Falling { .. })
    }

    /// Picks this tick's velocity while free.
    ///
    /// Close to the vehicle the creature runs straight away from it.
    /// Otherwise it occasionally picks a new wander heading, and when it does
    /// neither its velocity decays.
    pub fn steer<R: Rng>(&mut self, vehicle: Vec3, rng: &mut R) {
        if !self.is_free() {
            return;
        }
        if horizontal_distance(self.position, vehicle) < FLEE_DISTANCE {
            self.velocity = horizontal_direction(vehicle, self.position) * FLEE_SPEED;
        } else if rng.gen_bool(WANDER_CHANCE) {
            self.velocity = heading_vector(rng.gen_range(0.0..TAU)) * WANDER_SPEED;
        } else {
            self.velocity *= VELOCITY_DAMPING;
        }
    }

    /// Runs away from `point` when it lies within `radius`.
    ///
    /// Returns `true` when the flee velocity was applied.
    pub fn flee_from(&mut self, point: Vec3, radius: f32) -> bool {
        if !self.is_free() || horizontal_distance(self.position, point) >= radius {
            return false;
        }
        self.velocity = horizontal_direction(point, self.position) * FLEE_SPEED;
        true
    }

    /// Integrates the free-state velocity through the creature collision
    /// policy and keeps the creature on the ground.
    ///
    /// A blocked step is discarded and the velocity cleared so the next
    /// wander pick can lead away from the obstacle.
    pub fn walk<T: Terrain + ?Sized>(&mut self, collision: &CollisionSystem<'_, T>) {
        if !self.is_free() {
            return;
        }
        let mut proposed = self.position + Vec3::new(self.velocity.x, 0.0, self.velocity.y);
        if collision.would_collide(Mover::Creature, &mut proposed, CREATURE_RADIUS) {
            self.velocity = Vec2::ZERO;
            self.position.y = collision.ground_at(self.position);
        } else {
            self.position = proposed;
        }
        if self.velocity.length_squared() > 1e-6 {
            self.rotation.y = heading_of(self.velocity);
        }
    }

    /// Returns `true` when the creature stands inside the beam column.
    #[must_use]
    pub fn is_under_beam(&self, vehicle: Vec3) -> bool {
        horizontal_distance(self.position, vehicle) < BEAM_RADIUS
    }

    /// Starts an abduction towards `vehicle`. Returns `false` unless free.
    pub fn begin_abduction(&mut self, vehicle: Vec3) -> bool {
        if !self.is_free() {
            return false;
        }
        self.state = MotionState::Abducted {
            target: abduction_target(vehicle),
            lift_speed: LIFT_SPEED_START,
            spin_rate: SPIN_RATE_START,
        };
        self.velocity = Vec2::ZERO;
        debug!("creature {} abducted", self.id.0);
        true
    }

    /// Pulls an abducted creature towards the beam and lifts it.
    ///
    /// The target follows the vehicle. A creature more than
    /// [`ABDUCTION_ESCAPE_DISTANCE`] away horizontally is snapped back onto the
    /// edge of the capture band; otherwise a capped centering step draws it
    /// in. It only rises while inside the band.
    pub fn lift(&mut self, vehicle: Vec3) {
        let MotionState::Abducted {
            target,
            lift_speed,
            spin_rate,
        } = &mut self.state
        else {
            return;
        };
        *target = abduction_target(vehicle);

        let offset = horizontal(*target) - horizontal(self.position);
        let distance = offset.length();
        if distance > ABDUCTION_ESCAPE_DISTANCE {
            let back = horizontal(*target) - offset / distance * CAPTURE_BAND_RADIUS;
            self.position.x = back.x;
            self.position.z = back.y;
        } else {
            let step = offset.clamp_length_max(CENTERING_MAX_STEP) * CENTERING_STRENGTH;
            self.position.x += step.x;
            self.position.z += step.y;
        }

        if distance < CAPTURE_BAND_RADIUS {
            self.position.y += *lift_speed;
            *lift_speed = (*lift_speed * LIFT_SPEED_GROWTH).min(LIFT_SPEED_MAX);
        } else {
            *lift_speed = LIFT_SPEED_START;
        }

        self.rotation.y += *spin_rate;
        self.rotation.x += (FRAC_PI_2 - self.rotation.x) * TILT_CONVERGENCE;
    }

    /// Returns `true` once the creature is close enough vertically to be
    /// taken aboard.
    #[must_use]
    pub fn reached_vehicle(&self, vehicle: Vec3) -> bool {
        (vehicle.y - self.position.y).abs() < CAPTURE_DISTANCE
    }

    /// Drops an abducted creature. Rotation is kept; the fall starts from rest.
    pub fn drop_from_beam(&mut self) -> bool {
        let MotionState::Abducted { spin_rate, .. } = self.state else {
            return false;
        };
        self.state = MotionState::Falling {
            fall_velocity: 0.0,
            spin_rate,
        };
        debug!("creature {} dropped at height {}", self.id.0, self.position.y);
        true
    }

    /// Applies gravity to a falling creature and lands it on `ground`.
    pub fn fall(&mut self, ground: f32) {
        let MotionState::Falling {
            fall_velocity,
            spin_rate,
        } = &mut self.state
        else {
            return;
        };
        *fall_velocity = (*fall_velocity - FALL_GRAVITY).max(FALL_TERMINAL_VELOCITY);
        self.position.y += *fall_velocity;
        *spin_rate *= FALL_DECAY;
        self.rotation.y += *spin_rate;
        self.rotation.x *= FALL_DECAY;

        if self.position.y <= ground + CREATURE_STANDING_HEIGHT {
            self.land(ground);
        }
    }

    /// Puts a falling creature back on its feet at `ground`.
    pub fn land(&mut self, ground: f32) {
        if !self.is_falling() {
            return;
        }
        self.state = MotionState::Free;
        self.position.y = ground;
        self.velocity = Vec2::ZERO;
        self.rotation.x = 0.0;
        self.rotation.z = 0.0;
        debug!("creature {} landed", self.id.0);
    }
}

fn abduction_target(vehicle: Vec3) -> Vec3 {
    Vec3::new(vehicle.x, vehicle.y - ABDUCTION_TARGET_OFFSET, vehicle.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::{Collider, ColliderKind};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    struct Flat;

    impl Terrain for Flat {
        fn height_at(&self, _x: f32, _z: f32) -> f32 {
            0.0
        }

        fn colliders_snapshot(&self) -> Vec<Collider> {
            Vec::new()
        }
    }

    fn abducted(at: Vec3, vehicle: Vec3) -> Creature {
        let mut creature = Creature::new(CreatureId(1), at);
        assert!(creature.begin_abduction(vehicle));
        creature
    }

    fn falling_from(height: f32) -> Creature {
        let mut creature = abducted(Vec3::new(0.0, height, 0.0), Vec3::new(0.0, height + 5.0, 0.0));
        assert!(creature.drop_from_beam());
        creature
    }

    #[test]
    fn flees_directly_away_from_a_close_vehicle() {
        let mut creature = Creature::new(CreatureId(1), Vec3::new(10.0, 0.0, 0.0));
        let mut rng = StdRng::seed_from_u64(0);
        creature.steer(Vec3::new(0.0, 20.0, 0.0), &mut rng);
        assert_relative_eq!(creature.velocity.x, FLEE_SPEED);
        assert_relative_eq!(creature.velocity.y, 0.0);
    }

    #[test]
    fn velocity_decays_or_rerolls_when_far_away() {
        let mut creature = Creature::new(CreatureId(1), Vec3::ZERO);
        creature.velocity = Vec2::new(0.2, 0.0);
        let mut rng = StdRng::seed_from_u64(9);
        let vehicle = Vec3::new(100.0, 20.0, 0.0);
        for _ in 0..50 {
            let before = creature.velocity;
            creature.steer(vehicle, &mut rng);
            let decayed = (creature.velocity - before * VELOCITY_DAMPING).length() < 1e-6;
            let rerolled = (creature.velocity.length() - WANDER_SPEED).abs() < 1e-5;
            assert!(decayed || rerolled);
        }
    }

    #[rstest]
    #[case::inside(12.9, true)]
    #[case::outside(13.0, false)]
    fn flee_from_point_respects_radius(#[case] distance: f32, #[case] flees: bool) {
        let mut creature = Creature::new(CreatureId(1), Vec3::new(0.0, 0.0, distance));
        assert_eq!(creature.flee_from(Vec3::ZERO, 13.0), flees);
        if flees {
            assert_relative_eq!(creature.velocity.y, FLEE_SPEED);
        }
    }

    #[test]
    fn walking_into_a_building_is_refused() {
        let colliders = [Collider::new(ColliderKind::Building, Vec3::new(5.0, 0.0, 0.0))];
        let system = CollisionSystem::new(&Flat, &colliders);
        let mut creature = Creature::new(CreatureId(1), Vec3::new(0.4, 3.0, 0.0));
        creature.velocity = Vec2::new(0.3, 0.0);
        creature.walk(&system);
        assert_relative_eq!(creature.position.x, 0.4);
        assert_relative_eq!(creature.position.y, 0.0);
        assert_eq!(creature.velocity, Vec2::ZERO);
    }

    #[test]
    fn abduction_targets_below_the_vehicle() {
        let vehicle = Vec3::new(1.0, 12.0, 0.0);
        let creature = abducted(Vec3::ZERO, vehicle);
        let MotionState::Abducted {
            target,
            lift_speed,
            spin_rate,
        } = creature.state()
        else {
            panic!("expected abducted state");
        };
        assert_eq!(target, Vec3::new(1.0, 10.0, 0.0));
        assert_relative_eq!(lift_speed, LIFT_SPEED_START);
        assert_relative_eq!(spin_rate, SPIN_RATE_START);
    }

    #[test]
    fn escaping_creature_snaps_back_into_the_band() {
        let mut creature = abducted(Vec3::ZERO, Vec3::new(1.0, 10.0, 0.0));
        creature.lift(Vec3::new(6.0, 10.0, 0.0));
        assert_relative_eq!(creature.position.x, 4.0);
        assert_relative_eq!(creature.position.z, 0.0);
        assert_relative_eq!(creature.position.y, 0.0);
    }

    #[test]
    fn centered_creature_rises_with_growing_speed() {
        let vehicle = Vec3::new(0.5, 20.0, 0.0);
        let mut creature = abducted(Vec3::ZERO, vehicle);
        creature.lift(vehicle);
        assert_relative_eq!(creature.position.y, LIFT_SPEED_START);
        assert_relative_eq!(creature.position.x, 0.4);
        creature.lift(vehicle);
        assert_relative_eq!(creature.position.y, LIFT_SPEED_START * (2.0 + LIFT_SPEED_GROWTH - 1.0));
        for _ in 0..100 {
            creature.lift(vehicle);
        }
        let MotionState::Abducted { lift_speed, .. } = creature.state() else {
            panic!("expected abducted state");
        };
        assert_relative_eq!(lift_speed, LIFT_SPEED_MAX);
        assert_relative_eq!(creature.rotation.x, FRAC_PI_2, epsilon = 1e-3);
    }

    #[test]
    fn off_centre_creature_does_not_rise() {
        let mut creature = abducted(Vec3::ZERO, Vec3::new(2.5, 20.0, 0.0));
        creature.lift(Vec3::new(2.5, 20.0, 0.0));
        assert_relative_eq!(creature.position.y, 0.0);
        assert_relative_eq!(creature.position.x, 0.8);
    }

    #[test]
    fn fall_accelerates_to_terminal_velocity() {
        let mut creature = falling_from(100.0);
        let mut previous = 0.0;
        for _ in 0..60 {
            creature.fall(0.0);
            let MotionState::Falling { fall_velocity, .. } = creature.state() else {
                panic!("landed too early");
            };
            assert!(fall_velocity < previous || (fall_velocity - FALL_TERMINAL_VELOCITY).abs() < 1e-6);
            assert!(fall_velocity >= FALL_TERMINAL_VELOCITY);
            previous = fall_velocity;
        }
        assert_relative_eq!(previous, FALL_TERMINAL_VELOCITY);
    }

    #[test]
    fn landing_restores_a_free_upright_creature() {
        let mut creature = falling_from(1.0);
        creature.rotation.x = 1.2;
        for _ in 0..200 {
            creature.fall(0.5);
            if creature.is_free() {
                break;
            }
        }
        assert!(creature.is_free());
        assert_relative_eq!(creature.position.y, 0.5);
        assert_relative_eq!(creature.rotation.x, 0.0);
        assert_eq!(creature.velocity, Vec2::ZERO);
    }

    #[test]
    fn only_abducted_creatures_can_be_dropped() {
        let mut creature = Creature::new(CreatureId(3), Vec3::ZERO);
        assert!(!creature.drop_from_beam());
        assert!(creature.is_free());
    }
}
