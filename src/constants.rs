//! Simulation tuning constants shared across systems.
//!
//! Motion values are expressed per tick; durations are wall-clock
//! milliseconds so timed transitions stay correct at any frame rate.

// Height field.
/// Sampling frequencies of the three value-noise octaves.
pub const TERRAIN_FREQUENCIES: [f32; 3] = [0.02, 0.05, 0.1];
/// Weights of the three value-noise octaves.
pub const TERRAIN_WEIGHTS: [f32; 3] = [5.0, 2.0, 1.0];
/// Forward-difference offset used when deriving surface normals.
pub const NORMAL_EPSILON: f32 = 0.1;

// Colliders.
/// Minimum interval between collider snapshot refreshes.
pub const COLLIDER_REFRESH_INTERVAL_MS: u64 = 1000;

// Vehicle.
/// Altitude above which the vehicle may no longer climb.
pub const VEHICLE_ALTITUDE_CEILING: f32 = 50.0;
/// Minimum clearance between the vehicle and the ground.
pub const VEHICLE_GROUND_CLEARANCE: f32 = 2.0;
/// Horizontal range inside which colliders are tested against the vehicle.
pub const VEHICLE_COLLIDER_SCAN_RANGE: f32 = 10.0;
/// Collision radius of the vehicle hull.
pub const VEHICLE_RADIUS: f32 = 3.0;
/// Forward and backward speed in units per tick.
pub const VEHICLE_SPEED: f32 = 0.5;
/// Vertical speed in units per tick.
pub const VEHICLE_CLIMB_SPEED: f32 = 0.3;
/// Yaw change in radians per tick.
pub const VEHICLE_TURN_RATE: f32 = 0.03;
/// Initial hover height above the terrain.
pub const VEHICLE_START_ALTITUDE: f32 = 20.0;

// Beam.
/// Highest altitude from which the beam may be engaged or held.
pub const BEAM_MAX_ALTITUDE: f32 = 25.0;
/// How long an idle beam stays on before it times out.
pub const BEAM_TIMEOUT_MS: u64 = 1000;
/// Length of the cooldown after a timeout or a completed capture.
pub const BEAM_COOLDOWN_MS: u64 = 1000;
/// Horizontal radius of the beam column.
pub const BEAM_RADIUS: f32 = 2.0;
/// Radius around the beam impact point inside which creatures scatter.
pub const BEAM_SCATTER_RADIUS: f32 = 13.0;

// Creatures.
/// Collision radius of a creature.
pub const CREATURE_RADIUS: f32 = 0.5;
/// Horizontal distance to the vehicle that triggers fleeing.
pub const FLEE_DISTANCE: f32 = 15.0;
/// Fleeing speed in units per tick.
pub const FLEE_SPEED: f32 = 0.3;
/// Wandering speed in units per tick.
pub const WANDER_SPEED: f32 = 0.1;
/// Per-tick probability of picking a new wander heading.
pub const WANDER_CHANCE: f64 = 0.02;
/// Fraction of velocity kept each tick when nothing sets it.
pub const VELOCITY_DAMPING: f32 = 0.95;
/// Height below the vehicle at which abducted creatures are held.
pub const ABDUCTION_TARGET_OFFSET: f32 = 2.0;
/// Distance beyond which an abducted creature is snapped back into the band.
pub const ABDUCTION_ESCAPE_DISTANCE: f32 = 3.0;
/// Radius of the capture band; creatures only rise while inside it.
pub const CAPTURE_BAND_RADIUS: f32 = 2.0;
/// Maximum length of the centering offset applied per tick.
pub const CENTERING_MAX_STEP: f32 = 1.0;
/// Scale applied to the centering offset.
pub const CENTERING_STRENGTH: f32 = 0.8;
/// Initial lift speed of an abducted creature.
pub const LIFT_SPEED_START: f32 = 0.2;
/// Per-tick lift acceleration factor.
pub const LIFT_SPEED_GROWTH: f32 = 1.05;
/// Upper bound on the lift speed.
pub const LIFT_SPEED_MAX: f32 = 0.5;
/// Initial spin rate of an abducted creature in radians per tick.
pub const SPIN_RATE_START: f32 = 0.1;
/// Per-tick convergence of the tilt towards horizontal.
pub const TILT_CONVERGENCE: f32 = 0.1;
/// Vertical distance to the vehicle at which a creature is captured.
pub const CAPTURE_DISTANCE: f32 = 2.0;
/// Score awarded per captured creature.
pub const CAPTURE_SCORE: u32 = 10;
/// Gravity applied to falling creatures per tick.
pub const FALL_GRAVITY: f32 = 0.015;
/// Terminal fall velocity (negative is down).
pub const FALL_TERMINAL_VELOCITY: f32 = -0.5;
/// Per-tick decay applied to spin and tilt while falling.
pub const FALL_DECAY: f32 = 0.95;
/// Height above the ground at which a falling creature counts as landed.
///
/// This is a touchdown threshold only. A landed creature rests at the ground
/// height itself, not at this offset.
pub const CREATURE_STANDING_HEIGHT: f32 = 0.4;

// Levels.
/// Attempts made to find an unobstructed spawn spot for one creature.
pub const SPAWN_ATTEMPTS: u32 = 16;
/// Largest half-width random placement will sample over.
pub const MAX_SAMPLE_EXTENT: f32 = 10_000.0;
