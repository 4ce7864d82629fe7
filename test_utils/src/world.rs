//! Simulation builders and frame runners.

use glam::Vec3;
use skylift::{InputFrame, Simulation, SimulationConfig, Terrain, TickReport, Timestamp};

/// Frame length used by the behaviour suites.
pub const FRAME_MS: u64 = 16;

/// Timestamp of frame number `frame`.
pub fn frame_time(frame: u64) -> Timestamp {
    Timestamp(frame * FRAME_MS)
}

/// Builds a simulation over `terrain` with the vehicle hovering `altitude`
/// above the ground at the origin.
pub fn hovering<T: Terrain>(terrain: T, altitude: f32) -> Simulation<T> {
    let ground = terrain.height_at(0.0, 0.0);
    let mut sim = Simulation::with_terrain(terrain, SimulationConfig::default());
    sim.place_vehicle(Vec3::new(0.0, ground + altitude, 0.0));
    sim
}

/// Runs `count` frames from `first`, feeding the same input each time.
pub fn run_frames<T: Terrain>(
    sim: &mut Simulation<T>,
    first: u64,
    count: u64,
    input: &InputFrame,
) -> Vec<TickReport> {
    (first..first + count)
        .map(|frame| sim.tick(frame_time(frame), input))
        .collect()
}
