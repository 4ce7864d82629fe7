//! Utility helpers for tests.
//!
//! Terrain fixtures with known geometry, simulation builders and float
//! assertions shared by the behaviour suites.

pub mod terrain;
pub mod world;

pub use terrain::{FlatTerrain, RampTerrain};
pub use world::{frame_time, hovering, run_frames, FRAME_MS};

/// Assert that `actual` is within `tolerance` of `expected`.
///
/// # Panics
/// Panics with both values if they differ by more than `tolerance`.
pub fn assert_near(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
