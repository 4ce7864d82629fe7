#![cfg_attr(docsrs, feature(doc_cfg))]
//! Simulation core for a tractor-beam creature collection game.
//!
//! A flying vehicle roams procedurally generated terrain and uses a timed
//! beam to lift ground creatures aboard. The crate owns the rules: terrain
//! elevation and obstacles, move validation, the beam state machine, creature
//! motion and the per-tick orchestration. Rendering is left to the host,
//! which reads positions and consumes [`SimEvent`]s.
//!
//! ```rust,no_run
//! use skylift::prelude::*;
//!
//! let mut sim = Simulation::new(SimulationConfig::default());
//! sim.start_level(1, Timestamp(0));
//! let report = sim.tick(Timestamp(16), &InputFrame::holding([Key::Forward]));
//! println!("altitude {}", report.altitude);
//! ```
pub mod autopilot;
pub mod beam;
pub mod clock;
pub mod collider;
pub mod collision;
pub mod config;
pub mod constants;
pub mod creature;
pub mod driver;
pub mod error;
pub mod input;
pub mod logging;
pub mod simulation;
pub mod terrain;
pub mod vector_math;
pub mod vehicle;
pub use constants::*;

// Re-export commonly used items
pub use autopilot::Autopilot;
pub use beam::{BeamController, BeamPhase, BeamState, BeamTransition, BeamVisual, TransitionCause};
pub use clock::{Clock, ManualClock, MonotonicClock, Timestamp};
pub use collider::{Collider, ColliderKind, ColliderRegistry};
pub use collision::{CollisionSystem, Mover};
pub use config::{CreatureConfig, SimulationConfig, TerrainConfig};
pub use creature::{Creature, CreatureId, MotionState};
pub use driver::FrameDriver;
pub use error::{ConfigError, WorldDataError};
pub use input::{ControlAxes, InputFrame, Key};
pub use logging::init as init_logging;
pub use simulation::{SimEvent, Simulation, TickReport};
pub use terrain::{DecorationKind, DecorationNode, HeightField, ProceduralTerrain, Terrain};
pub use vector_math::{horizontal, horizontal_direction, horizontal_distance};
pub use vehicle::Vehicle;

pub mod prelude {
    //! Prelude exports for hosts driving the simulation.
    //!
    //! ```rust,no_run
    //! use skylift::prelude::*;
    //! ```

    pub use crate::BeamVisual;
    pub use crate::Clock;
    pub use crate::InputFrame;
    pub use crate::Key;
    pub use crate::SimEvent;
    pub use crate::Simulation;
    pub use crate::SimulationConfig;
    pub use crate::Terrain;
    pub use crate::TickReport;
    pub use crate::Timestamp;
}
