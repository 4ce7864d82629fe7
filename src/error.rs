//! Error types reported by the simulation core.
//!
//! World data problems never abort a run: they are logged and the offending
//! object is skipped. Configuration errors surface to the caller.

use std::path::PathBuf;

use thiserror::Error;

use crate::terrain::DecorationKind;

/// Problems found while deriving colliders from decorations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldDataError {
    /// A decoration carried a NaN or infinite coordinate.
    #[error("{kind:?} decoration has a non-finite position ({x}, {y}, {z})")]
    NonFinitePosition {
        /// Kind tag of the offending decoration.
        kind: DecorationKind,
        /// Reported x-coordinate.
        x: f32,
        /// Reported y-coordinate.
        y: f32,
        /// Reported z-coordinate.
        z: f32,
    },
    /// A decoration sat exactly at the world origin, which marks an unplaced
    /// object.
    #[error("{kind:?} decoration placed at the origin; treating it as unplaced")]
    OriginPlacement {
        /// Kind tag of the offending decoration.
        kind: DecorationKind,
    },
}

/// Failures while loading a [`SimulationConfig`](crate::SimulationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}", path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file was not valid JSON for the schema.
    #[error("failed to parse config {}", path.display())]
    Parse {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// JSON text did not match the configuration schema.
    #[error("failed to decode config")]
    Decode(#[from] serde_json::Error),
    /// A numeric setting was NaN or infinite.
    #[error("config field {field} must be finite, got {value}")]
    NonFinite {
        /// Dotted name of the offending field.
        field: &'static str,
        /// Value as decoded.
        value: f32,
    },
}
