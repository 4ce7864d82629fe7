//! Run-time configuration.
//!
//! Tuning constants that shape the feel of the game live in
//! [`constants`](crate::constants). This module holds the knobs a host picks per
//! session: the world seed, how densely terrain is decorated and how many
//! creatures each level spawns. Every field has a default so partial JSON
//! files are accepted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::MAX_SAMPLE_EXTENT;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for terrain, decorations and creature behaviour.
    pub seed: u64,
    /// Terrain decoration settings.
    pub terrain: TerrainConfig,
    /// Creature population settings.
    pub creatures: CreatureConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            terrain: TerrainConfig::default(),
            creatures: CreatureConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Decode`] when `json` does not match the schema
    /// and [`ConfigError::NonFinite`] when an extent decodes to NaN or
    /// infinity (`1e39` overflows `f32`, for instance).
    ///
    /// # Examples
    /// ```
    /// use skylift::SimulationConfig;
    /// let config = SimulationConfig::from_json_str(r#"{ "seed": 9 }"#).unwrap();
    /// assert_eq!(config.seed, 9);
    /// assert_eq!(config.terrain, Default::default());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks settings the decoder cannot: every extent must be finite.
    ///
    /// # Errors
    /// Returns [`ConfigError::NonFinite`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        [
            ("terrain.extent", self.terrain.extent),
            ("terrain.clear_radius", self.terrain.clear_radius),
            ("creatures.spawn_extent", self.creatures.spawn_extent),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map_or(Ok(()), |(field, value)| Err(ConfigError::NonFinite { field, value }))
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] when the file cannot be read,
    /// [`ConfigError::Parse`] when it is not valid configuration JSON and
    /// [`ConfigError::NonFinite`] when an extent is not a finite number.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| ConfigError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|err| match err {
            ConfigError::Decode(source) => ConfigError::Parse {
                path: file.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

/// Half-width actually sampled for a configured `extent`.
///
/// Negative values are mirrored, tiny ones widened to one unit and huge ones
/// capped at [`MAX_SAMPLE_EXTENT`]. NaN falls back to one unit.
///
/// # Examples
/// ```
/// use skylift::{config::sample_extent, MAX_SAMPLE_EXTENT};
/// assert_eq!(sample_extent(-30.0), 30.0);
/// assert_eq!(sample_extent(f32::INFINITY), MAX_SAMPLE_EXTENT);
/// assert_eq!(sample_extent(f32::NAN), 1.0);
/// ```
#[must_use]
pub fn sample_extent(extent: f32) -> f32 {
    if extent.is_nan() {
        return 1.0;
    }
    extent.abs().clamp(1.0, MAX_SAMPLE_EXTENT)
}

/// How the procedural terrain is decorated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Number of trees.
    pub trees: usize,
    /// Number of buildings.
    pub buildings: usize,
    /// Number of fence segments.
    pub fences: usize,
    /// Number of non-colliding rocks and flowers.
    pub scenery: usize,
    /// Half-width of the square decorations are scattered over.
    pub extent: f32,
    /// Radius around the origin kept free of obstacles for the vehicle's start.
    pub clear_radius: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            trees: 40,
            buildings: 8,
            fences: 20,
            scenery: 30,
            extent: 120.0,
            clear_radius: 12.0,
        }
    }
}

/// Creature population per level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    /// Creatures on the first level.
    pub base: usize,
    /// Extra creatures added by each further level.
    pub per_level: usize,
    /// Half-width of the square creatures spawn in.
    pub spawn_extent: f32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            base: 5,
            per_level: 2,
            spawn_extent: 60.0,
        }
    }
}

impl CreatureConfig {
    /// Number of creatures spawned on `level` (levels start at 1).
    #[must_use]
    pub fn batch_for(&self, level: u32) -> usize {
        let extra = usize::try_from(level.saturating_sub(1)).unwrap_or(usize::MAX);
        self.base.saturating_add(extra.saturating_mul(self.per_level))
    }
}
