//! Terrain collaborator: elevation plus the decorations standing on it.
//!
//! The simulation talks to terrain only through the [`Terrain`] trait so hosts
//! can substitute flat test grounds or authored landscapes for the procedural
//! one.

mod decoration;
mod height_field;

pub use decoration::{collect_colliders, scatter, DecorationKind, DecorationNode, ScatterCounts};
pub use height_field::HeightField;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::collider::Collider;
use crate::config::TerrainConfig;

/// Queries the simulation needs from the landscape.
pub trait Terrain {
    /// Returns the ground elevation at world coordinates `(x, z)`.
    fn height_at(&self, x: f32, z: f32) -> f32;

    /// Rebuilds the static obstacle list from the decoration layer.
    fn colliders_snapshot(&self) -> Vec<Collider>;
}

/// Seeded landscape: value-noise elevation with scattered decorations.
#[derive(Debug, Clone, PartialEq)]
pub struct ProceduralTerrain {
    field: HeightField,
    decorations: DecorationNode,
}

impl ProceduralTerrain {
    /// Generates terrain and decorations from `seed`.
    ///
    /// The same seed and configuration always yield the same landscape.
    #[must_use]
    pub fn generate(seed: u64, config: &TerrainConfig) -> Self {
        let field = HeightField::new(fold_seed(seed));
        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed_dec0);
        let decorations = scatter(
            &mut rng,
            &field,
            ScatterCounts {
                trees: config.trees,
                buildings: config.buildings,
                fences: config.fences,
                scenery: config.scenery,
            },
            config.extent,
            config.clear_radius,
        );
        Self { field, decorations }
    }

    /// Returns the underlying height field.
    #[must_use]
    pub const fn height_field(&self) -> &HeightField {
        &self.field
    }

    /// Returns the decoration tree.
    #[must_use]
    pub const fn decorations(&self) -> &DecorationNode {
        &self.decorations
    }

    /// Returns the surface normal at `(x, z)`.
    #[must_use]
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        self.field.normal_at(x, z)
    }
}

impl Terrain for ProceduralTerrain {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self.field.height_at(x, z)
    }

    fn colliders_snapshot(&self) -> Vec<Collider> {
        collect_colliders(&self.decorations)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "The seed is folded to 32 bits on purpose."
)]
const fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}
