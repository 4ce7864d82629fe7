//! Terrain fixtures with closed-form heights.

use glam::Vec3;
use skylift::{Collider, ColliderKind, Terrain};

/// Level ground at a fixed height with optional obstacles.
#[derive(Debug, Clone, Default)]
pub struct FlatTerrain {
    /// Ground elevation everywhere.
    pub height: f32,
    /// Obstacles returned by every snapshot.
    pub colliders: Vec<Collider>,
}

impl FlatTerrain {
    /// Creates empty ground at `height`.
    ///
    /// # Examples
    /// ```
    /// use skylift::Terrain;
    /// use test_utils::FlatTerrain;
    /// let ground = FlatTerrain::at(2.0);
    /// assert_eq!(ground.height_at(10.0, -4.0), 2.0);
    /// ```
    pub fn at(height: f32) -> Self {
        Self {
            height,
            colliders: Vec::new(),
        }
    }

    /// Adds an obstacle of `kind` standing at `(x, z)`.
    pub fn with_obstacle(mut self, kind: ColliderKind, x: f32, z: f32) -> Self {
        self.colliders
            .push(Collider::new(kind, Vec3::new(x, self.height, z)));
        self
    }
}

impl Terrain for FlatTerrain {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }

    fn colliders_snapshot(&self) -> Vec<Collider> {
        self.colliders.clone()
    }
}

/// Ground rising linearly along `x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RampTerrain {
    /// Height gained per unit of `x`.
    pub slope: f32,
}

impl Terrain for RampTerrain {
    fn height_at(&self, x: f32, _z: f32) -> f32 {
        x * self.slope
    }

    fn colliders_snapshot(&self) -> Vec<Collider> {
        Vec::new()
    }
}
