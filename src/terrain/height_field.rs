//! Procedural elevation from layered value noise.
//!
//! [`HeightField`] is the single source of truth for terrain elevation: the
//! renderer builds its mesh from the same samples the physics queries use.

use glam::Vec3;

use crate::{NORMAL_EPSILON, TERRAIN_FREQUENCIES, TERRAIN_WEIGHTS};

/// Deterministic terrain elevation function.
///
/// # Examples
/// ```
/// use skylift::terrain::HeightField;
/// let field = HeightField::new(7);
/// let a = field.height_at(12.5, -3.0);
/// assert_eq!(a.to_bits(), field.height_at(12.5, -3.0).to_bits());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeightField {
    seed: u32,
}

impl HeightField {
    /// Creates a height field whose lattice values derive from `seed`.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Returns the terrain elevation at world coordinates `(x, z)`.
    ///
    /// NaN inputs produce NaN; callers must not feed them in.
    #[must_use]
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        TERRAIN_FREQUENCIES
            .iter()
            .zip(TERRAIN_WEIGHTS.iter())
            .map(|(&frequency, &weight)| weight * self.value_noise(x * frequency, z * frequency))
            .sum()
    }

    /// Returns the unit surface normal at `(x, z)` using forward differences.
    #[must_use]
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        let here = self.height_at(x, z);
        let dx = self.height_at(x + NORMAL_EPSILON, z) - here;
        let dz = self.height_at(x, z + NORMAL_EPSILON) - here;
        Vec3::new(-dx, NORMAL_EPSILON, -dz).normalize_or(Vec3::Y)
    }

    /// Smoothly interpolated lattice noise in `[-1, 1]`.
    fn value_noise(&self, x: f32, z: f32) -> f32 {
        let x0 = x.floor();
        let z0 = z.floor();
        let tx = smoothstep(x - x0);
        let tz = smoothstep(z - z0);
        let ix = lattice_index(x0);
        let iz = lattice_index(z0);

        let a = self.lattice(ix, iz);
        let b = self.lattice(ix.wrapping_add(1), iz);
        let c = self.lattice(ix, iz.wrapping_add(1));
        let d = self.lattice(ix.wrapping_add(1), iz.wrapping_add(1));

        lerp(lerp(a, b, tx), lerp(c, d, tx), tz)
    }

    #[expect(
        clippy::cast_sign_loss,
        reason = "Lattice indices are reinterpreted as raw bits for hashing."
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "Hash output only needs to be spread across [-1, 1]."
    )]
    fn lattice(&self, ix: i32, iz: i32) -> f32 {
        let mut h = (ix as u32).wrapping_mul(0x27d4_eb2d)
            ^ (iz as u32).wrapping_mul(0x1656_67b1)
            ^ self.seed.wrapping_mul(0x9e37_79b9);
        h ^= h >> 15;
        h = h.wrapping_mul(0x2c1b_3c6d);
        h ^= h >> 12;
        h = h.wrapping_mul(0x297a_2d39);
        h ^= h >> 15;
        (h as f32 / u32::MAX as f32).mul_add(2.0, -1.0)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Floored coordinates saturate into the i32 lattice."
)]
fn lattice_index(floored: f32) -> i32 {
    floored as i32
}

const fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (b - a).mul_add(t, a)
}
