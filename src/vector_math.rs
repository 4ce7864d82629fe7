//! Horizontal-plane vector helpers.
//! The simulation works in a y-up world; most proximity tests ignore height.
use glam::{Vec2, Vec3};

/// Projects a world position onto the horizontal `x`/`z` plane.
///
/// # Examples
/// ```
/// use glam::{Vec2, Vec3};
/// use skylift::vector_math::horizontal;
/// assert_eq!(horizontal(Vec3::new(1.0, 9.0, -2.0)), Vec2::new(1.0, -2.0));
/// ```
#[must_use]
pub const fn horizontal(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z)
}

/// Returns the horizontal distance between two world positions.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use skylift::vector_math::horizontal_distance;
/// let d = horizontal_distance(Vec3::new(0.0, 5.0, 0.0), Vec3::new(3.0, -7.0, 4.0));
/// assert!((d - 5.0).abs() < f32::EPSILON);
/// ```
#[must_use]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    horizontal(a).distance(horizontal(b))
}

/// Returns the unit horizontal direction pointing from `from` towards `to`.
///
/// Non-finite or coincident inputs produce [`Vec2::ZERO`] so callers never
/// propagate NaN into velocities.
///
/// # Examples
/// ```
/// use glam::{Vec2, Vec3};
/// use skylift::vector_math::horizontal_direction;
/// let dir = horizontal_direction(Vec3::ZERO, Vec3::new(0.0, 3.0, 2.0));
/// assert_eq!(dir, Vec2::new(0.0, 1.0));
/// assert_eq!(horizontal_direction(Vec3::ONE, Vec3::ONE), Vec2::ZERO);
/// ```
#[must_use]
pub fn horizontal_direction(from: Vec3, to: Vec3) -> Vec2 {
    let offset = horizontal(to) - horizontal(from);
    if !offset.is_finite() {
        return Vec2::ZERO;
    }
    offset.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Returns a horizontal unit vector for a heading angle in radians.
///
/// A heading of zero points along `+z`, matching [`heading_of`].
#[must_use]
pub fn heading_vector(heading: f32) -> Vec2 {
    let (sin, cos) = heading.sin_cos();
    Vec2::new(sin, cos)
}

/// Returns the heading angle of a horizontal vector in radians.
#[must_use]
pub fn heading_of(direction: Vec2) -> f32 {
    direction.x.atan2(direction.y)
}
