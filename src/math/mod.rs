mod vector;
mod aabb;

pub use vector::Vector2;
pub use aabb::Aabb;

/// Constant for a very small number, used for comparisons
pub const EPSILON: f64 = 1.0e-9;

/// Returns true if the two floating point values are approximately equal
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Returns true if the value is approximately zero
#[inline]
pub fn approx_zero(a: f64) -> bool {
    a.abs() < EPSILON
}

/// Converts a body angle in radians into a screen angle in degrees
///
/// Screen angles start pointing up and grow clockwise, so a body angle of
/// zero (pointing along +x) maps to 90 degrees.
#[inline]
pub fn to_screen_angle(radians: f64) -> f64 {
    radians.to_degrees() + 90.0
}

/// Converts a screen angle in degrees back into a body angle in radians
#[inline]
pub fn to_radians(screen_angle: f64) -> f64 {
    (screen_angle - 90.0).to_radians()
}

/// Horizontal offset of a point `distance` away along a screen angle
#[inline]
pub fn offset_x(screen_angle: f64, distance: f64) -> f64 {
    screen_angle.to_radians().sin() * distance
}

/// Vertical offset of a point `distance` away along a screen angle
#[inline]
pub fn offset_y(screen_angle: f64, distance: f64) -> f64 {
    -screen_angle.to_radians().cos() * distance
}
