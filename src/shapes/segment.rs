use crate::error::PhysicsError;
use crate::math::{Aabb, Vector2};
use crate::bodies::RigidBody;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A line segment with rounded thickness, used for floors, walls and slides
///
/// Endpoints are offsets from the owning body's position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Segment {
    a: Vector2,
    b: Vector2,
    radius: f64,
}

impl Segment {
    /// Creates a segment between `a` and `b` with the given radius
    pub fn new(a: Vector2, b: Vector2, radius: f64) -> Result<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(PhysicsError::InvalidGeometry(format!(
                "segment endpoints must be finite, got {} and {}",
                a, b
            )));
        }
        if (b - a).is_zero() {
            return Err(PhysicsError::InvalidGeometry(format!(
                "segment endpoints coincide at {}",
                a
            )));
        }
        if radius.is_nan() || radius < 0.0 || radius.is_infinite() {
            return Err(PhysicsError::InvalidGeometry(format!(
                "segment radius must be finite and non-negative, got {}",
                radius
            )));
        }

        Ok(Self { a, b, radius })
    }

    /// Returns the first endpoint in body space
    pub fn get_a(&self) -> Vector2 {
        self.a
    }

    /// Returns the second endpoint in body space
    pub fn get_b(&self) -> Vector2 {
        self.b
    }

    /// Returns the segment's radius
    pub fn get_radius(&self) -> f64 {
        self.radius
    }

    /// Returns the segment length
    pub fn length(&self) -> f64 {
        self.a.distance(&self.b)
    }

    /// Returns the endpoints transformed into world space
    pub fn world_endpoints(&self, body: &RigidBody) -> [Vector2; 2] {
        [body.local_to_world(self.a), body.local_to_world(self.b)]
    }

    /// Returns the world-space bounds including the radius
    pub fn world_bounds(&self, body: &RigidBody) -> Aabb {
        let [a, b] = self.world_endpoints(body);
        Aabb::new(
            Vector2::new(a.x.min(b.x), a.y.min(b.y)),
            Vector2::new(a.x.max(b.x), a.y.max(b.y)),
        )
        .expanded(self.radius)
    }
}
