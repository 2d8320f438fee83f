use crate::error::PhysicsError;
use crate::math::{Aabb, Vector2, EPSILON};
use crate::bodies::RigidBody;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A convex polygon collision shape
///
/// Vertices are offsets from the owning body's position, rotated by the body's
/// angle. They are stored with positive winding (positive signed area) no
/// matter which order they were supplied in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Polygon {
    vertices: Vec<Vector2>,
}

impl Polygon {
    /// Creates a convex polygon from its vertices
    pub fn new(vertices: Vec<Vector2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(PhysicsError::InvalidGeometry(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if let Some(v) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(PhysicsError::InvalidGeometry(format!(
                "polygon vertex {} is not finite",
                v
            )));
        }

        let mut vertices = vertices;
        let area = signed_area(&vertices);
        if area.abs() < EPSILON {
            return Err(PhysicsError::InvalidGeometry(
                "polygon has zero area".to_string(),
            ));
        }
        if area < 0.0 {
            vertices.reverse();
        }

        let n = vertices.len();
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let c = vertices[(i + 2) % n];
            if (b - a).length() <= EPSILON {
                return Err(PhysicsError::InvalidGeometry(format!(
                    "polygon has a repeated vertex at {}",
                    b
                )));
            }
            // Every edge must contribute a separating axis
            let turn = (b - a).cross(&(c - b));
            if turn.abs() <= EPSILON {
                return Err(PhysicsError::InvalidGeometry(format!(
                    "polygon has collinear vertices at {}",
                    b
                )));
            }
            if turn < -EPSILON {
                return Err(PhysicsError::InvalidGeometry(format!(
                    "polygon is not convex at vertex {}",
                    b
                )));
            }
        }

        Ok(Self { vertices })
    }

    /// Creates an axis-aligned square centred on the body
    pub fn square(half_extent: f64) -> Result<Self> {
        Self::rectangle(half_extent * 2.0, half_extent * 2.0)
    }

    /// Creates an axis-aligned rectangle centred on the body
    pub fn rectangle(width: f64, height: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(PhysicsError::InvalidGeometry(format!(
                "rectangle dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let hw = width * 0.5;
        let hh = height * 0.5;
        Self::new(vec![
            Vector2::new(-hw, hh),
            Vector2::new(hw, hh),
            Vector2::new(hw, -hh),
            Vector2::new(-hw, -hh),
        ])
    }

    /// Returns the vertices in body space
    pub fn get_vertices(&self) -> &[Vector2] {
        &self.vertices
    }

    /// Returns the polygon's area
    pub fn area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    /// Returns the vertices transformed into world space
    pub fn world_vertices(&self, body: &RigidBody) -> Vec<Vector2> {
        self.vertices.iter().map(|v| body.local_to_world(*v)).collect()
    }

    /// Returns the world-space bounds
    pub fn world_bounds(&self, body: &RigidBody) -> Aabb {
        let vertices = self.world_vertices(body);
        // At least three vertices are guaranteed by construction
        Aabb::from_points(&vertices).unwrap_or_else(|| {
            Aabb::new(body.get_position(), body.get_position())
        })
    }
}

/// Moment of inertia of a solid box of the given mass and dimensions
pub fn moment_for_box(mass: f64, width: f64, height: f64) -> f64 {
    mass * (width * width + height * height) / 12.0
}

fn signed_area(vertices: &[Vector2]) -> f64 {
    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| vertices[i].cross(&vertices[(i + 1) % n]))
        .sum();
    twice * 0.5
}
