use crate::bodies::{Material, RigidBody};
use crate::core::BodyHandle;
use crate::error::PhysicsError;
use crate::math::{Aabb, Vector2};
use crate::shapes::{Polygon, Segment};
use crate::Result;

/// Discriminant of the supported collision geometries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A thick line segment (static boundaries)
    Segment,

    /// A convex polygon (falling blocks)
    Polygon,
}

/// Collision geometry of a shape
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    Segment(Segment),
    Polygon(Polygon),
}

impl ShapeGeometry {
    /// Returns the discriminant of this geometry
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeGeometry::Segment(_) => ShapeKind::Segment,
            ShapeGeometry::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Returns the rounding radius of the geometry
    pub fn radius(&self) -> f64 {
        match self {
            ShapeGeometry::Segment(segment) => segment.get_radius(),
            ShapeGeometry::Polygon(_) => 0.0,
        }
    }

    /// Returns the outline points in world space
    ///
    /// Segments yield their two endpoints, polygons their vertices in winding order.
    pub fn world_points(&self, body: &RigidBody) -> Vec<Vector2> {
        match self {
            ShapeGeometry::Segment(segment) => segment.world_endpoints(body).to_vec(),
            ShapeGeometry::Polygon(polygon) => polygon.world_vertices(body),
        }
    }

    /// Returns the world-space bounding box
    pub fn world_bounds(&self, body: &RigidBody) -> Aabb {
        match self {
            ShapeGeometry::Segment(segment) => segment.world_bounds(body),
            ShapeGeometry::Polygon(polygon) => polygon.world_bounds(body),
        }
    }
}

impl From<Segment> for ShapeGeometry {
    fn from(segment: Segment) -> Self {
        ShapeGeometry::Segment(segment)
    }
}

impl From<Polygon> for ShapeGeometry {
    fn from(polygon: Polygon) -> Self {
        ShapeGeometry::Polygon(polygon)
    }
}

/// How an external renderer should draw a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    /// ARGB color
    pub color: u32,

    /// Outline width in pixels
    pub line_width: f64,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            color: 0xff00_0000,
            line_width: 1.0,
        }
    }
}

/// Collision geometry attached to a body
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// The body this shape is attached to (not owned)
    body: BodyHandle,

    /// The collision geometry, relative to the body
    geometry: ShapeGeometry,

    /// Surface properties
    material: Material,

    /// Rendering hints
    style: DrawStyle,
}

impl Shape {
    /// Attaches geometry to a body with the given elasticity and friction
    pub fn new(
        body: BodyHandle,
        geometry: impl Into<ShapeGeometry>,
        elasticity: f64,
        friction: f64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&elasticity) {
            return Err(PhysicsError::InvalidParameter(format!(
                "elasticity must be within [0, 1], got {}",
                elasticity
            )));
        }
        if friction.is_nan() || friction < 0.0 || friction.is_infinite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "friction must be finite and non-negative, got {}",
                friction
            )));
        }

        Ok(Self {
            body,
            geometry: geometry.into(),
            material: Material::new(elasticity, friction),
            style: DrawStyle::default(),
        })
    }

    /// Builder-style draw style setter
    pub fn with_style(mut self, style: DrawStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the handle of the owning body
    pub fn get_body(&self) -> BodyHandle {
        self.body
    }

    /// Returns the collision geometry
    pub fn get_geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    /// Returns the geometry discriminant
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// Returns the surface material
    pub fn get_material(&self) -> &Material {
        &self.material
    }

    /// Returns the elasticity
    pub fn get_elasticity(&self) -> f64 {
        self.material.elasticity
    }

    /// Returns the friction coefficient
    pub fn get_friction(&self) -> f64 {
        self.material.friction
    }

    /// Returns the draw style
    pub fn get_style(&self) -> DrawStyle {
        self.style
    }
}
