use crate::bodies::Material;
use crate::collision::collision_pair::CollisionPair;
use crate::collision::narrow_phase::Contact;
use crate::core::BodyHandle;
use crate::math::Vector2;

/// A contact point together with its solver state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManifoldPoint {
    /// Contact position in world space
    pub position: Vector2,

    /// Offset of the contact from body A's centre
    pub r_a: Vector2,

    /// Offset of the contact from body B's centre
    pub r_b: Vector2,

    /// Effective mass along the normal
    pub normal_mass: f64,

    /// Effective mass along the tangent
    pub tangent_mass: f64,

    /// Normal impulse accumulated this substep
    pub normal_impulse: f64,

    /// Tangent impulse accumulated this substep
    pub tangent_impulse: f64,

    /// Target separating speed from restitution
    pub velocity_bias: f64,
}

impl ManifoldPoint {
    fn new(position: Vector2) -> Self {
        Self {
            position,
            r_a: Vector2::zero(),
            r_b: Vector2::zero(),
            normal_mass: 0.0,
            tangent_mass: 0.0,
            normal_impulse: 0.0,
            tangent_impulse: 0.0,
            velocity_bias: 0.0,
        }
    }
}

/// The contact between two shapes for one substep
#[derive(Debug, Clone, PartialEq)]
pub struct ContactManifold {
    /// The shapes in contact
    pub pair: CollisionPair,

    /// Body of `pair.shape_a`
    pub body_a: BodyHandle,

    /// Body of `pair.shape_b`
    pub body_b: BodyHandle,

    /// Unit normal from shape A to shape B
    pub normal: Vector2,

    /// Penetration depth
    pub depth: f64,

    /// The contact points
    pub points: Vec<ManifoldPoint>,

    /// Combined surface properties of the two shapes
    pub material: Material,
}

impl ContactManifold {
    /// Builds a manifold from a narrow-phase contact
    pub fn new(
        pair: CollisionPair,
        body_a: BodyHandle,
        body_b: BodyHandle,
        contact: Contact,
        material: Material,
    ) -> Self {
        Self {
            pair,
            body_a,
            body_b,
            normal: contact.normal,
            depth: contact.depth,
            points: contact.points.into_iter().map(ManifoldPoint::new).collect(),
            material,
        }
    }

    /// Total normal impulse applied to this contact
    pub fn total_normal_impulse(&self) -> f64 {
        self.points.iter().map(|p| p.normal_impulse).sum()
    }
}
