#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Surface properties of a collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Material {
    /// Fraction of the approach speed kept along the contact normal, 0-1
    pub elasticity: f64,

    /// Coulomb friction coefficient
    pub friction: f64,
}

impl Material {
    /// Creates a new material with the specified properties
    pub fn new(elasticity: f64, friction: f64) -> Self {
        Self {
            elasticity,
            friction,
        }
    }

    /// A surface that absorbs all normal velocity and grips fully
    pub fn inelastic() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Returns the material used for a contact between `self` and `other`
    ///
    /// Both coefficients are combined with the geometric mean, so a fully
    /// inelastic surface makes every contact against it inelastic.
    pub fn combine(&self, other: &Material) -> Material {
        Material {
            elasticity: (self.elasticity * other.elasticity).sqrt(),
            friction: (self.friction * other.friction).sqrt(),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            elasticity: 0.0,
            friction: 1.0,
        }
    }
}
