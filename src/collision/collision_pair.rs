use crate::core::ShapeHandle;

/// A pair of shapes that could potentially collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// The first shape in the collision pair
    pub shape_a: ShapeHandle,

    /// The second shape in the collision pair
    pub shape_b: ShapeHandle,
}

impl CollisionPair {
    /// Creates a new collision pair
    pub fn new(shape_a: ShapeHandle, shape_b: ShapeHandle) -> Self {
        // Always sort the handles to ensure consistent ordering
        if shape_a <= shape_b {
            Self { shape_a, shape_b }
        } else {
            Self { shape_a: shape_b, shape_b: shape_a }
        }
    }

    /// Checks if this collision pair contains the specified shape
    pub fn contains(&self, shape: ShapeHandle) -> bool {
        self.shape_a == shape || self.shape_b == shape
    }

    /// Returns the other shape in the pair
    pub fn other(&self, shape: ShapeHandle) -> Option<ShapeHandle> {
        if self.shape_a == shape {
            Some(self.shape_b)
        } else if self.shape_b == shape {
            Some(self.shape_a)
        } else {
            None
        }
    }
}
