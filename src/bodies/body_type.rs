/// Type of rigid body, determining how it behaves in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RigidBodyType {
    /// Dynamic bodies are fully simulated (affected by gravity and contacts)
    Dynamic,

    /// Static bodies have infinite mass; they collide but are never integrated
    Static,
}

impl RigidBodyType {
    /// Classifies a body from its mass: infinite mass means static
    pub fn from_mass(mass: f64) -> Self {
        if mass.is_infinite() {
            Self::Static
        } else {
            Self::Dynamic
        }
    }
}
