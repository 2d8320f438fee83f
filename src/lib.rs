pub mod math;
pub mod core;
pub mod bodies;
pub mod shapes;
pub mod collision;
pub mod scenes;

/// Re-export common types for easier usage
pub use crate::core::{
    World, Simulation, SimulationConfig, SpawnConfig, SpawnPolicy, Spawner,
    BodyHandle, ShapeHandle,
};
pub use crate::bodies::{RigidBody, RigidBodyType, Material};
pub use crate::shapes::{Shape, ShapeKind, ShapeGeometry, Segment, Polygon};
pub use crate::math::Vector2;

/// Error types for the physics engine
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Invalid geometry: {0}")]
        InvalidGeometry(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Invalid operation: {0}")]
        InvalidOperation(String),

        #[error("Simulation stability error: {0}")]
        SimulationError(String),
    }
}

/// Result type for physics engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
