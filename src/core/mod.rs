pub mod world;
pub mod config;
pub mod storage;
pub mod events;
pub mod spawner;
pub mod simulation;
mod body_set;

pub use self::world::World;
pub use self::config::{SimulationConfig, SpawnConfig, SpawnPolicy, BlockTemplate};
pub use self::storage::{Handle, HandleAllocator, Storage};
pub use self::events::{
    EventQueue, CollisionEvent, CollisionEventType, BodyEvent, ShapeEvent, LifecycleEventType,
};
pub use self::spawner::{Spawner, Block, BlockId};
pub use self::simulation::{Simulation, ShapeView};
pub use self::body_set::BodySet;

/// A unique identifier for a body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

/// A unique identifier for a shape in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeHandle(pub(crate) u32);

impl Handle for BodyHandle {
    fn from_raw(id: u32) -> Self {
        Self(id)
    }

    fn raw(&self) -> u32 {
        self.0
    }
}

impl Handle for ShapeHandle {
    fn from_raw(id: u32) -> Self {
        Self(id)
    }

    fn raw(&self) -> u32 {
        self.0
    }
}
