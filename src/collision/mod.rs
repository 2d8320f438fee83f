mod collision_pair;
mod contact_manifold;
pub mod broad_phase;
pub mod narrow_phase;
pub mod contact_solver;

pub use self::collision_pair::CollisionPair;
pub use self::contact_manifold::{ContactManifold, ManifoldPoint};
pub use self::broad_phase::{BroadPhase, BroadPhaseProxy, BruteForceBroadPhase, SweepAndPruneBroadPhase};
pub use self::narrow_phase::{collide, intersect, Contact, ConvexView};
pub use self::contact_solver::{ContactSolver, SequentialImpulseSolver};
