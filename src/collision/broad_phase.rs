use crate::core::{BodyHandle, ShapeHandle};
use crate::math::Aabb;
use std::cmp::Ordering;

/// What the broad phase needs to know about a shape
#[derive(Debug, Clone, Copy)]
pub struct BroadPhaseProxy {
    /// The shape the proxy stands for
    pub shape: ShapeHandle,

    /// The body the shape is attached to
    pub body: BodyHandle,

    /// World-space bounds of the shape
    pub aabb: Aabb,

    /// Whether the shape belongs to a static body
    pub is_static: bool,
}

impl BroadPhaseProxy {
    /// Returns true if the two proxies may collide at all
    fn can_pair_with(&self, other: &BroadPhaseProxy) -> bool {
        !(self.is_static && other.is_static) && self.body != other.body
    }
}

/// Trait for broad-phase collision detection algorithms
pub trait BroadPhase {
    /// Returns the index pairs `(i, j)` with `i < j` of proxies whose bounds overlap
    ///
    /// Static-static pairs and pairs of shapes on the same body are never reported.
    /// The result is sorted so that contact resolution order is deterministic.
    fn find_pairs(&mut self, proxies: &[BroadPhaseProxy]) -> Vec<(usize, usize)>;
}

/// Simple brute-force broad-phase algorithm
#[derive(Debug, Default)]
pub struct BruteForceBroadPhase;

impl BruteForceBroadPhase {
    /// Creates a new brute-force broad-phase
    pub fn new() -> Self {
        Self
    }
}

impl BroadPhase for BruteForceBroadPhase {
    fn find_pairs(&mut self, proxies: &[BroadPhaseProxy]) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();

        for i in 0..proxies.len() {
            for j in (i + 1)..proxies.len() {
                let (a, b) = (&proxies[i], &proxies[j]);
                if a.can_pair_with(b) && a.aabb.intersects(&b.aabb) {
                    pairs.push((i, j));
                }
            }
        }

        pairs
    }
}

/// Sort-and-sweep broad phase along the x axis
#[derive(Debug, Default)]
pub struct SweepAndPruneBroadPhase {
    /// Proxy indices sorted by their minimum x, reused between calls
    order: Vec<usize>,
}

impl SweepAndPruneBroadPhase {
    /// Creates a new sweep-and-prune broad-phase
    pub fn new() -> Self {
        Self { order: Vec::new() }
    }
}

impl BroadPhase for SweepAndPruneBroadPhase {
    fn find_pairs(&mut self, proxies: &[BroadPhaseProxy]) -> Vec<(usize, usize)> {
        self.order.clear();
        self.order.extend(0..proxies.len());
        self.order.sort_by(|&i, &j| {
            proxies[i].aabb.min.x
                .partial_cmp(&proxies[j].aabb.min.x)
                .unwrap_or(Ordering::Equal)
                .then(i.cmp(&j))
        });

        let mut pairs = Vec::new();
        for (k, &i) in self.order.iter().enumerate() {
            let a = &proxies[i];
            for &j in &self.order[k + 1..] {
                let b = &proxies[j];
                if b.aabb.min.x > a.aabb.max.x {
                    break;
                }
                if a.can_pair_with(b) && a.aabb.intersects(&b.aabb) {
                    pairs.push((i.min(j), i.max(j)));
                }
            }
        }

        pairs.sort_unstable();
        pairs
    }
}
