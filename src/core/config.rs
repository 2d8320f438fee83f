use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for the physics simulation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Width of the playable area
    pub world_width: f64,

    /// Height of the playable area; bodies below it have left the world
    pub world_height: f64,

    /// Gravity applied uniformly to every dynamic body
    pub gravity: Vector2,

    /// Number of equal substeps a frame is split into
    pub substeps: u32,

    /// Frame time budget in seconds, subdivided by `substeps`
    pub dt: f64,

    /// The number of sequential impulse passes per substep
    pub velocity_iterations: u32,

    /// Fraction of the remaining penetration removed per substep
    pub bias_factor: f64,

    /// Penetration tolerated without position correction
    pub penetration_slop: f64,

    /// Approach speed below which contacts do not bounce
    pub restitution_velocity_threshold: f64,
}

impl SimulationConfig {
    /// Returns the duration of a single substep
    pub fn substep_dt(&self) -> f64 {
        self.dt / self.substeps as f64
    }

    /// Checks the configuration, failing on the first invalid value
    pub fn validate(&self) -> Result<()> {
        if !(self.world_width > 0.0 && self.world_width.is_finite()) {
            return Err(invalid(format!("world_width must be positive, got {}", self.world_width)));
        }
        if !(self.world_height > 0.0 && self.world_height.is_finite()) {
            return Err(invalid(format!("world_height must be positive, got {}", self.world_height)));
        }
        if !self.gravity.is_finite() {
            return Err(invalid(format!("gravity must be finite, got {}", self.gravity)));
        }
        if self.substeps == 0 {
            return Err(invalid("substeps must be at least 1".to_string()));
        }
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(invalid(format!("dt must be positive, got {}", self.dt)));
        }
        if self.velocity_iterations == 0 {
            return Err(invalid("velocity_iterations must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.bias_factor) {
            return Err(invalid(format!("bias_factor must be within [0, 1], got {}", self.bias_factor)));
        }
        if !(self.penetration_slop >= 0.0 && self.penetration_slop.is_finite()) {
            return Err(invalid(format!("penetration_slop must be non-negative, got {}", self.penetration_slop)));
        }
        if !(self.restitution_velocity_threshold >= 0.0 && self.restitution_velocity_threshold.is_finite()) {
            return Err(invalid(format!(
                "restitution_velocity_threshold must be non-negative, got {}",
                self.restitution_velocity_threshold
            )));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            gravity: Vector2::new(0.0, 10.0),
            substeps: 10,
            dt: 1.0 / 60.0,
            velocity_iterations: 8,
            bias_factor: 0.2,
            penetration_slop: 0.05,
            restitution_velocity_threshold: 1.0,
        }
    }
}

/// How new blocks enter the world
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SpawnPolicy {
    /// All blocks are created up front and never recycled
    Fixed {
        /// Number of blocks
        count: usize,
    },

    /// One block per interval of simulated time until the population is reached
    Throttled {
        /// Maximum number of live blocks
        max_population: usize,

        /// Simulated milliseconds between two spawns
        interval_ms: u64,
    },
}

/// The body and shape parameters of a spawned block
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BlockTemplate {
    /// Half the side length of the square
    pub half_extent: f64,

    /// Body mass
    pub mass: f64,

    /// Body moment of inertia
    pub moment: f64,

    /// Initial orientation in radians
    pub angle: f64,

    /// Shape elasticity
    pub elasticity: f64,

    /// Shape friction
    pub friction: f64,
}

impl Default for BlockTemplate {
    fn default() -> Self {
        Self {
            half_extent: 10.0,
            mass: 10.0,
            moment: 100.0,
            angle: 3.0 * std::f64::consts::PI / 2.5,
            elasticity: 0.0,
            friction: 1.0,
        }
    }
}

/// Configuration of the block spawner
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SpawnConfig {
    /// Spawn policy
    pub policy: SpawnPolicy,

    /// Inset from the left and right world edges for spawn positions
    pub padding: f64,

    /// Vertical spawn coordinate; negative values are above the visible area
    pub spawn_height: f64,

    /// Random extra height added to blocks created up front
    pub spawn_height_jitter: f64,

    /// Parameters of every spawned block
    pub block: BlockTemplate,

    /// Seed of the placement random number generator
    pub seed: u64,

    /// Also recycle blocks that leave through the left or right edge
    pub recycle_on_horizontal_exit: bool,
}

impl SpawnConfig {
    /// Checks the configuration against the world it will spawn into
    pub fn validate(&self, simulation: &SimulationConfig) -> Result<()> {
        match self.policy {
            SpawnPolicy::Fixed { .. } => {}
            SpawnPolicy::Throttled { interval_ms, .. } => {
                if interval_ms == 0 {
                    return Err(invalid("spawn interval must be at least 1 ms".to_string()));
                }
            }
        }
        if !(self.padding >= 0.0 && 2.0 * self.padding < simulation.world_width) {
            return Err(invalid(format!(
                "padding {} leaves no spawn width in a world {} wide",
                self.padding, simulation.world_width
            )));
        }
        if !(self.spawn_height.is_finite() && self.spawn_height <= simulation.world_height) {
            return Err(invalid(format!(
                "spawn_height must lie above the bottom of the world, got {}",
                self.spawn_height
            )));
        }
        if !(self.spawn_height_jitter >= 0.0 && self.spawn_height_jitter.is_finite()) {
            return Err(invalid(format!(
                "spawn_height_jitter must be non-negative, got {}",
                self.spawn_height_jitter
            )));
        }
        let block = &self.block;
        if !(block.half_extent > 0.0 && block.half_extent.is_finite()) {
            return Err(invalid(format!("block half_extent must be positive, got {}", block.half_extent)));
        }
        if !(block.mass > 0.0 && block.mass.is_finite()) {
            return Err(invalid(format!("block mass must be positive and finite, got {}", block.mass)));
        }
        if !(block.moment > 0.0) {
            return Err(invalid(format!("block moment must be positive, got {}", block.moment)));
        }
        if !block.angle.is_finite() {
            return Err(invalid(format!("block angle must be finite, got {}", block.angle)));
        }
        if !(0.0..=1.0).contains(&block.elasticity) {
            return Err(invalid(format!("block elasticity must be within [0, 1], got {}", block.elasticity)));
        }
        if !(block.friction >= 0.0 && block.friction.is_finite()) {
            return Err(invalid(format!("block friction must be non-negative, got {}", block.friction)));
        }
        Ok(())
    }

    /// Returns the size of the population this configuration converges to
    pub fn target_population(&self) -> usize {
        match self.policy {
            SpawnPolicy::Fixed { count } => count,
            SpawnPolicy::Throttled { max_population, .. } => max_population,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            policy: SpawnPolicy::Throttled {
                max_population: 200,
                interval_ms: 50,
            },
            padding: 50.0,
            spawn_height: -50.0,
            spawn_height_jitter: 0.0,
            block: BlockTemplate::default(),
            seed: 0,
            recycle_on_horizontal_exit: false,
        }
    }
}

fn invalid(message: String) -> PhysicsError {
    PhysicsError::InvalidConfig(message)
}
