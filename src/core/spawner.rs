use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::bodies::RigidBody;
use crate::core::{BodyHandle, ShapeHandle, SimulationConfig, SpawnConfig, SpawnPolicy, World};
use crate::math::Vector2;
use crate::shapes::{DrawStyle, Polygon, Shape};
use crate::Result;

/// Index of a block slot in the spawner's population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub usize);

/// A spawned block: one dynamic body carrying one square shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Slot of the block
    pub id: BlockId,

    /// The block's body
    pub body: BodyHandle,

    /// The block's shape
    pub shape: ShapeHandle,
}

/// Creates blocks, throttles their arrival and recycles those that leave the world
#[derive(Debug)]
pub struct Spawner {
    config: SpawnConfig,
    world_width: f64,
    world_height: f64,
    rng: ChaCha8Rng,
    blocks: Vec<Block>,

    /// Simulated time seen by `update`
    elapsed: Duration,

    /// Simulated time at which the next throttled spawn is due
    next_spawn_at: Duration,

    spawned_total: usize,
    recycled_total: usize,
}

impl Spawner {
    /// Creates a spawner for a world described by `simulation`
    pub fn new(config: SpawnConfig, simulation: &SimulationConfig) -> Result<Self> {
        config.validate(simulation)?;

        let next_spawn_at = match config.policy {
            SpawnPolicy::Throttled { interval_ms, .. } => Duration::from_millis(interval_ms),
            SpawnPolicy::Fixed { .. } => Duration::ZERO,
        };

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            world_width: simulation.world_width,
            world_height: simulation.world_height,
            blocks: Vec::new(),
            elapsed: Duration::ZERO,
            next_spawn_at,
            spawned_total: 0,
            recycled_total: 0,
        })
    }

    /// Returns the spawn configuration
    pub fn get_config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Number of live blocks
    pub fn population(&self) -> usize {
        self.blocks.len()
    }

    /// Number of blocks created so far, recycled ones included
    pub fn spawned_total(&self) -> usize {
        self.spawned_total
    }

    /// Number of blocks recycled so far
    pub fn recycled_total(&self) -> usize {
        self.recycled_total
    }

    /// The live blocks in slot order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns a block by slot
    pub fn get_block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.0)
    }

    /// Creates the initial population
    ///
    /// The fixed policy creates every block at once, each at a random height
    /// within the configured jitter. The throttled policy starts empty.
    pub fn populate(&mut self, world: &mut World) -> Result<()> {
        if let SpawnPolicy::Fixed { count } = self.config.policy {
            for _ in self.blocks.len()..count {
                let jitter = self.config.spawn_height_jitter;
                let offset = if jitter > 0.0 { self.rng.gen_range(0.0..jitter) } else { 0.0 };
                let block = self.spawn_block(world, self.blocks.len(), offset)?;
                self.blocks.push(block);
            }
        }
        Ok(())
    }

    /// Advances the spawn clock by `dt` of simulated time
    ///
    /// Under the throttled policy one block is created per elapsed interval
    /// until the population reaches its maximum. Returns the number created.
    pub fn update(&mut self, world: &mut World, dt: Duration) -> Result<usize> {
        let (max_population, interval) = match self.config.policy {
            SpawnPolicy::Throttled { max_population, interval_ms } => {
                (max_population, Duration::from_millis(interval_ms))
            }
            SpawnPolicy::Fixed { .. } => return Ok(0),
        };

        self.elapsed += dt;

        let mut created = 0;
        while self.elapsed >= self.next_spawn_at && self.blocks.len() < max_population {
            let block = self.spawn_block(world, self.blocks.len(), 0.0)?;
            self.blocks.push(block);
            self.next_spawn_at += interval;
            created += 1;
        }

        Ok(created)
    }

    /// Recycles the block in `slot` if it has left the world
    ///
    /// Its shape and body are removed and a fresh block is spawned into the
    /// same slot. Nothing is recycled under the fixed policy.
    pub fn check_and_recycle(&mut self, world: &mut World, slot: BlockId) -> Result<bool> {
        if matches!(self.config.policy, SpawnPolicy::Fixed { .. }) {
            return Ok(false);
        }

        let block = match self.blocks.get(slot.0) {
            Some(block) => *block,
            None => return Ok(false),
        };

        let position = world.get_body(block.body)?.get_position();
        if !self.is_out_of_bounds(position) {
            return Ok(false);
        }

        world.remove_shape(block.shape)?;
        world.remove_body(block.body)?;

        let replacement = self.spawn_block(world, slot.0, 0.0)?;
        self.blocks[slot.0] = replacement;
        self.recycled_total += 1;

        Ok(true)
    }

    /// Recycles every block that has left the world, returning how many were
    pub fn recycle_out_of_bounds(&mut self, world: &mut World) -> Result<usize> {
        let slots: Vec<BlockId> = self.blocks.iter().map(|block| block.id).collect();

        let mut recycled = 0;
        for slot in slots {
            if self.check_and_recycle(world, slot)? {
                recycled += 1;
            }
        }
        Ok(recycled)
    }

    /// Whether a block at `position` counts as having left the world
    pub fn is_out_of_bounds(&self, position: Vector2) -> bool {
        if position.y > self.world_height {
            return true;
        }
        self.config.recycle_on_horizontal_exit
            && (position.x < 0.0 || position.x > self.world_width)
    }

    fn spawn_block(&mut self, world: &mut World, slot: usize, height_offset: f64) -> Result<Block> {
        let template = self.config.block;
        let x = self.rng.gen_range(self.config.padding..self.world_width - self.config.padding);
        let y = self.config.spawn_height + height_offset;

        let body = RigidBody::new(template.mass, template.moment)?
            .with_position(Vector2::new(x, y))
            .with_angle(template.angle);
        let body = world.add_body(body)?;

        let square = Polygon::square(template.half_extent)?;
        let shape = Shape::new(body, square, template.elasticity, template.friction)?
            .with_style(DrawStyle {
                line_width: 2.0,
                ..DrawStyle::default()
            });
        let shape = world.add_shape(shape)?;

        self.spawned_total += 1;

        Ok(Block {
            id: BlockId(slot),
            body,
            shape,
        })
    }
}
