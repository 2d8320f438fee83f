use std::time::Duration;

use crate::core::{ShapeHandle, SimulationConfig, SpawnConfig, Spawner, World};
use crate::math::Vector2;
use crate::shapes::{DrawStyle, ShapeKind};
use crate::error::PhysicsError;
use crate::Result;

/// What a renderer needs to draw one shape
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeView {
    /// The shape being drawn
    pub shape: ShapeHandle,

    /// Segment or polygon
    pub kind: ShapeKind,

    /// Position of the owning body
    pub position: Vector2,

    /// Orientation of the owning body in radians
    pub angle: f64,

    /// World-space outline: two endpoints for a segment, the vertices of a polygon
    pub points: Vec<Vector2>,

    /// How to draw the outline
    pub style: DrawStyle,
}

/// Drives a world frame by frame and keeps its block population alive
#[derive(Debug)]
pub struct Simulation {
    world: World,
    spawner: Spawner,
    config: SimulationConfig,
    running: bool,
    frame_count: u64,
    elapsed: Duration,
    frame_time: Duration,
}

impl Simulation {
    /// Creates a simulation with an empty world and populates it
    pub fn new(config: SimulationConfig, spawn_config: SpawnConfig) -> Result<Self> {
        let world = World::with_config(config.clone())?;
        Self::with_world(world, spawn_config)
    }

    /// Creates a simulation around a world that may already hold static geometry
    pub fn with_world(mut world: World, spawn_config: SpawnConfig) -> Result<Self> {
        let config = world.get_config().clone();
        config.validate()?;
        let frame_time = Duration::try_from_secs_f64(config.dt).map_err(|_| {
            PhysicsError::InvalidConfig(format!("dt {} does not fit a frame duration", config.dt))
        })?;

        let mut spawner = Spawner::new(spawn_config, &config)?;
        spawner.populate(&mut world)?;

        Ok(Self {
            world,
            spawner,
            config,
            running: true,
            frame_count: 0,
            elapsed: Duration::ZERO,
            frame_time,
        })
    }

    /// Advances the simulation by one frame of `dt` seconds
    ///
    /// Each substep clears forces and then steps the world. Out-of-bounds
    /// blocks are recycled after the last substep, and the spawner sees the
    /// frame's simulated time last.
    pub fn advance_frame(&mut self) -> Result<()> {
        self.world.clear_events();

        let substep_dt = self.config.substep_dt();
        for _ in 0..self.config.substeps {
            self.world.reset_forces();
            self.world.step(substep_dt)?;
        }

        self.spawner.recycle_out_of_bounds(&mut self.world)?;

        self.spawner.update(&mut self.world, self.frame_time)?;

        self.elapsed += self.frame_time;
        self.frame_count += 1;
        Ok(())
    }

    /// Advances `frames` frames, stopping early if the simulation was quit
    pub fn run_frames(&mut self, frames: u64) -> Result<()> {
        for _ in 0..frames {
            if !self.running {
                break;
            }
            self.advance_frame()?;
        }
        Ok(())
    }

    /// Snapshot of every shape for rendering, static geometry first
    pub fn render_states(&self) -> Vec<ShapeView> {
        self.world
            .static_shapes()
            .chain(self.world.shapes())
            .filter_map(|(handle, shape)| {
                let body = self.world.get_body(shape.get_body()).ok()?;
                Some(ShapeView {
                    shape: handle,
                    kind: shape.kind(),
                    position: body.get_position(),
                    angle: body.get_angle(),
                    points: shape.get_geometry().world_points(body),
                    style: shape.get_style(),
                })
            })
            .collect()
    }

    /// Stops the simulation; called by the input layer on a quit request
    pub fn handle_quit(&mut self) {
        self.running = false;
    }

    /// Whether the simulation should keep running
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of frames advanced so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulated time advanced so far
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
