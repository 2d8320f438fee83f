//! Ready-made worlds: a block pile on a floor and a cascade of slides

use std::f64::consts::PI;

use crate::bodies::RigidBody;
use crate::core::{BlockTemplate, Simulation, SimulationConfig, SpawnConfig, SpawnPolicy, World};
use crate::math::Vector2;
use crate::shapes::{Segment, Shape};
use crate::Result;

/// Radius of every static segment
pub const SEGMENT_RADIUS: f64 = 1.0;

/// Inset of the floor from the sides and bottom of the falling-blocks world
pub const FLOOR_PADDING: f64 = 50.0;

/// Segment endpoints (local to the body) and body position of each slide
pub const SLIDES: [([[f64; 2]; 2], [f64; 2]); 4] = [
    ([[0.0, 0.0], [200.0, 200.0]], [100.0, 0.0]),
    ([[600.0, 0.0], [400.0, 200.0]], [-100.0, 50.0]),
    ([[0.0, 0.0], [200.0, 200.0]], [100.0, 200.0]),
    ([[600.0, 0.0], [400.0, 200.0]], [-100.0, 450.0]),
];

/// Configuration of the falling-blocks scene: 150 blocks dropped onto a floor
pub fn falling_blocks_config() -> (SimulationConfig, SpawnConfig) {
    let config = SimulationConfig {
        world_width: 800.0,
        world_height: 600.0,
        ..SimulationConfig::default()
    };

    let spawn = SpawnConfig {
        policy: SpawnPolicy::Fixed { count: 150 },
        padding: FLOOR_PADDING,
        spawn_height: 0.0,
        spawn_height_jitter: 50.0,
        block: BlockTemplate {
            half_extent: 10.0,
            mass: 10.0,
            moment: 100.0,
            angle: 3.0 * PI / 2.5,
            elasticity: 0.0,
            friction: 1.0,
        },
        seed: 0,
        recycle_on_horizontal_exit: false,
    };

    (config, spawn)
}

/// Builds the falling-blocks scene
///
/// The floor spans the world width less the padding on each side and sits
/// the same padding above the bottom edge.
pub fn falling_blocks(config: SimulationConfig, spawn_config: SpawnConfig) -> Result<Simulation> {
    let mut world = World::with_config(config)?;

    let padding = spawn_config.padding;
    let width = world.get_config().world_width;
    let height = world.get_config().world_height;

    add_wall(
        &mut world,
        [Vector2::zero(), Vector2::new(width - 2.0 * padding, 0.0)],
        Vector2::new(padding, height - padding),
        0.0,
    )?;

    Simulation::with_world(world, spawn_config)
}

/// Configuration of the slides scene: small blocks trickling down four ramps
pub fn slides_config() -> (SimulationConfig, SpawnConfig) {
    let config = SimulationConfig {
        world_width: 600.0,
        world_height: 800.0,
        ..SimulationConfig::default()
    };

    let spawn = SpawnConfig {
        policy: SpawnPolicy::Throttled {
            max_population: 200,
            interval_ms: 50,
        },
        padding: 250.0,
        spawn_height: -50.0,
        spawn_height_jitter: 0.0,
        block: BlockTemplate {
            half_extent: 2.0,
            mass: 50.0,
            moment: 100.0,
            angle: 3.0 * PI / 2.0,
            elasticity: 0.5,
            friction: 1.0,
        },
        seed: 0,
        recycle_on_horizontal_exit: false,
    };

    (config, spawn)
}

/// Builds the slides scene
pub fn slides(config: SimulationConfig, spawn_config: SpawnConfig) -> Result<Simulation> {
    let mut world = World::with_config(config)?;

    for ([a, b], position) in SLIDES {
        add_wall(&mut world, [a.into(), b.into()], position.into(), 0.5)?;
    }

    Simulation::with_world(world, spawn_config)
}

/// Adds a static body at `position` carrying one segment
fn add_wall(world: &mut World, [a, b]: [Vector2; 2], position: Vector2, elasticity: f64) -> Result<()> {
    let body = world.add_static_body(RigidBody::new_static().with_position(position))?;
    let segment = Segment::new(a, b, SEGMENT_RADIUS)?;
    world.add_static_shape(Shape::new(body, segment, elasticity, 1.0)?)?;
    Ok(())
}
