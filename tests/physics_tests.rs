use phys2d::{
    World, RigidBody, RigidBodyType, Material, Shape, ShapeGeometry, ShapeKind, Segment, Polygon, SimulationConfig,
    collision::{intersect, BroadPhase, BroadPhaseProxy, BruteForceBroadPhase, SweepAndPruneBroadPhase},
    core::{CollisionEventType, LifecycleEventType},
    error::PhysicsError,
    math::Vector2,
};
use approx::assert_relative_eq;

const DT: f64 = 1.0 / 60.0;
const SUBSTEPS: usize = 10;

/// Advances the world by one frame split into substeps
fn step_frame(world: &mut World) {
    for _ in 0..SUBSTEPS {
        world.reset_forces();
        world.step(DT / SUBSTEPS as f64).unwrap();
    }
}

/// Adds a static floor segment across the world at `y`, with its radius of 1
fn add_floor(world: &mut World, y: f64) -> phys2d::ShapeHandle {
    let body = world
        .add_static_body(RigidBody::new_static().with_position(Vector2::new(50.0, y)))
        .unwrap();
    let segment = Segment::new(Vector2::zero(), Vector2::new(700.0, 0.0), 1.0).unwrap();
    world.add_static_shape(Shape::new(body, segment, 0.0, 1.0).unwrap()).unwrap()
}

/// Adds a square block centred at `position`
fn add_block(world: &mut World, position: Vector2, half_extent: f64) -> (phys2d::BodyHandle, phys2d::ShapeHandle) {
    let body = world
        .add_body(RigidBody::new(10.0, 100.0).unwrap().with_position(position))
        .unwrap();
    let square = Polygon::square(half_extent).unwrap();
    let shape = world.add_shape(Shape::new(body, square, 0.0, 1.0).unwrap()).unwrap();
    (body, shape)
}

#[test]
fn test_rigid_body_creation() {
    let body = RigidBody::new(10.0, 100.0).unwrap();

    assert_eq!(body.get_body_type(), RigidBodyType::Dynamic);
    assert!(body.get_velocity().is_zero());
    assert_relative_eq!(body.get_inverse_mass(), 0.1);
    assert_relative_eq!(body.get_inverse_moment(), 0.01);
    assert!(body.is_affected_by_gravity());

    let wall = RigidBody::new_static();
    assert!(wall.is_static());
    assert_relative_eq!(wall.get_inverse_mass(), 0.0);
    assert_relative_eq!(wall.get_inverse_moment(), 0.0);

    // Infinite mass and moment is the static form of `new`
    assert!(RigidBody::new(f64::INFINITY, f64::INFINITY).unwrap().is_static());
}

#[test]
fn test_invalid_body_parameters() {
    assert!(matches!(RigidBody::new(0.0, 100.0), Err(PhysicsError::InvalidParameter(_))));
    assert!(matches!(RigidBody::new(-1.0, 100.0), Err(PhysicsError::InvalidParameter(_))));
    assert!(matches!(RigidBody::new(10.0, 0.0), Err(PhysicsError::InvalidParameter(_))));
    assert!(RigidBody::new(f64::NAN, 1.0).is_err());
    assert!(RigidBody::new(f64::INFINITY, 100.0).is_err());

    let body = World::new().add_body(RigidBody::new(1.0, 1.0).unwrap()).unwrap();
    assert!(Shape::new(body, Polygon::square(1.0).unwrap(), 1.5, 1.0).is_err());
    assert!(Shape::new(body, Polygon::square(1.0).unwrap(), 0.5, -1.0).is_err());
}

#[test]
fn test_invalid_config() {
    let zero_substeps = SimulationConfig { substeps: 0, ..SimulationConfig::default() };
    assert!(matches!(World::with_config(zero_substeps), Err(PhysicsError::InvalidConfig(_))));

    let zero_dt = SimulationConfig { dt: 0.0, ..SimulationConfig::default() };
    assert!(World::with_config(zero_dt).is_err());

    let negative_dt = SimulationConfig { dt: -1.0 / 60.0, ..SimulationConfig::default() };
    assert!(World::with_config(negative_dt).is_err());

    let mut world = World::new();
    assert!(matches!(world.step(0.0), Err(PhysicsError::InvalidParameter(_))));
    assert!(world.step(f64::NAN).is_err());
}

#[test]
fn test_free_motion_without_gravity() {
    let mut world = World::new();
    world.set_gravity(Vector2::zero());

    let body = world.add_body(RigidBody::new(10.0, 100.0).unwrap()).unwrap();
    world.add_shape(Shape::new(body, Polygon::square(5.0).unwrap(), 0.0, 1.0).unwrap()).unwrap();
    world.get_body_mut(body).unwrap().set_velocity(Vector2::new(3.0, -4.0));

    for _ in 0..60 {
        step_frame(&mut world);
    }

    // One second of motion: p += v * t
    let body = world.get_body(body).unwrap();
    assert_relative_eq!(body.get_velocity(), Vector2::new(3.0, -4.0), epsilon = 1e-9);
    assert_relative_eq!(body.get_position(), Vector2::new(3.0, -4.0), epsilon = 1e-9);
    assert_relative_eq!(world.get_time(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_gravity_integration() {
    let mut world = World::new();
    let (body, _) = add_block(&mut world, Vector2::zero(), 10.0);

    for _ in 0..60 {
        step_frame(&mut world);
    }

    // Semi-implicit Euler converges on v = g t and y = g t^2 / 2
    let body = world.get_body(body).unwrap();
    assert_relative_eq!(body.get_velocity().y, 10.0, epsilon = 1e-9);
    assert_relative_eq!(body.get_position().y, 5.0, epsilon = 0.01);
    assert_relative_eq!(body.get_velocity().x, 0.0);
}

#[test]
fn test_forces_accumulate_until_reset() {
    let mut world = World::new();
    world.set_gravity(Vector2::zero());
    let (body, _) = add_block(&mut world, Vector2::zero(), 1.0);

    world.get_body_mut(body).unwrap().apply_force(Vector2::new(10.0, 0.0));
    world.step(0.1).unwrap();
    world.step(0.1).unwrap();

    // Force of 10 on mass 10 for 0.2 s
    assert_relative_eq!(world.get_body(body).unwrap().get_velocity().x, 0.2, epsilon = 1e-12);

    world.reset_forces();
    world.step(0.1).unwrap();
    assert_relative_eq!(world.get_body(body).unwrap().get_velocity().x, 0.2, epsilon = 1e-12);
}

#[test]
fn test_static_bodies_never_move() {
    let mut world = World::new();
    let floor = add_floor(&mut world, 550.0);
    let floor_body = world.get_shape(floor).unwrap().get_body();
    let before = world.get_body(floor_body).unwrap().clone();

    for x in 0..10 {
        add_block(&mut world, Vector2::new(100.0 + 50.0 * x as f64, 520.0), 10.0);
    }

    for _ in 0..120 {
        step_frame(&mut world);
    }

    assert_eq!(world.get_body(floor_body).unwrap(), &before);

    // Static bodies cannot be handed out for mutation
    assert!(matches!(world.get_body_mut(floor_body), Err(PhysicsError::InvalidOperation(_))));
}

#[test]
fn test_block_settles_on_floor() {
    let mut world = World::new();
    add_floor(&mut world, 550.0);
    let (body, _) = add_block(&mut world, Vector2::new(400.0, 530.0), 10.0);

    for _ in 0..300 {
        step_frame(&mut world);
    }

    // Rests on the floor's top surface: 550 - radius - half extent
    let body = world.get_body(body).unwrap();
    assert!(body.get_velocity().y.abs() < 0.5, "velocity {}", body.get_velocity());
    assert_relative_eq!(body.get_position().y, 539.0, epsilon = 0.5);
    assert_relative_eq!(body.get_position().x, 400.0, epsilon = 0.5);
    assert!(!world.contacts().is_empty());
}

#[test]
fn test_falling_block_stays_above_floor() {
    let mut world = World::new();
    add_floor(&mut world, 550.0);
    let (body, _) = add_block(&mut world, Vector2::new(400.0, 0.0), 10.0);

    // Two seconds, then long enough to land
    for frame in 0..(60 * 15) {
        step_frame(&mut world);
        let y = world.get_body(body).unwrap().get_position().y;
        assert!(y <= 550.0, "block fell through the floor at frame {}: y = {}", frame, y);
    }
}

#[test]
fn test_bouncy_contact_reverses_velocity() {
    let mut world = World::new();
    world.set_gravity(Vector2::zero());

    let floor_body = world
        .add_static_body(RigidBody::new_static().with_position(Vector2::new(0.0, 100.0)))
        .unwrap();
    let segment = Segment::new(Vector2::new(-100.0, 0.0), Vector2::new(100.0, 0.0), 1.0).unwrap();
    world.add_static_shape(Shape::new(floor_body, segment, 1.0, 0.0).unwrap()).unwrap();

    let body = world
        .add_body(RigidBody::new(10.0, 100.0).unwrap().with_position(Vector2::new(0.0, 80.0)))
        .unwrap();
    world.add_shape(Shape::new(body, Polygon::square(10.0).unwrap(), 1.0, 0.0).unwrap()).unwrap();
    world.get_body_mut(body).unwrap().set_velocity(Vector2::new(0.0, 50.0));

    for _ in 0..30 {
        step_frame(&mut world);
    }

    // Elastic against elastic keeps the speed, now heading up
    let velocity = world.get_body(body).unwrap().get_velocity();
    assert!(velocity.y < -40.0, "velocity {}", velocity);
}

#[test]
fn test_material_combining() {
    let a = Material::new(0.25, 1.0);
    let b = Material::new(1.0, 0.25);
    let combined = a.combine(&b);

    assert_relative_eq!(combined.elasticity, 0.5);
    assert_relative_eq!(combined.friction, 0.5);
    assert_relative_eq!(Material::inelastic().combine(&b).elasticity, 0.0);
}

#[test]
fn test_polygon_segment_intersection() {
    let floor_body = RigidBody::new_static().with_position(Vector2::new(0.0, 100.0));
    let floor: ShapeGeometry = Segment::new(Vector2::new(-50.0, 0.0), Vector2::new(50.0, 0.0), 1.0).unwrap().into();

    let block: ShapeGeometry = Polygon::square(10.0).unwrap().into();
    let resting = RigidBody::new(1.0, 1.0).unwrap().with_position(Vector2::new(0.0, 90.5));

    let contact = intersect(&floor, &floor_body, &block, &resting).unwrap();
    assert_relative_eq!(contact.normal, Vector2::new(0.0, -1.0), epsilon = 1e-12);
    assert_relative_eq!(contact.depth, 1.5, epsilon = 1e-9);
    assert_eq!(contact.points.len(), 2);
    for point in &contact.points {
        assert_relative_eq!(point.y, 100.5, epsilon = 1e-9);
    }

    let above = RigidBody::new(1.0, 1.0).unwrap().with_position(Vector2::new(0.0, 80.0));
    assert!(intersect(&floor, &floor_body, &block, &above).is_none());

    // Past the end of the segment
    let beside = RigidBody::new(1.0, 1.0).unwrap().with_position(Vector2::new(70.0, 95.0));
    assert!(intersect(&floor, &floor_body, &block, &beside).is_none());

    // Two segments never collide
    assert!(intersect(&floor, &floor_body, &floor, &floor_body).is_none());
}

#[test]
fn test_polygon_polygon_intersection() {
    let square: ShapeGeometry = Polygon::square(1.0).unwrap().into();
    let a = RigidBody::new(1.0, 1.0).unwrap();
    let b = RigidBody::new(1.0, 1.0).unwrap().with_position(Vector2::new(1.5, 0.2));

    let contact = intersect(&square, &a, &square, &b).unwrap();
    assert_relative_eq!(contact.normal, Vector2::new(1.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(contact.depth, 0.5, epsilon = 1e-12);
    assert!(!contact.points.is_empty());

    // Swapping the shapes flips the normal
    let flipped = intersect(&square, &b, &square, &a).unwrap();
    assert_relative_eq!(flipped.normal, Vector2::new(-1.0, 0.0), epsilon = 1e-12);

    let far = RigidBody::new(1.0, 1.0).unwrap().with_position(Vector2::new(2.5, 0.0));
    assert!(intersect(&square, &a, &square, &far).is_none());
}

#[test]
fn test_broad_phases_agree() {
    let mut world = World::new();
    add_floor(&mut world, 550.0);
    for i in 0..40 {
        let x = 60.0 + 17.0 * i as f64;
        let y = 500.0 + (i % 5) as f64 * 9.0;
        add_block(&mut world, Vector2::new(x, y), 10.0);
    }

    let proxies: Vec<BroadPhaseProxy> = world
        .static_shapes()
        .map(|entry| (entry, true))
        .chain(world.shapes().map(|entry| (entry, false)))
        .map(|((handle, shape), is_static)| {
            let body = world.get_body(shape.get_body()).unwrap();
            BroadPhaseProxy {
                shape: handle,
                body: shape.get_body(),
                aabb: shape.get_geometry().world_bounds(body),
                is_static,
            }
        })
        .collect();

    let brute = BruteForceBroadPhase::new().find_pairs(&proxies);
    let sweep = SweepAndPruneBroadPhase::new().find_pairs(&proxies);

    assert!(!brute.is_empty());
    assert_eq!(brute, sweep);
}

#[test]
fn test_shape_registration_rules() {
    let mut world = World::new();

    // Bodies must be registered through the entry point matching their type
    assert!(world.add_body(RigidBody::new_static()).is_err());
    assert!(world.add_static_body(RigidBody::new(1.0, 1.0).unwrap()).is_err());

    let wall = world.add_static_body(RigidBody::new_static()).unwrap();
    let block = world.add_body(RigidBody::new(1.0, 1.0).unwrap()).unwrap();
    let segment = Segment::new(Vector2::zero(), Vector2::unit_x(), 1.0).unwrap();

    assert!(world.add_shape(Shape::new(wall, segment, 0.0, 1.0).unwrap()).is_err());
    assert!(world.add_static_shape(Shape::new(block, segment, 0.0, 1.0).unwrap()).is_err());

    let wall_shape = world.add_static_shape(Shape::new(wall, segment, 0.0, 1.0).unwrap()).unwrap();
    let block_shape = world
        .add_shape(Shape::new(block, Polygon::square(1.0).unwrap(), 0.0, 1.0).unwrap())
        .unwrap();

    assert_ne!(wall_shape, block_shape);
    assert_eq!(world.static_body_count(), 1);
    assert_eq!(world.body_count(), 1);
    assert_eq!(world.static_shape_count(), 1);
    assert_eq!(world.shape_count(), 1);
    assert_eq!(world.get_shape(wall_shape).unwrap().kind(), ShapeKind::Segment);
    assert_eq!(world.get_shape(block_shape).unwrap().kind(), ShapeKind::Polygon);
}

#[test]
fn test_removal_errors() {
    let mut world = World::new();
    let (body, shape) = add_block(&mut world, Vector2::zero(), 1.0);

    // A body cannot go while a shape still points at it
    assert!(matches!(world.remove_body(body), Err(PhysicsError::InvalidOperation(_))));

    world.remove_shape(shape).unwrap();
    assert!(matches!(world.remove_shape(shape), Err(PhysicsError::ResourceNotFound(_))));

    world.remove_body(body).unwrap();
    assert!(matches!(world.remove_body(body), Err(PhysicsError::ResourceNotFound(_))));
    assert!(world.get_body(body).is_err());
    assert_eq!(world.body_count(), 0);
    assert_eq!(world.shape_count(), 0);
}

#[test]
fn test_lifecycle_and_contact_events() {
    let mut world = World::new();
    let floor = add_floor(&mut world, 550.0);
    let (body, block) = add_block(&mut world, Vector2::new(400.0, 539.5), 10.0);

    assert_eq!(world.events().get_body_events_of_type(LifecycleEventType::Added).len(), 2);
    assert_eq!(world.events().shape_events().count(), 2);
    world.clear_events();

    step_frame(&mut world);
    let begins = world.events().get_collision_events_of_type(CollisionEventType::Begin);
    assert_eq!(begins.len(), 1);
    assert_eq!((begins[0].shape_a, begins[0].shape_b), (floor, block));
    assert_relative_eq!(begins[0].normal, Vector2::new(0.0, -1.0), epsilon = 1e-9);

    // Lift the block clear; the contact ends on the next step
    world.get_body_mut(body).unwrap().set_position(Vector2::new(400.0, 100.0));
    world.get_body_mut(body).unwrap().set_velocity(Vector2::zero());
    let drained = world.drain_events();
    assert_eq!(drained.get_collision_events_for_shape(block).len(), 1);
    assert!(world.events().is_empty());

    step_frame(&mut world);
    assert_eq!(world.events().get_collision_events_of_type(CollisionEventType::End).len(), 1);
}
