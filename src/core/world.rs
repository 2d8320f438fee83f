use std::collections::{BTreeMap, BTreeSet};

use crate::bodies::{Material, RigidBody};
use crate::collision::{
    collide, BroadPhase, BroadPhaseProxy, CollisionPair, ContactManifold, ContactSolver,
    ConvexView, SequentialImpulseSolver, SweepAndPruneBroadPhase,
};
use crate::core::{
    BodyEvent, BodyHandle, BodySet, CollisionEvent, CollisionEventType, EventQueue, HandleAllocator,
    LifecycleEventType, ShapeEvent, ShapeHandle, SimulationConfig, Storage,
};
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::shapes::Shape;
use crate::Result;

/// A shape prepared for one round of collision detection
struct ShapeEntry {
    handle: ShapeHandle,
    body: BodyHandle,
    is_static: bool,
    material: Material,
    view: ConvexView,
}

/// The simulated space: owns every body and shape and advances them in time
#[derive(Debug)]
pub struct World {
    /// All bodies, split into dynamic and static
    bodies: BodySet,

    /// Shapes attached to dynamic bodies
    shapes: Storage<ShapeHandle, Shape>,

    /// Shapes attached to static bodies
    static_shapes: Storage<ShapeHandle, Shape>,

    /// Shared handle source for both shape storages
    shape_ids: HandleAllocator<ShapeHandle>,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Candidate pair search
    broad_phase: SweepAndPruneBroadPhase,

    /// Contact resolution
    solver: SequentialImpulseSolver,

    /// Contacts resolved during the last step
    contacts: Vec<ContactManifold>,

    /// Shape pairs touching after the last step
    active_pairs: BTreeSet<CollisionPair>,

    /// Queue of physics events
    events: EventQueue,

    /// The total elapsed simulation time
    time: f64,
}

impl World {
    /// Creates a new physics world with default settings
    pub fn new() -> Self {
        Self::build(SimulationConfig::default())
    }

    /// Creates a new physics world with the given configuration
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimulationConfig) -> Self {
        let solver = SequentialImpulseSolver::new(
            config.bias_factor,
            config.penetration_slop,
            config.restitution_velocity_threshold,
        );

        Self {
            bodies: BodySet::new(),
            shapes: Storage::new(),
            static_shapes: Storage::new(),
            shape_ids: HandleAllocator::new(),
            config,
            broad_phase: SweepAndPruneBroadPhase::new(),
            solver,
            contacts: Vec::new(),
            active_pairs: BTreeSet::new(),
            events: EventQueue::new(),
            time: 0.0,
        }
    }

    /// Returns the current simulation time
    pub fn get_time(&self) -> f64 {
        self.time
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Gets the current gravity
    pub fn gravity(&self) -> Vector2 {
        self.config.gravity
    }

    /// Sets the gravity for the simulation
    pub fn set_gravity(&mut self, gravity: Vector2) {
        self.config.gravity = gravity;
    }

    /// Registers a static body; it takes part in collisions but is never integrated
    pub fn add_static_body(&mut self, body: RigidBody) -> Result<BodyHandle> {
        if !body.is_static() {
            return Err(PhysicsError::InvalidOperation(format!(
                "body with finite mass {} cannot be added as static",
                body.get_mass()
            )));
        }
        Ok(self.insert_body(body))
    }

    /// Registers a dynamic body for integration and collision
    pub fn add_body(&mut self, body: RigidBody) -> Result<BodyHandle> {
        if body.is_static() {
            return Err(PhysicsError::InvalidOperation(
                "static bodies must be registered with add_static_body".to_string(),
            ));
        }
        Ok(self.insert_body(body))
    }

    fn insert_body(&mut self, body: RigidBody) -> BodyHandle {
        let is_static = body.is_static();
        let handle = self.bodies.insert(body);

        self.events.add_body_event(BodyEvent {
            event_type: LifecycleEventType::Added,
            body: handle,
            is_static,
        });

        handle
    }

    /// Registers a shape attached to a static body
    pub fn add_static_shape(&mut self, shape: Shape) -> Result<ShapeHandle> {
        let body = shape.get_body();
        self.bodies.get_body(body)?;
        if !self.bodies.is_static(body) {
            return Err(PhysicsError::InvalidOperation(format!(
                "shape body {:?} is dynamic; use add_shape",
                body
            )));
        }

        let handle = self.shape_ids.allocate();
        self.static_shapes.insert(handle, shape);
        self.push_shape_event(LifecycleEventType::Added, handle, body);
        Ok(handle)
    }

    /// Registers a shape attached to a dynamic body
    pub fn add_shape(&mut self, shape: Shape) -> Result<ShapeHandle> {
        let body = shape.get_body();
        self.bodies.get_body(body)?;
        if self.bodies.is_static(body) {
            return Err(PhysicsError::InvalidOperation(format!(
                "shape body {:?} is static; use add_static_shape",
                body
            )));
        }

        let handle = self.shape_ids.allocate();
        self.shapes.insert(handle, shape);
        self.push_shape_event(LifecycleEventType::Added, handle, body);
        Ok(handle)
    }

    /// Removes a shape from the world
    pub fn remove_shape(&mut self, handle: ShapeHandle) -> Result<Shape> {
        let shape = match self.shapes.remove(handle) {
            Some(shape) => shape,
            None => self.static_shapes.remove(handle).ok_or_else(|| {
                PhysicsError::ResourceNotFound(format!("Shape with handle {:?} not found", handle))
            })?,
        };

        self.active_pairs.retain(|pair| !pair.contains(handle));
        self.contacts.retain(|manifold| !manifold.pair.contains(handle));
        self.push_shape_event(LifecycleEventType::Removed, handle, shape.get_body());

        Ok(shape)
    }

    /// Removes a body from the world
    ///
    /// Every shape attached to the body must have been removed first.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody> {
        let attached = self.shapes_of(handle);
        if !attached.is_empty() {
            return Err(PhysicsError::InvalidOperation(format!(
                "body {:?} still has {} attached shape(s)",
                handle,
                attached.len()
            )));
        }

        let body = self.bodies.remove(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle))
        })?;

        self.events.add_body_event(BodyEvent {
            event_type: LifecycleEventType::Removed,
            body: handle,
            is_static: body.is_static(),
        });

        Ok(body)
    }

    fn push_shape_event(&mut self, event_type: LifecycleEventType, shape: ShapeHandle, body: BodyHandle) {
        self.events.add_shape_event(ShapeEvent {
            event_type,
            shape,
            body,
        });
    }

    /// Gets a reference to a body (dynamic or static) by its handle
    pub fn get_body(&self, handle: BodyHandle) -> Result<&RigidBody> {
        self.bodies.get_body(handle)
    }

    /// Gets a mutable reference to a dynamic body
    ///
    /// Static bodies are fixed once registered, so asking for one is an error.
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        if self.bodies.is_static(handle) {
            return Err(PhysicsError::InvalidOperation(format!(
                "static body {:?} cannot be modified",
                handle
            )));
        }
        self.bodies.get_body_mut(handle)
    }

    /// Gets a reference to a shape by its handle
    pub fn get_shape(&self, handle: ShapeHandle) -> Result<&Shape> {
        self.shapes
            .get(handle)
            .or_else(|| self.static_shapes.get(handle))
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Shape with handle {:?} not found", handle)))
    }

    /// Returns the handles of every shape attached to `body`
    pub fn shapes_of(&self, body: BodyHandle) -> Vec<ShapeHandle> {
        self.shapes
            .iter()
            .chain(self.static_shapes.iter())
            .filter(|(_, shape)| shape.get_body() == body)
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Iterates over the dynamic bodies in handle order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.dynamic().iter()
    }

    /// Iterates over the static bodies in handle order
    pub fn static_bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.statics().iter()
    }

    /// Iterates over the shapes attached to dynamic bodies
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeHandle, &Shape)> {
        self.shapes.iter()
    }

    /// Iterates over the shapes attached to static bodies
    pub fn static_shapes(&self) -> impl Iterator<Item = (ShapeHandle, &Shape)> {
        self.static_shapes.iter()
    }

    /// Returns the number of dynamic bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.dynamic().len()
    }

    /// Returns the number of static bodies in the world
    pub fn static_body_count(&self) -> usize {
        self.bodies.statics().len()
    }

    /// Returns the number of shapes attached to dynamic bodies
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Returns the number of shapes attached to static bodies
    pub fn static_shape_count(&self) -> usize {
        self.static_shapes.len()
    }

    /// Returns the contacts resolved during the last step
    pub fn contacts(&self) -> &[ContactManifold] {
        &self.contacts
    }

    /// Returns a reference to the event queue
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns a mutable reference to the event queue
    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Takes every queued event, leaving the queue empty
    pub fn drain_events(&mut self) -> EventQueue {
        std::mem::take(&mut self.events)
    }

    /// Discards all queued events
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Clears the accumulated force and torque of every dynamic body
    pub fn reset_forces(&mut self) {
        for (_, body) in self.bodies.dynamic_mut().iter_mut() {
            body.reset_forces();
        }
    }

    /// Advances the world by `dt` seconds
    ///
    /// The order is fixed: apply gravity, integrate velocities, integrate
    /// positions, resolve collisions. Forces are not cleared here; call
    /// [`World::reset_forces`] before each step.
    pub fn step(&mut self, dt: f64) -> Result<()> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "time step must be positive and finite, got {}",
                dt
            )));
        }

        let gravity = self.config.gravity;
        let dynamic = self.bodies.dynamic_mut();

        for (_, body) in dynamic.iter_mut() {
            if body.is_affected_by_gravity() {
                let mass = body.get_mass();
                body.apply_force(gravity * mass);
            }
        }

        for (_, body) in dynamic.iter_mut() {
            body.integrate_forces(dt);
        }

        for (_, body) in dynamic.iter_mut() {
            body.integrate_velocity(dt);
        }

        self.resolve_collisions();

        if let Some((handle, _)) = self.bodies.dynamic().iter().find(|(_, body)| !body.has_finite_state()) {
            return Err(PhysicsError::SimulationError(format!(
                "body {:?} reached a non-finite state",
                handle
            )));
        }

        self.time += dt;
        Ok(())
    }

    /// Transforms every shape into world space, ordered by shape handle
    fn collect_shape_entries(&self) -> Vec<ShapeEntry> {
        let mut entries: Vec<ShapeEntry> = self.shapes
            .iter()
            .map(|(handle, shape)| (handle, shape, false))
            .chain(self.static_shapes.iter().map(|(handle, shape)| (handle, shape, true)))
            .filter_map(|(handle, shape, is_static)| {
                let body = self.bodies.get(shape.get_body())?;
                Some(ShapeEntry {
                    handle,
                    body: shape.get_body(),
                    is_static,
                    material: *shape.get_material(),
                    view: ConvexView::new(shape.get_geometry(), body),
                })
            })
            .collect();

        entries.sort_by_key(|entry| entry.handle);
        entries
    }

    fn resolve_collisions(&mut self) {
        let entries = self.collect_shape_entries();

        let proxies: Vec<BroadPhaseProxy> = entries
            .iter()
            .map(|entry| BroadPhaseProxy {
                shape: entry.handle,
                body: entry.body,
                aabb: entry.view.bounds(),
                is_static: entry.is_static,
            })
            .collect();

        let mut manifolds = Vec::new();
        for (i, j) in self.broad_phase.find_pairs(&proxies) {
            let (a, b) = (&entries[i], &entries[j]);
            if let Some(contact) = collide(&a.view, &b.view) {
                manifolds.push(ContactManifold::new(
                    CollisionPair::new(a.handle, b.handle),
                    a.body,
                    b.body,
                    contact,
                    a.material.combine(&b.material),
                ));
            }
        }

        self.solver.prepare(&mut manifolds, &self.bodies);
        for _ in 0..self.config.velocity_iterations {
            self.solver.solve_velocity(&mut manifolds, &mut self.bodies);
        }
        self.solver.solve_position(&manifolds, &mut self.bodies);

        self.update_contact_events(&manifolds);
        self.contacts = manifolds;
    }

    fn update_contact_events(&mut self, manifolds: &[ContactManifold]) {
        let current: BTreeMap<CollisionPair, Vector2> = manifolds
            .iter()
            .map(|manifold| (manifold.pair, manifold.normal))
            .collect();

        for (pair, normal) in &current {
            if !self.active_pairs.contains(pair) {
                self.events.add_collision_event(CollisionEvent {
                    event_type: CollisionEventType::Begin,
                    shape_a: pair.shape_a,
                    shape_b: pair.shape_b,
                    normal: *normal,
                });
            }
        }

        for pair in &self.active_pairs {
            if !current.contains_key(pair) {
                self.events.add_collision_event(CollisionEvent {
                    event_type: CollisionEventType::End,
                    shape_a: pair.shape_a,
                    shape_b: pair.shape_b,
                    normal: Vector2::zero(),
                });
            }
        }

        self.active_pairs = current.into_keys().collect();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
