use crate::core::{BodyHandle, ShapeHandle};
use crate::math::Vector2;
use std::collections::VecDeque;

/// Types of collision events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEventType {
    /// Shapes started touching during this substep
    Begin,

    /// Shapes stopped touching during this substep
    End,
}

/// A contact state change between two shapes
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    /// The type of collision event
    pub event_type: CollisionEventType,

    /// The first shape in the collision
    pub shape_a: ShapeHandle,

    /// The second shape in the collision
    pub shape_b: ShapeHandle,

    /// Contact normal pointing from `shape_a` to `shape_b` (zero for End events)
    pub normal: Vector2,
}

/// Types of body and shape lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEventType {
    /// Registered with the world
    Added,

    /// Removed from the world
    Removed,
}

/// An event related to a single body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyEvent {
    /// The type of body event
    pub event_type: LifecycleEventType,

    /// The body that the event refers to
    pub body: BodyHandle,

    /// Whether the body is static
    pub is_static: bool,
}

/// An event related to a single shape
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEvent {
    /// The type of shape event
    pub event_type: LifecycleEventType,

    /// The shape that the event refers to
    pub shape: ShapeHandle,

    /// The body the shape is attached to
    pub body: BodyHandle,
}

/// A queue of physics events
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Collision events
    collision_events: VecDeque<CollisionEvent>,

    /// Body events
    body_events: VecDeque<BodyEvent>,

    /// Shape events
    shape_events: VecDeque<ShapeEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collision event to the queue
    pub fn add_collision_event(&mut self, event: CollisionEvent) {
        self.collision_events.push_back(event);
    }

    /// Adds a body event to the queue
    pub fn add_body_event(&mut self, event: BodyEvent) {
        self.body_events.push_back(event);
    }

    /// Adds a shape event to the queue
    pub fn add_shape_event(&mut self, event: ShapeEvent) {
        self.shape_events.push_back(event);
    }

    /// Gets the next collision event from the queue
    pub fn next_collision_event(&mut self) -> Option<CollisionEvent> {
        self.collision_events.pop_front()
    }

    /// Gets the next body event from the queue
    pub fn next_body_event(&mut self) -> Option<BodyEvent> {
        self.body_events.pop_front()
    }

    /// Gets the next shape event from the queue
    pub fn next_shape_event(&mut self) -> Option<ShapeEvent> {
        self.shape_events.pop_front()
    }

    /// Iterates over the queued collision events without removing them
    pub fn collision_events(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.collision_events.iter()
    }

    /// Iterates over the queued body events without removing them
    pub fn body_events(&self) -> impl Iterator<Item = &BodyEvent> {
        self.body_events.iter()
    }

    /// Iterates over the queued shape events without removing them
    pub fn shape_events(&self) -> impl Iterator<Item = &ShapeEvent> {
        self.shape_events.iter()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.collision_events.is_empty()
            && self.body_events.is_empty()
            && self.shape_events.is_empty()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.collision_events.clear();
        self.body_events.clear();
        self.shape_events.clear();
    }

    /// Gets all collision events of a specific type
    pub fn get_collision_events_of_type(&self, event_type: CollisionEventType) -> Vec<&CollisionEvent> {
        self.collision_events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Gets all body events of a specific type
    pub fn get_body_events_of_type(&self, event_type: LifecycleEventType) -> Vec<&BodyEvent> {
        self.body_events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Gets all collision events involving a specific shape
    pub fn get_collision_events_for_shape(&self, shape: ShapeHandle) -> Vec<&CollisionEvent> {
        self.collision_events
            .iter()
            .filter(|e| e.shape_a == shape || e.shape_b == shape)
            .collect()
    }
}
