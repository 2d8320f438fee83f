use crate::bodies::RigidBody;
use crate::core::storage::{HandleAllocator, Storage};
use crate::core::BodyHandle;
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::Result;

/// The world's bodies, split into integrated (dynamic) and static bodies
///
/// Both halves share one handle allocator, so a handle is unique across them.
#[derive(Debug, Default)]
pub struct BodySet {
    dynamic: Storage<BodyHandle, RigidBody>,
    statics: Storage<BodyHandle, RigidBody>,
    ids: HandleAllocator<BodyHandle>,
}

impl BodySet {
    /// Creates an empty body set
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a body in the half matching its type
    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        let handle = self.ids.allocate();
        if body.is_static() {
            self.statics.insert(handle, body);
        } else {
            self.dynamic.insert(handle, body);
        }
        handle
    }

    /// Removes a body from whichever half holds it
    pub fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        self.dynamic.remove(handle).or_else(|| self.statics.remove(handle))
    }

    /// Gets any body by its handle
    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.dynamic.get(handle).or_else(|| self.statics.get(handle))
    }

    /// Gets any body by its handle, returning an error if not found
    pub fn get_body(&self, handle: BodyHandle) -> Result<&RigidBody> {
        self.get(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    /// Gets a mutable reference to any body, returning an error if not found
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        if self.dynamic.contains(handle) {
            self.dynamic.get_item_mut(handle, "Body")
        } else {
            self.statics.get_item_mut(handle, "Body")
        }
    }

    /// Returns whether the handle refers to a static body
    pub fn is_static(&self, handle: BodyHandle) -> bool {
        self.statics.contains(handle)
    }

    /// Returns whether the handle refers to a registered body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.dynamic.contains(handle) || self.statics.contains(handle)
    }

    /// Applies an impulse at offset `r`; static bodies are left untouched
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vector2, r: Vector2) {
        if let Some(body) = self.dynamic.get_mut(handle) {
            body.apply_impulse(impulse, r);
        }
    }

    /// Moves a dynamic body; static bodies are left untouched
    pub fn translate(&mut self, handle: BodyHandle, offset: Vector2) {
        if let Some(body) = self.dynamic.get_mut(handle) {
            body.translate(offset);
        }
    }

    /// Dynamic bodies
    pub fn dynamic(&self) -> &Storage<BodyHandle, RigidBody> {
        &self.dynamic
    }

    /// Mutable dynamic bodies
    pub fn dynamic_mut(&mut self) -> &mut Storage<BodyHandle, RigidBody> {
        &mut self.dynamic
    }

    /// Static bodies
    pub fn statics(&self) -> &Storage<BodyHandle, RigidBody> {
        &self.statics
    }
}
