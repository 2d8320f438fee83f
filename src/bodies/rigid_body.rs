use crate::bodies::{body_flags::BodyFlags, RigidBodyType};
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::Result;

/// A rigid body for physics simulation
///
/// Bodies carry state only; collision geometry lives in [`crate::shapes::Shape`]
/// values that refer back to a body through its handle.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// Position of the centre of mass in world space
    position: Vector2,

    /// The body's linear velocity
    velocity: Vector2,

    /// Orientation in radians
    angle: f64,

    /// The body's angular velocity in radians per second
    angular_velocity: f64,

    /// The body's mass (infinite for static bodies)
    mass: f64,

    /// Inverse of the body's mass (zero for static bodies)
    inv_mass: f64,

    /// Moment of inertia about the centre of mass
    moment: f64,

    /// Inverse moment of inertia (zero when the moment is infinite)
    inv_moment: f64,

    /// Force accumulated for the current substep
    force: Vector2,

    /// Torque accumulated for the current substep
    torque: f64,

    /// The body's type (dynamic or static)
    body_type: RigidBodyType,

    /// The body's flags
    flags: BodyFlags,
}

impl RigidBody {
    /// Creates a body with the given mass and moment of inertia
    ///
    /// A mass of `f64::INFINITY` creates a static body, which also requires an
    /// infinite moment. Finite masses and moments must be strictly positive.
    pub fn new(mass: f64, moment: f64) -> Result<Self> {
        if mass.is_nan() || mass <= 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "body mass must be positive, got {}",
                mass
            )));
        }
        if moment.is_nan() || moment <= 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "body moment of inertia must be positive, got {}",
                moment
            )));
        }

        let body_type = RigidBodyType::from_mass(mass);
        if body_type == RigidBodyType::Static && moment.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "a body with infinite mass needs an infinite moment, got {}",
                moment
            )));
        }

        let flags = match body_type {
            RigidBodyType::Dynamic => BodyFlags::AFFECTED_BY_GRAVITY,
            RigidBodyType::Static => BodyFlags::FIXED_ROTATION,
        };

        Ok(Self {
            position: Vector2::zero(),
            velocity: Vector2::zero(),
            angle: 0.0,
            angular_velocity: 0.0,
            mass,
            inv_mass: 1.0 / mass,
            moment,
            inv_moment: 1.0 / moment,
            force: Vector2::zero(),
            torque: 0.0,
            body_type,
            flags,
        })
    }

    /// Creates a static body with infinite mass and moment
    pub fn new_static() -> Self {
        Self {
            position: Vector2::zero(),
            velocity: Vector2::zero(),
            angle: 0.0,
            angular_velocity: 0.0,
            mass: f64::INFINITY,
            inv_mass: 0.0,
            moment: f64::INFINITY,
            inv_moment: 0.0,
            force: Vector2::zero(),
            torque: 0.0,
            body_type: RigidBodyType::Static,
            flags: BodyFlags::FIXED_ROTATION,
        }
    }

    /// Builder-style position setter
    pub fn with_position(mut self, position: Vector2) -> Self {
        self.position = position;
        self
    }

    /// Builder-style angle setter
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Returns the body's position
    pub fn get_position(&self) -> Vector2 {
        self.position
    }

    /// Sets the body's position
    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    /// Returns the body's linear velocity
    pub fn get_velocity(&self) -> Vector2 {
        self.velocity
    }

    /// Sets the body's linear velocity (ignored for static bodies)
    pub fn set_velocity(&mut self, velocity: Vector2) {
        if self.is_dynamic() {
            self.velocity = velocity;
        }
    }

    /// Returns the body's orientation in radians
    pub fn get_angle(&self) -> f64 {
        self.angle
    }

    /// Sets the body's orientation in radians
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    /// Returns the body's angular velocity
    pub fn get_angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Sets the body's angular velocity (ignored for static bodies)
    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        if self.is_dynamic() {
            self.angular_velocity = angular_velocity;
        }
    }

    /// Returns the body's mass
    pub fn get_mass(&self) -> f64 {
        self.mass
    }

    /// Returns the body's inverse mass
    pub fn get_inverse_mass(&self) -> f64 {
        self.inv_mass
    }

    /// Returns the body's moment of inertia
    pub fn get_moment(&self) -> f64 {
        self.moment
    }

    /// Returns the inverse moment of inertia, zero when rotation is fixed
    pub fn get_inverse_moment(&self) -> f64 {
        if self.flags.contains(BodyFlags::FIXED_ROTATION) {
            0.0
        } else {
            self.inv_moment
        }
    }

    /// Returns the force accumulated for the current substep
    pub fn get_force(&self) -> Vector2 {
        self.force
    }

    /// Returns the torque accumulated for the current substep
    pub fn get_torque(&self) -> f64 {
        self.torque
    }

    /// Returns the body type
    pub fn get_body_type(&self) -> RigidBodyType {
        self.body_type
    }

    /// Returns true for bodies with infinite mass
    pub fn is_static(&self) -> bool {
        self.body_type == RigidBodyType::Static
    }

    /// Returns true for bodies with finite mass
    pub fn is_dynamic(&self) -> bool {
        self.body_type == RigidBodyType::Dynamic
    }

    /// Returns the body's flags
    pub fn get_flags(&self) -> BodyFlags {
        self.flags
    }

    /// Returns whether the body is affected by gravity
    pub fn is_affected_by_gravity(&self) -> bool {
        self.flags.contains(BodyFlags::AFFECTED_BY_GRAVITY)
    }

    /// Sets whether the body is affected by gravity
    pub fn set_affected_by_gravity(&mut self, affected: bool) {
        self.flags.set(BodyFlags::AFFECTED_BY_GRAVITY, affected && self.is_dynamic());
    }

    /// Returns whether the body's rotation is locked
    pub fn has_fixed_rotation(&self) -> bool {
        self.flags.contains(BodyFlags::FIXED_ROTATION)
    }

    /// Locks or unlocks the body's rotation
    pub fn set_fixed_rotation(&mut self, fixed: bool) {
        self.flags.set(BodyFlags::FIXED_ROTATION, fixed || self.is_static());
        if fixed {
            self.angular_velocity = 0.0;
        }
    }

    /// Clears the accumulated force and torque
    pub fn reset_forces(&mut self) {
        self.force = Vector2::zero();
        self.torque = 0.0;
    }

    /// Adds a force acting on the centre of mass
    pub fn apply_force(&mut self, force: Vector2) {
        if self.is_dynamic() {
            self.force += force;
        }
    }

    /// Adds a torque
    pub fn apply_torque(&mut self, torque: f64) {
        if self.is_dynamic() {
            self.torque += torque;
        }
    }

    /// Applies an impulse at offset `r` from the centre of mass
    pub fn apply_impulse(&mut self, impulse: Vector2, r: Vector2) {
        if !self.is_dynamic() {
            return;
        }

        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += self.get_inverse_moment() * r.cross(&impulse);
    }

    /// Moves the body without touching its velocity
    pub fn translate(&mut self, offset: Vector2) {
        if self.is_dynamic() {
            self.position += offset;
        }
    }

    /// Integrates accumulated forces to update velocities
    pub fn integrate_forces(&mut self, dt: f64) {
        if !self.is_dynamic() {
            return;
        }

        // a = F/m
        self.velocity += self.force * (self.inv_mass * dt);

        if !self.has_fixed_rotation() {
            self.angular_velocity += self.torque * (self.inv_moment * dt);
        }
    }

    /// Integrates velocities to update position and orientation
    pub fn integrate_velocity(&mut self, dt: f64) {
        if !self.is_dynamic() {
            return;
        }

        self.position += self.velocity * dt;

        if !self.has_fixed_rotation() {
            self.angle += self.angular_velocity * dt;
        }
    }

    /// Velocity of the body point at offset `r` from the centre of mass
    pub fn velocity_at(&self, r: Vector2) -> Vector2 {
        self.velocity + Vector2::cross_scalar(self.angular_velocity, &r)
    }

    /// Transforms a point from body space into world space
    pub fn local_to_world(&self, point: Vector2) -> Vector2 {
        self.position + point.rotate(self.angle)
    }

    /// Returns false if any part of the kinematic state is NaN or infinite
    pub fn has_finite_state(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.angle.is_finite()
            && self.angular_velocity.is_finite()
    }
}
