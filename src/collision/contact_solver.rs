use crate::collision::contact_manifold::ContactManifold;
use crate::core::{BodyHandle, BodySet};
use crate::math::Vector2;

/// Trait for contact constraint solvers
pub trait ContactSolver {
    /// Prepares the solver for the given contacts
    fn prepare(&mut self, contacts: &mut [ContactManifold], bodies: &BodySet);

    /// Solves velocity constraints (one pass)
    fn solve_velocity(&mut self, contacts: &mut [ContactManifold], bodies: &mut BodySet);

    /// Pushes penetrating bodies apart
    fn solve_position(&mut self, contacts: &[ContactManifold], bodies: &mut BodySet);
}

/// Mass and velocity of one side of a contact, read before an impulse is applied
#[derive(Debug, Clone, Copy)]
struct BodyState {
    position: Vector2,
    velocity: Vector2,
    angular_velocity: f64,
    inv_mass: f64,
    inv_moment: f64,
}

impl BodyState {
    fn velocity_at(&self, r: Vector2) -> Vector2 {
        self.velocity + Vector2::cross_scalar(self.angular_velocity, &r)
    }
}

fn body_state(bodies: &BodySet, handle: BodyHandle) -> Option<BodyState> {
    bodies.get(handle).map(|body| BodyState {
        position: body.get_position(),
        velocity: body.get_velocity(),
        angular_velocity: body.get_angular_velocity(),
        inv_mass: body.get_inverse_mass(),
        inv_moment: body.get_inverse_moment(),
    })
}

fn effective_mass(a: &BodyState, b: &BodyState, r_a: Vector2, r_b: Vector2, axis: Vector2) -> f64 {
    let rn_a = r_a.cross(&axis);
    let rn_b = r_b.cross(&axis);
    let k = a.inv_mass + b.inv_mass + a.inv_moment * rn_a * rn_a + b.inv_moment * rn_b * rn_b;
    if k > 0.0 {
        1.0 / k
    } else {
        0.0
    }
}

/// Sequential impulse-based contact solver with accumulated impulse clamping
#[derive(Debug, Clone)]
pub struct SequentialImpulseSolver {
    /// Bias factor for the position correction (Baumgarte stabilization)
    bias_factor: f64,

    /// Penetration left alone by the position correction
    penetration_slop: f64,

    /// Velocity threshold for restitution
    restitution_threshold: f64,
}

impl SequentialImpulseSolver {
    /// Creates a new sequential impulse solver
    pub fn new(bias_factor: f64, penetration_slop: f64, restitution_threshold: f64) -> Self {
        Self {
            bias_factor,
            penetration_slop,
            restitution_threshold,
        }
    }
}

impl ContactSolver for SequentialImpulseSolver {
    fn prepare(&mut self, contacts: &mut [ContactManifold], bodies: &BodySet) {
        for manifold in contacts {
            let (a, b) = match (body_state(bodies, manifold.body_a), body_state(bodies, manifold.body_b)) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };

            let normal = manifold.normal;
            let tangent = normal.perpendicular();
            let elasticity = manifold.material.elasticity;

            for point in &mut manifold.points {
                point.r_a = point.position - a.position;
                point.r_b = point.position - b.position;
                point.normal_mass = effective_mass(&a, &b, point.r_a, point.r_b, normal);
                point.tangent_mass = effective_mass(&a, &b, point.r_a, point.r_b, tangent);
                point.normal_impulse = 0.0;
                point.tangent_impulse = 0.0;

                // Only bounce off contacts approaching faster than the threshold
                let approach = (b.velocity_at(point.r_b) - a.velocity_at(point.r_a)).dot(&normal);
                point.velocity_bias = if -approach > self.restitution_threshold {
                    -elasticity * approach
                } else {
                    0.0
                };
            }
        }
    }

    fn solve_velocity(&mut self, contacts: &mut [ContactManifold], bodies: &mut BodySet) {
        for manifold in contacts {
            let normal = manifold.normal;
            let tangent = normal.perpendicular();
            let friction = manifold.material.friction;

            for point in &mut manifold.points {
                // Friction first, bounded by the normal impulse of the previous pass
                let (a, b) = match (body_state(bodies, manifold.body_a), body_state(bodies, manifold.body_b)) {
                    (Some(a), Some(b)) => (a, b),
                    _ => continue,
                };
                let dv = b.velocity_at(point.r_b) - a.velocity_at(point.r_a);
                let lambda = -dv.dot(&tangent) * point.tangent_mass;
                let max_friction = (friction * point.normal_impulse).max(0.0);
                let accumulated = (point.tangent_impulse + lambda).clamp(-max_friction, max_friction);
                let lambda = accumulated - point.tangent_impulse;
                point.tangent_impulse = accumulated;

                let impulse = tangent * lambda;
                bodies.apply_impulse(manifold.body_a, -impulse, point.r_a);
                bodies.apply_impulse(manifold.body_b, impulse, point.r_b);

                // Normal impulse, never pulling the shapes together
                let (a, b) = match (body_state(bodies, manifold.body_a), body_state(bodies, manifold.body_b)) {
                    (Some(a), Some(b)) => (a, b),
                    _ => continue,
                };
                let dv = b.velocity_at(point.r_b) - a.velocity_at(point.r_a);
                let lambda = (-dv.dot(&normal) + point.velocity_bias) * point.normal_mass;
                let accumulated = (point.normal_impulse + lambda).max(0.0);
                let lambda = accumulated - point.normal_impulse;
                point.normal_impulse = accumulated;

                let impulse = normal * lambda;
                bodies.apply_impulse(manifold.body_a, -impulse, point.r_a);
                bodies.apply_impulse(manifold.body_b, impulse, point.r_b);
            }
        }
    }

    fn solve_position(&mut self, contacts: &[ContactManifold], bodies: &mut BodySet) {
        for manifold in contacts {
            let (a, b) = match (body_state(bodies, manifold.body_a), body_state(bodies, manifold.body_b)) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };

            let inv_mass_sum = a.inv_mass + b.inv_mass;
            if inv_mass_sum <= 0.0 {
                continue;
            }

            let error = (manifold.depth - self.penetration_slop).max(0.0);
            let correction = manifold.normal * (self.bias_factor * error / inv_mass_sum);

            bodies.translate(manifold.body_a, -correction * a.inv_mass);
            bodies.translate(manifold.body_b, correction * b.inv_mass);
        }
    }
}
