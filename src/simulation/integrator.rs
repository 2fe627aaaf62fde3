//! Fixed-step time integration for the body set
//!
//! Position (Störmer–) Verlet: velocity is never integrated directly, it is
//! implied by `position - previous_position` and re-derived after each step so
//! the collision system and observers can read it.

use super::systems::PhysicsSystem;
use super::vector::NVec2;
use super::world::World;

/// Speeds at or below this skip the friction term
pub const FRICTION_SPEED_EPS: f64 = 1e-6;

/// Advance every dynamic body in `world` by one step of `dt`
///
/// Static bodies (`inverse_mass == 0`) are skipped entirely. A non-positive
/// `dt` leaves the world untouched.
pub fn verlet_integrator(world: &mut World, dt: f64) {
    if dt <= 0.0 {
        log::trace!("verlet step skipped, dt = {dt}");
        return;
    }

    let dt2 = dt * dt;
    let inv_dt = dt.recip();
    let gravity = world.gravity;

    for b in world.bodies.iter_mut().filter(|b| !b.is_static()) {
        // gravity plus whatever forces were accumulated since the last tick
        let mut total: NVec2 = gravity + b.acceleration;

        // linear drag: a -= damping * v
        if b.damping != 0.0 {
            total -= b.velocity * b.damping;
        }

        // speed-proportional drag opposing the direction of motion
        if b.friction != 0.0 {
            let speed = b.velocity.norm();
            if speed > FRICTION_SPEED_EPS {
                let dir = b.velocity / speed;
                total -= dir * (b.friction * speed);
            }
        }

        // x_n+1 = 2 x_n - x_n-1 + a dt^2
        let next = 2.0 * b.position - b.previous_position + total * dt2;
        b.previous_position = b.position;
        b.position = next;

        // v_n+1 = (x_n+1 - x_n) / dt
        b.velocity = (b.position - b.previous_position) * inv_dt;

        b.acceleration = NVec2::zeros();
    }
}

/// Pipeline stage wrapping [`verlet_integrator`]
#[derive(Debug, Default, Clone, Copy)]
pub struct VerletIntegrator;

impl PhysicsSystem for VerletIntegrator {
    fn name(&self) -> &'static str {
        "verlet"
    }

    fn update(&mut self, world: &mut World, dt: f64) {
        verlet_integrator(world, dt);
    }
}
