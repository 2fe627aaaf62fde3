//! Core state type for one simulated particle
//!
//! A `Body` is a point-mass circle integrated with position Verlet. Velocity is
//! stored explicitly but the integrator only trusts `position` and
//! `previous_position`, so any write to velocity or position from outside the
//! integrator has to go through [`Body::reconcile`].

use super::vector::NVec2;

/// Smallest radius a body can be edited down to
pub const MIN_RADIUS: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: NVec2,          // current position
    pub previous_position: NVec2, // verlet history term
    pub velocity: NVec2,          // authoritative right after integration
    pub acceleration: NVec2,      // external force accumulator, cleared each tick
    pub mass: f64,
    pub inverse_mass: f64, // 0 = static
    pub radius: f64,
    pub restitution: f64, // [0, 1]
    pub damping: f64,     // linear drag
    pub friction: f64,    // speed-proportional drag
}

impl Body {
    /// Create a body at `position` moving with `velocity`
    ///
    /// `previous_position` starts equal to `position`; the owning world
    /// reconciles it against the initial velocity when the body is inserted.
    /// A `mass <= 0` makes the body static.
    pub fn new(position: NVec2, velocity: NVec2, mass: f64, radius: f64) -> Self {
        let mut body = Self {
            position,
            previous_position: position,
            velocity,
            acceleration: NVec2::zeros(),
            mass,
            inverse_mass: 0.0,
            radius,
            restitution: 1.0,
            damping: 0.0,
            friction: 0.0,
        };
        body.sanitize();
        body
    }

    /// Immovable body (inverse mass 0)
    pub fn new_static(position: NVec2, radius: f64) -> Self {
        Self::new(position, NVec2::zeros(), 0.0, radius)
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping.max(0.0);
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction.max(0.0);
        self
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    /// Restore the Verlet invariant `previous_position = position - velocity * dt`
    ///
    /// Must run after every external write to `velocity` or `position`,
    /// otherwise the next integration step silently brings back the old
    /// implicit velocity. Non-positive `dt` leaves the history untouched.
    pub fn reconcile(&mut self, dt: f64) {
        if dt > 0.0 {
            self.previous_position = self.position - self.velocity * dt;
        }
    }

    /// Recompute derived values and clamp edited fields into their valid ranges
    ///
    /// Static bodies lose any stored velocity and pending acceleration.
    pub fn sanitize(&mut self) {
        self.mass = self.mass.max(0.0);
        self.inverse_mass = if self.mass > 0.0 { 1.0 / self.mass } else { 0.0 };
        if self.is_static() {
            self.velocity = NVec2::zeros();
            self.acceleration = NVec2::zeros();
        }
        self.radius = self.radius.max(MIN_RADIUS);
        self.restitution = self.restitution.clamp(0.0, 1.0);
        self.damping = self.damping.max(0.0);
        self.friction = self.friction.max(0.0);
    }

    /// Accumulate a force for the next tick. Ignored by static bodies
    pub fn apply_force(&mut self, force: NVec2) {
        self.acceleration += force * self.inverse_mass;
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }
}
