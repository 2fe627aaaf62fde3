//! Ordered pipeline of physics systems
//!
//! Every system advances the shared [`World`] by one tick. Registration order
//! is execution order, so the integrator has to be added before the collision
//! system for collisions to see post-integration positions.

use super::collision::CollisionSystem;
use super::integrator::VerletIntegrator;
use super::world::World;

/// One stage of the per-tick pipeline
pub trait PhysicsSystem {
    /// Short label used in logs
    fn name(&self) -> &'static str;

    /// Advance `world` by `dt`
    fn update(&mut self, world: &mut World, dt: f64);
}

/// Systems run in registration order once per tick
pub struct SystemManager {
    systems: Vec<Box<dyn PhysicsSystem + Send + Sync>>,
}

impl SystemManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    /// Integrator followed by a collision system using the default restitution rule
    pub fn standard() -> Self {
        Self::with_defaults(CollisionSystem::default())
    }

    /// Integrator followed by the given collision system
    pub fn with_defaults(collision: CollisionSystem) -> Self {
        Self::new().with(VerletIntegrator).with(collision)
    }

    /// Add a system at the end of the pipeline
    pub fn with<T>(mut self, system: T) -> Self
    where
        T: PhysicsSystem + Send + Sync + 'static,
    {
        self.add_system(system);
        self
    }

    pub fn add_system<T>(&mut self, system: T)
    where
        T: PhysicsSystem + Send + Sync + 'static,
    {
        log::debug!("registered system #{} '{}'", self.systems.len(), system.name());
        self.systems.push(Box::new(system));
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Registered system names, in execution order
    pub fn names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Run every system once against `world`, then advance `world.t`
    pub fn step(&mut self, world: &mut World, dt: f64) {
        for system in self.systems.iter_mut() {
            system.update(world, dt);
        }
        world.t += dt;
    }
}

impl Default for SystemManager {
    fn default() -> Self {
        Self::new()
    }
}
