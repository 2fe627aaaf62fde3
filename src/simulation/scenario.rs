//! Build fully-initialized simulations from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Simulation` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - world state (`World` with bodies at t = 0, Verlet history reconciled)
//! - the system pipeline (`SystemManager`: integrator, then collisions)
//! - the fixed-timestep driver (`FixedTimestep`)

use crate::configuration::config::{vec2_from, BodyConfig, ConfigError, ScenarioConfig};
use crate::simulation::collision::CollisionSystem;
use crate::simulation::engine::Engine;
use crate::simulation::grid::Bounds;
use crate::simulation::params::Parameters;
use crate::simulation::states::Body;
use crate::simulation::systems::SystemManager;
use crate::simulation::timestep::FixedTimestep;
use crate::simulation::vector::NVec2;
use crate::simulation::world::World;

pub struct Simulation {
    pub engine: Engine,
    pub parameters: Parameters,
    pub world: World,
    pub systems: SystemManager,
    pub timestep: FixedTimestep,
}

impl Simulation {
    /// Bundle an existing world with the default pipeline
    pub fn new(world: World, engine: Engine, parameters: Parameters) -> Self {
        let systems = SystemManager::with_defaults(CollisionSystem::new(engine.restitution_rule));
        let timestep = FixedTimestep::new(world.fixed_dt, engine.max_steps_per_frame);
        Self {
            engine,
            parameters,
            world,
            systems,
            timestep,
        }
    }

    pub fn build(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Bodies: map `BodyConfig` -> runtime `Body`
        let bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| body_from_config(i, bc))
            .collect::<Result<Vec<_>, _>>()?;

        // Parameters (runtime) from ParametersConfig
        let [gx, gy] = vec2_from("parameters.gravity", &cfg.parameters.gravity)?;
        let parameters = Parameters {
            h0: cfg.parameters.h0,
            t_end: cfg.parameters.t_end,
            gravity: NVec2::new(gx, gy),
        };

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            restitution_rule: cfg.engine.restitution_rule,
            max_steps_per_frame: cfg.engine.max_steps_per_frame,
        };

        let w = &cfg.world;
        let bounds = Bounds::new(w.min_x, w.max_x, w.min_y, w.max_y);
        let world = World::new(bodies, parameters.gravity, parameters.h0, bounds, w.cell_size);

        Ok(Self::new(world, engine, parameters))
    }

    /// Advance exactly one fixed tick
    pub fn step(&mut self) {
        let dt = self.world.fixed_dt;
        self.systems.step(&mut self.world, dt);
    }

    /// Feed one rendered frame's wall-clock time; returns the ticks run
    pub fn advance(&mut self, frame_time: f64) -> usize {
        let steps = self.timestep.advance(frame_time);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    pub fn is_finished(&self) -> bool {
        self.world.t >= self.parameters.t_end
    }
}

fn body_from_config(index: usize, bc: &BodyConfig) -> Result<Body, ConfigError> {
    let [x, y] = vec2_from(&format!("bodies[{index}].x"), &bc.x)?;
    let [vx, vy] = vec2_from(&format!("bodies[{index}].v"), &bc.v)?;
    Ok(Body::new(NVec2::new(x, y), NVec2::new(vx, vy), bc.m, bc.radius)
        .with_restitution(bc.restitution)
        .with_damping(bc.damping)
        .with_friction(bc.friction))
}
