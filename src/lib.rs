pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::vector::{vec2, NVec2};
pub use simulation::states::Body;
pub use simulation::grid::{Bounds, Grid, GridInfo};
pub use simulation::world::{Snapshot, World};
pub use simulation::integrator::{verlet_integrator, VerletIntegrator};
pub use simulation::collision::{CollisionStats, CollisionSystem, Contact};
pub use simulation::systems::{PhysicsSystem, SystemManager};
pub use simulation::timestep::FixedTimestep;
pub use simulation::engine::{Engine, RestitutionRule};
pub use simulation::scenario::Simulation;

pub use configuration::config::{BodyConfig, ConfigError, EngineConfig, ParametersConfig, ScenarioConfig, WorldConfig};

pub use benchmark::benchmark::{bench_broad_phase, bench_step_curve};
