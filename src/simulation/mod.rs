pub mod vector;
pub mod states;
pub mod params;
pub mod engine;
pub mod grid;
pub mod world;
pub mod integrator;
pub mod collision;
pub mod systems;
pub mod timestep;
pub mod scenario;
