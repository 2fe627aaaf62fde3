//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed tick size and end time for headless runs,
//! - the world gravity vector

use super::vector::NVec2;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub h0: f64,        // fixed tick
    pub t_end: f64,     // time end
    pub gravity: NVec2, // uniform acceleration
}
