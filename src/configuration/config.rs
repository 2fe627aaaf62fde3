//! Configuration types for loading sandbox scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – engine options (restitution rule, tick cap)
//! - [`ParametersConfig`] – tick size, run length and gravity
//! - [`WorldConfig`]      – world rectangle and grid cell size
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! ```yaml
//! engine:
//!   restitution_rule: "min"   # min | max | average | multiply
//!   max_steps_per_frame: 8
//!
//! parameters:
//!   h0: 0.016666666666666666  # fixed tick (1/60 s)
//!   t_end: 10.0               # headless run length
//!   gravity: [0.0, -9.8]
//!
//! world:
//!   min_x: -60.0
//!   max_x: 60.0
//!   min_y: 0.0
//!   max_y: 80.0
//!   cell_size: 5.0
//!
//! bodies:
//!   - x: [0.0, 40.0]
//!     v: [0.0, 0.0]
//!     m: 1.0
//!     radius: 2.0
//!     restitution: 0.8        # optional, default 1.0
//! ```
//!
//! `engine` may be omitted entirely; every other section is required.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::engine::RestitutionRule;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("`{field}` must have 2 components, got {len}")]
    Dimension { field: String, len: usize },
    #[error("Invalid world rectangle: {0}")]
    InvalidWorld(String),
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Invalid body #{index}: {reason}")]
    InvalidBody { index: usize, reason: String },
}

fn default_max_steps() -> usize {
    8
}

fn default_restitution() -> f64 {
    1.0
}

/// Engine-level configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub restitution_rule: RestitutionRule, // combine rule for body/body contacts
    #[serde(default = "default_max_steps")]
    pub max_steps_per_frame: usize, // tick cap per rendered frame
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            restitution_rule: RestitutionRule::default(),
            max_steps_per_frame: default_max_steps(),
        }
    }
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub h0: f64,           // fixed tick
    pub t_end: f64,        // time end
    pub gravity: Vec<f64>, // gravity vector
}

/// World rectangle and broad-phase cell size
#[derive(Deserialize, Debug, Clone)]
pub struct WorldConfig {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub cell_size: f64,
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position
    pub v: Vec<f64>, // initial velocity
    pub m: f64,      // mass, 0 makes the body static
    pub radius: f64, // collision radius
    #[serde(default = "default_restitution")]
    pub restitution: f64,
    #[serde(default)]
    pub damping: f64,
    #[serde(default)]
    pub friction: f64,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub world: WorldConfig,
    pub bodies: Vec<BodyConfig>,
}

/// Read a 2-component vector out of a YAML list
pub fn vec2_from(field: &str, values: &[f64]) -> Result<[f64; 2], ConfigError> {
    match values {
        [x, y] => Ok([*x, *y]),
        _ => Err(ConfigError::Dimension {
            field: field.to_string(),
            len: values.len(),
        }),
    }
}

impl ScenarioConfig {
    /// Parse and validate a scenario from a YAML string
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Reject values the engine treats as undefined behaviour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.parameters;
        if !(p.h0 > 0.0) {
            return Err(ConfigError::InvalidParameters(format!("h0 must be positive, got {}", p.h0)));
        }
        if p.t_end < 0.0 {
            return Err(ConfigError::InvalidParameters(format!("t_end must not be negative, got {}", p.t_end)));
        }
        vec2_from("parameters.gravity", &p.gravity)?;

        let w = &self.world;
        if !(w.min_x < w.max_x && w.min_y < w.max_y) {
            return Err(ConfigError::InvalidWorld(format!(
                "[{}, {}] x [{}, {}] is empty",
                w.min_x, w.max_x, w.min_y, w.max_y
            )));
        }
        if !(w.cell_size > 0.0) {
            return Err(ConfigError::InvalidWorld(format!("cell_size must be positive, got {}", w.cell_size)));
        }

        for (index, b) in self.bodies.iter().enumerate() {
            vec2_from(&format!("bodies[{index}].x"), &b.x)?;
            vec2_from(&format!("bodies[{index}].v"), &b.v)?;
            let reason = if !(b.radius > 0.0) {
                Some(format!("radius must be positive, got {}", b.radius))
            } else if b.m < 0.0 {
                Some(format!("mass must not be negative, got {}", b.m))
            } else if !(0.0..=1.0).contains(&b.restitution) {
                Some(format!("restitution must be in [0, 1], got {}", b.restitution))
            } else if b.damping < 0.0 || b.friction < 0.0 {
                Some("damping and friction must not be negative".to_string())
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::InvalidBody { index, reason });
            }
        }

        Ok(())
    }
}
