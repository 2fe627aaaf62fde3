//! High-level runtime engine settings
//!
//! Selects the pairwise restitution rule and the per-frame tick cap used when
//! building and running a `Simulation`

use serde::Deserialize;

/// How two bodies' restitution values combine into one for a pair contact
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestitutionRule {
    #[default]
    #[serde(rename = "min")] // the less bouncy body wins
    Min,

    #[serde(rename = "max")]
    Max,

    #[serde(rename = "average")]
    Average,

    #[serde(rename = "multiply")]
    Multiply,
}

impl RestitutionRule {
    pub fn combine(self, a: f64, b: f64) -> f64 {
        match self {
            RestitutionRule::Min => a.min(b),
            RestitutionRule::Max => a.max(b),
            RestitutionRule::Average => 0.5 * (a + b),
            RestitutionRule::Multiply => a * b,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub restitution_rule: RestitutionRule,
    pub max_steps_per_frame: usize, // ticks allowed per rendered frame before dropping time
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            restitution_rule: RestitutionRule::Min,
            max_steps_per_frame: 8,
        }
    }
}
