//! Model Options
//!
//! Selector enums shared by the engines, the analyses and the configuration.

use serde::{Deserialize, Serialize};

/// Distance norm for planar opinions. Scalar opinions always use `|Δ|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Norm {
    L1,
    #[default]
    L2,
}

/// Shape of the opinion space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Plain interval (or square); distances are direct.
    #[default]
    Bounded,
    /// Unit interval with its endpoints identified; distances wrap around.
    Periodic,
}

/// How noisy updates that leave the unit domain are brought back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Fold back across the crossed wall until inside.
    #[default]
    Reflect,
    /// Saturate at the crossed wall.
    #[serde(alias = "adsorb")]
    Absorb,
    /// Wrap modulo 1.
    Period,
}

impl BoundaryPolicy {
    /// Topology the drift has to use under this policy.
    pub fn topology(self) -> Topology {
        match self {
            BoundaryPolicy::Period => Topology::Periodic,
            BoundaryPolicy::Reflect | BoundaryPolicy::Absorb => Topology::Bounded,
        }
    }
}

/// Which part of a run the caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResultMode {
    /// Every accepted profile, starting with the initial one.
    Full,
    /// Only the last accepted profile.
    #[default]
    Terminal,
}

/// Update regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Synchronous averaging map.
    #[default]
    Discrete,
    /// Explicit Euler integration of the drift.
    Ode,
    /// Euler-Maruyama integration of the drift plus Gaussian noise.
    Sde,
}
