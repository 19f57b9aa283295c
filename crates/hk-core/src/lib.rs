//! Hegselmann-Krause bounded-confidence opinion dynamics.
//!
//! Agents hold opinions in the unit interval or the unit square and move
//! towards the opinions within their confidence radius. Three regimes are
//! provided: the discrete averaging map, an Euler discretisation of the
//! mean-field ODE, and an Euler-Maruyama discretisation of its noisy SDE.
//! Runs are analysed by cluster detection and the order parameter.

pub mod analysis;
pub mod boundary;
pub mod config;
pub mod discrete;
pub mod drift;
pub mod engine;
pub mod error;
pub mod neighbor;
pub mod ode;
pub mod opinion;
pub mod params;
pub mod radicals;
pub mod runner;
pub mod sde;
pub mod setup;

pub use hk_types::{
    BoundaryPolicy, Norm, Point2, Regime, ResultMode, RunOutput, RunReport, Termination, Topology,
};

// Re-export engines
pub use discrete::DiscreteMap;
pub use ode::EulerOde;
pub use sde::EulerMaruyama;

// Re-export model setup
pub use config::{ConfigError, SimulationConfig};
pub use drift::DriftScaling;
pub use error::{HkError, HkResult, Parameter};
pub use neighbor::NeighborRule;
pub use opinion::Opinion;
pub use params::{ModelParams, StopRule};
pub use radicals::RadicalSet;
pub use runner::{run_simulation, FinalProfile, RunSummary};
