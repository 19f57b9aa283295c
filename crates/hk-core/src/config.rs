//! Configuration loading for a single simulation run.
//!
//! All settings are loaded from a TOML file; every section and field falls
//! back to its default when omitted.

use hk_types::{BoundaryPolicy, Norm, Regime, ResultMode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::analysis::ClusterMatch;
use crate::drift::DriftScaling;
use crate::error::{HkError, HkResult, Parameter};
use crate::params::{DEFAULT_CONTINUOUS_MAX_STEPS, DEFAULT_DISCRETE_MAX_STEPS, DEFAULT_TOLERANCE};

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub integration: IntegrationConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl SimulationConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Toml)
    }

    /// Loads and validates a run configuration file.
    pub fn load(path: &Path) -> HkResult<Self> {
        let config = Self::from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSerialize)
    }

    /// Step cap in effect: the configured one, or the regime default.
    pub fn max_steps(&self) -> usize {
        self.integration.max_steps.unwrap_or(match self.integration.regime {
            Regime::Discrete => DEFAULT_DISCRETE_MAX_STEPS,
            Regime::Ode | Regime::Sde => DEFAULT_CONTINUOUS_MAX_STEPS,
        })
    }

    /// Cross-field checks the engines cannot see on their own.
    pub fn validate(&self) -> HkResult<()> {
        if !matches!(self.model.dimension, 1 | 2) {
            return Err(HkError::invalid(
                Parameter::InitialProfile,
                format!("dimension must be 1 or 2, got {}", self.model.dimension),
            ));
        }
        if self.population.agents == 0 {
            return Err(HkError::invalid(Parameter::Agents, "population must be non-empty"));
        }
        if self.model.dimension == 2 && self.population.initial == InitialDistribution::Equidistant {
            return Err(HkError::invalid(
                Parameter::InitialProfile,
                "equidistant initial profiles are only defined in one dimension",
            ));
        }

        let radicals = &self.population.radicals;
        if let Some(declared) = self.population.radical_count {
            if declared != radicals.len() {
                return Err(HkError::invalid(
                    Parameter::Radicals,
                    format!(
                        "declared {} radicals but {} opinions were given",
                        declared,
                        radicals.len()
                    ),
                ));
            }
        }
        if !radicals.is_empty() {
            if self.model.dimension != 1 {
                return Err(HkError::invalid(
                    Parameter::Radicals,
                    "radicals are only supported for scalar opinions",
                ));
            }
            if self.integration.regime == Regime::Discrete {
                return Err(HkError::invalid(
                    Parameter::Radicals,
                    "radicals require the ode or sde regime",
                ));
            }
        }
        Ok(())
    }
}

/// Interaction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Confidence radius R
    pub radius: f64,
    /// Whether agents count themselves as neighbors
    pub include_self: bool,
    /// Distance norm for planar opinions
    pub norm: Norm,
    /// Opinion dimensionality: 1 or 2
    pub dimension: u8,
    /// Denominator of the continuous drift
    pub drift_scaling: DriftScaling,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            radius: 0.2,
            include_self: true,
            norm: Norm::L2,
            dimension: 1,
            drift_scaling: DriftScaling::Population,
        }
    }
}

/// How starting opinions are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InitialDistribution {
    /// `i / (n + 1)` for `i = 1..=n`
    #[default]
    Equidistant,
    /// Seeded uniform draws
    Uniform,
}

/// Population settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of ordinary agents
    pub agents: usize,
    pub initial: InitialDistribution,
    /// Fixed opinions appended to the population
    pub radicals: Vec<f64>,
    /// Declared number of radicals, checked against `radicals`
    pub radical_count: Option<usize>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            agents: 50,
            initial: InitialDistribution::Equidistant,
            radicals: Vec::new(),
            radical_count: None,
        }
    }
}

/// Integration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    pub regime: Regime,
    /// Step size h (ode and sde)
    pub step_size: f64,
    /// Noise level sigma (sde)
    pub noise: f64,
    /// Stopping tolerance on the largest per-agent change
    pub tolerance: f64,
    /// Step cap; regime default when omitted
    pub max_steps: Option<usize>,
    /// Boundary policy (sde)
    pub boundary: BoundaryPolicy,
    pub result: ResultMode,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            regime: Regime::Discrete,
            step_size: 0.01,
            noise: 0.0,
            tolerance: DEFAULT_TOLERANCE,
            max_steps: None,
            boundary: BoundaryPolicy::Reflect,
            result: ResultMode::Full,
        }
    }
}

/// Post-run analysis settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Trajectory steps at which to sample the order parameter
    pub order_sample_steps: Vec<usize>,
    /// Representative matching rule of the cluster detector
    pub cluster_match: ClusterMatch,
}

/// Run settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seed for initial draws and noise
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[source] toml::ser::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Hegselmann-Krause run configuration

[model]
radius = 0.2
include_self = true
norm = "l2"
dimension = 1
drift_scaling = "population"

[population]
agents = 50
initial = "equidistant"
radicals = []

[integration]
regime = "discrete"
step_size = 0.01
noise = 0.0
tolerance = 1e-5
boundary = "reflect"
result = "full"

[analysis]
order_sample_steps = [10, 50, 100]
cluster_match = "any"

[run]
seed = 42
"#
    .to_string()
}
