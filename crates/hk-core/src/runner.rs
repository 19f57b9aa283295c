//! Configured Runs
//!
//! Turns a [`SimulationConfig`] into one seeded run: builds the starting
//! profile, dispatches to the engine of the configured regime and
//! dimension, then analyses the result.

use hk_types::{Point2, Regime, RunReport, Termination, Topology};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use crate::analysis::{order_parameter, order_parameter_series, ClusterDetector, OrderSample};
use crate::config::{InitialDistribution, SimulationConfig};
use crate::discrete::DiscreteMap;
use crate::error::HkResult;
use crate::ode::EulerOde;
use crate::opinion::Opinion;
use crate::params::ModelParams;
use crate::radicals::RadicalSet;
use crate::sde::EulerMaruyama;
use crate::setup;

/// Final opinions of a run, tagged by dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "opinions", rename_all = "snake_case")]
pub enum FinalProfile {
    Scalar(Vec<f64>),
    Planar(Vec<Point2>),
}

impl FinalProfile {
    pub fn len(&self) -> usize {
        match self {
            FinalProfile::Scalar(v) => v.len(),
            FinalProfile::Planar(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_scalar(&self) -> Option<&[f64]> {
        match self {
            FinalProfile::Scalar(v) => Some(v),
            FinalProfile::Planar(_) => None,
        }
    }
}

/// Everything a configured run reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub regime: Regime,
    pub seed: u64,
    pub steps: usize,
    pub termination: Termination,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub radical_indices: Vec<usize>,
    pub clusters: usize,
    /// Mean of the cluster representatives (scalar runs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_mean: Option<f64>,
    /// Population variance of the representatives (scalar runs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_variance: Option<f64>,
    /// Order parameter samples; the last entry is the final profile.
    pub order: Vec<OrderSample>,
    pub final_profile: FinalProfile,
}

impl RunSummary {
    /// Order parameter of the final profile.
    pub fn final_order(&self) -> Option<f64> {
        self.order.last().map(|sample| sample.value)
    }
}

/// Runs the configured simulation once.
pub fn run_simulation(config: &SimulationConfig) -> HkResult<RunSummary> {
    config.validate()?;
    info!(
        regime = ?config.integration.regime,
        dimension = config.model.dimension,
        agents = config.population.agents,
        radius = config.model.radius,
        seed = config.run.seed,
        "starting run"
    );

    let mut rng = SmallRng::seed_from_u64(config.run.seed);
    let summary = match config.model.dimension {
        1 => run_scalar(config, &mut rng)?,
        _ => run_planar(config, &mut rng)?,
    };

    info!(
        steps = summary.steps,
        termination = ?summary.termination,
        clusters = summary.clusters,
        "run finished"
    );
    Ok(summary)
}

fn model_params(config: &SimulationConfig) -> ModelParams {
    ModelParams::new(config.model.radius)
        .with_include_self(config.model.include_self)
        .with_norm(config.model.norm)
}

fn discrete_map(config: &SimulationConfig) -> DiscreteMap {
    DiscreteMap::new(model_params(config))
        .with_tolerance(config.integration.tolerance)
        .with_max_steps(config.max_steps())
}

fn euler_ode(config: &SimulationConfig) -> EulerOde {
    EulerOde::new(model_params(config), config.integration.step_size)
        .with_scaling(config.model.drift_scaling)
        .with_tolerance(config.integration.tolerance)
        .with_max_steps(config.max_steps())
}

fn euler_maruyama(config: &SimulationConfig) -> EulerMaruyama {
    EulerMaruyama::new(
        model_params(config),
        config.integration.step_size,
        config.integration.noise,
    )
    .with_boundary(config.integration.boundary)
    .with_scaling(config.model.drift_scaling)
    .with_tolerance(config.integration.tolerance)
    .with_max_steps(config.max_steps())
}

fn radical_set(config: &SimulationConfig) -> HkResult<RadicalSet> {
    let opinions = config.population.radicals.clone();
    match config.population.radical_count {
        Some(count) => RadicalSet::with_count(count, opinions),
        None => Ok(RadicalSet::new(opinions)),
    }
}

fn run_scalar(config: &SimulationConfig, rng: &mut SmallRng) -> HkResult<RunSummary> {
    let n = config.population.agents;
    let initial = match config.population.initial {
        InitialDistribution::Equidistant => setup::equidistant(n),
        InitialDistribution::Uniform => setup::uniform(n, rng),
    };
    let radicals = radical_set(config)?;
    let mode = config.integration.result;

    let report = match config.integration.regime {
        Regime::Discrete => discrete_map(config).run(&initial, mode)?,
        Regime::Ode if radicals.is_empty() => euler_ode(config).run(&initial, mode)?,
        Regime::Ode => euler_ode(config).run_with_radicals(&initial, &radicals, mode)?,
        Regime::Sde if radicals.is_empty() => euler_maruyama(config).run(&initial, rng, mode)?,
        Regime::Sde => euler_maruyama(config).run_with_radicals(&initial, &radicals, rng, mode)?,
    };

    let clusters = detector(config).detect(report.final_profile())?;
    let statistics = clusters.statistics();
    let order = order_samples(config, &report)?;
    Ok(RunSummary {
        regime: config.integration.regime,
        seed: config.run.seed,
        steps: report.steps,
        termination: report.termination,
        radical_indices: report.radical_indices,
        clusters: statistics.count,
        cluster_mean: Some(statistics.mean),
        cluster_variance: Some(statistics.variance),
        order,
        final_profile: FinalProfile::Scalar(report.output.into_final_profile()),
    })
}

fn run_planar(config: &SimulationConfig, rng: &mut SmallRng) -> HkResult<RunSummary> {
    let initial = setup::uniform_2d(config.population.agents, rng);
    let mode = config.integration.result;

    let report = match config.integration.regime {
        Regime::Discrete => discrete_map(config).run(&initial, mode)?,
        Regime::Ode => euler_ode(config).run(&initial, mode)?,
        Regime::Sde => euler_maruyama(config).run(&initial, rng, mode)?,
    };

    let clusters = detector(config).detect(report.final_profile())?;
    let order = order_samples(config, &report)?;
    Ok(RunSummary {
        regime: config.integration.regime,
        seed: config.run.seed,
        steps: report.steps,
        termination: report.termination,
        radical_indices: Vec::new(),
        clusters: clusters.count(),
        cluster_mean: None,
        cluster_variance: None,
        order,
        final_profile: FinalProfile::Planar(report.output.into_final_profile()),
    })
}

fn detector(config: &SimulationConfig) -> ClusterDetector {
    ClusterDetector::new(config.model.radius)
        .with_norm(config.model.norm)
        .with_matching(config.analysis.cluster_match)
}

/// Topology the run's distances were measured in.
fn run_topology(config: &SimulationConfig) -> Topology {
    match config.integration.regime {
        Regime::Sde => config.integration.boundary.topology(),
        Regime::Discrete | Regime::Ode => Topology::Bounded,
    }
}

fn order_samples<O: Opinion>(
    config: &SimulationConfig,
    report: &RunReport<O>,
) -> HkResult<Vec<OrderSample>> {
    let radius = config.model.radius;
    let norm = config.model.norm;
    let topology = run_topology(config);
    match report.trajectory() {
        Some(trajectory) => order_parameter_series(
            trajectory,
            &config.analysis.order_sample_steps,
            radius,
            norm,
            topology,
        ),
        None => {
            let value = order_parameter(report.final_profile(), radius, norm, topology)?;
            Ok(vec![OrderSample {
                step: report.steps,
                value,
            }])
        }
    }
}
