//! Euler Engine
//!
//! Fixed-step explicit Euler integration of the drift:
//! `x_{k+1} = x_k + h · drift(x_k)`.

use hk_types::{ResultMode, RunReport, Topology};
use tracing::debug;

use crate::drift::{drift, DriftScaling};
use crate::engine::{drive, LoopSettings};
use crate::error::{require_positive, HkResult, Parameter};
use crate::neighbor::NeighborRule;
use crate::opinion::Opinion;
use crate::params::{
    validate_profile, ModelParams, StopRule, DEFAULT_CONTINUOUS_MAX_STEPS, DEFAULT_TOLERANCE,
};
use crate::radicals::{merge, RadicalSet};

/// Explicit Euler integrator for the deterministic dynamics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerOde {
    params: ModelParams,
    step_size: f64,
    scaling: DriftScaling,
    stop: StopRule,
}

impl EulerOde {
    pub fn new(params: ModelParams, step_size: f64) -> Self {
        Self {
            params,
            step_size,
            scaling: DriftScaling::default(),
            stop: StopRule::new(DEFAULT_TOLERANCE, DEFAULT_CONTINUOUS_MAX_STEPS),
        }
    }

    pub fn with_scaling(mut self, scaling: DriftScaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.stop.tolerance = tolerance;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.stop.max_steps = max_steps;
        self
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// One Euler step. `radicals` must be sorted ascending.
    pub fn step<O: Opinion>(&self, current: &[O], radicals: &[usize]) -> Vec<O> {
        let rule = NeighborRule::from_params(&self.params);
        let velocity = drift(current, &rule, self.scaling, radicals);
        current
            .iter()
            .zip(velocity)
            .map(|(&x, v)| x + v * self.step_size)
            .collect()
    }

    pub fn run<O: Opinion>(&self, initial: &[O], mode: ResultMode) -> HkResult<RunReport<O>> {
        self.validate()?;
        validate_profile(initial, Topology::Bounded)?;
        Ok(self.integrate(initial.to_vec(), Vec::new(), mode))
    }

    /// Runs the merged, sorted population of `base` and `radicals`; the
    /// report records where the radicals ended up.
    pub fn run_with_radicals(
        &self,
        base: &[f64],
        radicals: &RadicalSet,
        mode: ResultMode,
    ) -> HkResult<RunReport<f64>> {
        self.validate()?;
        let merged = merge(base, radicals)?;
        validate_profile(&merged.profile, Topology::Bounded)?;
        Ok(self.integrate(merged.profile, merged.radical_indices, mode))
    }

    fn validate(&self) -> HkResult<()> {
        self.params.validate()?;
        require_positive(Parameter::StepSize, self.step_size)?;
        self.stop.validate()
    }

    fn integrate<O: Opinion>(
        &self,
        initial: Vec<O>,
        radicals: Vec<usize>,
        mode: ResultMode,
    ) -> RunReport<O> {
        debug!(
            agents = initial.len(),
            radicals = radicals.len(),
            dimension = O::DIMENSION,
            radius = self.params.radius,
            step_size = self.step_size,
            "starting euler integration"
        );
        let settings = LoopSettings {
            tolerance: self.stop.tolerance,
            max_steps: Some(self.stop.max_steps),
            norm: self.params.norm,
            mode,
        };
        let fixed = radicals.clone();
        drive("ode", initial, settings, radicals, |x| self.step(x, &fixed))
    }
}
