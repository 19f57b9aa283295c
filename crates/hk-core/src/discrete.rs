//! Discrete Map Engine
//!
//! Synchronous Hegselmann-Krause averaging: every agent moves to the mean
//! opinion of its influence set, all computed from the same pre-step
//! profile.

use hk_types::{ResultMode, RunReport, Topology};
use tracing::debug;

use crate::engine::{drive, LoopSettings};
use crate::error::HkResult;
use crate::neighbor::NeighborRule;
use crate::opinion::Opinion;
use crate::params::{
    validate_profile, ModelParams, StopRule, DEFAULT_DISCRETE_MAX_STEPS, DEFAULT_TOLERANCE,
};

/// The bounded-confidence averaging map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteMap {
    params: ModelParams,
    stop: StopRule,
}

impl DiscreteMap {
    pub fn new(params: ModelParams) -> Self {
        Self {
            params,
            stop: StopRule::new(DEFAULT_TOLERANCE, DEFAULT_DISCRETE_MAX_STEPS),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.stop.tolerance = tolerance;
        self
    }

    /// Step cap. Only consulted when agents ignore their own opinion; with
    /// self-influence the map cannot oscillate and always settles.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.stop.max_steps = max_steps;
        self
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn stop_rule(&self) -> &StopRule {
        &self.stop
    }

    /// One synchronous update. Agents with an empty influence set keep
    /// their opinion.
    pub fn step<O: Opinion>(&self, current: &[O]) -> Vec<O> {
        let rule = NeighborRule::from_params(&self.params);
        (0..current.len())
            .map(|i| {
                let (sum, count) = rule
                    .neighbors_iter(current, i)
                    .fold((O::zero(), 0usize), |(sum, count), j| (sum + current[j], count + 1));
                if count == 0 {
                    current[i]
                } else {
                    sum * (1.0 / count as f64)
                }
            })
            .collect()
    }

    /// Runs the map from `initial` until it settles or hits the step cap.
    pub fn run<O: Opinion>(&self, initial: &[O], mode: ResultMode) -> HkResult<RunReport<O>> {
        self.params.validate()?;
        self.stop.validate()?;
        validate_profile(initial, Topology::Bounded)?;

        let max_steps = if self.params.include_self {
            None
        } else {
            Some(self.stop.max_steps)
        };
        debug!(
            agents = initial.len(),
            dimension = O::DIMENSION,
            radius = self.params.radius,
            include_self = self.params.include_self,
            "starting discrete map"
        );

        let settings = LoopSettings {
            tolerance: self.stop.tolerance,
            max_steps,
            norm: self.params.norm,
            mode,
        };
        Ok(drive("discrete", initial.to_vec(), settings, Vec::new(), |x| {
            self.step(x)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Parameter;
    use hk_types::{Norm, Point2, Termination};

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_worked_example_first_step() {
        let map = DiscreteMap::new(ModelParams::new(0.5));
        let next = map.step(&[0.1, 0.5, 0.9]);
        assert_close(&next, &[0.3, 0.5, 0.7]);
    }

    #[test]
    fn test_worked_example_converges_to_center() {
        let map = DiscreteMap::new(ModelParams::new(0.5));
        let report = map.run(&[0.1, 0.5, 0.9], ResultMode::Full).unwrap();

        assert_eq!(report.termination, Termination::Converged);
        let trajectory = report.trajectory().unwrap();
        assert_eq!(trajectory[0], vec![0.1, 0.5, 0.9]);
        assert_close(&trajectory[1], &[0.3, 0.5, 0.7]);
        for value in report.final_profile() {
            assert!((value - 0.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_isolated_agent_without_self_holds() {
        let map = DiscreteMap::new(ModelParams::new(0.1).with_include_self(false));
        let next = map.step(&[0.1, 0.5, 0.55]);
        assert_eq!(next[0], 0.1);
        // The pair swaps towards each other's value
        assert_eq!(next[1], 0.55);
        assert_eq!(next[2], 0.5);
    }

    #[test]
    fn test_oscillation_without_self_hits_cap() {
        let map = DiscreteMap::new(ModelParams::new(0.1).with_include_self(false)).with_max_steps(10);
        let report = map.run(&[0.5, 0.55], ResultMode::Full).unwrap();
        assert_eq!(report.termination, Termination::StepCap);
        assert_eq!(report.steps, 10);
        assert_eq!(report.trajectory().unwrap().len(), 11);
    }

    #[test]
    fn test_overflowing_mean_reports_divergence() {
        let map = DiscreteMap::new(ModelParams::new(f64::MAX));
        let report = map.run(&[1e308, 1.7e308], ResultMode::Full).unwrap();
        assert_eq!(report.termination, Termination::Diverged);
        assert_eq!(report.steps, 0);
        assert_eq!(report.trajectory().unwrap(), &[vec![1e308, 1.7e308]]);
    }

    #[test]
    fn test_planar_step() {
        let map = DiscreteMap::new(ModelParams::new(0.3).with_norm(Norm::L2));
        let profile = [Point2::new(0.0, 0.0), Point2::new(0.2, 0.0), Point2::new(0.9, 0.9)];
        let next = map.step(&profile);
        assert!((next[0].x - 0.1).abs() < 1e-12);
        assert!((next[1].x - 0.1).abs() < 1e-12);
        assert_eq!(next[2], Point2::new(0.9, 0.9));
    }

    #[test]
    fn test_rejects_invalid_radius() {
        let map = DiscreteMap::new(ModelParams::new(0.0));
        let err = map.run(&[0.1, 0.2], ResultMode::Terminal).unwrap_err();
        assert_eq!(err.parameter(), Some(Parameter::Radius));
    }

    #[test]
    fn test_rejects_empty_profile() {
        let map = DiscreteMap::new(ModelParams::new(0.2));
        let err = map.run::<f64>(&[], ResultMode::Terminal).unwrap_err();
        assert_eq!(err.parameter(), Some(Parameter::Agents));
    }
}
