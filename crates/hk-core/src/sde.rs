//! Euler-Maruyama Engine
//!
//! Noisy dynamics `y = x + h·drift(x) + σ·√h·ξ`, ξ standard normal per agent
//! and coordinate, followed by the boundary projector. Random draws come
//! from the caller's generator, so a seeded generator reproduces a run.

use hk_types::{BoundaryPolicy, ResultMode, RunReport};
use rand::Rng;
use tracing::debug;

use crate::drift::{drift, DriftScaling};
use crate::engine::{drive, LoopSettings};
use crate::error::{require_non_negative, require_positive, HkError, HkResult, Parameter};
use crate::neighbor::NeighborRule;
use crate::opinion::Opinion;
use crate::params::{
    validate_profile, validate_unit_domain, ModelParams, StopRule, DEFAULT_CONTINUOUS_MAX_STEPS,
    DEFAULT_TOLERANCE,
};
use crate::radicals::{merge, RadicalSet};

/// Euler-Maruyama integrator for the noisy dynamics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerMaruyama {
    params: ModelParams,
    step_size: f64,
    noise: f64,
    boundary: BoundaryPolicy,
    scaling: DriftScaling,
    stop: StopRule,
}

impl EulerMaruyama {
    pub fn new(params: ModelParams, step_size: f64, noise: f64) -> Self {
        Self {
            params,
            step_size,
            noise,
            boundary: BoundaryPolicy::default(),
            scaling: DriftScaling::default(),
            stop: StopRule::new(DEFAULT_TOLERANCE, DEFAULT_CONTINUOUS_MAX_STEPS),
        }
    }

    /// Boundary policy. `Period` also switches the drift onto the torus.
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
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

    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    fn rule(&self) -> NeighborRule {
        NeighborRule::from_params(&self.params).with_topology(self.boundary.topology())
    }

    /// One stochastic step followed by projection. Radicals (sorted
    /// ascending) get neither drift nor noise and are not projected.
    pub fn step<O, R>(&self, current: &[O], radicals: &[usize], rng: &mut R) -> Vec<O>
    where
        O: Opinion,
        R: Rng + ?Sized,
    {
        let velocity = drift(current, &self.rule(), self.scaling, radicals);
        let diffusion = self.noise * self.step_size.sqrt();

        current
            .iter()
            .zip(velocity)
            .enumerate()
            .map(|(i, (&x, v))| {
                if radicals.binary_search(&i).is_ok() {
                    return x;
                }
                let y = x + v * self.step_size + O::gaussian(&mut *rng) * diffusion;
                y.project(self.boundary)
            })
            .collect()
    }

    pub fn run<O, R>(&self, initial: &[O], rng: &mut R, mode: ResultMode) -> HkResult<RunReport<O>>
    where
        O: Opinion,
        R: Rng + ?Sized,
    {
        self.validate::<O>()?;
        validate_profile(initial, self.boundary.topology())?;
        validate_unit_domain(initial, Parameter::InitialProfile)?;
        Ok(self.integrate(initial.to_vec(), Vec::new(), rng, mode))
    }

    /// Runs the merged, sorted population of `base` and `radicals`.
    pub fn run_with_radicals<R>(
        &self,
        base: &[f64],
        radicals: &RadicalSet,
        rng: &mut R,
        mode: ResultMode,
    ) -> HkResult<RunReport<f64>>
    where
        R: Rng + ?Sized,
    {
        self.validate::<f64>()?;
        validate_unit_domain(base, Parameter::InitialProfile)?;
        validate_unit_domain(radicals.opinions(), Parameter::Radicals)?;
        let merged = merge(base, radicals)?;
        validate_profile(&merged.profile, self.boundary.topology())?;
        Ok(self.integrate(merged.profile, merged.radical_indices, rng, mode))
    }

    fn validate<O: Opinion>(&self) -> HkResult<()> {
        self.params.validate()?;
        require_positive(Parameter::StepSize, self.step_size)?;
        require_non_negative(Parameter::Noise, self.noise)?;
        self.stop.validate()?;
        if !O::supports_boundary(self.boundary) {
            return Err(HkError::invalid(
                Parameter::Boundary,
                format!(
                    "{:?} boundary is not implemented for {}-dimensional opinions",
                    self.boundary,
                    O::DIMENSION
                ),
            ));
        }
        Ok(())
    }

    fn integrate<O, R>(
        &self,
        initial: Vec<O>,
        radicals: Vec<usize>,
        rng: &mut R,
        mode: ResultMode,
    ) -> RunReport<O>
    where
        O: Opinion,
        R: Rng + ?Sized,
    {
        debug!(
            agents = initial.len(),
            radicals = radicals.len(),
            dimension = O::DIMENSION,
            radius = self.params.radius,
            step_size = self.step_size,
            noise = self.noise,
            boundary = ?self.boundary,
            "starting euler-maruyama integration"
        );
        let settings = LoopSettings {
            tolerance: self.stop.tolerance,
            max_steps: Some(self.stop.max_steps),
            norm: self.params.norm,
            mode,
        };
        let fixed = radicals.clone();
        drive("sde", initial, settings, radicals, |x| self.step(x, &fixed, &mut *rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hk_types::{Point2, Termination};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_noise_matches_euler() {
        let params = ModelParams::new(0.3);
        let sde = EulerMaruyama::new(params, 0.1, 0.0);
        let ode = crate::ode::EulerOde::new(params, 0.1);
        let mut rng = SmallRng::seed_from_u64(1);
        let profile = [0.2, 0.35, 0.7];
        assert_eq!(sde.step(&profile, &[], &mut rng), ode.step(&profile, &[]));
    }

    #[test]
    fn test_reflect_keeps_values_in_domain() {
        let sde = EulerMaruyama::new(ModelParams::new(0.1), 0.01, 2.0).with_max_steps(100);
        let mut rng = SmallRng::seed_from_u64(42);
        let report = sde
            .run(&[0.0, 0.5, 1.0], &mut rng, ResultMode::Full)
            .unwrap();
        for profile in report.trajectory().unwrap() {
            assert!(profile.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_period_keeps_values_half_open() {
        let sde = EulerMaruyama::new(ModelParams::new(0.1), 0.01, 2.0)
            .with_boundary(BoundaryPolicy::Period)
            .with_max_steps(100);
        let mut rng = SmallRng::seed_from_u64(3);
        let report = sde
            .run(&[0.05, 0.5, 0.95], &mut rng, ResultMode::Full)
            .unwrap();
        for profile in &report.trajectory().unwrap()[1..] {
            assert!(profile.iter().all(|v| (0.0..1.0).contains(v)));
        }
    }

    #[test]
    fn test_noise_hits_step_cap() {
        let sde = EulerMaruyama::new(ModelParams::new(0.5), 0.01, 0.5).with_max_steps(50);
        let mut rng = SmallRng::seed_from_u64(9);
        let report = sde.run(&[0.2, 0.8], &mut rng, ResultMode::Terminal).unwrap();
        assert_eq!(report.termination, Termination::StepCap);
        assert_eq!(report.steps, 50);
    }

    #[test]
    fn test_radicals_receive_no_noise() {
        let sde = EulerMaruyama::new(ModelParams::new(0.3), 0.01, 1.0).with_max_steps(100);
        let mut rng = SmallRng::seed_from_u64(5);
        let report = sde
            .run_with_radicals(&[0.4, 0.6], &RadicalSet::new(vec![0.1]), &mut rng, ResultMode::Full)
            .unwrap();
        assert_eq!(report.radical_indices, vec![0]);
        for profile in report.trajectory().unwrap() {
            assert_eq!(profile[0], 0.1);
        }
    }

    #[test]
    fn test_planar_only_absorbs() {
        let profile = [Point2::new(0.2, 0.2), Point2::new(0.8, 0.8)];
        let mut rng = SmallRng::seed_from_u64(11);

        let reflect = EulerMaruyama::new(ModelParams::new(0.3), 0.01, 0.1);
        let err = reflect.run(&profile, &mut rng, ResultMode::Terminal).unwrap_err();
        assert_eq!(err.parameter(), Some(Parameter::Boundary));

        let absorb = reflect.with_boundary(BoundaryPolicy::Absorb).with_max_steps(50);
        let report = absorb.run(&profile, &mut rng, ResultMode::Full).unwrap();
        for step in report.trajectory().unwrap() {
            assert!(step.iter().all(|p| p.in_unit_domain()));
        }
    }

    #[test]
    fn test_rejects_initial_opinion_outside_domain() {
        let mut rng = SmallRng::seed_from_u64(2);
        for policy in [BoundaryPolicy::Reflect, BoundaryPolicy::Absorb, BoundaryPolicy::Period] {
            let sde = EulerMaruyama::new(ModelParams::new(0.3), 0.01, 0.1).with_boundary(policy);
            let err = sde.run(&[1.5, 0.5], &mut rng, ResultMode::Full).unwrap_err();
            assert_eq!(err.parameter(), Some(Parameter::InitialProfile));
        }

        let planar = EulerMaruyama::new(ModelParams::new(0.3), 0.01, 0.1)
            .with_boundary(BoundaryPolicy::Absorb);
        let err = planar
            .run(&[Point2::new(0.5, -0.2)], &mut rng, ResultMode::Full)
            .unwrap_err();
        assert_eq!(err.parameter(), Some(Parameter::InitialProfile));
    }

    #[test]
    fn test_rejects_radical_outside_domain() {
        let sde = EulerMaruyama::new(ModelParams::new(0.3), 0.01, 0.1)
            .with_boundary(BoundaryPolicy::Absorb);
        let mut rng = SmallRng::seed_from_u64(4);
        let err = sde
            .run_with_radicals(&[0.4, 0.6], &RadicalSet::new(vec![1.7]), &mut rng, ResultMode::Full)
            .unwrap_err();
        assert_eq!(err.parameter(), Some(Parameter::Radicals));
    }

    #[test]
    fn test_rejects_negative_noise() {
        let sde = EulerMaruyama::new(ModelParams::new(0.3), 0.01, -0.1);
        let mut rng = SmallRng::seed_from_u64(0);
        let err = sde.run(&[0.5], &mut rng, ResultMode::Terminal).unwrap_err();
        assert_eq!(err.parameter(), Some(Parameter::Noise));
    }
}
