//! Model Parameters
//!
//! Inputs shared by every engine, plus the validation each run performs
//! before its first step.

use hk_types::{Norm, Topology};

use crate::error::{require_positive, HkError, HkResult, Parameter};
use crate::opinion::Opinion;

/// Default stopping tolerance on the largest per-agent change.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;
/// Default step cap for the discrete map.
pub const DEFAULT_DISCRETE_MAX_STEPS: usize = 100;
/// Default step cap for the Euler and Euler-Maruyama engines.
pub const DEFAULT_CONTINUOUS_MAX_STEPS: usize = 1000;

/// Parameters of the bounded-confidence interaction itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    /// Confidence radius R.
    pub radius: f64,
    /// Whether an agent belongs to its own influence set.
    pub include_self: bool,
    /// Distance norm for planar opinions.
    pub norm: Norm,
}

impl ModelParams {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            include_self: true,
            norm: Norm::L2,
        }
    }

    pub fn with_include_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    pub fn validate(&self) -> HkResult<()> {
        require_positive(Parameter::Radius, self.radius)
    }
}

/// When a run stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopRule {
    /// Converged once the largest per-agent change is at or below this.
    pub tolerance: f64,
    /// Largest number of accepted steps.
    pub max_steps: usize,
}

impl StopRule {
    pub fn new(tolerance: f64, max_steps: usize) -> Self {
        Self {
            tolerance,
            max_steps,
        }
    }

    pub fn validate(&self) -> HkResult<()> {
        require_positive(Parameter::Tolerance, self.tolerance)?;
        if self.max_steps == 0 {
            return Err(HkError::invalid(
                Parameter::MaxSteps,
                "must allow at least one step",
            ));
        }
        Ok(())
    }
}

/// Checks an initial profile before any stepping begins.
pub fn validate_profile<O: Opinion>(profile: &[O], topology: Topology) -> HkResult<()> {
    if profile.is_empty() {
        return Err(HkError::invalid(Parameter::Agents, "population must be non-empty"));
    }
    if !O::supports_topology(topology) {
        return Err(HkError::invalid(
            Parameter::Topology,
            format!(
                "{:?} topology is not available for {}-dimensional opinions",
                topology,
                O::DIMENSION
            ),
        ));
    }
    if let Some(i) = profile.iter().position(|o| !o.is_finite()) {
        return Err(HkError::invalid(
            Parameter::InitialProfile,
            format!("opinion of agent {} is not finite: {:?}", i, profile[i]),
        ));
    }
    if topology == Topology::Periodic {
        validate_unit_domain(profile, Parameter::InitialProfile)?;
    }
    Ok(())
}

/// Rejects any opinion outside the unit domain, blaming `parameter`.
pub fn validate_unit_domain<O: Opinion>(profile: &[O], parameter: Parameter) -> HkResult<()> {
    match profile.iter().position(|o| !o.in_unit_domain()) {
        Some(i) => Err(HkError::invalid(
            parameter,
            format!("opinion {} lies outside the unit domain: {:?}", i, profile[i]),
        )),
        None => Ok(()),
    }
}
