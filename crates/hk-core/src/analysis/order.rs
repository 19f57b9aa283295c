//! Order Parameter
//!
//! Fraction of ordered agent pairs `(i, j)` lying within R of each other,
//! self-pairs included. Ranges over `[1/n, 1]`.

use hk_types::{Norm, Topology};
use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, HkError, HkResult, Parameter};
use crate::neighbor::NeighborRule;
use crate::opinion::Opinion;

/// Order parameter at one point of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderSample {
    /// Index into the trajectory the value was taken from.
    pub step: usize,
    pub value: f64,
}

pub fn order_parameter<O: Opinion>(
    profile: &[O],
    radius: f64,
    norm: Norm,
    topology: Topology,
) -> HkResult<f64> {
    require_non_negative(Parameter::Radius, radius)?;
    if profile.is_empty() {
        return Err(HkError::DegenerateProfile);
    }
    if !O::supports_topology(topology) {
        return Err(HkError::invalid(
            Parameter::Topology,
            format!("{:?} topology is not available for {}-dimensional opinions", topology, O::DIMENSION),
        ));
    }

    let rule = NeighborRule::new(radius).with_norm(norm).with_topology(topology);
    let n = profile.len();
    let connected: usize = (0..n).map(|i| rule.neighbors_iter(profile, i).count()).sum();
    Ok(connected as f64 / (n * n) as f64)
}

/// Samples the order parameter at each requested step (clamped to the last
/// profile), followed by the value of the final profile.
pub fn order_parameter_series<O: Opinion>(
    trajectory: &[Vec<O>],
    sample_steps: &[usize],
    radius: f64,
    norm: Norm,
    topology: Topology,
) -> HkResult<Vec<OrderSample>> {
    let last = trajectory.len().checked_sub(1).ok_or(HkError::DegenerateProfile)?;
    sample_steps
        .iter()
        .map(|&step| step.min(last))
        .chain(std::iter::once(last))
        .map(|step| {
            order_parameter(&trajectory[step], radius, norm, topology)
                .map(|value| OrderSample { step, value })
        })
        .collect()
}
