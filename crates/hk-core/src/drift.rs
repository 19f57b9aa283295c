//! Continuous Drift
//!
//! Right-hand side of the Hegselmann-Krause ODE:
//!
//!   dx_i/dt = -(1/N) Σ_{j ∈ I(i)} (x_i - x_j)
//!
//! shared by the Euler and Euler-Maruyama engines. Radical agents never move.

use serde::{Deserialize, Serialize};

use crate::neighbor::NeighborRule;
use crate::opinion::Opinion;

/// Denominator applied to the summed displacements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DriftScaling {
    /// Whole population: `n`, or `n - 1` when agents ignore themselves.
    #[default]
    Population,
    /// Size of the agent's own influence set.
    Neighborhood,
}

/// Velocity of every agent. `radicals` must be sorted ascending.
pub fn drift<O: Opinion>(
    profile: &[O],
    rule: &NeighborRule,
    scaling: DriftScaling,
    radicals: &[usize],
) -> Vec<O> {
    let n = profile.len();
    let population = if rule.include_self { n } else { n.saturating_sub(1) };

    (0..n)
        .map(|i| {
            if radicals.binary_search(&i).is_ok() {
                return O::zero();
            }
            let (sum, count) = rule.neighbors_iter(profile, i).fold(
                (O::zero(), 0usize),
                |(sum, count), j| (sum + profile[i].displacement(profile[j], rule.topology), count + 1),
            );
            if count == 0 {
                return O::zero();
            }
            let denominator = match scaling {
                DriftScaling::Population => population,
                DriftScaling::Neighborhood => count,
            };
            sum * (-1.0 / denominator as f64)
        })
        .collect()
}
