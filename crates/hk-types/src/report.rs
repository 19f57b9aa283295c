//! Run Output
//!
//! What an engine hands back after a run: the profiles it kept, how many
//! steps it accepted, and why it stopped.

use serde::{Deserialize, Serialize};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The largest per-agent change of a step fell to the tolerance.
    Converged,
    /// The step cap was reached first.
    StepCap,
    /// A step produced a non-finite opinion. That step is discarded.
    Diverged,
}

/// Profiles kept by a run, shaped by the requested result mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "profiles", rename_all = "snake_case")]
pub enum RunOutput<O> {
    /// Initial profile followed by every accepted step.
    Trajectory(Vec<Vec<O>>),
    /// Last accepted profile only.
    Terminal(Vec<O>),
}

impl<O> RunOutput<O> {
    /// The last accepted profile.
    pub fn final_profile(&self) -> &[O] {
        match self {
            // A trajectory always holds at least the initial profile
            RunOutput::Trajectory(profiles) => profiles.last().map(Vec::as_slice).unwrap_or(&[]),
            RunOutput::Terminal(profile) => profile,
        }
    }

    pub fn into_final_profile(self) -> Vec<O> {
        match self {
            RunOutput::Trajectory(mut profiles) => profiles.pop().unwrap_or_default(),
            RunOutput::Terminal(profile) => profile,
        }
    }

    pub fn trajectory(&self) -> Option<&[Vec<O>]> {
        match self {
            RunOutput::Trajectory(profiles) => Some(profiles),
            RunOutput::Terminal(_) => None,
        }
    }
}

/// Result of a single engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport<O> {
    pub output: RunOutput<O>,
    /// Accepted steps. A full trajectory holds `steps + 1` profiles.
    pub steps: usize,
    pub termination: Termination,
    /// Indices of fixed agents in the merged profile, ascending.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub radical_indices: Vec<usize>,
}

impl<O> RunReport<O> {
    pub fn final_profile(&self) -> &[O] {
        self.output.final_profile()
    }

    pub fn trajectory(&self) -> Option<&[Vec<O>]> {
        self.output.trajectory()
    }

    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}
