//! Run Loop
//!
//! The termination machine every engine shares: step from the current
//! profile, accept the step unless it settled or the cap was hit, and keep
//! what the result mode asks for.

use hk_types::{Norm, ResultMode, RunOutput, RunReport, Termination, Topology};
use tracing::{debug, trace, warn};

use crate::opinion::Opinion;

/// Largest distance any single agent moved between two profiles. NaN if
/// any single change is NaN.
pub fn max_change<O: Opinion>(before: &[O], after: &[O], norm: Norm) -> f64 {
    before
        .iter()
        .zip(after)
        .map(|(a, b)| a.distance(*b, norm, Topology::Bounded))
        .fold(0.0, |acc: f64, d| if d.is_nan() { d } else { acc.max(d) })
}

/// Settings of one run loop.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LoopSettings {
    pub tolerance: f64,
    /// `None` lifts the cap.
    pub max_steps: Option<usize>,
    pub norm: Norm,
    pub mode: ResultMode,
}

/// Steps `initial` until the change of a step is within tolerance or the cap
/// is exceeded. The step that triggers termination is discarded.
pub(crate) fn drive<O, F>(
    engine: &'static str,
    initial: Vec<O>,
    settings: LoopSettings,
    radical_indices: Vec<usize>,
    mut step: F,
) -> RunReport<O>
where
    O: Opinion,
    F: FnMut(&[O]) -> Vec<O>,
{
    let agents = initial.len();
    let mut trajectory = Vec::new();
    if settings.mode == ResultMode::Full {
        trajectory.push(initial.clone());
    }

    let mut current = initial;
    let mut steps = 0usize;

    let termination = loop {
        let next = step(&current);
        if !next.iter().all(|o| o.is_finite()) {
            break Termination::Diverged;
        }
        let change = max_change(&current, &next, settings.norm);
        trace!(engine, step = steps + 1, change, "evaluated step");

        if change <= settings.tolerance {
            break Termination::Converged;
        }
        if settings.max_steps.is_some_and(|cap| steps + 1 > cap) {
            break Termination::StepCap;
        }

        current = next;
        steps += 1;
        if settings.mode == ResultMode::Full {
            trajectory.push(current.clone());
        }
    };

    match termination {
        Termination::Converged => debug!(engine, agents, steps, "run converged"),
        Termination::StepCap => warn!(
            engine,
            agents,
            steps,
            tolerance = settings.tolerance,
            "run truncated by step cap"
        ),
        Termination::Diverged => {
            warn!(engine, agents, steps, "run diverged to a non-finite profile")
        }
    }

    let output = match settings.mode {
        ResultMode::Full => RunOutput::Trajectory(trajectory),
        ResultMode::Terminal => RunOutput::Terminal(current),
    };

    RunReport {
        output,
        steps,
        termination,
        radical_indices,
    }
}
