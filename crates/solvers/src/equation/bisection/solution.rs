use vrv_core::Snapshot;

use crate::equation::Evaluation;

/// Indicates whether the solver converged or why it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Converged according to the configured tolerances.
    Converged,
    /// Used the whole iteration budget without converging. The solution holds
    /// the last midpoint that evaluated successfully.
    MaxIters,
    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a bisection solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// Final solver status.
    pub status: Status,
    /// Root estimate: the last successfully evaluated point.
    pub x: f64,
    /// Residual at `x`.
    pub residual: f64,
    /// Model input and output at `x`.
    pub snapshot: Snapshot<I, O>,
    /// Number of midpoint evaluations performed.
    pub iters: usize,
}

impl<I, O> Solution<I, O> {
    /// Returns `true` if the solver converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }

    pub(super) fn from_eval(eval: Evaluation<I, O, 1>, status: Status, iters: usize) -> Self {
        Self {
            status,
            x: eval.x[0],
            residual: eval.residuals[0],
            snapshot: eval.snapshot,
            iters,
        }
    }
}
