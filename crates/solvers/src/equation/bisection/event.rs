use vrv_core::{EquationProblem, Model};

use crate::equation::EvaluateResult;

use super::Bracket;

/// Event emitted by the bisection solver for each evaluation.
///
/// Endpoint events only occur when the residual slope is detected.
pub enum Event<'a, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    /// Left bracket endpoint evaluation.
    Left {
        x: f64,
        result: &'a EvaluateResult<M, P, 1>,
    },
    /// Right bracket endpoint evaluation.
    Right {
        x: f64,
        result: &'a EvaluateResult<M, P, 1>,
    },
    /// Midpoint evaluation.
    Midpoint {
        /// 1-based iteration number.
        iter: usize,
        x: f64,
        /// Bracket before it is shrunk around this midpoint.
        bracket: &'a Bracket,
        result: &'a EvaluateResult<M, P, 1>,
    },
}

impl<'a, M, P> Event<'a, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    /// Returns the evaluated x value.
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Event::Left { x, .. } | Event::Right { x, .. } | Event::Midpoint { x, .. } => *x,
        }
    }

    /// Returns the evaluation result.
    pub fn result(&self) -> &'a EvaluateResult<M, P, 1> {
        match self {
            Event::Left { result, .. }
            | Event::Right { result, .. }
            | Event::Midpoint { result, .. } => result,
        }
    }

    /// Returns the residual, if the evaluation succeeded.
    #[must_use]
    pub fn residual(&self) -> Option<f64> {
        self.result().as_ref().ok().map(|eval| eval.residuals[0])
    }
}
