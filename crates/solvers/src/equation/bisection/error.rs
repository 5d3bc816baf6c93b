use std::error::Error as StdError;

use thiserror::Error;

use crate::equation::EvalError;

use super::{bracket::BracketError, config::ConfigError};

type BoxedError = Box<dyn StdError + Send + Sync>;

/// Errors that end a bisection solve.
///
/// Failed evaluations only surface here when the observer did not override
/// their residual sign.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid bracket: {0}")]
    InvalidBracket(#[from] BracketError),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Every evaluation failed or was overridden before the solver stopped.
    #[error("no successful evaluations")]
    NoSuccessfulEvaluation,

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },

    /// Mapping `x` to a model input, or computing the residual, failed.
    #[error("problem error at x = {x}")]
    Problem {
        x: f64,
        #[source]
        source: BoxedError,
    },

    #[error("model call failed at x = {x}")]
    Model {
        x: f64,
        #[source]
        source: BoxedError,
    },
}

impl Error {
    /// Tags a failed evaluation at `x`.
    pub(super) fn evaluation<ME, PE>(x: f64, error: EvalError<ME, PE>) -> Self
    where
        ME: StdError + Send + Sync + 'static,
        PE: StdError + Send + Sync + 'static,
    {
        match error {
            EvalError::Model(source) => Self::Model {
                x,
                source: Box::new(source),
            },
            EvalError::Problem(source) => Self::Problem {
                x,
                source: Box::new(source),
            },
        }
    }
}
