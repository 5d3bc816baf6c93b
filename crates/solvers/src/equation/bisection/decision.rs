use super::{Action, Error, Sign};

/// How the solver proceeds after one evaluation.
#[derive(Debug)]
pub(crate) enum Decision {
    /// Shrink the bracket as if the residual had this sign; `None` for an
    /// exact zero.
    Continue(Option<Sign>),
    StopEarly,
    Error(Error),
}

impl Decision {
    /// Observer actions take precedence. Without one, a usable residual gives
    /// the sign and a failed evaluation ends the solve.
    pub(crate) fn new(action: Option<Action>, residual: Result<f64, Error>) -> Self {
        match (action, residual) {
            (Some(Action::StopEarly), _) => Self::StopEarly,
            (Some(Action::AssumeResidualSign(sign)), _) => Self::Continue(Some(sign)),
            (None, Ok(residual)) => Self::Continue(Sign::of(residual)),
            (None, Err(error)) => Self::Error(error),
        }
    }
}
