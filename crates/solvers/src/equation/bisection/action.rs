use super::bracket::Sign;

/// What an observer asks the bisection solver to do after an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop now and return the last evaluation the solver kept.
    StopEarly,

    /// Move the bracket as if the residual had this sign, and discard the
    /// evaluation.
    ///
    /// Lets an observer step past points where the model fails or the
    /// residual is not finite.
    AssumeResidualSign(Sign),
}

impl Action {
    #[must_use]
    pub fn assume_positive() -> Self {
        Self::AssumeResidualSign(Sign::Positive)
    }

    #[must_use]
    pub fn assume_negative() -> Self {
        Self::AssumeResidualSign(Sign::Negative)
    }
}

impl From<Sign> for Action {
    fn from(sign: Sign) -> Self {
        Self::AssumeResidualSign(sign)
    }
}
