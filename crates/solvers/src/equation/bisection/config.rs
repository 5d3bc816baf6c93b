use thiserror::Error;

use super::Sign;

/// Direction in which the residual changes across the bracket.
///
/// A known slope lets the solver skip the endpoint evaluations: the residual
/// signs at the ends are implied. `Detect` evaluates both endpoints first and
/// requires a sign change between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slope {
    /// Residual increases with `x`: negative at the left end, positive at the right.
    Increasing,
    /// Residual decreases with `x`: positive at the left end, negative at the right.
    Decreasing,
    /// Residual signs are found by evaluating both endpoints.
    #[default]
    Detect,
}

impl Slope {
    /// Returns the implied `(left, right)` residual signs, if the slope is known.
    #[must_use]
    pub fn endpoint_signs(self) -> Option<(Sign, Sign)> {
        match self {
            Slope::Increasing => Some((Sign::Negative, Sign::Positive)),
            Slope::Decreasing => Some((Sign::Positive, Sign::Negative)),
            Slope::Detect => None,
        }
    }
}

/// Errors reported by [`Config::validate`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_iters must be at least 1")]
    ZeroMaxIters,
    #[error("{name} must be finite and non-negative")]
    InvalidTolerance { name: &'static str },
}

/// Configuration for the bisection solver.
///
/// The solver reports convergence when the midpoint residual magnitude is
/// strictly below `residual_tol`, or when the bracket width falls within
/// `x_abs_tol + x_rel_tol * |midpoint|`. Set both x tolerances to zero to stop
/// on the residual alone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub max_iters: usize,
    pub x_abs_tol: f64,
    pub x_rel_tol: f64,
    pub residual_tol: f64,
    pub slope: Slope,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
            residual_tol: 1e-12,
            slope: Slope::Detect,
        }
    }
}

impl Config {
    /// Validates that at least one iteration is allowed and that all
    /// tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iters == 0 {
            return Err(ConfigError::ZeroMaxIters);
        }
        for (name, value) in [
            ("x_abs_tol", self.x_abs_tol),
            ("x_rel_tol", self.x_rel_tol),
            ("residual_tol", self.residual_tol),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTolerance { name });
            }
        }
        Ok(())
    }
}
