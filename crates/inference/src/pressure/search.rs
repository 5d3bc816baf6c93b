use vrv_solvers::equation::bisection::{Config, Slope};

use crate::InferenceError;

/// Pressure bracket and bisection settings for a discharge-pressure search.
///
/// The bracket is `[lower, upper]` in kPa absolute. Construct with
/// [`PressureSearch::new`] or start from one of the presets and adjust the
/// public fields; the search functions validate before solving.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureSearch {
    pub bracket: [f64; 2],
    pub solver: Config,
}

impl PressureSearch {
    /// Creates validated search settings.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::InvalidBracket`] unless
    /// `0 < lower < upper` with both finite, or
    /// [`InferenceError::InvalidConfig`] if `solver` is invalid.
    pub fn new(bracket: [f64; 2], solver: Config) -> Result<Self, InferenceError> {
        let search = Self { bracket, solver };
        search.validate()?;
        Ok(search)
    }

    /// Search from discharge temperature: 100 to 4000 kPa, 20 iterations,
    /// stop when the enthalpy residual is below 0.1 J/kg.
    #[must_use]
    pub fn temperature_default() -> Self {
        Self {
            bracket: [100.0, 4000.0],
            solver: residual_only(0.1, Slope::Decreasing),
        }
    }

    /// Search from motor current: 100 to 4300 kPa, 20 iterations, stop when
    /// the current residual is below 0.001 A.
    #[must_use]
    pub fn current_default() -> Self {
        Self {
            bracket: [100.0, 4300.0],
            solver: residual_only(0.001, Slope::Increasing),
        }
    }

    /// Checks the bracket and solver settings.
    ///
    /// # Errors
    ///
    /// See [`PressureSearch::new`].
    pub fn validate(&self) -> Result<(), InferenceError> {
        let [lower, upper] = self.bracket;
        if !(lower.is_finite() && upper.is_finite() && 0.0 < lower && lower < upper) {
            return Err(InferenceError::InvalidBracket { lower, upper });
        }
        self.solver.validate()?;
        Ok(())
    }
}

fn residual_only(residual_tol: f64, slope: Slope) -> Config {
    Config {
        max_iters: 20,
        x_abs_tol: 0.0,
        x_rel_tol: 0.0,
        residual_tol,
        slope,
    }
}
