use thiserror::Error;
use vrv_compressor::CompressorError;
use vrv_core::ShapeError;
use vrv_solvers::equation::bisection;
use vrv_thermo::PropertyError;

/// Errors raised by the inference routines.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Compressor(#[from] CompressorError),

    /// Inputs of one call are not aligned element-wise.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The discharge-pressure search failed for one element.
    #[error("discharge pressure search failed at index {index}")]
    Solver {
        index: usize,
        #[source]
        source: bisection::Error,
    },

    /// The search stopped without converging.
    ///
    /// Only returned by [`PressureEstimate::require_converged`](crate::PressureEstimate::require_converged).
    #[error(
        "discharge pressure did not converge at index {index}: {pressure} kPa after {iters} iterations, residual {residual}"
    )]
    NotConverged {
        index: usize,
        pressure: f64,
        residual: f64,
        iters: usize,
    },

    /// The motor term of the surrogate is not positive at this speed ratio,
    /// so the modelled current is zero at every discharge pressure.
    #[error("no motor current at index {index}: speed ratio {speed_ratio} is outside the motor fit")]
    NoMotorCurrent { index: usize, speed_ratio: f64 },

    /// A derived quantity is not finite.
    #[error("{quantity} is not finite at index {index}")]
    NonFinite { quantity: &'static str, index: usize },

    /// Pressure bounds must satisfy `0 < lower < upper`.
    #[error("invalid pressure bracket [{lower}, {upper}] kPa")]
    InvalidBracket { lower: f64, upper: f64 },

    #[error("invalid solver config: {0}")]
    InvalidConfig(#[from] bisection::ConfigError),

    /// Lag filter time steps must be finite and non-negative.
    #[error("invalid time step: {seconds} s")]
    InvalidTimeStep { seconds: f64 },
}
