use thiserror::Error;
use vrv_core::ShapeError;

/// Errors raised when building a [`CompressorModel`](crate::CompressorModel).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompressorError {
    /// An operating-point value is outside the model's domain.
    #[error("invalid {quantity} at index {index}: {value}")]
    InvalidInput {
        quantity: &'static str,
        index: usize,
        value: f64,
    },

    /// A derived quantity is not finite.
    #[error("{quantity} is not finite at index {index}")]
    NonFinite { quantity: &'static str, index: usize },

    /// A coefficient list has the wrong length.
    #[error("expected {expected} coefficients, found {found}")]
    CoefficientCount { expected: usize, found: usize },

    /// Operating-point values are not aligned element-wise.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}
