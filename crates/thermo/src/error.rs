use thiserror::Error;
use vrv_core::ShapeError;

/// Errors that may occur when evaluating refrigerant properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The input values are outside the correlation's valid domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The calculation produced a non-finite value.
    #[error("calculation error: {0}")]
    Calculation(String),

    /// The property has no real value at the given state.
    #[error("property `{property}` is undefined at the given state")]
    Undefined {
        property: &'static str,
        context: Option<String>,
    },

    /// Inputs of one call are not aligned element-wise.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Rejects a non-finite temperature input.
pub(crate) fn check_temperature(t: f64) -> Result<(), PropertyError> {
    if t.is_finite() {
        Ok(())
    } else {
        Err(PropertyError::InvalidInput(format!(
            "temperature must be finite, got {t} °C"
        )))
    }
}
