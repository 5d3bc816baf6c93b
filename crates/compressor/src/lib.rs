//! Polynomial surrogate model of a variable-speed VRV compressor.
//!
//! A [`CompressorModel`] is built from an [`OperatingPoint`] and a set of 32
//! [`Coefficients`]. Construction derives the speed-dependent
//! [`IntermediateCoefficients`], the volumetric flow, and the shaft power once;
//! the accessors return the cached values.
//!
//! All quantities share one [`Shape`](vrv_core::Shape): a scalar operating
//! point gives scalar results, a sequence of operating points gives sequences.

mod coefficients;
mod error;
mod model;
mod operating_point;

pub use coefficients::{COEFFICIENT_COUNT, Coefficients, IntermediateCoefficients};
pub use error::CompressorError;
pub use model::{CompressorModel, DISPLACEMENT_SCALE};
pub use operating_point::{OperatingPoint, RunConditions};
