//! R410A refrigerant property correlations.
//!
//! Every function takes pressures in kPa (absolute) and temperatures in °C and
//! is generic over [`Shape`]: pass an `f64`, a `Vec<f64>`, an `Array1<f64>`,
//! or a [`Labeled`] sequence and get the same shape back. Inputs of one call
//! must be aligned element-wise.
//!
//! [`R410a`] offers the same correlations as scalar methods on `uom`
//! quantities.
//!
//! [`Shape`]: vrv_core::Shape
//! [`Labeled`]: vrv_core::Labeled

mod density;
mod enthalpy;
mod error;
mod gauge;
mod refrigerant;
mod saturation;

pub mod units;

pub use density::{
    SUPERHEATED_DENSITY_COEFFICIENTS, gas_density, gas_density_with, saturated_vapor_density,
};
pub use enthalpy::{saturated_vapor_enthalpy, superheated_enthalpy, temperature_from_enthalpy};
pub use error::PropertyError;
pub use gauge::{ATMOSPHERIC_PRESSURE_KPA, absolute_from_gauge, gauge_from_absolute};
pub use refrigerant::R410a;
pub use saturation::{saturated_vapor_specific_volume, saturation_temperature};
