//! Virtual sensors for a VRV compressor.
//!
//! Given suction-side measurements and compressor speed, this crate predicts
//! the discharge temperature from an energy balance over the compressor
//! surrogate, and inverts the same balance (or the motor current) to recover
//! the discharge pressure.
//!
//! - [`discharge_temperature`]: forward prediction, no iteration
//! - [`discharge_pressure`]: bisection on discharge pressure from a measured
//!   discharge temperature
//! - [`discharge_pressure_from_current`]: bisection on discharge pressure
//!   from a measured motor current
//! - [`DischargeTemperatureLag`]: first-order lag matching the prediction to
//!   a slow discharge-line sensor
//!
//! The `_with` variants take a [`SuctionModel`] that switches to saturated
//! suction properties and a reduced power term when the suction gas is barely
//! superheated.
//!
//! Every routine is generic over [`Shape`](vrv_core::Shape) and preserves the
//! layout of its inputs. Pressures are kPa absolute, temperatures °C.

mod enthalpy;
mod error;
mod lag;
mod pressure;
mod temperature;

pub use enthalpy::{
    EnergyBalance, SuctionModel, discharge_enthalpy, discharge_enthalpy_from_temperature,
    discharge_enthalpy_with, energy_balance, energy_balance_with,
};
pub use error::InferenceError;
pub use lag::{DischargeTemperatureLag, LagPhase};
pub use pressure::{
    PressureEstimate, PressureOutcome, PressureSearch, discharge_pressure,
    discharge_pressure_from_current, discharge_pressure_with,
};
pub use temperature::{discharge_temperature, discharge_temperature_with};
pub use vrv_thermo::gas_density;
