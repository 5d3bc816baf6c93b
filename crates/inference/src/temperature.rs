use vrv_compressor::{Coefficients, OperatingPoint};
use vrv_core::Shape;
use vrv_thermo::temperature_from_enthalpy;

use crate::{InferenceError, SuctionModel, discharge_enthalpy_with};

/// Predicts the discharge temperature (°C) at `point`.
///
/// The energy-balance discharge enthalpy is converted to a temperature at the
/// discharge pressure. No iteration is involved.
///
/// # Errors
///
/// Returns an error if the energy balance fails or the enthalpy does not map
/// to a real temperature.
pub fn discharge_temperature<S: Shape>(
    point: &OperatingPoint<S>,
    coefficients: &Coefficients,
) -> Result<S, InferenceError> {
    discharge_temperature_with(point, coefficients, SuctionModel::Superheated)
}

/// Like [`discharge_temperature`], with a choice of suction model.
///
/// # Errors
///
/// See [`discharge_temperature`].
pub fn discharge_temperature_with<S: Shape>(
    point: &OperatingPoint<S>,
    coefficients: &Coefficients,
    suction: SuctionModel,
) -> Result<S, InferenceError> {
    let h_dis = discharge_enthalpy_with(point, coefficients, suction)?;
    Ok(temperature_from_enthalpy(&point.discharge_pressure, &h_dis)?)
}
