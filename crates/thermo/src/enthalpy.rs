use vrv_core::{Shape, check_aligned};

use crate::{
    PropertyError,
    error::check_temperature,
    saturation::t_sat,
};

// Superheat correction polynomial in `dt = t - t_sat`:
// h / h_sg = 1 + K1·dt + K2·dt² + K3·dt·ts + K4·dt²·ts + K5·dt·ts² + K6·dt²·ts²
const K1: f64 = 3.3247e-3;
const K2: f64 = 3.62592e-7;
const K3: f64 = 30.40633e-6;
const K4: f64 = -18.47693e-8;
const K5: f64 = 76.64206e-8;
const K6: f64 = -60.2765e-10;

/// Returns the saturated-vapor specific enthalpy (J/kg) at `pa` (kPa).
///
/// `h_sg = 280998.3 + 332.614·ts - 4.699265·ts² - 51.2569e-3·ts³`
///
/// # Errors
///
/// Fails if the saturation temperature cannot be computed.
pub fn saturated_vapor_enthalpy<S: Shape>(pa: &S) -> Result<S, PropertyError> {
    pa.try_map(h_sg)
}

/// Returns the specific enthalpy (J/kg) of superheated or subcooled refrigerant
/// at pressure `pa` (kPa) and temperature `t` (°C).
///
/// # Errors
///
/// Returns [`PropertyError::Shape`] if `pa` and `t` are not aligned, and fails
/// on invalid pressures or non-finite temperatures.
pub fn superheated_enthalpy<S: Shape>(pa: &S, t: &S) -> Result<S, PropertyError> {
    check_aligned(pa, &[t])?;
    pa.try_from_fn(|i| h_sh(pa.value(i), t.value(i)))
}

/// Inverts [`superheated_enthalpy`]: returns the temperature (°C) at which
/// refrigerant at pressure `pa` (kPa) has specific enthalpy `h` (J/kg).
///
/// The correction polynomial is quadratic in temperature; the root taken is
/// `(-b + √(b² - 4ac)) / 2a`, evaluated as `2c / (-b - √(b² - 4ac))` so that it
/// stays accurate where `a` vanishes.
///
/// # Errors
///
/// Returns [`PropertyError::Undefined`] where the quadratic has no real root,
/// and [`PropertyError::Shape`] if `pa` and `h` are not aligned.
pub fn temperature_from_enthalpy<S: Shape>(pa: &S, h: &S) -> Result<S, PropertyError> {
    check_aligned(pa, &[h])?;
    pa.try_from_fn(|i| t_from_h(pa.value(i), h.value(i)))
}

pub(crate) fn h_sg(pa: f64) -> Result<f64, PropertyError> {
    let ts = t_sat(pa)?;
    Ok(280998.3 + 332.614 * ts - 4.699265 * ts.powi(2) - 51.2569e-3 * ts.powi(3))
}

pub(crate) fn h_sh(pa: f64, t: f64) -> Result<f64, PropertyError> {
    check_temperature(t)?;
    let ts = t_sat(pa)?;
    let dt = t - ts;
    let ratio = 1.0
        + K1 * dt
        + K2 * dt.powi(2)
        + K3 * dt * ts
        + K4 * dt.powi(2) * ts
        + K5 * dt * ts.powi(2)
        + K6 * dt.powi(2) * ts.powi(2);
    Ok(ratio * h_sg(pa)?)
}

pub(crate) fn t_from_h(pa: f64, h: f64) -> Result<f64, PropertyError> {
    if !h.is_finite() {
        return Err(PropertyError::InvalidInput(format!(
            "enthalpy must be finite, got {h} J/kg"
        )));
    }
    let ts = t_sat(pa)?;

    // Quadratic in dt: a·dt² + b·dt + c = 0.
    let a = K2 + K4 * ts + K6 * ts.powi(2);
    let b = K1 + K3 * ts + K5 * ts.powi(2);
    let c = 1.0 - h / h_sg(pa)?;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Err(PropertyError::Undefined {
            property: "temperature",
            context: Some(format!("no real root for h = {h} J/kg at {pa} kPa")),
        });
    }

    let t = ts + 2.0 * c / (-b - discriminant.sqrt());
    if t.is_finite() {
        Ok(t)
    } else {
        Err(PropertyError::Calculation(format!(
            "temperature is not finite for h = {h} J/kg at {pa} kPa"
        )))
    }
}
