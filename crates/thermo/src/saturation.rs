use vrv_core::Shape;

use crate::PropertyError;

/// Returns the saturation temperature (°C) at absolute pressure `pa` (kPa).
///
/// `t_sat = -2107.935 / (ln(1000·pa) - 21.8205) - 256.2377`
///
/// The correlation increases monotonically with pressure over the physical
/// range. It has a pole at `pa = e^21.8205 / 1000 ≈ 3.0e6 kPa`, far above any
/// compressor pressure.
///
/// # Errors
///
/// Returns [`PropertyError::InvalidInput`] if any pressure is non-finite or not
/// positive, and [`PropertyError::Calculation`] if the result is not finite.
pub fn saturation_temperature<S: Shape>(pa: &S) -> Result<S, PropertyError> {
    pa.try_map(t_sat)
}

/// Returns the saturated-vapor specific volume (m³/kg) at `pa` (kPa).
///
/// # Errors
///
/// See [`saturation_temperature`].
pub fn saturated_vapor_specific_volume<S: Shape>(pa: &S) -> Result<S, PropertyError> {
    pa.try_map(v_g)
}

pub(crate) fn t_sat(pa: f64) -> Result<f64, PropertyError> {
    if !pa.is_finite() || pa <= 0.0 {
        return Err(PropertyError::InvalidInput(format!(
            "pressure must be finite and positive, got {pa} kPa"
        )));
    }

    let t = -2107.935 / ((pa * 1000.0).ln() - 21.8205) - 256.2377;
    if t.is_finite() {
        Ok(t)
    } else {
        Err(PropertyError::Calculation(format!(
            "saturation temperature is not finite at {pa} kPa"
        )))
    }
}

pub(crate) fn v_g(pa: f64) -> Result<f64, PropertyError> {
    let ts = t_sat(pa)?;
    let v = (-11.93809 + 1873.567 / (ts + 273.15)).exp()
        * (5.24253 - 369.32461e-4 * ts + 111.95294e-6 * ts.powi(2) - 31.84587e-7 * ts.powi(3));
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn saturation_temperature_matches_reference_points() {
        assert_relative_eq!(t_sat(4000.0).unwrap(), 62.24426271769073, epsilon = 1e-10);
        assert_relative_eq!(t_sat(1000.0).unwrap(), 7.089942748762553, epsilon = 1e-10);
        assert_relative_eq!(t_sat(100.0).unwrap(), -51.73420668677784, epsilon = 1e-10);
    }

    #[test]
    fn sequence_matches_scalar() {
        let pa = array![100.0, 1000.0, 4000.0];
        let ts = saturation_temperature(&pa).unwrap();
        for (p, t) in pa.iter().zip(ts.iter()) {
            assert_relative_eq!(*t, t_sat(*p).unwrap());
        }
    }

    #[test]
    fn rejects_non_positive_pressure() {
        for pa in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(t_sat(pa), Err(PropertyError::InvalidInput(_))));
        }
        assert!(saturation_temperature(&vec![1000.0, -1.0]).is_err());
    }

    #[test]
    fn saturated_volume_matches_reference_point() {
        let v = saturated_vapor_specific_volume(&1000.0).unwrap();
        assert_relative_eq!(v, 0.02609425262036033, max_relative = 1e-12);
    }
}
