use tracing::debug;
use vrv_core::{Shape, check_aligned};

use crate::{
    PropertyError,
    error::check_temperature,
    saturation::{t_sat, v_g},
};

/// Coefficients of the superheated-vapor density correlation.
///
/// Entries 0..=2 scale the linear term of the cubic in the reduced density
/// variable, entries 3..=6 the quadratic term, and entries 7..=10 the cubic
/// term, each as a polynomial in absolute temperature.
pub const SUPERHEATED_DENSITY_COEFFICIENTS: [f64; 11] = [
    0.169347786859482e-1,
    -0.391263315032514e-4,
    0.436416993794122e-7,
    0.175371690212062e1,
    -0.204274840559141e-1,
    0.393230641090647e-4,
    -0.457868739196494e-7,
    -0.120806074268803e1,
    0.655504316587795e-2,
    -0.837195897399936e-5,
    0.979938358453164e-8,
];

/// Returns the saturated-vapor density (kg/m³) at `pa` (kPa): `1 / v_g`.
///
/// # Errors
///
/// Fails if the saturation temperature cannot be computed.
pub fn saturated_vapor_density<S: Shape>(pa: &S) -> Result<S, PropertyError> {
    pa.try_map(|p| Ok(1.0 / v_g(p)?))
}

/// Returns the density (kg/m³) of superheated refrigerant vapor at pressure
/// `pa` (kPa) and temperature `t` (°C).
///
/// The correlation is a cubic in a reduced density variable whose real root is
/// taken in closed form. Where that root does not exist (the closed form
/// yields NaN) the saturated-vapor density at `pa` is used instead.
///
/// # Errors
///
/// Returns [`PropertyError::Shape`] if `pa` and `t` are not aligned, and fails
/// on invalid pressures or non-finite temperatures.
pub fn gas_density<S: Shape>(pa: &S, t: &S) -> Result<S, PropertyError> {
    gas_density_with(pa, t, &SUPERHEATED_DENSITY_COEFFICIENTS)
}

/// Like [`gas_density`], with a caller-supplied coefficient table.
///
/// # Errors
///
/// See [`gas_density`].
pub fn gas_density_with<S: Shape>(
    pa: &S,
    t: &S,
    coefficients: &[f64; 11],
) -> Result<S, PropertyError> {
    check_aligned(pa, &[t])?;
    pa.try_from_fn(|i| {
        let (p, t) = (pa.value(i), t.value(i));
        check_temperature(t)?;

        let d_sat = 1.0 / v_g(p)?;
        let density = superheated_density(t_sat(p)?, d_sat, t, coefficients);
        if density.is_nan() {
            debug!(
                index = i,
                pressure = p,
                temperature = t,
                "density correlation has no real root, using saturated vapor density"
            );
            Ok(d_sat)
        } else {
            Ok(density)
        }
    })
}

/// Closed-form real root of the density cubic, or NaN if it has none.
fn superheated_density(ts: f64, d_sat: f64, t: f64, k: &[f64; 11]) -> f64 {
    let tsf = ts + 273.15;
    let tk = t + 273.15;

    let b_of = |x: f64| cubic(x, [1.0, k[0], k[1], k[2]]);
    let c_of = |x: f64| cubic(x, [k[3], k[4], k[5], k[6]]);
    let d_of = |x: f64| cubic(x, [k[7], k[8], k[9], k[10]]);

    // Reduced density at saturation.
    let y_sat = d_sat.powf(-0.4) + 0.75;

    let a = -(b_of(tsf) / y_sat + c_of(tsf) / y_sat.powi(2) + d_of(tsf) / y_sat.powi(3));
    let b = b_of(tk);
    let c = c_of(tk);
    let d = d_of(tk);

    // Trigonometric root of a·y³ + b·y² + c·y + d = 0.
    let p = (b.powi(2) / (3.0 * a.powi(2)) - c / a) / 3.0;
    let q = d / a + 2.0 * b.powi(3) / 27.0 / a.powi(3) - b * c / 3.0 / a.powi(2);
    let y = 2.0 * p.sqrt() * ((-q / (2.0 * p.powf(1.5))).acos() / 3.0).cos() - b / (3.0 * a);

    (y - 0.75).powf(-2.5)
}

fn cubic(x: f64, k: [f64; 4]) -> f64 {
    k[0] + k[1] * x + k[2] * x.powi(2) + k[3] * x.powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn matches_reference_points() {
        for (pa, t, expected) in [
            (1000.0, 20.0, 35.01495825584858),
            (800.0, 10.0, 28.600994174497337),
            (4000.0, 90.0, 138.20886088405388),
            (1390.88, 20.54, 53.059435726843695),
        ] {
            assert_relative_eq!(
                gas_density(&pa, &t).unwrap(),
                expected,
                max_relative = 1e-10
            );
        }
    }

    #[test]
    fn falls_back_to_saturated_density() {
        for (pa, t) in [(4000.0, 40.0), (2000.0, 0.0), (3000.0, 20.0), (200.0, 100.0)] {
            let ts = t_sat(pa).unwrap();
            let d_sat = 1.0 / v_g(pa).unwrap();
            assert!(superheated_density(ts, d_sat, t, &SUPERHEATED_DENSITY_COEFFICIENTS).is_nan());
            assert_relative_eq!(gas_density(&pa, &t).unwrap(), d_sat);
        }
        assert_relative_eq!(
            gas_density(&4000.0, &40.0).unwrap(),
            219.81454876411703,
            max_relative = 1e-10
        );
    }

    #[test]
    fn fallback_applies_per_element() {
        let pa = vec![1000.0, 4000.0];
        let t = vec![20.0, 40.0];
        let density = gas_density(&pa, &t).unwrap();

        assert_relative_eq!(density[0], 35.01495825584858, max_relative = 1e-10);
        assert_relative_eq!(density[1], saturated_vapor_density(&4000.0).unwrap());
    }

    #[test]
    fn custom_coefficients_change_the_result() {
        let mut coefficients = SUPERHEATED_DENSITY_COEFFICIENTS;
        coefficients[3] *= 1.01;
        let custom = gas_density_with(&1000.0, &20.0, &coefficients).unwrap();
        let default = gas_density(&1000.0, &20.0).unwrap();
        assert!((custom - default).abs() > 1e-6);
    }
}
