use vrv_compressor::{Coefficients, CompressorModel, OperatingPoint};
use vrv_core::Shape;
use vrv_thermo::{
    gas_density, saturated_vapor_density, saturated_vapor_enthalpy, saturation_temperature,
    superheated_enthalpy,
};

use crate::InferenceError;

/// Suction superheat (K) at or below which saturated-vapor properties are used.
const SATURATED_SUCTION_SUPERHEAT: f64 = 1.0;

/// Suction superheat (K) below which the power term is scaled down.
const WET_SUCTION_SUPERHEAT: f64 = 2.0;

/// How the suction state enters the energy balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SuctionModel {
    /// Superheated-gas density and enthalpy at the measured suction
    /// temperature, whatever the superheat.
    #[default]
    Superheated,
    /// Accounts for suction gas that is barely superheated or wet.
    ///
    /// At a suction superheat of 1 K or less the saturated-vapor density and
    /// enthalpy at `Ps` replace the superheated correlations. Below 2 K the
    /// power term is scaled by `0.2·ssh + 0.6`.
    SuperheatAware,
}

impl SuctionModel {
    /// Returns `true` if saturated-vapor properties apply at `superheat` (K).
    #[must_use]
    pub fn uses_saturated_vapor(self, superheat: f64) -> bool {
        self == Self::SuperheatAware && superheat <= SATURATED_SUCTION_SUPERHEAT
    }

    /// Multiplier on `power · flow_correction` at `superheat` (K).
    #[must_use]
    pub fn power_factor(self, superheat: f64) -> f64 {
        if self == Self::SuperheatAware && superheat < WET_SUCTION_SUPERHEAT {
            0.2 * superheat + 0.6
        } else {
            1.0
        }
    }
}

/// Terms of the compressor energy balance at one or more operating points.
///
/// The discharge enthalpy is the suction enthalpy plus the shaft power,
/// scaled by the flow correction, per unit of refrigerant mass flow:
/// `h_dis = power · flow_correction / (volume · ρ_suction) + h_suction`.
/// [`SuctionModel::SuperheatAware`] additionally scales the power term by
/// [`SuctionModel::power_factor`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyBalance<S> {
    /// Volumetric flow, m³/s.
    pub volume: S,
    /// Shaft power, W.
    pub power: S,
    /// Suction temperature above saturation at `Ps`, K.
    pub suction_superheat: S,
    /// Suction gas density, kg/m³.
    pub suction_density: S,
    /// Refrigerant mass flow, kg/s.
    pub mass_flow: S,
    /// Suction enthalpy, J/kg.
    pub suction_enthalpy: S,
    /// Discharge enthalpy, J/kg.
    pub discharge_enthalpy: S,
}

/// Evaluates the compressor energy balance at `point` with superheated
/// suction gas.
///
/// # Errors
///
/// Returns an error if the operating point is misaligned or outside the
/// surrogate's domain, if a suction property cannot be evaluated, or if the
/// discharge enthalpy is not finite (for example at zero mass flow).
pub fn energy_balance<S: Shape>(
    point: &OperatingPoint<S>,
    coefficients: &Coefficients,
) -> Result<EnergyBalance<S>, InferenceError> {
    energy_balance_with(point, coefficients, SuctionModel::Superheated)
}

/// Like [`energy_balance`], with a choice of suction model.
///
/// # Errors
///
/// See [`energy_balance`].
pub fn energy_balance_with<S: Shape>(
    point: &OperatingPoint<S>,
    coefficients: &Coefficients,
    suction: SuctionModel,
) -> Result<EnergyBalance<S>, InferenceError> {
    point.check_aligned()?;
    let conditions = &point.conditions;
    let compressor = CompressorModel::new(point, coefficients)?;

    let ps = &conditions.suction_pressure;
    let st = &conditions.suction_temperature;
    let t_sat = saturation_temperature(ps)?;
    let suction_superheat = st.from_fn(|i| st.value(i) - t_sat.value(i));

    let mut suction_density = gas_density(ps, st)?;
    let mut suction_enthalpy = superheated_enthalpy(ps, st)?;
    if suction_superheat
        .elements()
        .any(|ssh| suction.uses_saturated_vapor(ssh))
    {
        let saturated_density = saturated_vapor_density(ps)?;
        let saturated_enthalpy = saturated_vapor_enthalpy(ps)?;
        let saturated = |i: usize| suction.uses_saturated_vapor(suction_superheat.value(i));
        suction_density = suction_density.from_fn(|i| {
            if saturated(i) {
                saturated_density.value(i)
            } else {
                suction_density.value(i)
            }
        });
        suction_enthalpy = suction_enthalpy.from_fn(|i| {
            if saturated(i) {
                saturated_enthalpy.value(i)
            } else {
                suction_enthalpy.value(i)
            }
        });
    }

    let volume = compressor.volume().clone();
    let power = compressor.power().clone();
    let mass_flow = volume.from_fn(|i| volume.value(i) * suction_density.value(i));

    let discharge_enthalpy = mass_flow.try_from_fn(|i| {
        let scale = conditions.flow_correction.value(i)
            * suction.power_factor(suction_superheat.value(i));
        let h = power.value(i) * scale / mass_flow.value(i) + suction_enthalpy.value(i);
        if h.is_finite() {
            Ok(h)
        } else {
            Err(InferenceError::NonFinite {
                quantity: "discharge enthalpy",
                index: i,
            })
        }
    })?;

    Ok(EnergyBalance {
        volume,
        power,
        suction_superheat,
        suction_density,
        mass_flow,
        suction_enthalpy,
        discharge_enthalpy,
    })
}

/// Discharge enthalpy (J/kg) from the compressor energy balance.
///
/// # Errors
///
/// See [`energy_balance`].
pub fn discharge_enthalpy<S: Shape>(
    point: &OperatingPoint<S>,
    coefficients: &Coefficients,
) -> Result<S, InferenceError> {
    energy_balance(point, coefficients).map(|balance| balance.discharge_enthalpy)
}

/// Like [`discharge_enthalpy`], with a choice of suction model.
///
/// # Errors
///
/// See [`energy_balance`].
pub fn discharge_enthalpy_with<S: Shape>(
    point: &OperatingPoint<S>,
    coefficients: &Coefficients,
    suction: SuctionModel,
) -> Result<S, InferenceError> {
    energy_balance_with(point, coefficients, suction).map(|balance| balance.discharge_enthalpy)
}

/// Discharge enthalpy (J/kg) of superheated gas at temperature `t_dis` (°C)
/// and discharge pressure `pd` (kPa absolute).
///
/// # Errors
///
/// Returns an error if the inputs are misaligned or the enthalpy cannot be
/// evaluated.
pub fn discharge_enthalpy_from_temperature<S: Shape>(
    t_dis: &S,
    pd: &S,
) -> Result<S, InferenceError> {
    Ok(superheated_enthalpy(pd, t_dis)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use vrv_compressor::RunConditions;

    fn point(pd: f64) -> OperatingPoint<f64> {
        OperatingPoint::new(
            pd,
            RunConditions {
                suction_pressure: 800.0,
                suction_temperature: 10.0,
                speed: 3000.0,
                rated_speed: 3600.0,
                flow_correction: 0.8,
            },
        )
    }

    #[test]
    fn balance_terms_are_consistent() {
        let balance = energy_balance(&point(3000.0), &Coefficients::DEFAULT).unwrap();

        assert_relative_eq!(balance.volume, 0.004_000_471_970_564_15, max_relative = 1e-12);
        assert_relative_eq!(balance.power, 6_165.672_052_310_285, max_relative = 1e-12);
        assert_relative_eq!(
            balance.mass_flow,
            balance.volume * balance.suction_density,
            max_relative = 1e-15
        );
        assert_relative_eq!(
            balance.discharge_enthalpy,
            balance.power * 0.8 / balance.mass_flow + balance.suction_enthalpy,
            max_relative = 1e-12
        );
    }

    #[test]
    fn discharge_enthalpy_golden_value() {
        let h = discharge_enthalpy(&point(3000.0), &Coefficients::DEFAULT).unwrap();
        assert_relative_eq!(h, 333_487.142_807_914_76, max_relative = 1e-9);
    }

    #[test]
    fn sequence_matches_scalar() {
        let pds = [1500.0, 2200.0, 3000.0];
        let sequence = OperatingPoint::new(
            pds.to_vec(),
            RunConditions {
                suction_pressure: vec![800.0; 3],
                suction_temperature: vec![10.0; 3],
                speed: vec![3000.0; 3],
                rated_speed: vec![3600.0; 3],
                flow_correction: vec![0.8; 3],
            },
        );

        let h = discharge_enthalpy(&sequence, &Coefficients::DEFAULT).unwrap();
        for (i, pd) in pds.into_iter().enumerate() {
            let scalar = discharge_enthalpy(&point(pd), &Coefficients::DEFAULT).unwrap();
            assert_relative_eq!(h[i], scalar);
        }
    }

    /// Operating point at 800 kPa suction with `superheat` K above saturation.
    fn point_with_superheat(pd: f64, superheat: f64) -> OperatingPoint<f64> {
        let t_sat = saturation_temperature(&800.0).unwrap();
        OperatingPoint::new(
            pd,
            RunConditions {
                suction_temperature: t_sat + superheat,
                ..point(pd).conditions
            },
        )
    }

    #[test]
    fn power_factor_and_saturated_threshold() {
        let aware = SuctionModel::SuperheatAware;
        let cases = [
            (-1.0, 0.4),
            (0.0, 0.6),
            (1.0, 0.8),
            (1.5, 0.9),
            (2.0, 1.0),
            (8.0, 1.0),
        ];
        for (superheat, factor) in cases {
            assert_relative_eq!(aware.power_factor(superheat), factor, epsilon = 1e-12);
            assert_relative_eq!(SuctionModel::Superheated.power_factor(superheat), 1.0);
        }

        assert!(aware.uses_saturated_vapor(1.0));
        assert!(!aware.uses_saturated_vapor(1.001));
        assert!(!SuctionModel::Superheated.uses_saturated_vapor(-5.0));
    }

    #[test]
    fn near_saturated_suction_uses_saturated_vapor() {
        let point = point_with_superheat(3000.0, 0.5);
        let balance =
            energy_balance_with(&point, &Coefficients::DEFAULT, SuctionModel::SuperheatAware)
                .unwrap();

        assert_relative_eq!(balance.suction_superheat, 0.5, epsilon = 1e-9);
        assert_relative_eq!(
            balance.suction_density,
            saturated_vapor_density(&800.0).unwrap()
        );
        assert_relative_eq!(
            balance.suction_enthalpy,
            saturated_vapor_enthalpy(&800.0).unwrap()
        );
        assert_relative_eq!(
            balance.discharge_enthalpy,
            balance.power * 0.8 * 0.7 / balance.mass_flow + balance.suction_enthalpy,
            max_relative = 1e-12
        );
    }

    #[test]
    fn wet_suction_scales_power_term() {
        let point = point_with_superheat(3000.0, 1.5);
        let plain = energy_balance(&point, &Coefficients::DEFAULT).unwrap();
        let aware =
            energy_balance_with(&point, &Coefficients::DEFAULT, SuctionModel::SuperheatAware)
                .unwrap();

        // Above 1 K the superheated correlations still apply.
        assert_relative_eq!(aware.suction_density, plain.suction_density);
        assert_relative_eq!(aware.suction_enthalpy, plain.suction_enthalpy);
        assert_relative_eq!(
            aware.discharge_enthalpy - aware.suction_enthalpy,
            0.9 * (plain.discharge_enthalpy - plain.suction_enthalpy),
            max_relative = 1e-9
        );
    }

    #[test]
    fn dry_suction_matches_superheated_model() {
        let point = point_with_superheat(3000.0, 5.0);
        let plain = energy_balance(&point, &Coefficients::DEFAULT).unwrap();
        let aware =
            energy_balance_with(&point, &Coefficients::DEFAULT, SuctionModel::SuperheatAware)
                .unwrap();
        assert_eq!(aware, plain);
    }

    #[test]
    fn suction_model_applies_per_element() {
        let superheats = [0.5, 1.5, 5.0];
        let t_sat = saturation_temperature(&800.0).unwrap();
        let sequence = OperatingPoint::new(
            vec![3000.0; 3],
            RunConditions {
                suction_pressure: vec![800.0; 3],
                suction_temperature: superheats.iter().map(|ssh| t_sat + ssh).collect(),
                speed: vec![3000.0; 3],
                rated_speed: vec![3600.0; 3],
                flow_correction: vec![0.8; 3],
            },
        );

        let h = discharge_enthalpy_with(
            &sequence,
            &Coefficients::DEFAULT,
            SuctionModel::SuperheatAware,
        )
        .unwrap();
        for (i, superheat) in superheats.into_iter().enumerate() {
            let scalar = discharge_enthalpy_with(
                &point_with_superheat(3000.0, superheat),
                &Coefficients::DEFAULT,
                SuctionModel::SuperheatAware,
            )
            .unwrap();
            assert_relative_eq!(h[i], scalar);
        }
    }

    #[test]
    fn misaligned_point_is_rejected() {
        let point = OperatingPoint::new(
            vec![3000.0, 2500.0],
            RunConditions {
                suction_pressure: vec![800.0; 2],
                suction_temperature: vec![10.0],
                speed: vec![3000.0; 2],
                rated_speed: vec![3600.0; 2],
                flow_correction: vec![0.8; 2],
            },
        );
        assert!(matches!(
            energy_balance(&point, &Coefficients::DEFAULT),
            Err(InferenceError::Shape(_))
        ));
    }
}
