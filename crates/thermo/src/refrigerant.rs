use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, Pressure, SpecificVolume, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    pressure::kilopascal,
    specific_volume::cubic_meter_per_kilogram,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    PropertyError, density, enthalpy,
    saturation::{t_sat, v_g},
    units::SpecificEnthalpy,
};

/// Marker type for R410A with unit-checked scalar property methods.
///
/// Each method converts to the correlation units (kPa, °C, J/kg), evaluates
/// the same correlation as the shape-generic functions, and converts back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct R410a;

impl R410a {
    /// Saturation temperature at `pressure`.
    ///
    /// # Errors
    ///
    /// See [`saturation_temperature`](crate::saturation_temperature).
    pub fn saturation_temperature(
        self,
        pressure: Pressure,
    ) -> Result<ThermodynamicTemperature, PropertyError> {
        let t = t_sat(pressure.get::<kilopascal>())?;
        Ok(ThermodynamicTemperature::new::<degree_celsius>(t))
    }

    /// Saturated-vapor specific volume at `pressure`.
    ///
    /// # Errors
    ///
    /// See [`saturated_vapor_specific_volume`](crate::saturated_vapor_specific_volume).
    pub fn saturated_vapor_specific_volume(
        self,
        pressure: Pressure,
    ) -> Result<SpecificVolume, PropertyError> {
        let v = v_g(pressure.get::<kilopascal>())?;
        Ok(SpecificVolume::new::<cubic_meter_per_kilogram>(v))
    }

    /// Saturated-vapor density at `pressure`.
    ///
    /// # Errors
    ///
    /// See [`saturated_vapor_density`](crate::saturated_vapor_density).
    pub fn saturated_vapor_density(self, pressure: Pressure) -> Result<MassDensity, PropertyError> {
        let d = density::saturated_vapor_density(&pressure.get::<kilopascal>())?;
        Ok(MassDensity::new::<kilogram_per_cubic_meter>(d))
    }

    /// Saturated-vapor specific enthalpy at `pressure`.
    ///
    /// # Errors
    ///
    /// See [`saturated_vapor_enthalpy`](crate::saturated_vapor_enthalpy).
    pub fn saturated_vapor_enthalpy(
        self,
        pressure: Pressure,
    ) -> Result<SpecificEnthalpy, PropertyError> {
        let h = enthalpy::h_sg(pressure.get::<kilopascal>())?;
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(h))
    }

    /// Specific enthalpy at `pressure` and `temperature`.
    ///
    /// # Errors
    ///
    /// See [`superheated_enthalpy`](crate::superheated_enthalpy).
    pub fn enthalpy(
        self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<SpecificEnthalpy, PropertyError> {
        let h = enthalpy::h_sh(
            pressure.get::<kilopascal>(),
            temperature.get::<degree_celsius>(),
        )?;
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(h))
    }

    /// Temperature at `pressure` with specific enthalpy `h`.
    ///
    /// # Errors
    ///
    /// See [`temperature_from_enthalpy`](crate::temperature_from_enthalpy).
    pub fn temperature(
        self,
        pressure: Pressure,
        h: SpecificEnthalpy,
    ) -> Result<ThermodynamicTemperature, PropertyError> {
        let t = enthalpy::t_from_h(pressure.get::<kilopascal>(), h.get::<joule_per_kilogram>())?;
        Ok(ThermodynamicTemperature::new::<degree_celsius>(t))
    }

    /// Superheated-vapor density at `pressure` and `temperature`.
    ///
    /// # Errors
    ///
    /// See [`gas_density`](crate::gas_density).
    pub fn density(
        self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<MassDensity, PropertyError> {
        let d = density::gas_density(
            &pressure.get::<kilopascal>(),
            &temperature.get::<degree_celsius>(),
        )?;
        Ok(MassDensity::new::<kilogram_per_cubic_meter>(d))
    }
}
