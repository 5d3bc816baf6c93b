use vrv_core::{Shape, ShapeError, check_aligned};

/// Measured compressor conditions other than discharge pressure.
///
/// These are the knowns when discharge pressure is inferred.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConditions<S> {
    /// Suction pressure, kPa absolute.
    pub suction_pressure: S,
    /// Suction temperature, °C.
    pub suction_temperature: S,
    /// Compressor speed, rpm.
    pub speed: S,
    /// Rated compressor speed, rpm.
    pub rated_speed: S,
    /// Correction applied to the compressor power in the energy balance.
    pub flow_correction: S,
}

impl<S: Shape> RunConditions<S> {
    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.suction_pressure.len()
    }

    /// Returns `true` if the conditions hold no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that every field is aligned with `suction_pressure`.
    ///
    /// # Errors
    ///
    /// Returns the first misalignment found.
    pub fn check_aligned(&self) -> Result<(), ShapeError> {
        check_aligned(
            &self.suction_pressure,
            &[
                &self.suction_temperature,
                &self.speed,
                &self.rated_speed,
                &self.flow_correction,
            ],
        )
    }

    /// Returns the scalar conditions at element `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for any field.
    #[must_use]
    pub fn at(&self, index: usize) -> RunConditions<f64> {
        RunConditions {
            suction_pressure: self.suction_pressure.value(index),
            suction_temperature: self.suction_temperature.value(index),
            speed: self.speed.value(index),
            rated_speed: self.rated_speed.value(index),
            flow_correction: self.flow_correction.value(index),
        }
    }
}

/// A full compressor operating point: discharge pressure plus run conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatingPoint<S> {
    /// Discharge pressure, kPa absolute.
    pub discharge_pressure: S,
    pub conditions: RunConditions<S>,
}

impl<S: Shape> OperatingPoint<S> {
    #[must_use]
    pub fn new(discharge_pressure: S, conditions: RunConditions<S>) -> Self {
        Self {
            discharge_pressure,
            conditions,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.discharge_pressure.len()
    }

    /// Returns `true` if the operating point holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that every field is aligned with `discharge_pressure`.
    ///
    /// # Errors
    ///
    /// Returns the first misalignment found.
    pub fn check_aligned(&self) -> Result<(), ShapeError> {
        self.discharge_pressure
            .aligned_with(&self.conditions.suction_pressure)?;
        self.conditions.check_aligned()
    }

    /// Returns the scalar operating point at element `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for any field.
    #[must_use]
    pub fn at(&self, index: usize) -> OperatingPoint<f64> {
        OperatingPoint {
            discharge_pressure: self.discharge_pressure.value(index),
            conditions: self.conditions.at(index),
        }
    }
}
