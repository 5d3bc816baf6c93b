use tracing::trace;
use vrv_core::{Shape, check_aligned};

use crate::{Coefficients, CompressorError, IntermediateCoefficients, OperatingPoint};

/// Converts the surrogate's displacement units (cfm) to m³/s.
pub const DISPLACEMENT_SCALE: f64 = 4.719476965e-4 / 60.0;

/// Converts `Ps` in kPa times a displacement to the power correlation's units.
const POWER_SCALE: f64 = 0.000145 * 1000.0;

/// Compressor surrogate evaluated at one or more operating points.
///
/// With `Pr = Pd / Ps` and `sr = speed / rated_speed`:
///
/// - volume: `(a - b·Pr^c) · DISPLACEMENT_SCALE` (m³/s)
/// - power: `(e + f·Pr^d) · Ps · 0.145 · volume / DISPLACEMENT_SCALE + g` (W)
/// - current: `power / ((q·power + r)·power + s)` (A), zero where `q ≤ 0`
///
/// Negative volume or power is returned as computed; the fit is only
/// meaningful inside the envelope it was calibrated on.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressorModel<S> {
    coefficients: Coefficients,
    pressure_ratio: S,
    speed_ratio: S,
    intermediate: IntermediateCoefficients<S>,
    volume: S,
    power: S,
}

impl<S: Shape> CompressorModel<S> {
    /// Evaluates the surrogate at `point`.
    ///
    /// Suction temperature and flow correction are not used by the surrogate.
    ///
    /// # Errors
    ///
    /// Returns [`CompressorError::Shape`] if the pressures and speeds are not
    /// aligned, [`CompressorError::InvalidInput`] if a value is non-finite or
    /// out of range (`Pd > 0`, `Ps > 0`, `speed ≥ 0`, `rated_speed > 0`), and
    /// [`CompressorError::NonFinite`] if volume or power is not finite.
    pub fn new(
        point: &OperatingPoint<S>,
        coefficients: &Coefficients,
    ) -> Result<Self, CompressorError> {
        let pd = &point.discharge_pressure;
        let conditions = &point.conditions;
        let ps = &conditions.suction_pressure;
        check_aligned(pd, &[ps, &conditions.speed, &conditions.rated_speed])?;

        validate(pd, "discharge pressure", |x| x > 0.0)?;
        validate(ps, "suction pressure", |x| x > 0.0)?;
        validate(&conditions.speed, "speed", |x| x >= 0.0)?;
        validate(&conditions.rated_speed, "rated speed", |x| x > 0.0)?;

        let pressure_ratio = pd.from_fn(|i| pd.value(i) / ps.value(i));
        let speed_ratio = conditions
            .speed
            .from_fn(|i| conditions.speed.value(i) / conditions.rated_speed.value(i));
        let intermediate = IntermediateCoefficients::from_speed_ratio(coefficients, &speed_ratio);
        let k = &intermediate;

        let volume = pd.try_from_fn(|i| {
            let v = (k.a.value(i) - k.b.value(i) * pressure_ratio.value(i).powf(k.c.value(i)))
                * DISPLACEMENT_SCALE;
            finite(v, "volume", i)
        })?;

        let power = pd.try_from_fn(|i| {
            let head = k.e.value(i) + k.f.value(i) * pressure_ratio.value(i).powf(k.d.value(i));
            let w = head * ps.value(i) * POWER_SCALE * volume.value(i) / DISPLACEMENT_SCALE
                + k.g.value(i);
            finite(w, "power", i)
        })?;

        trace!(points = pd.len(), "evaluated compressor surrogate");

        Ok(Self {
            coefficients: *coefficients,
            pressure_ratio,
            speed_ratio,
            intermediate,
            volume,
            power,
        })
    }

    /// Volumetric flow, m³/s.
    pub fn volume(&self) -> &S {
        &self.volume
    }

    /// Shaft power, W.
    pub fn power(&self) -> &S {
        &self.power
    }

    /// Motor current, A.
    ///
    /// Zero for every element where the motor term `q` is not positive,
    /// which includes all of [`Coefficients::DEFAULT`].
    #[must_use]
    pub fn current(&self) -> S {
        let k = &self.intermediate;
        self.power.from_fn(|i| {
            let q = k.q.value(i);
            if q > 0.0 {
                let w = self.power.value(i);
                w / ((q * w + k.r.value(i)) * w + k.s.value(i))
            } else {
                0.0
            }
        })
    }

    /// `Pd / Ps`.
    pub fn pressure_ratio(&self) -> &S {
        &self.pressure_ratio
    }

    /// `speed / rated_speed`.
    pub fn speed_ratio(&self) -> &S {
        &self.speed_ratio
    }

    /// Speed-dependent terms evaluated at [`speed_ratio`](Self::speed_ratio).
    pub fn intermediate(&self) -> &IntermediateCoefficients<S> {
        &self.intermediate
    }

    /// Coefficient set the surrogate was evaluated with.
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }
}

fn validate<S: Shape>(
    values: &S,
    quantity: &'static str,
    in_domain: impl Fn(f64) -> bool,
) -> Result<(), CompressorError> {
    match values
        .elements()
        .enumerate()
        .find(|&(_, x)| !x.is_finite() || !in_domain(x))
    {
        Some((index, value)) => Err(CompressorError::InvalidInput {
            quantity,
            index,
            value,
        }),
        None => Ok(()),
    }
}

fn finite(value: f64, quantity: &'static str, index: usize) -> Result<f64, CompressorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CompressorError::NonFinite { quantity, index })
    }
}
