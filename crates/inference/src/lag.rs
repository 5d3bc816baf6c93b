use tracing::trace;
use uom::si::{
    f64::Time,
    time::{minute, second},
};
use vrv_core::{Shape, ShapeError};

use crate::InferenceError;

/// Compressor phase that selects the lag time constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LagPhase {
    /// First five minutes after the compressor starts.
    Startup,
    /// Steady operation.
    Running,
    /// Compressor stopped.
    Shutdown,
}

impl LagPhase {
    /// Classifies by how long the compressor has been running.
    ///
    /// Less than 0.001 min counts as stopped, less than 5 min as starting up.
    #[must_use]
    pub fn from_run_time(run_time: Time) -> Self {
        let minutes = run_time.get::<minute>();
        if minutes < 0.001 {
            Self::Shutdown
        } else if minutes < 5.0 {
            Self::Startup
        } else {
            Self::Running
        }
    }

    /// Time constant of the first-order lag in this phase.
    #[must_use]
    pub fn time_constant(self) -> Time {
        let seconds = match self {
            Self::Startup => 300.0,
            Self::Running => 100.0,
            Self::Shutdown => 200.0,
        };
        Time::new::<second>(seconds)
    }
}

/// First-order lag applied to predicted discharge temperatures.
///
/// A thermocouple on the discharge line responds slowly; filtering the
/// instantaneous prediction makes it comparable to the measurement:
///
/// `y_k = y_{k-1} + (x_k - y_{k-1}) · (1 - exp(-Δt / τ))`
///
/// The first sample seeds the filter and is returned unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DischargeTemperatureLag {
    state: Option<f64>,
}

impl DischargeTemperatureLag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter already holding `temperature` (°C).
    #[must_use]
    pub fn seeded(temperature: f64) -> Self {
        Self {
            state: Some(temperature),
        }
    }

    /// Current filtered temperature (°C), if any sample has been seen.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Feeds one predicted temperature (°C) taken `dt` after the previous one
    /// and returns the filtered temperature.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::InvalidTimeStep`] if `dt` is negative or not
    /// finite, and [`InferenceError::NonFinite`] if `predicted` is not finite.
    /// The filter state is unchanged on error.
    pub fn update(
        &mut self,
        predicted: f64,
        phase: LagPhase,
        dt: Time,
    ) -> Result<f64, InferenceError> {
        let seconds = dt.get::<second>();
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(InferenceError::InvalidTimeStep { seconds });
        }
        if !predicted.is_finite() {
            return Err(InferenceError::NonFinite {
                quantity: "predicted discharge temperature",
                index: 0,
            });
        }

        let next = match self.state {
            None => predicted,
            Some(previous) => {
                let tau = phase.time_constant().get::<second>();
                let gain = 1.0 - (-seconds / tau).exp();
                previous + (predicted - previous) * gain
            }
        };
        trace!(predicted, filtered = next, ?phase, "discharge temperature lag");

        self.state = Some(next);
        Ok(next)
    }

    /// Filters a series of predictions sampled every `dt`, in order.
    ///
    /// `phases[i]` applies to element `i`. The filter keeps its state, so a
    /// long series can be fed in chunks.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if `phases` and `predicted` differ in length,
    /// or the first error from [`update`](Self::update). Elements before a
    /// failing one have already been applied to the state.
    pub fn filter<S: Shape>(
        &mut self,
        predicted: &S,
        phases: &[LagPhase],
        dt: Time,
    ) -> Result<S, InferenceError> {
        if phases.len() != predicted.len() {
            return Err(ShapeError::LengthMismatch {
                expected: predicted.len(),
                found: phases.len(),
            }
            .into());
        }

        predicted.try_from_fn(|i| {
            self.update(predicted.value(i), phases[i], dt)
                .map_err(|error| match error {
                    InferenceError::NonFinite { quantity, .. } => {
                        InferenceError::NonFinite { quantity, index: i }
                    }
                    other => other,
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn seconds(s: f64) -> Time {
        Time::new::<second>(s)
    }

    #[test]
    fn phase_from_run_time() {
        assert_eq!(LagPhase::from_run_time(seconds(0.0)), LagPhase::Shutdown);
        assert_eq!(LagPhase::from_run_time(seconds(60.0)), LagPhase::Startup);
        assert_eq!(LagPhase::from_run_time(seconds(300.0)), LagPhase::Running);
        assert_relative_eq!(LagPhase::Startup.time_constant().get::<second>(), 300.0);
    }

    #[test]
    fn first_sample_seeds_the_filter() {
        let mut lag = DischargeTemperatureLag::new();
        assert_eq!(lag.value(), None);
        assert_relative_eq!(lag.update(60.0, LagPhase::Running, seconds(2.0)).unwrap(), 60.0);
        assert_eq!(lag.value(), Some(60.0));
    }

    #[test]
    fn step_response_follows_exponential() {
        let mut lag = DischargeTemperatureLag::seeded(20.0);

        let y = lag.update(80.0, LagPhase::Running, seconds(100.0)).unwrap();
        assert_relative_eq!(y, 20.0 + 60.0 * (1.0 - (-1.0_f64).exp()), epsilon = 1e-12);

        // Two half steps land where one full step does.
        let mut halves = DischargeTemperatureLag::seeded(20.0);
        halves.update(80.0, LagPhase::Running, seconds(50.0)).unwrap();
        let y2 = halves.update(80.0, LagPhase::Running, seconds(50.0)).unwrap();
        assert_relative_eq!(y2, y, epsilon = 1e-12);
    }

    #[test]
    fn zero_step_holds_state() {
        let mut lag = DischargeTemperatureLag::seeded(45.0);
        assert_relative_eq!(lag.update(90.0, LagPhase::Startup, seconds(0.0)).unwrap(), 45.0);
    }

    #[test]
    fn rejects_bad_input_without_changing_state() {
        let mut lag = DischargeTemperatureLag::seeded(45.0);
        assert!(matches!(
            lag.update(50.0, LagPhase::Running, seconds(-1.0)),
            Err(InferenceError::InvalidTimeStep { .. })
        ));
        assert!(matches!(
            lag.update(f64::NAN, LagPhase::Running, seconds(1.0)),
            Err(InferenceError::NonFinite { .. })
        ));
        assert_eq!(lag.value(), Some(45.0));
    }

    #[test]
    fn filters_a_series_in_order() {
        let predicted = vec![50.0, 60.0, 60.0];
        let phases = [LagPhase::Startup; 3];
        let mut lag = DischargeTemperatureLag::new();

        let filtered = lag.filter(&predicted, &phases, seconds(2.0)).unwrap();

        let gain = 1.0 - (-2.0_f64 / 300.0).exp();
        let y1 = 50.0 + 10.0 * gain;
        assert_relative_eq!(filtered[0], 50.0);
        assert_relative_eq!(filtered[1], y1, epsilon = 1e-12);
        assert_relative_eq!(filtered[2], y1 + (60.0 - y1) * gain, epsilon = 1e-12);
        assert_eq!(lag.value(), Some(filtered[2]));
    }

    #[test]
    fn series_and_phases_must_align() {
        let mut lag = DischargeTemperatureLag::new();
        assert!(matches!(
            lag.filter(&vec![50.0, 60.0], &[LagPhase::Running], seconds(2.0)),
            Err(InferenceError::Shape(_))
        ));
    }
}
