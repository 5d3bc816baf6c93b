//! Discharge pressure recovered from a discharge-side measurement.
//!
//! Each element is solved independently by bisection over discharge pressure,
//! in parallel across elements. The per-element results keep their solver
//! [`Status`]; a search that runs out of iterations still yields its last
//! midpoint, and [`PressureEstimate::require_converged`] turns that into an
//! error when the caller needs one.

mod search;

pub use search::PressureSearch;

use std::convert::Infallible;

use rayon::prelude::*;
use tracing::{debug, trace, warn};
use vrv_compressor::{Coefficients, CompressorError, CompressorModel, OperatingPoint, RunConditions};
use vrv_core::{EquationProblem, Model, Observer, Shape};
use vrv_solvers::equation::bisection::{self, Action, Event, Sign, Solution, Status};

use crate::{
    EnergyBalance, InferenceError, SuctionModel, discharge_enthalpy_from_temperature,
    energy_balance_with,
};

/// Result of one scalar pressure search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureOutcome {
    /// Last successfully evaluated discharge pressure, kPa absolute.
    pub pressure: f64,
    /// Residual at `pressure`.
    pub residual: f64,
    /// Midpoints evaluated.
    pub iters: usize,
    pub status: Status,
}

impl PressureOutcome {
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}

impl<I, O> From<&Solution<I, O>> for PressureOutcome {
    fn from(solution: &Solution<I, O>) -> Self {
        Self {
            pressure: solution.x,
            residual: solution.residual,
            iters: solution.iters,
            status: solution.status,
        }
    }
}

/// Discharge pressures with the outcome of every element's search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureEstimate<S> {
    /// Discharge pressure, kPa absolute, in the layout of the measurement.
    pub pressure: S,
    /// Search outcome per element, in input order.
    pub outcomes: Vec<PressureOutcome>,
}

impl<S> PressureEstimate<S> {
    /// Returns `true` if every element converged.
    #[must_use]
    pub fn all_converged(&self) -> bool {
        self.outcomes.iter().all(PressureOutcome::is_converged)
    }

    /// Returns the pressures if every element converged.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::NotConverged`] for the first element that
    /// did not converge.
    pub fn require_converged(self) -> Result<S, InferenceError> {
        match self
            .outcomes
            .iter()
            .enumerate()
            .find(|(_, outcome)| !outcome.is_converged())
        {
            Some((index, outcome)) => Err(InferenceError::NotConverged {
                index,
                pressure: outcome.pressure,
                residual: outcome.residual,
                iters: outcome.iters,
            }),
            None => Ok(self.pressure),
        }
    }
}

/// Recovers discharge pressure (kPa absolute) from a measured discharge
/// temperature `t_dis` (°C).
///
/// The residual is the superheated-gas enthalpy at `(Pd, t_dis)` minus the
/// energy-balance discharge enthalpy at `Pd`. It falls as `Pd` rises, so the
/// lower bound moves up on a positive residual and the upper bound moves down
/// otherwise. Use [`PressureSearch::temperature_default`] for the standard
/// bracket and tolerances.
///
/// # Errors
///
/// Returns an error if the search settings are invalid, the inputs are
/// misaligned, or an element's search fails outright. Running out of
/// iterations is not an error; see [`PressureEstimate`].
pub fn discharge_pressure<S: Shape>(
    t_dis: &S,
    conditions: &RunConditions<S>,
    coefficients: &Coefficients,
    search: &PressureSearch,
) -> Result<PressureEstimate<S>, InferenceError> {
    discharge_pressure_with(
        t_dis,
        conditions,
        coefficients,
        search,
        SuctionModel::Superheated,
    )
}

/// Like [`discharge_pressure`], with a choice of suction model for the
/// energy balance.
///
/// # Errors
///
/// See [`discharge_pressure`].
pub fn discharge_pressure_with<S: Shape>(
    t_dis: &S,
    conditions: &RunConditions<S>,
    coefficients: &Coefficients,
    search: &PressureSearch,
    suction: SuctionModel,
) -> Result<PressureEstimate<S>, InferenceError> {
    search.validate()?;
    t_dis.aligned_with(&conditions.suction_pressure)?;
    conditions.check_aligned()?;

    solve_elements(t_dis, |index| {
        let model = EnergyBalanceModel {
            conditions: conditions.at(index),
            coefficients: *coefficients,
            suction,
        };
        let problem = MeasuredTemperature(t_dis.value(index));
        solve_element(index, &model, &problem, search)
    })
}

/// Recovers discharge pressure (kPa absolute) from a measured motor current
/// (A).
///
/// The residual is the surrogate current at `Pd` minus the measurement, which
/// rises with `Pd`. The surrogate only gives a current where its motor term
/// `q` is positive, which depends on the speed ratio alone. For
/// [`Coefficients::CURRENT_CALIBRATED`] that is roughly
/// `0.952 < speed / rated_speed < 1.434`. Use
/// [`PressureSearch::current_default`] for the standard bracket and
/// tolerances.
///
/// # Errors
///
/// Returns [`InferenceError::NoMotorCurrent`] for an element whose speed
/// ratio gives no motor current, since no pressure in the bracket could match
/// the measurement. Otherwise see [`discharge_pressure`].
pub fn discharge_pressure_from_current<S: Shape>(
    current: &S,
    conditions: &RunConditions<S>,
    coefficients: &Coefficients,
    search: &PressureSearch,
) -> Result<PressureEstimate<S>, InferenceError> {
    search.validate()?;
    current.aligned_with(&conditions.suction_pressure)?;
    conditions.check_aligned()?;

    solve_elements(current, |index| {
        let conditions = conditions.at(index);
        let speed_ratio = conditions.speed / conditions.rated_speed;
        if coefficients.intermediate(speed_ratio).q <= 0.0 {
            return Err(InferenceError::NoMotorCurrent { index, speed_ratio });
        }

        let model = CurrentModel {
            conditions,
            coefficients: *coefficients,
        };
        let problem = MeasuredCurrent(current.value(index));
        solve_element(index, &model, &problem, search)
    })
}

fn solve_elements<S, F>(measured: &S, solve: F) -> Result<PressureEstimate<S>, InferenceError>
where
    S: Shape,
    F: Fn(usize) -> Result<PressureOutcome, InferenceError> + Send + Sync,
{
    let outcomes = (0..measured.len())
        .into_par_iter()
        .map(solve)
        .collect::<Result<Vec<_>, _>>()?;

    let pressure = measured.from_fn(|i| outcomes[i].pressure);
    Ok(PressureEstimate { pressure, outcomes })
}

fn solve_element<M, P>(
    index: usize,
    model: &M,
    problem: &P,
    search: &PressureSearch,
) -> Result<PressureOutcome, InferenceError>
where
    M: Model<Input = f64>,
    P: EquationProblem<1, Input = f64, Output = M::Output>,
{
    let observer = SearchLog {
        index,
        fallback: search.solver.slope.endpoint_signs().map(|(_, upper)| upper),
    };

    let solution = bisection::solve(model, problem, search.bracket, &search.solver, observer)
        .map_err(|source| InferenceError::Solver { index, source })?;
    let outcome = PressureOutcome::from(&solution);

    if outcome.is_converged() {
        debug!(
            index,
            pressure = outcome.pressure,
            iters = outcome.iters,
            "discharge pressure converged"
        );
    } else {
        warn!(
            index,
            pressure = outcome.pressure,
            residual = outcome.residual,
            status = ?outcome.status,
            "discharge pressure did not converge"
        );
    }

    Ok(outcome)
}

/// Traces every midpoint and lowers the upper bound past failed evaluations.
///
/// With a known slope, an evaluation that errors or gives a non-finite
/// residual is treated as lying above the root.
struct SearchLog {
    index: usize,
    fallback: Option<Sign>,
}

impl<'a, M, P> Observer<Event<'a, M, P>, Action> for SearchLog
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    fn observe(&mut self, event: &Event<'a, M, P>) -> Option<Action> {
        let residual = event.residual();

        if let Event::Midpoint { iter, x, bracket, .. } = event {
            let [lower, upper] = bracket.as_array();
            trace!(
                index = self.index,
                iter,
                pressure = x,
                lower,
                upper,
                residual = ?residual,
                "discharge pressure step"
            );
        }

        match residual {
            Some(r) if r.is_finite() => None,
            _ => {
                let sign = self.fallback?;
                debug!(
                    index = self.index,
                    pressure = event.x(),
                    "evaluation failed, treating it as above the root"
                );
                Some(sign.into())
            }
        }
    }
}

/// Energy balance as a function of discharge pressure.
struct EnergyBalanceModel {
    conditions: RunConditions<f64>,
    coefficients: Coefficients,
    suction: SuctionModel,
}

impl Model for EnergyBalanceModel {
    type Input = f64;
    type Output = EnergyBalance<f64>;
    type Error = InferenceError;

    fn call(&self, pd: &f64) -> Result<Self::Output, Self::Error> {
        let point = OperatingPoint::new(*pd, self.conditions);
        energy_balance_with(&point, &self.coefficients, self.suction)
    }
}

/// Matches the energy-balance enthalpy to the enthalpy at the measured
/// discharge temperature.
struct MeasuredTemperature(f64);

impl EquationProblem<1> for MeasuredTemperature {
    type Input = f64;
    type Output = EnergyBalance<f64>;
    type Error = InferenceError;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
        Ok(x[0])
    }

    fn residuals(&self, pd: &f64, balance: &EnergyBalance<f64>) -> Result<[f64; 1], Self::Error> {
        let h_measured = discharge_enthalpy_from_temperature(&self.0, pd)?;
        Ok([h_measured - balance.discharge_enthalpy])
    }
}

/// Motor current as a function of discharge pressure.
struct CurrentModel {
    conditions: RunConditions<f64>,
    coefficients: Coefficients,
}

impl Model for CurrentModel {
    type Input = f64;
    type Output = f64;
    type Error = CompressorError;

    fn call(&self, pd: &f64) -> Result<f64, Self::Error> {
        let point = OperatingPoint::new(*pd, self.conditions);
        CompressorModel::new(&point, &self.coefficients).map(|model| model.current())
    }
}

struct MeasuredCurrent(f64);

impl EquationProblem<1> for MeasuredCurrent {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
        Ok(x[0])
    }

    fn residuals(&self, _pd: &f64, current: &f64) -> Result<[f64; 1], Self::Error> {
        Ok([current - self.0])
    }
}
