//! Bisection on a single variable.
//!
//! The solver halves a bracket `[left, right]` until the midpoint residual is
//! within tolerance, the bracket is narrow enough, the iteration budget runs
//! out, or an observer stops it. Whatever the reason, the last successfully
//! evaluated point is returned together with a [`Status`]. A midpoint whose
//! evaluation failed carries no residual or snapshot, so it still narrows the
//! bracket but is never reported, and a solve with no successful evaluation
//! is an error.
//!
//! A midpoint residual of exactly zero that does not meet the residual
//! tolerance moves the upper bound, whatever the slope.
//!
//! When the caller knows how the residual varies with `x`
//! ([`Slope::Increasing`] or [`Slope::Decreasing`]), only midpoints are
//! evaluated. With [`Slope::Detect`] both endpoints are evaluated first and
//! must have residuals of opposite sign.

mod action;
mod bracket;
mod config;
mod decision;
mod error;
mod event;
mod solution;


pub use action::Action;
pub use bracket::{Bracket, BracketError, Sign};
pub use config::{Config, ConfigError, Slope};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use vrv_core::{EquationProblem, Model, Observer};

use crate::equation::{Evaluation, evaluate};

use decision::Decision;

/// Where an evaluation sits relative to the bracket.
enum Point<'b> {
    Left,
    Right,
    Midpoint { iter: usize, bracket: &'b Bracket },
}

type Outcome<I, O> = (Option<Evaluation<I, O, 1>>, Decision);

/// Finds a root of a scalar equation problem by bisection.
///
/// Observers see every evaluation and may stop the solver or override the
/// residual sign used to update the bracket.
///
/// # Errors
///
/// Returns an error if the config or bracket is invalid, the endpoint
/// residuals do not change sign (with [`Slope::Detect`]), an evaluation fails
/// or yields a non-finite residual without an observer override, or no
/// evaluation succeeded before the solver stopped.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    config.validate()?;
    let [lower, upper] = bracket::ordered(bracket)?;
    let mut last = None;

    let signs = match config.slope.endpoint_signs() {
        Some(signs) => signs,
        None => {
            let mut signs = [Sign::Positive; 2];
            for (side, point, x) in [(0, Point::Left, lower), (1, Point::Right, upper)] {
                let (eval, decision) = evaluate_at(model, problem, &mut observer, x, point);
                match decision {
                    Decision::Continue(sign) => {
                        if let Some(eval) = eval {
                            let converged = eval.residuals[0].abs() < config.residual_tol;
                            last = Some(eval);
                            if converged {
                                return finish(last, Status::Converged, 0);
                            }
                        }
                        match sign {
                            Some(sign) => signs[side] = sign,
                            // Exact root at an endpoint.
                            None => return finish(last, Status::Converged, 0),
                        }
                    }
                    Decision::StopEarly => {
                        return finish(eval.or(last), Status::StoppedByObserver, 0);
                    }
                    Decision::Error(error) => return Err(error),
                }
            }
            (signs[0], signs[1])
        }
    };

    let mut bracket = Bracket::new([lower, upper], signs)?;

    for iter in 1..=config.max_iters {
        let x = bracket.midpoint();
        let (eval, decision) = evaluate_at(
            model,
            problem,
            &mut observer,
            x,
            Point::Midpoint {
                iter,
                bracket: &bracket,
            },
        );

        match decision {
            Decision::Continue(sign) => {
                if let Some(eval) = eval {
                    let converged = eval.residuals[0].abs() < config.residual_tol;
                    last = Some(eval);
                    if converged {
                        return finish(last, Status::Converged, iter);
                    }
                }
                bracket.shrink(x, sign);
                if bracket.is_narrow(config.x_abs_tol, config.x_rel_tol) {
                    return finish(last, Status::Converged, iter);
                }
            }
            Decision::StopEarly => {
                return finish(eval.or(last), Status::StoppedByObserver, iter);
            }
            Decision::Error(error) => return Err(error),
        }
    }

    finish(last, Status::MaxIters, config.max_iters)
}

/// Runs bisection without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// Evaluates one point, lets the observer react, and decides how to proceed.
///
/// An evaluation whose sign was overridden by the observer is dropped.
fn evaluate_at<M, P, Obs>(
    model: &M,
    problem: &P,
    observer: &mut Obs,
    x: f64,
    point: Point<'_>,
) -> Outcome<M::Input, M::Output>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    let result = evaluate(model, problem, [x]);

    let action = {
        let event = match point {
            Point::Left => Event::Left { x, result: &result },
            Point::Right => Event::Right { x, result: &result },
            Point::Midpoint { iter, bracket } => Event::Midpoint {
                iter,
                x,
                bracket,
                result: &result,
            },
        };
        observer.observe(&event)
    };

    let (residual, eval) = match result {
        Ok(eval) => {
            let residual = eval.residuals[0];
            if residual.is_finite() {
                (Ok(residual), Some(eval))
            } else {
                (Err(Error::NonFiniteResidual { x, residual }), None)
            }
        }
        Err(error) => (Err(Error::evaluation(x, error)), None),
    };

    let eval = if matches!(action, Some(Action::AssumeResidualSign(_))) {
        None
    } else {
        eval
    };

    (eval, Decision::new(action, residual))
}

fn finish<I, O>(
    eval: Option<Evaluation<I, O, 1>>,
    status: Status,
    iters: usize,
) -> Result<Solution<I, O>, Error> {
    let eval = eval.ok_or(Error::NoSuccessfulEvaluation)?;
    Ok(Solution::from_eval(eval, status, iters))
}
