//! Solvers for equation problems: finding the input that zeroes a residual.
//!
//! An [`EquationProblem`] maps solver variables `x: [f64; N]` to model inputs,
//! calls the model, and computes residuals. Solvers in this module drive those
//! residuals toward zero.
//!
//! # Solvers
//!
//! - [`bisection`]: bounded iteration on a bracketed interval, with a known or
//!   detected residual slope
//!
//! [`EquationProblem`]: vrv_core::EquationProblem

mod evaluate;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};

pub mod bisection;
