//! Numerical solvers for VRV sensor inference.
//!
//! Solvers drive an [`EquationProblem`] built on a [`Model`] and report their
//! progress to an [`Observer`].
//!
//! [`EquationProblem`]: vrv_core::EquationProblem
//! [`Model`]: vrv_core::Model
//! [`Observer`]: vrv_core::Observer

pub mod equation;
