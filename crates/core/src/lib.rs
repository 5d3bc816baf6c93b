//! Core traits and types shared by the VRV inference crates.
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`EquationProblem`]: adapts solver variables to model inputs and computes
//!   residuals from outputs
//! - [`Shape`]: the value container every property routine is generic over,
//!   so that a single number, a sequence, or a labeled sequence goes in and the
//!   same shape comes out

mod model;
mod observer;
mod problem;
mod shape;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use problem::EquationProblem;
pub use shape::{Labeled, Shape, ShapeError, check_aligned};
