use std::convert::Infallible;

use proptest::prelude::*;
use vrv_core::{EquationProblem, Model};
use vrv_solvers::equation::bisection::{self, Config, Slope, Status};

/// Linear model `y = slope * x + offset`.
struct Line {
    slope: f64,
    offset: f64,
}

impl Model for Line {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, x: &f64) -> Result<f64, Infallible> {
        Ok(self.slope * x + self.offset)
    }
}

struct Zero;

impl EquationProblem<1> for Zero {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Infallible> {
        Ok([*output])
    }
}

proptest! {
    #[test]
    fn stays_in_bracket_and_within_budget(
        left in -1.0e3_f64..0.0,
        width in 1.0_f64..5.0e3,
        slope in prop_oneof![-10.0_f64..-0.1, 0.1_f64..10.0],
        offset in -1.0e3_f64..1.0e3,
        max_iters in 1_usize..40,
    ) {
        let right = left + width;
        let direction = if slope > 0.0 { Slope::Increasing } else { Slope::Decreasing };
        let config = Config {
            max_iters,
            x_abs_tol: 0.0,
            x_rel_tol: 0.0,
            residual_tol: 1e-6,
            slope: direction,
        };

        let solution = bisection::solve_unobserved(&Line { slope, offset }, &Zero, [left, right], &config)
            .expect("linear residual never fails");

        prop_assert!(solution.iters >= 1 && solution.iters <= max_iters);
        prop_assert!(solution.x > left && solution.x < right);
        if solution.status == Status::MaxIters {
            prop_assert_eq!(solution.iters, max_iters);
        }
    }

    #[test]
    fn converges_on_bracketed_root(
        root in -500.0_f64..500.0,
        slope in 0.1_f64..10.0,
    ) {
        let config = Config {
            max_iters: 80,
            x_abs_tol: 0.0,
            x_rel_tol: 0.0,
            residual_tol: 1e-6,
            slope: Slope::Increasing,
        };
        let model = Line { slope, offset: -slope * root };

        let solution = bisection::solve_unobserved(&model, &Zero, [-1.0e3, 1.0e3], &config)
            .expect("linear residual never fails");

        prop_assert_eq!(solution.status, Status::Converged);
        prop_assert!((solution.x - root).abs() < 1e-5);
    }
}
