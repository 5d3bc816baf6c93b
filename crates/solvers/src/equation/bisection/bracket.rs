use std::cmp::Ordering;

use thiserror::Error;

/// Why a search interval was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    #[error("bracket endpoints must be finite")]
    NonFinite,
    #[error("bracket endpoints must differ")]
    ZeroWidth,
    /// The residual has the same sign at both ends.
    #[error("residual does not change sign across the bracket")]
    NoSignChange,
}

/// Returns `[a, b]` in ascending order.
///
/// # Errors
///
/// Fails if either endpoint is non-finite or the two are equal.
pub(super) fn ordered([a, b]: [f64; 2]) -> Result<[f64; 2], BracketError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(BracketError::NonFinite);
    }
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => Ok([a, b]),
        Some(Ordering::Greater) => Ok([b, a]),
        _ => Err(BracketError::ZeroWidth),
    }
}

/// Search interval `[lower, upper]` that still contains the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    lower: f64,
    upper: f64,
    /// Residual sign on the lower side of the root.
    lower_sign: Sign,
}

impl Bracket {
    /// Creates a bracket from ordered bounds and the residual signs at each
    /// end.
    pub(super) fn new(
        [lower, upper]: [f64; 2],
        (lower_sign, upper_sign): (Sign, Sign),
    ) -> Result<Self, BracketError> {
        if lower_sign == upper_sign {
            return Err(BracketError::NoSignChange);
        }
        Ok(Self {
            lower,
            upper,
            lower_sign,
        })
    }

    /// Returns `[lower, upper]`.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Returns `true` once the width is within `abs_tol + rel_tol·|midpoint|`.
    pub(super) fn is_narrow(&self, abs_tol: f64, rel_tol: f64) -> bool {
        self.upper - self.lower <= abs_tol + rel_tol * self.midpoint().abs()
    }

    /// Moves whichever bound lies on the same side of the root as `x`.
    ///
    /// A residual of exactly zero (`sign` is `None`) moves the upper bound.
    pub(super) fn shrink(&mut self, x: f64, sign: Option<Sign>) {
        if sign == Some(self.lower_sign) {
            self.lower = x;
        } else {
            self.upper = x;
        }
    }
}

/// Residual sign used to decide which bound moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Sign of a residual, or `None` if it is zero or NaN.
    #[must_use]
    pub fn of(residual: f64) -> Option<Self> {
        if residual > 0.0 {
            Some(Sign::Positive)
        } else if residual < 0.0 {
            Some(Sign::Negative)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_sorts_and_validates() {
        assert_eq!(ordered([4000.0, 100.0]), Ok([100.0, 4000.0]));
        assert_eq!(ordered([100.0, 4300.0]), Ok([100.0, 4300.0]));
        assert_eq!(ordered([f64::NAN, 1.0]), Err(BracketError::NonFinite));
        assert_eq!(ordered([0.0, f64::INFINITY]), Err(BracketError::NonFinite));
        assert_eq!(ordered([2.0, 2.0]), Err(BracketError::ZeroWidth));
    }

    #[test]
    fn same_signs_do_not_bracket_a_root() {
        assert_eq!(
            Bracket::new([0.0, 1.0], (Sign::Positive, Sign::Positive)),
            Err(BracketError::NoSignChange)
        );
    }

    #[test]
    fn falling_residual_narrows_toward_root() {
        // Discharge-temperature residual: positive below the root.
        let mut bracket =
            Bracket::new([100.0, 4000.0], (Sign::Positive, Sign::Negative)).unwrap();

        bracket.shrink(2050.0, Sign::of(12.5));
        assert_eq!(bracket.as_array(), [2050.0, 4000.0]);

        bracket.shrink(3025.0, Sign::of(-3.0));
        assert_eq!(bracket.as_array(), [2050.0, 3025.0]);
        assert_eq!(bracket.midpoint(), 2537.5);
    }

    #[test]
    fn zero_residual_moves_upper_bound_for_either_slope() {
        for signs in [
            (Sign::Positive, Sign::Negative),
            (Sign::Negative, Sign::Positive),
        ] {
            let mut bracket = Bracket::new([0.0, 2.0], signs).unwrap();
            bracket.shrink(1.0, Sign::of(0.0));
            assert_eq!(bracket.as_array(), [0.0, 1.0]);
        }
    }

    #[test]
    fn narrow_bracket_meets_tolerances() {
        let bracket = Bracket::new([1.0, 1.001], (Sign::Negative, Sign::Positive)).unwrap();
        assert!(bracket.is_narrow(0.01, 0.0));
        assert!(bracket.is_narrow(0.0, 1e-3));
        assert!(!bracket.is_narrow(1e-4, 0.0));
    }
}
