use std::ops::Index;

use tracing::warn;
use vrv_core::Shape;

use crate::CompressorError;

/// Number of surrogate coefficients.
pub const COEFFICIENT_COUNT: usize = 32;

/// The 32 fitted coefficients of the compressor surrogate.
///
/// Coefficients are grouped by the intermediate term they feed, each a
/// polynomial in the speed ratio `sr`:
///
/// | index  | term | form |
/// |--------|------|------|
/// | 0..=2  | `a`  | `c0 + c1·√sr + c2·sr` |
/// | 3..=5  | `b`  | `c3 + c4·sr² + c5·sr⁴` |
/// | 6..=8  | `c`  | `c6 + c7·sr + c8·sr²` |
/// | 9..=11 | `d`  | `c9 + c10·√sr + c11·sr` |
/// | 12..=14 | `y1` | `c12 + c13·sr + c14·sr²` |
/// | 15..=17 | `y2` | `c15 + c16·sr + c17·sr²` |
/// | 18, 19 | `f`, `e` bases | |
/// | 20..=22 | `g`  | `c20 + c21·sr² + c22·sr⁴` |
/// | 23..=25 | `q`  | `c23 + c24·sr + c25·sr²` |
/// | 26..=28 | `r`  | `c26 + c27·sr² + c28·sr⁴` |
/// | 29..=31 | `s`  | `c29 + c30·sr² + c31·sr⁴` |
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coefficients([f64; COEFFICIENT_COUNT]);

impl Coefficients {
    /// Flow and power fit. The motor terms `q`, `r`, `s` are zero, so
    /// [`current`](crate::CompressorModel::current) is zero everywhere.
    pub const DEFAULT: Self = Self([
        55.85, -127.29, 700.04, 1.2347, 0.06207, 0.23527, 1.7695, 0.0, 0.0, 1.1473, 0.0, 0.0,
        0.88358, -0.41507, 0.14333, 0.15895, -0.058611, 0.022684, 19.922, 4.6538, -195.28, 712.67,
        -43.42, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ]);

    /// Fit with populated motor terms, for inferring pressure from current.
    ///
    /// The motor term `q` is positive only for speed ratios between about
    /// 0.952 and 1.434. Outside that window the modelled current is zero.
    pub const CURRENT_CALIBRATED: Self = Self([
        97.067, -177.99, 297.6, 20.081, 11.098, -1.8449, 0.44883, 0.0, 0.0, 0.65281, 0.0, 0.0,
        0.096619, -0.029134, 0.011636, -0.11126, 0.073423, -0.024061, 2.4395, 0.029512, -119.08,
        -85.79, 12.689, -0.00026992, 0.00047164, -0.00019762, 0.3311, -0.53155, 0.18157,
        0.0000024884, 390.25, -150.24,
    ]);

    /// Creates a coefficient set.
    #[must_use]
    pub const fn new(values: [f64; COEFFICIENT_COUNT]) -> Self {
        Self(values)
    }

    /// Returns `values` as coefficients, or the defaults if `values` is absent
    /// or does not hold exactly 32 entries.
    #[must_use]
    pub fn from_override(values: Option<&[f64]>) -> Self {
        match values.map(Self::try_from) {
            None => Self::DEFAULT,
            Some(Ok(coefficients)) => coefficients,
            Some(Err(error)) => {
                warn!(%error, "ignoring coefficient override, using defaults");
                Self::DEFAULT
            }
        }
    }

    /// Returns the coefficients as an array.
    #[must_use]
    pub fn as_array(&self) -> &[f64; COEFFICIENT_COUNT] {
        &self.0
    }

    /// Evaluates the intermediate coefficients at speed ratio `sr`.
    #[must_use]
    pub fn intermediate(&self, sr: f64) -> IntermediateCoefficients<f64> {
        let c = &self.0;
        let sqrt_sr = sr.sqrt();
        let sr2 = sr * sr;
        let sr4 = sr2 * sr2;

        let d = c[9] + c[10] * sqrt_sr + c[11] * sr;
        let y1 = c[12] + c[13] * sr + c[14] * sr2;
        let y2 = c[15] + c[16] * sr + c[17] * sr2;
        let f = (y1 - y2) / (c[18].powf(d) - c[19].powf(d));

        IntermediateCoefficients {
            a: c[0] + c[1] * sqrt_sr + c[2] * sr,
            b: c[3] + c[4] * sr2 + c[5] * sr4,
            c: c[6] + c[7] * sr + c[8] * sr2,
            d,
            y1,
            y2,
            f,
            e: y1 - f * c[18].powf(d),
            g: c[20] + c[21] * sr2 + c[22] * sr4,
            q: c[23] + c[24] * sr + c[25] * sr2,
            r: c[26] + c[27] * sr2 + c[28] * sr4,
            s: c[29] + c[30] * sr2 + c[31] * sr4,
        }
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<&[f64]> for Coefficients {
    type Error = CompressorError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        <[f64; COEFFICIENT_COUNT]>::try_from(values)
            .map(Self)
            .map_err(|_| CompressorError::CoefficientCount {
                expected: COEFFICIENT_COUNT,
                found: values.len(),
            })
    }
}

impl From<[f64; COEFFICIENT_COUNT]> for Coefficients {
    fn from(values: [f64; COEFFICIENT_COUNT]) -> Self {
        Self(values)
    }
}

impl Index<usize> for Coefficients {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Speed-dependent terms of the surrogate, derived from [`Coefficients`].
///
/// Volume is `(a - b·Pr^c)` in displacement units; power is
/// `(e + f·Pr^d)·Ps·…`; motor current uses `q`, `r`, `s`. `y1` and `y2` are
/// the power-curve anchors from which `e` and `f` are solved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntermediateCoefficients<S> {
    pub a: S,
    pub b: S,
    pub c: S,
    pub d: S,
    pub y1: S,
    pub y2: S,
    pub f: S,
    pub e: S,
    pub g: S,
    pub q: S,
    pub r: S,
    pub s: S,
}

impl<S: Shape> IntermediateCoefficients<S> {
    /// Evaluates the intermediate coefficients for every speed ratio in `sr`.
    #[must_use]
    pub fn from_speed_ratio(coefficients: &Coefficients, sr: &S) -> Self {
        let terms: Vec<_> = sr.elements().map(|x| coefficients.intermediate(x)).collect();
        let field = |get: fn(&IntermediateCoefficients<f64>) -> f64| sr.from_fn(|i| get(&terms[i]));

        Self {
            a: field(|t| t.a),
            b: field(|t| t.b),
            c: field(|t| t.c),
            d: field(|t| t.d),
            y1: field(|t| t.y1),
            y2: field(|t| t.y2),
            f: field(|t| t.f),
            e: field(|t| t.e),
            g: field(|t| t.g),
            q: field(|t| t.q),
            r: field(|t| t.r),
            s: field(|t| t.s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn default_has_zero_motor_terms() {
        let terms = Coefficients::default().intermediate(0.8);
        assert_eq!((terms.q, terms.r, terms.s), (0.0, 0.0, 0.0));
    }

    #[test]
    fn intermediate_terms_at_rated_speed() {
        // At sr = 1 every term is the sum of its coefficients.
        let c = Coefficients::DEFAULT;
        let terms = c.intermediate(1.0);

        assert_relative_eq!(terms.a, 55.85 - 127.29 + 700.04);
        assert_relative_eq!(terms.b, 1.2347 + 0.06207 + 0.23527);
        assert_relative_eq!(terms.c, 1.7695);
        assert_relative_eq!(terms.d, 1.1473);
        assert_relative_eq!(terms.y1, 0.88358 - 0.41507 + 0.14333);
        assert_relative_eq!(terms.g, -195.28 + 712.67 - 43.42);
        assert_relative_eq!(
            terms.e + terms.f * 19.922_f64.powf(terms.d),
            terms.y1,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            terms.e + terms.f * 4.6538_f64.powf(terms.d),
            terms.y2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn override_of_wrong_length_falls_back() {
        let short = [1.0; 31];
        assert_eq!(
            Coefficients::from_override(Some(&short[..])),
            Coefficients::DEFAULT
        );
        assert_eq!(Coefficients::from_override(None), Coefficients::DEFAULT);

        let custom = [2.0; COEFFICIENT_COUNT];
        assert_eq!(
            Coefficients::from_override(Some(&custom[..])).as_array(),
            &custom
        );
    }

    #[test]
    fn try_from_reports_length() {
        let err = Coefficients::try_from(&[0.0; 5][..]).unwrap_err();
        assert_eq!(
            err,
            CompressorError::CoefficientCount {
                expected: 32,
                found: 5
            }
        );
    }

    #[test]
    fn sequence_terms_match_scalar_terms() {
        let sr = vec![0.25, 0.5, 1.0];
        let terms = IntermediateCoefficients::from_speed_ratio(&Coefficients::CURRENT_CALIBRATED, &sr);

        for (i, x) in sr.iter().enumerate() {
            let scalar = Coefficients::CURRENT_CALIBRATED.intermediate(*x);
            assert_relative_eq!(terms.a[i], scalar.a);
            assert_relative_eq!(terms.f[i], scalar.f);
            assert_relative_eq!(terms.s[i], scalar.s);
        }
    }
}
