use std::convert::Infallible;

use ndarray::Array1;
use thiserror::Error;

/// Errors raised when values of the same shape are not aligned element-wise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Two values hold a different number of elements.
    #[error("length mismatch: expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Two labeled sequences have the same length but different labels.
    #[error("labels differ at position {position}")]
    LabelMismatch { position: usize },
}

/// A container of `f64` values evaluated element-wise.
///
/// Every property and inference routine is generic over `Shape`, takes all of
/// its inputs as the same `S`, and returns an `S` with the same layout as its
/// first input. A scalar in gives a scalar out; a sequence of `n` values gives
/// a sequence of `n` values; a labeled sequence keeps its labels.
///
/// Implemented for:
/// - `f64`, a single value,
/// - `Vec<f64>` and [`Array1<f64>`], ordered sequences,
/// - [`Labeled<K>`], an ordered sequence indexed by labels.
pub trait Shape: Clone + Send + Sync {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the value holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn value(&self, index: usize) -> f64;

    /// Checks that `other` can be evaluated element-wise against `self`.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if the lengths (or labels) differ.
    fn aligned_with(&self, other: &Self) -> Result<(), ShapeError> {
        if self.len() == other.len() {
            Ok(())
        } else {
            Err(ShapeError::LengthMismatch {
                expected: self.len(),
                found: other.len(),
            })
        }
    }

    /// Builds a value with the layout of `self` whose element `i` is `f(i)`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    fn try_from_fn<E, F>(&self, f: F) -> Result<Self, E>
    where
        F: FnMut(usize) -> Result<f64, E>;

    /// Builds a value with the layout of `self` whose element `i` is `f(i)`.
    #[must_use]
    fn from_fn<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize) -> f64,
    {
        match self.try_from_fn(|i| Ok::<_, Infallible>(f(i))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Applies a fallible function to every element.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    fn try_map<E, F>(&self, mut f: F) -> Result<Self, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        self.try_from_fn(|i| f(self.value(i)))
    }

    /// Applies a function to every element.
    #[must_use]
    fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        self.from_fn(|i| f(self.value(i)))
    }

    /// Returns a value with the layout of `self` and every element set to `value`.
    #[must_use]
    fn filled(&self, value: f64) -> Self {
        self.from_fn(|_| value)
    }

    /// Iterates over the elements in order.
    fn elements(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(|i| self.value(i))
    }
}

/// Checks that every value in `others` is aligned with `reference`.
///
/// # Errors
///
/// Returns the first [`ShapeError`] found.
pub fn check_aligned<S: Shape>(reference: &S, others: &[&S]) -> Result<(), ShapeError> {
    others
        .iter()
        .try_for_each(|other| reference.aligned_with(other))
}

impl Shape for f64 {
    fn len(&self) -> usize {
        1
    }

    fn value(&self, index: usize) -> f64 {
        assert_eq!(index, 0, "scalar has a single element");
        *self
    }

    fn try_from_fn<E, F>(&self, mut f: F) -> Result<Self, E>
    where
        F: FnMut(usize) -> Result<f64, E>,
    {
        f(0)
    }
}

impl Shape for Vec<f64> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn value(&self, index: usize) -> f64 {
        self[index]
    }

    fn try_from_fn<E, F>(&self, f: F) -> Result<Self, E>
    where
        F: FnMut(usize) -> Result<f64, E>,
    {
        (0..Vec::len(self)).map(f).collect()
    }
}

impl Shape for Array1<f64> {
    fn len(&self) -> usize {
        Array1::len(self)
    }

    fn value(&self, index: usize) -> f64 {
        self[index]
    }

    fn try_from_fn<E, F>(&self, f: F) -> Result<Self, E>
    where
        F: FnMut(usize) -> Result<f64, E>,
    {
        let values = (0..Array1::len(self)).map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Array1::from(values))
    }
}

/// An ordered sequence of values indexed by labels, such as timestamps or
/// sample ids from a monitoring log.
///
/// Labels are carried through every element-wise computation unchanged.
/// Two labeled sequences are aligned only if their labels match position by
/// position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Labeled<K> {
    labels: Vec<K>,
    values: Array1<f64>,
}

impl<K> Labeled<K> {
    /// Creates a labeled sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::LengthMismatch`] if `labels` and `values` differ in length.
    pub fn new(labels: Vec<K>, values: impl Into<Array1<f64>>) -> Result<Self, ShapeError> {
        let values = values.into();
        if labels.len() != values.len() {
            return Err(ShapeError::LengthMismatch {
                expected: labels.len(),
                found: values.len(),
            });
        }
        Ok(Self { labels, values })
    }

    /// Returns the labels in order.
    #[must_use]
    pub fn labels(&self) -> &[K] {
        &self.labels
    }

    /// Returns the values in order.
    #[must_use]
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Iterates over `(label, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.labels.iter().zip(self.values.iter().copied())
    }

    /// Splits the sequence into its labels and values.
    #[must_use]
    pub fn into_parts(self) -> (Vec<K>, Array1<f64>) {
        (self.labels, self.values)
    }
}

impl<K: PartialEq> Labeled<K> {
    /// Returns the value stored under `label`, if any.
    #[must_use]
    pub fn get(&self, label: &K) -> Option<f64> {
        self.labels
            .iter()
            .position(|candidate| candidate == label)
            .map(|i| self.values[i])
    }
}

impl<K> FromIterator<(K, f64)> for Labeled<K> {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        let (labels, values): (Vec<K>, Vec<f64>) = iter.into_iter().unzip();
        Self {
            labels,
            values: Array1::from(values),
        }
    }
}

impl<K> Shape for Labeled<K>
where
    K: Clone + PartialEq + Send + Sync,
{
    fn len(&self) -> usize {
        self.values.len()
    }

    fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    fn aligned_with(&self, other: &Self) -> Result<(), ShapeError> {
        if self.len() != other.len() {
            return Err(ShapeError::LengthMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        match self
            .labels
            .iter()
            .zip(&other.labels)
            .position(|(a, b)| a != b)
        {
            Some(position) => Err(ShapeError::LabelMismatch { position }),
            None => Ok(()),
        }
    }

    fn try_from_fn<E, F>(&self, f: F) -> Result<Self, E>
    where
        F: FnMut(usize) -> Result<f64, E>,
    {
        let values = (0..self.values.len()).map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Self {
            labels: self.labels.clone(),
            values: Array1::from(values),
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn map_agrees_with_scalar_map(values in prop::collection::vec(-1.0e3_f64..1.0e3, 0..32)) {
            let mapped = values.map(|x| 3.0 * x - 1.0);
            prop_assert_eq!(mapped.len(), values.len());
            for (x, y) in values.iter().zip(&mapped) {
                prop_assert_eq!(*y, 3.0 * x - 1.0);
            }
        }
    }
}
