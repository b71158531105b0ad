//! Vector-space arguments for the simplex solver.

use crate::traits::Scalar;
use std::fmt;
use std::ops;

/// Argument type the simplex solver searches over.
///
/// The solver only needs a finite-dimensional vector space: element access,
/// addition, subtraction and scaling. Implementors decide what a coordinate
/// means, which lets the search run over spline knot values, constrained
/// parameterisations or plain vectors alike.
///
/// `Clone` must produce a value with independent storage; the solver relies
/// on it when copying vertices.
///
/// Indices passed to [`get`](Self::get) and [`set`](Self::set) must lie in
/// `[0, dimension())`; out-of-range access panics like slice indexing.
pub trait SimplexFunctionArgument<T: Scalar>: Clone + fmt::Debug {
    /// Number of coordinates.
    fn dimension(&self) -> usize;

    /// Coordinate `i`.
    fn get(&self, i: usize) -> T;

    /// Overwrite coordinate `i`.
    fn set(&mut self, i: usize, value: T);

    /// Coordinate-wise sum.
    fn add(&self, other: &Self) -> Self;

    /// Coordinate-wise difference.
    fn sub(&self, other: &Self) -> Self;

    /// Every coordinate multiplied by `factor`.
    fn mul(&self, factor: T) -> Self;

    /// Every coordinate divided by `divisor`. Dividing by zero is a caller
    /// error and follows IEEE semantics.
    fn div(&self, divisor: T) -> Self;

    /// Independent copy.
    fn copy(&self) -> Self {
        self.clone()
    }
}

/// Dense vector argument.
///
/// # Example
///
/// ```
/// use lens_core::math::solvers::{SimplexFunctionArgument, VectorArgument};
///
/// let a = VectorArgument::from(vec![1.0, 2.0]);
/// let b = VectorArgument::from(vec![0.5, 0.5]);
///
/// let mid = (a.clone() + b.clone()) / 2.0;
/// assert_eq!(mid.as_slice(), &[0.75, 1.25]);
/// assert_eq!(a.add(&b).as_slice(), &[1.5, 2.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorArgument<T> {
    values: Vec<T>,
}

impl<T: Scalar> VectorArgument<T> {
    /// Wrap a vector of coordinates.
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    /// The zero vector of dimension `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            values: vec![T::zero(); n],
        }
    }

    /// Coordinates as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Take the coordinates.
    pub fn into_inner(self) -> Vec<T> {
        self.values
    }

    fn zip_with(&self, other: &Self, op: impl Fn(T, T) -> T) -> Self {
        debug_assert_eq!(self.values.len(), other.values.len());
        Self {
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(&l, &r)| op(l, r))
                .collect(),
        }
    }

    fn map(&self, op: impl Fn(T) -> T) -> Self {
        Self {
            values: self.values.iter().map(|&v| op(v)).collect(),
        }
    }
}

impl<T: Scalar> From<Vec<T>> for VectorArgument<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl<T: Scalar> SimplexFunctionArgument<T> for VectorArgument<T> {
    #[inline]
    fn dimension(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn get(&self, i: usize) -> T {
        self.values[i]
    }

    #[inline]
    fn set(&mut self, i: usize, value: T) {
        self.values[i] = value;
    }

    fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |l, r| l + r)
    }

    fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, |l, r| l - r)
    }

    fn mul(&self, factor: T) -> Self {
        self.map(|v| v * factor)
    }

    fn div(&self, divisor: T) -> Self {
        self.map(|v| v / divisor)
    }
}

impl<T: Scalar> ops::Add for VectorArgument<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        SimplexFunctionArgument::add(&self, &rhs)
    }
}

impl<T: Scalar> ops::Sub for VectorArgument<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        SimplexFunctionArgument::sub(&self, &rhs)
    }
}

impl<T: Scalar> ops::Mul<T> for VectorArgument<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        SimplexFunctionArgument::mul(&self, rhs)
    }
}

impl<T: Scalar> ops::Div<T> for VectorArgument<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        SimplexFunctionArgument::div(&self, rhs)
    }
}

impl<T: Scalar> fmt::Display for VectorArgument<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
