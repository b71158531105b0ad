//! Simplex vertices.

use super::argument::SimplexFunctionArgument;
use crate::traits::Scalar;
use std::cmp::Ordering;
use std::fmt;

/// A simplex vertex: an argument together with its objective value.
///
/// Vertices compare by value only. NaN values order after every number, so
/// a vertex whose objective failed always sorts as the worst.
#[derive(Debug, Clone)]
pub struct SimplexPair<T, A> {
    /// Position of the vertex.
    pub argument: A,
    /// Objective value at `argument`.
    pub value: T,
}

impl<T: Scalar, A: SimplexFunctionArgument<T>> SimplexPair<T, A> {
    /// Pair an argument with its value.
    pub fn new(argument: A, value: T) -> Self {
        Self { argument, value }
    }

    /// Total order on values with NaN last.
    pub fn compare(&self, other: &Self) -> Ordering {
        compare_values(self.value, other.value)
    }
}

pub(crate) fn compare_values<T: Scalar>(left: T, right: T) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
    }
}

impl<T: Scalar, A: SimplexFunctionArgument<T>> PartialEq for SimplexPair<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl<T: Scalar, A: SimplexFunctionArgument<T>> PartialOrd for SimplexPair<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl<T: Scalar, A: SimplexFunctionArgument<T>> fmt::Display for SimplexPair<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<SimplexPair")?;
        write!(f, "    argument: ")?;
        for i in 0..self.argument.dimension() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.argument.get(i))?;
        }
        writeln!(f)?;
        writeln!(f, "    value: {}", self.value)?;
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::solvers::VectorArgument;

    fn pair(value: f64) -> SimplexPair<f64, VectorArgument<f64>> {
        SimplexPair::new(VectorArgument::from(vec![value]), value)
    }

    #[test]
    fn test_orders_by_value() {
        assert!(pair(1.0) < pair(2.0));
        assert!(pair(-3.0) < pair(-1.0));
        assert_eq!(pair(1.0).compare(&pair(1.0)), Ordering::Equal);
    }

    #[test]
    fn test_ignores_argument() {
        let a = SimplexPair::new(VectorArgument::from(vec![0.0]), 1.0);
        let b = SimplexPair::new(VectorArgument::from(vec![9.0]), 1.0);
        assert!(a == b);
    }

    #[test]
    fn test_nan_sorts_last() {
        let mut pairs = vec![pair(f64::NAN), pair(2.0), pair(-1.0)];
        pairs.sort_by(|a, b| a.compare(b));
        assert_eq!(pairs[0].value, -1.0);
        assert_eq!(pairs[1].value, 2.0);
        assert!(pairs[2].value.is_nan());
        assert!(pair(f64::INFINITY) < pair(f64::NAN));
    }

    #[test]
    fn test_display() {
        let p = SimplexPair::new(VectorArgument::from(vec![1.0, 2.0]), 0.5);
        let text = format!("{}", p);
        assert!(text.contains("argument: 1, 2"));
        assert!(text.contains("value: 0.5"));
    }
}
