//! Objective functions for the simplex solver.

use super::argument::SimplexFunctionArgument;
use crate::traits::Scalar;
use crate::types::SimplexError;

/// Objective minimised by [`SimplexSolver`](super::SimplexSolver).
///
/// `pre_compute` runs exactly once on every new candidate before `compute`,
/// and may cache expensive derived state inside the argument (for example
/// regenerating a spline from its knot values).
///
/// Plain closures `Fn(&A) -> T` are objectives too.
///
/// # Example
///
/// ```
/// use lens_core::math::solvers::{SimplexFunction, VectorArgument, SimplexFunctionArgument};
///
/// let paraboloid = |x: &VectorArgument<f64>| (x.get(0) - 3.0).powi(2);
/// assert_eq!(paraboloid.compute(&VectorArgument::from(vec![1.0])), 4.0);
/// ```
pub trait SimplexFunction<T: Scalar, A: SimplexFunctionArgument<T>> {
    /// Objective value at `argument`.
    fn compute(&self, argument: &A) -> T;

    /// Prepare `argument` for [`compute`](Self::compute).
    ///
    /// # Errors
    ///
    /// An error aborts the solve and is returned to the caller.
    fn pre_compute(&self, _argument: &mut A) -> Result<(), SimplexError> {
        Ok(())
    }
}

impl<T, A, F> SimplexFunction<T, A> for F
where
    T: Scalar,
    A: SimplexFunctionArgument<T>,
    F: Fn(&A) -> T,
{
    #[inline]
    fn compute(&self, argument: &A) -> T {
        self(argument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::solvers::VectorArgument;
    use std::cell::Cell;

    struct Counting {
        prepared: Cell<usize>,
    }

    impl SimplexFunction<f64, VectorArgument<f64>> for Counting {
        fn compute(&self, argument: &VectorArgument<f64>) -> f64 {
            argument.get(0)
        }

        fn pre_compute(&self, argument: &mut VectorArgument<f64>) -> Result<(), SimplexError> {
            self.prepared.set(self.prepared.get() + 1);
            argument.set(0, argument.get(0).abs());
            Ok(())
        }
    }

    #[test]
    fn test_closure_objective() {
        let f = |x: &VectorArgument<f64>| x.get(0) * x.get(1);
        let arg = VectorArgument::from(vec![2.0, 3.0]);
        assert_eq!(f.compute(&arg), 6.0);
    }

    #[test]
    fn test_closure_pre_compute_is_noop() {
        let f = |x: &VectorArgument<f64>| x.get(0);
        let mut arg = VectorArgument::from(vec![-1.0]);
        f.pre_compute(&mut arg).unwrap();
        assert_eq!(arg.get(0), -1.0);
    }

    #[test]
    fn test_custom_pre_compute() {
        let f = Counting {
            prepared: Cell::new(0),
        };
        let mut arg = VectorArgument::from(vec![-5.0]);
        f.pre_compute(&mut arg).unwrap();
        assert_eq!(f.compute(&arg), 5.0);
        assert_eq!(f.prepared.get(), 1);
    }
}
