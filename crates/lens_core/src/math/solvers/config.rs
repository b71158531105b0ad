//! Simplex solver configuration.

use crate::types::SimplexError;
use num_traits::Float;

/// Configuration for the Nelder–Mead simplex solver.
///
/// # Type Parameters
///
/// * `T` - Floating-point type of step and tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use lens_core::math::solvers::SimplexConfig;
///
/// // Use default configuration
/// let config: SimplexConfig<f64> = SimplexConfig::default();
/// assert_eq!(config.lambda, 1.0);
/// assert!(config.max_iterations.is_none());
///
/// // Custom configuration
/// let custom = SimplexConfig::new(0.25, 1e-12)
///     .with_max_iterations(500)
///     .with_progress(true);
/// assert_eq!(custom.max_iterations, Some(500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimplexConfig<T: Float> {
    /// Offset added to one coordinate of the start point per extra vertex.
    ///
    /// Should be comparable to the expected distance to the optimum.
    pub lambda: T,

    /// Plateau tolerance.
    ///
    /// The solver stops when the best two vertex values differ by at most
    /// this amount. Zero demands an exact plateau.
    pub tolerance: T,

    /// Optional cap on the number of iterations.
    ///
    /// `None` iterates until the plateau criterion holds. When the cap is
    /// hit the result reports `converged == false`.
    pub max_iterations: Option<usize>,

    /// Emit `tracing` progress events from `SimplexSolver::solve`.
    pub report_progress: bool,
}

impl<T: Float> Default for SimplexConfig<T> {
    /// Default values:
    /// - `lambda`: 1
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: unbounded
    /// - `report_progress`: false
    fn default() -> Self {
        Self {
            lambda: T::one(),
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: None,
            report_progress: false,
        }
    }
}

impl<T: Float> SimplexConfig<T> {
    /// Create a configuration with the given step and tolerance.
    pub fn new(lambda: T, tolerance: T) -> Self {
        Self {
            lambda,
            tolerance,
            ..Default::default()
        }
    }

    /// Cap the number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Enable or disable progress reporting.
    pub fn with_progress(mut self, report_progress: bool) -> Self {
        self.report_progress = report_progress;
        self
    }

    /// Check the step and tolerance.
    ///
    /// # Errors
    ///
    /// * `SimplexError::InvalidStep` - `lambda` is zero or non-finite
    /// * `SimplexError::InvalidTolerance` - `tolerance` is negative or non-finite
    pub fn validate(&self) -> Result<(), SimplexError> {
        if !self.lambda.is_finite() || self.lambda == T::zero() {
            return Err(SimplexError::InvalidStep(
                self.lambda.to_f64().unwrap_or(f64::NAN),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < T::zero() {
            return Err(SimplexError::InvalidTolerance(
                self.tolerance.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SimplexConfig<f64> = SimplexConfig::default();
        assert_eq!(config.lambda, 1.0);
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
        assert_eq!(config.max_iterations, None);
        assert!(!config.report_progress);
    }

    #[test]
    fn test_builder_methods() {
        let config: SimplexConfig<f64> = SimplexConfig::new(0.5, 1e-8)
            .with_max_iterations(10)
            .with_progress(true);
        assert_eq!(config.lambda, 0.5);
        assert_eq!(config.max_iterations, Some(10));
        assert!(config.report_progress);
    }

    #[test]
    fn test_validate() {
        assert!(SimplexConfig::new(1.0, 0.0).validate().is_ok());
        assert!(SimplexConfig::new(-0.5, 1e-6).validate().is_ok());

        match SimplexConfig::new(0.0, 1e-6).validate().unwrap_err() {
            SimplexError::InvalidStep(step) => assert_eq!(step, 0.0),
            _ => panic!("Expected InvalidStep error"),
        }
        assert!(matches!(
            SimplexConfig::new(f64::NAN, 1e-6).validate(),
            Err(SimplexError::InvalidStep(_))
        ));
        assert!(matches!(
            SimplexConfig::new(1.0, -1e-6).validate(),
            Err(SimplexError::InvalidTolerance(_))
        ));
        assert!(matches!(
            SimplexConfig::new(1.0, f64::INFINITY).validate(),
            Err(SimplexError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn test_config_copy() {
        let config1: SimplexConfig<f64> = SimplexConfig::default();
        let config2 = config1;
        assert_eq!(config1, config2);
    }

    #[test]
    fn test_config_with_f32() {
        let config: SimplexConfig<f32> = SimplexConfig::default();
        assert!(config.tolerance > 0.0);
        assert_eq!(config.lambda, 1.0);
    }
}
