//! Integration tests for the simplex solver and spline fitting.

use approx::assert_abs_diff_eq;
use lens_core::math::fitting::{fit_spline, LeastSquaresFit, SplineArgument};
use lens_core::math::solvers::{
    solve_independent, ProgressObserver, SimplexConfig, SimplexFunction, SimplexFunctionArgument,
    SimplexSolver, SimplexStep, SolverState, VectorArgument,
};
use lens_core::math::splines::{GradientSpline, QuadraticSpline, Spline};
use lens_core::types::Interval;
use proptest::prelude::*;

type Arg = VectorArgument<f64>;

fn bowl(x: &Arg) -> f64 {
    (0..x.dimension()).map(|i| (x.get(i) - i as f64).powi(2)).sum()
}

#[derive(Default)]
struct BestTrace {
    values: Vec<f64>,
}

impl ProgressObserver<f64> for BestTrace {
    fn on_initialized(&mut self, _vertices: usize, best: f64) {
        self.values.push(best);
    }

    fn on_iteration(&mut self, _iteration: usize, _step: SimplexStep, best: f64) {
        self.values.push(best);
    }
}

// ========================================
// Convergence
// ========================================

#[test]
fn test_parabola_scenario() {
    let objective = |x: &Arg| (x.get(0) - 3.0).powi(2);
    let mut solver = SimplexSolver::new(
        objective,
        VectorArgument::from(vec![0.0]),
        SimplexConfig::new(1.0, 1e-10),
    )
    .unwrap();

    let result = solver.solve().unwrap();
    assert!(result.converged);
    assert_abs_diff_eq!(result.argument().get(0), 3.0, epsilon = 1e-5);
}

#[test]
fn test_four_dimensional_bowl() {
    let mut solver = SimplexSolver::new(
        bowl,
        VectorArgument::zeros(4),
        SimplexConfig::new(1.0, 1e-14),
    )
    .unwrap();

    let result = solver.solve().unwrap();
    assert!(result.converged);
    assert_eq!(solver.state(), SolverState::Converged);
    for i in 0..4 {
        assert_abs_diff_eq!(result.argument().get(i), i as f64, epsilon = 1e-5);
    }
}

#[test]
fn test_best_value_is_monotone() {
    let mut solver = SimplexSolver::new(
        bowl,
        VectorArgument::zeros(4),
        SimplexConfig::new(1.0, 1e-14),
    )
    .unwrap();

    let mut trace = BestTrace::default();
    solver.solve_with(&mut trace).unwrap();
    assert!(trace.values.len() > 1);
    for pair in trace.values.windows(2) {
        assert!(pair[1] <= pair[0], "best value rose from {} to {}", pair[0], pair[1]);
    }
}

#[test]
fn test_progress_reporting_does_not_change_numerics() {
    let run = |report: bool| {
        let mut solver = SimplexSolver::new(
            bowl,
            VectorArgument::zeros(3),
            SimplexConfig::new(1.0, 1e-12).with_progress(report),
        )
        .unwrap();
        solver.solve().unwrap()
    };

    let quiet = run(false);
    let loud = run(true);
    assert_eq!(quiet.iterations, loud.iterations);
    assert_eq!(quiet.argument(), loud.argument());
}

#[test]
fn test_independent_solves_match_sequential() {
    let starts = vec![
        VectorArgument::from(vec![0.0, 0.0]),
        VectorArgument::from(vec![5.0, -5.0]),
        VectorArgument::from(vec![-2.0, 3.0]),
    ];
    let config = SimplexConfig::new(0.5, 1e-12).with_max_iterations(5_000);

    let batch = solve_independent(&bowl, starts.clone(), config);
    for (start, result) in starts.into_iter().zip(batch) {
        let expected = SimplexSolver::new(bowl, start, config)
            .unwrap()
            .solve()
            .unwrap();
        let result = result.unwrap();
        assert_eq!(result.iterations, expected.iterations);
        assert_eq!(result.argument(), expected.argument());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_converges_to_shifted_minimum(
        cx in -5.0..5.0_f64,
        cy in -5.0..5.0_f64,
        sx in -5.0..5.0_f64,
        sy in -5.0..5.0_f64,
        lambda in 0.1..2.0_f64,
    ) {
        let objective = move |p: &Arg| (p.get(0) - cx).powi(2) + 3.0 * (p.get(1) - cy).powi(2);
        let start = VectorArgument::from(vec![sx, sy]);
        let initial = objective(&start);

        // The plateau test compares vertex values, so the tolerance sits well
        // below the value bound asserted on the optimum.
        let mut solver = SimplexSolver::new(
            objective,
            start,
            SimplexConfig::new(lambda, 1e-18).with_max_iterations(2_000),
        )
        .unwrap();
        let result = solver.solve().unwrap();

        prop_assert!(result.converged);
        prop_assert!(result.value() <= initial);
        prop_assert!(result.value() <= 1e-10);
        let arg = result.argument();
        let distance = (arg.get(0) - cx).hypot(arg.get(1) - cy);
        prop_assert!(distance < 1e-4, "distance {} from ({}, {})", distance, cx, cy);
    }
}

// ========================================
// Fitting
// ========================================

#[test]
fn test_fit_through_trait_object() {
    let mut truth = QuadraticSpline::with_knots(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap();
    truth.generate().unwrap();
    let xs: Vec<f64> = (0..21).map(|i| i as f64 * 0.1).collect();
    let ys: Vec<f64> = xs.iter().map(|&x| truth.compute(x).unwrap()).collect();

    let template: Box<dyn Spline<f64>> =
        Box::new(QuadraticSpline::with_knots(vec![0.0, 1.0, 2.0], vec![0.0; 3]).unwrap());
    let report = fit_spline(template.as_ref(), &xs, &ys, SimplexConfig::new(0.5, 1e-14)).unwrap();

    assert!(report.converged);
    assert_abs_diff_eq!(report.spline.compute(1.0).unwrap(), 1.0, epsilon = 1e-4);
}

#[test]
fn test_fit_never_worse_than_template() {
    let template = GradientSpline::closed(2, Interval::new(0.0, 1.0).unwrap(), 0.0, 1.0).unwrap();
    let xs: Vec<f64> = (0..11).map(|i| i as f64 * 0.1).collect();
    let ys: Vec<f64> = xs.iter().map(|&x| (3.0 * x).sin()).collect();

    let objective = LeastSquaresFit::new(xs.clone(), ys.clone()).unwrap();
    let mut start = SplineArgument::new(template.box_clone());
    objective.pre_compute(&mut start).unwrap();
    let initial = objective.compute(&start);

    let report = fit_spline(
        &template,
        &xs,
        &ys,
        SimplexConfig::new(0.5, 1e-12).with_max_iterations(2_000),
    )
    .unwrap();
    assert!(report.residual <= initial);
    let recomputed = objective.residual(report.spline.as_ref());
    assert_abs_diff_eq!(report.residual, recomputed, epsilon = 1e-12);
}
