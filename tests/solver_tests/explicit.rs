use approx::assert_abs_diff_eq;
use rand::Rng;

use super::*;

/// Absolute error of `method` at `x = 1` on `y' = y, y(0) = 1`.
fn error_at_one(options: SolveOptions, step: f64) -> f64 {
  let solver = Solver::new("y'=y", "y(0)=1").unwrap();
  let solution = solver
    .solve(&options.with_step(step).with_breadth(1.0 + step))
    .unwrap();
  let (x, y) = solution.last().unwrap();
  assert_abs_diff_eq!(x, 1.0, epsilon = 1e-12);
  (y - std::f64::consts::E).abs()
}

fn named(method: &str) -> SolveOptions {
  SolveOptions::default().with_method(method)
}

mod grid {
  use super::*;

  #[test]
  fn sample_count_tolerates_rounding() {
    assert_eq!(Grid::new(0.0, 0.1, 0.3).unwrap().len(), 3);
    assert_eq!(Grid::new(0.0, 0.05, 100.0).unwrap().len(), 2000);
    assert_eq!(Grid::new(0.0, 0.3, 1.0).unwrap().len(), 3);
    assert_eq!(Grid::new(0.0, 0.001, 1.001).unwrap().len(), 1001);
  }

  #[test]
  fn real_fractions_are_not_rounded_up() {
    assert_eq!(Grid::new(0.0, 1.0, 2.9999999999).unwrap().len(), 2);
    assert_eq!(Grid::new(0.0, 0.1, 0.29999999).unwrap().len(), 2);
  }

  #[test]
  fn always_keeps_the_start() {
    let grid = Grid::new(2.0, 1.0, 0.5).unwrap();
    assert_eq!(grid.len(), 1);
    assert_eq!(grid.x(0), 2.0);
  }

  #[test]
  fn points_are_not_accumulated() {
    let grid = Grid::new(0.0, 0.1, 100.0).unwrap();
    assert_eq!(grid.x(999), 999.0 * 0.1);
  }

  #[test]
  fn rejects_invalid_settings() {
    for (x0, step, breadth) in [
      (0.0, 0.0, 1.0),
      (0.0, -0.1, 1.0),
      (0.0, f64::NAN, 1.0),
      (0.0, 0.1, 0.0),
      (0.0, 0.1, f64::INFINITY),
      (f64::NAN, 0.1, 1.0),
      (0.0, 1e-9, 1e3),
    ] {
      assert!(
        matches!(
          Grid::new(x0, step, breadth),
          Err(SolverError::InvalidConfig(_))
        ),
        "{x0} {step} {breadth}"
      );
    }
  }
}

mod convergence {
  use super::*;

  #[test]
  fn rk4_is_fourth_order() {
    let ratio =
      error_at_one(named("RK4"), 0.1) / error_at_one(named("RK4"), 0.05);
    assert!((12.0..20.0).contains(&ratio), "{ratio}");
  }

  #[test]
  fn euler_is_first_order() {
    let ratio =
      error_at_one(named("EULER"), 0.01) / error_at_one(named("EULER"), 0.005);
    assert!((1.7..2.3).contains(&ratio), "{ratio}");
  }

  #[test]
  fn three_eighths_rule_is_accurate() {
    assert!(error_at_one(named("3/8"), 0.1) < 1e-5);
  }

  #[test]
  fn custom_heun_tableau_is_second_order() {
    let heun = ButcherTableau::new(
      vec![vec![], vec![1.0]],
      vec![0.5, 0.5],
      vec![0.0, 1.0],
    )
    .unwrap();
    let options = SolveOptions::default().with_tableau(heun);
    let ratio =
      error_at_one(options.clone(), 0.1) / error_at_one(options, 0.05);
    assert!((3.0..5.0).contains(&ratio), "{ratio}");
  }
}

mod exactness {
  use super::*;

  #[test]
  fn zero_derivative_keeps_the_start_value() {
    let mut rng = rand::thread_rng();
    for _ in 0..10 {
      let y0: f64 = rng.gen_range(-1e3..1e3);
      let x0: f64 = rng.gen_range(-10.0..10.0);
      let solver = Solver::new("y'=0", &format!("y({x0})={y0}")).unwrap();
      for method in ["RK4", "EULER", "3/8"] {
        let solution = solver
          .solve(&named(method).with_step(0.5).with_breadth(5.0))
          .unwrap();
        assert!(solution.ys().iter().all(|y| *y == y0), "{method} {y0}");
      }
    }
  }

  #[test]
  fn rk4_integrates_polynomials_exactly() {
    let solver = Solver::new("dy/dx=2x+1", "y(0)=3").unwrap();
    let solution = solver
      .solve(&named("RK4").with_step(0.1).with_breadth(2.0))
      .unwrap();
    assert_eq!(solution.len(), 20);
    for (x, y) in solution.points {
      assert_abs_diff_eq!(y, x * x + x + 3.0, epsilon = 1e-12);
    }
  }
}

mod errors {
  use super::*;

  #[test]
  fn evaluation_errors_abort_the_solve() {
    let solver = Solver::new("y'=1/(x-0.5)", "y(0)=0").unwrap();
    let options = named("EULER").with_step(0.25).with_breadth(1.0);
    let result = solver.solve(&options);
    assert!(matches!(result, Err(SolverError::DivisionByZeroError)));
  }

  #[test]
  fn overflow_aborts_the_solve() {
    let solver = Solver::new("y'=y*y", "y(0)=1").unwrap();
    let options = named("EULER").with_step(0.5).with_breadth(10.0);
    let result = solver.solve(&options);
    assert!(matches!(result, Err(SolverError::DomainError(_))));
  }

  #[test]
  fn domain_errors_abort_the_solve() {
    // The first Euler step overshoots to y = -1.
    let solver = Solver::new("y'=-sqrt(y)", "y(0)=1").unwrap();
    let options = named("EULER").with_step(2.0).with_breadth(6.0);
    let result = solver.solve(&options);
    assert!(matches!(result, Err(SolverError::DomainError(_))));
  }
}
