use approx::{assert_abs_diff_eq, assert_relative_eq};

use super::*;

fn implicit() -> SolveOptions {
  SolveOptions::default().with_implicit(true)
}

#[test]
fn zero_derivative_is_constant() {
  let solver = Solver::new("y'=0", "y(1)=4.5").unwrap();
  let solution = solver
    .solve(&implicit().with_step(0.5).with_breadth(5.0))
    .unwrap();
  assert_eq!(solution.len(), 10);
  assert!(solution.ys().iter().all(|y| *y == 4.5));
}

#[test]
fn stable_where_explicit_euler_oscillates() {
  let solver = Solver::new("dy/dx=-y", "y(0)=1").unwrap();
  let coarse = SolveOptions::default().with_step(2.5).with_breadth(25.0);

  let backward = solver.solve(&coarse.clone().with_implicit(true)).unwrap();
  let ys = backward.ys();
  assert_eq!(ys.len(), 10);
  assert!(ys.iter().all(|y| *y > 0.0));
  assert!(ys.windows(2).all(|pair| pair[1] < pair[0]));
  // Each step divides by 1 + h exactly for a linear equation.
  assert_abs_diff_eq!(ys[1], 1.0 / 3.5, epsilon = 1e-12);

  let forward = solver.solve(&coarse.with_method("EULER")).unwrap();
  assert!(forward.ys().windows(2).any(|pair| pair[0] * pair[1] < 0.0));
}

#[test]
fn first_order_accuracy() {
  let solver = Solver::new("y'=y", "y(0)=1").unwrap();
  let solution = solver
    .solve(&implicit().with_step(0.001).with_breadth(1.001))
    .unwrap();
  let (x, y) = solution.last().unwrap();
  assert_abs_diff_eq!(x, 1.0, epsilon = 1e-9);
  assert_abs_diff_eq!(y, std::f64::consts::E, epsilon = 5e-3);
}

#[test]
fn missing_root_fails_at_its_step() {
  // y - y^2 - 1 = 0 has no real solution.
  let solver = Solver::new("y'=y^2", "y(0)=1").unwrap();
  let result = solver.solve(&implicit().with_step(1.0).with_breadth(3.0));
  match result {
    Err(SolverError::NonConvergenceError { x, .. }) => assert_eq!(x, 1.0),
    other => panic!("expected non-convergence, got {other:?}"),
  }
}

#[test]
fn root_next_to_a_domain_edge() {
  // y1 + h*sqrt(y1) = y0 has the positive root ((sqrt(h^2 + 4*y0) - h)/2)^2,
  // which lies far closer to 0 than the finite-difference offset.
  let (h, y0) = (0.1_f64, 1e-10_f64);
  let solver = Solver::new("y'=-sqrt(y)", "y(0)=1e-10").unwrap();
  let solution = solver
    .solve(&implicit().with_step(h).with_breadth(0.3))
    .unwrap();
  let ys = solution.ys();
  assert_eq!(ys.len(), 3);
  assert!(ys.iter().all(|y| *y >= 0.0));
  let root = (2.0 * y0 / (h + (h * h + 4.0 * y0).sqrt())).powi(2);
  assert_relative_eq!(ys[1], root, max_relative = 1e-6);
}

#[test]
fn domain_edge_without_root_is_non_convergence() {
  // y - h*log(y) never drops below 0.33 for h = 0.1, so no step exists.
  let solver = Solver::new("y'=log(y)", "y(0)=1e-9").unwrap();
  let result = solver.solve(&implicit().with_step(0.1).with_breadth(0.3));
  assert!(matches!(
    result,
    Err(SolverError::NonConvergenceError { .. })
  ));
}

#[test]
fn derivative_errors_are_passed_through() {
  let solver = Solver::new("y'=sqrt(y)", "y(0)=-1").unwrap();
  let result = solver.solve(&implicit().with_step(0.1).with_breadth(1.0));
  assert!(matches!(result, Err(SolverError::DomainError(_))));
}

#[test]
fn newton_settings_are_validated() {
  let solver = Solver::new("y'=y", "y(0)=1").unwrap();
  for newton in [
    NewtonSettings {
      tolerance: 0.0,
      ..NewtonSettings::default()
    },
    NewtonSettings {
      max_iterations: 0,
      ..NewtonSettings::default()
    },
  ] {
    let result = solver.solve(&implicit().with_newton(newton));
    assert!(matches!(result, Err(SolverError::InvalidConfig(_))));
  }
}
