use crate::integrators::root::{newton, RootError};
use crate::integrators::{Grid, NewtonSettings};
use crate::SolverError;

/// Backward Euler: each `y_i` is the root of `y - h*f(x_i, y) - y_{i-1}`,
/// found by Newton iteration seeded at `y_{i-1}`.
///
/// A step whose iteration does not converge fails the whole integration
/// instead of keeping the last estimate.
pub fn integrate_implicit<F>(
  f: F,
  grid: &Grid,
  y0: f64,
  settings: &NewtonSettings,
) -> Result<Vec<(f64, f64)>, SolverError>
where
  F: Fn(f64, f64) -> Result<f64, SolverError>,
{
  settings.validate()?;
  let h = grid.step();
  let mut points = Vec::with_capacity(grid.len());
  points.push((grid.x(0), y0));

  for i in 1..grid.len() {
    let y_prev = points[i - 1].1;
    let x = grid.x(i);
    let root = newton(|y| Ok(y - h * f(x, y)? - y_prev), y_prev, settings)
      .map_err(|err| match err {
        RootError::Eval(err) => err,
        RootError::NoConvergence {
          iterations,
          residual,
        } => SolverError::NonConvergenceError {
          x,
          iterations,
          residual,
        },
      })?;
    log::trace!(
      "backward Euler step {i} at x = {x}: {} Newton iterations",
      root.iterations
    );
    points.push((x, root.value));
  }
  Ok(points)
}
