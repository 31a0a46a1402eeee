use crate::integrators::Grid;
use crate::methods::ButcherTableau;
use crate::SolverError;

/// Explicit Runge-Kutta integration driven entirely by `tableau`.
///
/// For each step, stage `j` evaluates
/// `f(x + h*c[j], y + h * sum(a[j][m] * k[m] for m < j))` and the new value is
/// `y + h * sum(b[j] * k[j])`. Euler, RK4 and the 3/8 rule are all just
/// different tableaux.
pub fn integrate_explicit<F>(
  f: F,
  tableau: &ButcherTableau,
  grid: &Grid,
  y0: f64,
) -> Result<Vec<(f64, f64)>, SolverError>
where
  F: Fn(f64, f64) -> Result<f64, SolverError>,
{
  let h = grid.step();
  let mut points = Vec::with_capacity(grid.len());
  points.push((grid.x(0), y0));

  let mut k = vec![0.0; tableau.stages()];
  for i in 1..grid.len() {
    let (x_prev, y_prev) = points[i - 1];
    for j in 0..tableau.stages() {
      let increment: f64 = tableau
        .a_row(j)
        .iter()
        .zip(&k)
        .map(|(a, k)| a * k)
        .sum();
      k[j] = f(x_prev + h * tableau.c()[j], y_prev + h * increment)?;
    }
    let slope: f64 = tableau.b().iter().zip(&k).map(|(b, k)| b * k).sum();
    points.push((grid.x(i), y_prev + h * slope));
  }
  Ok(points)
}
