use crate::SolverError;

/// Stopping rules for the scalar Newton iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonSettings {
  /// Relative size of the last Newton correction accepted as converged.
  pub tolerance: f64,
  /// Maximum number of Newton corrections per solve.
  pub max_iterations: usize,
}

impl Default for NewtonSettings {
  fn default() -> Self {
    Self {
      tolerance: 1e-10,
      max_iterations: 50,
    }
  }
}

impl NewtonSettings {
  pub fn validate(&self) -> Result<(), SolverError> {
    if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
      return Err(SolverError::InvalidConfig(format!(
        "Newton tolerance must be a positive number, got {}",
        self.tolerance
      )));
    }
    if self.max_iterations == 0 {
      return Err(SolverError::InvalidConfig(
        "Newton needs at least one iteration".into(),
      ));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Root {
  pub value: f64,
  pub iterations: usize,
}

#[derive(Debug)]
pub(crate) enum RootError {
  /// `g` itself failed, e.g. a domain error in the derivative.
  Eval(SolverError),
  NoConvergence { iterations: usize, residual: f64 },
}

impl From<SolverError> for RootError {
  fn from(err: SolverError) -> Self {
    RootError::Eval(err)
  }
}

/// Halvings of a Newton correction tried before an out-of-domain iterate is
/// reported; past 52 the damped step no longer moves `y`.
const MAX_HALVINGS: usize = 52;

/// Newton's method on `g(y) = 0` seeded at `seed`.
///
/// The derivative is a central difference, or a one-sided one when `g` is
/// undefined on one side of the iterate. A correction that leaves the domain
/// of `g` is halved until it lands inside it.
pub(crate) fn newton<G>(
  g: G,
  seed: f64,
  settings: &NewtonSettings,
) -> Result<Root, RootError>
where
  G: Fn(f64) -> Result<f64, SolverError>,
{
  let mut y = seed;
  let mut residual = g(y)?;
  for iteration in 0..settings.max_iterations {
    if residual == 0.0 {
      return Ok(Root {
        value: y,
        iterations: iteration,
      });
    }
    let slope = derivative(&g, y, residual)?;
    if slope == 0.0 || !slope.is_finite() {
      return Err(RootError::NoConvergence {
        iterations: settings.max_iterations,
        residual,
      });
    }
    let (correction, next) = damped_step(&g, y, residual / slope)?;
    y -= correction;
    residual = next;
    if !(y.is_finite() && residual.is_finite()) {
      return Err(RootError::NoConvergence {
        iterations: settings.max_iterations,
        residual,
      });
    }
    let tolerance = settings.tolerance;
    if correction.abs() <= tolerance * (y.abs() + tolerance) {
      return Ok(Root {
        value: y,
        iterations: iteration + 1,
      });
    }
  }
  Err(RootError::NoConvergence {
    iterations: settings.max_iterations,
    residual,
  })
}

/// Finite-difference `g'(y)`, given `residual = g(y)`. The offset is relative
/// to `y` so that iterates close to zero are not differenced across it.
fn derivative<G>(g: &G, y: f64, residual: f64) -> Result<f64, SolverError>
where
  G: Fn(f64) -> Result<f64, SolverError>,
{
  let delta = f64::EPSILON.sqrt() * if y == 0.0 { 1.0 } else { y.abs() };
  match (g(y + delta), g(y - delta)) {
    (Ok(up), Ok(down)) => Ok((up - down) / (2.0 * delta)),
    (Ok(up), Err(_)) => Ok((up - residual) / delta),
    (Err(_), Ok(down)) => Ok((residual - down) / delta),
    (Err(err), Err(_)) => Err(err),
  }
}

/// The largest fraction `correction / 2^k` for which `g(y - correction)` is
/// defined, together with that value of `g`.
fn damped_step<G>(
  g: &G,
  y: f64,
  mut correction: f64,
) -> Result<(f64, f64), SolverError>
where
  G: Fn(f64) -> Result<f64, SolverError>,
{
  let mut halvings = 0;
  loop {
    match g(y - correction) {
      Ok(value) => return Ok((correction, value)),
      Err(err) if halvings == MAX_HALVINGS => return Err(err),
      Err(_) => {
        correction /= 2.0;
        halvings += 1;
      }
    }
  }
}
