//! Fixed-step integration of `y' = f(x, y)` on a uniform sample grid.

mod explicit;
mod implicit;
mod root;

pub use explicit::integrate_explicit;
pub use implicit::integrate_implicit;
pub use root::NewtonSettings;

use crate::SolverError;

/// Upper bound on `breadth / step`, so a typo cannot request an allocation
/// of billions of samples.
pub const MAX_SAMPLES: usize = 50_000_000;

/// Rounding slack in ulps when counting samples, so `0.3 / 0.1` counts 3 and
/// not 2 while `2.9999999999 / 1` still counts 2.
const COUNT_ULPS: f64 = 4.0;

/// Sample points `x_i = x0 + i * step` for `i in 0..len`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
  x0: f64,
  step: f64,
  len: usize,
}

impl Grid {
  /// Grid covering `breadth` from `x0`: `floor(breadth / step)` points,
  /// never fewer than the starting point itself.
  pub fn new(x0: f64, step: f64, breadth: f64) -> Result<Self, SolverError> {
    if !x0.is_finite() {
      return Err(SolverError::InvalidConfig(format!(
        "start point must be finite, got {x0}"
      )));
    }
    if !(step.is_finite() && step > 0.0) {
      return Err(SolverError::InvalidConfig(format!(
        "step must be a positive number, got {step}"
      )));
    }
    if !(breadth.is_finite() && breadth > 0.0) {
      return Err(SolverError::InvalidConfig(format!(
        "breadth must be a positive number, got {breadth}"
      )));
    }
    let ratio = breadth / step;
    let nearest = ratio.round();
    let slack = COUNT_ULPS * f64::EPSILON * ratio;
    let count = if (ratio - nearest).abs() <= slack {
      nearest
    } else {
      ratio.floor()
    };
    if count > MAX_SAMPLES as f64 {
      return Err(SolverError::InvalidConfig(format!(
        "breadth {breadth} with step {step} needs more than {MAX_SAMPLES} samples"
      )));
    }
    Ok(Self {
      x0,
      step,
      len: (count as usize).max(1),
    })
  }

  pub fn x0(&self) -> f64 {
    self.x0
  }

  pub fn step(&self) -> f64 {
    self.step
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// The `i`-th sample point, computed directly rather than accumulated.
  pub fn x(&self, i: usize) -> f64 {
    self.x0 + i as f64 * self.step
  }
}
