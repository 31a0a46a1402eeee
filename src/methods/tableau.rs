use crate::SolverError;

/// Coefficients `(a, b, c)` of an explicit Runge-Kutta method.
///
/// `a` is strictly lower-triangular: row `j` holds the `j` weights of the
/// stages before it. The rows are stored packed, row `j` starting at
/// `j * (j - 1) / 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct ButcherTableau {
  stages: usize,
  a: Vec<f64>,
  b: Vec<f64>,
  c: Vec<f64>,
}

impl ButcherTableau {
  /// Validate and pack a tableau given as ragged rows.
  pub fn new(
    a: Vec<Vec<f64>>,
    b: Vec<f64>,
    c: Vec<f64>,
  ) -> Result<Self, SolverError> {
    let stages = b.len();
    if stages == 0 {
      return Err(SolverError::InvalidTableau(
        "at least one stage is required".into(),
      ));
    }
    if c.len() != stages {
      return Err(SolverError::InvalidTableau(format!(
        "{stages} weights but {} nodes",
        c.len()
      )));
    }
    if a.len() != stages {
      return Err(SolverError::InvalidTableau(format!(
        "{stages} stages but {} rows in a",
        a.len()
      )));
    }
    if let Some((j, row)) = a.iter().enumerate().find(|(j, row)| row.len() != *j)
    {
      return Err(SolverError::InvalidTableau(format!(
        "row {j} of a must have {j} entries, got {}",
        row.len()
      )));
    }
    let all_finite = a
      .iter()
      .flatten()
      .chain(b.iter())
      .chain(c.iter())
      .all(|v| v.is_finite());
    if !all_finite {
      return Err(SolverError::InvalidTableau(
        "coefficients must be finite".into(),
      ));
    }
    Ok(Self {
      stages,
      a: a.into_iter().flatten().collect(),
      b,
      c,
    })
  }

  /// Pack a tableau whose shape is known to be valid.
  fn packed(a: &[&[f64]], b: &[f64], c: &[f64]) -> Self {
    Self {
      stages: b.len(),
      a: a.iter().flat_map(|row| row.iter().copied()).collect(),
      b: b.to_vec(),
      c: c.to_vec(),
    }
  }

  /// Classical fourth-order method.
  pub fn rk4() -> Self {
    Self::packed(
      &[&[], &[0.5], &[0.0, 0.5], &[0.0, 0.0, 1.0]],
      &[1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0],
      &[0.0, 0.5, 0.5, 1.0],
    )
  }

  /// Forward Euler as a one-stage tableau.
  pub fn euler() -> Self {
    Self::packed(&[&[]], &[1.0], &[0.0])
  }

  /// Kutta's 3/8 rule.
  pub fn three_eighths() -> Self {
    Self::packed(
      &[&[], &[1.0 / 3.0], &[-1.0 / 3.0, 1.0], &[1.0, -1.0, 1.0]],
      &[1.0 / 8.0, 3.0 / 8.0, 3.0 / 8.0, 1.0 / 8.0],
      &[0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0],
    )
  }

  pub fn stages(&self) -> usize {
    self.stages
  }

  /// Weights of stages `0..j` used by stage `j`.
  pub fn a_row(&self, j: usize) -> &[f64] {
    let start = j * j.saturating_sub(1) / 2;
    &self.a[start..start + j]
  }

  pub fn b(&self) -> &[f64] {
    &self.b
  }

  pub fn c(&self) -> &[f64] {
    &self.c
  }

  /// The `a` matrix unpacked back into ragged rows.
  pub fn a_rows(&self) -> Vec<Vec<f64>> {
    (0..self.stages).map(|j| self.a_row(j).to_vec()).collect()
  }
}

impl Default for ButcherTableau {
  fn default() -> Self {
    Self::rk4()
  }
}
