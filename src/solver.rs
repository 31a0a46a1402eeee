//! The solver facade: one equation, one initial condition, many solves.

use log::debug;

use crate::integrators::{
  integrate_explicit, integrate_implicit, Grid, NewtonSettings,
};
use crate::methods::{ButcherTableau, MethodTable, CUSTOM};
use crate::problem::{parse_condition, parse_equation, Condition, EquationSpec};
use crate::SolverError;

/// Label of the implicit scheme in [`Solution::method`].
pub const IMPLICIT_EULER: &str = "implicit Euler";

/// Options for [`Solver::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOptions {
  /// Distance between consecutive samples.
  pub step: f64,
  /// Span of the independent variable to cover, starting at `x0`.
  pub breadth: f64,
  /// Registered method name; anything else selects `tableau`.
  pub method: String,
  /// Tableau used when `method` is not registered.
  pub tableau: ButcherTableau,
  /// Use backward Euler instead of an explicit tableau.
  pub implicit: bool,
  pub newton: NewtonSettings,
}

impl Default for SolveOptions {
  fn default() -> Self {
    Self {
      step: 0.05,
      breadth: 100.0,
      method: CUSTOM.to_string(),
      tableau: ButcherTableau::rk4(),
      implicit: false,
      newton: NewtonSettings::default(),
    }
  }
}

impl SolveOptions {
  pub fn with_step(mut self, step: f64) -> Self {
    self.step = step;
    self
  }

  pub fn with_breadth(mut self, breadth: f64) -> Self {
    self.breadth = breadth;
    self
  }

  pub fn with_method(mut self, method: impl Into<String>) -> Self {
    self.method = method.into();
    self
  }

  pub fn with_tableau(mut self, tableau: ButcherTableau) -> Self {
    self.tableau = tableau;
    self
  }

  pub fn with_implicit(mut self, implicit: bool) -> Self {
    self.implicit = implicit;
    self
  }

  pub fn with_newton(mut self, newton: NewtonSettings) -> Self {
    self.newton = newton;
    self
  }
}

/// Samples `(x_i, y_i)` of one solve, starting at the initial condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
  pub points: Vec<(f64, f64)>,
  /// Registered method name, `custom` or [`IMPLICIT_EULER`].
  pub method: String,
  /// Notices about the solve, such as an unrecognised method name.
  pub warnings: Vec<String>,
}

impl Solution {
  pub fn xs(&self) -> Vec<f64> {
    self.points.iter().map(|(x, _)| *x).collect()
  }

  pub fn ys(&self) -> Vec<f64> {
    self.points.iter().map(|(_, y)| *y).collect()
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  pub fn last(&self) -> Option<(f64, f64)> {
    self.points.last().copied()
  }
}

/// A Cauchy problem ready to be integrated.
#[derive(Debug, Clone)]
pub struct Solver {
  equation: EquationSpec,
  condition: Condition,
}

impl Solver {
  /// Parse an equation such as `dy/dx = x^2*y` or `y' = x^2*y` and a
  /// condition such as `y(0.5) = 20`. Whitespace is ignored.
  pub fn new(equation: &str, condition: &str) -> Result<Self, SolverError> {
    Self::from_parts(parse_equation(equation)?, parse_condition(condition)?)
  }

  pub fn from_parts(
    equation: EquationSpec,
    condition: Condition,
  ) -> Result<Self, SolverError> {
    condition.check_against(&equation)?;
    Ok(Self {
      equation,
      condition,
    })
  }

  pub fn equation(&self) -> &EquationSpec {
    &self.equation
  }

  pub fn condition(&self) -> &Condition {
    &self.condition
  }

  /// Label for plots of a solution: the equation and condition as given.
  pub fn title(&self) -> String {
    format!("[{}, {}]", self.equation.raw(), self.condition.raw())
  }

  pub fn solve(&self, options: &SolveOptions) -> Result<Solution, SolverError> {
    let (x0, y0) = self.condition.point();
    let grid = Grid::new(x0, options.step, options.breadth)?;
    let derivative = self.equation.derivative();
    let f = |x: f64, y: f64| derivative.evaluate(x, y);

    if options.implicit {
      debug!(
        "solving {} with {IMPLICIT_EULER}: {} samples, step {}",
        self.title(),
        grid.len(),
        grid.step()
      );
      let points = integrate_implicit(f, &grid, y0, &options.newton)?;
      return Ok(Solution {
        points,
        method: IMPLICIT_EULER.to_string(),
        warnings: Vec::new(),
      });
    }

    let warnings: Vec<String> =
      MethodTable::fallback_notice(&options.method).into_iter().collect();
    let method = match MethodTable::lookup(&options.method) {
      Some(_) => options.method.to_uppercase(),
      None => CUSTOM.to_string(),
    };
    let tableau = MethodTable::resolve(&options.method, options.tableau.clone());
    debug!(
      "solving {} with {method} ({} stages): {} samples, step {}",
      self.title(),
      tableau.stages(),
      grid.len(),
      grid.step()
    );
    let points = integrate_explicit(f, &tableau, &grid, y0)?;
    Ok(Solution {
      points,
      method,
      warnings,
    })
  }
}

impl std::fmt::Display for Solver {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    writeln!(f, "raw: {}", self.title())?;
    write!(
      f,
      "func_name: {}, var_name: {}, condition: {}({}) = {}",
      self.equation.func_name(),
      self.equation.var_name(),
      self.condition.func_name(),
      self.condition.x0(),
      self.condition.y0()
    )
  }
}
