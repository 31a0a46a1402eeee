use crate::problem::equation::single_letter;
use crate::problem::EquationSpec;
use crate::{strip_whitespace, CauchyParser, Rule, SolverError};

/// Initial condition `F(x0) = y0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
  func_name: char,
  x0: f64,
  y0: f64,
  raw: String,
}

impl Condition {
  pub fn new(func_name: char, x0: f64, y0: f64) -> Self {
    Self {
      func_name,
      x0,
      y0,
      raw: format!("{func_name}({x0})={y0}"),
    }
  }

  pub fn func_name(&self) -> char {
    self.func_name
  }

  pub fn x0(&self) -> f64 {
    self.x0
  }

  pub fn y0(&self) -> f64 {
    self.y0
  }

  /// `(x0, y0)`.
  pub fn point(&self) -> (f64, f64) {
    (self.x0, self.y0)
  }

  pub fn raw(&self) -> &str {
    &self.raw
  }

  /// Fails unless the condition is stated for the equation's function.
  pub fn check_against(
    &self,
    equation: &EquationSpec,
  ) -> Result<(), SolverError> {
    if self.func_name != equation.func_name() {
      return Err(SolverError::MismatchError {
        equation: equation.func_name(),
        condition: self.func_name,
      });
    }
    Ok(())
  }
}

/// Parse `F(x0)=y0` where both values are finite real literals.
pub fn parse_condition(text: &str) -> Result<Condition, SolverError> {
  let stripped = strip_whitespace(text);
  let fields: Vec<&str> = CauchyParser::parse_rule(Rule::Condition, &stripped)
    .ok()
    .and_then(|mut pairs| pairs.next())
    .map(|pair| {
      pair
        .into_inner()
        .filter(|p| p.as_rule() != Rule::EOI)
        .map(|p| p.as_str())
        .collect()
    })
    .ok_or_else(|| {
      SolverError::FormatError(format!("`{stripped}` is not of the form y(x0)=y0"))
    })?;

  let (name, x0, y0) = match fields.as_slice() {
    [name, x0, y0] => (*name, *x0, *y0),
    _ => {
      return Err(SolverError::FormatError(format!(
        "`{stripped}` is not of the form y(x0)=y0"
      )));
    }
  };
  let func_name = single_letter(name, "function")?;
  let condition = Condition {
    func_name,
    x0: parse_real(x0)?,
    y0: parse_real(y0)?,
    raw: stripped.clone(),
  };
  Ok(condition)
}

fn parse_real(text: &str) -> Result<f64, SolverError> {
  match text.parse::<f64>() {
    Ok(value) if value.is_finite() => Ok(value),
    _ => Err(SolverError::FormatError(format!(
      "`{text}` is not a finite number"
    ))),
  }
}
