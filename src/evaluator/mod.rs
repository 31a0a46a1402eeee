//! Compilation of derivative text into an [`Evaluable`] function of the
//! independent and dependent variables.
//!
//! Only arithmetic (`+ - * / ^`), numeric literals, parentheses, the two bound
//! identifiers and reserved names are accepted. Anything else is rejected
//! while compiling, so evaluation never reaches code outside that grammar.

mod builder;

pub(crate) use builder::grammar_error;

use crate::syntax::{BinaryOperator, Binding, Expr, UnaryOperator};
use crate::{Rule, SolverError};

/// A compiled derivative `f(x, y)`.
#[derive(Debug, Clone)]
pub struct Evaluable {
  tree: Expr,
  func_name: char,
  var_name: char,
}

/// Compile `text` with `var_name` bound to the first argument of
/// [`Evaluable::evaluate`] and `func_name` to the second.
pub fn compile(
  text: &str,
  func_name: char,
  var_name: char,
) -> Result<Evaluable, SolverError> {
  let program = crate::parse(text)?
    .next()
    .filter(|pair| pair.as_rule() == Rule::Expression)
    .ok_or_else(|| SolverError::FormatError(format!("empty expression `{text}`")))?;
  let span = program.as_span();
  let sum = program
    .into_inner()
    .find(|pair| pair.as_rule() == Rule::Sum)
    .ok_or_else(|| grammar_error(span, "expected an expression".into()))?;

  let scope = builder::Scope {
    func_name,
    var_name,
  };
  let tree = scope.build(sum)?;
  Ok(Evaluable {
    tree,
    func_name,
    var_name,
  })
}

impl Evaluable {
  /// Evaluate with the independent variable set to `x` and the dependent
  /// one to `y`.
  pub fn evaluate(&self, x: f64, y: f64) -> Result<f64, SolverError> {
    eval(&self.tree, x, y)
  }

  pub fn tree(&self) -> &Expr {
    &self.tree
  }

  pub fn func_name(&self) -> char {
    self.func_name
  }

  pub fn var_name(&self) -> char {
    self.var_name
  }
}

impl std::fmt::Display for Evaluable {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.tree)
  }
}

fn eval(expr: &Expr, x: f64, y: f64) -> Result<f64, SolverError> {
  match expr {
    Expr::Real(value) => Ok(*value),
    Expr::Constant { value, .. } => Ok(*value),
    Expr::Variable { binding, .. } => Ok(match binding {
      Binding::Independent => x,
      Binding::Dependent => y,
    }),
    Expr::FunctionCall { func, arg, .. } => func(eval(arg, x, y)?),
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => Ok(-eval(operand, x, y)?),
    Expr::BinaryOp { op, left, right } => {
      let l = eval(left, x, y)?;
      let r = eval(right, x, y)?;
      match op {
        BinaryOperator::Plus => checked(l, '+', r, l + r),
        BinaryOperator::Minus => checked(l, '-', r, l - r),
        BinaryOperator::Times => checked(l, '*', r, l * r),
        BinaryOperator::Divide => {
          if r == 0.0 {
            Err(SolverError::DivisionByZeroError)
          } else {
            checked(l, '/', r, l / r)
          }
        }
        BinaryOperator::Power => power(l, r),
      }
    }
  }
}

/// `result` of `l op r`, unless finite operands overflowed.
fn checked(
  l: f64,
  op: char,
  r: f64,
  result: f64,
) -> Result<f64, SolverError> {
  if result.is_infinite() && l.is_finite() && r.is_finite() {
    return Err(SolverError::DomainError(format!("{l}{op}{r} overflows")));
  }
  Ok(result)
}

/// Real exponentiation; complex results and overflow are errors.
fn power(base: f64, exponent: f64) -> Result<f64, SolverError> {
  if base == 0.0 && exponent < 0.0 {
    return Err(SolverError::DivisionByZeroError);
  }
  if base < 0.0 && exponent.fract() != 0.0 {
    return Err(SolverError::DomainError(format!(
      "{base}^{exponent} is not a real number"
    )));
  }
  let result = if exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as f64
  {
    base.powi(exponent as i32)
  } else {
    base.powf(exponent)
  };
  if result.is_infinite() && base.is_finite() && exponent.is_finite() {
    return Err(SolverError::DomainError(format!(
      "{base}^{exponent} overflows"
    )));
  }
  Ok(result)
}
