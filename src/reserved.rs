//! Reserved names usable inside a derivative: constants and unary functions.
//!
//! The table is built once per process and never mutated.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::SolverError;

/// A reserved unary function. Out-of-domain arguments are errors, never NaN.
pub type UnaryFn = fn(f64) -> Result<f64, SolverError>;

#[derive(Debug, Clone, Copy)]
pub enum ReservedSymbol {
  Constant(f64),
  Function(UnaryFn),
}

static RESERVED: LazyLock<HashMap<&'static str, ReservedSymbol>> =
  LazyLock::new(|| {
    use ReservedSymbol::{Constant, Function};
    HashMap::from([
      ("cos", Function(cos)),
      ("sin", Function(sin)),
      ("sqrt", Function(sqrt)),
      ("fact", Function(fact)),
      ("log", Function(ln)),
      ("ln", Function(ln)),
      ("log10", Function(log10)),
      ("tan", Function(tan)),
      ("tg", Function(tan)),
      ("ctg", Function(cot)),
      ("cot", Function(cot)),
      ("arcsin", Function(asin)),
      ("asin", Function(asin)),
      ("arccos", Function(acos)),
      ("acos", Function(acos)),
      ("arctan", Function(atan)),
      ("arctg", Function(atan)),
      ("atan", Function(atan)),
      ("arcctg", Function(acot)),
      ("arccot", Function(acot)),
      ("acot", Function(acot)),
      ("pi", Constant(std::f64::consts::PI)),
      ("e", Constant(std::f64::consts::E)),
    ])
  });

static NAMES_LONGEST_FIRST: LazyLock<Vec<&'static str>> =
  LazyLock::new(|| {
    let mut names: Vec<&'static str> = RESERVED.keys().copied().collect();
    // Ties broken alphabetically so the order is stable across runs.
    names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    names
  });

/// Look up a reserved name. Matching is exact and case-sensitive.
pub fn lookup(name: &str) -> Option<(&'static str, ReservedSymbol)> {
  RESERVED
    .get_key_value(name)
    .map(|(key, symbol)| (*key, *symbol))
}

pub fn is_reserved(name: &str) -> bool {
  RESERVED.contains_key(name)
}

/// All reserved names, longest first, e.g. `arctan` before `tan`.
pub fn names_longest_first() -> &'static [&'static str] {
  &NAMES_LONGEST_FIRST
}

fn domain_error(func: &str, x: f64) -> SolverError {
  SolverError::DomainError(format!("{func}({x}) is undefined"))
}

fn cos(x: f64) -> Result<f64, SolverError> {
  Ok(x.cos())
}

fn sin(x: f64) -> Result<f64, SolverError> {
  Ok(x.sin())
}

fn tan(x: f64) -> Result<f64, SolverError> {
  Ok(x.tan())
}

fn sqrt(x: f64) -> Result<f64, SolverError> {
  if x < 0.0 {
    return Err(domain_error("sqrt", x));
  }
  Ok(x.sqrt())
}

fn ln(x: f64) -> Result<f64, SolverError> {
  if x <= 0.0 {
    return Err(domain_error("log", x));
  }
  Ok(x.ln())
}

fn log10(x: f64) -> Result<f64, SolverError> {
  if x <= 0.0 {
    return Err(domain_error("log10", x));
  }
  Ok(x.log10())
}

/// Largest n with n! representable as a finite f64.
const MAX_FACTORIAL: f64 = 170.0;

fn fact(x: f64) -> Result<f64, SolverError> {
  if x < 0.0 || x.fract() != 0.0 {
    return Err(SolverError::DomainError(format!(
      "fact({x}) is only defined for non-negative integers"
    )));
  }
  if x > MAX_FACTORIAL {
    return Err(SolverError::DomainError(format!(
      "fact({x}) is too large to represent"
    )));
  }
  Ok((2..=x as u32).fold(1.0, |acc, k| acc * k as f64))
}

fn cot(x: f64) -> Result<f64, SolverError> {
  let t = x.tan();
  if t == 0.0 {
    return Err(SolverError::DivisionByZeroError);
  }
  Ok(1.0 / t)
}

fn asin(x: f64) -> Result<f64, SolverError> {
  if !(-1.0..=1.0).contains(&x) {
    return Err(domain_error("arcsin", x));
  }
  Ok(x.asin())
}

fn acos(x: f64) -> Result<f64, SolverError> {
  if !(-1.0..=1.0).contains(&x) {
    return Err(domain_error("arccos", x));
  }
  Ok(x.acos())
}

fn atan(x: f64) -> Result<f64, SolverError> {
  Ok(x.atan())
}

fn acot(x: f64) -> Result<f64, SolverError> {
  if x == 0.0 {
    return Err(SolverError::DivisionByZeroError);
  }
  Ok((1.0 / x).atan())
}
