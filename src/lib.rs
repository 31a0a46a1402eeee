//! Numerical solver for first-order Cauchy problems.
//!
//! An equation such as `dy/dx = cos(x)*y` is compiled by a restricted
//! arithmetic parser into an evaluable derivative, paired with an initial
//! condition `y(0) = 2`, and integrated with an explicit Runge-Kutta method
//! described by a Butcher tableau or with an implicit backward Euler step.

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

pub mod evaluator;
pub mod integrators;
pub mod methods;
pub mod problem;
pub mod reserved;
pub mod solver;
pub mod syntax;

pub use evaluator::{compile, Evaluable};
pub use integrators::{Grid, NewtonSettings};
pub use methods::{ButcherTableau, MethodTable};
pub use problem::{parse_condition, parse_equation, Condition, EquationSpec};
pub use solver::{Solution, SolveOptions, Solver};

#[derive(Parser)]
#[grammar = "cauchy.pest"]
pub struct CauchyParser;

#[derive(Error, Debug)]
pub enum SolverError {
  #[error("Format error: {0}")]
  FormatError(String),
  #[error("Syntax error: {0}")]
  SyntaxError(#[from] Box<pest::error::Error<Rule>>),
  #[error("Unknown symbol: {0}")]
  UnknownSymbolError(String),
  #[error("Domain error: {0}")]
  DomainError(String),
  #[error("Division by zero")]
  DivisionByZeroError,
  #[error(
    "Implicit step at x = {x} did not converge within {iterations} iterations (residual {residual:e})"
  )]
  NonConvergenceError {
    x: f64,
    /// The Newton iteration budget that was exhausted or abandoned.
    iterations: usize,
    residual: f64,
  },
  #[error(
    "Condition is stated for `{condition}` but the equation solves for `{equation}`"
  )]
  MismatchError { equation: char, condition: char },
  #[error("Invalid Butcher tableau: {0}")]
  InvalidTableau(String),
  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),
}

pub type Result<T, E = SolverError> = std::result::Result<T, E>;

impl CauchyParser {
  pub fn parse_rule(
    rule: Rule,
    input: &str,
  ) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>>
  {
    Self::parse(rule, input).map_err(Box::new)
  }
}

/// Parse `input` with the derivative-expression grammar.
pub fn parse(
  input: &str,
) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  CauchyParser::parse_rule(Rule::Expression, input)
}

/// Remove every whitespace character; equations and conditions are matched
/// against their templates without any.
pub fn strip_whitespace(input: &str) -> String {
  input.chars().filter(|c| !c.is_whitespace()).collect()
}
