use pest::iterators::Pair;

use crate::evaluator::{compile, Evaluable};
use crate::{reserved, strip_whitespace, CauchyParser, Rule, SolverError};

/// A parsed first-order equation `func_name' = f(var_name, func_name)`.
///
/// Both names are single ASCII letters and always differ from each other.
#[derive(Debug, Clone)]
pub struct EquationSpec {
  func_name: char,
  var_name: char,
  derivative: Evaluable,
  raw: String,
}

impl EquationSpec {
  /// Build an equation from already separated parts, compiling `body`.
  pub fn new(
    func_name: &str,
    var_name: &str,
    body: &str,
  ) -> Result<Self, SolverError> {
    let func = single_letter(func_name, "function")?;
    let var = single_letter(var_name, "variable")?;
    if func == var {
      return Err(SolverError::FormatError(format!(
        "function and variable must differ, both are `{func}`"
      )));
    }
    let derivative = compile(body, func, var)?;
    Ok(Self {
      func_name: func,
      var_name: var,
      derivative,
      raw: format!("d{func}/d{var}={body}"),
    })
  }

  pub fn func_name(&self) -> char {
    self.func_name
  }

  pub fn var_name(&self) -> char {
    self.var_name
  }

  pub fn derivative(&self) -> &Evaluable {
    &self.derivative
  }

  /// The equation text as it was given, whitespace removed.
  pub fn raw(&self) -> &str {
    &self.raw
  }
}

/// Parse `dF/dV=<expr>` or `F'=<expr>`.
///
/// In the second form the variable is the first letter of `<expr>` that is
/// not `F` once reserved names are removed; it defaults to `t` when `F` is
/// `x` and to `x` otherwise.
pub fn parse_equation(text: &str) -> Result<EquationSpec, SolverError> {
  let stripped = strip_whitespace(text);
  let equation = CauchyParser::parse_rule(Rule::Equation, &stripped)
    .ok()
    .and_then(|mut pairs| pairs.next())
    .and_then(|pair| pair.into_inner().next())
    .ok_or_else(|| format_error(&stripped))?;

  let mut spec = match equation.as_rule() {
    Rule::Leibniz => {
      let [func, var, body] = parts(equation, &stripped)?;
      EquationSpec::new(func, var, body)?
    }
    Rule::Prime => {
      let [func, body] = parts(equation, &stripped)?;
      let var = infer_variable(func, body);
      EquationSpec::new(func, &var.to_string(), body)?
    }
    _ => return Err(format_error(&stripped)),
  };
  spec.raw = stripped;
  Ok(spec)
}

fn parts<'i, const N: usize>(
  pair: Pair<'i, Rule>,
  text: &str,
) -> Result<[&'i str; N], SolverError> {
  let texts: Vec<&'i str> = pair.into_inner().map(|p| p.as_str()).collect();
  texts.try_into().map_err(|_| format_error(text))
}

fn infer_variable(func_name: &str, body: &str) -> char {
  let mut remaining = body.to_string();
  for name in reserved::names_longest_first() {
    remaining = remaining.replace(name, "");
  }
  let func = func_name.chars().next();
  remaining
    .chars()
    .find(|c| c.is_ascii_alphabetic() && Some(*c) != func)
    .unwrap_or(if func == Some('x') { 't' } else { 'x' })
}

pub(crate) fn single_letter(
  name: &str,
  role: &str,
) -> Result<char, SolverError> {
  let mut chars = name.chars();
  match (chars.next(), chars.next()) {
    (Some(c), None) if c.is_ascii_alphabetic() => Ok(c),
    _ => Err(SolverError::FormatError(format!(
      "{role} name must be a single latin letter, got `{name}`"
    ))),
  }
}

fn format_error(text: &str) -> SolverError {
  SolverError::FormatError(format!(
    "`{text}` is neither `dy/dx=<expr>` nor `y'=<expr>`"
  ))
}
