//! Lowering of pest pairs into a resolved [`Expr`] tree.

use pest::error::ErrorVariant;
use pest::iterators::Pair;
use pest::Span;

use crate::reserved::{self, ReservedSymbol};
use crate::syntax::{BinaryOperator, Binding, Expr, UnaryOperator};
use crate::{Rule, SolverError};

/// Positional syntax error raised while lowering an already parsed tree.
pub(crate) fn grammar_error(span: Span<'_>, message: String) -> SolverError {
  SolverError::SyntaxError(Box::new(pest::error::Error::new_from_span(
    ErrorVariant::CustomError { message },
    span,
  )))
}

/// The two identifiers bound by the equation.
pub(crate) struct Scope {
  pub func_name: char,
  pub var_name: char,
}

impl Scope {
  pub fn build(&self, pair: Pair<'_, Rule>) -> Result<Expr, SolverError> {
    let span = pair.as_span();
    match pair.as_rule() {
      Rule::Sum | Rule::Product => self.fold_binary(pair),
      Rule::Unary | Rule::Exponent => self.build_unary(pair),
      Rule::Coefficient => {
        let mut inner = pair.into_inner();
        let coefficient = self.build_next(&mut inner, span)?;
        let factor = self.build_next(&mut inner, span)?;
        Ok(Expr::BinaryOp {
          op: BinaryOperator::Times,
          left: Box::new(coefficient),
          right: Box::new(factor),
        })
      }
      Rule::Factor | Rule::Power => {
        let mut inner = pair.into_inner();
        let base = self.build_next(&mut inner, span)?;
        // Optional `^ <exponent>` tail; the operator pair carries nothing.
        match (inner.next(), inner.next()) {
          (Some(_), Some(exponent)) => Ok(Expr::BinaryOp {
            op: BinaryOperator::Power,
            left: Box::new(base),
            right: Box::new(self.build(exponent)?),
          }),
          _ => Ok(base),
        }
      }
      Rule::Group => {
        let mut inner = pair.into_inner();
        self.build_next(&mut inner, span)
      }
      Rule::Call => self.build_call(pair),
      Rule::Number => pair
        .as_str()
        .parse::<f64>()
        .map(Expr::Real)
        .map_err(|e| grammar_error(span, format!("invalid number: {e}"))),
      Rule::Identifier => self.resolve_identifier(pair),
      other => Err(grammar_error(span, format!("unexpected {other:?}"))),
    }
  }

  fn build_next(
    &self,
    inner: &mut pest::iterators::Pairs<'_, Rule>,
    span: Span<'_>,
  ) -> Result<Expr, SolverError> {
    match inner.next() {
      Some(pair) => self.build(pair),
      None => Err(grammar_error(span, "incomplete expression".into())),
    }
  }

  /// Left-associative chain: `operand (op operand)*`.
  fn fold_binary(&self, pair: Pair<'_, Rule>) -> Result<Expr, SolverError> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let mut acc = self.build_next(&mut inner, span)?;
    while let Some(op_pair) = inner.next() {
      let op = match op_pair.as_str() {
        "+" => BinaryOperator::Plus,
        "-" => BinaryOperator::Minus,
        "*" => BinaryOperator::Times,
        "/" => BinaryOperator::Divide,
        other => {
          return Err(grammar_error(
            op_pair.as_span(),
            format!("unexpected operator `{other}`"),
          ));
        }
      };
      let right = self.build_next(&mut inner, span)?;
      acc = Expr::BinaryOp {
        op,
        left: Box::new(acc),
        right: Box::new(right),
      };
    }
    Ok(acc)
  }

  fn build_unary(&self, pair: Pair<'_, Rule>) -> Result<Expr, SolverError> {
    let span = pair.as_span();
    let mut negations = 0usize;
    let mut operand = None;
    for inner in pair.into_inner() {
      if inner.as_rule() == Rule::Sign {
        if inner.as_str() == "-" {
          negations += 1;
        }
      } else {
        operand = Some(self.build(inner)?);
      }
    }
    let operand = operand
      .ok_or_else(|| grammar_error(span, "missing operand".into()))?;
    if negations % 2 == 1 {
      Ok(Expr::UnaryOp {
        op: UnaryOperator::Minus,
        operand: Box::new(operand),
      })
    } else {
      Ok(operand)
    }
  }

  fn build_call(&self, pair: Pair<'_, Rule>) -> Result<Expr, SolverError> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let name_pair = inner
      .next()
      .ok_or_else(|| grammar_error(span, "missing function name".into()))?;
    let name = name_pair.as_str();
    if self.binding(name).is_some() {
      return Err(grammar_error(
        name_pair.as_span(),
        format!("`{name}` is a variable and cannot be called"),
      ));
    }
    match reserved::lookup(name) {
      Some((name, ReservedSymbol::Function(func))) => {
        let arg = self.build_next(&mut inner, span)?;
        Ok(Expr::FunctionCall {
          name,
          func,
          arg: Box::new(arg),
        })
      }
      Some((name, ReservedSymbol::Constant(_))) => Err(grammar_error(
        name_pair.as_span(),
        format!("`{name}` is a constant and cannot be called"),
      )),
      None => Err(SolverError::UnknownSymbolError(name.to_string())),
    }
  }

  fn resolve_identifier(
    &self,
    pair: Pair<'_, Rule>,
  ) -> Result<Expr, SolverError> {
    let name = pair.as_str();
    if let Some((letter, binding)) = self.binding(name) {
      return Ok(Expr::Variable {
        name: letter,
        binding,
      });
    }
    match reserved::lookup(name) {
      Some((name, ReservedSymbol::Constant(value))) => {
        Ok(Expr::Constant { name, value })
      }
      Some((name, ReservedSymbol::Function(_))) => Err(grammar_error(
        pair.as_span(),
        format!("`{name}` is a function and needs an argument, e.g. {name}(x)"),
      )),
      None => Err(SolverError::UnknownSymbolError(name.to_string())),
    }
  }

  /// Bound identifiers take precedence over reserved names.
  fn binding(&self, name: &str) -> Option<(char, Binding)> {
    let mut chars = name.chars();
    let letter = chars.next()?;
    if chars.next().is_some() {
      return None;
    }
    if letter == self.var_name {
      Some((letter, Binding::Independent))
    } else if letter == self.func_name {
      Some((letter, Binding::Dependent))
    } else {
      None
    }
  }
}
