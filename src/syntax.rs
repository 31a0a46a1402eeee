//! Compiled expression tree for derivative right-hand sides.
//!
//! Every node is resolved at compile time: identifiers are either one of the
//! two bound variables or a reserved constant/function, so evaluating a tree
//! can never reach anything outside arithmetic.

use crate::reserved::UnaryFn;

/// Which of the two bound identifiers a variable node refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
  /// The respect-variable, e.g. `x` in `dy/dx`.
  Independent,
  /// The unknown function, e.g. `y` in `dy/dx`.
  Dependent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
  Plus,
  Minus,
  Times,
  Divide,
  Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
  Minus,
}

#[derive(Debug, Clone)]
pub enum Expr {
  Real(f64),
  Variable {
    name: char,
    binding: Binding,
  },
  Constant {
    name: &'static str,
    value: f64,
  },
  FunctionCall {
    name: &'static str,
    func: UnaryFn,
    arg: Box<Expr>,
  },
  UnaryOp {
    op: UnaryOperator,
    operand: Box<Expr>,
  },
  BinaryOp {
    op: BinaryOperator,
    left: Box<Expr>,
    right: Box<Expr>,
  },
}

impl BinaryOperator {
  fn symbol(self) -> &'static str {
    match self {
      BinaryOperator::Plus => "+",
      BinaryOperator::Minus => "-",
      BinaryOperator::Times => "*",
      BinaryOperator::Divide => "/",
      BinaryOperator::Power => "^",
    }
  }

  fn precedence(self) -> u8 {
    match self {
      BinaryOperator::Plus | BinaryOperator::Minus => 1,
      BinaryOperator::Times | BinaryOperator::Divide => 2,
      BinaryOperator::Power => 4,
    }
  }
}

const UNARY_PRECEDENCE: u8 = 3;
const ATOM_PRECEDENCE: u8 = 5;

fn precedence(expr: &Expr) -> u8 {
  match expr {
    Expr::BinaryOp { op, .. } => op.precedence(),
    Expr::UnaryOp { .. } => UNARY_PRECEDENCE,
    Expr::Real(r) if *r < 0.0 => UNARY_PRECEDENCE,
    _ => ATOM_PRECEDENCE,
  }
}

fn format_real(value: f64) -> String {
  if value.fract() == 0.0 && value.abs() < 1e15 {
    format!("{}", value as i64)
  } else {
    format!("{value}")
  }
}

fn wrap(expr: &Expr, needs_parens: bool) -> String {
  let text = expr_to_string(expr);
  if needs_parens {
    format!("({text})")
  } else {
    text
  }
}

/// Render an expression with the minimum parentheses needed to read back
/// to the same tree.
pub fn expr_to_string(expr: &Expr) -> String {
  match expr {
    Expr::Real(r) => format_real(*r),
    Expr::Variable { name, .. } => name.to_string(),
    Expr::Constant { name, .. } => name.to_string(),
    Expr::FunctionCall { name, arg, .. } => {
      format!("{}({})", name, expr_to_string(arg))
    }
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => {
      format!("-{}", wrap(operand, precedence(operand) < UNARY_PRECEDENCE))
    }
    Expr::BinaryOp { op, left, right } => {
      let own = op.precedence();
      // `^` is right-associative, the others associate to the left.
      let (left_parens, right_parens) = if *op == BinaryOperator::Power {
        (precedence(left) <= own, precedence(right) < UNARY_PRECEDENCE)
      } else {
        (precedence(left) < own, precedence(right) <= own)
      };
      let separator = match op {
        BinaryOperator::Plus | BinaryOperator::Minus => {
          format!(" {} ", op.symbol())
        }
        _ => op.symbol().to_string(),
      };
      format!(
        "{}{}{}",
        wrap(left, left_parens),
        separator,
        wrap(right, right_parens)
      )
    }
  }
}

impl std::fmt::Display for Expr {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", expr_to_string(self))
  }
}
