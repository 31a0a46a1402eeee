//! Textual Cauchy problems: the equation and its initial condition.

mod condition;
mod equation;

pub use condition::{parse_condition, Condition};
pub use equation::{parse_equation, EquationSpec};
