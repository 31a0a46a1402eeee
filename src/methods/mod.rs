//! Registry of named Runge-Kutta methods.

mod tableau;

pub use tableau::ButcherTableau;

use std::sync::LazyLock;

use crate::SolverError;

/// Method name that selects the caller's own tableau without a warning.
pub const CUSTOM: &str = "custom";

static METHODS: LazyLock<[(&'static str, ButcherTableau); 3]> =
  LazyLock::new(|| {
    [
      ("RK4", ButcherTableau::rk4()),
      ("EULER", ButcherTableau::euler()),
      ("3/8", ButcherTableau::three_eighths()),
    ]
  });

/// Process-wide, read-only table of the registered tableaux.
pub struct MethodTable;

impl MethodTable {
  /// Registered names in registration order.
  pub fn names() -> impl Iterator<Item = &'static str> {
    METHODS.iter().map(|(name, _)| *name)
  }

  /// Case-insensitive lookup of a registered method.
  pub fn lookup(name: &str) -> Option<&'static ButcherTableau> {
    let key = name.to_uppercase();
    METHODS
      .iter()
      .find(|(registered, _)| *registered == key)
      .map(|(_, tableau)| tableau)
  }

  pub fn is_custom(name: &str) -> bool {
    name.eq_ignore_ascii_case(CUSTOM)
  }

  /// Registered tableau for `name`, otherwise `fallback` unchanged.
  ///
  /// Unregistered names other than `custom` are not an error but are
  /// reported at warning level.
  pub fn resolve(name: &str, fallback: ButcherTableau) -> ButcherTableau {
    match Self::lookup(name) {
      Some(tableau) => tableau.clone(),
      None => {
        if let Some(message) = Self::fallback_notice(name) {
          log::warn!("{message}");
        }
        fallback
      }
    }
  }

  /// Like [`MethodTable::resolve`] with the fallback given as raw
  /// coefficients. They are only validated when actually used.
  pub fn resolve_parts(
    name: &str,
    a: Vec<Vec<f64>>,
    b: Vec<f64>,
    c: Vec<f64>,
  ) -> Result<ButcherTableau, SolverError> {
    if let Some(tableau) = Self::lookup(name) {
      return Ok(tableau.clone());
    }
    Ok(Self::resolve(name, ButcherTableau::new(a, b, c)?))
  }

  /// Message describing a silent fallback, `None` when `name` is registered
  /// or explicitly `custom`.
  pub fn fallback_notice(name: &str) -> Option<String> {
    if Self::lookup(name).is_some() || Self::is_custom(name) {
      return None;
    }
    Some(format!(
      "unknown method `{name}`, using the supplied tableau (known: {})",
      Self::names().collect::<Vec<_>>().join(", ")
    ))
  }
}
