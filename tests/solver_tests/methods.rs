use super::*;

#[test]
fn registered_names_in_order() {
  assert_eq!(
    MethodTable::names().collect::<Vec<_>>(),
    vec!["RK4", "EULER", "3/8"]
  );
}

#[test]
fn lookup_is_case_insensitive() {
  assert_eq!(MethodTable::lookup("rk4"), Some(&ButcherTableau::rk4()));
  assert_eq!(MethodTable::lookup("Euler"), Some(&ButcherTableau::euler()));
  assert_eq!(
    MethodTable::lookup("3/8"),
    Some(&ButcherTableau::three_eighths())
  );
  assert_eq!(MethodTable::lookup("custom"), None);
}

#[test]
fn resolve_prefers_registered_method() {
  assert_eq!(
    MethodTable::resolve("euler", ButcherTableau::rk4()),
    ButcherTableau::euler()
  );
}

#[test]
fn resolve_falls_back_for_unknown_names() {
  let heun = ButcherTableau::new(
    vec![vec![], vec![1.0]],
    vec![0.5, 0.5],
    vec![0.0, 1.0],
  )
  .unwrap();
  assert_eq!(MethodTable::resolve("FOO", heun.clone()), heun);
  assert_eq!(MethodTable::resolve("custom", heun.clone()), heun);
}

#[test]
fn invalid_fallback_only_matters_when_used() {
  let registered =
    MethodTable::resolve_parts("RK4", vec![vec![1.0]], vec![], vec![]);
  assert_eq!(registered.unwrap(), ButcherTableau::rk4());

  let unknown =
    MethodTable::resolve_parts("FOO", vec![vec![1.0]], vec![], vec![]);
  assert!(matches!(unknown, Err(SolverError::InvalidTableau(_))));
}

#[test]
fn fallback_notice() {
  assert_eq!(MethodTable::fallback_notice("RK4"), None);
  assert_eq!(MethodTable::fallback_notice("custom"), None);
  assert_eq!(MethodTable::fallback_notice("CUSTOM"), None);
  let notice = MethodTable::fallback_notice("FOO").unwrap();
  assert!(notice.contains("FOO"), "{notice}");
  assert!(notice.contains("RK4, EULER, 3/8"), "{notice}");
}

mod tableau {
  use super::*;

  #[test]
  fn rejects_bad_shapes() {
    let cases = [
      (vec![], vec![], vec![]),
      (vec![vec![]], vec![1.0], vec![0.0, 1.0]),
      (vec![vec![]], vec![0.5, 0.5], vec![0.0, 1.0]),
      (vec![vec![], vec![0.5, 0.5]], vec![0.5, 0.5], vec![0.0, 1.0]),
      (vec![vec![], vec![f64::NAN]], vec![0.5, 0.5], vec![0.0, 1.0]),
    ];
    for (a, b, c) in cases {
      let shape = format!("{a:?} {b:?} {c:?}");
      assert!(
        matches!(
          ButcherTableau::new(a, b, c),
          Err(SolverError::InvalidTableau(_))
        ),
        "{shape}"
      );
    }
  }

  #[test]
  fn rows_survive_packing() {
    let rk4 = ButcherTableau::rk4();
    assert_eq!(rk4.stages(), 4);
    assert_eq!(
      rk4.a_rows(),
      vec![vec![], vec![0.5], vec![0.0, 0.5], vec![0.0, 0.0, 1.0]]
    );
    assert_eq!(ButcherTableau::default(), rk4);
  }
}
