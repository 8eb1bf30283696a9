use super::common::{chain, deps, module, resolve, resolve_ok, variants};

#[test]
fn split_and_requested_variants() {
  let graph = resolve_ok(resolve(&chain("", "")));

  // A splits itself into b and a
  assert_eq!(variants(&graph, "A"), vec!["b", "a"]);
  // B inherits a and b from A
  assert_eq!(variants(&graph, "B"), vec!["", "a", "b"]);
  // C inherits a and b from A, and c from B's outgoing transition
  assert_eq!(variants(&graph, "C"), vec!["", "a", "b", "c"]);
  // D always provides d
  assert_eq!(variants(&graph, "D"), vec!["", "d"]);
  // E inherits d from D
  assert_eq!(variants(&graph, "E"), vec!["", "d"]);
  // F is untouched
  assert_eq!(variants(&graph, "F"), vec![""]);
  assert_eq!(variants(&graph, "G"), vec![""]);
  assert_eq!(variants(&graph, "H"), vec!["h"]);
}

#[test]
fn static_edges_point_at_resolved_variants() {
  let graph = resolve_ok(resolve(&chain("", "")));

  assert_eq!(deps(&graph, "A", "a"), vec!["B(a)", "C(a)"]);
  assert_eq!(deps(&graph, "A", "b"), vec!["B(b)", "C(b)"]);
  assert_eq!(deps(&graph, "B", "a"), vec!["C(c)"]);
  assert_eq!(deps(&graph, "B", "b"), vec!["C(c)"]);
  assert_eq!(deps(&graph, "C", "a"), vec!["D(d)"]);
  assert_eq!(deps(&graph, "C", "b"), vec!["D(d)"]);
  assert_eq!(deps(&graph, "C", "c"), vec!["D(d)"]);
  assert_eq!(deps(&graph, "D", "d"), vec!["E(d)"]);
  assert!(deps(&graph, "E", "d").is_empty());
  assert!(deps(&graph, "F", "").is_empty());
  assert!(deps(&graph, "G", "").is_empty());
  assert!(deps(&graph, "H", "h").is_empty());
}

#[test]
fn default_variants_keep_default_edges() {
  let graph = resolve_ok(resolve(&chain("", "")));

  assert_eq!(deps(&graph, "B", ""), vec!["C(c)"]);
  assert_eq!(deps(&graph, "C", ""), vec!["D(d)"]);
  assert_eq!(deps(&graph, "D", ""), vec!["E()"]);
}

#[test]
fn mutate_records_assigned_variation() {
  let graph = resolve_ok(resolve(&chain("", "")));

  for (name, variant) in [
    ("A", "a"),
    ("A", "b"),
    ("B", "a"),
    ("B", "b"),
    ("C", "a"),
    ("C", "b"),
    ("C", "c"),
    ("D", "d"),
    ("E", "d"),
    ("F", ""),
    ("G", ""),
    ("H", "h"),
  ] {
    assert_eq!(module(&graph, name, variant).mutated, variant, "{}({})", name, variant);
  }
}

#[test]
fn split_order_is_preserved_before_requested() {
  let graph = resolve_ok(resolve(
    r#"
      transition_module { name = "top", deps = { "lib" }, split = { "z", "m" } }
      transition_module { name = "lib", split = { "q" } }
    "#,
  ));

  assert_eq!(variants(&graph, "lib"), vec!["q", "m", "z"]);
  assert_eq!(deps(&graph, "top", "z"), vec!["lib(z)"]);
}

#[test]
fn independent_modules_are_unaffected() {
  let graph = resolve_ok(resolve(
    r#"
      transition_module { name = "alone" }
    "#,
  ));

  assert_eq!(variants(&graph, "alone"), vec![""]);
  assert_eq!(module(&graph, "alone", "").mutated, "");
}
