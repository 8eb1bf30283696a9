use varia_lib::declared::DepKind;

use super::common::{chain, deps, module, resolve, resolve_never_far, resolve_ok, variants};

#[test]
fn post_transition_deps() {
  let graph = resolve_ok(resolve(&chain(
    r#"post_transition_deps = { "C", "D:late", "E:d", "F" },"#,
    r#"post_transition_deps = { "H" },"#,
  )));

  // Variants are unchanged by post-transition dependencies
  assert_eq!(variants(&graph, "A"), vec!["b", "a"]);
  assert_eq!(variants(&graph, "B"), vec!["", "a", "b"]);
  assert_eq!(variants(&graph, "C"), vec!["", "a", "b", "c"]);
  assert_eq!(variants(&graph, "D"), vec!["", "d"]);
  assert_eq!(variants(&graph, "E"), vec!["", "d"]);
  assert_eq!(variants(&graph, "F"), vec![""]);

  assert_eq!(deps(&graph, "A", "a"), vec!["B(a)", "C(a)"]);
  assert_eq!(deps(&graph, "A", "b"), vec!["B(b)", "C(b)"]);
  // The first C(c) is the static dependency.
  //  C(c) comes from "C" through B's outgoing transition
  //  D(d) comes from "D:late" through D's incoming transition
  //  E(d) comes from "E:d"
  //  F() comes from "F" through B's outgoing and then F's incoming transition
  assert_eq!(deps(&graph, "B", "a"), vec!["C(c)", "C(c)", "D(d)", "E(d)", "F()"]);
  assert_eq!(deps(&graph, "B", "b"), vec!["C(c)", "C(c)", "D(d)", "E(d)", "F()"]);
  assert_eq!(deps(&graph, "C", "a"), vec!["D(d)"]);
  assert_eq!(deps(&graph, "D", "d"), vec!["E(d)"]);
  assert!(deps(&graph, "F", "").is_empty());
  assert_eq!(deps(&graph, "G", ""), vec!["H(h)"]);
  assert!(deps(&graph, "H", "h").is_empty());

  assert_eq!(module(&graph, "B", "a").mutated, "a");
  assert_eq!(module(&graph, "H", "h").mutated, "h");
}

#[test]
fn post_transition_edges_carry_their_tag() {
  let graph = resolve_ok(resolve(&chain(r#"post_transition_deps = { "F" },"#, "")));

  let id = graph.module_by_variant_name("B", "a").unwrap();
  let tags: Vec<DepKind> = graph.direct_deps(id).iter().map(|edge| edge.tag).collect();
  assert_eq!(tags, vec![DepKind::Static, DepKind::PostTransition]);
}

#[test]
fn reverse_deps() {
  let graph = resolve_ok(resolve(
    r#"
      transition_module {
        name = "A",
        split = { "a1", "a2" },
      }

      transition_module {
        name = "B",
        split = { "a1", "a2" },
        post_transition_reverse_deps = { "A" },
      }
    "#,
  ));

  assert_eq!(variants(&graph, "A"), vec!["a1", "a2"]);
  assert_eq!(variants(&graph, "B"), vec!["a1", "a2"]);

  assert_eq!(deps(&graph, "A", "a1"), vec!["B(a1)"]);
  assert_eq!(deps(&graph, "A", "a2"), vec!["B(a2)"]);
  assert!(deps(&graph, "B", "a1").is_empty());
  assert!(deps(&graph, "B", "a2").is_empty());
}

#[test]
fn reverse_variation_deps() {
  let graph = resolve_ok(resolve(
    r#"
      transition_module {
        name = "A",
        split = { "a" },
      }

      transition_module {
        name = "B",
        split = { "b" },
        post_transition_reverse_variation_deps = { "A(a)" },
      }
    "#,
  ));

  assert_eq!(variants(&graph, "A"), vec!["a"]);
  assert_eq!(variants(&graph, "B"), vec!["b"]);

  assert_eq!(deps(&graph, "A", "a"), vec!["B(b)"]);
  assert!(deps(&graph, "B", "b").is_empty());
}

const FAR: &str = r#"
  transition_module {
    name = "A",
    split = { "a" },
    deps = { "B" },
  }
  transition_module {
    name = "B",
    split = { "", "a" },
  }
  transition_module {
    name = "C",
    split = { "c" },
    post_transition_far_deps = { "D" },
  }
  transition_module {
    name = "D",
    split = { "", "c" },
  }
"#;

#[test]
fn far_variation_dep() {
  let graph = resolve_ok(resolve(FAR));

  assert_eq!(variants(&graph, "A"), vec!["a"]);
  assert_eq!(variants(&graph, "B"), vec!["", "a"]);
  assert_eq!(variants(&graph, "C"), vec!["c"]);
  assert_eq!(variants(&graph, "D"), vec!["", "c"]);

  assert_eq!(deps(&graph, "A", "a"), vec!["B(a)"]);
  assert_eq!(deps(&graph, "C", "c"), vec!["D()"]);
}

#[test]
fn never_far_far_variation_dep() {
  let graph = resolve_ok(resolve_never_far(FAR));

  assert_eq!(variants(&graph, "A"), vec!["a"]);
  assert_eq!(variants(&graph, "B"), vec!["", "a"]);
  assert_eq!(variants(&graph, "C"), vec!["c"]);
  assert_eq!(variants(&graph, "D"), vec!["", "c"]);

  assert_eq!(deps(&graph, "A", "a"), vec!["B(a)"]);
  assert_eq!(deps(&graph, "C", "c"), vec!["D(c)"]);
}

#[test]
fn is_adding_dependency() {
  let graph = resolve_ok(resolve(
    r#"
      transition_module {
        name = "A",
        split = { "a1" },
        deps = { "C" },
      }

      transition_module {
        name = "B",
        split = { "b1" },
        post_transition_deps = { "C" },
      }

      transition_module {
        name = "C",
        split = { "c1", "c2" },
        incoming = "c1",
        post_transition_incoming = "c2",
      }
    "#,
  ));

  assert_eq!(variants(&graph, "A"), vec!["a1"]);
  assert_eq!(variants(&graph, "B"), vec!["b1"]);
  assert_eq!(variants(&graph, "C"), vec!["c1", "c2"]);

  assert_eq!(deps(&graph, "A", "a1"), vec!["C(c1)"]);
  assert_eq!(deps(&graph, "B", "b1"), vec!["C(c2)"]);
}
