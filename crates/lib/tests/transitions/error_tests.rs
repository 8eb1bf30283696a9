use varia_lib::GraphError;

use super::common::{assert_one_error_contains, chain, deps, resolve, resolve_allow_missing, resolve_ok};

const REVERSE_MISSING: &str = r#"
  transition_module {
    name = "A",
    split = { "a" },
  }

  transition_module {
    name = "B",
    split = { "b" },
    post_transition_reverse_deps = { "A" },
  }
"#;

#[test]
fn reverse_dep_missing_variant() {
  let errs = resolve(REVERSE_MISSING).unwrap_err();
  assert_eq!(
    errs.to_string(),
    "modules.lua:7: reverse dependency \"A\" of \"B\" missing variant:\n  transition:b\navailable variants:\n  transition:a"
  );
}

#[test]
fn reverse_dep_missing_variant_is_not_relaxed() {
  let errs = resolve_allow_missing(REVERSE_MISSING).unwrap_err();
  assert_eq!(errs.len(), 1);
  assert!(matches!(
    errs.iter().next(),
    Some(GraphError::MissingVariant { dep, module, .. }) if dep == "A" && module == "B"
  ));
}

#[test]
fn incoming_transition_error() {
  let errs = resolve(
    r#"
      transition_module {
        name = "A",
        deps = { "B" },
      }

      transition_module {
        name = "B",
        incoming_transition_error = "my incoming transition error",
      }
    "#,
  )
  .unwrap_err();

  assert_one_error_contains(&errs, "my incoming transition error");
  // Reported on the dependency whose incoming transition failed.
  assert!(errs.to_string().starts_with("modules.lua:7: module \"B\""), "{}", errs);
}

#[test]
fn outgoing_transition_error() {
  let errs = resolve(
    r#"
      transition_module {
        name = "A",
        deps = { "B" },
        outgoing_transition_error = "my outgoing transition error",
      }

      transition_module {
        name = "B",
      }
    "#,
  )
  .unwrap_err();

  assert_one_error_contains(&errs, "my outgoing transition error");
  assert_eq!(
    errs.to_string(),
    "modules.lua:2: module \"A\": Error: my outgoing transition error"
  );
}

#[test]
fn post_transition_incoming_error() {
  // No static dependents, so only the post-transition dependency reaches B.
  let errs = resolve(
    r#"
      transition_module {
        name = "A",
        post_transition_deps = { "B" },
      }

      transition_module {
        name = "B",
        incoming_transition_error = "my incoming transition error",
      }
    "#,
  )
  .unwrap_err();

  assert_one_error_contains(&errs, "my incoming transition error");
}

#[test]
fn post_transition_dep_missing_variant() {
  let errs = resolve(&chain(r#"post_transition_deps = { "E:missing" },"#, "")).unwrap_err();

  // Every variant of B asks for the same missing variant; it is reported once.
  assert_eq!(errs.len(), 1);
  assert_eq!(
    errs.to_string(),
    "modules.lua:8: dependency \"E\" of \"B\" missing variant:\n  transition:missing\navailable variants:\n  <empty variant>\n  transition:d"
  );
}

#[test]
fn missing_static_dependency() {
  let source = r#"
    transition_module {
      name = "A",
      deps = { "B", "Nope" },
    }

    transition_module {
      name = "B",
    }
  "#;

  let errs = resolve(source).unwrap_err();
  assert_eq!(errs.to_string(), "modules.lua:2: \"A\" depends on undefined module \"Nope\"");
  assert!(errs.iter().all(GraphError::is_missing_module));

  let graph = resolve_ok(resolve_allow_missing(source));
  assert_eq!(deps(&graph, "A", ""), vec!["B()"]);
}

#[test]
fn missing_post_transition_dependencies() {
  let source = r#"
    transition_module {
      name = "A",
      post_transition_deps = { "Nope" },
      post_transition_far_deps = { "Gone" },
      post_transition_reverse_deps = { "Absent" },
    }
  "#;

  let errs = resolve(source).unwrap_err();
  assert_eq!(errs.len(), 3);
  assert!(errs.iter().all(GraphError::is_missing_module));

  let graph = resolve_ok(resolve_allow_missing(source));
  assert!(deps(&graph, "A", "").is_empty());
}

#[test]
fn duplicate_module() {
  let errs = resolve(
    r#"
      transition_module { name = "A" }
      transition_module { name = "A", split = { "x" } }
    "#,
  )
  .unwrap_err();

  assert_eq!(errs.to_string(), "module \"A\" is defined more than once");
}

#[test]
fn dependency_cycle() {
  let errs = resolve(
    r#"
      transition_module { name = "A", deps = { "B" } }
      transition_module { name = "B", deps = { "A" } }
      transition_module { name = "C", deps = { "A" } }
    "#,
  )
  .unwrap_err();

  assert_eq!(errs.to_string(), "dependency cycle among modules: A(), B()");
}

#[test]
fn post_transition_dep_closing_a_cycle() {
  let errs = resolve(
    r#"
      transition_module { name = "A", deps = { "B" } }
      transition_module { name = "B", post_transition_deps = { "A" } }
    "#,
  )
  .unwrap_err();

  assert!(errs.to_string().starts_with("dependency cycle among modules:"), "{}", errs);
}

#[test]
fn duplicate_split_variation() {
  let errs = resolve(r#"transition_module { name = "A", split = { "x", "x" } }"#).unwrap_err();
  assert_one_error_contains(&errs, "duplicate variation \"x\"");
}
