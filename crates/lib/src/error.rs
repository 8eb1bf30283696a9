//! Errors produced while resolving the module graph.

use std::fmt;

use thiserror::Error;

use crate::variant::Variant;

/// Which way a dependency points relative to the module that declared it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepDirection {
  Forward,
  Reverse,
}

impl fmt::Display for DepDirection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DepDirection::Forward => write!(f, "dependency"),
      DepDirection::Reverse => write!(f, "reverse dependency"),
    }
  }
}

/// A single resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
  #[error("module \"{name}\" is defined more than once")]
  DuplicateModule { name: String },

  /// Relaxed by `allow_missing_dependencies`.
  #[error("{}\"{module}\" depends on undefined module \"{dep}\"", at(.location))]
  MissingDependency {
    module: String,
    location: Option<String>,
    dep: String,
  },

  /// Relaxed by `allow_missing_dependencies`.
  #[error("{}\"{module}\" has a reverse dependency on undefined module \"{dep}\"", at(.location))]
  MissingReverseDependency {
    module: String,
    location: Option<String>,
    dep: String,
  },

  /// Never relaxed. `location` is where the module adding the dependency
  /// was declared.
  #[error(
    "{}{direction} \"{dep}\" of \"{module}\" missing variant:\n  {requested}\navailable variants:{}",
    at(.location),
    list_variants(.available)
  )]
  MissingVariant {
    direction: DepDirection,
    dep: String,
    module: String,
    location: Option<String>,
    requested: Variant,
    available: Vec<Variant>,
  },

  /// A transition function or bottom-up mutator reported an error.
  #[error("{}module \"{module}\"{}: {message}", at(.location), variant_suffix(.variant))]
  Mutator {
    module: String,
    location: Option<String>,
    variant: String,
    message: String,
  },

  #[error("module \"{module}\": mutator \"{mutator}\" split returned no variations")]
  EmptySplit { module: String, mutator: String },

  #[error("module \"{module}\": mutator \"{mutator}\" split returned duplicate variation \"{value}\"")]
  DuplicateSplit {
    module: String,
    mutator: String,
    value: String,
  },

  /// A rewired edge points at a variation the split phase never created.
  #[error("internal error: mutator \"{mutator}\" left no variation \"{value}\" of module \"{module}\" to rewire to")]
  MissingTransitionVariant {
    module: String,
    mutator: String,
    value: String,
  },

  #[error("dependency cycle among modules: {}", .modules.join(", "))]
  Cycle { modules: Vec<String> },
}

impl GraphError {
  /// True for errors that `allow_missing_dependencies` suppresses.
  pub fn is_missing_module(&self) -> bool {
    matches!(
      self,
      GraphError::MissingDependency { .. } | GraphError::MissingReverseDependency { .. }
    )
  }
}

/// `file:line: ` when the declaration site is known.
fn at(location: &Option<String>) -> String {
  match location {
    Some(location) => format!("{location}: "),
    None => String::new(),
  }
}

fn list_variants(variants: &[Variant]) -> String {
  variants.iter().map(|v| format!("\n  {v}")).collect()
}

fn variant_suffix(variant: &str) -> String {
  if variant.is_empty() {
    String::new()
  } else {
    format!(" variant \"{variant}\"")
  }
}

/// Every error collected during a resolve, in the order they were found.
///
/// Identical errors (for example the same missing variant reported by each
/// variant of a dependent) are kept once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveErrors(Vec<GraphError>);

impl ResolveErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, err: GraphError) {
    if !self.0.contains(&err) {
      self.0.push(err);
    }
  }

  pub fn extend(&mut self, errs: impl IntoIterator<Item = GraphError>) {
    for err in errs {
      self.push(err);
    }
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = &GraphError> {
    self.0.iter()
  }

  /// `Ok(())` when nothing was collected, otherwise `Err(self)`.
  pub fn into_result(self) -> Result<(), ResolveErrors> {
    if self.is_empty() { Ok(()) } else { Err(self) }
  }
}

impl From<GraphError> for ResolveErrors {
  fn from(err: GraphError) -> Self {
    Self(vec![err])
  }
}

impl IntoIterator for ResolveErrors {
  type Item = GraphError;
  type IntoIter = std::vec::IntoIter<GraphError>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}

impl fmt::Display for ResolveErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
    write!(f, "{}", messages.join("\n"))
  }
}

impl std::error::Error for ResolveErrors {}
