use serde::{Deserialize, Serialize};

use crate::module::Module;
use crate::reference::{ReverseVariationRef, VariationRef};

/// How a dependency edge of a [`TransitionModule`] came to exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepKind {
  /// Declared in `deps`.
  #[default]
  Static,
  /// `post_transition_deps`.
  PostTransition,
  /// `post_transition_far_deps`.
  Far,
  /// `post_transition_reverse_deps` and `post_transition_reverse_variation_deps`.
  Reverse,
}

/// A module whose transition behaviour is driven by its own properties.
///
/// Optional properties distinguish "unset" from the empty string: an
/// `incoming = ""` always resolves to the default variation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionModule {
  pub name: String,
  pub deps: Vec<String>,

  /// Variations to split into. Empty means the single default variation.
  pub split: Vec<String>,
  /// Variation requested of every dependency, instead of our own.
  pub outgoing: Option<String>,
  /// Variation provided to every dependent, instead of what it asked for.
  pub incoming: Option<String>,
  /// Like `incoming`, but only for dependencies added after transitions.
  pub post_transition_incoming: Option<String>,
  pub outgoing_transition_error: Option<String>,
  pub incoming_transition_error: Option<String>,

  pub post_transition_deps: Vec<VariationRef>,
  pub post_transition_far_deps: Vec<String>,
  pub post_transition_reverse_deps: Vec<String>,
  pub post_transition_reverse_variation_deps: Vec<ReverseVariationRef>,

  /// Set by the transition mutator to the variation this instance received.
  #[serde(skip_deserializing)]
  pub mutated: String,

  /// `chunk:line` of the declaration, recorded by the loader.
  #[serde(skip_deserializing)]
  pub location: Option<String>,
}

impl Module for TransitionModule {
  type Tag = DepKind;

  fn name(&self) -> &str {
    &self.name
  }

  fn deps(&self) -> &[String] {
    &self.deps
  }

  fn location(&self) -> Option<&str> {
    self.location.as_deref()
  }

  fn set_location(&mut self, location: String) {
    self.location = Some(location);
  }
}
