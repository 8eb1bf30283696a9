//! Variant identity.
//!
//! A [`Variant`] is the ordered mapping from transition mutator name to the
//! value that mutator assigned a module. Entries are kept in mutator
//! registration order. An empty value is the canonical default and is treated
//! the same as an absent entry for equality and rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single (mutator, value) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variation {
  pub mutator: String,
  pub value: String,
}

impl Variation {
  pub fn new(mutator: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      mutator: mutator.into(),
      value: value.into(),
    }
  }
}

impl fmt::Display for Variation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.mutator, self.value)
  }
}

/// The full variant of a module instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variant(Vec<Variation>);

impl Variant {
  pub fn new() -> Self {
    Self::default()
  }

  /// The value assigned by `mutator`, or `""` when it has none.
  pub fn get(&self, mutator: &str) -> &str {
    self
      .0
      .iter()
      .find(|v| v.mutator == mutator)
      .map(|v| v.value.as_str())
      .unwrap_or("")
  }

  /// Set the value for `mutator`, keeping its position if already present.
  pub fn set(&mut self, mutator: &str, value: &str) {
    match self.0.iter_mut().find(|v| v.mutator == mutator) {
      Some(existing) => existing.value = value.to_string(),
      None => self.0.push(Variation::new(mutator, value)),
    }
  }

  pub fn with(mut self, mutator: &str, value: &str) -> Self {
    self.set(mutator, value);
    self
  }

  pub fn iter(&self) -> impl Iterator<Item = &Variation> {
    self.0.iter()
  }

  /// Entries with a non-empty value.
  pub fn assigned(&self) -> impl Iterator<Item = &Variation> {
    self.0.iter().filter(|v| !v.value.is_empty())
  }

  /// True when no mutator assigned a non-empty value.
  pub fn is_default(&self) -> bool {
    self.assigned().next().is_none()
  }

  /// Short name used when addressing a variant as `Name(variant)`.
  ///
  /// Non-empty values joined by `_` in mutator order; the default variant
  /// has the empty name. Values containing `_` make names ambiguous, so
  /// the name is for display and lookups in tests, not identity.
  pub fn name(&self) -> String {
    self
      .assigned()
      .map(|v| v.value.as_str())
      .collect::<Vec<_>>()
      .join("_")
  }

  /// True if every assigned entry of `self` is also assigned in `other`.
  pub fn is_subset_of(&self, other: &Variant) -> bool {
    self.assigned().all(|v| other.get(&v.mutator) == v.value)
  }

  /// True if `self` and `other` agree on every one of `mutators`.
  pub fn matches_on<'a>(&self, other: &Variant, mutators: impl IntoIterator<Item = &'a str>) -> bool {
    mutators.into_iter().all(|m| self.get(m) == other.get(m))
  }
}

impl PartialEq for Variant {
  fn eq(&self, other: &Self) -> bool {
    self.is_subset_of(other) && other.is_subset_of(self)
  }
}

impl Eq for Variant {}

impl fmt::Display for Variant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_default() {
      return write!(f, "<empty variant>");
    }
    let rendered: Vec<String> = self.assigned().map(|v| v.to_string()).collect();
    write!(f, "{}", rendered.join(","))
  }
}

impl FromIterator<Variation> for Variant {
  fn from_iter<I: IntoIterator<Item = Variation>>(iter: I) -> Self {
    let mut variant = Variant::new();
    for v in iter {
      variant.set(&v.mutator, &v.value);
    }
    variant
  }
}
