//! Module references with an optional variant selector.
//!
//! Declarations name their post-transition dependencies as plain strings.
//! These are parsed once at load time so a malformed reference fails the
//! declaration instead of surfacing later during resolution.
//!
//! - `name` or `name:variant` ([`VariationRef`])
//! - `name(variant)` ([`ReverseVariationRef`])

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static NAME_AND_VARIANT: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^([a-zA-Z0-9_]+)\(([a-zA-Z0-9_]+)\)$").unwrap_or_else(|e| unreachable!("invalid pattern: {e}"))
});

/// Errors from parsing a module reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
  #[error("empty module reference")]
  Empty,

  #[error("invalid reference {0:?}: missing module name before ':'")]
  MissingName(String),

  #[error("invalid reference {0:?}: expected module_name(variant)")]
  NotNameAndVariant(String),
}

/// `name[:variant]`, an empty variant means "let transitions decide".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariationRef {
  pub name: String,
  pub variant: Option<String>,
}

impl FromStr for VariationRef {
  type Err = ReferenceError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() {
      return Err(ReferenceError::Empty);
    }
    let (name, variant) = match s.split_once(':') {
      Some((name, variant)) => (name, Some(variant)),
      None => (s, None),
    };
    if name.is_empty() {
      return Err(ReferenceError::MissingName(s.to_string()));
    }
    Ok(Self {
      name: name.to_string(),
      variant: variant.filter(|v| !v.is_empty()).map(str::to_string),
    })
  }
}

impl TryFrom<String> for VariationRef {
  type Error = ReferenceError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<VariationRef> for String {
  fn from(value: VariationRef) -> Self {
    value.to_string()
  }
}

impl fmt::Display for VariationRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.variant {
      Some(variant) => write!(f, "{}:{}", self.name, variant),
      None => write!(f, "{}", self.name),
    }
  }
}

/// `name(variant)`, both parts restricted to `[a-zA-Z0-9_]+`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReverseVariationRef {
  pub name: String,
  pub variant: String,
}

impl FromStr for ReverseVariationRef {
  type Err = ReferenceError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let caps = NAME_AND_VARIANT
      .captures(s)
      .ok_or_else(|| ReferenceError::NotNameAndVariant(s.to_string()))?;
    Ok(Self {
      name: caps[1].to_string(),
      variant: caps[2].to_string(),
    })
  }
}

impl TryFrom<String> for ReverseVariationRef {
  type Error = ReferenceError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<ReverseVariationRef> for String {
  fn from(value: ReverseVariationRef) -> Self {
    value.to_string()
  }
}

impl fmt::Display for ReverseVariationRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}({})", self.name, self.variant)
  }
}
