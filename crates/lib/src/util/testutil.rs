//! Test utilities for varia-lib.
//!
//! A minimal module kind and transition mutators for unit tests that do not
//! need the Lua-declared module type.

use crate::module::Module;
use crate::transition::{IncomingContext, MutatorError, OutgoingContext, SplitContext, TransitionMutator};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
  pub name: String,
  pub deps: Vec<String>,
  pub split: Vec<String>,
  pub outgoing: Option<String>,
  pub incoming: Option<String>,
  pub late_incoming: Option<String>,
  pub mutated: Option<String>,
}

impl Module for Node {
  type Tag = &'static str;

  fn name(&self) -> &str {
    &self.name
  }

  fn deps(&self) -> &[String] {
    &self.deps
  }
}

pub fn node(name: &str, deps: &[&str]) -> Node {
  Node {
    name: name.to_string(),
    deps: deps.iter().map(|d| d.to_string()).collect(),
    ..Default::default()
  }
}

impl Node {
  pub fn split(mut self, values: &[&str]) -> Self {
    self.split = values.iter().map(|v| v.to_string()).collect();
    self
  }

  pub fn outgoing(mut self, value: &str) -> Self {
    self.outgoing = Some(value.to_string());
    self
  }

  pub fn incoming(mut self, value: &str) -> Self {
    self.incoming = Some(value.to_string());
    self
  }

  pub fn late_incoming(mut self, value: &str) -> Self {
    self.late_incoming = Some(value.to_string());
    self
  }
}

/// Transition driven by the [`Node`] fields.
pub struct NodeTransition;

impl TransitionMutator<Node> for NodeTransition {
  fn split(&self, ctx: &SplitContext<'_, Node>) -> Result<Vec<String>, MutatorError> {
    if ctx.module().split.is_empty() {
      Ok(vec![String::new()])
    } else {
      Ok(ctx.module().split.clone())
    }
  }

  fn outgoing_transition(&self, ctx: &OutgoingContext<'_, Node>, source_variation: &str) -> Result<String, MutatorError> {
    Ok(ctx.module().outgoing.clone().unwrap_or_else(|| source_variation.to_string()))
  }

  fn incoming_transition(&self, ctx: &IncomingContext<'_, Node>, incoming_variation: &str) -> Result<String, MutatorError> {
    let module = ctx.module();
    if ctx.is_adding_dependency()
      && let Some(late) = &module.late_incoming
    {
      return Ok(late.clone());
    }
    Ok(module.incoming.clone().unwrap_or_else(|| incoming_variation.to_string()))
  }

  fn mutate(&self, module: &mut Node, variation: &str) -> Result<(), MutatorError> {
    module.mutated = Some(variation.to_string());
    Ok(())
  }
}
