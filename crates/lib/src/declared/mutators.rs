use crate::resolve::{BottomUpContext, BottomUpMutator};
use crate::transition::{IncomingContext, MutatorError, OutgoingContext, SplitContext, TransitionMutator};
use crate::variant::Variation;

use super::types::{DepKind, TransitionModule};

/// Transition mutator that reads its decisions from module properties.
pub struct PropertyTransition;

impl TransitionMutator<TransitionModule> for PropertyTransition {
  fn split(&self, ctx: &SplitContext<'_, TransitionModule>) -> Result<Vec<String>, MutatorError> {
    let split = &ctx.module().split;
    if split.is_empty() {
      Ok(vec![String::new()])
    } else {
      Ok(split.clone())
    }
  }

  fn outgoing_transition(
    &self,
    ctx: &OutgoingContext<'_, TransitionModule>,
    source_variation: &str,
  ) -> Result<String, MutatorError> {
    let module = ctx.module();
    if let Some(err) = &module.outgoing_transition_error {
      return Err(MutatorError::new(format!("Error: {}", err)));
    }
    Ok(
      module
        .outgoing
        .clone()
        .unwrap_or_else(|| source_variation.to_string()),
    )
  }

  fn incoming_transition(
    &self,
    ctx: &IncomingContext<'_, TransitionModule>,
    incoming_variation: &str,
  ) -> Result<String, MutatorError> {
    let module = ctx.module();
    if let Some(err) = &module.incoming_transition_error {
      return Err(MutatorError::new(format!("Error: {}", err)));
    }
    if ctx.is_adding_dependency()
      && let Some(incoming) = &module.post_transition_incoming
    {
      return Ok(incoming.clone());
    }
    Ok(
      module
        .incoming
        .clone()
        .unwrap_or_else(|| incoming_variation.to_string()),
    )
  }

  fn mutate(&self, module: &mut TransitionModule, variation: &str) -> Result<(), MutatorError> {
    module.mutated = variation.to_string();
    Ok(())
  }
}

/// Adds the `post_transition_*` dependencies of each module.
pub struct PostTransitionDeps {
  /// Dimension that `name:variant` and `name(variant)` references select.
  pub mutator: String,
}

impl BottomUpMutator<TransitionModule> for PostTransitionDeps {
  fn mutate(&self, ctx: &mut BottomUpContext<'_, TransitionModule>) -> Result<(), MutatorError> {
    let module = ctx.module();

    for dep in &module.post_transition_deps {
      let variations: Vec<Variation> = dep
        .variant
        .iter()
        .map(|v| Variation::new(self.mutator.as_str(), v.as_str()))
        .collect();
      ctx.add_variation_dependencies(&variations, DepKind::PostTransition, &[dep.name.as_str()]);
    }

    for dep in &module.post_transition_far_deps {
      ctx.add_far_variation_dependencies(&[], DepKind::Far, &[dep.as_str()]);
    }

    for dep in &module.post_transition_reverse_deps {
      ctx.add_reverse_dependency(DepKind::Reverse, dep);
    }

    for dep in &module.post_transition_reverse_variation_deps {
      let variations = [Variation::new(self.mutator.as_str(), dep.variant.as_str())];
      ctx.add_reverse_variation_dependency(&variations, DepKind::Reverse, &dep.name);
    }

    Ok(())
  }
}
