//! Transition mutator interface and the contexts passed to it.

use thiserror::Error;

use crate::error::GraphError;
use crate::module::Module;
use crate::variant::Variant;

/// An error reported by user-supplied mutator logic.
///
/// The engine attaches the module name, its declaration site and the variant
/// when it collects it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct MutatorError(String);

impl MutatorError {
  pub fn new(message: impl Into<String>) -> Self {
    Self(message.into())
  }

  pub fn message(&self) -> &str {
    &self.0
  }

  pub(crate) fn into_graph_error<M: Module>(self, module: &M, variant: &Variant) -> GraphError {
    GraphError::Mutator {
      module: module.name().to_string(),
      location: module.location().map(str::to_string),
      variant: variant.name(),
      message: self.0,
    }
  }
}

/// Why an incoming transition is being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
  /// Propagating variants along edges that existed before the mutator ran.
  Structural,
  /// Adding a new edge after every transition mutator has converged.
  AddingDependency,
}

/// Context for [`TransitionMutator::split`].
pub struct SplitContext<'a, M: Module> {
  pub(crate) module: &'a M,
  pub(crate) variant: &'a Variant,
}

impl<'a, M: Module> SplitContext<'a, M> {
  pub fn module(&self) -> &'a M {
    self.module
  }

  /// The module's variant before this mutator.
  pub fn variant(&self) -> &'a Variant {
    self.variant
  }
}

/// Context for [`TransitionMutator::outgoing_transition`], evaluated on the
/// dependent.
pub struct OutgoingContext<'a, M: Module> {
  pub(crate) module: &'a M,
  pub(crate) variant: &'a Variant,
  pub(crate) dep_name: &'a str,
  pub(crate) tag: &'a M::Tag,
}

impl<'a, M: Module> OutgoingContext<'a, M> {
  pub fn module(&self) -> &'a M {
    self.module
  }

  pub fn variant(&self) -> &'a Variant {
    self.variant
  }

  /// Name of the module the edge points at.
  pub fn dep_name(&self) -> &'a str {
    self.dep_name
  }

  pub fn tag(&self) -> &'a M::Tag {
    self.tag
  }
}

/// Context for [`TransitionMutator::incoming_transition`], evaluated on the
/// dependency.
pub struct IncomingContext<'a, M: Module> {
  pub(crate) module: &'a M,
  pub(crate) variant: &'a Variant,
  pub(crate) phase: TransitionPhase,
}

impl<'a, M: Module> IncomingContext<'a, M> {
  pub fn module(&self) -> &'a M {
    self.module
  }

  pub fn variant(&self) -> &'a Variant {
    self.variant
  }

  pub fn phase(&self) -> TransitionPhase {
    self.phase
  }

  /// True when a post-transition dependency is being added rather than the
  /// static graph being propagated.
  pub fn is_adding_dependency(&self) -> bool {
    self.phase == TransitionPhase::AddingDependency
  }
}

/// A variant-creating mutator.
///
/// Every method has a default: split into the single default variation,
/// identity transitions, and no mutation. Implementations must be pure with
/// respect to the graph; `mutate` is the only place module data changes.
pub trait TransitionMutator<M: Module> {
  /// The variations this module needs regardless of what its dependents ask
  /// for. Must be non-empty and free of duplicates; order is preserved.
  fn split(&self, _ctx: &SplitContext<'_, M>) -> Result<Vec<String>, MutatorError> {
    Ok(vec![String::new()])
  }

  /// The variation a dependent in `source_variation` requests of a dependency.
  fn outgoing_transition(
    &self,
    _ctx: &OutgoingContext<'_, M>,
    source_variation: &str,
  ) -> Result<String, MutatorError> {
    Ok(source_variation.to_string())
  }

  /// The variation a dependency actually provides for a request.
  fn incoming_transition(
    &self,
    _ctx: &IncomingContext<'_, M>,
    incoming_variation: &str,
  ) -> Result<String, MutatorError> {
    Ok(incoming_variation.to_string())
  }

  /// Called once per created instance with its assigned variation.
  fn mutate(&self, _module: &mut M, _variation: &str) -> Result<(), MutatorError> {
    Ok(())
  }
}

/// A registered transition mutator.
pub struct TransitionEntry<M: Module> {
  pub(crate) name: String,
  pub(crate) mutator: Box<dyn TransitionMutator<M>>,
  pub(crate) never_far: bool,
}

impl<M: Module> TransitionEntry<M> {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_never_far(&self) -> bool {
    self.never_far
  }

  /// Whether this mutator rewrites a dependency edge with the given far flag.
  pub(crate) fn applies_to(&self, far: bool) -> bool {
    !far || self.never_far
  }
}
