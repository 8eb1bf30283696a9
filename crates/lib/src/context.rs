//! Mutator registration and the resolve loop.

use tracing::{debug, info};

use crate::error::ResolveErrors;
use crate::graph::Graph;
use crate::module::Module;
use crate::resolve::{BottomUpEntry, BottomUpMutator, run_bottom_up};
use crate::transition::{TransitionEntry, TransitionMutator, run_transition};

/// Graph-wide resolve settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveConfig {
  /// Silently drop dependencies on undefined modules instead of failing.
  /// Missing variants of defined modules are always errors.
  pub allow_missing_dependencies: bool,
}

enum Pass {
  Transition(usize),
  BottomUp(usize),
}

/// Returned by [`Context::register_transition_mutator`] to configure the
/// mutator just registered.
pub struct TransitionHandle<'a, M: Module> {
  entry: &'a mut TransitionEntry<M>,
}

impl<M: Module> TransitionHandle<'_, M> {
  /// Treat far dependencies like ordinary ones for this mutator.
  pub fn never_far(self) -> Self {
    self.entry.never_far = true;
    self
  }
}

/// Registered mutators, run strictly in registration order.
pub struct Context<M: Module> {
  config: ResolveConfig,
  transitions: Vec<TransitionEntry<M>>,
  bottom_ups: Vec<BottomUpEntry<M>>,
  passes: Vec<Pass>,
}

impl<M: Module + 'static> Context<M> {
  pub fn new(config: ResolveConfig) -> Self {
    Self {
      config,
      transitions: Vec::new(),
      bottom_ups: Vec::new(),
      passes: Vec::new(),
    }
  }

  pub fn config(&self) -> &ResolveConfig {
    &self.config
  }

  pub fn set_allow_missing_dependencies(&mut self, allow: bool) {
    self.config.allow_missing_dependencies = allow;
  }

  /// Register a transition mutator. Its name becomes a variant dimension;
  /// dimensions are ordered by registration.
  pub fn register_transition_mutator(
    &mut self,
    name: &str,
    mutator: impl TransitionMutator<M> + 'static,
  ) -> TransitionHandle<'_, M> {
    self.passes.push(Pass::Transition(self.transitions.len()));
    self.transitions.push(TransitionEntry {
      name: name.to_string(),
      mutator: Box::new(mutator),
      never_far: false,
    });
    let index = self.transitions.len() - 1;
    TransitionHandle {
      entry: &mut self.transitions[index],
    }
  }

  /// Register an ordinary bottom-up mutator. It sees every transition
  /// mutator registered before it as converged.
  pub fn register_bottom_up_mutator(&mut self, name: &str, mutator: impl BottomUpMutator<M> + 'static) {
    self.passes.push(Pass::BottomUp(self.bottom_ups.len()));
    self.bottom_ups.push(BottomUpEntry {
      name: name.to_string(),
      mutator: Box::new(mutator),
    });
  }

  /// Names of the registered transition mutators, in dimension order.
  pub fn transition_mutators(&self) -> impl Iterator<Item = &str> {
    self.transitions.iter().map(|t| t.name.as_str())
  }

  /// Build the graph from `modules` and run every pass.
  ///
  /// # Errors
  ///
  /// Stops at the first pass that reports errors and returns everything that
  /// pass collected. Loading errors (duplicate names, undefined static
  /// dependencies, cycles) are reported before any pass runs.
  pub fn resolve_dependencies(&self, modules: Vec<M>) -> Result<Graph<M>, ResolveErrors> {
    let mut graph = Graph::from_modules(modules, &self.config)?;
    graph.top_down_order()?;

    let mut completed = 0;
    for pass in &self.passes {
      match *pass {
        Pass::Transition(index) => {
          debug!(mutator = %self.transitions[index].name, "running transition mutator");
          graph = run_transition(graph, &self.transitions[index])?;
          completed = index + 1;
        }
        Pass::BottomUp(index) => {
          debug!(mutator = %self.bottom_ups[index].name, "running bottom-up mutator");
          run_bottom_up(
            &mut graph,
            &self.bottom_ups[index],
            &self.transitions[..completed],
            &self.config,
          )?;
        }
      }
    }

    info!(
      modules = graph.groups().len(),
      variants = graph.len(),
      "dependencies resolved"
    );
    Ok(graph)
  }
}

impl<M: Module + 'static> Default for Context<M> {
  fn default() -> Self {
    Self::new(ResolveConfig::default())
  }
}
