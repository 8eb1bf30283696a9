use tracing::{trace, warn};

use crate::context::ResolveConfig;
use crate::error::{DepDirection, GraphError};
use crate::graph::{DepEdge, Graph, ModuleGroup, ModuleId};
use crate::module::Module;
use crate::transition::{IncomingContext, OutgoingContext, TransitionEntry, TransitionPhase};
use crate::variant::{Variant, Variation};

/// An edge waiting to be added when the pass finishes.
pub(crate) struct PendingEdge<T> {
  pub(crate) from: ModuleId,
  pub(crate) edge: DepEdge<T>,
}

/// The view a bottom-up mutator gets of the module it is visiting.
///
/// Dependencies added here are resolved immediately against the current
/// graph, but only attached once the whole pass has visited every module.
/// Failures are collected and fail the pass.
pub struct BottomUpContext<'a, M: Module> {
  graph: &'a Graph<M>,
  transitions: &'a [TransitionEntry<M>],
  config: &'a ResolveConfig,
  id: ModuleId,
  pub(crate) edges: Vec<PendingEdge<M::Tag>>,
  pub(crate) errors: Vec<GraphError>,
}

impl<'a, M: Module> BottomUpContext<'a, M> {
  pub(crate) fn new(
    graph: &'a Graph<M>,
    transitions: &'a [TransitionEntry<M>],
    config: &'a ResolveConfig,
    id: ModuleId,
  ) -> Self {
    Self {
      graph,
      transitions,
      config,
      id,
      edges: Vec::new(),
      errors: Vec::new(),
    }
  }

  pub fn module(&self) -> &'a M {
    self.graph.module(self.id)
  }

  pub fn module_name(&self) -> &'a str {
    self.graph.module_name(self.id)
  }

  pub fn variant(&self) -> &'a Variant {
    self.graph.variant(self.id)
  }

  pub fn graph(&self) -> &'a Graph<M> {
    self.graph
  }

  /// Record an error against the current module.
  pub fn module_error(&mut self, message: impl Into<String>) {
    self.errors.push(GraphError::Mutator {
      module: self.module_name().to_string(),
      location: self.location(),
      variant: self.variant().name(),
      message: message.into(),
    });
  }

  /// Depend on each of `names`.
  ///
  /// The target variant starts from this module's variant with `variations`
  /// applied. For every completed transition mutator not named in
  /// `variations` the outgoing transition picks the requested value; the
  /// target's incoming transition then makes the final choice. The result
  /// must already exist: no variant is created on demand.
  pub fn add_variation_dependencies(&mut self, variations: &[Variation], tag: M::Tag, names: &[&str]) {
    for name in names {
      self.add_forward(variations, tag.clone(), name, false);
    }
  }

  /// Depend on each of `names` without inheriting this module's variant.
  ///
  /// Mutators registered as never-far still propagate as in
  /// [`add_variation_dependencies`](Self::add_variation_dependencies).
  pub fn add_far_variation_dependencies(&mut self, variations: &[Variation], tag: M::Tag, names: &[&str]) {
    for name in names {
      self.add_forward(variations, tag.clone(), name, true);
    }
  }

  /// Make the instance of `name` with this module's variant depend on this module.
  pub fn add_reverse_dependency(&mut self, tag: M::Tag, name: &str) {
    self.add_reverse_variation_dependency(&[], tag, name);
  }

  /// Make the instance of `name` with this module's variant, overridden by
  /// `variations`, depend on this module. No transitions run.
  pub fn add_reverse_variation_dependency(&mut self, variations: &[Variation], tag: M::Tag, name: &str) {
    let graph = self.graph;
    let Some(group) = graph.group(name) else {
      self.missing_module(GraphError::MissingReverseDependency {
        module: self.module_name().to_string(),
        location: self.location(),
        dep: name.to_string(),
      });
      return;
    };

    let mut wanted = self.completed_variant(false);
    for v in variations {
      wanted.set(&v.mutator, &v.value);
    }

    match self.find_exact(group, &wanted) {
      Some(source) => {
        trace!(from = %graph.display_name(source), to = %graph.display_name(self.id), "reverse dependency");
        self.edges.push(PendingEdge {
          from: source,
          edge: DepEdge {
            target: self.id,
            tag,
            far: false,
          },
        });
      }
      None => {
        let err = self.missing_variant(DepDirection::Reverse, group, wanted);
        self.errors.push(err);
      }
    }
  }

  fn add_forward(&mut self, variations: &[Variation], tag: M::Tag, name: &str, far: bool) {
    match self.find_variant(variations, &tag, name, far) {
      Ok(Some(target)) => {
        trace!(from = %self.graph.display_name(self.id), to = %self.graph.display_name(target), far, "dependency");
        self.edges.push(PendingEdge {
          from: self.id,
          edge: DepEdge { target, tag, far },
        });
      }
      Ok(None) => {}
      Err(err) => self.errors.push(err),
    }
  }

  /// Resolve the instance of `name` a new forward edge should point at.
  ///
  /// `Ok(None)` means the module is undefined and missing dependencies are
  /// allowed.
  fn find_variant(
    &mut self,
    variations: &[Variation],
    tag: &M::Tag,
    name: &str,
    far: bool,
  ) -> Result<Option<ModuleId>, GraphError> {
    let graph = self.graph;
    let Some(group) = graph.group(name) else {
      self.missing_module(GraphError::MissingDependency {
        module: self.module_name().to_string(),
        location: self.location(),
        dep: name.to_string(),
      });
      return Ok(None);
    };

    let source = self.variant();
    let mut wanted = self.completed_variant(far);
    for v in variations {
      wanted.set(&v.mutator, &v.value);
    }

    for (index, entry) in self.transitions.iter().enumerate() {
      if !entry.applies_to(far) {
        continue;
      }
      let explicit = variations.iter().any(|v| v.mutator == entry.name);
      let requested = wanted.get(&entry.name).to_string();
      let outgoing = if explicit {
        requested
      } else {
        entry
          .mutator
          .outgoing_transition(
            &OutgoingContext {
              module: self.module(),
              variant: source,
              dep_name: name,
              tag,
            },
            &requested,
          )
          .map_err(|err| err.into_graph_error(self.module(), source))?
      };

      // The incoming transition runs on the first instance that agrees with
      // the wanted variant on every earlier mutator.
      let earlier = &self.transitions[..index];
      let input = group
        .modules
        .iter()
        .copied()
        .find(|&id| graph.variant(id).matches_on(&wanted, earlier.iter().map(|e| e.name.as_str())));

      let final_value = match input {
        Some(input) => entry
          .mutator
          .incoming_transition(
            &IncomingContext {
              module: graph.module(input),
              variant: graph.variant(input),
              phase: TransitionPhase::AddingDependency,
            },
            &outgoing,
          )
          .map_err(|err| err.into_graph_error(graph.module(input), graph.variant(input)))?,
        None => outgoing,
      };
      wanted.set(&entry.name, &final_value);
    }

    let found = self.find_exact(group, &wanted).or_else(|| {
      if far {
        group.modules.iter().copied().find(|&id| wanted.is_subset_of(graph.variant(id)))
      } else {
        None
      }
    });
    match found {
      Some(target) => Ok(Some(target)),
      None => Err(self.missing_variant(DepDirection::Forward, group, wanted)),
    }
  }

  /// This module's variant over the completed transition mutators. For far
  /// dependencies, mutators that are not never-far start from the default.
  fn completed_variant(&self, far: bool) -> Variant {
    let source = self.variant();
    let mut variant = Variant::new();
    for entry in self.transitions {
      let value = if entry.applies_to(far) {
        source.get(&entry.name)
      } else {
        ""
      };
      variant.set(&entry.name, value);
    }
    variant
  }

  fn location(&self) -> Option<String> {
    self.module().location().map(str::to_string)
  }

  fn find_exact(&self, group: &ModuleGroup, wanted: &Variant) -> Option<ModuleId> {
    group
      .modules
      .iter()
      .copied()
      .find(|&id| self.graph.variant(id) == wanted)
  }

  fn missing_variant(&self, direction: DepDirection, group: &ModuleGroup, requested: Variant) -> GraphError {
    GraphError::MissingVariant {
      direction,
      dep: group.name.clone(),
      module: self.module_name().to_string(),
      location: self.location(),
      requested,
      available: group
        .modules
        .iter()
        .map(|&id| self.graph.variant(id).clone())
        .collect(),
    }
  }

  fn missing_module(&mut self, err: GraphError) {
    if self.config.allow_missing_dependencies {
      warn!("{err}, ignoring");
    } else {
      self.errors.push(err);
    }
  }
}
