use std::collections::HashMap;

use tracing::{debug, warn};

use crate::context::ResolveConfig;
use crate::error::{GraphError, ResolveErrors};
use crate::module::Module;
use crate::variant::Variant;

/// Index of a module instance within a [`Graph`].
///
/// Ids are only valid for the graph that produced them; every transition
/// mutator rebuilds the graph and hands out fresh ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub(crate) usize);

impl ModuleId {
  pub fn index(self) -> usize {
    self.0
  }
}

/// A resolved dependency edge.
#[derive(Debug, Clone, PartialEq)]
pub struct DepEdge<T> {
  pub target: ModuleId,
  pub tag: T,
  /// Exempt from variant propagation by mutators that are not never-far.
  pub far: bool,
}

/// One variant-specific instance of a declared module.
#[derive(Debug, Clone)]
pub struct ModuleInfo<M: Module> {
  pub(crate) logic: M,
  pub(crate) group: usize,
  pub(crate) variant: Variant,
  pub(crate) deps: Vec<DepEdge<M::Tag>>,
}

impl<M: Module> ModuleInfo<M> {
  pub fn logic(&self) -> &M {
    &self.logic
  }

  pub fn variant(&self) -> &Variant {
    &self.variant
  }

  pub fn deps(&self) -> &[DepEdge<M::Tag>] {
    &self.deps
  }
}

/// All instances sharing a declared name, in variation order.
#[derive(Debug, Clone)]
pub struct ModuleGroup {
  pub(crate) name: String,
  pub(crate) modules: Vec<ModuleId>,
}

impl ModuleGroup {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn modules(&self) -> &[ModuleId] {
    &self.modules
  }
}

/// The module graph: an arena of instances grouped by declared name.
#[derive(Debug, Clone)]
pub struct Graph<M: Module> {
  pub(crate) modules: Vec<ModuleInfo<M>>,
  pub(crate) groups: Vec<ModuleGroup>,
  pub(crate) by_name: HashMap<String, usize>,
}

impl<M: Module> Graph<M> {
  /// Build the initial graph with one default-variant instance per module and
  /// its static dependency edges.
  ///
  /// # Errors
  ///
  /// Returns every duplicate module name and, unless
  /// `allow_missing_dependencies` is set, every static dependency on an
  /// undefined module.
  pub fn from_modules(modules: Vec<M>, config: &ResolveConfig) -> Result<Self, ResolveErrors> {
    let mut errors = ResolveErrors::new();
    let mut graph = Graph {
      modules: Vec::with_capacity(modules.len()),
      groups: Vec::with_capacity(modules.len()),
      by_name: HashMap::new(),
    };

    for logic in modules {
      let name = logic.name().to_string();
      if graph.by_name.contains_key(&name) {
        errors.push(GraphError::DuplicateModule { name });
        continue;
      }
      let id = ModuleId(graph.modules.len());
      let group = graph.groups.len();
      graph.by_name.insert(name.clone(), group);
      graph.groups.push(ModuleGroup {
        name,
        modules: vec![id],
      });
      graph.modules.push(ModuleInfo {
        logic,
        group,
        variant: Variant::new(),
        deps: Vec::new(),
      });
    }

    for index in 0..graph.modules.len() {
      let mut deps = Vec::new();
      for dep in graph.modules[index].logic.deps() {
        match graph.by_name.get(dep) {
          Some(&group) => deps.push(DepEdge {
            target: graph.groups[group].modules[0],
            tag: M::Tag::default(),
            far: false,
          }),
          None if config.allow_missing_dependencies => {
            warn!(module = graph.modules[index].logic.name(), dep = %dep, "dropping dependency on undefined module");
          }
          None => errors.push(GraphError::MissingDependency {
            module: graph.modules[index].logic.name().to_string(),
            location: graph.modules[index].logic.location().map(str::to_string),
            dep: dep.clone(),
          }),
        }
      }
      graph.modules[index].deps = deps;
    }

    errors.into_result()?;
    debug!(modules = graph.modules.len(), "module graph loaded");
    Ok(graph)
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }

  /// All module ids in arena order (groups in declaration order, then variation order).
  pub fn ids(&self) -> impl Iterator<Item = ModuleId> + '_ {
    (0..self.modules.len()).map(ModuleId)
  }

  pub fn info(&self, id: ModuleId) -> &ModuleInfo<M> {
    &self.modules[id.0]
  }

  pub fn module(&self, id: ModuleId) -> &M {
    &self.modules[id.0].logic
  }

  pub fn module_name(&self, id: ModuleId) -> &str {
    &self.groups[self.modules[id.0].group].name
  }

  pub fn variant(&self, id: ModuleId) -> &Variant {
    &self.modules[id.0].variant
  }

  /// The short `Name(variant)` subdirectory form of an instance's variant.
  pub fn variant_name(&self, id: ModuleId) -> String {
    self.modules[id.0].variant.name()
  }

  pub fn direct_deps(&self, id: ModuleId) -> &[DepEdge<M::Tag>] {
    &self.modules[id.0].deps
  }

  /// Direct dependencies rendered as `Name(variant)`, in edge order.
  pub fn direct_dep_names(&self, id: ModuleId) -> Vec<String> {
    self
      .direct_deps(id)
      .iter()
      .map(|edge| self.display_name(edge.target))
      .collect()
  }

  /// `Name(variant)` for a single instance.
  pub fn display_name(&self, id: ModuleId) -> String {
    format!("{}({})", self.module_name(id), self.variant_name(id))
  }

  pub fn groups(&self) -> &[ModuleGroup] {
    &self.groups
  }

  pub fn group(&self, name: &str) -> Option<&ModuleGroup> {
    self.by_name.get(name).map(|&g| &self.groups[g])
  }

  pub fn group_of(&self, id: ModuleId) -> &ModuleGroup {
    &self.groups[self.modules[id.0].group]
  }

  /// Look up an instance by module name and `Name(variant)` variant name.
  ///
  /// Variant names are not unique: `arch:a_b` and `arch:a,link:b` are both
  /// `a_b`, and the first instance in group order wins. Use
  /// [`module_by_variant`](Self::module_by_variant) when values may contain `_`.
  pub fn module_by_variant_name(&self, name: &str, variant_name: &str) -> Option<ModuleId> {
    self
      .group(name)?
      .modules
      .iter()
      .copied()
      .find(|&id| self.variant_name(id) == variant_name)
  }

  /// Look up an instance by its exact variant.
  pub fn module_by_variant(&self, name: &str, variant: &Variant) -> Option<ModuleId> {
    self
      .group(name)?
      .modules
      .iter()
      .copied()
      .find(|&id| self.variant(id) == variant)
  }

  /// The values `mutator` assigned to each instance of `name`, in group order.
  pub fn variations(&self, name: &str, mutator: &str) -> Vec<&str> {
    self
      .group(name)
      .map(|group| group.modules.iter().map(|&id| self.variant(id).get(mutator)).collect())
      .unwrap_or_default()
  }

  pub(crate) fn add_edge(&mut self, from: ModuleId, edge: DepEdge<M::Tag>) {
    self.modules[from.0].deps.push(edge);
  }
}
