//! Variant propagation for a single transition mutator.
//!
//! The pass runs in three steps:
//! 1. Top-down, each module's variations are its split followed by every
//!    variation its dependents asked for, and each edge records the
//!    variation it resolved to through outgoing then incoming transitions.
//! 2. The graph is rebuilt with one instance per (module, variation) and the
//!    recorded edges are repointed at the matching instances.
//! 3. `mutate` runs on every new instance.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info, trace};

use crate::error::{GraphError, ResolveErrors};
use crate::graph::{DepEdge, Graph, ModuleGroup, ModuleId, ModuleInfo};
use crate::module::Module;

use super::types::{IncomingContext, OutgoingContext, SplitContext, TransitionEntry, TransitionPhase};

/// Variations and resolved edge values computed by the split phase.
struct SplitPlan {
  /// Per module, its variations in final order.
  variations: Vec<Vec<String>>,
  /// Per module, per variation, the variation each dependency edge resolved to.
  edge_values: Vec<Vec<Vec<String>>>,
}

/// Run one transition mutator over the whole graph.
///
/// # Errors
///
/// Returns every split, transition and mutate error found. Nothing is
/// rebuilt if the split phase failed.
pub(crate) fn run_transition<M: Module>(graph: Graph<M>, entry: &TransitionEntry<M>) -> Result<Graph<M>, ResolveErrors> {
  let plan = split_phase(&graph, entry)?;
  let mut graph = rebuild(graph, entry, &plan)?;

  let mut errors = ResolveErrors::new();
  for info in graph.modules.iter_mut() {
    let value = info.variant.get(&entry.name).to_string();
    if let Err(err) = entry.mutator.mutate(&mut info.logic, &value) {
      errors.push(err.into_graph_error(&info.logic, &info.variant));
    }
  }
  errors.into_result()?;

  info!(
    mutator = %entry.name,
    modules = graph.groups.len(),
    variants = graph.len(),
    "transition mutator converged"
  );
  Ok(graph)
}

fn split_phase<M: Module>(graph: &Graph<M>, entry: &TransitionEntry<M>) -> Result<SplitPlan, ResolveErrors> {
  let order = graph.top_down_order()?;
  let count = graph.len();
  let mut requested: Vec<BTreeSet<String>> = vec![BTreeSet::new(); count];
  let mut plan = SplitPlan {
    variations: vec![Vec::new(); count],
    edge_values: vec![Vec::new(); count],
  };
  let mut errors = ResolveErrors::new();

  for id in order {
    let info = graph.info(id);
    let name = graph.module_name(id);

    let ctx = SplitContext {
      module: &info.logic,
      variant: &info.variant,
    };
    let split = entry
      .mutator
      .split(&ctx)
      .map_err(|err| err.into_graph_error(&info.logic, &info.variant))
      .and_then(|split| validate_split(name, &entry.name, split));
    let mut values = match split {
      Ok(values) => values,
      Err(err) => {
        errors.push(err);
        vec![String::new()]
      }
    };
    for value in &requested[id.0] {
      if !values.contains(value) {
        values.push(value.clone());
      }
    }
    debug!(mutator = %entry.name, module = name, variations = ?values, "split");

    let mut per_variation = Vec::with_capacity(values.len());
    for value in &values {
      let mut resolved = Vec::with_capacity(info.deps.len());
      for edge in &info.deps {
        let final_value = if entry.applies_to(edge.far) {
          propagate(graph, entry, id, value, edge).unwrap_or_else(|err| {
            errors.push(err);
            String::new()
          })
        } else {
          String::new()
        };
        trace!(
          mutator = %entry.name,
          from = name,
          to = graph.module_name(edge.target),
          source = %value,
          resolved = %final_value,
          "edge"
        );
        requested[edge.target.0].insert(final_value.clone());
        resolved.push(final_value);
      }
      per_variation.push(resolved);
    }

    plan.variations[id.0] = values;
    plan.edge_values[id.0] = per_variation;
  }

  errors.into_result()?;
  Ok(plan)
}

/// Outgoing on the dependent, then incoming on the dependency.
fn propagate<M: Module>(
  graph: &Graph<M>,
  entry: &TransitionEntry<M>,
  source: ModuleId,
  value: &str,
  edge: &DepEdge<M::Tag>,
) -> Result<String, GraphError> {
  let from = graph.info(source);
  let to = graph.info(edge.target);

  let outgoing = entry
    .mutator
    .outgoing_transition(
      &OutgoingContext {
        module: &from.logic,
        variant: &from.variant,
        dep_name: graph.module_name(edge.target),
        tag: &edge.tag,
      },
      value,
    )
    .map_err(|err| {
      let variant = from.variant.clone().with(&entry.name, value);
      err.into_graph_error(&from.logic, &variant)
    })?;

  entry
    .mutator
    .incoming_transition(
      &IncomingContext {
        module: &to.logic,
        variant: &to.variant,
        phase: TransitionPhase::Structural,
      },
      &outgoing,
    )
    .map_err(|err| err.into_graph_error(&to.logic, &to.variant))
}

fn validate_split(module: &str, mutator: &str, split: Vec<String>) -> Result<Vec<String>, GraphError> {
  if split.is_empty() {
    return Err(GraphError::EmptySplit {
      module: module.to_string(),
      mutator: mutator.to_string(),
    });
  }
  for (i, value) in split.iter().enumerate() {
    if split[..i].contains(value) {
      return Err(GraphError::DuplicateSplit {
        module: module.to_string(),
        mutator: mutator.to_string(),
        value: value.clone(),
      });
    }
  }
  Ok(split)
}

/// Replace every module with one instance per variation.
///
/// The last (or only) instance takes the original module data; the others
/// get clones.
fn rebuild<M: Module>(graph: Graph<M>, entry: &TransitionEntry<M>, plan: &SplitPlan) -> Result<Graph<M>, ResolveErrors> {
  let Graph {
    modules,
    groups,
    by_name,
  } = graph;

  let mut new_ids: HashMap<(usize, &str), ModuleId> = HashMap::new();
  let mut new_groups = Vec::with_capacity(groups.len());
  let mut next = 0;
  for group in &groups {
    let mut ids = Vec::new();
    for old in &group.modules {
      for value in &plan.variations[old.0] {
        new_ids.insert((old.0, value.as_str()), ModuleId(next));
        ids.push(ModuleId(next));
        next += 1;
      }
    }
    new_groups.push(ModuleGroup {
      name: group.name.clone(),
      modules: ids,
    });
  }

  let owner: Vec<usize> = modules.iter().map(|info| info.group).collect();
  let mut old: Vec<Option<ModuleInfo<M>>> = modules.into_iter().map(Some).collect();
  let mut new_modules = Vec::with_capacity(next);
  let mut errors = ResolveErrors::new();

  for (group_index, group) in groups.iter().enumerate() {
    for old_id in &group.modules {
      let Some(ModuleInfo { logic, variant, deps, .. }) = old[old_id.0].take() else {
        continue;
      };
      let values = &plan.variations[old_id.0];
      let Some((last, rest)) = values.split_last() else {
        continue;
      };
      let mut instances: Vec<(&String, M)> = rest.iter().map(|value| (value, logic.clone())).collect();
      instances.push((last, logic));

      for (index, (value, logic)) in instances.into_iter().enumerate() {
        let mut new_deps = Vec::with_capacity(deps.len());
        for (edge, target_value) in deps.iter().zip(&plan.edge_values[old_id.0][index]) {
          match new_ids.get(&(edge.target.0, target_value.as_str())) {
            Some(&target) => new_deps.push(DepEdge {
              target,
              tag: edge.tag.clone(),
              far: edge.far,
            }),
            None => errors.push(GraphError::MissingTransitionVariant {
              module: groups[owner[edge.target.0]].name.clone(),
              mutator: entry.name.clone(),
              value: target_value.clone(),
            }),
          }
        }
        new_modules.push(ModuleInfo {
          logic,
          group: group_index,
          variant: variant.clone().with(&entry.name, value),
          deps: new_deps,
        });
      }
    }
  }

  errors.into_result()?;
  Ok(Graph {
    modules: new_modules,
    groups: new_groups,
    by_name,
  })
}
