//! Visit order over module instances.
//!
//! Edges point from dependent to dependency, so a topological sort yields
//! dependents first (top-down). Bottom-up order is its reverse.

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::GraphError;
use crate::module::Module;

use super::store::{Graph, ModuleId};

impl<M: Module> Graph<M> {
  fn instance_graph(&self) -> DiGraph<ModuleId, ()> {
    let mut dag = DiGraph::with_capacity(self.modules.len(), 0);
    let nodes: Vec<NodeIndex> = self.ids().map(|id| dag.add_node(id)).collect();
    for id in self.ids() {
      for edge in self.direct_deps(id) {
        dag.add_edge(nodes[id.0], nodes[edge.target.0], ());
      }
    }
    dag
  }

  /// Dependents before their dependencies.
  ///
  /// # Errors
  ///
  /// Returns [`GraphError::Cycle`] naming the modules on the first cycle found.
  pub fn top_down_order(&self) -> Result<Vec<ModuleId>, GraphError> {
    let dag = self.instance_graph();
    match toposort(&dag, None) {
      Ok(sorted) => Ok(sorted.into_iter().map(|idx| dag[idx]).collect()),
      Err(cycle) => Err(self.cycle_error(&dag, cycle.node_id())),
    }
  }

  /// Dependencies before their dependents.
  pub fn bottom_up_order(&self) -> Result<Vec<ModuleId>, GraphError> {
    let mut order = self.top_down_order()?;
    order.reverse();
    Ok(order)
  }

  fn cycle_error(&self, dag: &DiGraph<ModuleId, ()>, start: NodeIndex) -> GraphError {
    let component = tarjan_scc(dag)
      .into_iter()
      .find(|scc| scc.contains(&start))
      .unwrap_or_else(|| vec![start]);
    let mut modules: Vec<String> = component
      .into_iter()
      .map(|idx| self.display_name(dag[idx]))
      .collect();
    modules.sort();
    modules.dedup();
    GraphError::Cycle { modules }
  }
}
