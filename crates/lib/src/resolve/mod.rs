//! Post-transition dependency resolution.
//!
//! Ordinary bottom-up mutators run after the transition mutators registered
//! before them have converged. They may add forward, far and reverse
//! dependencies through [`BottomUpContext`]; the variant structure itself no
//! longer changes.

mod context;

use tracing::info;

pub use context::BottomUpContext;

use crate::context::ResolveConfig;
use crate::error::ResolveErrors;
use crate::graph::Graph;
use crate::module::Module;
use crate::transition::{MutatorError, TransitionEntry};

/// A mutator visited once per module instance, dependencies first.
pub trait BottomUpMutator<M: Module> {
  fn mutate(&self, ctx: &mut BottomUpContext<'_, M>) -> Result<(), MutatorError>;
}

impl<M, F> BottomUpMutator<M> for F
where
  M: Module,
  F: Fn(&mut BottomUpContext<'_, M>) -> Result<(), MutatorError>,
{
  fn mutate(&self, ctx: &mut BottomUpContext<'_, M>) -> Result<(), MutatorError> {
    self(ctx)
  }
}

/// A registered bottom-up mutator.
pub(crate) struct BottomUpEntry<M: Module> {
  pub(crate) name: String,
  pub(crate) mutator: Box<dyn BottomUpMutator<M>>,
}

/// Visit every instance bottom-up, then attach the edges the mutator added.
///
/// # Errors
///
/// Returns every error the pass collected, or a cycle introduced by the new
/// edges. The graph is left untouched when the visit reported errors.
pub(crate) fn run_bottom_up<M: Module>(
  graph: &mut Graph<M>,
  entry: &BottomUpEntry<M>,
  transitions: &[TransitionEntry<M>],
  config: &ResolveConfig,
) -> Result<(), ResolveErrors> {
  let order = graph.bottom_up_order()?;
  let mut errors = ResolveErrors::new();
  let mut edges = Vec::new();

  for id in order {
    let mut ctx = BottomUpContext::new(graph, transitions, config, id);
    if let Err(err) = entry.mutator.mutate(&mut ctx) {
      errors.push(err.into_graph_error(ctx.module(), ctx.variant()));
    }
    errors.extend(ctx.errors);
    edges.extend(ctx.edges);
  }
  errors.into_result()?;

  let added = edges.len();
  for pending in edges {
    graph.add_edge(pending.from, pending.edge);
  }
  graph.top_down_order()?;

  info!(mutator = %entry.name, edges = added, "bottom-up mutator finished");
  Ok(())
}
