//! varia-lib: variant and transition engine for module graphs
//!
//! This crate computes the build variants each declared module must exist in
//! and rewires dependency edges to the right variant:
//! - `Variant`: the per-instance mapping from transition mutator to value
//! - `Graph`: modules grouped by name, one instance per variant
//! - `TransitionMutator`: split, outgoing/incoming transitions and mutate
//! - `BottomUpContext`: post-transition forward, far and reverse dependencies
//! - `Context`: mutator registration and the ordered resolve loop

pub mod context;
pub mod declared;
pub mod error;
pub mod eval;
pub mod graph;
pub mod lua;
pub mod module;
pub mod reference;
pub mod report;
pub mod resolve;
pub mod transition;
pub mod variant;

#[cfg(test)]
mod util;

pub use context::{Context, ResolveConfig, TransitionHandle};
pub use error::{DepDirection, GraphError, ResolveErrors};
pub use graph::{DepEdge, Graph, ModuleGroup, ModuleId};
pub use module::Module;
pub use resolve::{BottomUpContext, BottomUpMutator};
pub use transition::{
  IncomingContext, MutatorError, OutgoingContext, SplitContext, TransitionMutator, TransitionPhase,
};
pub use variant::{Variant, Variation};
