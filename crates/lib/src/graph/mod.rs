//! The module graph store.
//!
//! Modules are kept in an arena and grouped by declared name. Each group holds
//! its variant-specific instances in variation order; the variant mapping is
//! unique within a group.

mod order;
mod store;

pub use store::*;
