//! Lua module declarations.
//!
//! Modules are declared by calling a global named after their type with a
//! table of properties:
//!
//! ```lua
//! transition_module {
//!   name = "B",
//!   deps = { "C" },
//! }
//! ```
//!
//! # Submodules
//!
//! - [`types`] - Registry of module types and their factories
//! - [`runtime`] - Lua VM setup and script loading

pub mod runtime;
pub mod types;

pub use types::{ModuleFactory, ModuleTypes};
