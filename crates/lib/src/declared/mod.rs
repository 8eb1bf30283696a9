//! The built-in declared module kind.
//!
//! `transition_module { ... }` declares a [`TransitionModule`] whose split,
//! transitions and post-transition dependencies all come from its own
//! properties. It is what the `varia` CLI resolves.

mod mutators;
mod types;

pub use mutators::{PostTransitionDeps, PropertyTransition};
pub use types::*;

use crate::context::{Context, ResolveConfig};
use crate::lua::ModuleTypes;

/// Global function name used to declare a [`TransitionModule`].
pub const MODULE_TYPE: &str = "transition_module";

/// Name of the bottom-up mutator adding post-transition dependencies.
pub const POST_TRANSITION_DEPS: &str = "post_transition_deps";

/// How the declared module kind is wired into a [`Context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredOptions {
  /// Name of the transition mutator, and so of the variant dimension.
  pub mutator: String,
  pub never_far: bool,
}

impl Default for DeclaredOptions {
  fn default() -> Self {
    Self {
      mutator: "transition".to_string(),
      never_far: false,
    }
  }
}

/// Module types for declaration scripts: just `transition_module`.
pub fn module_types() -> ModuleTypes<TransitionModule> {
  let mut types = ModuleTypes::new();
  types.register_serde::<TransitionModule>(MODULE_TYPE);
  types
}

/// A context with the property-driven transition mutator followed by the
/// post-transition dependency mutator.
pub fn context(options: &DeclaredOptions, config: ResolveConfig) -> Context<TransitionModule> {
  let mut ctx = Context::new(config);
  let handle = ctx.register_transition_mutator(&options.mutator, PropertyTransition);
  if options.never_far {
    handle.never_far();
  }
  ctx.register_bottom_up_mutator(
    POST_TRANSITION_DEPS,
    PostTransitionDeps {
      mutator: options.mutator.clone(),
    },
  );
  ctx
}
