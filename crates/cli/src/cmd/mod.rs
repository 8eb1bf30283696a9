mod check;
mod resolve;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::debug;

use varia_lib::declared::{self, DeclaredOptions, TransitionModule};
use varia_lib::eval::evaluate_file;
use varia_lib::{Graph, ResolveConfig, ResolveErrors};

use crate::output::{OutputFormat, print_error, print_json};

pub use check::cmd_check;
pub use resolve::cmd_resolve;

/// Arguments shared by every command that resolves a module file.
#[derive(Debug, Args)]
pub struct ResolveArgs {
  /// Path to the module declaration file
  pub file: PathBuf,

  /// Name of the transition mutator, and of the variant dimension it controls
  #[arg(long, default_value = "transition")]
  pub mutator: String,

  /// Let far dependencies inherit this mutator's variation
  #[arg(long)]
  pub never_far: bool,

  /// Ignore dependencies on undefined modules
  #[arg(long)]
  pub allow_missing_deps: bool,
}

impl ResolveArgs {
  fn options(&self) -> DeclaredOptions {
    DeclaredOptions {
      mutator: self.mutator.clone(),
      never_far: self.never_far,
    }
  }

  fn config(&self) -> ResolveConfig {
    ResolveConfig {
      allow_missing_dependencies: self.allow_missing_deps,
    }
  }
}

/// Evaluate `args.file` and resolve it.
///
/// The outer error covers loading the file; the inner one carries every
/// resolution failure so callers can report them individually.
fn load_and_resolve(args: &ResolveArgs) -> Result<Result<Graph<TransitionModule>, ResolveErrors>> {
  let modules = evaluate_file(&declared::module_types(), &args.file)
    .with_context(|| format!("Failed to evaluate modules: {}", args.file.display()))?;
  debug!(file = %args.file.display(), modules = modules.len(), "declarations loaded");

  Ok(declared::context(&args.options(), args.config()).resolve_dependencies(modules))
}

/// Print every resolution error and fail the command.
fn report_errors(errors: &ResolveErrors, format: OutputFormat) -> Result<()> {
  if format.is_json() {
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    print_json(&serde_json::json!({ "ok": false, "errors": messages }))?;
  } else {
    for err in errors.iter() {
      print_error(&err.to_string());
    }
  }
  bail!("resolution failed with {} error(s)", errors.len())
}
