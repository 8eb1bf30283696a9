//! Declaration file evaluation.
//!
//! This module provides the `evaluate_file` and `evaluate_source` functions
//! which run a Lua declaration script and return every module it declared, in
//! declaration order.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use mlua::prelude::*;
use tracing::info;

use crate::lua::{ModuleTypes, runtime};
use crate::module::Module;

/// Errors that can occur during declaration evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
  /// Lua evaluation error, including invalid declarations.
  #[error("lua error: {0}")]
  Lua(#[from] LuaError),

  #[error("cannot read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Evaluate a declaration script held in memory.
///
/// `name` stands in for a file name in Lua error messages and in the
/// `name:line` location recorded for each declared module.
pub fn evaluate_source<M: Module + 'static>(
  types: &ModuleTypes<M>,
  source: &str,
  name: &str,
) -> Result<Vec<M>, EvalError> {
  evaluate_chunk(types, source, &format!("={}", name))
}

fn evaluate_chunk<M: Module + 'static>(
  types: &ModuleTypes<M>,
  source: &str,
  chunk_name: &str,
) -> Result<Vec<M>, EvalError> {
  let modules = Rc::new(RefCell::new(Vec::new()));
  {
    let lua = runtime::create_runtime(types, modules.clone())?;
    runtime::load_source(&lua, source, chunk_name)?;
  }

  let declared = std::mem::take(&mut *modules.borrow_mut());
  info!(count = declared.len(), chunk = chunk_name, "evaluated declarations");
  Ok(declared)
}

/// Evaluate the declaration script at `path`.
///
/// # Example
/// ```ignore
/// use std::path::Path;
/// use varia_lib::declared;
/// use varia_lib::eval::evaluate_file;
///
/// let modules = evaluate_file(&declared::module_types(), Path::new("modules.lua"))?;
/// println!("Modules: {}", modules.len());
/// ```
pub fn evaluate_file<M: Module + 'static>(types: &ModuleTypes<M>, path: &Path) -> Result<Vec<M>, EvalError> {
  let source = std::fs::read_to_string(path).map_err(|source| EvalError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  evaluate_chunk(types, &source, &format!("@{}", path.display()))
}
