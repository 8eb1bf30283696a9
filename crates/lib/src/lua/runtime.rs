use std::cell::RefCell;
use std::rc::Rc;

use mlua::prelude::*;
use tracing::debug;

use super::types::ModuleTypes;
use crate::module::Module;

/// Create a Lua runtime with one global declaration function per module type.
/// Every declared module is appended to `modules` in declaration order.
pub fn create_runtime<M: Module + 'static>(types: &ModuleTypes<M>, modules: Rc<RefCell<Vec<M>>>) -> LuaResult<Lua> {
  let lua = Lua::new();

  for (global, factory) in types.iter() {
    let factory = factory.clone();
    let modules = modules.clone();
    let type_name = global.to_string();
    let declare = lua.create_function(move |lua, value: LuaValue| {
      let mut module =
        factory(lua, value).map_err(|e| LuaError::external(format!("invalid {}: {}", type_name, e)))?;
      if module.name().is_empty() {
        return Err(LuaError::external(format!("{} requires a non-empty name", type_name)));
      }
      if let Some(location) = caller_location(lua) {
        module.set_location(location);
      }
      debug!(module_type = %type_name, name = module.name(), location = ?module.location(), "declared module");
      modules.borrow_mut().push(module);
      Ok(())
    })?;
    lua.globals().set(global, declare)?;
  }

  Ok(lua)
}

/// `chunk:line` of the Lua code calling the current Rust function.
///
/// Chunk names starting with `@` (files) or `=` (literal names) are shown
/// without the marker.
fn caller_location(lua: &Lua) -> Option<String> {
  lua
    .inspect_stack(1, |debug| {
      let line = debug.current_line()?;
      let source = debug.source();
      let chunk = source.source.as_deref().unwrap_or("?");
      let chunk = chunk
        .strip_prefix('@')
        .or_else(|| chunk.strip_prefix('='))
        .unwrap_or(chunk);
      Some(format!("{}:{}", chunk, line))
    })
    .flatten()
}

/// Execute a chunk of declarations.
pub fn load_source(lua: &Lua, source: &str, chunk_name: &str) -> LuaResult<()> {
  lua.load(source).set_name(chunk_name).exec()
}

