use std::rc::Rc;

use mlua::prelude::*;
use serde::de::DeserializeOwned;

use crate::module::Module;

/// Builds a module from the value passed to its declaration function.
pub type ModuleFactory<M> = Rc<dyn Fn(&Lua, LuaValue) -> LuaResult<M>>;

/// The module types a script may declare, keyed by global function name.
pub struct ModuleTypes<M> {
  factories: Vec<(String, ModuleFactory<M>)>,
}

impl<M: Module + 'static> ModuleTypes<M> {
  pub fn new() -> Self {
    Self { factories: Vec::new() }
  }

  /// Register `name` with a custom factory. Re-registering a name replaces
  /// the previous factory.
  pub fn register<F>(&mut self, name: &str, factory: F) -> &mut Self
  where
    F: Fn(&Lua, LuaValue) -> LuaResult<M> + 'static,
  {
    self.factories.retain(|(existing, _)| existing != name);
    self.factories.push((name.to_string(), Rc::new(factory)));
    self
  }

  /// Register `name` as a declaration table deserialized into `T`.
  pub fn register_serde<T>(&mut self, name: &str) -> &mut Self
  where
    T: DeserializeOwned + Into<M> + 'static,
  {
    self.register(name, |lua, value| {
      let decl: T = lua.from_value(value)?;
      Ok(decl.into())
    })
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.factories.iter().map(|(name, _)| name.as_str())
  }

  pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &ModuleFactory<M>)> {
    self.factories.iter().map(|(name, factory)| (name.as_str(), factory))
  }
}

impl<M: Module + 'static> Default for ModuleTypes<M> {
  fn default() -> Self {
    Self::new()
  }
}
