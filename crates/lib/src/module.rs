//! The capability every module kind provides to the engine.

use std::fmt::Debug;

/// A declared build module.
///
/// The engine is generic over the module kind and only needs its name, its
/// static dependency names, and the tag type carried by its dependency edges.
/// Instances are cloned when a transition mutator splits a module into
/// several variants.
pub trait Module: Clone + Debug {
  /// Caller-defined label attached to each dependency edge. Static edges use
  /// the default value.
  type Tag: Clone + Debug + Default + PartialEq;

  fn name(&self) -> &str;

  /// Names of the modules this one depends on before any mutator runs.
  fn deps(&self) -> &[String];

  /// Where the module was declared, such as `modules.lua:8`. Errors
  /// attributed to the module are prefixed with it.
  fn location(&self) -> Option<&str> {
    None
  }

  /// Called by the declaration loader with the declaring `chunk:line`.
  /// Kinds that do not report locations ignore it.
  fn set_location(&mut self, _location: String) {}
}
