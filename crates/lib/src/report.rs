//! Serializable summary of a resolved graph.

use serde::Serialize;

use crate::graph::Graph;
use crate::module::Module;
use crate::variant::Variant;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphReport {
  pub mutators: Vec<String>,
  pub modules: Vec<ModuleReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleReport {
  pub name: String,
  pub variants: Vec<VariantReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantReport {
  /// The instance as `Name(variant)`.
  pub label: String,
  /// Variant name such as `a` or `arm64_shared`; empty for the default variant.
  pub name: String,
  pub variations: Variant,
  /// Direct dependencies as `Name(variant)`, in edge order.
  pub deps: Vec<String>,
}

impl<M: Module> Graph<M> {
  /// Summarize every module group in declaration order.
  pub fn report(&self, mutators: impl IntoIterator<Item = impl Into<String>>) -> GraphReport {
    GraphReport {
      mutators: mutators.into_iter().map(Into::into).collect(),
      modules: self
        .groups()
        .iter()
        .map(|group| ModuleReport {
          name: group.name().to_string(),
          variants: group
            .modules()
            .iter()
            .map(|&id| VariantReport {
              label: self.display_name(id),
              name: self.variant_name(id),
              variations: self.variant(id).clone(),
              deps: self.direct_dep_names(id),
            })
            .collect(),
        })
        .collect(),
    }
  }
}
