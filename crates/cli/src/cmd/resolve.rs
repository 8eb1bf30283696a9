//! Implementation of the `varia resolve` command.
//!
//! Prints every variant of every module, in declaration order, with the
//! variants of its direct dependencies.

use anyhow::Result;

use crate::output::{OutputFormat, print_info, print_json, print_success, symbols};

use super::{ResolveArgs, load_and_resolve, report_errors};

pub fn cmd_resolve(args: &ResolveArgs, format: OutputFormat, verbose: bool) -> Result<()> {
  let graph = match load_and_resolve(args)? {
    Ok(graph) => graph,
    Err(errors) => return report_errors(&errors, format),
  };
  let report = graph.report([args.mutator.as_str()]);

  if format.is_json() {
    return print_json(&report);
  }

  for module in &report.modules {
    for variant in &module.variants {
      if variant.deps.is_empty() {
        println!("{}", variant.label);
      } else {
        println!("{} {} {}", variant.label, symbols::ARROW, variant.deps.join(", "));
      }
      if verbose && !variant.variations.is_default() {
        println!("    {}", variant.variations);
      }
    }
  }

  println!();
  print_success(&format!(
    "Resolved {} module(s) into {} variant(s)",
    report.modules.len(),
    graph.len()
  ));
  if verbose {
    print_info(&format!("Mutators: {}", report.mutators.join(", ")));
  }
  Ok(())
}
