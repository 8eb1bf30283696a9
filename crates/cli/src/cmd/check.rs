//! Implementation of the `varia check` command.

use anyhow::Result;

use crate::output::{OutputFormat, print_json, print_success};

use super::{ResolveArgs, load_and_resolve, report_errors};

pub fn cmd_check(args: &ResolveArgs, format: OutputFormat) -> Result<()> {
  let graph = match load_and_resolve(args)? {
    Ok(graph) => graph,
    Err(errors) => return report_errors(&errors, format),
  };

  if format.is_json() {
    print_json(&serde_json::json!({
      "ok": true,
      "modules": graph.groups().len(),
      "variants": graph.len(),
    }))
  } else {
    print_success(&format!(
      "{}: {} module(s), {} variant(s) resolved",
      args.file.display(),
      graph.groups().len(),
      graph.len()
    ));
    Ok(())
  }
}
