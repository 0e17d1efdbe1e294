//! Implementation of the `gobuild list` command.

use anyhow::Result;

use gobuild_lib::TargetRegistry;

use crate::output::{print_info, print_json, symbols};

pub fn cmd_list(json: bool) -> Result<()> {
  let mut names = TargetRegistry::with_defaults().names();
  names.sort_unstable();

  if json {
    return print_json(&names);
  }

  if names.is_empty() {
    print_info("No targets registered.");
    return Ok(());
  }

  for name in names {
    println!("  {} {}", symbols::INFO, name);
  }
  Ok(())
}
