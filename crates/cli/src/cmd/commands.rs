//! Implementation of the `gobuild commands` command.
//!
//! Prints the ordered build steps a target generates for a host type.

use anyhow::{Context, Result};

use gobuild_lib::HostType;

use crate::output::{print_heading, print_json, print_stat, truncate};

use super::{BuildOptionArgs, lookup};

pub fn cmd_commands(name: &str, host: &str, args: &BuildOptionArgs, json: bool, verbose: bool) -> Result<()> {
  let options = args.resolve()?;
  let target = lookup(name, options)?;
  let commands = target
    .commands(&HostType::from(host))
    .with_context(|| format!("Failed to generate commands for {}", name))?;

  if json {
    return print_json(&commands);
  }

  for (index, command) in commands.iter().enumerate() {
    print_heading(&format!("[{}] {}", index + 1, command.desc));
    print_stat("Root", &command.root);
    print_stat("Log", &command.log);
    if verbose {
      print_stat("Command", &command.command);
      for (key, value) in &command.env {
        print_stat(&format!("env {}", key), value);
      }
    } else {
      print_stat("Command", &truncate(&command.command, 120));
    }
  }

  Ok(())
}
