//! Implementation of the `gobuild version` command.
//!
//! Reads the version a finished build published under its build root.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gobuild_lib::HostType;

use super::{BuildOptionArgs, lookup};

pub fn cmd_version(name: &str, host: &str, buildroot: PathBuf, args: &BuildOptionArgs) -> Result<()> {
  let mut options = args.resolve()?;
  options.buildroot = Some(buildroot);

  let target = lookup(name, options)?;
  let version = target
    .product_version(&HostType::from(host))
    .with_context(|| format!("Failed to read version of {}", name))?;

  println!("{}", version);
  Ok(())
}
