//! Implementation of the `gobuild make` command.
//!
//! Prints a single make command line, the same way targets generate theirs.

use anyhow::{Result, bail};

use gobuild_lib::HostType;
use gobuild_lib::make::{FlagSet, FlagValue, MakeRequest, MakeVariant, build, parse_assignment};

use super::BuildOptionArgs;

pub struct MakeArgs<'a> {
  pub target: &'a str,
  pub host: &'a str,
  pub dev: bool,
  pub version: &'a str,
  pub defines: &'a [String],
  pub deps: &'a [String],
}

pub fn cmd_make(args: &MakeArgs<'_>, options: &BuildOptionArgs) -> Result<()> {
  let options = options.resolve()?;
  let host = HostType::from(args.host);
  let overrides = args
    .defines
    .iter()
    .map(|define| parse_define(define))
    .collect::<Result<FlagSet>>()?;

  let variant = if args.dev { MakeVariant::Dev } else { MakeVariant::Release };

  let command = build(&MakeRequest {
    variant,
    host: &host,
    target: args.target,
    version: args.version,
    overrides: &overrides,
    options: &options,
    dependencies: args.deps,
  })?;

  println!("{}", command);
  Ok(())
}

/// Parse a `-D KEY[=VALUE]` define. The key may not be empty.
fn parse_define(define: &str) -> Result<(String, FlagValue)> {
  let (key, value) = parse_assignment(define);
  if key.trim().is_empty() {
    bail!("invalid define {:?}: missing variable name", define);
  }
  Ok((key, value))
}
