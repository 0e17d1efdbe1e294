mod commands;
mod list;
mod make;
mod show;
mod version;

pub use commands::cmd_commands;
pub use list::cmd_list;
pub use make::{MakeArgs, cmd_make};
pub use show::cmd_show;
pub use version::cmd_version;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Args;
use tracing::debug;

use gobuild_lib::{BuildOptions, Target, TargetRegistry};

/// Build options the orchestrator would normally pass in.
#[derive(Debug, Clone, Default, Args)]
pub struct BuildOptionArgs {
  /// JSON file with build options; flags below take precedence
  #[arg(long = "options", value_name = "FILE")]
  pub options_file: Option<PathBuf>,

  /// Ask make for verbose output (VERBOSE=3)
  #[arg(long)]
  pub verbose_build: bool,

  /// Override the number of cpus make may use
  #[arg(long, allow_negative_numbers = true)]
  pub numcpus: Option<i64>,

  /// Sign with the official key (true) or explicitly not (false)
  #[arg(long)]
  pub officialkey: Option<bool>,

  /// Virus scanner to run on windows hosts
  #[arg(long)]
  pub virusscanner: Option<String>,
}

impl BuildOptionArgs {
  /// Merge the options file (if any) with the flags given on the command line.
  pub fn resolve(&self) -> Result<BuildOptions> {
    let mut options = match &self.options_file {
      Some(path) => BuildOptions::from_json_file(path)?,
      None => BuildOptions::default(),
    };

    options.verbose |= self.verbose_build;
    if self.numcpus.is_some() {
      options.numcpus = self.numcpus;
    }
    if self.officialkey.is_some() {
      options.officialkey = self.officialkey;
    }
    if self.virusscanner.is_some() {
      options.virusscanner = self.virusscanner.clone();
    }

    debug!(options = ?options, "resolved build options");
    Ok(options)
  }
}

/// Look up `name` in the default registry.
fn lookup(name: &str, options: BuildOptions) -> Result<Box<dyn Target>> {
  let registry = TargetRegistry::with_defaults();
  registry
    .lookup_with(name, options)
    .ok_or_else(|| anyhow!("unknown target: {} (available: {})", name, registry.names().join(", ")))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flags_override_options_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("options.json");
    std::fs::write(&path, r#"{"numcpus": 4, "officialkey": true, "verbose": false}"#).unwrap();

    let args = BuildOptionArgs {
      options_file: Some(path),
      verbose_build: true,
      numcpus: Some(16),
      officialkey: None,
      virusscanner: None,
    };
    let options = args.resolve().unwrap();

    assert!(options.verbose);
    assert_eq!(options.numcpus, Some(16));
    assert_eq!(options.officialkey, Some(true));
  }

  #[test]
  fn no_flags_is_default() {
    assert_eq!(BuildOptionArgs::default().resolve().unwrap(), BuildOptions::default());
  }

  #[test]
  fn unknown_target_error_names_target() {
    let err = lookup("nope", BuildOptions::default()).err().unwrap();
    assert!(format!("{:#}", err).contains("unknown target: nope"));
  }
}
