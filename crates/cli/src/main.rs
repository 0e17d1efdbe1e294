mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{BuildOptionArgs, MakeArgs, cmd_commands, cmd_list, cmd_make, cmd_show, cmd_version};
use gobuild_lib::consts::{APP_NAME, DEFAULT_MAKE_VERSION};

/// gobuild - target registry and make command generator
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List registered targets
  List {
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
  },

  /// Describe a target's repositories, storage and components
  Show {
    /// Target name
    target: String,

    /// Host type of the build agent
    #[arg(long, default_value = "linux64")]
    host: String,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
  },

  /// Print the build steps a target generates
  Commands {
    /// Target name
    target: String,

    /// Host type of the build agent
    #[arg(long, default_value = "linux64")]
    host: String,

    #[command(flatten)]
    options: BuildOptionArgs,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
  },

  /// Print a single make command line
  Make {
    /// Make target to invoke
    target: String,

    /// Host type of the build agent
    #[arg(long, default_value = "linux64")]
    host: String,

    /// Use the developer build defaults
    #[arg(long)]
    dev: bool,

    /// Toolchain make version
    #[arg(long, default_value = DEFAULT_MAKE_VERSION)]
    make_version: String,

    /// Override a make flag (KEY=VALUE, or KEY for a bare flag)
    #[arg(short = 'D', long = "define", value_name = "KEY[=VALUE]")]
    defines: Vec<String>,

    /// Component dependency alias to add a GOBUILD_<NAME>_ROOT flag for
    #[arg(long = "dep", value_name = "NAME")]
    deps: Vec<String>,

    #[command(flatten)]
    options: BuildOptionArgs,
  },

  /// Print the version a finished build published
  Version {
    /// Target name
    target: String,

    /// Host type of the build agent
    #[arg(long, default_value = "linux64")]
    host: String,

    /// Build root of the finished build
    #[arg(long)]
    buildroot: PathBuf,

    #[command(flatten)]
    options: BuildOptionArgs,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::List { json } => cmd_list(json),
    Commands::Show { target, host, json } => cmd_show(&target, &host, json),
    Commands::Commands {
      target,
      host,
      options,
      json,
    } => cmd_commands(&target, &host, &options, json, cli.verbose),
    Commands::Make {
      target,
      host,
      dev,
      make_version,
      defines,
      deps,
      options,
    } => cmd_make(
      &MakeArgs {
        target: &target,
        host: &host,
        dev,
        version: &make_version,
        defines: &defines,
        deps: &deps,
      },
      &options,
    ),
    Commands::Version {
      target,
      host,
      buildroot,
      options,
    } => cmd_version(&target, &host, buildroot, &options),
  };

  if let Err(ref e) = result {
    output::print_error(&format!("{:#}", e));
    std::process::exit(1);
  }

  Ok(())
}
