//! Options the orchestrator passes to a build.
//!
//! Every field is optional: absence means "use the default". `officialkey` is
//! an `Option<bool>` because an explicit `false` and a missing key produce
//! different make flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
  pub verbose: bool,

  /// Concurrency override. Passed through as given; `0` counts as unset.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub numcpus: Option<i64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub officialkey: Option<bool>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub virusscanner: Option<String>,

  /// Resolved build root, known only once the build has run.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub buildroot: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum OptionsError {
  #[error("failed to read options file {}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse options file {}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

impl BuildOptions {
  /// Load options from the JSON dictionary the orchestrator writes.
  ///
  /// Keys this crate does not know about are ignored.
  pub fn from_json_file(path: &Path) -> Result<Self, OptionsError> {
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| OptionsError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// The concurrency override, if one was given and is non-zero.
  pub fn cpu_override(&self) -> Option<i64> {
    self.numcpus.filter(|n| *n != 0)
  }

  /// The virus scanner path, if one was given and is non-empty.
  pub fn virus_scanner(&self) -> Option<&str> {
    self.virusscanner.as_deref().filter(|s| !s.is_empty())
  }
}
