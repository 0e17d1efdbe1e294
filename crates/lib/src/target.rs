//! The capability contract of a buildable product.
//!
//! Field names on the serialized types match what the orchestrator reads
//! (`desc`, `rcs`, `type`, `hosttypes`, ...), so a target description can be
//! handed over as JSON unchanged.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{PUBLISH_DIR, VERSION_FILE};
use crate::error::TargetError;
use crate::host::HostType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductNames {
  pub name: String,
  pub longname: String,
}

/// Version control system a repository is checked out from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rcs {
  Git,
  Perforce,
}

/// A checkout the orchestrator performs before the first command runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
  pub rcs: Rcs,
  /// `<path>;<branch>;<revision>`, usually with placeholder branch.
  pub src: String,
  /// Destination relative to the build root.
  pub dst: String,
}

/// One build step. Steps run in order and the first failure aborts the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
  pub desc: String,
  /// Working directory template.
  pub root: String,
  /// Log file name for the step's output.
  pub log: String,
  pub env: BTreeMap<String, String>,
  pub command: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
  Source,
  Build,
}

/// What to archive once the build succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRule {
  #[serde(rename = "type")]
  pub kind: ArtifactKind,
  pub src: String,
}

/// A pinned upstream prebuilt component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDependency {
  pub branch: String,
  pub change: String,
  pub buildtype: String,
  /// Our host type -> the component host type whose outputs we consume.
  pub hosttypes: BTreeMap<String, String>,
}

/// A buildable product.
///
/// Instances are created per lookup and hold no state shared with other
/// builds. Optional capabilities default to empty.
pub trait Target {
  fn product_names(&self) -> ProductNames;

  /// Build agent labels the product needs (e.g. docker availability).
  fn cluster_requirements(&self) -> Vec<String>;

  fn repositories(&self, host: &HostType) -> Vec<Repository>;

  /// Ordered build steps for `host`.
  ///
  /// # Errors
  ///
  /// Fails with [`TargetError::UnsupportedHostType`] when no toolchain exists
  /// for `host`.
  fn commands(&self, host: &HostType) -> Result<Vec<Command>, TargetError>;

  fn storage_info(&self, _host: &HostType) -> Vec<StorageRule> {
    Vec::new()
  }

  /// The version the finished build produced.
  fn product_version(&self, host: &HostType) -> Result<String, TargetError>;

  /// Where this target's outputs live, for dependent targets.
  fn component_path(&self) -> String;

  fn component_dependencies(&self) -> BTreeMap<String, ComponentDependency> {
    BTreeMap::new()
  }

  /// Aliases of the declared component dependencies.
  fn component_dependency_aliases(&self) -> Vec<String> {
    self.component_dependencies().into_keys().collect()
  }
}

/// Read `<buildroot>/publish/VERSION`.
pub fn read_publish_version(buildroot: Option<&Path>) -> Result<String, TargetError> {
  let buildroot = buildroot.ok_or(TargetError::MissingBuildRoot)?;
  read_version_file(&buildroot.join(PUBLISH_DIR))
}

/// Read the `VERSION` file under `publish_dir`, trimmed of whitespace.
///
/// # Errors
///
/// Returns [`TargetError::VersionUnavailable`] if the file is missing or
/// unreadable and [`TargetError::EmptyVersion`] if it holds no version.
pub fn read_version_file(publish_dir: &Path) -> Result<String, TargetError> {
  let path: PathBuf = publish_dir.join(VERSION_FILE);
  debug!(path = ?path, "reading version file");

  let content = std::fs::read_to_string(&path).map_err(|source| TargetError::VersionUnavailable {
    path: path.clone(),
    source,
  })?;

  let version = content.trim();
  if version.is_empty() {
    return Err(TargetError::EmptyVersion(path));
  }
  Ok(version.to_string())
}
