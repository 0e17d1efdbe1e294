//! Errors raised while describing a build.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TargetError {
  /// No toolchain is known for the host type. The build cannot proceed.
  #[error("unsupported hosttype: {0}")]
  UnsupportedHostType(String),

  /// The version file could not be read after the build.
  #[error("version unavailable at {}", .path.display())]
  VersionUnavailable {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The version file exists but holds nothing besides whitespace.
  #[error("version file is empty: {}", .0.display())]
  EmptyVersion(PathBuf),

  /// The build root was never handed over, so outputs cannot be located.
  #[error("build root not set in build options")]
  MissingBuildRoot,
}

impl TargetError {
  /// True for errors about reading build outputs, which the orchestrator may
  /// retry without rebuilding.
  pub fn is_artifact_unavailable(&self) -> bool {
    matches!(
      self,
      TargetError::VersionUnavailable { .. } | TargetError::EmptyVersion(_) | TargetError::MissingBuildRoot
    )
  }
}
