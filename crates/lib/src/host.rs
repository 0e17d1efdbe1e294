use serde::{Deserialize, Serialize};

use std::fmt;

/// Build agent families a host type can be matched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostFamily {
  Linux,
  Windows,
  Mac,
}

impl HostFamily {
  /// Returns the prefix host types of this family start with
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::Windows => "windows",
      Self::Mac => "mac",
    }
  }

  /// Separator between `PATH` entries on agents of this family
  pub fn path_separator(&self) -> char {
    match self {
      Self::Windows => ';',
      Self::Linux | Self::Mac => ':',
    }
  }
}

impl fmt::Display for HostFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Identifier of the build agent a step runs on (e.g. `linux64`,
/// `windows2019-vc142`, `linux-centos72-gc32`).
///
/// Opaque: it is only ever matched by prefix, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostType(pub String);

impl HostType {
  pub fn new(host: impl Into<String>) -> Self {
    Self(host.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Returns the family selected by prefix, `None` for cluster labels and
  /// other unrecognized host types.
  pub fn family(&self) -> Option<HostFamily> {
    [HostFamily::Linux, HostFamily::Windows, HostFamily::Mac]
      .into_iter()
      .find(|family| self.0.starts_with(family.as_str()))
  }

  pub fn is_windows(&self) -> bool {
    self.family() == Some(HostFamily::Windows)
  }
}

impl fmt::Display for HostType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for HostType {
  fn from(host: &str) -> Self {
    HostType::new(host)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn family_matches_by_prefix() {
    assert_eq!(HostType::from("linux64").family(), Some(HostFamily::Linux));
    assert_eq!(HostType::from("linux-centos72-gc32").family(), Some(HostFamily::Linux));
    assert_eq!(HostType::from("windows2019-vc142").family(), Some(HostFamily::Windows));
    assert_eq!(HostType::from("mac64").family(), Some(HostFamily::Mac));
  }

  #[test]
  fn unrecognized_host_has_no_family() {
    assert_eq!(HostType::from("solaris").family(), None);
    assert_eq!(HostType::from("").family(), None);
    // Prefix match is case sensitive
    assert_eq!(HostType::from("Linux64").family(), None);
  }

  #[test]
  fn windows_uses_semicolon_separator() {
    assert_eq!(HostFamily::Windows.path_separator(), ';');
    assert_eq!(HostFamily::Linux.path_separator(), ':');
  }
}
