//! Pinned upstream components.
//!
//! Bumping a pin means changing the branch and change together; the change
//! must exist on the branch.

use std::collections::BTreeMap;

use crate::target::ComponentDependency;

/// FIPS compliant Go toolchain. Updates must stay on a `boringcrypto` branch.
pub const CAYMAN_GO_BRANCH: &str = "vmware-go1.15.0-boringcrypto";
pub const CAYMAN_GO_CLN: &str = "d037af11cfdcae3e311de155c3097d1378f423e6";
pub const CAYMAN_GO_BUILDTYPE: &str = "release";
pub const CAYMAN_GO_HOSTTYPES: &[(&str, &str)] = &[
  ("linux64", "linux64"),
  ("linux-centos72-gc32", "linux64"),
  ("linux-centos72-gc32-fw", "linux64"),
];

pub fn cayman_go() -> ComponentDependency {
  ComponentDependency {
    branch: CAYMAN_GO_BRANCH.to_string(),
    change: CAYMAN_GO_CLN.to_string(),
    buildtype: CAYMAN_GO_BUILDTYPE.to_string(),
    hosttypes: CAYMAN_GO_HOSTTYPES
      .iter()
      .map(|(ours, theirs)| (ours.to_string(), theirs.to_string()))
      .collect::<BTreeMap<_, _>>(),
  }
}
