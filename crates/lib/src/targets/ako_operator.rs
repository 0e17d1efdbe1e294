//! ako-operator: builds the AKO operator container image.

use std::collections::BTreeMap;

use crate::consts::{PUBLISH_DIR, TCROOT_DEFAULT};
use crate::environment::{prepend_paths, safe_environment, tcroot_or};
use crate::error::TargetError;
use crate::host::HostType;
use crate::make::{FlagSet, MakeHelper};
use crate::options::BuildOptions;
use crate::pins;
use crate::placeholder::{self, token};
use crate::target::{
  Command, ComponentDependency, ProductNames, Rcs, Repository, StorageRule, Target, read_publish_version,
};

pub const NAME: &str = "ako-operator";

const REL_PATH: &str = "core-build/ako-operator";
const SRC_HOST: &str = "gitlab.eng.vmware.com";
const GOPATH_SRC: &str = "home/mts/go/src";

/// Toolchain directories under `<TCROOT>/lin64`, searched before the
/// inherited `PATH`.
const TOOLCHAIN_DIRS: &[&str] = &[
  "coreutils-5.97/bin",
  "findutils-4.2.27/bin",
  "grep-2.5.1a/bin",
  "make-3.81/bin",
  "cmake-2.8.10.2/bin",
  "bash-4.1/bin",
  "gawk-3.1.5/bin",
  "sed-4.1.5/bin",
  "tar-1.23/bin",
  "gzip-1.5/bin",
  "git-2.6.2/bin",
];

/// Searched after the inherited `PATH`.
const SYSTEM_DIRS: &[&str] = &[
  "/build/toolchain/noarch/vmware/gpgsign/",
  "/command",
  "/usr/local/bin",
  "/usr/local/sbin",
  "/bin",
  "/sbin",
  "/usr/bin",
  "/usr/sbin",
  "/usr/X11R6/bin",
];

pub struct AkoOperator {
  make: MakeHelper,
}

impl AkoOperator {
  pub fn new(options: BuildOptions) -> Self {
    Self {
      make: MakeHelper::new(options),
    }
  }

  fn dependencies() -> BTreeMap<String, ComponentDependency> {
    BTreeMap::from([("cayman_go".to_string(), pins::cayman_go())])
  }

  fn src_path() -> String {
    format!("{}/{}", SRC_HOST, REL_PATH)
  }

  fn checkout_dir() -> String {
    format!("{}/{}", GOPATH_SRC, Self::src_path())
  }

  fn environment(&self, host: &HostType) -> BTreeMap<String, String> {
    let mut env = safe_environment(host);

    let tcroot = tcroot_or(TCROOT_DEFAULT);
    let head = TOOLCHAIN_DIRS.iter().map(|dir| format!("{}/lin64/{}", tcroot, dir));
    let tail = SYSTEM_DIRS.iter().map(|dir| dir.to_string());
    prepend_paths(&mut env, host, head, tail);

    env
  }

  fn step(&self, host: &HostType, desc: &str, log: &str, make_target: &str) -> Result<Command, TargetError> {
    Ok(Command {
      desc: desc.to_string(),
      root: format!("{}/{}", token(placeholder::BUILDROOT), Self::checkout_dir()),
      log: log.to_string(),
      env: self.environment(host),
      command: self.make.command(self, host, make_target, &FlagSet::new())?,
    })
  }
}

impl Default for AkoOperator {
  fn default() -> Self {
    Self::new(BuildOptions::default())
  }
}

impl Target for AkoOperator {
  fn product_names(&self) -> ProductNames {
    ProductNames {
      name: NAME.to_string(),
      longname: "AKO Operator".to_string(),
    }
  }

  fn cluster_requirements(&self) -> Vec<String> {
    // Has docker and isn't firewalled
    vec!["linux-centos72-gc32".to_string()]
  }

  fn repositories(&self, _host: &HostType) -> Vec<Repository> {
    vec![Repository {
      rcs: Rcs::Git,
      src: format!("{};{};", REL_PATH, token(placeholder::BRANCH)),
      dst: Self::checkout_dir(),
    }]
  }

  fn commands(&self, host: &HostType) -> Result<Vec<Command>, TargetError> {
    Ok(vec![
      self.step(
        host,
        "Fetching unshallow git repo",
        "fetch-unshallow.log",
        "gobuild-fetch-unshallow",
      )?,
      self.step(host, "Building ako operator container image", "ako-operator.log", "gobuild")?,
    ])
  }

  fn storage_info(&self, _host: &HostType) -> Vec<StorageRule> {
    // The make targets publish their own artifacts.
    Vec::new()
  }

  fn product_version(&self, _host: &HostType) -> Result<String, TargetError> {
    read_publish_version(self.make.options().buildroot.as_deref())
  }

  fn component_path(&self) -> String {
    format!("{}/{}", token(placeholder::BUILDROOT), PUBLISH_DIR)
  }

  fn component_dependencies(&self) -> BTreeMap<String, ComponentDependency> {
    Self::dependencies()
  }
}
