//! Make command synthesis.
//!
//! Every gobuild step ends up as a single make invocation. The command line is
//! assembled from four flag sources, later ones winning:
//!
//! 1. the variant's defaults (build identity placeholders)
//! 2. flags derived from [`BuildOptions`] (verbosity, cpus, signing, scanning)
//! 3. one `GOBUILD_<NAME>_ROOT` flag per component dependency
//! 4. the caller's overrides
//!
//! Flags are kept in a [`BTreeMap`] and emitted in key order, so identical
//! inputs always produce byte-identical command lines.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::consts::{DEFAULT_MAKE_VERSION, PUBLISH_DIR, WINDOWS_TCROOT_FALLBACK};
use crate::error::TargetError;
use crate::host::{HostFamily, HostType};
use crate::options::BuildOptions;
use crate::placeholder::{self, quote, token};
use crate::environment::tcroot_or;
use crate::target::{ArtifactKind, StorageRule, Target};

/// Value of a single make flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlagValue {
  /// Emitted as `KEY=value`. An empty value still emits `KEY=`.
  Value(String),
  /// Emitted as a bare `KEY`.
  Bare,
}

impl FlagValue {
  pub fn value(value: impl Into<String>) -> Self {
    FlagValue::Value(value.into())
  }
}

impl From<&str> for FlagValue {
  fn from(value: &str) -> Self {
    FlagValue::Value(value.to_string())
  }
}

impl From<String> for FlagValue {
  fn from(value: String) -> Self {
    FlagValue::Value(value)
  }
}

/// Make flags keyed by variable name, iterated in ascending key order.
pub type FlagSet = BTreeMap<String, FlagValue>;

/// Parse a `KEY=VALUE` or bare `KEY` assignment.
pub fn parse_assignment(assignment: &str) -> (String, FlagValue) {
  match assignment.split_once('=') {
    Some((key, value)) => (key.to_string(), FlagValue::value(value)),
    None => (assignment.to_string(), FlagValue::Bare),
  }
}

/// Which default flag set a command starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MakeVariant {
  /// Official builds: publish directory, remote copy and component roots.
  #[default]
  Release,
  /// Developer builds on shared machines, requesting components on demand.
  Dev,
}

impl fmt::Display for MakeVariant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MakeVariant::Release => write!(f, "release"),
      MakeVariant::Dev => write!(f, "dev"),
    }
  }
}

/// Everything a make command line is computed from.
#[derive(Debug, Clone)]
pub struct MakeRequest<'a> {
  pub variant: MakeVariant,
  pub host: &'a HostType,
  pub target: &'a str,
  pub version: &'a str,
  pub overrides: &'a FlagSet,
  pub options: &'a BuildOptions,
  pub dependencies: &'a [String],
}

/// Build the full make command line for `request`.
///
/// # Errors
///
/// Returns [`TargetError::UnsupportedHostType`] if no make is known for the
/// host type.
pub fn build(request: &MakeRequest<'_>) -> Result<String, TargetError> {
  let make = make_path(request.host, request.version)?;
  debug!(variant = %request.variant, host = %request.host, make_target = request.target, "building make command");

  let mut flags = default_flags(request.variant);
  apply_options(&mut flags, request.variant, request.host, request.options);
  if request.variant == MakeVariant::Release {
    apply_dependencies(&mut flags, request.dependencies);
  }
  flags.extend(request.overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

  Ok(render(&make, request.target, &flags))
}

/// Path to the make executable for `host`.
///
/// Windows agents locate the toolchain through `TCROOT`; when it is unset the
/// path points at `C:/TCROOT-not-set` so the failure is obvious in the log.
pub fn make_path(host: &HostType, version: &str) -> Result<String, TargetError> {
  match host.family() {
    Some(HostFamily::Linux) => Ok(format!("/build/toolchain/lin32/make-{}/bin/make", version)),
    Some(HostFamily::Windows) => {
      Ok(format!("{}/win32/make-{}/make.exe", tcroot_or(WINDOWS_TCROOT_FALLBACK), version))
    }
    Some(HostFamily::Mac) => Ok(format!("/build/toolchain/mac32/make-{}/bin/make", version)),
    None => Err(TargetError::UnsupportedHostType(host.to_string())),
  }
}

/// Build identity flags each variant starts from.
pub fn default_flags(variant: MakeVariant) -> FlagSet {
  let q = |name: &str| FlagValue::Value(quote(&token(name)));

  let mut flags = FlagSet::new();
  flags.insert("OBJDIR".to_string(), q(placeholder::BUILDTYPE));
  flags.insert("RELTYPE".to_string(), q(placeholder::RELEASETYPE));
  flags.insert("BUILD_NUMBER".to_string(), q(placeholder::BUILDNUMBER));
  flags.insert("PRODUCT_BUILD_NUMBER".to_string(), q(placeholder::PRODUCTBUILDNUMBER));
  flags.insert("CHANGE_NUMBER".to_string(), q(placeholder::CHANGENUMBER));
  flags.insert("BRANCH_NAME".to_string(), q(placeholder::BRANCH));

  match variant {
    MakeVariant::Release => {
      flags.insert("GOBUILD_OFFICIAL_BUILD".to_string(), FlagValue::from("1"));
      flags.insert("GOBUILD_AUTO_COMPONENTS".to_string(), FlagValue::from(""));
      flags.insert(
        "PUBLISH_DIR".to_string(),
        FlagValue::Value(quote(&format!("{}/{}", token(placeholder::BUILDROOT), PUBLISH_DIR))),
      );
      flags.insert(
        "REMOTE_COPY_SCRIPT".to_string(),
        FlagValue::Value(quote(&format!(
          "{} {}",
          token(placeholder::GOBUILDC),
          token(placeholder::BUILDID)
        ))),
      );
    }
    MakeVariant::Dev => {
      flags.insert("GOBUILD_AUTO_COMPONENTS_REQUEST".to_string(), FlagValue::from("1"));
      flags.insert("SHARED_BUILD_MACHINE".to_string(), FlagValue::from("1"));
    }
  }

  flags
}

fn apply_options(flags: &mut FlagSet, variant: MakeVariant, host: &HostType, options: &BuildOptions) {
  if options.verbose {
    flags.insert("VERBOSE".to_string(), FlagValue::from("3"));
  }

  if let Some(numcpus) = options.cpu_override() {
    debug!(numcpus, "overriding num cpus");
    flags.insert("NUM_CPU".to_string(), FlagValue::Value(numcpus.to_string()));
  }

  if variant == MakeVariant::Dev {
    return;
  }

  // Presence decides whether the flag appears at all; an explicit `false`
  // yields an empty OFFICIALKEY rather than no flag.
  if let Some(officialkey) = options.officialkey {
    if officialkey {
      debug!("build will use official key");
      flags.insert("OFFICIALKEY".to_string(), FlagValue::from("1"));
    } else {
      debug!("build will not use official key");
      flags.insert("OFFICIALKEY".to_string(), FlagValue::from(""));
    }
  }

  if host.is_windows() {
    if let Some(scanner) = options.virus_scanner() {
      debug!(scanner, "using virus scanner");
      flags.insert("VIRUS_SCAN".to_string(), FlagValue::Value(quote(scanner)));
    }
  }
}

fn apply_dependencies(flags: &mut FlagSet, dependencies: &[String]) {
  for alias in dependencies {
    let (key, value) = dependency_flag(alias);
    flags.insert(key, value);
  }
}

/// The `GOBUILD_<NAME>_ROOT` flag pointing make at a component's root.
pub fn dependency_flag(alias: &str) -> (String, FlagValue) {
  let normalized = alias.replace('-', "_");
  (
    format!("GOBUILD_{}_ROOT", normalized.to_uppercase()),
    FlagValue::Value(token(&format!("gobuild_component_{}_root", normalized))),
  )
}

/// Serialize a make invocation: `<make> <target> ` followed by ` KEY[=VALUE]`
/// for every flag in key order.
pub fn render(make: &str, target: &str, flags: &FlagSet) -> String {
  let mut cmd = format!("{} {} ", make, target);
  for (key, value) in flags {
    cmd.push(' ');
    cmd.push_str(key);
    if let FlagValue::Value(value) = value {
      cmd.push('=');
      cmd.push_str(value);
    }
  }
  cmd
}

/// Make command construction shared by make-based targets.
///
/// Targets own one of these rather than reimplementing flag handling.
#[derive(Debug, Clone, Default)]
pub struct MakeHelper {
  options: BuildOptions,
  version: Option<String>,
}

impl MakeHelper {
  pub fn new(options: BuildOptions) -> Self {
    Self { options, version: None }
  }

  pub fn with_version(mut self, version: &str) -> Self {
    self.version = Some(version.to_string());
    self
  }

  pub fn options(&self) -> &BuildOptions {
    &self.options
  }

  pub fn version(&self) -> &str {
    self.version.as_deref().unwrap_or(DEFAULT_MAKE_VERSION)
  }

  /// Release make command running `make_target` for `target`.
  ///
  /// One `GOBUILD_<NAME>_ROOT` flag is emitted per alias `target` reports
  /// from [`Target::component_dependency_aliases`].
  pub fn command<T>(
    &self,
    target: &T,
    host: &HostType,
    make_target: &str,
    overrides: &FlagSet,
  ) -> Result<String, TargetError>
  where
    T: Target + ?Sized,
  {
    let aliases = target.component_dependency_aliases();
    self.command_for(MakeVariant::Release, host, make_target, &aliases, overrides)
  }

  /// Dev make command for `make_target`. Dev builds request components on
  /// demand, so no dependency roots are passed.
  pub fn dev_command(&self, host: &HostType, make_target: &str, overrides: &FlagSet) -> Result<String, TargetError> {
    self.command_for(MakeVariant::Dev, host, make_target, &[], overrides)
  }

  pub fn command_for(
    &self,
    variant: MakeVariant,
    host: &HostType,
    make_target: &str,
    dependencies: &[String],
    overrides: &FlagSet,
  ) -> Result<String, TargetError> {
    build(&MakeRequest {
      variant,
      host,
      target: make_target,
      version: self.version(),
      overrides,
      options: &self.options,
      dependencies,
    })
  }
}

/// Storage rule archiving the source tree. Only linux agents should emit it.
pub fn store_source_rule(tree: &str) -> Vec<StorageRule> {
  vec![StorageRule {
    kind: ArtifactKind::Source,
    src: format!("{}/", tree),
  }]
}

/// Storage rule archiving a make tree's build directory.
pub fn store_build_rule(_host: &HostType, tree: &str) -> Vec<StorageRule> {
  vec![StorageRule {
    kind: ArtifactKind::Build,
    src: format!("{}/build", tree),
  }]
}
