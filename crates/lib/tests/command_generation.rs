//! End-to-end checks of command generation through the public API.
//!
//! These mirror how the orchestrator drives a build: look the target up by
//! name, then ask it for repositories, commands and dependencies.

use gobuild_lib::make::{self, FlagSet, FlagValue, MakeRequest, MakeVariant};
use gobuild_lib::{BuildOptions, HostType, TargetError, TargetRegistry};
use serial_test::serial;

fn make_release(
  host: &str,
  options: &BuildOptions,
  deps: &[String],
  overrides: &FlagSet,
) -> Result<String, TargetError> {
  let host = HostType::from(host);
  make::build(&MakeRequest {
    variant: MakeVariant::Release,
    host: &host,
    target: "gobuild",
    version: "3.81",
    overrides,
    options,
    dependencies: deps,
  })
}

#[test]
#[serial]
fn orchestrator_flow_for_ako_operator() {
  let registry = TargetRegistry::with_defaults();
  assert!(registry.names().contains(&"ako-operator"));

  let target = registry.lookup("ako-operator").expect("registered");
  let host = HostType::from("linux-centos72-gc32");

  assert_eq!(target.cluster_requirements(), vec!["linux-centos72-gc32".to_string()]);
  assert_eq!(target.repositories(&host).len(), 1);

  let commands = target.commands(&host).unwrap();
  let make_targets: Vec<&str> = commands
    .iter()
    .map(|c| c.command.split_whitespace().nth(1).unwrap())
    .collect();
  assert_eq!(make_targets, vec!["gobuild-fetch-unshallow", "gobuild"]);

  assert!(commands.iter().all(|c| c.env.contains_key("PATH")));
  assert!(target.storage_info(&host).is_empty());
  assert_eq!(target.component_path(), "%(buildroot)/publish");
  assert!(target.component_dependencies().contains_key("cayman_go"));
}

#[test]
fn unknown_target_is_absent() {
  assert!(TargetRegistry::with_defaults().lookup("nonexistent").is_none());
}

#[test]
#[serial]
fn same_inputs_same_command() {
  let options = BuildOptions {
    verbose: true,
    numcpus: Some(8),
    officialkey: Some(true),
    virusscanner: Some("C:/av/scan.exe".to_string()),
    buildroot: None,
  };
  let deps = vec!["cayman_go".to_string(), "my-dep".to_string()];
  let mut overrides = FlagSet::new();
  overrides.insert("PRODUCT".to_string(), FlagValue::from("ako"));

  temp_env::with_var("TCROOT", Some("E:/tc"), || {
    let first = make_release("windows64", &options, &deps, &overrides).unwrap();
    for _ in 0..10 {
      assert_eq!(make_release("windows64", &options, &deps, &overrides).unwrap(), first);
    }
    assert!(first.starts_with("E:/tc/win32/make-3.81/make.exe gobuild  "));
  });
}

#[test]
fn override_insertion_order_does_not_matter() {
  let mut forward = FlagSet::new();
  forward.insert("ALPHA".to_string(), FlagValue::from("1"));
  forward.insert("OMEGA".to_string(), FlagValue::Bare);

  let mut backward = FlagSet::new();
  backward.insert("OMEGA".to_string(), FlagValue::Bare);
  backward.insert("ALPHA".to_string(), FlagValue::from("1"));

  let options = BuildOptions::default();
  assert_eq!(
    make_release("mac64", &options, &[], &forward).unwrap(),
    make_release("mac64", &options, &[], &backward).unwrap()
  );
}

#[test]
fn solaris_is_a_configuration_error() {
  let err = make_release("solaris", &BuildOptions::default(), &[], &FlagSet::new()).unwrap_err();
  assert!(matches!(err, TargetError::UnsupportedHostType(ref host) if host == "solaris"));
  assert!(!err.is_artifact_unavailable());
}

#[test]
fn officialkey_absent_versus_false() {
  let absent = make_release("linux64", &BuildOptions::default(), &[], &FlagSet::new()).unwrap();
  assert!(!absent.contains("OFFICIALKEY"));

  let disabled = BuildOptions {
    officialkey: Some(false),
    ..Default::default()
  };
  let cmd = make_release("linux64", &disabled, &[], &FlagSet::new()).unwrap();
  assert!(cmd.contains(" OFFICIALKEY= "));
}
