//! Implementation of the `gobuild show` command.
//!
//! Prints what a target declares for a host type: identity, cluster
//! requirements, checkouts, storage rules and the components it depends on.
//! Commands are only scanned for the build metadata they reference; use
//! `gobuild commands` to see them in full.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result};
use serde::Serialize;

use gobuild_lib::placeholder;
use gobuild_lib::target::{ComponentDependency, ProductNames, Repository, StorageRule};
use gobuild_lib::{BuildOptions, HostType, Target};

use crate::output::{print_heading, print_json, print_stat, print_success, symbols};

use super::lookup;

#[derive(Debug, Serialize)]
struct TargetDescription {
  names: ProductNames,
  hosttype: HostType,
  cluster_requirements: Vec<String>,
  repositories: Vec<Repository>,
  storage: Vec<StorageRule>,
  component_path: String,
  dependencies: BTreeMap<String, ComponentDependency>,
  /// Build metadata the orchestrator must provide for these templates.
  placeholders: BTreeSet<String>,
}

/// Fails when the target has no commands for `host`, since the metadata they
/// need cannot be known.
fn describe(target: &dyn Target, host: HostType) -> Result<TargetDescription> {
  let repositories = target.repositories(&host);
  let component_path = target.component_path();
  let commands = target
    .commands(&host)
    .with_context(|| format!("Failed to generate commands for {}", host))?;

  let mut placeholders = placeholder::names(&component_path).context("Invalid component path")?;
  for repo in &repositories {
    for template in [&repo.src, &repo.dst] {
      placeholders.extend(placeholder::names(template).with_context(|| format!("Invalid repository: {}", template))?);
    }
  }
  for command in &commands {
    for template in [&command.root, &command.command] {
      placeholders
        .extend(placeholder::names(template).with_context(|| format!("Invalid command in {:?}", command.desc))?);
    }
  }

  Ok(TargetDescription {
    names: target.product_names(),
    cluster_requirements: target.cluster_requirements(),
    storage: target.storage_info(&host),
    dependencies: target.component_dependencies(),
    hosttype: host,
    repositories,
    component_path,
    placeholders,
  })
}

pub fn cmd_show(name: &str, host: &str, json: bool) -> Result<()> {
  let target = lookup(name, BuildOptions::default())?;
  let description = describe(target.as_ref(), HostType::from(host))?;

  if json {
    return print_json(&description);
  }

  print_success(&format!("{} ({})", description.names.longname, description.names.name));
  print_stat("Host type", description.hosttype.as_str());
  print_stat("Cluster", &description.cluster_requirements.join(", "));
  print_stat("Component path", &description.component_path);

  print_heading("Repositories:");
  for repo in &description.repositories {
    println!("  {} {:?} {} {} {}", symbols::INFO, repo.rcs, repo.src, symbols::ARROW, repo.dst);
  }

  if !description.storage.is_empty() {
    print_heading("Storage:");
    for rule in &description.storage {
      println!("  {} {:?} {}", symbols::INFO, rule.kind, rule.src);
    }
  }

  if !description.dependencies.is_empty() {
    print_heading("Components:");
    for (alias, dep) in &description.dependencies {
      println!("  {} {} {}@{} ({})", symbols::INFO, alias, dep.branch, dep.change, dep.buildtype);
      for (ours, theirs) in &dep.hosttypes {
        println!("      {} {} {}", ours, symbols::ARROW, theirs);
      }
    }
  }

  print_heading("Placeholders:");
  for name in &description.placeholders {
    println!("  {} {}", symbols::INFO, placeholder::token(name));
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use gobuild_lib::targets::AkoOperator;

  #[test]
  fn describe_collects_placeholders() {
    let description = describe(&AkoOperator::default(), HostType::from("linux64")).unwrap();
    assert_eq!(
      description.placeholders.into_iter().collect::<Vec<_>>(),
      vec![
        "branch",
        "buildid",
        "buildnumber",
        "buildroot",
        "buildtype",
        "changenumber",
        "gobuild_component_cayman_go_root",
        "gobuildc",
        "productbuildnumber",
        "releasetype",
      ]
    );
    assert!(description.dependencies.contains_key("cayman_go"));
  }

  #[test]
  fn describe_covers_every_command_placeholder() {
    let target = AkoOperator::default();
    let host = HostType::from("linux64");
    let description = describe(&target, host.clone()).unwrap();

    for command in target.commands(&host).unwrap() {
      let used = placeholder::names(&command.command).unwrap();
      assert!(used.is_subset(&description.placeholders), "missing from show: {:?}", used);
      assert!(placeholder::names(&command.root).unwrap().is_subset(&description.placeholders));
    }
  }

  #[test]
  fn describe_fails_for_unsupported_host() {
    let err = describe(&AkoOperator::default(), HostType::from("solaris")).err().unwrap();
    assert!(format!("{:#}", err).contains("unsupported hosttype: solaris"));
  }
}
