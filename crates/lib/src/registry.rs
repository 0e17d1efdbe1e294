//! Registry of buildable targets.

use tracing::debug;

use crate::options::BuildOptions;
use crate::target::Target;
use crate::targets;

/// Creates a fresh target configured with the build's options.
pub type TargetFactory = fn(BuildOptions) -> Box<dyn Target>;

/// Targets buildable from this branch.
const TARGETS: &[(&str, TargetFactory)] = &[(targets::ako_operator::NAME, ako_operator)];

fn ako_operator(options: BuildOptions) -> Box<dyn Target> {
  Box::new(targets::AkoOperator::new(options))
}

/// Lookup table from target name to factory.
///
/// Every lookup builds a new instance so nothing leaks between builds.
#[derive(Clone, Copy)]
pub struct TargetRegistry {
  targets: &'static [(&'static str, TargetFactory)],
}

impl TargetRegistry {
  pub fn new(targets: &'static [(&'static str, TargetFactory)]) -> Self {
    Self { targets }
  }

  pub fn with_defaults() -> Self {
    Self::new(TARGETS)
  }

  /// Target `name` with default options, `None` if unknown.
  pub fn lookup(&self, name: &str) -> Option<Box<dyn Target>> {
    self.lookup_with(name, BuildOptions::default())
  }

  /// Target `name` configured with `options`, `None` if unknown.
  pub fn lookup_with(&self, name: &str, options: BuildOptions) -> Option<Box<dyn Target>> {
    match self.targets.iter().find(|(registered, _)| *registered == name) {
      Some((_, factory)) => Some(factory(options)),
      None => {
        debug!(target_name = %name, "unknown target");
        None
      }
    }
  }

  pub fn contains(&self, name: &str) -> bool {
    self.targets.iter().any(|(registered, _)| *registered == name)
  }

  /// All registered target names.
  pub fn names(&self) -> Vec<&'static str> {
    self.targets.iter().map(|(name, _)| *name).collect()
  }
}

impl Default for TargetRegistry {
  fn default() -> Self {
    Self::with_defaults()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::host::HostType;
  use serial_test::serial;

  #[test]
  fn lookup_known_target() {
    let registry = TargetRegistry::with_defaults();
    let target = registry.lookup("ako-operator").unwrap();
    let names = target.product_names();
    assert_eq!(names.name, "ako-operator");
    assert!(!names.longname.is_empty());
  }

  #[test]
  fn lookup_unknown_target() {
    let registry = TargetRegistry::with_defaults();
    assert!(registry.lookup("nonexistent").is_none());
    assert!(!registry.contains("nonexistent"));
  }

  #[test]
  fn lookup_is_case_sensitive() {
    assert!(TargetRegistry::with_defaults().lookup("AKO-Operator").is_none());
  }

  #[test]
  fn names_lists_registered_targets() {
    assert_eq!(TargetRegistry::with_defaults().names(), vec!["ako-operator"]);
  }

  #[test]
  #[serial]
  fn lookup_with_passes_options() {
    let options = BuildOptions {
      numcpus: Some(12),
      ..Default::default()
    };
    let target = TargetRegistry::with_defaults().lookup_with("ako-operator", options).unwrap();
    let commands = target.commands(&HostType::from("linux64")).unwrap();
    assert!(commands[1].command.contains(" NUM_CPU=12"));

    // A later lookup does not see the earlier options
    let fresh = TargetRegistry::with_defaults().lookup("ako-operator").unwrap();
    let commands = fresh.commands(&HostType::from("linux64")).unwrap();
    assert!(!commands[1].command.contains("NUM_CPU"));
  }

  #[test]
  fn custom_table() {
    const EMPTY: &[(&str, TargetFactory)] = &[];
    let registry = TargetRegistry::new(EMPTY);
    assert!(registry.names().is_empty());
    assert!(registry.lookup("ako-operator").is_none());
  }
}
