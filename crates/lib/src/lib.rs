//! gobuild-lib: target registry and make command generation for gobuild.
//!
//! The orchestrator asks the [`registry`] for a [`target::Target`] by name and
//! then queries it for repositories, commands, storage rules and upstream
//! component dependencies. This crate only describes builds:
//! - `placeholder`: the `%(name)` tokens the orchestrator substitutes later
//! - `make`: deterministic make command lines with merged build flags
//! - `target`: the capability contract every buildable product implements
//! - `registry`: the static table of known targets

pub mod consts;
pub mod environment;
pub mod error;
pub mod host;
pub mod make;
pub mod options;
pub mod pins;
pub mod placeholder;
pub mod registry;
pub mod target;
pub mod targets;

pub use error::TargetError;
pub use host::{HostFamily, HostType};
pub use options::BuildOptions;
pub use registry::TargetRegistry;
pub use target::Target;
