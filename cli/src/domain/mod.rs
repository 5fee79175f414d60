//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod deploy;
pub mod error;
pub mod ledger;
pub mod project;
pub mod runtime;

pub use config::{RiotConfig, VALID_CONFIG_KEYS, validate_config_key, validate_config_value};
pub use deploy::{DeployReport, DeployStep};
pub use error::{ConfigError, DeployError, LedgerError, ProjectError};
pub use ledger::{DeploymentEntry, Ledger};
pub use project::{Application, Environment, Node, Project, RunConfig};
pub use runtime::{MountSpec, PullEvent, RuntimeConfig, runtime_config};
