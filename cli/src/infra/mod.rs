//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: the Docker Engine client,
//! and the file-backed ledger, project, and config stores.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod docker;
pub mod fs;
pub mod ledger_store;
pub mod project;
