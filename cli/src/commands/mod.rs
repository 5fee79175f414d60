//! Command implementations

pub mod config;
pub mod deploy;
pub mod interrupt;
pub mod pin;
pub mod status;
pub mod version;
