//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::RiotConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the stored configuration cannot be read.
pub fn load_config(store: &impl ConfigStore) -> Result<RiotConfig> {
    store.load()
}

/// Validate and apply `key = value`, then persist the result.
///
/// # Errors
///
/// Returns an error if validation fails or the configuration cannot be saved.
pub fn set_config(store: &impl ConfigStore, key: &str, value: &str) -> Result<RiotConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
