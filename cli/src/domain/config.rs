//! Domain types and validators for riot user configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["defaults.environment", "docker.timeout_secs"];

/// Default Docker API request timeout in seconds.
pub const DEFAULT_DOCKER_TIMEOUT_SECS: u64 = 120;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.riot/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RiotConfig {
    /// Defaults applied when a command flag is omitted.
    pub defaults: DefaultsConfig,
    /// Docker Engine client settings.
    pub docker: DockerConfig,
}

/// Defaults for command flags.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Environment used by `riot deploy` when `--env` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// Docker Engine client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DockerConfig {
    /// Per-request timeout for Docker API calls, in seconds.
    #[serde(default = "default_docker_timeout")]
    pub timeout_secs: u64,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_docker_timeout(),
        }
    }
}

fn default_docker_timeout() -> u64 {
    DEFAULT_DOCKER_TIMEOUT_SECS
}

impl RiotConfig {
    /// Apply a validated `key = value` assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "defaults.environment" => {
                self.defaults.environment = Some(value.to_string());
            }
            "docker.timeout_secs" => {
                // Validated above.
                self.docker.timeout_secs = value.parse()?;
            }
            _ => unreachable!("key validated against VALID_CONFIG_KEYS"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    match key {
        "defaults.environment" if value.trim().is_empty() => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            hint: "Expected an environment name from riot.yaml.".to_string(),
        }
        .into()),
        "docker.timeout_secs" if !matches!(value.parse::<u64>(), Ok(n) if n > 0) => {
            Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                hint: "Expected a positive number of seconds.".to_string(),
            }
            .into())
        }
        _ => Ok(()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
