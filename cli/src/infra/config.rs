//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::RiotConfig;
use crate::infra::fs::write_atomic;

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
///
/// The location is `$RIOT_CONFIG` when set, else `~/.riot/config.yaml`.
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<RiotConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(RiotConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(RiotConfig::default());
        }
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &RiotConfig) -> Result<()> {
        let path = self.path()?;
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        write_atomic(&path, &content)
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var("RIOT_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".riot").join("config.yaml"))
    }
}
