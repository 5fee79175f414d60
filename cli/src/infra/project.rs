//! Infrastructure implementation of the `ProjectSource` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ProjectSource;
use crate::domain::Project;

/// Default project file name.
pub const PROJECT_FILE: &str = "riot.yaml";

/// `riot.yaml` on disk.
pub struct YamlProjectSource {
    path: PathBuf,
}

impl YamlProjectSource {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProjectSource for YamlProjectSource {
    async fn load(&self) -> Result<Project> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("cannot read project file {}", self.path.display()))?;
        let mut project: Project = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse project file {}", self.path.display()))?;
        let base = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        project.anchor_paths(base);
        Ok(project)
    }
}
