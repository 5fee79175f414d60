//! Project definition loaded from `riot.yaml`: applications, environments,
//! and the nodes reachable in each environment.
//!
//! Pure data and lookups only — no I/O.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::ProjectError;

/// How an application's container is run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Run the container in privileged mode.
    #[serde(default)]
    pub privileged: bool,
    /// Host source path → container target path.
    #[serde(default)]
    pub volumes: BTreeMap<String, String>,
}

/// A deployable application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub name: String,
    pub run: RunConfig,
}

/// A deployment target exposing a container runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    /// Runtime endpoint, e.g. `unix:///var/run/docker.sock` or `tcp://10.0.0.5:2376`.
    pub host: String,
}

/// The access context needed to reach a node's runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub name: String,
    /// Directory holding `ca.pem`, `cert.pem` and `key.pem` for TLS endpoints.
    pub tls: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ApplicationSpec {
    #[serde(default)]
    run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeSpec {
    host: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct EnvironmentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tls: Option<PathBuf>,
    #[serde(default)]
    nodes: BTreeMap<String, NodeSpec>,
}

/// Top-level schema of `riot.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    applications: BTreeMap<String, ApplicationSpec>,
    #[serde(default)]
    environments: BTreeMap<String, EnvironmentSpec>,
}

impl Project {
    /// Look up an application by name.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::UnknownApplication` if it is not defined.
    pub fn application(&self, name: &str) -> Result<Application, ProjectError> {
        self.applications
            .get(name)
            .map(|spec| Application {
                name: name.to_string(),
                run: spec.run.clone(),
            })
            .ok_or_else(|| ProjectError::UnknownApplication(name.to_string()))
    }

    /// Look up an environment by name.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::UnknownEnvironment` if it is not defined.
    pub fn environment(&self, name: &str) -> Result<Environment, ProjectError> {
        self.environments
            .get(name)
            .map(|spec| Environment {
                name: name.to_string(),
                tls: spec.tls.clone(),
            })
            .ok_or_else(|| ProjectError::UnknownEnvironment(name.to_string()))
    }

    /// Look up a node inside an environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment or node is not defined.
    pub fn node(&self, environment: &str, node: &str) -> Result<Node, ProjectError> {
        let env = self
            .environments
            .get(environment)
            .ok_or_else(|| ProjectError::UnknownEnvironment(environment.to_string()))?;
        env.nodes
            .get(node)
            .map(|spec| Node {
                name: node.to_string(),
                host: spec.host.clone(),
            })
            .ok_or_else(|| ProjectError::UnknownNode {
                node: node.to_string(),
                environment: environment.to_string(),
            })
    }

    /// Pick the environment for a deploy.
    ///
    /// Order: explicit flag, then the configured default, then the only
    /// environment when exactly one is defined.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NoEnvironment` when nothing selects one, or
    /// `UnknownEnvironment` when the selected name is not defined.
    pub fn select_environment(
        &self,
        flag: Option<&str>,
        default: Option<&str>,
    ) -> Result<Environment, ProjectError> {
        if let Some(name) = flag.or(default) {
            return self.environment(name);
        }
        let mut names = self.environments.keys();
        match (names.next(), names.next()) {
            (Some(only), None) => self.environment(only),
            _ => Err(ProjectError::NoEnvironment),
        }
    }

    /// Names of all defined applications, sorted.
    pub fn application_names(&self) -> impl Iterator<Item = &str> {
        self.applications.keys().map(String::as_str)
    }

    /// Make relative TLS directories relative to `base` (the directory that
    /// holds `riot.yaml`).
    pub fn anchor_paths(&mut self, base: &Path) {
        for env in self.environments.values_mut() {
            if let Some(tls) = env.tls.as_mut() {
                if tls.is_relative() {
                    *tls = base.join(&*tls);
                }
            }
        }
    }
}
