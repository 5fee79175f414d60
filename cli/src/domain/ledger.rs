//! The artifact ledger persisted as `riot.lock`.
//!
//! Pure data and in-memory mutation only. Loading and saving belong to the
//! `LedgerStore` port.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::DeployError;

/// Durable record of which artifact each application should run and which
/// instance currently runs it on each node.
///
/// `BTreeMap` keeps the serialized form stable so an unchanged ledger saves
/// to identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Application name → artifact reference (image locator).
    #[serde(default)]
    versions: BTreeMap<String, String>,
    /// Application name → node name → instance identifier.
    #[serde(default)]
    deployments: BTreeMap<String, BTreeMap<String, String>>,
}

/// One `deployments` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentEntry<'a> {
    pub application: &'a str,
    pub node: &'a str,
    pub instance: &'a str,
}

impl Ledger {
    /// Current build artifact for `application`.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::MissingArtifact` when the application has never
    /// been built.
    pub fn resolve_artifact(&self, application: &str) -> Result<&str, DeployError> {
        self.versions
            .get(application)
            .map(String::as_str)
            .ok_or_else(|| DeployError::MissingArtifact {
                application: application.to_string(),
            })
    }

    /// Instance recorded as running `application` on `node`, if any.
    #[must_use]
    pub fn prior_instance(&self, application: &str, node: &str) -> Option<&str> {
        self.deployments
            .get(application)
            .and_then(|nodes| nodes.get(node))
            .map(String::as_str)
    }

    /// Record `instance` as running `application` on `node`, replacing any
    /// previous entry for the pair.
    ///
    /// Returns the replaced identifier.
    pub fn record_instance(
        &mut self,
        application: &str,
        node: &str,
        instance: impl Into<String>,
    ) -> Option<String> {
        self.deployments
            .entry(application.to_string())
            .or_default()
            .insert(node.to_string(), instance.into())
    }

    /// Record `artifact` as the current build of `application`.
    ///
    /// Returns the previous artifact reference.
    pub fn pin_artifact(&mut self, application: &str, artifact: impl Into<String>) -> Option<String> {
        self.versions.insert(application.to_string(), artifact.into())
    }

    /// All pinned artifacts, sorted by application name.
    pub fn versions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.versions.iter().map(|(a, v)| (a.as_str(), v.as_str()))
    }

    /// All recorded deployments, sorted by application then node.
    pub fn deployments(&self) -> impl Iterator<Item = DeploymentEntry<'_>> {
        self.deployments.iter().flat_map(|(application, nodes)| {
            nodes.iter().map(move |(node, instance)| DeploymentEntry {
                application: application.as_str(),
                node: node.as_str(),
                instance: instance.as_str(),
            })
        })
    }

    /// Returns `true` when neither versions nor deployments are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty() && self.deployments.values().all(BTreeMap::is_empty)
    }
}
