//! Docker Engine adapter for the `RuntimeClientProvider` and `RuntimeClient`
//! ports, built on `bollard`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use bollard::container::{
    Config, CreateContainerOptions, StartContainerOptions, StopContainerOptions,
};
use bollard::errors::Error as BollardError;
use bollard::image::CreateImageOptions;
use bollard::models::{HostConfig, Mount, MountTypeEnum};
use bollard::{API_DEFAULT_VERSION, Docker};
use futures_util::StreamExt as _;
use futures_util::stream::BoxStream;

use crate::application::ports::{RuntimeClient, RuntimeClientProvider};
use crate::domain::{Environment, Node, PullEvent, RuntimeConfig};

/// How to reach a node's Docker daemon, derived from its `host` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Endpoint<'a> {
    Socket(&'a str),
    Http(&'a str),
    Tls(&'a str),
}

fn endpoint<'a>(host: &'a str, environment: &Environment) -> Result<Endpoint<'a>> {
    if host.starts_with("unix://") {
        return Ok(Endpoint::Socket(host));
    }
    if ["tcp://", "http://", "https://"]
        .iter()
        .any(|scheme| host.starts_with(scheme))
    {
        return Ok(if environment.tls.is_some() {
            Endpoint::Tls(host)
        } else {
            Endpoint::Http(host)
        });
    }
    bail!("unsupported runtime endpoint '{host}' (expected unix://, tcp://, http:// or https://)")
}

/// Connects to Docker Engine on a node.
pub struct DockerProvider {
    timeout_secs: u64,
}

impl DockerProvider {
    /// `timeout_secs` bounds every Docker API request made by the client.
    #[must_use]
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    fn connect(&self, node: &Node, environment: &Environment) -> Result<Docker> {
        let docker = match endpoint(&node.host, environment)? {
            Endpoint::Socket(path) => {
                Docker::connect_with_socket(path, self.timeout_secs, API_DEFAULT_VERSION)?
            }
            Endpoint::Http(addr) => {
                Docker::connect_with_http(addr, self.timeout_secs, API_DEFAULT_VERSION)?
            }
            Endpoint::Tls(addr) => {
                let dir: &Path = environment
                    .tls
                    .as_deref()
                    .context("TLS directory missing for TLS endpoint")?;
                Docker::connect_with_ssl(
                    addr,
                    &dir.join("key.pem"),
                    &dir.join("cert.pem"),
                    &dir.join("ca.pem"),
                    self.timeout_secs,
                    API_DEFAULT_VERSION,
                )
                .with_context(|| format!("loading TLS material from {}", dir.display()))?
            }
        };
        Ok(docker)
    }
}

impl RuntimeClientProvider for DockerProvider {
    type Client = DockerClient;

    async fn client(&self, node: &Node, environment: &Environment) -> Result<DockerClient> {
        let docker = self.connect(node, environment)?;
        docker
            .ping()
            .await
            .with_context(|| format!("pinging {}", node.host))?;
        Ok(DockerClient { docker })
    }
}

/// A connected Docker Engine client.
pub struct DockerClient {
    docker: Docker,
}

impl RuntimeClient for DockerClient {
    fn pull(&self, artifact: &str) -> BoxStream<'_, Result<PullEvent>> {
        let options = CreateImageOptions {
            from_image: artifact.to_string(),
            ..Default::default()
        };
        self.docker
            .create_image(Some(options), None, None)
            .map(|item| {
                let info = item?;
                Ok(PullEvent {
                    id: info.id,
                    status: info.status,
                    progress: info.progress,
                })
            })
            .boxed()
    }

    async fn stop(&self, instance: &str, timeout: Option<Duration>) -> Result<()> {
        let options = timeout.map(|t| StopContainerOptions {
            t: i64::try_from(t.as_secs()).unwrap_or(i64::MAX),
        });
        match self.docker.stop_container(instance, options).await {
            // 304: already stopped.
            Ok(()) | Err(BollardError::DockerResponseServerError { status_code: 304, .. }) => {
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create(&self, artifact: &str, config: &RuntimeConfig) -> Result<String> {
        let mounts = config.mounts.as_ref().map(|mounts| {
            mounts
                .iter()
                .map(|m| Mount {
                    source: Some(m.source.clone()),
                    target: Some(m.target.clone()),
                    typ: Some(MountTypeEnum::BIND),
                    ..Default::default()
                })
                .collect()
        });
        let body = Config {
            image: Some(artifact.to_string()),
            host_config: Some(HostConfig {
                privileged: Some(config.privileged),
                mounts,
                ..Default::default()
            }),
            ..Default::default()
        };
        let created = self
            .docker
            .create_container(None::<CreateContainerOptions<String>>, body)
            .await?;
        for warning in &created.warnings {
            tracing::warn!(container = %created.id, "{warning}");
        }
        Ok(created.id)
    }

    async fn start(&self, instance: &str) -> Result<()> {
        self.docker
            .start_container(instance, None::<StartContainerOptions<String>>)
            .await?;
        Ok(())
    }
}
