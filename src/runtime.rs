//! CRI container lifecycle on top of the engine client.
//!
//! [`HyperRuntime`] implements the container half of the CRI runtime
//! service:
//! - `create_container`: build the engine spec, then create
//! - `start_container` / `stop_container` / `remove_container`: pass through
//! - `list_containers`: list, decode names, filter, enrich
//! - `container_status`: container record + pod record → status
//!
//! # Unsupported Operations
//!
//! | Operation | Behavior |
//! |-----------|----------|
//! | `update_container_resources` | succeeds, does nothing |
//! | `container_stats` / `list_container_stats` | `NotImplemented` |
//! | `reopen_container_log` | `NotImplemented` |
//!
//! # Error Propagation
//!
//! Engine failures are logged with the call and ID, wrapped in
//! [`Error::Engine`] and returned. Nothing is retried. Listing silently
//! skips containers whose names were not produced by this adapter; status
//! lookup does not.

use crate::cri::{
    Container, ContainerConfig, ContainerFilter, ContainerStats, ContainerStatsFilter,
    ContainerStatus, LinuxContainerResources, SandboxConfig,
};
use crate::engine::EngineClient;
use crate::error::{Error, Result};
use crate::labels::ContainerLabels;
use crate::naming::ContainerName;
use crate::spec::build_container_spec;
use crate::status::{
    build_container, build_container_status, matches_labels, matches_summary, to_container_state,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{debug, error, info};

/// Container lifecycle for a hypervisor-backed engine.
///
/// Holds nothing but the client; every call works only on its arguments
/// and can run concurrently with any other.
#[derive(Debug, Clone)]
pub struct HyperRuntime<C> {
    client: C,
}

impl<C: EngineClient> HyperRuntime<C> {
    /// Creates a runtime that talks to the engine through `client`.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Returns the engine client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Creates a container in the given sandbox and returns its ID.
    ///
    /// # Errors
    ///
    /// - Spec building errors (privileged, volumes, name encoding)
    /// - `Engine` if the engine rejects the create
    pub async fn create_container(
        &self,
        pod_sandbox_id: &str,
        config: &ContainerConfig,
        sandbox: &SandboxConfig,
    ) -> Result<String> {
        let spec = {
            let mut rng = StdRng::from_os_rng();
            build_container_spec(config, sandbox, &mut rng).inspect_err(|e| {
                error!(
                    "Build container spec for {} in pod {} failed: {}",
                    config.metadata.name, pod_sandbox_id, e
                );
            })?
        };

        debug!(
            "Creating container {} with {} volumes in pod {}",
            spec.name,
            spec.volumes.len(),
            pod_sandbox_id
        );

        let id = self
            .client
            .create_container(pod_sandbox_id, spec)
            .await
            .map_err(|e| {
                error!(
                    "Create container {} in pod {} failed: {}",
                    config.metadata.name, pod_sandbox_id, e
                );
                Error::engine("create", pod_sandbox_id, e)
            })?;

        info!(
            "Created container {} ({}) in pod {}",
            config.metadata.name, id, pod_sandbox_id
        );
        Ok(id)
    }

    /// Starts a created container.
    pub async fn start_container(&self, id: &str) -> Result<()> {
        self.client.start_container(id).await.map_err(|e| {
            error!("Start container {} failed: {}", id, e);
            Error::engine("start", id, e)
        })
    }

    /// Stops a running container, killing it after `grace_period`.
    pub async fn stop_container(&self, id: &str, grace_period: Duration) -> Result<()> {
        self.client
            .stop_container(id, grace_period)
            .await
            .map_err(|e| {
                error!("Stop container {} failed: {}", id, e);
                Error::engine("stop", id, e)
            })
    }

    /// Removes a container; a running container is force-removed.
    pub async fn remove_container(&self, id: &str) -> Result<()> {
        self.client.remove_container(id).await.map_err(|e| {
            error!("Remove container {} failed: {}", id, e);
            Error::engine("remove", id, e)
        })
    }

    /// Lists the containers created by this adapter that match `filter`.
    ///
    /// Id, sandbox and state are checked against the list entry. Matching
    /// entries are then fetched in full for their labels, image and creation
    /// time, and checked against the label selector.
    ///
    /// # Errors
    ///
    /// `Engine` if listing or any per-container lookup fails.
    pub async fn list_containers(&self, filter: Option<&ContainerFilter>) -> Result<Vec<Container>> {
        let summaries = self.client.list_containers().await.map_err(|e| {
            error!("Get container list failed: {}", e);
            Error::engine("list", "", e)
        })?;

        let mut containers = Vec::with_capacity(summaries.len());
        for summary in &summaries {
            let state = to_container_state(&summary.status);

            let name = match ContainerName::decode(&summary.container_name) {
                Ok(name) => name,
                Err(e) => {
                    debug!(
                        "Skipping container {}: {} (not managed by hyperlet)",
                        summary.container_name, e
                    );
                    continue;
                }
            };

            if !matches_summary(filter, summary, state) {
                continue;
            }

            let record = self
                .client
                .container_info(&summary.container_id)
                .await
                .map_err(|e| {
                    error!(
                        "Get container info for {} failed: {}",
                        summary.container_id, e
                    );
                    Error::engine("info", summary.container_id.as_str(), e)
                })?;

            let labels = ContainerLabels::from_engine_labels(&record.container.labels);
            if !matches_labels(filter, &labels) {
                continue;
            }

            containers.push(build_container(summary, &record, name, state, labels));
        }

        Ok(containers)
    }

    /// Returns the status of one container.
    ///
    /// # Errors
    ///
    /// - `Engine` if the container or its pod cannot be fetched
    /// - `InvalidContainerName` if the container was not created by this adapter
    /// - `InvalidTimestamp` if the engine reports a malformed timestamp
    pub async fn container_status(&self, id: &str) -> Result<ContainerStatus> {
        let record = self.client.container_info(id).await.map_err(|e| {
            error!("Get container info for {} failed: {}", id, e);
            Error::engine("info", id, e)
        })?;

        let pod = self.client.pod_info(&record.pod_id).await.map_err(|e| {
            error!("Get pod info for {} failed: {}", record.pod_id, e);
            Error::engine("pod info", record.pod_id.as_str(), e)
        })?;

        build_container_status(&record, &pod).inspect_err(|e| {
            error!("Build status for container {} failed: {}", id, e);
        })
    }

    /// Accepts and ignores resource updates.
    ///
    /// The kubelet calls this from its CPU manager for every container, so
    /// failing here would break every pod on the node.
    pub async fn update_container_resources(
        &self,
        id: &str,
        resources: &LinuxContainerResources,
    ) -> Result<()> {
        debug!(
            "Ignoring resource update for container {}: {:?}",
            id, resources
        );
        Ok(())
    }

    /// Not implemented.
    pub async fn container_stats(&self, _id: &str) -> Result<ContainerStats> {
        Err(Error::NotImplemented("ContainerStats".to_string()))
    }

    /// Not implemented.
    pub async fn list_container_stats(
        &self,
        _filter: Option<&ContainerStatsFilter>,
    ) -> Result<Vec<ContainerStats>> {
        Err(Error::NotImplemented("ContainerStats".to_string()))
    }

    /// Not implemented.
    pub async fn reopen_container_log(&self, id: &str) -> Result<()> {
        debug!("ReopenContainerLog with request {}", id);
        Err(Error::NotImplemented("ReopenContainerLog".to_string()))
    }
}
