//! Engine client trait.
//!
//! The transport to the engine (gRPC, REST, in-process) lives outside this
//! crate. Implementations provide one method per engine call; each call is
//! a single round trip and owns its own timeout and cancellation. Callers in
//! this crate never retry or batch.

use super::types::{ContainerRecord, ContainerSpec, ContainerSummary, PodRecord};
use async_trait::async_trait;
use std::time::Duration;

/// Engine client error.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine has no object with this ID.
    #[error("not found: {0}")]
    NotFound(String),

    /// The engine could not be reached.
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    /// The engine rejected or failed the request.
    #[error("engine rpc error: {0}")]
    Rpc(String),
}

/// Result type for engine client calls.
pub type EngineResult<T> = Result<T, EngineError>;

/// Client for the hypervisor-backed container engine.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; [`crate::HyperRuntime`] shares one
/// client across concurrent requests.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Creates a container in an existing pod and returns its ID.
    async fn create_container(&self, pod_id: &str, spec: ContainerSpec) -> EngineResult<String>;

    /// Starts a created container.
    async fn start_container(&self, id: &str) -> EngineResult<()>;

    /// Stops a container, killing it once `grace_period` has elapsed.
    async fn stop_container(&self, id: &str, grace_period: Duration) -> EngineResult<()>;

    /// Removes a container, force-stopping it if needed.
    async fn remove_container(&self, id: &str) -> EngineResult<()>;

    /// Lists every container the engine knows about.
    async fn list_containers(&self) -> EngineResult<Vec<ContainerSummary>>;

    /// Returns the full record of one container.
    async fn container_info(&self, id: &str) -> EngineResult<ContainerRecord>;

    /// Returns the record of one pod.
    async fn pod_info(&self, pod_id: &str) -> EngineResult<PodRecord>;
}
