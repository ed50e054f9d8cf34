//! Orchestration-facing container types.
//!
//! These mirror the CRI runtime service messages that the kubelet sends and
//! expects back. Only the fields the hyper translation reads or fills are
//! modeled:
//! - `ContainerConfig` / `SandboxConfig`: inputs to container creation
//! - `Container`: one entry of a container listing
//! - `ContainerStatus`: detailed status of one container
//! - `ContainerFilter`: listing predicate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Metadata
// =============================================================================

/// Identity of a container within its sandbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerMetadata {
    /// Container name as declared in the pod.
    pub name: String,
    /// Restart attempt, starting at 0.
    pub attempt: u32,
}

/// Identity of a pod sandbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxMetadata {
    /// Pod name.
    pub name: String,
    /// Pod namespace.
    pub namespace: String,
    /// Pod UID.
    pub uid: String,
    /// Sandbox attempt.
    pub attempt: u32,
}

// =============================================================================
// Create Inputs
// =============================================================================

/// Environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Host path mounted into a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mount {
    /// Path inside the container.
    pub container_path: String,
    /// Absolute path on the host.
    pub host_path: String,
    /// Mount read-only.
    pub readonly: bool,
}

/// Linux security options of a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityContext {
    /// Run with full host privileges. Always rejected.
    pub privileged: bool,
    /// Mount the root filesystem read-only.
    pub readonly_rootfs: bool,
}

/// Container creation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerConfig {
    pub metadata: ContainerMetadata,
    /// Image reference.
    pub image: String,
    /// Entrypoint override.
    pub command: Vec<String>,
    /// Arguments to the entrypoint.
    pub args: Vec<String>,
    pub working_dir: String,
    /// Environment, in declaration order.
    pub envs: Vec<KeyValue>,
    pub mounts: Vec<Mount>,
    pub labels: HashMap<String, String>,
    pub annotations: HashMap<String, String>,
    /// Log file path relative to the sandbox log directory.
    pub log_path: String,
    pub tty: bool,
    /// Absent means unprivileged with a writable root filesystem.
    pub security_context: Option<SecurityContext>,
}

/// Sandbox the container is created in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxConfig {
    pub metadata: SandboxMetadata,
    /// Directory under which container log files are stored.
    pub log_directory: String,
}

// =============================================================================
// Container State
// =============================================================================

/// Orchestration-level container state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContainerState {
    /// Created but not started.
    #[serde(rename = "CONTAINER_CREATED")]
    Created,
    /// Running.
    #[serde(rename = "CONTAINER_RUNNING")]
    Running,
    /// Terminated, successfully or not.
    #[serde(rename = "CONTAINER_EXITED")]
    Exited,
    /// The engine reported a phase with no orchestration equivalent.
    #[default]
    #[serde(rename = "CONTAINER_UNKNOWN")]
    Unknown,
}

impl std::fmt::Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "CONTAINER_CREATED"),
            Self::Running => write!(f, "CONTAINER_RUNNING"),
            Self::Exited => write!(f, "CONTAINER_EXITED"),
            Self::Unknown => write!(f, "CONTAINER_UNKNOWN"),
        }
    }
}

// =============================================================================
// Listing and Status
// =============================================================================

/// One entry of a container listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: String,
    pub pod_sandbox_id: String,
    pub metadata: ContainerMetadata,
    pub image: String,
    pub image_ref: String,
    pub state: ContainerState,
    /// Creation time in nanoseconds since the epoch.
    pub created_at: i64,
    pub labels: HashMap<String, String>,
    pub annotations: HashMap<String, String>,
}

/// Detailed status of one container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStatus {
    pub id: String,
    pub metadata: ContainerMetadata,
    pub state: ContainerState,
    /// Creation time in nanoseconds since the epoch.
    pub created_at: i64,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Only meaningful when `state` is `Exited`.
    pub exit_code: i32,
    pub image: String,
    pub image_ref: String,
    /// Short machine-readable reason for the current state.
    pub reason: String,
    pub labels: HashMap<String, String>,
    pub annotations: HashMap<String, String>,
    pub mounts: Vec<Mount>,
    pub log_path: String,
}

/// Listing predicate. Every populated field must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerFilter {
    pub id: Option<String>,
    pub pod_sandbox_id: Option<String>,
    pub state: Option<ContainerState>,
    /// Labels that must be present with equal values.
    pub label_selector: HashMap<String, String>,
}

// =============================================================================
// Unsupported Surface
// =============================================================================

/// Resource constraints of a running container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinuxContainerResources {
    pub cpu_period: i64,
    pub cpu_quota: i64,
    pub cpu_shares: i64,
    pub memory_limit_in_bytes: i64,
    pub oom_score_adj: i64,
    pub cpuset_cpus: String,
    pub cpuset_mems: String,
}

/// Usage statistics of one container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStats {
    pub id: String,
    pub cpu_usage_core_nanos: Option<u64>,
    pub memory_working_set_bytes: Option<u64>,
}

/// Predicate for stats listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStatsFilter {
    pub id: Option<String>,
    pub pod_sandbox_id: Option<String>,
    pub label_selector: HashMap<String, String>,
}
