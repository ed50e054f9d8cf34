//! Engine record definitions.
//!
//! Outbound: [`ContainerSpec`] and its volume/environment children, built
//! once per create call and handed to the client.
//!
//! Inbound: [`ContainerSummary`], [`ContainerRecord`] and [`PodRecord`],
//! read-only views of the engine's state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Container Spec (outbound)
// =============================================================================

/// Engine-native container specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    /// Composite name, see [`crate::naming`].
    pub name: String,
    pub image: String,
    pub workdir: String,
    pub tty: bool,
    /// Arguments (the orchestration layer's `args`).
    pub command: Vec<String>,
    /// Entrypoint (the orchestration layer's `command`).
    pub entrypoint: Vec<String>,
    /// Flat label map: labels, prefixed annotations and bookkeeping keys.
    pub labels: HashMap<String, String>,
    pub log_path: String,
    /// Read-only root filesystem.
    pub read_only: bool,
    pub volumes: Vec<VolumeReference>,
    pub envs: Vec<EnvironmentVar>,
}

/// A volume attached to a container at a mount path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeReference {
    /// Generated volume name; always equals `detail.name`.
    pub volume: String,
    /// Mount path inside the container.
    pub path: String,
    pub read_only: bool,
    pub detail: VolumeDetail,
}

/// How the engine should provide a volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeDetail {
    pub name: String,
    /// Host path, device path or `rbd:` locator.
    pub source: String,
    /// Driver format tag (`vfs`, `raw`, `rbd`).
    pub format: String,
    pub fstype: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<VolumeOption>,
}

/// Credentials for networked block storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeOption {
    pub user: String,
    pub keyring: String,
    pub monitors: Vec<String>,
}

/// Environment variable in engine form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVar {
    pub env: String,
    pub value: String,
}

// =============================================================================
// Container Records (inbound)
// =============================================================================

/// One entry of the engine's container list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSummary {
    #[serde(rename = "containerID")]
    pub container_id: String,
    /// Engine name, usually `/`-prefixed.
    pub container_name: String,
    #[serde(rename = "podID")]
    pub pod_id: String,
    /// Engine phase.
    pub status: String,
}

/// Full engine view of one container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRecord {
    pub container: ContainerDetail,
    /// Creation time in seconds since the epoch.
    pub created_at: i64,
    #[serde(rename = "podID")]
    pub pod_id: String,
    pub status: ContainerPhaseStatus,
}

/// Static configuration of a container as stored by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDetail {
    pub name: String,
    #[serde(rename = "containerID")]
    pub container_id: String,
    pub image: String,
    #[serde(rename = "imageID")]
    pub image_id: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub volume_mounts: Vec<VolumeMount>,
}

/// A named volume mounted into a container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
    pub read_only: bool,
}

/// Phase and the phase-specific sub-record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPhaseStatus {
    pub phase: String,
    #[serde(default)]
    pub waiting: Option<WaitingStatus>,
    #[serde(default)]
    pub running: Option<RunningStatus>,
    #[serde(default)]
    pub terminated: Option<TerminatedStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaitingStatus {
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningStatus {
    pub started_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminatedStatus {
    pub exit_code: i32,
    pub reason: String,
    #[serde(default)]
    pub message: String,
    pub started_at: String,
    pub finished_at: String,
}

// =============================================================================
// Pod Records (inbound)
// =============================================================================

/// Engine view of a pod; only its volume table is consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodRecord {
    #[serde(rename = "podID")]
    pub pod_id: String,
    pub spec: PodRecordSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodRecordSpec {
    #[serde(default)]
    pub volumes: Vec<PodVolume>,
}

/// A volume known to the pod, resolved to its source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodVolume {
    pub name: String,
    pub source: String,
    #[serde(default)]
    pub driver: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_record_from_engine_json() {
        let json = r#"{
            "container": {
                "name": "/k8s_app_web_default_uid1_0",
                "containerID": "c1",
                "image": "nginx:1.25",
                "imageID": "sha256:abc",
                "labels": {"tier": "front"}
            },
            "createdAt": 1700000000,
            "podID": "pod-1",
            "status": {
                "phase": "running",
                "running": {"startedAt": "2023-11-14T22:13:20Z"}
            }
        }"#;

        let record: ContainerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.container.container_id, "c1");
        assert_eq!(record.container.image_id, "sha256:abc");
        assert!(record.container.volume_mounts.is_empty());
        assert_eq!(record.pod_id, "pod-1");
        assert_eq!(
            record.status.running.unwrap().started_at,
            "2023-11-14T22:13:20Z"
        );
        assert!(record.status.terminated.is_none());
    }

    #[test]
    fn test_volume_detail_omits_empty_option() {
        let detail = VolumeDetail {
            name: "data_0000abcd".to_string(),
            source: "/var/lib/data".to_string(),
            format: "vfs".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(!json.contains("option"));
    }
}
