//! Engine state → orchestration state.
//!
//! # Phase Mapping
//!
//! ```text
//!   engine phase          orchestration state    timestamps / details
//!   ─────────────         ───────────────────    ─────────────────────────────
//!   running        ──▶    Running                started_at  ◀ running
//!   failed         ──┐
//!   succeeded      ──┴▶   Exited                 started_at, finished_at,
//!                                                reason, exit_code ◀ terminated
//!   pending        ──▶    Created                reason ◀ waiting
//!   anything else  ──▶    Unknown                reason ◀ waiting
//! ```
//!
//! A timestamp that does not parse fails the whole translation: it means the
//! engine and this adapter disagree on the record format.

use crate::constants::{
    PHASE_FAILED, PHASE_PENDING, PHASE_RUNNING, PHASE_SUCCEEDED, SECOND_TO_NANO, TIMESTAMP_LAYOUT,
};
use crate::cri::{
    Container, ContainerFilter, ContainerMetadata, ContainerState, ContainerStatus, Mount,
};
use crate::engine::{ContainerPhaseStatus, ContainerRecord, ContainerSummary, PodRecord};
use crate::error::{Error, Result};
use crate::labels::ContainerLabels;
use crate::naming::ContainerName;
use chrono::{DateTime, NaiveDateTime, Utc};

// =============================================================================
// Phase Translation
// =============================================================================

/// Maps an engine phase to the orchestration state.
pub fn to_container_state(phase: &str) -> ContainerState {
    match phase {
        PHASE_RUNNING => ContainerState::Running,
        PHASE_PENDING => ContainerState::Created,
        PHASE_FAILED | PHASE_SUCCEEDED => ContainerState::Exited,
        _ => ContainerState::Unknown,
    }
}

/// Parses an engine timestamp. Empty means unset.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<Option<DateTime<Utc>>> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(value, TIMESTAMP_LAYOUT)
        .map(|t| Some(t.and_utc()))
        .map_err(|e| Error::InvalidTimestamp {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Phase-dependent part of a container status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseDetails {
    pub state: ContainerState,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub exit_code: i32,
    pub reason: String,
}

/// Extracts state, timestamps, exit code and reason from an engine status.
pub fn translate_phase(status: &ContainerPhaseStatus) -> Result<PhaseDetails> {
    let mut details = PhaseDetails {
        state: to_container_state(&status.phase),
        ..Default::default()
    };

    match status.phase.as_str() {
        PHASE_RUNNING => {
            if let Some(running) = &status.running {
                details.started_at = parse_timestamp("startedAt", &running.started_at)?;
            }
        }
        PHASE_FAILED | PHASE_SUCCEEDED => {
            if let Some(terminated) = &status.terminated {
                details.started_at = parse_timestamp("startedAt", &terminated.started_at)?;
                details.finished_at = parse_timestamp("finishedAt", &terminated.finished_at)?;
                details.reason = terminated.reason.clone();
                details.exit_code = terminated.exit_code;
            }
        }
        _ => {
            if let Some(waiting) = &status.waiting {
                details.reason = waiting.reason.clone();
            }
        }
    }

    Ok(details)
}

// =============================================================================
// Status
// =============================================================================

/// Builds the orchestration status of one container.
///
/// # Errors
///
/// - `InvalidContainerName` if the record was not created by this adapter
/// - `InvalidTimestamp` if a phase timestamp does not parse
pub fn build_container_status(record: &ContainerRecord, pod: &PodRecord) -> Result<ContainerStatus> {
    let labels = ContainerLabels::from_engine_labels(&record.container.labels);
    let name = ContainerName::decode(&record.container.name)?;
    let phase = translate_phase(&record.status)?;

    Ok(ContainerStatus {
        id: record.container.container_id.clone(),
        metadata: ContainerMetadata {
            name: name.container_name,
            attempt: name.attempt,
        },
        state: phase.state,
        created_at: record.created_at.saturating_mul(SECOND_TO_NANO),
        started_at: phase.started_at,
        finished_at: phase.finished_at,
        exit_code: phase.exit_code,
        image: record.container.image.clone(),
        image_ref: record.container.image_id.clone(),
        reason: phase.reason,
        labels: labels.labels,
        annotations: labels.annotations,
        mounts: rebuild_mounts(record, pod),
        log_path: labels.log_path.unwrap_or_default(),
    })
}

/// Recovers container mounts, resolving host paths from the pod's volumes.
///
/// A mount whose volume is not in the pod keeps an empty host path.
pub fn rebuild_mounts(record: &ContainerRecord, pod: &PodRecord) -> Vec<Mount> {
    record
        .container
        .volume_mounts
        .iter()
        .map(|mount| Mount {
            container_path: mount.mount_path.clone(),
            host_path: pod
                .spec
                .volumes
                .iter()
                .rev()
                .find(|v| v.name == mount.name)
                .map(|v| v.source.clone())
                .unwrap_or_default(),
            readonly: mount.read_only,
        })
        .collect()
}

// =============================================================================
// Listing
// =============================================================================

/// Checks the id, sandbox and state parts of a filter.
///
/// These only need the list entry, so they run before the engine is asked
/// for the full record.
pub fn matches_summary(
    filter: Option<&ContainerFilter>,
    summary: &ContainerSummary,
    state: ContainerState,
) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    if filter.id.as_ref().is_some_and(|id| *id != summary.container_id) {
        return false;
    }
    if filter
        .pod_sandbox_id
        .as_ref()
        .is_some_and(|pod_id| *pod_id != summary.pod_id)
    {
        return false;
    }
    if filter.state.is_some_and(|wanted| wanted != state) {
        return false;
    }
    true
}

/// Checks the label selector of a filter.
pub fn matches_labels(filter: Option<&ContainerFilter>, labels: &ContainerLabels) -> bool {
    filter.is_none_or(|filter| labels.matches(&filter.label_selector))
}

/// Builds one listing entry.
pub fn build_container(
    summary: &ContainerSummary,
    record: &ContainerRecord,
    name: ContainerName,
    state: ContainerState,
    labels: ContainerLabels,
) -> Container {
    Container {
        id: summary.container_id.clone(),
        pod_sandbox_id: summary.pod_id.clone(),
        metadata: ContainerMetadata {
            name: name.container_name,
            attempt: name.attempt,
        },
        image: record.container.image.clone(),
        image_ref: record.container.image_id.clone(),
        state,
        created_at: record.created_at.saturating_mul(SECOND_TO_NANO),
        labels: labels.labels,
        annotations: labels.annotations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{RunningStatus, TerminatedStatus, WaitingStatus};
    use chrono::TimeZone;

    #[test]
    fn test_phase_mapping() {
        assert_eq!(to_container_state("running"), ContainerState::Running);
        assert_eq!(to_container_state("pending"), ContainerState::Created);
        assert_eq!(to_container_state("failed"), ContainerState::Exited);
        assert_eq!(to_container_state("succeeded"), ContainerState::Exited);
        assert_eq!(to_container_state(""), ContainerState::Unknown);
        assert_eq!(to_container_state("waiting"), ContainerState::Unknown);
    }

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_timestamp("startedAt", "2023-11-14T22:13:20Z").unwrap();
        assert_eq!(
            parsed,
            Some(Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap())
        );
        assert_eq!(parse_timestamp("startedAt", "").unwrap(), None);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("finishedAt", "yesterday").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTimestamp {
                field: "finishedAt",
                ..
            }
        ));
    }

    #[test]
    fn test_running_phase() {
        let status = ContainerPhaseStatus {
            phase: "running".to_string(),
            running: Some(RunningStatus {
                started_at: "2024-01-02T03:04:05Z".to_string(),
            }),
            ..Default::default()
        };
        let details = translate_phase(&status).unwrap();
        assert_eq!(details.state, ContainerState::Running);
        assert!(details.started_at.is_some());
        assert!(details.finished_at.is_none());
        assert_eq!(details.exit_code, 0);
        assert!(details.reason.is_empty());
    }

    #[test]
    fn test_failed_phase() {
        let status = ContainerPhaseStatus {
            phase: "failed".to_string(),
            terminated: Some(TerminatedStatus {
                exit_code: 137,
                reason: "OOMKilled".to_string(),
                message: String::new(),
                started_at: "2024-01-02T03:04:05Z".to_string(),
                finished_at: "2024-01-02T03:05:00Z".to_string(),
            }),
            ..Default::default()
        };
        let details = translate_phase(&status).unwrap();
        assert_eq!(details.state, ContainerState::Exited);
        assert_eq!(details.exit_code, 137);
        assert_eq!(details.reason, "OOMKilled");
        assert!(details.finished_at > details.started_at);
    }

    #[test]
    fn test_waiting_reason() {
        let status = ContainerPhaseStatus {
            phase: "pending".to_string(),
            waiting: Some(WaitingStatus {
                reason: "ContainerCreating".to_string(),
            }),
            ..Default::default()
        };
        let details = translate_phase(&status).unwrap();
        assert_eq!(details.state, ContainerState::Created);
        assert_eq!(details.reason, "ContainerCreating");
    }

    #[test]
    fn test_bad_running_timestamp_is_fatal() {
        let status = ContainerPhaseStatus {
            phase: "running".to_string(),
            running: Some(RunningStatus {
                started_at: "2024-01-02 03:04:05".to_string(),
            }),
            ..Default::default()
        };
        assert!(translate_phase(&status).is_err());
    }
}
