//! # Translation Constants
//!
//! Reserved keys, marker filenames, format tags and layouts shared by the
//! spec builder and the status translator. Both directions of the
//! translation read from here, so a value changed on one side is changed on
//! the other.
//!
//! ## Compatibility
//!
//! Every value in this module is persisted somewhere outside the process:
//! in the engine's flat label map, in generated container names, or in
//! marker files written by the volume driver. Changing any of them makes
//! containers created by an older build unrecognizable to a newer one.
//!
//! ## Cross-References
//!
//! - [`crate::volume`]: Marker filename and volume format tags
//! - [`crate::labels`]: Bookkeeping key and annotation prefix
//! - [`crate::naming`]: Name marker and delimiter
//! - [`crate::status`]: Timestamp layout and engine phases

// =============================================================================
// Flex Volumes
// =============================================================================

/// Marker file written by the hyper flexvolume driver into a volume's host
/// directory.
///
/// Its presence classifies the mount as driver-managed; its JSON contents
/// select the storage backend.
pub const FLEX_VOLUME_DATA_FILE: &str = "hyper-flexvolume.json";

/// Format tag for plain host-path bind volumes.
pub const DEFAULT_VOLUME_DRIVER: &str = "vfs";

/// Format tag for raw block devices (cloud persistent disks).
pub const RAW_VOLUME_FORMAT: &str = "raw";

/// Format tag for Ceph RBD images.
pub const RBD_VOLUME_FORMAT: &str = "rbd";

/// Prefix of an RBD source locator (`rbd:<image>` or `rbd:<pool>/<image>`).
pub const RBD_SOURCE_PREFIX: &str = "rbd:";

/// The only Cinder volume type the engine can attach.
pub const CINDER_RBD_VOLUME_TYPE: &str = "rbd";

/// Number of hex digits in the random suffix of generated volume names.
///
/// 32 bits of suffix keeps collisions between mounts sharing a base
/// filename negligible within one container.
pub const VOLUME_SUFFIX_HEX_DIGITS: usize = 8;

// =============================================================================
// Labels
// =============================================================================

/// Engine label holding the computed container log path.
///
/// Bookkeeping only: never surfaced as a label or an annotation.
pub const CONTAINER_LOG_PATH_LABEL_KEY: &str = "io.kubernetes.container.logpath";

/// Prefix distinguishing annotations from labels in the engine label map.
pub const ANNOTATION_PREFIX: &str = "annotation.";

// =============================================================================
// Container Names
// =============================================================================

/// Leading marker of every container name generated by this crate.
pub const NAME_PREFIX: &str = "k8s";

/// Separator between composite name fields.
pub const NAME_DELIMITER: char = '_';

/// Character the engine prepends to container names in its records.
pub const ENGINE_NAME_SEPARATOR: char = '/';

// =============================================================================
// Engine Phases
// =============================================================================

/// Engine phase of a running container.
pub const PHASE_RUNNING: &str = "running";

/// Engine phase of a created, not yet started container.
pub const PHASE_PENDING: &str = "pending";

/// Engine phase of a container that exited non-zero.
pub const PHASE_FAILED: &str = "failed";

/// Engine phase of a container that exited zero.
pub const PHASE_SUCCEEDED: &str = "succeeded";

/// `strftime` layout of engine timestamps.
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Engine creation times are seconds; the orchestration layer wants nanos.
pub const SECOND_TO_NANO: i64 = 1_000_000_000;
