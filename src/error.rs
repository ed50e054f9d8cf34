//! Error types for the CRI translation layer.

use crate::engine::EngineError;

/// Result type alias for translation and lifecycle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while translating between the orchestration
/// model and the engine model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// Privileged containers cannot run inside a VM sandbox.
    #[error("privileged containers are not supported in hyper")]
    PrivilegedNotSupported,

    /// Cinder flex volume of a type the engine cannot attach.
    #[error("got wrong volume type: {volume_type}, expected: rbd")]
    UnsupportedVolumeType { volume_type: String },

    /// Marker file present but none of the backend payloads is set.
    #[error("hyper-flexvolume is detected, but the driver name is unknown: {host_path}")]
    UnknownFlexVolumeDriver { host_path: String },

    /// Marker file sets more than one backend payload.
    #[error("hyper-flexvolume at {host_path} sets more than one driver payload")]
    AmbiguousFlexVolumeDriver { host_path: String },

    /// A name component would corrupt the composite container name.
    #[error("invalid {field} '{value}': must not contain '_' or '/'")]
    InvalidNameComponent { field: &'static str, value: String },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    /// Container name was not produced by this adapter.
    #[error("failed to parse container name '{name}': {reason}")]
    InvalidContainerName { name: String, reason: String },

    /// Engine timestamp does not match the expected layout.
    #[error("can't parse {field} '{value}': {reason}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        reason: String,
    },

    // =========================================================================
    // Flex Volume Errors
    // =========================================================================
    /// Marker file could not be read or decoded.
    #[error("can't read flexvolume data file in '{host_path}': {reason}")]
    FlexVolumeData { host_path: String, reason: String },

    // =========================================================================
    // Engine Errors
    // =========================================================================
    /// The engine client call failed.
    #[error("engine {operation} failed for '{id}': {source}")]
    Engine {
        operation: &'static str,
        id: String,
        #[source]
        source: EngineError,
    },

    // =========================================================================
    // Unsupported Surface
    // =========================================================================
    /// Operation intentionally not provided by the hyper runtime.
    #[error("{0} is not implemented for hyper runtime")]
    NotImplemented(String),
}

impl Error {
    /// Wraps an engine client failure with the call it came from.
    pub(crate) fn engine(operation: &'static str, id: impl Into<String>, source: EngineError) -> Self {
        Self::Engine {
            operation,
            id: id.into(),
            source,
        }
    }
}
