//! Flex volume detection and marker-file decoding.
//!
//! The hyper flexvolume driver attaches networked or cloud block storage by
//! writing a JSON marker file into the volume's host directory instead of
//! mounting anything there. The kubelet then hands that directory to the
//! runtime as an ordinary host-path mount, and this module recognizes it.
//!
//! # Preconditions
//!
//! Detection stats the directory, then reads the file. The two steps are not
//! atomic. Volumes are provisioned by the driver before the container is
//! created and are not rewritten while it is being created, so a marker that
//! appears or disappears in between is not handled.

use crate::constants::FLEX_VOLUME_DATA_FILE;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

// =============================================================================
// Detection
// =============================================================================

/// Returns true if `host_path` is a directory holding `marker_file`.
///
/// A missing host path is never a flex volume: the kubelet may legitimately
/// pass paths that do not exist yet. Non-directory paths (bind-mounted
/// files such as `/etc/hosts`) are never flex volumes either.
pub fn is_flex_volume(host_path: &Path, marker_file: &str) -> bool {
    let Ok(info) = fs::metadata(host_path) else {
        return false;
    };
    if !info.is_dir() {
        return false;
    }

    // Anything but "not found" (e.g. EACCES) still means the marker is there.
    match fs::metadata(host_path.join(marker_file)) {
        Ok(_) => true,
        Err(e) => e.kind() != ErrorKind::NotFound,
    }
}

// =============================================================================
// Marker File Payloads
// =============================================================================

/// Cinder volume attached through the Ceph backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CinderVolumeOpts {
    #[serde(rename = "volumeID")]
    pub volume_id: String,
    /// Backend image name.
    pub name: String,
    pub fs_type: String,
    pub access_mode: String,
    /// Cinder connection type; only `rbd` is attachable.
    pub volume_type: String,
    pub hosts: Vec<String>,
    pub ports: Vec<String>,
}

impl CinderVolumeOpts {
    /// Every `host:port` pair of the Ceph monitors.
    pub fn monitors(&self) -> Vec<String> {
        self.hosts
            .iter()
            .flat_map(|host| self.ports.iter().map(move |port| format!("{host}:{port}")))
            .collect()
    }
}

/// GCE persistent disk already attached to the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GcePdOpts {
    /// Block device path on the node.
    pub device_path: String,
    pub fs_type: String,
}

/// Ceph RBD image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CephRbdOpts {
    #[serde(rename = "volumeID")]
    pub volume_id: String,
    pub pool: String,
    pub user: String,
    pub keyring: String,
    pub monitors: Vec<String>,
    pub fs_type: String,
}

/// Marker file contents as written by the driver.
///
/// At most one payload is expected; see [`FlexVolumeOpts::from_data`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlexVolumeOptsData {
    #[serde(rename = "cinderVolumeOptsData", skip_serializing_if = "Option::is_none")]
    pub cinder: Option<CinderVolumeOpts>,
    #[serde(rename = "gcePDOptsData", skip_serializing_if = "Option::is_none")]
    pub gce_pd: Option<GcePdOpts>,
    #[serde(rename = "cephRBDOptsData", skip_serializing_if = "Option::is_none")]
    pub ceph_rbd: Option<CephRbdOpts>,
}

/// Storage backend of a flex volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlexVolumeOpts {
    Cinder(CinderVolumeOpts),
    GcePd(GcePdOpts),
    CephRbd(CephRbdOpts),
}

impl FlexVolumeOpts {
    /// Selects the single populated payload.
    ///
    /// # Errors
    ///
    /// - `UnknownFlexVolumeDriver` if no payload is set
    /// - `AmbiguousFlexVolumeDriver` if more than one is set
    pub fn from_data(data: FlexVolumeOptsData, host_path: &str) -> Result<Self> {
        match (data.cinder, data.gce_pd, data.ceph_rbd) {
            (Some(cinder), None, None) => Ok(Self::Cinder(cinder)),
            (None, Some(gce_pd), None) => Ok(Self::GcePd(gce_pd)),
            (None, None, Some(ceph_rbd)) => Ok(Self::CephRbd(ceph_rbd)),
            (None, None, None) => Err(Error::UnknownFlexVolumeDriver {
                host_path: host_path.to_string(),
            }),
            _ => Err(Error::AmbiguousFlexVolumeDriver {
                host_path: host_path.to_string(),
            }),
        }
    }

    /// Returns the backend name used in log messages.
    pub fn driver(&self) -> &'static str {
        match self {
            Self::Cinder(_) => "cinder",
            Self::GcePd(_) => "gce-pd",
            Self::CephRbd(_) => "ceph-rbd",
        }
    }
}

/// Reads and decodes the marker file in `host_path`.
pub fn read_flex_volume_opts(host_path: &Path) -> Result<FlexVolumeOpts> {
    let display = host_path.display().to_string();
    let content =
        fs::read(host_path.join(FLEX_VOLUME_DATA_FILE)).map_err(|e| Error::FlexVolumeData {
            host_path: display.clone(),
            reason: e.to_string(),
        })?;
    let data: FlexVolumeOptsData =
        serde_json::from_slice(&content).map_err(|e| Error::FlexVolumeData {
            host_path: display.clone(),
            reason: e.to_string(),
        })?;

    FlexVolumeOpts::from_data(data, &display)
}
