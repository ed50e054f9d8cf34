//! # Container Volumes
//!
//! Resolves each orchestration mount into an engine volume reference.
//!
//! ## Resolution
//!
//! ```text
//!   Mount { host_path, container_path, readonly }
//!          │
//!          ▼
//!   host_path is a dir holding hyper-flexvolume.json?
//!          │
//!     no ──┴── yes ──▶ decode marker ──┬─▶ Cinder  ─▶ rbd:<name>
//!     │                                ├─▶ GCE PD  ─▶ <device path>, raw
//!     ▼                                └─▶ Ceph RBD ─▶ rbd:<pool>/<id> + creds
//!   bind volume: <host_path>, vfs
//! ```
//!
//! Each mount resolves independently. The first failure aborts the whole
//! list; no partial volume list is ever returned.
//!
//! ## Modules
//!
//! - [`flex`]: Marker-file detection and decoding
//! - [`builders`]: Per-backend volume builders

pub mod builders;
pub mod flex;

pub use builders::{
    build_bind_volume, build_ceph_rbd_volume, build_cinder_volume, build_gce_pd_volume,
    generate_volume_name,
};
pub use flex::{
    CephRbdOpts, CinderVolumeOpts, FlexVolumeOpts, FlexVolumeOptsData, GcePdOpts, is_flex_volume,
    read_flex_volume_opts,
};

use crate::constants::FLEX_VOLUME_DATA_FILE;
use crate::cri::Mount;
use crate::engine::VolumeReference;
use crate::error::Result;
use rand::Rng;
use std::path::Path;
use tracing::debug;

/// Resolves one mount into a volume reference.
pub fn resolve_volume<R: Rng>(mount: &Mount, rng: &mut R) -> Result<VolumeReference> {
    let host_path = Path::new(&mount.host_path);
    // A trailing '/' is ignored; only "/" itself has no base name.
    let base_name = host_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !is_flex_volume(host_path, FLEX_VOLUME_DATA_FILE) {
        return Ok(build_bind_volume(&base_name, mount, rng));
    }

    let opts = read_flex_volume_opts(host_path)?;
    debug!(
        "Mount {} is a {} flex volume",
        mount.host_path,
        opts.driver()
    );

    match &opts {
        FlexVolumeOpts::Cinder(cinder) => build_cinder_volume(cinder, &base_name, mount, rng),
        FlexVolumeOpts::GcePd(gce_pd) => Ok(build_gce_pd_volume(gce_pd, &base_name, mount, rng)),
        FlexVolumeOpts::CephRbd(ceph) => Ok(build_ceph_rbd_volume(ceph, &base_name, mount, rng)),
    }
}

/// Resolves every mount of a container, in order.
pub fn make_container_volumes<R: Rng>(
    mounts: &[Mount],
    rng: &mut R,
) -> Result<Vec<VolumeReference>> {
    mounts
        .iter()
        .map(|mount| resolve_volume(mount, &mut *rng))
        .collect()
}
