//! Per-backend volume builders.
//!
//! Every builder turns backend options, a base name and the mount into a
//! [`VolumeReference`]. Builders never touch the filesystem; the only
//! input besides their arguments is the caller's random generator, which
//! supplies the name suffix.

use super::flex::{CephRbdOpts, CinderVolumeOpts, GcePdOpts};
use crate::constants::{
    CINDER_RBD_VOLUME_TYPE, DEFAULT_VOLUME_DRIVER, RAW_VOLUME_FORMAT, RBD_SOURCE_PREFIX,
    RBD_VOLUME_FORMAT, VOLUME_SUFFIX_HEX_DIGITS,
};
use crate::cri::Mount;
use crate::engine::{VolumeDetail, VolumeOption, VolumeReference};
use crate::error::{Error, Result};
use rand::Rng;
use tracing::debug;

/// Appends a random hex suffix to `base_name`.
///
/// Two mounts of `/a/data` and `/b/data` in one container would otherwise
/// both be named `data`.
pub fn generate_volume_name<R: Rng>(base_name: &str, rng: &mut R) -> String {
    format!(
        "{base_name}_{:0width$x}",
        rng.random::<u32>(),
        width = VOLUME_SUFFIX_HEX_DIGITS
    )
}

/// Builds a Cinder volume. Only RBD-backed Cinder volumes are attachable.
pub fn build_cinder_volume<R: Rng>(
    opts: &CinderVolumeOpts,
    base_name: &str,
    mount: &Mount,
    rng: &mut R,
) -> Result<VolumeReference> {
    if opts.volume_type != CINDER_RBD_VOLUME_TYPE {
        return Err(Error::UnsupportedVolumeType {
            volume_type: opts.volume_type.clone(),
        });
    }

    debug!(
        "Cinder volume {} served by monitors {:?}",
        opts.name,
        opts.monitors()
    );

    let detail = VolumeDetail {
        name: generate_volume_name(base_name, rng),
        source: format!("{RBD_SOURCE_PREFIX}{}", opts.name),
        format: opts.volume_type.clone(),
        fstype: opts.fs_type.clone(),
        option: None,
    };
    Ok(attach(detail, mount))
}

/// Builds a GCE persistent disk volume from its node device path.
pub fn build_gce_pd_volume<R: Rng>(
    opts: &GcePdOpts,
    base_name: &str,
    mount: &Mount,
    rng: &mut R,
) -> VolumeReference {
    let detail = VolumeDetail {
        name: generate_volume_name(base_name, rng),
        source: opts.device_path.clone(),
        format: RAW_VOLUME_FORMAT.to_string(),
        fstype: opts.fs_type.clone(),
        option: None,
    };
    attach(detail, mount)
}

/// Builds a Ceph RBD volume, carrying the credentials the engine needs to
/// map the image.
pub fn build_ceph_rbd_volume<R: Rng>(
    opts: &CephRbdOpts,
    base_name: &str,
    mount: &Mount,
    rng: &mut R,
) -> VolumeReference {
    let detail = VolumeDetail {
        name: generate_volume_name(base_name, rng),
        source: format!("{RBD_SOURCE_PREFIX}{}/{}", opts.pool, opts.volume_id),
        format: RBD_VOLUME_FORMAT.to_string(),
        fstype: opts.fs_type.clone(),
        option: Some(VolumeOption {
            user: opts.user.clone(),
            keyring: opts.keyring.clone(),
            monitors: opts.monitors.clone(),
        }),
    };
    attach(detail, mount)
}

/// Builds a plain host-path bind volume.
pub fn build_bind_volume<R: Rng>(base_name: &str, mount: &Mount, rng: &mut R) -> VolumeReference {
    let detail = VolumeDetail {
        name: generate_volume_name(base_name, rng),
        source: mount.host_path.clone(),
        format: DEFAULT_VOLUME_DRIVER.to_string(),
        fstype: String::new(),
        option: None,
    };
    attach(detail, mount)
}

fn attach(detail: VolumeDetail, mount: &Mount) -> VolumeReference {
    VolumeReference {
        volume: detail.name.clone(),
        path: mount.container_path.clone(),
        read_only: mount.readonly,
        detail,
    }
}
