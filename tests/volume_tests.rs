//! Tests for volume resolution.
//!
//! Validates marker-file detection against real directories and the
//! engine volume references produced for each backend.

use hyperlet::constants::FLEX_VOLUME_DATA_FILE;
use hyperlet::volume::{
    FlexVolumeOpts, is_flex_volume, make_container_volumes, read_flex_volume_opts,
};
use hyperlet::{Error, Mount, resolve_volume};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

fn mount(host: &Path, container: &str, readonly: bool) -> Mount {
    Mount {
        host_path: host.to_string_lossy().into_owned(),
        container_path: container.to_string(),
        readonly,
    }
}

fn flex_dir(parent: &TempDir, name: &str, json: &str) -> std::path::PathBuf {
    let dir = parent.path().join(name);
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join(FLEX_VOLUME_DATA_FILE), json).unwrap();
    dir
}

// =============================================================================
// Detection Tests
// =============================================================================

#[test]
fn test_detect_marker_in_directory() {
    let temp = TempDir::new().unwrap();
    let dir = flex_dir(&temp, "vol", "{}");
    assert!(is_flex_volume(&dir, FLEX_VOLUME_DATA_FILE));
}

#[test]
fn test_detect_plain_directory() {
    let temp = TempDir::new().unwrap();
    assert!(!is_flex_volume(temp.path(), FLEX_VOLUME_DATA_FILE));
}

#[test]
fn test_detect_missing_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");
    assert!(!is_flex_volume(&missing, FLEX_VOLUME_DATA_FILE));
}

#[test]
fn test_detect_regular_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join(FLEX_VOLUME_DATA_FILE);
    fs::write(&file, "{}").unwrap();
    assert!(!is_flex_volume(&file, FLEX_VOLUME_DATA_FILE));
}

#[test]
fn test_detect_marker_that_is_a_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(FLEX_VOLUME_DATA_FILE)).unwrap();
    assert!(is_flex_volume(temp.path(), FLEX_VOLUME_DATA_FILE));
}

// =============================================================================
// Marker Decoding Tests
// =============================================================================

#[test]
fn test_read_ceph_rbd_marker() {
    let temp = TempDir::new().unwrap();
    let dir = flex_dir(
        &temp,
        "ceph",
        r#"{"cephRBDOptsData":{"volumeID":"img1","pool":"kube","user":"admin",
            "keyring":"/etc/ceph/keyring","monitors":["10.0.0.1:6789"],"fsType":"xfs"}}"#,
    );

    let opts = read_flex_volume_opts(&dir).unwrap();
    let FlexVolumeOpts::CephRbd(ceph) = opts else {
        panic!("expected ceph-rbd payload");
    };
    assert_eq!(ceph.pool, "kube");
    assert_eq!(ceph.monitors, vec!["10.0.0.1:6789"]);
}

#[test]
fn test_ambiguous_marker_rejected() {
    let temp = TempDir::new().unwrap();
    let dir = flex_dir(
        &temp,
        "both",
        r#"{"gcePDOptsData":{"devicePath":"/dev/sdb"},"cephRBDOptsData":{"pool":"kube"}}"#,
    );

    let err = read_flex_volume_opts(&dir).unwrap_err();
    assert!(matches!(err, Error::AmbiguousFlexVolumeDriver { .. }));
}

#[test]
fn test_malformed_marker_rejected() {
    let temp = TempDir::new().unwrap();
    let dir = flex_dir(&temp, "broken", "{not json");

    let err = read_flex_volume_opts(&dir).unwrap_err();
    assert!(matches!(err, Error::FlexVolumeData { .. }));
    assert!(err.to_string().contains("broken"));
}

// =============================================================================
// Resolution Tests
// =============================================================================

#[test]
fn test_resolve_ceph_rbd() {
    let temp = TempDir::new().unwrap();
    let dir = flex_dir(
        &temp,
        "pvc-1",
        r#"{"cephRBDOptsData":{"volumeID":"img1","pool":"kube","user":"admin",
            "keyring":"AQD==","monitors":["m1:6789","m2:6789"],"fsType":"xfs"}}"#,
    );

    let reference = resolve_volume(&mount(&dir, "/data", true), &mut StdRng::seed_from_u64(1)).unwrap();
    assert!(reference.volume.starts_with("pvc-1_"));
    assert_eq!(reference.volume, reference.detail.name);
    assert_eq!(reference.path, "/data");
    assert!(reference.read_only);
    assert_eq!(reference.detail.source, "rbd:kube/img1");
    assert_eq!(reference.detail.format, "rbd");
    assert_eq!(reference.detail.fstype, "xfs");

    let option = reference.detail.option.unwrap();
    assert_eq!(option.user, "admin");
    assert_eq!(option.keyring, "AQD==");
    assert_eq!(option.monitors, vec!["m1:6789", "m2:6789"]);
}

#[test]
fn test_resolve_cinder_leaves_monitors_unset() {
    let temp = TempDir::new().unwrap();
    let dir = flex_dir(
        &temp,
        "vol1",
        r#"{"cinderVolumeOptsData":{"volumeType":"rbd","hosts":["h1","h2"],
            "ports":["6789"],"name":"vol1","fsType":"ext4"}}"#,
    );

    let reference = resolve_volume(&mount(&dir, "/target", false), &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(reference.detail.source, "rbd:vol1");
    assert!(reference.detail.option.is_none());
}

#[test]
fn test_resolve_bind_of_root_path() {
    let root = Mount {
        host_path: "/".to_string(),
        container_path: "/host".to_string(),
        readonly: true,
    };
    let reference = resolve_volume(&root, &mut StdRng::seed_from_u64(1)).unwrap();
    assert!(reference.volume.starts_with('_'));
    assert_eq!(reference.detail.source, "/");
    assert_eq!(reference.detail.format, "vfs");
}

#[test]
fn test_volume_list_preserves_order() {
    let temp = TempDir::new().unwrap();
    let gce = flex_dir(&temp, "disk", r#"{"gcePDOptsData":{"devicePath":"/dev/sdc"}}"#);
    let plain = temp.path().join("plain");
    fs::create_dir(&plain).unwrap();

    let mounts = vec![mount(&plain, "/a", false), mount(&gce, "/b", false)];
    let volumes = make_container_volumes(&mounts, &mut StdRng::seed_from_u64(7)).unwrap();

    assert_eq!(volumes.len(), 2);
    assert_eq!(volumes[0].path, "/a");
    assert_eq!(volumes[0].detail.format, "vfs");
    assert_eq!(volumes[1].path, "/b");
    assert_eq!(volumes[1].detail.format, "raw");
}

#[test]
fn test_volume_list_fails_on_first_error() {
    let temp = TempDir::new().unwrap();
    let unknown = flex_dir(&temp, "unknown", r#"{"nfs":{}}"#);
    let plain = temp.path().join("plain");

    let mounts = vec![mount(&plain, "/a", false), mount(&unknown, "/b", false)];
    let err = make_container_volumes(&mounts, &mut StdRng::seed_from_u64(7)).unwrap_err();
    assert!(matches!(err, Error::UnknownFlexVolumeDriver { .. }));
}

#[test]
fn test_trailing_slash_keeps_last_component_as_base_name() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("data");
    fs::create_dir(&dir).unwrap();

    let m = Mount {
        host_path: format!("{}/", dir.display()),
        container_path: "/data".to_string(),
        readonly: false,
    };
    let reference = resolve_volume(&m, &mut StdRng::seed_from_u64(3)).unwrap();
    assert!(reference.volume.starts_with("data_"));
    assert_eq!(reference.detail.source, m.host_path);
}
