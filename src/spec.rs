//! Engine container spec building.
//!
//! Turns an orchestration [`ContainerConfig`] and its [`SandboxConfig`] into
//! the engine's [`ContainerSpec`]:
//!
//! | Orchestration | Engine |
//! |---------------|--------|
//! | `command` | `entrypoint` |
//! | `args` | `command` |
//! | `labels` + `annotations` + log path | flat `labels` |
//! | `mounts` | `volumes` (see [`crate::volume`]) |
//! | `envs` | `envs`, same order |
//! | `security_context.readonly_rootfs` | `read_only` |

use crate::cri::{ContainerConfig, SandboxConfig};
use crate::engine::{ContainerSpec, EnvironmentVar};
use crate::error::{Error, Result};
use crate::labels::ContainerLabels;
use crate::naming::build_container_name;
use crate::volume::make_container_volumes;
use rand::Rng;

/// Builds the engine spec for `config` created in `sandbox`.
///
/// # Errors
///
/// - `PrivilegedNotSupported` for privileged containers
/// - `InvalidNameComponent` if the identity cannot be encoded
/// - Any volume resolution error; one bad mount fails the whole build
pub fn build_container_spec<R: Rng>(
    config: &ContainerConfig,
    sandbox: &SandboxConfig,
    rng: &mut R,
) -> Result<ContainerSpec> {
    let security = config.security_context.unwrap_or_default();
    if security.privileged {
        return Err(Error::PrivilegedNotSupported);
    }

    let log_path = join_log_path(&sandbox.log_directory, &config.log_path);
    let labels = ContainerLabels::new(
        config.labels.clone(),
        config.annotations.clone(),
        Some(log_path.clone()),
    );
    let name = build_container_name(sandbox, config)?;
    let volumes = make_container_volumes(&config.mounts, rng)?;
    let envs = config
        .envs
        .iter()
        .map(|kv| EnvironmentVar {
            env: kv.key.clone(),
            value: kv.value.clone(),
        })
        .collect();

    Ok(ContainerSpec {
        name,
        image: config.image.clone(),
        workdir: config.working_dir.clone(),
        tty: config.tty,
        command: config.args.clone(),
        entrypoint: config.command.clone(),
        labels: labels.to_engine_labels(),
        log_path,
        read_only: security.readonly_rootfs,
        volumes,
        envs,
    })
}

/// Joins the sandbox log directory and the container's log path, then
/// cleans the result lexically.
fn join_log_path(log_directory: &str, log_path: &str) -> String {
    let joined = match (log_directory.is_empty(), log_path.is_empty()) {
        (true, true) => return String::new(),
        (true, false) => log_path.to_string(),
        (false, true) => log_directory.to_string(),
        (false, false) => format!("{log_directory}/{log_path}"),
    };
    clean_path(&joined)
}

/// Shortest lexically equivalent form of `path`.
///
/// Empty and `.` components are dropped and `..` removes the component
/// before it. A rooted path never climbs above `/`. Nothing touches the
/// filesystem, so symlinks are not resolved.
fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            _ => parts.push(part),
        }
    }

    let body = parts.join("/");
    if rooted {
        format!("/{body}")
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_log_path() {
        assert_eq!(
            join_log_path("/var/log/pods/uid", "nginx/0.log"),
            "/var/log/pods/uid/nginx/0.log"
        );
        assert_eq!(
            join_log_path("/var/log/pods/uid", "/nginx_0.log"),
            "/var/log/pods/uid/nginx_0.log"
        );
        assert_eq!(join_log_path("", "nginx_0.log"), "nginx_0.log");
    }

    #[test]
    fn test_join_log_path_cleans() {
        assert_eq!(join_log_path("/var/log/pods/uid", ""), "/var/log/pods/uid");
        assert_eq!(
            join_log_path("/var/log/pods/uid", "a/../b.log"),
            "/var/log/pods/uid/b.log"
        );
        assert_eq!(
            join_log_path("/var/log/pods/uid/", "a//b.log"),
            "/var/log/pods/uid/a/b.log"
        );
        assert_eq!(
            join_log_path("/var/log/pods/uid", "./nginx/./0.log"),
            "/var/log/pods/uid/nginx/0.log"
        );
        assert_eq!(join_log_path("", ""), "");
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("/../../etc"), "/etc");
        assert_eq!(clean_path("a/../../b"), "../b");
        assert_eq!(clean_path("a/.."), ".");
        assert_eq!(clean_path("/"), "/");
        assert_eq!(clean_path("logs/"), "logs");
    }
}
