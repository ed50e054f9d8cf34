//! # hyperlet
//!
//! **CRI Container Translation for Hypervisor-Backed Engines**
//!
//! This crate adapts the kubelet's container lifecycle requests to a
//! container engine that runs every pod inside its own VM. It owns only the
//! translation between the two data models; the transport to the engine is
//! supplied by the caller through [`EngineClient`].
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           hyperlet                                  │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                     HyperRuntime                            │    │
//! │  │   create → start → stop → remove      list     status       │    │
//! │  └──────────────┬──────────────────────────┬───────────────────┘    │
//! │                 │ build                    │ translate              │
//! │  ┌──────────────▼─────────────┐  ┌─────────▼───────────────────┐    │
//! │  │        Spec Builder        │  │     Status Translator       │    │
//! │  │  privileged check          │  │  phase → state              │    │
//! │  │  log path, env, image      │  │  timestamps, exit code      │    │
//! │  └──┬─────────┬──────────┬────┘  └──────┬───────────┬──────────┘    │
//! │     │         │          │              │           │               │
//! │  ┌──▼─────┐ ┌─▼──────┐ ┌─▼────────────▼─┐ ┌─────────▼──────────┐    │
//! │  │ Volume │ │ Name   │ │  Label/Annot.  │ │   Listing filter   │    │
//! │  │ resolv.│ │ codec  │ │  splitter      │ │                    │    │
//! │  └────────┘ └────────┘ └────────────────┘ └────────────────────┘    │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                       EngineClient (external)                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Volumes
//!
//! A mount is either a plain host-path bind or a *flex volume*: a host
//! directory in which the hyper flexvolume driver left a marker file that
//! names a Cinder, GCE persistent disk or Ceph RBD backend. See
//! [`volume`].
//!
//! # Unsupported Features
//!
//! - Privileged containers are rejected when the spec is built.
//! - Resource updates are accepted and ignored.
//! - Container stats and log reopening return [`Error::NotImplemented`].
//!
//! # Example
//!
//! ```rust,ignore
//! use hyperlet::{HyperRuntime, ContainerConfig, SandboxConfig};
//!
//! let runtime = HyperRuntime::new(my_engine_client);
//! let id = runtime
//!     .create_container("pod-1", &container_config, &sandbox_config)
//!     .await?;
//! runtime.start_container(&id).await?;
//! let status = runtime.container_status(&id).await?;
//! ```

pub mod constants;
pub mod cri;
pub mod engine;
pub mod error;
pub mod labels;
pub mod naming;
pub mod runtime;
pub mod spec;
pub mod status;
pub mod volume;

// Re-exports
pub use cri::{
    Container, ContainerConfig, ContainerFilter, ContainerMetadata, ContainerState,
    ContainerStatus, KeyValue, Mount, SandboxConfig, SandboxMetadata, SecurityContext,
};
pub use engine::{EngineClient, EngineError, EngineResult};
pub use error::{Error, Result};
pub use labels::ContainerLabels;
pub use naming::ContainerName;
pub use runtime::HyperRuntime;
pub use spec::build_container_spec;
pub use volume::{FlexVolumeOpts, resolve_volume};
