//! # Engine Boundary
//!
//! Wire records of the hypervisor-backed container engine and the client
//! trait used to reach it.
//!
//! ## Overview
//!
//! The engine runs each pod inside a VM and each container inside that pod.
//! It owns scheduling, VM lifecycle and storage; this crate only shapes the
//! records that cross the boundary:
//!
//! ```text
//! ┌──────────────────────────────┐          ┌─────────────────────────────┐
//! │  HyperRuntime                │          │  Engine                     │
//! │                              │  create  │                             │
//! │  ContainerSpec ──────────────┼─────────▶│  VM ─┬─ container           │
//! │                              │  list    │      ├─ container           │
//! │  ContainerSummary ◀──────────┼──────────│      └─ volumes             │
//! │  ContainerRecord  ◀──────────┼──────────│                             │
//! │  PodRecord        ◀──────────┼──────────│                             │
//! └──────────────────────────────┘          └─────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`]: Record definitions (serde, camelCase on the wire)
//! - [`client`]: The `EngineClient` trait and its error type

pub mod client;
pub mod types;

pub use client::{EngineClient, EngineError, EngineResult};
pub use types::{
    ContainerDetail, ContainerPhaseStatus, ContainerRecord, ContainerSpec, ContainerSummary,
    EnvironmentVar, PodRecord, PodRecordSpec, PodVolume, RunningStatus, TerminatedStatus,
    VolumeDetail, VolumeMount, VolumeOption, VolumeReference, WaitingStatus,
};
