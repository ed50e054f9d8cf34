//! Composite container names.
//!
//! The engine keeps one free-form name per container. The adapter packs the
//! orchestration identity into it so listing and status can recover which
//! sandbox and container a record belongs to:
//!
//! ```text
//! k8s_<container>_<sandbox>_<namespace>_<uid>_<attempt>
//! ```
//!
//! Names that do not decode were not created by this adapter. Listing skips
//! them; status lookup treats them as an error.

use crate::constants::{ENGINE_NAME_SEPARATOR, NAME_DELIMITER, NAME_PREFIX};
use crate::cri::{ContainerConfig, SandboxConfig};
use crate::error::{Error, Result};
use std::str::FromStr;

/// Number of identity fields after the prefix.
const IDENTITY_FIELDS: usize = 5;

/// Identity carried by a composite container name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerName {
    pub container_name: String,
    pub sandbox_name: String,
    pub namespace: String,
    pub sandbox_uid: String,
    pub attempt: u32,
}

impl ContainerName {
    /// Collects the identity of `config` running in `sandbox`.
    pub fn new(sandbox: &SandboxConfig, config: &ContainerConfig) -> Self {
        Self {
            container_name: config.metadata.name.clone(),
            sandbox_name: sandbox.metadata.name.clone(),
            namespace: sandbox.metadata.namespace.clone(),
            sandbox_uid: sandbox.metadata.uid.clone(),
            attempt: config.metadata.attempt,
        }
    }

    /// Encodes the identity into an engine container name.
    ///
    /// # Errors
    ///
    /// `InvalidNameComponent` if a field contains the delimiter or the
    /// engine separator; such a name could not be decoded again.
    pub fn encode(&self) -> Result<String> {
        let fields = [
            ("container name", &self.container_name),
            ("sandbox name", &self.sandbox_name),
            ("sandbox namespace", &self.namespace),
            ("sandbox uid", &self.sandbox_uid),
        ];
        for (field, value) in fields {
            if value.contains(NAME_DELIMITER) || value.contains(ENGINE_NAME_SEPARATOR) {
                return Err(Error::InvalidNameComponent {
                    field,
                    value: value.clone(),
                });
            }
        }

        let attempt = self.attempt.to_string();
        let delimiter = NAME_DELIMITER.to_string();
        Ok([
            NAME_PREFIX,
            self.container_name.as_str(),
            self.sandbox_name.as_str(),
            self.namespace.as_str(),
            self.sandbox_uid.as_str(),
            attempt.as_str(),
        ]
        .join(delimiter.as_str()))
    }

    /// Decodes an engine container name.
    ///
    /// Every `/` is dropped first; the engine reports names as `/<name>`.
    pub fn decode(name: &str) -> Result<Self> {
        let stripped: String = name
            .chars()
            .filter(|&c| c != ENGINE_NAME_SEPARATOR)
            .collect();
        let invalid = |reason: String| Error::InvalidContainerName {
            name: name.to_string(),
            reason,
        };

        let parts: Vec<&str> = stripped.split(NAME_DELIMITER).collect();
        let [prefix, container_name, sandbox_name, namespace, sandbox_uid, attempt] =
            parts.as_slice()
        else {
            return Err(invalid(format!(
                "expected {} fields after '{}', found {}",
                IDENTITY_FIELDS,
                NAME_PREFIX,
                parts.len().saturating_sub(1)
            )));
        };

        if *prefix != NAME_PREFIX {
            return Err(invalid(format!("missing '{NAME_PREFIX}' prefix")));
        }

        let attempt = attempt
            .parse::<u32>()
            .map_err(|e| invalid(format!("invalid attempt '{attempt}': {e}")))?;

        Ok(Self {
            container_name: container_name.to_string(),
            sandbox_name: sandbox_name.to_string(),
            namespace: namespace.to_string(),
            sandbox_uid: sandbox_uid.to_string(),
            attempt,
        })
    }
}

impl FromStr for ContainerName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

/// Builds the engine name for `config` created in `sandbox`.
pub fn build_container_name(sandbox: &SandboxConfig, config: &ContainerConfig) -> Result<String> {
    ContainerName::new(sandbox, config).encode()
}
