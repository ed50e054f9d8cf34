//! Container labels, annotations and bookkeeping in one flat engine map.
//!
//! The engine stores a single `string → string` map per container. The
//! orchestration layer has two (labels and annotations), and the adapter
//! needs to remember the log path. [`ContainerLabels`] holds the three
//! separately and defines how they flatten:
//!
//! | Engine key | Meaning |
//! |------------|---------|
//! | `io.kubernetes.container.logpath` | log path (bookkeeping) |
//! | `annotation.<key>` | annotation `<key>` |
//! | anything else | label |
//!
//! Labels must not use the annotation prefix or the bookkeeping key; such a
//! label comes back as an annotation, or not at all.

use crate::constants::{ANNOTATION_PREFIX, CONTAINER_LOG_PATH_LABEL_KEY};
use std::collections::HashMap;

/// Typed view of a container's engine label map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerLabels {
    pub labels: HashMap<String, String>,
    pub annotations: HashMap<String, String>,
    pub log_path: Option<String>,
}

impl ContainerLabels {
    pub fn new(
        labels: HashMap<String, String>,
        annotations: HashMap<String, String>,
        log_path: Option<String>,
    ) -> Self {
        Self {
            labels,
            annotations,
            log_path,
        }
    }

    /// Flattens into the engine map.
    ///
    /// Bookkeeping entries are written last and win any key collision.
    pub fn to_engine_labels(&self) -> HashMap<String, String> {
        let mut merged =
            HashMap::with_capacity(self.labels.len() + self.annotations.len() + 1);
        merged.extend(
            self.labels
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        merged.extend(
            self.annotations
                .iter()
                .map(|(k, v)| (format!("{ANNOTATION_PREFIX}{k}"), v.clone())),
        );
        if let Some(log_path) = &self.log_path {
            merged.insert(CONTAINER_LOG_PATH_LABEL_KEY.to_string(), log_path.clone());
        }
        merged
    }

    /// Splits an engine map back into labels, annotations and bookkeeping.
    pub fn from_engine_labels(engine_labels: &HashMap<String, String>) -> Self {
        let mut split = Self::default();
        for (key, value) in engine_labels {
            if key == CONTAINER_LOG_PATH_LABEL_KEY {
                split.log_path = Some(value.clone());
            } else if let Some(annotation) = key.strip_prefix(ANNOTATION_PREFIX) {
                split
                    .annotations
                    .insert(annotation.to_string(), value.clone());
            } else {
                split.labels.insert(key.clone(), value.clone());
            }
        }
        split
    }

    /// True if every selector entry is present in `labels` with an equal
    /// value. An empty selector matches everything.
    pub fn matches(&self, selector: &HashMap<String, String>) -> bool {
        selector
            .iter()
            .all(|(k, v)| self.labels.get(k) == Some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_merge_layout() {
        let labels = ContainerLabels::new(
            map(&[("app", "web")]),
            map(&[("owner", "team-a")]),
            Some("/var/log/pods/uid/web_0.log".to_string()),
        );
        let merged = labels.to_engine_labels();

        assert_eq!(merged.len(), 3);
        assert_eq!(merged["app"], "web");
        assert_eq!(merged["annotation.owner"], "team-a");
        assert_eq!(
            merged["io.kubernetes.container.logpath"],
            "/var/log/pods/uid/web_0.log"
        );
    }

    #[test]
    fn test_bookkeeping_wins_collision() {
        let labels = ContainerLabels::new(
            map(&[(CONTAINER_LOG_PATH_LABEL_KEY, "caller-value")]),
            HashMap::new(),
            Some("/computed".to_string()),
        );
        let merged = labels.to_engine_labels();
        assert_eq!(merged[CONTAINER_LOG_PATH_LABEL_KEY], "/computed");
    }

    #[test]
    fn test_split_excludes_log_path() {
        let split = ContainerLabels::from_engine_labels(&map(&[
            ("app", "web"),
            ("annotation.owner", "team-a"),
            (CONTAINER_LOG_PATH_LABEL_KEY, "/var/log/x.log"),
        ]));

        assert_eq!(split.labels, map(&[("app", "web")]));
        assert_eq!(split.annotations, map(&[("owner", "team-a")]));
        assert_eq!(split.log_path.as_deref(), Some("/var/log/x.log"));
    }

    #[test]
    fn test_selector_is_subset_match() {
        let labels = ContainerLabels::new(
            map(&[("app", "web"), ("tier", "front")]),
            HashMap::new(),
            None,
        );
        assert!(labels.matches(&HashMap::new()));
        assert!(labels.matches(&map(&[("app", "web")])));
        assert!(!labels.matches(&map(&[("app", "db")])));
        assert!(!labels.matches(&map(&[("app", "web"), ("zone", "a")])));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_labels() -> impl Strategy<Value = HashMap<String, String>> {
        prop::collection::hash_map("[a-z][a-z0-9./-]{0,15}", "[ -~]{0,16}", 0..8).prop_filter(
            "reserved keys",
            |m| {
                m.keys().all(|k| {
                    !k.starts_with(ANNOTATION_PREFIX) && k != CONTAINER_LOG_PATH_LABEL_KEY
                })
            },
        )
    }

    fn arb_annotations() -> impl Strategy<Value = HashMap<String, String>> {
        prop::collection::hash_map("[ -~]{0,24}", "[ -~]{0,16}", 0..8)
    }

    proptest! {
        #[test]
        fn merge_then_split_roundtrips(
            labels in arb_labels(),
            annotations in arb_annotations(),
            log_path in proptest::option::of("/[a-z0-9/._-]{1,32}"),
        ) {
            let original = ContainerLabels::new(labels, annotations, log_path);
            let split = ContainerLabels::from_engine_labels(&original.to_engine_labels());
            prop_assert_eq!(split, original);
        }
    }
}
