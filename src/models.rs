//! Data models for benchmark aggregation.
//!
//! This module contains the core data structures used to represent
//! benchmark result files and the combined output document.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// One named measurement entry within a benchmark file's `results` array.
///
/// Only `name` is structurally required; every other field is an arbitrary
/// metric and is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Identity of the record within its file.
    pub name: String,
    /// All remaining metric fields, preserved as-is.
    #[serde(flatten)]
    pub metrics: Map<String, Value>,
}

/// Result name → record, for one (benchmark, category) pair.
pub type ResultMap = BTreeMap<String, ResultRecord>;

/// Category name → results.
pub type CategoryMap = BTreeMap<String, ResultMap>;

/// Benchmark name → categories.
pub type FrameworkMap = BTreeMap<String, CategoryMap>;

/// The single merged output artifact produced by aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedDocument {
    /// Run metadata: the last `meta.json` encountered, or the default.
    pub meta: Value,
    /// benchmark name → category → result name → record.
    pub frameworks: FrameworkMap,
}

impl CombinedDocument {
    /// Creates an empty document with the given metadata.
    pub fn new(meta: Value) -> Self {
        Self {
            meta,
            frameworks: FrameworkMap::new(),
        }
    }
}

/// Default metadata used when no `meta.json` is found in the tree.
///
/// The timestamp is captured once at run start and passed in explicitly so
/// aggregation itself stays a pure function of its inputs.
pub fn default_meta(timestamp: DateTime<Utc>) -> Value {
    json!({
        "lastUpdated": timestamp.to_rfc3339_opts(SecondsFormat::Micros, false),
    })
}

/// Counters reported to the operator after a combine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombineStats {
    /// Files merged into `frameworks`.
    pub merged: usize,
    /// Files skipped (parse failure or missing `results`).
    pub skipped: usize,
    /// Whether a `meta.json` replaced the default metadata.
    pub meta_found: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_record_roundtrip() {
        let record: ResultRecord =
            serde_json::from_value(json!({"name": "r1", "time": 1.5, "iters": 10})).unwrap();
        assert_eq!(record.name, "r1");
        assert_eq!(record.metrics.get("time"), Some(&json!(1.5)));
        assert_eq!(record.metrics.get("iters"), Some(&json!(10)));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, json!({"name": "r1", "time": 1.5, "iters": 10}));
    }

    #[test]
    fn test_result_record_requires_name() {
        let result = serde_json::from_value::<ResultRecord>(json!({"time": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_meta_shape() {
        let ts = DateTime::parse_from_rfc3339("2024-01-02T03:04:05.000006+00:00")
            .unwrap()
            .with_timezone(&Utc);
        let meta = default_meta(ts);
        assert_eq!(
            meta,
            json!({"lastUpdated": "2024-01-02T03:04:05.000006+00:00"})
        );
    }

    #[test]
    fn test_empty_document_serialization() {
        let doc = CombinedDocument::new(json!({"lastUpdated": "now"}));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({"meta": {"lastUpdated": "now"}, "frameworks": {}})
        );
    }
}
