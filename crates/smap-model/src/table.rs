//! Raw schema tables as produced by the extraction collaborator.

use serde::{Deserialize, Serialize};

/// One column of an extracted table, prior to any semantic mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawColumn {
    pub name: String,
    /// Original SQL type as reported by the extractor.
    #[serde(rename = "type")]
    pub data_type: String,
}

/// A table extracted from a source schema. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub name: String,
    pub columns: Vec<RawColumn>,
    /// Opaque sample rows carried along for display only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_data: Vec<serde_json::Value>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, columns: Vec<RawColumn>) -> Self {
        Self {
            name: name.into(),
            columns,
            sample_data: Vec::new(),
        }
    }
}
