//! Structural preview of an uploaded CSV, computed by the server.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One table row keyed by column name, in server order.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewPayload {
    /// `[row_count, column_count]`.
    pub shape: [u64; 2],
    pub columns: Vec<String>,
    #[serde(default)]
    pub missing_values: BTreeMap<String, u64>,
    #[serde(default)]
    pub sample_data: Vec<Record>,
    /// Column dtypes as reported by the server, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtypes: Option<BTreeMap<String, String>>,
}

impl PreviewPayload {
    pub fn row_count(&self) -> u64 {
        self.shape[0]
    }

    pub fn column_count(&self) -> u64 {
        self.shape[1]
    }

    /// Number of columns with at least one missing value.
    pub fn columns_with_missing(&self) -> usize {
        self.missing_values.values().filter(|count| **count > 0).count()
    }
}
