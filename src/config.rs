use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cleaning::columns::{CATEGORY, REVENUE};
use crate::error::Result;
use crate::report::DEFAULT_WIDTH;

/// Settings for aggregation and report rendering.
///
/// Stored as a JSON object on disk; every field is optional:
/// ```json
/// {
///   "key_column": "Region",
///   "measure_column": "Revenue",
///   "width": 60
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub key_column: String,
    pub measure_column: String,
    pub width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            key_column: CATEGORY.to_string(),
            measure_column: REVENUE.to_string(),
            width: DEFAULT_WIDTH,
        }
    }
}

impl ReportConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Replaces fields for which an override is given.
    pub fn with_overrides(
        mut self,
        key_column: Option<String>,
        measure_column: Option<String>,
        width: Option<usize>,
    ) -> Self {
        if let Some(key) = key_column {
            self.key_column = key;
        }
        if let Some(measure) = measure_column {
            self.measure_column = measure;
        }
        if let Some(width) = width {
            self.width = width;
        }
        self
    }
}
