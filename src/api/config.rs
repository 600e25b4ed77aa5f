use serde::{Deserialize, Serialize};

use crate::core::JsonOptions;
use crate::error::{BridgeError, BridgeResult};

/// What `ArrayList::add_at` does with an index past the end of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangeInsert {
    /// Host `splice` semantics: the element is appended.
    #[default]
    AppendAtEnd,
    /// The insert fails with `BridgeError::IndexOutOfBounds`.
    Reject,
}

/// Behavior knobs shared by lists and containers.
///
/// Serializable so hosts can persist it next to their chart setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub out_of_range_insert: OutOfRangeInsert,
    #[serde(default = "default_json_indent")]
    pub json_indent: usize,
    #[serde(default = "default_json_max_depth")]
    pub json_max_depth: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            out_of_range_insert: OutOfRangeInsert::default(),
            json_indent: default_json_indent(),
            json_max_depth: default_json_max_depth(),
        }
    }
}

impl BridgeConfig {
    #[must_use]
    pub fn with_out_of_range_insert(mut self, policy: OutOfRangeInsert) -> Self {
        self.out_of_range_insert = policy;
        self
    }

    #[must_use]
    pub fn with_json_indent(mut self, indent: usize) -> Self {
        self.json_indent = indent;
        self
    }

    #[must_use]
    pub fn with_json_max_depth(mut self, max_depth: usize) -> Self {
        self.json_max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn json_options(self) -> JsonOptions {
        JsonOptions {
            indent: self.json_indent,
            max_depth: self.json_max_depth,
        }
    }

    /// Same limits, compact output.
    #[must_use]
    pub fn compact_json_options(self) -> JsonOptions {
        JsonOptions {
            indent: 0,
            max_depth: self.json_max_depth,
        }
    }

    pub fn validate(self) -> BridgeResult<Self> {
        if self.json_max_depth == 0 {
            return Err(BridgeError::InvalidData(
                "json_max_depth must be > 0".to_owned(),
            ));
        }
        if self.json_indent > 10 {
            return Err(BridgeError::InvalidData(
                "json_indent must be <= 10".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> BridgeResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| BridgeError::InvalidData(format!("failed to parse bridge config: {e}")))?;
        config.validate()
    }

    pub fn to_json_pretty(self) -> BridgeResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| BridgeError::InvalidData(format!("failed to serialize bridge config: {e}")))
    }
}

fn default_json_indent() -> usize {
    3
}

fn default_json_max_depth() -> usize {
    64
}
