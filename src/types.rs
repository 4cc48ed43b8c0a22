use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RepairError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairOptions {
    /// Maximum number of successive strategy applications before giving up.
    pub max_attempts: usize,
    pub remove_trailing_commas: bool,
    pub fix_unquoted_keys: bool,
    pub fix_single_quotes: bool,
    pub balance_brackets: bool,
    pub fix_escaped_quotes: bool,
    /// Pull the JSON payload out of code fences or surrounding prose.
    pub extract_from_text: bool,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            remove_trailing_commas: true,
            fix_unquoted_keys: true,
            fix_single_quotes: true,
            balance_brackets: true,
            fix_escaped_quotes: true,
            extract_from_text: true,
        }
    }
}

#[derive(Debug)]
pub struct RepairResult {
    /// Final candidate text; parses as JSON iff `success` is true.
    pub repaired: String,
    pub success: bool,
    /// Descriptions of the strategies that fired, in application order.
    pub repairs: Vec<String>,
    pub error: Option<RepairError>,
}

impl RepairResult {
    pub fn parsed(&self) -> Option<Value> {
        if !self.success {
            return None;
        }
        serde_json::from_str(&self.repaired).ok()
    }
}
