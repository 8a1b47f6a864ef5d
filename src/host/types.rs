//! Wire types exchanged between the script host and the crypto modules.
//!
//! Serialized as camelCase JSON, one object per line in `run` mode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::HostResult;

/// One exported-function invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCall {
    /// Import path, e.g. `k6/x/crypto`.
    pub module: String,
    /// Exported function name, e.g. `createCipheriv`.
    pub function: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<Value>,
}

/// Result of one call as reported back to the script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum CallOutcome {
    Ok(Value),
    Error(String),
}

impl CallOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, CallOutcome::Ok(_))
    }
}

impl From<HostResult<Value>> for CallOutcome {
    fn from(result: HostResult<Value>) -> Self {
        match result {
            Ok(value) => CallOutcome::Ok(value),
            Err(e) => CallOutcome::Error(e.to_string()),
        }
    }
}

/// Registered module and its exports, for `modules` listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    pub name: String,
    pub exports: Vec<String>,
}
