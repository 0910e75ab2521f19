//! Serialized configuration for [`ContextHook`](super::ContextHook).

use serde::{Deserialize, Serialize};

use super::context_hook::WILDCARD;
use crate::error::ConfigError;

/// Construction-time settings for a context hook.
///
/// ```json
/// { "context_field": "*", "context_keys": ["ServerId", "RequestId", "HostId"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextHookConfig {
    #[serde(default = "default_context_field")]
    pub context_field: String,
    #[serde(default)]
    pub context_keys: Vec<String>,
}

fn default_context_field() -> String {
    WILDCARD.to_string()
}

impl Default for ContextHookConfig {
    fn default() -> Self {
        Self {
            context_field: default_context_field(),
            context_keys: Vec::new(),
        }
    }
}

impl ContextHookConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
