//! Error types.
//!
//! The context hook itself never fails; these exist for the host side of the
//! hook contract and for configuration parsing.

use thiserror::Error;

/// Failure reported by a hook back to the logging pipeline.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("hook {hook} failed: {reason}")]
    Failed { hook: String, reason: String },
}

impl HookError {
    pub fn failed(hook: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            hook: hook.into(),
            reason: reason.into(),
        }
    }
}

/// Failure to build a hook from serialized configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid context hook config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_error_display() {
        let err = HookError::failed("audit", "sink closed");
        assert_eq!(err.to_string(), "hook audit failed: sink closed");
    }

    #[test]
    fn test_config_error_from_serde() {
        let err: ConfigError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("invalid context hook config:"));
    }
}
