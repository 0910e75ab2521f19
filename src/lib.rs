//! Context hook - lifts request-context identifiers into log fields
//!
//! Call sites attach a context object to a log entry under some field; the
//! [`ContextHook`] registered on the [`Logger`] swaps that field for the
//! configured context keys (server id, request id, host id, ...) before the
//! entry is written.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `context` - The lookup-by-key capability and a few implementations
//! - `logging` - Entries, the hook contract and an explicit logger instance
//! - `hooks` - The context extraction hook and its configuration
//! - `error` - Hook and configuration errors
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use context_hook::{ContextHook, Logger, ValueContext, WILDCARD};
//!
//! let logger = Logger::new();
//! let hook = Arc::new(ContextHook::new(
//!     WILDCARD,
//!     vec!["ServerId".into(), "RequestId".into(), "HostId".into()],
//! ));
//! logger.add_hook(hook.clone());
//!
//! let ctx = ValueContext::background().with_value("ServerId", "DemoServer");
//! let entry = logger.with_context("Context", ctx).info("REQUEST_START");
//! assert!(entry.is_some_and(|e| e.field("ServerId").is_some()));
//!
//! // Reconfigure at runtime.
//! hook.add_context_key("UserId");
//! ```

pub mod context;
pub mod error;
pub mod hooks;
pub mod logging;

pub use context::{Context, RequestContext, ValueContext};
pub use error::{ConfigError, HookError};
pub use hooks::{ContextHook, ContextHookConfig, WILDCARD};
pub use logging::{Entry, EntryBuilder, FieldValue, Fields, Hook, LevelHooks, Logger, ALL_LEVELS};

/// Initialize `env_logger` for processes that have no logger of their own.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
}
