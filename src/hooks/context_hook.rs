//! Context extraction hook.
//!
//! Finds a context object among an entry's fields, removes that field, and
//! writes the configured context keys back as plain fields. Resolution
//! failures are silent no-ops: the hook never fails the log call.
//!
//! ## Configuration visibility
//!
//! The field name and the key list are each held as an `Arc` swapped under
//! its own lock. `fire` takes one snapshot of each at the start of a call, so
//! a call never sees a half-written key list, but a concurrent
//! `set_context_field` + `set_context_keys` pair may be observed with only
//! one of the two applied. The last write is visible to every later call.
//!
//! ## Wildcard resolution
//!
//! With the field set to [`WILDCARD`], the first field holding a context in
//! the entry's map iteration order wins. That order is unspecified, so when
//! several fields carry contexts the chosen one is not deterministic.

use std::sync::Arc;

use log::Level;
use parking_lot::RwLock;
use serde_json::Value;

use super::config::ContextHookConfig;
use crate::context::Context;
use crate::error::HookError;
use crate::logging::{Entry, FieldValue, Hook, ALL_LEVELS};

/// Field name meaning "any field whose value is a context".
pub const WILDCARD: &str = "*";

pub struct ContextHook {
    context_field: RwLock<Arc<str>>,
    context_keys: RwLock<Arc<[String]>>,
}

impl ContextHook {
    /// No validation: empty field names, empty and duplicate keys are accepted.
    pub fn new(context_field: impl Into<String>, context_keys: Vec<String>) -> Self {
        let context_field: String = context_field.into();
        Self {
            context_field: RwLock::new(Arc::from(context_field)),
            context_keys: RwLock::new(Arc::from(context_keys)),
        }
    }

    pub fn from_config(config: ContextHookConfig) -> Self {
        Self::new(config.context_field, config.context_keys)
    }

    pub fn context_field(&self) -> String {
        self.context_field.read().to_string()
    }

    pub fn set_context_field(&self, context_field: impl Into<String>) {
        let context_field: String = context_field.into();
        *self.context_field.write() = Arc::from(context_field);
    }

    pub fn context_keys(&self) -> Vec<String> {
        self.context_keys.read().to_vec()
    }

    /// Replaces the key list outright.
    pub fn set_context_keys(&self, context_keys: Vec<String>) {
        *self.context_keys.write() = Arc::from(context_keys);
    }

    /// Appends one key, read-modify-write under the key-list lock.
    pub fn add_context_key(&self, key: impl Into<String>) {
        let mut guard = self.context_keys.write();
        let mut keys = guard.to_vec();
        keys.push(key.into());
        *guard = Arc::from(keys);
    }

    /// Name of the field to consume, or `None` when no field qualifies.
    fn resolve_field(&self, field: &str, entry: &Entry) -> Option<String> {
        if field != WILDCARD {
            return Some(field.to_string());
        }
        entry
            .fields
            .iter()
            .find(|(_, value)| value.as_context().is_some())
            .map(|(name, _)| name.clone())
    }
}

impl Hook for ContextHook {
    fn levels(&self) -> &[Level] {
        &ALL_LEVELS
    }

    fn fire(&self, entry: &mut Entry) -> Result<(), HookError> {
        let field = Arc::clone(&*self.context_field.read());
        let keys = Arc::clone(&*self.context_keys.read());

        let Some(name) = self.resolve_field(&field, entry) else {
            log::trace!("CONTEXT_FIELD_UNRESOLVED mode=wildcard");
            return Ok(());
        };

        let ctx: Arc<dyn Context> = match entry.fields.get(&name).and_then(FieldValue::as_context) {
            Some(ctx) => Arc::clone(ctx),
            None => {
                log::trace!("CONTEXT_FIELD_SKIPPED field={}", name);
                return Ok(());
            }
        };

        entry.fields.remove(&name);

        let mut extracted = 0;
        for key in keys.iter() {
            match ctx.value(key) {
                None | Some(Value::Null) => {}
                Some(value) => {
                    entry.fields.insert(key.clone(), FieldValue::Value(value));
                    extracted += 1;
                }
            }
        }

        log::debug!(
            "CONTEXT_FIELD_RESOLVED field={} keys={} extracted={}",
            name,
            keys.len(),
            extracted
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{RequestContext, ValueContext};
    use serde_json::json;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn demo_context() -> ValueContext {
        ValueContext::background().with_value("ServerId", "DemoServer")
    }

    #[test]
    fn test_wildcard_extracts_present_keys() {
        let hook = ContextHook::new(WILDCARD, keys(&["ServerId", "RequestId", "HostId"]));
        let mut entry = Entry::new(Level::Info, "hello").with_context("X", demo_context());

        hook.fire(&mut entry).unwrap();

        assert!(entry.field("X").is_none());
        assert_eq!(entry.field("ServerId"), Some(&FieldValue::from("DemoServer")));
        assert!(entry.field("RequestId").is_none());
        assert!(entry.field("HostId").is_none());
        assert_eq!(entry.fields.len(), 1);
    }

    #[test]
    fn test_named_field_ignores_other_fields() {
        let hook = ContextHook::new("Context", keys(&["RequestId"]));
        let ctx = FieldValue::context(ValueContext::background().with_value("RequestId", "R1"));
        let mut entry = Entry::new(Level::Info, "hello").with_field("Other", ctx.clone());

        hook.fire(&mut entry).unwrap();

        assert_eq!(entry.fields.len(), 1);
        assert_eq!(entry.field("Other"), Some(&ctx));
        assert!(entry.field("RequestId").is_none());
    }

    #[test]
    fn test_named_field_with_plain_value_is_untouched() {
        let hook = ContextHook::new("Context", keys(&["RequestId"]));
        let mut entry = Entry::new(Level::Info, "hello").with_field("Context", "not a context");

        hook.fire(&mut entry).unwrap();

        assert_eq!(entry.field("Context"), Some(&FieldValue::from("not a context")));
        assert_eq!(entry.fields.len(), 1);
    }

    #[test]
    fn test_named_field_consumed_even_without_matches() {
        let hook = ContextHook::new("Context", keys(&["UserId"]));
        let mut entry = Entry::new(Level::Info, "hello").with_context("Context", demo_context());

        hook.fire(&mut entry).unwrap();

        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_keys_overwrite_existing_fields() {
        let hook = ContextHook::new("Context", keys(&["ServerId"]));
        let mut entry = Entry::new(Level::Info, "hello")
            .with_field("ServerId", "stale")
            .with_context("Context", demo_context());

        hook.fire(&mut entry).unwrap();

        assert_eq!(entry.field("ServerId"), Some(&FieldValue::from("DemoServer")));
    }

    #[test]
    fn test_null_values_are_skipped() {
        let hook = ContextHook::new(WILDCARD, keys(&["RequestId"]));
        let ctx = ValueContext::background().with_value("RequestId", Value::Null);
        let mut entry = Entry::new(Level::Info, "hello").with_context("ctx", ctx);

        hook.fire(&mut entry).unwrap();

        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_wildcard_without_context_is_noop() {
        let hook = ContextHook::new(WILDCARD, keys(&["RequestId"]));
        let mut entry = Entry::new(Level::Info, "hello")
            .with_field("RequestId", "caller-set")
            .with_field("count", 3i64);

        hook.fire(&mut entry).unwrap();

        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.field("RequestId"), Some(&FieldValue::from("caller-set")));
    }

    #[test]
    fn test_wildcard_consumes_exactly_one_context() {
        let hook = ContextHook::new(WILDCARD, keys(&["ServerId"]));
        let mut entry = Entry::new(Level::Info, "hello")
            .with_context("a", demo_context())
            .with_context("b", demo_context());

        hook.fire(&mut entry).unwrap();

        let remaining = ["a", "b"]
            .iter()
            .filter(|name| entry.field(name).is_some())
            .count();
        assert_eq!(remaining, 1);
        assert_eq!(entry.field("ServerId"), Some(&FieldValue::from("DemoServer")));
    }

    #[test]
    fn test_request_context_extraction() {
        let hook = ContextHook::new(WILDCARD, keys(&["ServerId", "RequestId", "HostId"]));
        let ctx = RequestContext::generate("DemoServer").with_host("host-1");
        let request_id = ctx.request_id.clone().unwrap_or_default();
        let mut entry = Entry::new(Level::Warn, "slow").with_context("req", ctx);

        hook.fire(&mut entry).unwrap();

        assert_eq!(entry.field("RequestId"), Some(&FieldValue::from(request_id)));
        assert_eq!(entry.field("HostId").and_then(FieldValue::as_value), Some(&json!("host-1")));
    }

    #[test]
    fn test_accessors_replace_values() {
        let hook = ContextHook::new("Context", keys(&["ServerId"]));
        assert_eq!(hook.context_field(), "Context");

        hook.set_context_field(WILDCARD);
        assert_eq!(hook.context_field(), "*");

        hook.set_context_keys(keys(&["RequestId"]));
        assert_eq!(hook.context_keys(), keys(&["RequestId"]));

        hook.add_context_key("UserId");
        assert_eq!(hook.context_keys(), keys(&["RequestId", "UserId"]));
    }

    #[test]
    fn test_empty_configuration_is_accepted() {
        let hook = ContextHook::new("", Vec::new());
        let mut entry = Entry::new(Level::Info, "hello").with_context("", demo_context());

        hook.fire(&mut entry).unwrap();

        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = ContextHookConfig::from_json(r#"{"context_keys": ["ServerId"]}"#).unwrap();
        let hook = ContextHook::from_config(config);

        assert_eq!(hook.context_field(), WILDCARD);
        assert_eq!(hook.context_keys(), keys(&["ServerId"]));
    }

    #[test]
    fn test_applies_to_all_levels() {
        let hook = ContextHook::new(WILDCARD, Vec::new());
        assert_eq!(hook.levels(), &ALL_LEVELS[..]);
    }
}
