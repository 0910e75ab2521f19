//! Log entries and their field values.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::Level;
use serde_json::Value;

use crate::context::Context;

/// Field map of an entry. Iteration order is unspecified.
pub type Fields = HashMap<String, FieldValue>;

/// A structured field value: plain data or a context object.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Value(Value),
    Context(Arc<dyn Context>),
}

impl FieldValue {
    pub fn context(ctx: impl Context + 'static) -> Self {
        Self::Context(Arc::new(ctx))
    }

    /// The context behind this value, if it is one.
    pub fn as_context(&self) -> Option<&Arc<dyn Context>> {
        match self {
            Self::Context(ctx) => Some(ctx),
            Self::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Context(_) => None,
        }
    }
}

// Contexts compare by identity: the same Arc, not equal contents.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Context(a), Self::Context(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl From<Arc<dyn Context>> for FieldValue {
    fn from(ctx: Arc<dyn Context>) -> Self {
        Self::Context(ctx)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::Context(_) => f.write_str("<context>"),
        }
    }
}

/// One log record as seen by hooks.
#[derive(Debug, Clone)]
pub struct Entry {
    pub level: Level,
    pub message: String,
    pub time: DateTime<Utc>,
    pub fields: Fields,
}

impl Entry {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            time: Utc::now(),
            fields: Fields::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_context(self, key: impl Into<String>, ctx: impl Context + 'static) -> Self {
        self.with_field(key, FieldValue::context(ctx))
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }
}

/// Renders `message key=value ...` with keys sorted.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        let mut keys: Vec<&String> = self.fields.keys().collect();
        keys.sort();
        for key in keys {
            write!(f, " {}={}", key, self.fields[key])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ValueContext;
    use serde_json::json;

    #[test]
    fn test_as_context() {
        let plain = FieldValue::from("R1");
        assert!(plain.as_context().is_none());
        assert_eq!(plain.as_value(), Some(&json!("R1")));

        let ctx = FieldValue::context(ValueContext::background().with_value("RequestId", "R1"));
        let found = ctx.as_context().map(|c| c.value("RequestId"));
        assert_eq!(found, Some(Some(json!("R1"))));
        assert!(ctx.as_value().is_none());
    }

    #[test]
    fn test_context_equality_is_identity() {
        let shared: Arc<dyn Context> = Arc::new(ValueContext::background());
        let a = FieldValue::from(Arc::clone(&shared));
        let b = FieldValue::from(Arc::clone(&shared));
        let other = FieldValue::context(ValueContext::background());

        assert_eq!(a, b);
        assert_ne!(a, other);
        assert_ne!(a, FieldValue::from("x"));
    }

    #[test]
    fn test_entry_display() {
        let entry = Entry::new(Level::Info, "REQUEST_DONE")
            .with_field("status", 200i64)
            .with_field("RequestId", "R1")
            .with_context("Context", ValueContext::background());

        assert_eq!(
            entry.to_string(),
            "REQUEST_DONE Context=<context> RequestId=\"R1\" status=200"
        );
    }
}
