//! Context objects.
//!
//! A context object is anything that can answer "what value is stored under
//! this key". The hook only ever reads from contexts; creating and
//! propagating them is the application's business.

pub mod request;
pub mod value;

pub use request::*;
pub use value::*;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde_json::Value;

/// Lookup-by-key capability carried by request/trace context objects.
///
/// Returning `None` (or `Some(Value::Null)`) means the key is absent.
pub trait Context: fmt::Debug + Send + Sync {
    fn value(&self, key: &str) -> Option<Value>;
}

impl Context for HashMap<String, Value> {
    fn value(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl Context for BTreeMap<String, Value> {
    fn value(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl Context for serde_json::Map<String, Value> {
    fn value(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}
