//! Parent-chained key/value context.

use std::sync::Arc;

use serde_json::Value;

use super::Context;

#[derive(Debug)]
struct Node {
    key: String,
    value: Value,
    parent: Option<Arc<Node>>,
}

/// Immutable context where each `with_value` call layers one key on top of
/// its parent. Children shadow parent keys; parents are never modified.
#[derive(Debug, Clone, Default)]
pub struct ValueContext {
    head: Option<Arc<Node>>,
}

impl ValueContext {
    /// The empty root context.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_value(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key: key.into(),
                value: value.into(),
                parent: self.head.clone(),
            })),
        }
    }
}

impl Context for ValueContext {
    fn value(&self, key: &str) -> Option<Value> {
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            if n.key == key {
                return Some(n.value.clone());
            }
            node = n.parent.as_deref();
        }
        None
    }
}
