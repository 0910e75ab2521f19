//! Hook contract between the logger and its extensions.

use std::collections::HashMap;
use std::sync::Arc;

use log::Level;

use super::entry::Entry;
use crate::error::HookError;

/// Every level the pipeline knows, most severe first.
pub const ALL_LEVELS: [Level; 5] = [
    Level::Error,
    Level::Warn,
    Level::Info,
    Level::Debug,
    Level::Trace,
];

/// An extension invoked on each entry before it is written.
pub trait Hook: Send + Sync {
    /// Levels this hook wants to see.
    fn levels(&self) -> &[Level];

    /// Process one entry in place.
    fn fire(&self, entry: &mut Entry) -> Result<(), HookError>;
}

/// Registered hooks, indexed by level.
#[derive(Default, Clone)]
pub struct LevelHooks {
    hooks: HashMap<Level, Vec<Arc<dyn Hook>>>,
}

impl LevelHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` under each level it declares.
    pub fn add(&mut self, hook: Arc<dyn Hook>) {
        for level in hook.levels() {
            self.hooks
                .entry(*level)
                .or_default()
                .push(Arc::clone(&hook));
        }
    }

    pub fn len(&self, level: Level) -> usize {
        self.hooks.get(&level).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.values().all(Vec::is_empty)
    }

    /// Run the hooks for `level` in registration order, stopping at the first error.
    pub fn fire(&self, level: Level, entry: &mut Entry) -> Result<(), HookError> {
        if let Some(hooks) = self.hooks.get(&level) {
            for hook in hooks {
                hook.fire(entry)?;
            }
        }
        Ok(())
    }
}
