//! Logger instance that owns the hook registry.

use std::sync::Arc;

use log::{Level, LevelFilter};
use parking_lot::RwLock;

use super::entry::{Entry, FieldValue, Fields};
use super::hook::{Hook, LevelHooks};
use crate::context::Context;

/// `log` target that processed entries are written to.
pub const ENTRY_TARGET: &str = "context_hook::entry";

/// A logging pipeline: entries go through the registered hooks and are then
/// written through the `log` facade.
pub struct Logger {
    hooks: RwLock<LevelHooks>,
    level: RwLock<LevelFilter>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(LevelHooks::new()),
            level: RwLock::new(LevelFilter::Info),
        }
    }

    pub fn add_hook(&self, hook: Arc<dyn Hook>) {
        self.hooks.write().add(hook);
    }

    /// Swap the whole registry, returning the previous one.
    pub fn replace_hooks(&self, hooks: LevelHooks) -> LevelHooks {
        std::mem::replace(&mut *self.hooks.write(), hooks)
    }

    pub fn level(&self) -> LevelFilter {
        *self.level.read()
    }

    pub fn set_level(&self, level: LevelFilter) {
        *self.level.write() = level;
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level <= self.level()
    }

    /// Start an entry with no fields.
    pub fn entry(&self) -> EntryBuilder<'_> {
        EntryBuilder {
            logger: self,
            fields: Fields::new(),
        }
    }

    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> EntryBuilder<'_> {
        self.entry().with_field(key, value)
    }

    pub fn with_context(&self, key: impl Into<String>, ctx: impl Context + 'static) -> EntryBuilder<'_> {
        self.entry().with_context(key, ctx)
    }

    /// Fire the hooks for the entry's level and write it out.
    ///
    /// A failing hook is reported and the entry is written anyway.
    pub fn process(&self, mut entry: Entry) -> Entry {
        let level = entry.level;
        if let Err(e) = self.hooks.read().fire(level, &mut entry) {
            log::warn!("HOOK_FIRE_FAILED level={} error={}", level, e);
        }

        log::log!(target: ENTRY_TARGET, level, "{}", entry);
        entry
    }

    /// Log `message` at `level`; `None` when the level is filtered out.
    pub fn log(&self, level: Level, message: impl Into<String>) -> Option<Entry> {
        self.entry().log(level, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Option<Entry> {
        self.log(Level::Error, message)
    }

    pub fn warn(&self, message: impl Into<String>) -> Option<Entry> {
        self.log(Level::Warn, message)
    }

    pub fn info(&self, message: impl Into<String>) -> Option<Entry> {
        self.log(Level::Info, message)
    }

    pub fn debug(&self, message: impl Into<String>) -> Option<Entry> {
        self.log(Level::Debug, message)
    }

    pub fn trace(&self, message: impl Into<String>) -> Option<Entry> {
        self.log(Level::Trace, message)
    }
}

/// Fields collected for an entry that has not been logged yet.
pub struct EntryBuilder<'a> {
    logger: &'a Logger,
    fields: Fields,
}

impl<'a> EntryBuilder<'a> {
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_context(self, key: impl Into<String>, ctx: impl Context + 'static) -> Self {
        self.with_field(key, FieldValue::context(ctx))
    }

    pub fn log(self, level: Level, message: impl Into<String>) -> Option<Entry> {
        if !self.logger.is_enabled(level) {
            return None;
        }
        let mut entry = Entry::new(level, message);
        entry.fields = self.fields;
        Some(self.logger.process(entry))
    }

    pub fn error(self, message: impl Into<String>) -> Option<Entry> {
        self.log(Level::Error, message)
    }

    pub fn warn(self, message: impl Into<String>) -> Option<Entry> {
        self.log(Level::Warn, message)
    }

    pub fn info(self, message: impl Into<String>) -> Option<Entry> {
        self.log(Level::Info, message)
    }

    pub fn debug(self, message: impl Into<String>) -> Option<Entry> {
        self.log(Level::Debug, message)
    }

    pub fn trace(self, message: impl Into<String>) -> Option<Entry> {
        self.log(Level::Trace, message)
    }
}
