//! Hooks shipped with this crate.

pub mod config;
pub mod context_hook;

pub use config::*;
pub use context_hook::*;
