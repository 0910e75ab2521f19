//! Minimal structured logging pipeline.
//!
//! Entries carry a map of typed fields; registered hooks may rewrite those
//! fields before the entry is rendered through the `log` facade.

pub mod entry;
pub mod hook;
pub mod logger;

pub use entry::*;
pub use hook::*;
pub use logger::*;
