// src/docs/mod.rs
// =============================================================================
// This module owns the documents a run works on.
//
// - set: Document / DocumentSet, path resolution and the per-run caches
// - discover: finding markdown files on disk, honoring ignore rules
// =============================================================================

mod discover;
mod set;

pub use discover::{discover, IgnoreRules};
pub use set::{Document, DocumentSet};
