// src/markdown/mod.rs
// =============================================================================
// Text-level markdown helpers shared by every command.
//
// Submodules:
// - slug: heading title -> anchor identifier, with per-document uniqueness
// - headings: finds "# Title" lines and resolves their slugs
// - links: finds [text](target) links and classifies their targets
//
// None of these functions can fail: text that doesn't match a pattern is
// simply skipped.
// =============================================================================

mod headings;
mod links;
mod slug;

pub use headings::{index_headings, Heading};
pub use links::{extract_links, LinkKind};
