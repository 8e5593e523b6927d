// src/assemble/mod.rs
// =============================================================================
// Steps that prepare chapters for concatenation into one combined document.
//
// Submodules:
// - rewrite: [text](other-chapter.md) -> [text](#chapter-title)
// - toc: generated table of contents with anchor links
// - diagram: mermaid blocks -> rendered image references
// =============================================================================

mod diagram;
mod rewrite;
mod toc;

pub use diagram::{convert_diagrams, MermaidCli};
pub use rewrite::rewrite_links;
pub use toc::{Toc, DEFAULT_MAX_DEPTH, DEFAULT_TOC_PATH};
