// src/assemble/toc.rs
// =============================================================================
// This module generates the table of contents for the combined document.
//
// Output looks like:
//
//   # Table of Contents
//
//   - [Intro](#intro)
//     - [Getting Started](#getting-started)
//   - [Details](#details)
//
//   <div class="page-break"></div>
//
// Headings deeper than `max_depth` are left out entirely. Each run writes
// the whole file again; nothing from a previous version is kept.
// =============================================================================

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::docs::DocumentSet;

pub const DEFAULT_MAX_DEPTH: u8 = 3;

// Where the generated TOC goes unless told otherwise
pub const DEFAULT_TOC_PATH: &str = "docs/00-table-of-contents.md";

const TOC_TITLE: &str = "# Table of Contents";
const PAGE_BREAK: &str = "<div class=\"page-break\"></div>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
    pub slug: String,
}

impl TocEntry {
    // "  - [Title](#slug)", two spaces of indent per level below 1
    pub fn line(&self) -> String {
        let indent = "  ".repeat(usize::from(self.level.saturating_sub(1)));
        format!("{}- [{}](#{})", indent, self.title, self.slug)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toc {
    pub entries: Vec<TocEntry>,
}

impl Toc {
    // Collects headings of every document, in document order
    pub fn build(set: &DocumentSet, max_depth: u8) -> Self {
        let entries = set
            .documents()
            .iter()
            .flat_map(|doc| doc.headings())
            .filter(|heading| heading.level <= max_depth)
            .map(|heading| TocEntry {
                level: heading.level,
                title: heading.title.clone(),
                slug: heading.slug.clone(),
            })
            .collect();

        Self { entries }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![TOC_TITLE.to_string(), String::new()];
        lines.extend(self.entries.iter().map(TocEntry::line));
        lines.push(format!("\n{}", PAGE_BREAK));

        let mut rendered = lines.join("\n");
        rendered.push('\n');
        rendered
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(self.render().as_bytes())?;
        out.flush()
    }

    // Replaces the file at `path` with this TOC, creating parent directories
    pub fn write_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create {}", parent.display()))?;
        }
        let file = fs::File::create(path)
            .with_context(|| format!("Cannot write {}", path.display()))?;
        self.write_to(io::BufWriter::new(file))
            .with_context(|| format!("Cannot write {}", path.display()))
    }
}
