// src/markdown/headings.rs
// =============================================================================
// This module finds the headings of a markdown document.
//
// We scan line by line with a regular expression instead of building a full
// markdown tree. The renderer and our TOC only care about ATX headings
// ("# Title", "## Title", ...), and a line scan is what the rest of the docs
// tooling has always done.
//
// Known limitation: a line starting with "#" inside a fenced code block is
// reported as a heading too. See test_headings_inside_code_fence_are_reported.
//
// Rust concepts:
// - OnceLock: compile a Regex once and reuse it for every call
// - Captures: pulling groups out of a regex match
// =============================================================================

use regex::Regex;
use std::sync::OnceLock;

use super::slug::SlugTable;

// One to six '#', at least one whitespace, then the title (trailing
// whitespace excluded)
fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(#{1,6})\s+(.+?)\s*$").expect("heading pattern is valid")
    })
}

// A heading line as it appears in the text, before any slug is derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMarker {
    pub level: u8,
    pub title: String,
}

// A heading with its resolved anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1 for "#", up to 6 for "######"
    pub level: u8,
    /// Title text, trimmed
    pub title: String,
    /// Anchor identifier, unique within the owning document
    pub slug: String,
    /// Position among the document's headings (0-based)
    pub occurrence: usize,
}

// Scans text for heading lines, in document order
//
// Lines that don't look like a heading are ignored, so this never fails.
pub fn scan_headings(text: &str) -> Vec<HeadingMarker> {
    let pattern = heading_pattern();

    text.lines()
        .filter_map(|line| {
            let caps = pattern.captures(line)?;
            let title = caps[2].trim();
            if title.is_empty() {
                return None;
            }
            Some(HeadingMarker {
                level: caps[1].len() as u8,
                title: title.to_string(),
            })
        })
        .collect()
}

// Scans text for headings and gives each one its per-document slug
//
// Every consumer (TOC, rewriter) goes through here, so a heading always gets
// the same anchor no matter who asks for it.
pub fn index_headings(text: &str) -> Vec<Heading> {
    let mut table = SlugTable::new();

    scan_headings(text)
        .into_iter()
        .enumerate()
        .map(|(occurrence, marker)| Heading {
            slug: table.assign(&marker.title),
            level: marker.level,
            title: marker.title,
            occurrence,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_levels_and_titles() {
        let text = "# Intro\nSome text\n## Getting Started  \n### Deep dive\n";
        let headings = scan_headings(text);
        assert_eq!(
            headings,
            vec![
                HeadingMarker { level: 1, title: "Intro".to_string() },
                HeadingMarker { level: 2, title: "Getting Started".to_string() },
                HeadingMarker { level: 3, title: "Deep dive".to_string() },
            ]
        );
    }

    #[test]
    fn test_scan_requires_space_after_hashes() {
        let headings = scan_headings("#NoSpace\n#\n##   \n####### seven\n");
        assert!(headings.is_empty());
    }

    #[test]
    fn test_scan_ignores_indented_and_inline_hashes() {
        let headings = scan_headings("Issue #12 is open\n  # indented\n");
        assert!(headings.is_empty());
    }

    #[test]
    fn test_scan_handles_crlf() {
        let headings = scan_headings("# Windows\r\nbody\r\n");
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].title, "Windows");
    }

    #[test]
    fn test_headings_inside_code_fence_are_reported() {
        // Documented limitation: no fence awareness
        let text = "# Real\n```bash\n# install deps\n```\n";
        let titles: Vec<_> = scan_headings(text).into_iter().map(|h| h.title).collect();
        assert_eq!(titles, vec!["Real", "install deps"]);
    }

    #[test]
    fn test_index_assigns_unique_slugs_across_levels() {
        let text = "# Setup\n## Setup\n### Other\n## Setup\n";
        let slugs: Vec<_> = index_headings(text).into_iter().map(|h| h.slug).collect();
        assert_eq!(slugs, vec!["setup", "setup-1", "other", "setup-2"]);
    }

    #[test]
    fn test_index_records_occurrence() {
        let headings = index_headings("# A\n## B\n");
        assert_eq!(headings[0].occurrence, 0);
        assert_eq!(headings[1].occurrence, 1);
        assert_eq!(headings[1].level, 2);
    }
}
