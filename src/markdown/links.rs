// src/markdown/links.rs
// =============================================================================
// This module extracts links from Markdown text.
//
// A link looks like [display text](target). We match it with a simple,
// non-nested regular expression: a "(" inside the target ends the match
// early, and that is the documented behavior.
//
// Each link is classified by its target:
//   http..., https...  -> External
//   #section           -> Anchor
//   mailto:...         -> Mailto
//   anything else      -> RelativeFile (a path, maybe with "#fragment")
//
// Rust concepts:
// - Enums with data: RelativeFile carries the path and fragment
// - Ranges: we remember where the target sits in the text so the rewriter
//   can replace exactly that slice
// =============================================================================

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("link pattern is valid")
    })
}

// What kind of place a link points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// http:// or https:// (anything starting with "http")
    External,
    /// #section in the same document
    Anchor,
    /// mailto:someone@example.com
    Mailto,
    /// A filesystem path, relative or rooted ("/docs/a.md")
    RelativeFile {
        /// Path component, never empty
        path: String,
        /// Text after the first '#', if the target had one
        fragment: Option<String>,
    },
}

// One [text](target) occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    pub text: String,
    pub target: String,
    pub kind: LinkKind,
    /// Byte range of `target` inside the scanned text
    pub target_span: Range<usize>,
}

// Extracts every markdown link, in order of appearance
//
// Example input:
//   "See [the docs](02-security.md#threats) or [Rust](https://rust-lang.org)"
//
// Example output (kinds):
//   RelativeFile { path: "02-security.md", fragment: Some("threats") }, External
pub fn extract_links(text: &str) -> Vec<LinkOccurrence> {
    link_pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            let display = caps.get(1)?;
            let target = caps.get(2)?;
            Some(LinkOccurrence {
                text: display.as_str().to_string(),
                target: target.as_str().to_string(),
                kind: classify_target(target.as_str()),
                target_span: target.range(),
            })
        })
        .collect()
}

// Decides which LinkKind a raw target string belongs to
pub fn classify_target(target: &str) -> LinkKind {
    if target.starts_with("http") {
        return LinkKind::External;
    }
    if target.starts_with('#') {
        return LinkKind::Anchor;
    }
    if target.starts_with("mailto:") {
        return LinkKind::Mailto;
    }

    // Everything from the first '#' onward is the fragment
    let (path, fragment) = match target.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment.to_string())),
        None => (target, None),
    };

    // "[x]()" has nothing to resolve, treat it like an in-page anchor
    if path.is_empty() {
        return LinkKind::Anchor;
    }

    LinkKind::RelativeFile {
        path: path.to_string(),
        fragment,
    }
}
