// src/assemble/rewrite.rs
// =============================================================================
// This module rewrites links between chapters into links inside one page.
//
// Once all chapters are concatenated into a single document, a link like
// [Security](02-security.md) points at a file that is no longer there. The
// chapter's title heading is, though, so we point at its anchor instead:
//
//   [Security](02-security.md)  ->  [Security](#security-architecture)
//
// How the anchor is chosen:
// 1. slug of the first "# Title" line of the target file
// 2. no such heading, or the file can't be read: guess from the file name
//    ("03-deployment.md" -> "deployment"), used as-is
//
// A "#fragment" on the link is dropped: "02-security.md#threats" points at
// the chapter title like any other link to that file.
//
// Only the target between the parentheses is replaced. Display text, and
// every link we don't rewrite, stay byte-for-byte the same.
// =============================================================================

use std::path::Path;

use crate::docs::{Document, DocumentSet};
use crate::markdown::{extract_links, LinkKind};

// Returns the document text with inter-chapter links turned into anchors
//
// Left untouched:
//   - http(s), #anchor and mailto: links
//   - relative links whose target doesn't exist or isn't a markdown file
//     (images, source files, ...)
pub fn rewrite_links(doc: &Document, set: &DocumentSet) -> String {
    let text = doc.text();
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;

    for link in extract_links(text) {
        let LinkKind::RelativeFile { path, .. } = &link.kind else {
            continue;
        };
        let Some(anchor) = chapter_anchor(doc, set, path) else {
            continue;
        };

        output.push_str(&text[cursor..link.target_span.start]);
        output.push('#');
        output.push_str(&anchor);
        cursor = link.target_span.end;
    }

    output.push_str(&text[cursor..]);
    output
}

// Anchor a link from `doc` to `path` should use in the combined document,
// or None if the link must be left alone
fn chapter_anchor(doc: &Document, set: &DocumentSet, path: &str) -> Option<String> {
    let target = set.resolve(doc, path);
    if !target.is_file() || !is_markdown(&target) {
        return None;
    }

    Some(
        set.title_anchor(&target)
            .unwrap_or_else(|| fallback_anchor(&target)),
    )
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "md" || ext == "markdown")
}

// Guesses a chapter anchor from its file name
//
// "02-security-architecture.md" -> "security-architecture"
// "appendix.md"                 -> "appendix"
//
// The result is NOT slugified: "03-Deploy_Guide.md" gives "Deploy_Guide",
// which differs from what slugify() would produce for the same words.
pub fn fallback_anchor(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let without_digits = stem.trim_start_matches(|c: char| c.is_ascii_digit());
    let had_prefix = without_digits.len() < stem.len();

    match without_digits.strip_prefix(['-', '_']) {
        Some(rest) if had_prefix => rest.to_string(),
        _ => stem,
    }
}
