// src/markdown/slug.rs
// =============================================================================
// This module turns heading titles into anchor identifiers ("slugs").
//
// The combined document is rendered by pandoc, which gives every heading an
// identifier. Our table of contents and rewritten links point at those
// identifiers, so this algorithm has to produce the same string pandoc does:
//
//   "Security Architecture" -> "security-architecture"
//   "Hello, World!"         -> "hello-world"
//
// If the renderer's scheme ever changes, `slugify` is the only function that
// needs to follow it.
//
// Rust concepts:
// - chars(): iterating over Unicode scalar values of a &str
// - HashMap / HashSet: tracking which slugs a document already uses
// =============================================================================

use std::collections::{HashMap, HashSet};

// Identifier used when a title has no characters left after stripping
// (e.g. a heading made only of punctuation). Pandoc uses the same word.
const EMPTY_SLUG: &str = "section";

// Converts a heading title into its canonical anchor identifier
//
// Steps:
//   1. trim surrounding whitespace
//   2. lowercase
//   3. drop everything that is not a-z, 0-9, whitespace or '-'
//   4. collapse each run of whitespace/hyphens into a single '-'
//
// Example:
//   slugify("  Multiple   Spaces  ") == "multiple-spaces"
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut in_separator_run = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() || ch == '-' {
            if !in_separator_run {
                slug.push('-');
                in_separator_run = true;
            }
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
            in_separator_run = false;
        }
        // Anything else (punctuation, non-ASCII letters) is dropped and does
        // not break a separator run: "a - b" and "a -- b" both give "a-b"
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

// Per-document slug registry
//
// Two headings with the same title would get the same slug, which makes the
// second one unreachable. The table hands out `setup`, then `setup-1`,
// `setup-2`, ... skipping any suffix that is already taken (a heading may be
// literally titled "Setup 1").
//
// All heading levels of a document share one table.
#[derive(Debug, Default)]
pub struct SlugTable {
    // Every slug handed out so far
    used: HashSet<String>,
    // base slug -> how many times it has been requested
    counts: HashMap<String, usize>,
}

impl SlugTable {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns the unique slug for the next heading with this title
    pub fn assign(&mut self, title: &str) -> String {
        let base = slugify(title);
        let count = self.counts.entry(base.clone()).or_insert(0);

        let mut candidate = if *count == 0 && !self.used.contains(&base) {
            base.clone()
        } else {
            format!("{}-{}", base, (*count).max(1))
        };

        let mut suffix = (*count).max(1);
        while self.used.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}-{}", base, suffix);
        }

        *count += 1;
        self.used.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        let title = "Security Architecture (v2)";
        assert_eq!(slugify(title), slugify(title));
        assert_eq!(slugify(title), "security-architecture-v2");
    }

    #[test]
    fn test_slugify_collapses_hyphen_runs() {
        assert_eq!(slugify("Build -- Deploy"), "build-deploy");
        assert_eq!(slugify("a - b"), "a-b");
    }

    #[test]
    fn test_slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café Menu"), "caf-menu");
    }

    #[test]
    fn test_slugify_keeps_digits() {
        assert_eq!(slugify("Step 2: Install"), "step-2-install");
    }

    #[test]
    fn test_slugify_empty_title_falls_back() {
        assert_eq!(slugify("!!!"), "section");
        assert_eq!(slugify("   "), "section");
    }

    #[test]
    fn test_table_disambiguates_repeated_titles() {
        let mut table = SlugTable::new();
        assert_eq!(table.assign("Setup"), "setup");
        assert_eq!(table.assign("Setup"), "setup-1");
        assert_eq!(table.assign("Setup"), "setup-2");
    }

    #[test]
    fn test_table_skips_suffix_taken_by_literal_title() {
        let mut table = SlugTable::new();
        assert_eq!(table.assign("Setup 1"), "setup-1");
        assert_eq!(table.assign("Setup"), "setup");
        assert_eq!(table.assign("Setup"), "setup-2");
    }

    #[test]
    fn test_table_titles_differing_only_in_punctuation_collide() {
        let mut table = SlugTable::new();
        assert_eq!(table.assign("Usage"), "usage");
        assert_eq!(table.assign("Usage!"), "usage-1");
    }
}
