// src/checker/validate.rs
// =============================================================================
// This module checks that every relative link in the docs points at a file
// that exists.
//
// Key functionality:
// - Looks at links like [setup](../guide/setup.md#install)
// - Drops the "#install" part, resolves the path, checks the filesystem
// - Collects EVERY failure before returning, so one run shows them all
//
// External links, in-page anchors and mailto: links are not checked here.
//
// Rust concepts:
// - Serialize: the report can be printed as JSON
// - Iterators with flat_map: documents -> their links -> failures
// =============================================================================

use serde::Serialize;
use std::path::PathBuf;

use crate::docs::DocumentSet;
use crate::markdown::{extract_links, LinkKind};

// A link whose target does not exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    /// The document containing the link
    pub source: PathBuf,
    /// The link target exactly as written (not the resolved path), so the
    /// author can search for it
    pub target: String,
}

// Result of validating a DocumentSet
//
// Empty = every relative link resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub broken: Vec<BrokenLink>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.broken.is_empty()
    }

    pub fn len(&self) -> usize {
        self.broken.len()
    }
}

// Validates every relative-file link of every document in the set
//
// Order of the report: document order, then link order inside a document.
pub fn validate(set: &DocumentSet) -> ValidationReport {
    let broken = set
        .documents()
        .iter()
        .flat_map(move |doc| {
            extract_links(doc.text())
                .into_iter()
                .filter_map(move |link| {
                    let LinkKind::RelativeFile { path, .. } = &link.kind else {
                        return None;
                    };
                    if set.resolve(doc, path).exists() {
                        return None;
                    }
                    Some(BrokenLink {
                        source: doc.path().to_path_buf(),
                        target: link.target,
                    })
                })
        })
        .collect();

    ValidationReport { broken }
}
