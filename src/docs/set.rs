// src/docs/set.rs
// =============================================================================
// The documents of one run, loaded once and shared read-only by every
// component.
//
// A Document is identified by its (lexically normalized) path. Its headings
// are computed on first use and cached.
//
// The DocumentSet also remembers, per resolved target path, which anchor a
// link to that file should point at. The rewriter asks for the same target
// many times when several chapters link to it; each file is read at most once.
//
// Rust concepts:
// - OnceCell: lazily computed, then immutable, field
// - RefCell: interior mutability for a cache behind a shared reference
// - Path / PathBuf: borrowed vs owned filesystem paths
// =============================================================================

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::markdown::{index_headings, Heading};

#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    text: String,
    headings: OnceCell<Vec<Heading>>,
}

impl Document {
    pub fn new(path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            text: text.into(),
            headings: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    // Directory that relative links in this document are resolved against
    pub fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    pub fn headings(&self) -> &[Heading] {
        self.headings.get_or_init(|| index_headings(&self.text))
    }

    // Slug of the first level-1 heading, if the document has one
    pub fn title_slug(&self) -> Option<&str> {
        first_title_slug(self.headings())
    }
}

fn first_title_slug(headings: &[Heading]) -> Option<&str> {
    headings
        .iter()
        .find(|heading| heading.level == 1)
        .map(|heading| heading.slug.as_str())
}

#[derive(Debug)]
pub struct DocumentSet {
    base_dir: PathBuf,
    documents: Vec<Document>,
    // resolved target path -> slug of its first level-1 heading
    // (None = unreadable or no level-1 heading)
    title_anchors: RefCell<HashMap<PathBuf, Option<String>>>,
}

impl DocumentSet {
    pub fn new(base_dir: impl AsRef<Path>, documents: Vec<Document>) -> Self {
        Self {
            base_dir: normalize_path(base_dir.as_ref()),
            documents,
            title_anchors: RefCell::new(HashMap::new()),
        }
    }

    // Reads every path into a Document
    //
    // A file that can't be read is reported on stderr and left out of the
    // set; the run continues with the rest.
    pub fn load(base_dir: impl AsRef<Path>, paths: &[PathBuf]) -> Self {
        let mut documents = Vec::with_capacity(paths.len());

        for path in paths {
            match fs::read_to_string(path) {
                Ok(text) => documents.push(Document::new(path, text)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    eprintln!("Warning: {} does not exist; skipping", path.display());
                }
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    eprintln!(
                        "Warning: Could not read {} as UTF-8. Skipping.",
                        path.display()
                    );
                }
                Err(e) => {
                    eprintln!("Warning: Could not read {}: {}. Skipping.", path.display(), e);
                }
            }
        }

        Self::new(base_dir, documents)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, path: &Path) -> Option<&Document> {
        let path = normalize_path(path);
        self.documents.iter().find(|doc| doc.path == path)
    }

    // Resolves the path component of a link found in `source`
    //
    // "/docs/a.md" is rooted: it is looked up under the base directory.
    // Anything else is relative to the source document's own directory.
    pub fn resolve(&self, source: &Document, link_path: &str) -> PathBuf {
        let joined = if link_path.starts_with('/') {
            self.base_dir.join(link_path.trim_start_matches('/'))
        } else {
            source.dir().join(link_path)
        };
        normalize_path(&joined)
    }

    // Anchor of the first level-1 heading in the file at `target`
    //
    // Documents in the set use their cached headings; other files are read
    // from disk once and remembered.
    pub fn title_anchor(&self, target: &Path) -> Option<String> {
        let target = normalize_path(target);

        if let Some(cached) = self.title_anchors.borrow().get(&target) {
            return cached.clone();
        }

        let anchor = match self.get(&target) {
            Some(doc) => doc.title_slug().map(str::to_string),
            None => fs::read_to_string(&target)
                .ok()
                .and_then(|text| first_title_slug(&index_headings(&text)).map(str::to_string)),
        };

        self.title_anchors
            .borrow_mut()
            .insert(target, anchor.clone());
        anchor
    }
}

// Collapses "." and ".." without touching the filesystem
//
// Example:
//   "docs/guide/../api/./index.md" -> "docs/api/index.md"
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // ".." at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
