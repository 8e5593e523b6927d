// src/docs/discover.rs
// =============================================================================
// This module finds the markdown files of a documentation tree.
//
// How it works (breadth-first, like a crawl queue):
// 1. Start with the root directory in a queue
// 2. List its entries
// 3. Sub-directories go back into the queue unless their name is ignored
// 4. ".md" files are collected unless their name is ignored
// 5. Repeat until the queue is empty
//
// The ignore lists are configuration (see IgnoreRules), not hard-coded here.
//
// Rust concepts:
// - VecDeque: queue of directories still to visit
// - BTreeSet: ignore lists with a stable iteration order
// =============================================================================

use anyhow::{Context, Result};
use std::collections::{BTreeSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

// Directory names skipped by default: tooling, dependencies and build output
pub const DEFAULT_IGNORED_DIRS: &[&str] =
    &[".git", ".github", "node_modules", "scripts", "build", "dist"];

// File names skipped by default: their links point at other projects
pub const DEFAULT_IGNORED_FILES: &[&str] = &["CHANGELOG.md", "CONTRIBUTING.md"];

// Which directories and files the link checker leaves alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRules {
    /// Directory names (not paths) that are never entered
    pub dirs: BTreeSet<String>,
    /// File names (not paths) that are never scanned
    pub files: BTreeSet<String>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            dirs: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            files: DEFAULT_IGNORED_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IgnoreRules {
    pub fn empty() -> Self {
        Self {
            dirs: BTreeSet::new(),
            files: BTreeSet::new(),
        }
    }

    // Adds extra names on top of the current lists
    pub fn extend(mut self, dirs: &[String], files: &[String]) -> Self {
        self.dirs.extend(dirs.iter().cloned());
        self.files.extend(files.iter().cloned());
        self
    }

    fn skips_dir(&self, path: &Path) -> bool {
        file_name(path).is_some_and(|name| self.dirs.contains(name))
    }

    fn skips_file(&self, path: &Path) -> bool {
        file_name(path).is_some_and(|name| self.files.contains(name))
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

// Collects every markdown file under `root`, sorted by path
//
// Returns: an error only if `root` itself can't be listed. Sub-directories
// that can't be read are reported and skipped.
pub fn discover(root: &Path, rules: &IgnoreRules) -> Result<Vec<PathBuf>> {
    let mut queue = VecDeque::new();
    queue.push_back(root.to_path_buf());

    let mut found = Vec::new();

    while let Some(dir) = queue.pop_front() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if dir == root => {
                return Err(e).with_context(|| format!("Cannot list {}", root.display()));
            }
            Err(e) => {
                eprintln!("Warning: Could not list {}: {}", dir.display(), e);
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                if !rules.skips_dir(&path) {
                    queue.push_back(path);
                }
            } else if is_markdown(&path) && !rules.skips_file(&path) {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}
