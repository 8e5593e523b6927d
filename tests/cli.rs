use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// End-to-end tests for the doc-xref binary
///
/// Each test builds a small documentation tree in a temp dir and runs one
/// subcommand against it.
struct DocsTree {
    dir: TempDir,
}

impl DocsTree {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, relative: &str, text: &str) -> &Self {
        let path = self.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
        self
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("doc-xref").expect("binary is built");
        cmd.current_dir(self.path());
        cmd
    }
}

#[test]
fn test_check_passes_when_all_links_resolve() {
    let tree = DocsTree::new();
    tree.write("README.md", "[docs](docs/01-intro.md)\n")
        .write("docs/01-intro.md", "# Intro\n[next](02-security.md#threats) [root](/README.md)\n")
        .write("docs/02-security.md", "# Security\n");

    tree.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No broken links found."));
}

#[test]
fn test_check_reports_every_broken_link_and_fails() {
    let tree = DocsTree::new();
    tree.write("docs/a.md", "[one](missing.md) [two](../gone.md#x)\n")
        .write("docs/b.md", "[three](/nowhere.md)\n");

    tree.cmd()
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Found broken links:"))
        .stdout(predicate::str::contains("docs/a.md -> missing.md"))
        .stdout(predicate::str::contains("docs/a.md -> ../gone.md#x"))
        .stdout(predicate::str::contains("docs/b.md -> /nowhere.md"));
}

#[test]
fn test_check_skips_ignored_files_and_dirs() {
    let tree = DocsTree::new();
    tree.write("CHANGELOG.md", "[old](v0.md)\n")
        .write("node_modules/pkg/README.md", "[x](y.md)\n")
        .write("drafts/wip.md", "[todo](later.md)\n")
        .write("docs/ok.md", "# Ok\n");

    tree.cmd()
        .args(["check", ".", "--ignore-dir", "drafts"])
        .assert()
        .success();

    tree.cmd()
        .args(["check", ".", "--no-default-ignores"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CHANGELOG.md -> v0.md"));
}

#[test]
fn test_check_json_output() {
    let tree = DocsTree::new();
    tree.write("a.md", "[b](b.md)\n");

    let output = tree.cmd().args(["check", "--json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["broken"][0]["target"], "b.md");
}

#[test]
fn test_rewrite_prints_rewritten_chapters_in_order() {
    let tree = DocsTree::new();
    tree.write("A.md", "# Intro\n\n[see](B.md) and [web](https://example.com)\n")
        .write("B.md", "# Details\n\n[back](A.md) [deploy](03-deployment.md)\n")
        .write("03-deployment.md", "no title\n");

    tree.cmd()
        .args(["rewrite", "A.md", "B.md"])
        .assert()
        .success()
        .stdout(
            "# Intro\n\n[see](#details) and [web](https://example.com)\n\
             # Details\n\n[back](#intro) [deploy](#deployment)\n",
        );
}

#[test]
fn test_rewrite_fails_on_unreadable_input() {
    let tree = DocsTree::new();
    tree.write("A.md", "# Intro\n");

    tree.cmd()
        .args(["rewrite", "A.md", "missing.md"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error processing missing.md"));
}

#[test]
fn test_toc_writes_default_location() {
    let tree = DocsTree::new();
    tree.write("A.md", "# Intro\n#### Too deep\n")
        .write("B.md", "# Details\n## Setup\n");

    tree.cmd()
        .args(["toc", "A.md", "missing.md", "B.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains("missing.md does not exist; skipping"));

    let toc = fs::read_to_string(tree.path().join("docs/00-table-of-contents.md")).unwrap();
    assert_eq!(
        toc,
        "# Table of Contents\n\n\
         - [Intro](#intro)\n\
         - [Details](#details)\n  - [Setup](#setup)\n\
         \n<div class=\"page-break\"></div>\n"
    );
}

#[test]
fn test_toc_custom_output_and_depth() {
    let tree = DocsTree::new();
    tree.write("A.md", "# Intro\n## Sub\n");

    tree.cmd()
        .args(["toc", "A.md", "--output", "out/toc.md", "--max-depth", "1"])
        .assert()
        .success();

    let toc = fs::read_to_string(tree.path().join("out/toc.md")).unwrap();
    assert!(toc.contains("- [Intro](#intro)"));
    assert!(!toc.contains("Sub"));
}

#[test]
fn test_wrong_argument_count_prints_usage() {
    let tree = DocsTree::new();

    tree.cmd()
        .args(["diagrams", "in.md", "out.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));

    tree.cmd()
        .arg("toc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_diagrams_keep_block_when_renderer_is_missing() {
    let tree = DocsTree::new();
    let text = "# Arch\n\n```mermaid\ngraph TD\n  A-->B\n```\n";
    tree.write("arch.md", text);

    tree.cmd()
        .args([
            "diagrams",
            "arch.md",
            "out.md",
            "img",
            "arch",
            "--mmdc",
            "definitely-not-a-real-mmdc-binary",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to convert diagram 1"));

    assert_eq!(fs::read_to_string(tree.path().join("out.md")).unwrap(), text);
    assert!(tree.path().join("img/arch_diagram_1.mmd").exists());
}

#[test]
fn test_diagrams_missing_input() {
    let tree = DocsTree::new();

    tree.cmd()
        .args(["diagrams", "nope.md", "out.md", "img", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input file not found"));
}
