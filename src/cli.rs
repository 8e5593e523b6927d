// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// One binary, one subcommand per step of the docs build:
//   check     - find relative links that point at missing files
//   rewrite   - turn chapter-to-chapter links into in-document anchors
//   toc       - generate the table of contents
//   diagrams  - render mermaid blocks to images
//
// Missing or extra positional arguments are rejected by clap with a usage
// message and a non-zero exit code before any of our code runs.
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::assemble::{DEFAULT_MAX_DEPTH, DEFAULT_TOC_PATH};

#[derive(Parser, Debug)]
#[command(
    name = "doc-xref",
    version = "0.1.0",
    about = "Keeps cross-references valid while assembling multi-file markdown docs",
    long_about = "doc-xref checks relative links in a documentation tree, rewrites links between \
                  chapters into anchors for a combined document, and generates a table of contents \
                  whose anchors match the renderer's heading identifiers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every relative link in a documentation tree
    ///
    /// Example: doc-xref check . --ignore-dir drafts
    Check {
        /// Root of the documentation tree; rooted links ("/docs/a.md")
        /// resolve against it
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output the report in JSON format
        #[arg(long)]
        json: bool,

        /// Directory name to skip (repeatable), added to the defaults
        #[arg(long = "ignore-dir", value_name = "NAME")]
        ignore_dirs: Vec<String>,

        /// File name to skip (repeatable), added to the defaults
        #[arg(long = "ignore-file", value_name = "NAME")]
        ignore_files: Vec<String>,

        /// Don't skip .git, node_modules, build, CHANGELOG.md, ... by default
        #[arg(long)]
        no_default_ignores: bool,
    },

    /// Print chapters with inter-chapter links rewritten to anchors
    ///
    /// Example: doc-xref rewrite docs/01-intro.md docs/02-security.md >> combined.md
    Rewrite {
        /// Chapters to rewrite, printed in this order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory that rooted links ("/docs/a.md") resolve against
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
    },

    /// Generate a table of contents from chapter headings
    ///
    /// Example: doc-xref toc docs/01-intro.md docs/02-security.md
    Toc {
        /// Chapters in the order they appear in the combined document
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Where to write the table of contents (replaced on every run)
        #[arg(long, short, default_value = DEFAULT_TOC_PATH)]
        output: PathBuf,

        /// Deepest heading level to include
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH,
              value_parser = clap::value_parser!(u8).range(1..=6))]
        max_depth: u8,
    },

    /// Render mermaid diagrams to PNG and reference the images instead
    ///
    /// Example: doc-xref diagrams docs/02-arch.md build/02-arch.md build/img arch
    Diagrams {
        /// Markdown file to read
        input: PathBuf,

        /// Markdown file to write
        output: PathBuf,

        /// Directory for the .mmd and .png files
        output_dir: PathBuf,

        /// File name prefix for generated diagrams
        prefix: String,

        /// mermaid-cli executable
        #[arg(long, default_value = "mmdc")]
        mmdc: String,
    },
}
