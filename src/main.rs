// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Print results
// 4. Exit with proper code (0 = success, 1 = broken links / failed step,
//    2 = unexpected error)
//
// Everything below runs synchronously: each command reads its documents
// once, processes them in order, and exits.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod assemble; // src/assemble/ - link rewriting, TOC, diagrams
mod checker; // src/checker/ - link validation
mod cli; // src/cli.rs - command-line parsing
mod docs; // src/docs/ - documents, document sets, discovery
mod markdown; // src/markdown/ - headings, slugs, links

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cli::{Cli, Commands};
use docs::{Document, DocumentSet, IgnoreRules};

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            root,
            json,
            ignore_dirs,
            ignore_files,
            no_default_ignores,
        } => {
            let base = if no_default_ignores {
                IgnoreRules::empty()
            } else {
                IgnoreRules::default()
            };
            let rules = base.extend(&ignore_dirs, &ignore_files);
            handle_check(&root, json, &rules)
        }
        Commands::Rewrite { files, base_dir } => handle_rewrite(&files, &base_dir),
        Commands::Toc {
            files,
            output,
            max_depth,
        } => handle_toc(&files, &output, max_depth),
        Commands::Diagrams {
            input,
            output,
            output_dir,
            prefix,
            mmdc,
        } => handle_diagrams(&input, &output, &output_dir, &prefix, mmdc),
    }
}

// Handles the 'check' subcommand
//
// Every markdown file under `root` is scanned; the report lists every
// broken link at once, and only then do we decide the exit code.
fn handle_check(root: &Path, json: bool, rules: &IgnoreRules) -> Result<i32> {
    if !json {
        println!("🔍 Checking links in: {}", root.display());
    }

    let paths = docs::discover(root, rules)?;
    let set = DocumentSet::load(root, &paths);

    if !json {
        println!("📄 Found {} file(s) to scan", set.documents().len());
    }

    let report = checker::validate(&set);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_ok() {
        println!("No broken links found.");
    } else {
        println!("Found broken links:");
        for broken in &report.broken {
            println!("{} -> {}", broken.source.display(), broken.target);
        }
        println!();
        println!("❌ Broken: {}", report.len());
    }

    Ok(if report.is_ok() { 0 } else { 1 })
}

// Handles the 'rewrite' subcommand
//
// Stdout carries the rewritten chapters and nothing else, so the output can
// be appended straight into the combined document.
fn handle_rewrite(files: &[PathBuf], base_dir: &Path) -> Result<i32> {
    // These files were asked for by name: failing to read one fails the step
    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        match fs::read_to_string(path) {
            Ok(text) => documents.push(Document::new(path, text)),
            Err(e) => {
                eprintln!("Error processing {}: {}", path.display(), e);
                return Ok(1);
            }
        }
    }

    let set = DocumentSet::new(base_dir, documents);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for doc in set.documents() {
        out.write_all(assemble::rewrite_links(doc, &set).as_bytes())?;
    }
    out.flush()?;

    Ok(0)
}

// Handles the 'toc' subcommand
//
// Chapters that don't exist are warned about and skipped.
fn handle_toc(files: &[PathBuf], output: &Path, max_depth: u8) -> Result<i32> {
    let set = DocumentSet::load(".", files);
    let toc = assemble::Toc::build(&set, max_depth);

    toc.write_file(output)?;

    println!(
        "📝 Wrote {} entr{} from {} file(s) to {}",
        toc.entries.len(),
        if toc.entries.len() == 1 { "y" } else { "ies" },
        set.documents().len(),
        output.display()
    );
    Ok(0)
}

// Handles the 'diagrams' subcommand
fn handle_diagrams(
    input: &Path,
    output: &Path,
    output_dir: &Path,
    prefix: &str,
    mmdc: String,
) -> Result<i32> {
    if !input.exists() {
        eprintln!("Error: Input file not found: {}", input.display());
        return Ok(1);
    }

    let text = fs::read_to_string(input)
        .with_context(|| format!("Cannot read {}", input.display()))?;

    let renderer = assemble::MermaidCli { program: mmdc };
    let conversion = assemble::convert_diagrams(&text, output_dir, prefix, &renderer)?;

    for diagram in &conversion.diagrams {
        match &diagram.error {
            None => println!(
                "Converted diagram {}: {}",
                diagram.index,
                diagram.image.display()
            ),
            Some(error) => eprintln!(
                "Warning: Failed to convert diagram {}: {}",
                diagram.index, error
            ),
        }
    }

    fs::write(output, &conversion.text)
        .with_context(|| format!("Cannot write {}", output.display()))?;

    println!(
        "Converted {} of {} Mermaid diagram(s)",
        conversion.converted_count(),
        conversion.diagrams.len()
    );
    Ok(0)
}
