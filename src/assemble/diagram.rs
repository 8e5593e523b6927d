// src/assemble/diagram.rs
// =============================================================================
// This module swaps mermaid diagrams for rendered images before a PDF build.
//
// The PDF renderer can't draw mermaid, so every
//
//   ```mermaid
//   graph TD; A-->B
//   ```
//
// block is saved to <dir>/<prefix>_diagram_<n>.mmd, rendered to a PNG by a
// DiagramRenderer (mermaid-cli by default), and replaced with
//
//   ![Diagram n](<dir>/<prefix>_diagram_<n>.png)
//
// If rendering fails the block is kept exactly as it was, so the document
// still builds, just with the diagram source instead of a picture.
//
// We use pulldown-cmark to find the blocks: it knows where a fenced block
// really starts and ends, and gives us byte offsets into the original text.
//
// Rust concepts:
// - Traits: DiagramRenderer lets tests plug in a fake renderer
// - std::process::Command: running an external program
// =============================================================================

use anyhow::{bail, Context, Result};
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::process::Command;

// Turns a diagram source file into an image file
pub trait DiagramRenderer {
    fn render(&self, source: &Path, image: &Path) -> Result<()>;
}

// Renders with mermaid-cli (`mmdc`), transparent background, 1200px wide
#[derive(Debug, Clone)]
pub struct MermaidCli {
    pub program: String,
}

impl Default for MermaidCli {
    fn default() -> Self {
        Self {
            program: "mmdc".to_string(),
        }
    }
}

impl DiagramRenderer for MermaidCli {
    fn render(&self, source: &Path, image: &Path) -> Result<()> {
        let output = Command::new(&self.program)
            .arg("-i")
            .arg(source)
            .arg("-o")
            .arg(image)
            .args(["-b", "transparent", "-w", "1200"])
            .output()
            .with_context(|| format!("Could not run {}", self.program))?;

        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

// A fenced mermaid block found in the text
#[derive(Debug, Clone, PartialEq, Eq)]
struct MermaidBlock {
    // Byte range of the whole block, fences included
    span: Range<usize>,
    // Diagram source between the fences
    source: String,
}

// What happened to one diagram
#[derive(Debug)]
pub struct DiagramOutcome {
    /// 1-based position of the diagram in the document
    pub index: usize,
    pub image: PathBuf,
    /// Why rendering failed; None means the block was replaced
    pub error: Option<String>,
}

impl DiagramOutcome {
    pub fn is_converted(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug)]
pub struct Conversion {
    pub text: String,
    pub diagrams: Vec<DiagramOutcome>,
}

impl Conversion {
    pub fn converted_count(&self) -> usize {
        self.diagrams.iter().filter(|d| d.is_converted()).count()
    }
}

// Replaces every mermaid block of `text` with an image reference
//
// Parameters:
//   output_dir: where .mmd and .png files are written (created if missing)
//   prefix: file name prefix, usually the chapter name
//
// Returns: an error only when the diagram source can't be written to disk;
// a renderer failure is recorded in the outcome and the block kept.
pub fn convert_diagrams(
    text: &str,
    output_dir: &Path,
    prefix: &str,
    renderer: &dyn DiagramRenderer,
) -> Result<Conversion> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Cannot create {}", output_dir.display()))?;

    let mut output = String::with_capacity(text.len());
    let mut diagrams = Vec::new();
    let mut cursor = 0;

    for (i, block) in find_mermaid_blocks(text).into_iter().enumerate() {
        let index = i + 1;
        let source_file = output_dir.join(format!("{}_diagram_{}.mmd", prefix, index));
        let image = output_dir.join(format!("{}_diagram_{}.png", prefix, index));

        fs::write(&source_file, &block.source)
            .with_context(|| format!("Cannot write {}", source_file.display()))?;

        output.push_str(&text[cursor..block.span.start]);
        match renderer.render(&source_file, &image) {
            Ok(()) => {
                output.push_str(&format!("![Diagram {}]({})", index, image.display()));
                diagrams.push(DiagramOutcome { index, image, error: None });
            }
            Err(e) => {
                output.push_str(&text[block.span.clone()]);
                diagrams.push(DiagramOutcome {
                    index,
                    image,
                    error: Some(format!("{:#}", e)),
                });
            }
        }
        cursor = block.span.end;
    }

    output.push_str(&text[cursor..]);
    Ok(Conversion { text: output, diagrams })
}

// Finds fenced code blocks whose info string starts with "mermaid"
fn find_mermaid_blocks(text: &str) -> Vec<MermaidBlock> {
    let mut blocks = Vec::new();

    // Some((start, source so far)) while inside a mermaid block
    let mut current: Option<(usize, String)> = None;

    for (event, range) in Parser::new(text).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                if info.split_whitespace().next() == Some("mermaid") =>
            {
                current = Some((range.start, String::new()));
            }
            Event::Text(content) => {
                if let Some((_, source)) = current.as_mut() {
                    source.push_str(&content);
                }
            }
            Event::End(Tag::CodeBlock(_)) => {
                if let Some((start, mut source)) = current.take() {
                    // The block's range may run past the closing fence's newline
                    let end = start + text[start..range.end].trim_end_matches(['\n', '\r']).len();
                    if source.ends_with('\n') {
                        source.pop();
                    }
                    blocks.push(MermaidBlock {
                        span: start..end,
                        source,
                    });
                }
            }
            _ => {}
        }
    }

    blocks
}
