//! Inspect command implementation.
//!
//! Prints how each cell of a notebook resolves: kind, visibility, language
//! and which transform each output selects.

use std::path::Path;
use std::sync::Arc;

use nbrender_core::{
    CellView, MarkdownPipeline, NotebookRenderer, RenderConfig, RenderDescriptor,
    TransformRegistry, select_transform,
};

use crate::colors;

/// Execute the inspect command.
pub fn execute(notebook_path: &Path) -> anyhow::Result<()> {
    if !notebook_path.exists() {
        anyhow::bail!("Notebook not found: {}", notebook_path.display());
    }

    let document = nbrender_ipynb::read_notebook(notebook_path)?;
    let renderer = NotebookRenderer::with_document(RenderConfig::new(), Arc::new(document));
    let pass = renderer.render()?;

    println!(
        "\n{}nbrender inspect{} - {}{}{}",
        colors::BOLD,
        colors::RESET,
        colors::CYAN,
        notebook_path.display(),
        colors::RESET
    );
    println!("{}", "─".repeat(50));
    println!(
        "language: {}{}{}   cells: {}",
        colors::BLUE,
        pass.language,
        colors::RESET,
        pass.cells.len()
    );
    println!();

    let markdown = MarkdownPipeline::new();
    for (index, descriptor) in pass.cells.iter().enumerate() {
        println!("{}", describe(index + 1, descriptor, renderer.registry(), &markdown));
    }

    Ok(())
}

/// One summary line per cell, plus one line per code cell output.
fn describe(
    position: usize,
    descriptor: &RenderDescriptor,
    registry: &TransformRegistry,
    markdown: &MarkdownPipeline,
) -> String {
    let header = format!(
        "{}{:>3}{} {:<9}",
        colors::DIM,
        position,
        colors::RESET,
        descriptor.kind().as_str()
    );

    match &descriptor.view {
        CellView::Code {
            execution_count,
            visibility,
            outputs,
            ..
        } => {
            let prompt = execution_count
                .map(|n| format!("[{}]", n))
                .unwrap_or_else(|| "[ ]".to_string());
            let source = if visibility.source_hidden {
                "hidden"
            } else {
                "shown"
            };
            let output_state = match (visibility.output_hidden, visibility.output_expanded) {
                (true, _) => "hidden",
                (false, true) => "expanded",
                (false, false) => "collapsed",
            };

            let mut line = format!(
                "{} {:<5} source:{} outputs:{} ({})",
                header,
                prompt,
                source,
                outputs.len(),
                output_state
            );

            for output in outputs.iter() {
                let target = match select_transform(output, registry) {
                    Some(selected) => {
                        format!("{}{}{}", colors::GREEN, selected.mime_type, colors::RESET)
                    }
                    None if output.bundle().is_some() => {
                        format!("{}not rendered{}", colors::YELLOW, colors::RESET)
                    }
                    None => output.output_type().to_string(),
                };
                line.push_str(&format!("\n      {} → {}", output.output_type(), target));
            }

            line
        }
        CellView::Markdown { source } => {
            let math = markdown.math_spans(source).len();
            format!("{} {} lines, {} math spans", header, source.lines().count(), math)
        }
        CellView::Raw { source } => {
            format!("{} {} lines", header, source.lines().count())
        }
        CellView::Unknown { .. } => format!(
            "{} {}{}{}",
            header,
            colors::RED,
            descriptor.view.diagnostic().unwrap_or_default(),
            colors::RESET
        ),
    }
}
