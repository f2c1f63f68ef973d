//! Render command implementation.
//!
//! Loads a notebook, runs a render pass and writes a standalone HTML page.

mod highlight;
mod html;

pub use html::{HtmlOptions, generate_html};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use nbrender_core::{NotebookRenderer, RenderConfig, RenderSettings, Theme};

use crate::colors;
use crate::watcher::{FileEvent, FileWatcher};

/// Options for the render command.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub output: Option<PathBuf>,
    pub theme: Option<Theme>,
    pub config: Option<PathBuf>,
}

impl RenderOptions {
    /// Build the render configuration. Command-line flags win over the file.
    fn render_config(&self) -> anyhow::Result<RenderConfig> {
        let settings = match &self.config {
            Some(path) => RenderSettings::from_file(path).map_err(|e| {
                anyhow::anyhow!("Failed to load settings from {}: {}", path.display(), e)
            })?,
            None => RenderSettings::default(),
        };

        let mut config = RenderConfig::from_settings(&settings);
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        Ok(config)
    }

    fn output_path(&self, notebook_path: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| nbrender_ipynb::default_html_path(notebook_path))
    }
}

/// Render a notebook once.
pub fn execute(notebook_path: &Path, options: &RenderOptions) -> anyhow::Result<()> {
    if !notebook_path.exists() {
        anyhow::bail!("Notebook not found: {}", notebook_path.display());
    }

    let mut renderer = NotebookRenderer::new(options.render_config()?);
    let output_path = options.output_path(notebook_path);

    render_file(&mut renderer, notebook_path, &output_path)
}

/// Render a notebook, then re-render on every change until interrupted.
pub async fn watch(notebook_path: &Path, options: &RenderOptions) -> anyhow::Result<()> {
    if !notebook_path.exists() {
        anyhow::bail!("Notebook not found: {}", notebook_path.display());
    }

    let mut renderer = NotebookRenderer::new(options.render_config()?);
    let output_path = options.output_path(notebook_path);

    println!(
        "\n{}nbrender watch{} - {}{}{}",
        colors::BOLD,
        colors::RESET,
        colors::CYAN,
        notebook_path.display(),
        colors::RESET
    );
    println!(
        "{}Watching for changes... (Ctrl+C to stop){}",
        colors::DIM,
        colors::RESET
    );

    render_file(&mut renderer, notebook_path, &output_path)?;

    let mut watcher = FileWatcher::new(notebook_path)
        .map_err(|e| anyhow::anyhow!("Failed to create file watcher: {}", e))?;

    loop {
        tokio::select! {
            event = watcher.recv() => match event {
                Some(FileEvent::Modified(_)) => {
                    println!("\n{}File changed, re-rendering...{}", colors::YELLOW, colors::RESET);
                    if let Err(e) = render_file(&mut renderer, notebook_path, &output_path) {
                        eprintln!("{}Error:{} {}", colors::RED, colors::RESET, e);
                    }
                }
                Some(FileEvent::Removed(path)) => {
                    eprintln!(
                        "\n{}Warning:{} Notebook file removed: {}",
                        colors::YELLOW,
                        colors::RESET,
                        path.display()
                    );
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                println!("\nStopped watching.");
                break;
            }
        }
    }

    Ok(())
}

/// Load the notebook, hand it to the renderer and write the HTML page.
///
/// Every load produces a new document reference, so the renderer recomputes.
fn render_file(
    renderer: &mut NotebookRenderer,
    notebook_path: &Path,
    output_path: &Path,
) -> anyhow::Result<()> {
    let start = Instant::now();

    let document = nbrender_ipynb::read_notebook(notebook_path)?;
    renderer.set_document(Arc::new(document));

    let pass = renderer.render()?;
    let title = notebook_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let html = generate_html(&pass, renderer.registry(), &HtmlOptions { title });
    fs::write(output_path, html)?;

    tracing::debug!(generation = pass.generation, "render pass written");

    println!(
        "{}Rendered{} {} cells to {}{}{} ({:.1}ms)",
        colors::GREEN,
        colors::RESET,
        pass.cells.len(),
        colors::CYAN,
        output_path.display(),
        colors::RESET,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flag_theme_overrides_settings_file() {
        let temp = TempDir::new().unwrap();
        let settings = temp.path().join("settings.json");
        fs::write(&settings, r#"{"theme": "light", "displayOrder": ["text/plain"]}"#).unwrap();

        let options = RenderOptions {
            output: None,
            theme: Some(Theme::Dark),
            config: Some(settings),
        };
        let config = options.render_config().unwrap();

        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.registry.display_order(), ["text/plain"]);
    }

    #[test]
    fn test_default_output_path() {
        let options = RenderOptions::default();
        assert_eq!(
            options.output_path(Path::new("/tmp/report.ipynb")),
            PathBuf::from("/tmp/report.html")
        );
    }
}
