//! End-to-end tests for nbrender CLI commands.
//!
//! These tests run the binary against real `.ipynb` files and check
//! the HTML it writes and the text it prints.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin for tests

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Create a temporary directory with a test notebook.
struct TestNotebook {
    temp_dir: TempDir,
    notebook_path: PathBuf,
}

impl TestNotebook {
    fn new(filename: &str, source: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let notebook_path = temp_dir.path().join(filename);
        fs::write(&notebook_path, source).expect("Failed to write notebook");

        Self {
            temp_dir,
            notebook_path,
        }
    }

    fn path(&self) -> &PathBuf {
        &self.notebook_path
    }

    fn html_path(&self) -> PathBuf {
        self.notebook_path.with_extension("html")
    }

    fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write file");
        path
    }
}

/// A notebook with markdown, code, raw and an unsupported cell type.
fn mixed_notebook() -> String {
    r##"{
 "nbformat": 4,
 "nbformat_minor": 5,
 "metadata": {
  "language_info": {"name": "python", "codemirror_mode": {"name": "ipython", "version": 3}}
 },
 "cells": [
  {"id": "intro", "cell_type": "markdown", "metadata": {}, "source": "# Report\n\nArea is $\\pi r^2$."},
  {
   "id": "calc",
   "cell_type": "code",
   "execution_count": 3,
   "metadata": {},
   "source": ["x = 1 < 2\n", "x"],
   "outputs": [
    {
     "output_type": "execute_result",
     "execution_count": 3,
     "data": {"text/plain": "True", "text/html": "<b>True</b>"},
     "metadata": {}
    }
   ]
  },
  {"id": "notes", "cell_type": "raw", "metadata": {}, "source": "raw <text>"},
  {"id": "old", "cell_type": "heading", "metadata": {}, "source": "Legacy"}
 ]
}"##
    .to_string()
}

/// A notebook that hides its inputs at document level.
fn hidden_input_notebook() -> String {
    r##"{
 "nbformat": 4,
 "nbformat_minor": 4,
 "metadata": {"hide_input": true},
 "cells": [
  {
   "cell_type": "code",
   "execution_count": null,
   "metadata": {},
   "source": "secret_source()",
   "outputs": [{"output_type": "stream", "name": "stdout", "text": "visible output\n"}]
  }
 ]
}"##
    .to_string()
}

// =============================================================================
// Render Tests
// =============================================================================

#[test]
fn test_render_writes_html_next_to_notebook() {
    let nb = TestNotebook::new("report.ipynb", &mixed_notebook());

    Command::cargo_bin("nbrender")
        .unwrap()
        .arg("render")
        .arg(nb.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered"))
        .stdout(predicate::str::contains("4 cells"));

    let html = fs::read_to_string(nb.html_path()).expect("HTML output should exist");
    assert!(html.contains("<title>report</title>"));
    assert!(html.contains(r#"data-theme="light""#));
    assert!(html.contains(r#"<code class="language-ipython">"#));
    assert!(html.contains(r#"<span class="hl-source hl-python">"#));
    assert!(html.contains("&lt;"));
    assert!(!html.contains("x = 1 < 2"));
    assert!(html.contains("<b>True</b>"));
    assert!(html.contains(r#"<pre class="raw-cell">raw &lt;text&gt;</pre>"#));
    assert!(html.contains(r#"<pre>Cell Type "heading" is not implemented</pre>"#));
    assert!(html.contains(r#"<span class="math math-inline"><span class="katex">"#));
}

#[test]
fn test_render_to_explicit_output_with_dark_theme() {
    let nb = TestNotebook::new("report.ipynb", &mixed_notebook());
    let output = nb.temp_dir.path().join("out").with_extension("html");

    Command::cargo_bin("nbrender")
        .unwrap()
        .arg("render")
        .arg(nb.path())
        .arg("-o")
        .arg(&output)
        .arg("--theme")
        .arg("dark")
        .assert()
        .success();

    let html = fs::read_to_string(&output).expect("HTML output should exist");
    assert!(html.contains(r#"data-theme="dark""#));
    assert!(!nb.html_path().exists());
}

#[test]
fn test_render_with_settings_file_display_order() {
    let nb = TestNotebook::new("report.ipynb", &mixed_notebook());
    let settings = nb.write_file(
        "settings.json",
        r#"{"theme": "dark", "displayOrder": ["text/plain", "text/html"]}"#,
    );

    Command::cargo_bin("nbrender")
        .unwrap()
        .arg("render")
        .arg(nb.path())
        .arg("--config")
        .arg(&settings)
        .assert()
        .success();

    let html = fs::read_to_string(nb.html_path()).expect("HTML output should exist");
    assert!(html.contains(r#"data-theme="dark""#));
    assert!(html.contains(r#"<pre class="output text">True</pre>"#));
    assert!(!html.contains("<b>True</b>"));
}

#[test]
fn test_render_hides_input_from_document_metadata() {
    let nb = TestNotebook::new("hidden.ipynb", &hidden_input_notebook());

    Command::cargo_bin("nbrender")
        .unwrap()
        .arg("render")
        .arg(nb.path())
        .assert()
        .success();

    let html = fs::read_to_string(nb.html_path()).expect("HTML output should exist");
    assert!(!html.contains("secret_source()"));
    assert!(html.contains("visible output"));
}

#[test]
fn test_render_invalid_theme_fails() {
    let nb = TestNotebook::new("report.ipynb", &mixed_notebook());

    Command::cargo_bin("nbrender")
        .unwrap()
        .arg("render")
        .arg(nb.path())
        .arg("--theme")
        .arg("sepia")
        .assert()
        .failure();
}

#[test]
fn test_render_missing_notebook_fails() {
    let temp = TempDir::new().unwrap();

    Command::cargo_bin("nbrender")
        .unwrap()
        .arg("render")
        .arg(temp.path().join("missing.ipynb"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Notebook not found"));
}

#[test]
fn test_render_unsupported_nbformat_fails() {
    let nb = TestNotebook::new(
        "old.ipynb",
        r#"{"nbformat": 3, "nbformat_minor": 0, "metadata": {}, "cells": []}"#,
    );

    Command::cargo_bin("nbrender")
        .unwrap()
        .arg("render")
        .arg(nb.path())
        .assert()
        .failure();
}

// =============================================================================
// Inspect Tests
// =============================================================================

#[test]
fn test_inspect_lists_every_cell() {
    let nb = TestNotebook::new("report.ipynb", &mixed_notebook());

    Command::cargo_bin("nbrender")
        .unwrap()
        .arg("inspect")
        .arg(nb.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ipython"))
        .stdout(predicate::str::contains("cells: 4"))
        .stdout(predicate::str::contains("[3]"))
        .stdout(predicate::str::contains("text/html"))
        .stdout(predicate::str::contains("1 math spans"))
        .stdout(predicate::str::contains(
            "Cell Type \"heading\" is not implemented",
        ));
}

#[test]
fn test_inspect_empty_notebook_shows_placeholder_language() {
    let nb = TestNotebook::new(
        "empty.ipynb",
        r#"{"nbformat": 4, "nbformat_minor": 5, "metadata": {}, "cells": []}"#,
    );

    Command::cargo_bin("nbrender")
        .unwrap()
        .arg("inspect")
        .arg(nb.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("language: \x1b[34mtext\x1b[0m"))
        .stdout(predicate::str::contains("cells: 0"));
}
