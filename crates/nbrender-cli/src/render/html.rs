//! HTML drawing layer.
//!
//! Draws the descriptors of a render pass as one standalone page. Theme
//! variables come from the pass's theme signal. Code is highlighted with
//! syntect and math is typeset with KaTeX while the page is generated; the
//! KaTeX stylesheet is linked for fonts, and auto-render only picks up spans
//! KaTeX rejected.

use std::fmt::Write as _;

use base64::Engine;
use html_escape::{encode_double_quoted_attribute as encode_attr, encode_text};
use nbrender_core::{
    CellView, KatexRenderer, MarkdownPipeline, MathRenderer, OutputView, RenderDescriptor,
    RenderPass, Rendered, Theme, TransformRegistry, resolve_outputs,
};

use super::highlight;

type Markdown = MarkdownPipeline<KatexRenderer>;

const KATEX_VERSION: &str = "0.16.11";

/// Page-level options.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    pub title: String,
}

/// Generate a standalone HTML page for a render pass.
pub fn generate_html(
    pass: &RenderPass,
    registry: &TransformRegistry,
    options: &HtmlOptions,
) -> String {
    let markdown = MarkdownPipeline::with_math_renderer(KatexRenderer::new());
    let mut body = String::new();

    for descriptor in &pass.cells {
        render_cell(&mut body, descriptor, registry, &markdown);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="{theme}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@{katex}/dist/katex.min.css">
<script defer src="https://cdn.jsdelivr.net/npm/katex@{katex}/dist/katex.min.js"></script>
<script defer src="https://cdn.jsdelivr.net/npm/katex@{katex}/dist/contrib/auto-render.min.js"
  onload="renderMathInElement(document.body);"></script>
<style>
{theme_vars}
{base_css}
{syntax_css}
</style>
</head>
<body>
<div class="notebook-render">
{body}</div>
</body>
</html>
"#,
        theme = pass.theme,
        title = encode_text(&options.title),
        katex = KATEX_VERSION,
        theme_vars = theme_css(pass.theme),
        base_css = BASE_CSS,
        syntax_css = highlight::theme_css(pass.theme),
        body = body,
    )
}

fn render_cell(
    out: &mut String,
    descriptor: &RenderDescriptor,
    registry: &TransformRegistry,
    markdown: &Markdown,
) {
    let id = encode_attr(descriptor.id.as_str());

    match &descriptor.view {
        CellView::Code {
            execution_count,
            source,
            language,
            visibility,
            outputs,
        } => {
            let _ = writeln!(out, r#"<div class="cell code" id="cell-{}">"#, id);

            if !visibility.source_hidden {
                let prompt = execution_count
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| " ".to_string());
                let _ = writeln!(
                    out,
                    r#"<div class="input"><div class="prompt">[{}]:</div><pre class="source"><code class="language-{}">{}</code></pre></div>"#,
                    prompt,
                    encode_attr(language),
                    highlight::highlight(source, language)
                );
            }

            if !visibility.output_hidden {
                let state = if visibility.output_expanded {
                    "expanded"
                } else {
                    "collapsed"
                };
                let _ = writeln!(out, r#"<div class="outputs {}">"#, state);
                for view in resolve_outputs(outputs, registry) {
                    render_output(out, &view, markdown);
                }
                out.push_str("</div>\n");
            }

            out.push_str("</div>\n");
        }
        CellView::Markdown { source } => {
            let _ = writeln!(
                out,
                r#"<div class="cell markdown" id="cell-{}"><div class="content-margin">{}</div></div>"#,
                id,
                markdown.render_html(source)
            );
        }
        CellView::Raw { source } => {
            let _ = writeln!(
                out,
                r#"<div class="cell raw" id="cell-{}"><pre class="raw-cell">{}</pre></div>"#,
                id,
                encode_text(source)
            );
        }
        CellView::Unknown { .. } => {
            let diagnostic = descriptor.view.diagnostic().unwrap_or_default();
            let _ = writeln!(
                out,
                r#"<div class="cell unknown" id="cell-{}"><div class="outputs"><pre>{}</pre></div></div>"#,
                id,
                encode_text(&diagnostic)
            );
        }
    }
}

fn render_output(out: &mut String, view: &OutputView, markdown: &Markdown) {
    match view {
        OutputView::Rich { content, .. } => render_rich(out, content, markdown),
        OutputView::Stream { name, text } => {
            let _ = writeln!(
                out,
                r#"<pre class="stream {}">{}</pre>"#,
                encode_attr(name),
                encode_text(text)
            );
        }
        OutputView::Error {
            ename,
            evalue,
            traceback,
        } => {
            let _ = writeln!(
                out,
                r#"<pre class="error">{}</pre>"#,
                encode_text(&format_error(ename, evalue, traceback))
            );
        }
    }
}

fn render_rich(out: &mut String, content: &Rendered, markdown: &Markdown) {
    match content {
        Rendered::Html(html) | Rendered::Svg(html) => {
            let _ = writeln!(out, r#"<div class="output rich">{}</div>"#, html);
        }
        Rendered::Markdown(source) => {
            let _ = writeln!(
                out,
                r#"<div class="output markdown">{}</div>"#,
                markdown.render_html(source)
            );
        }
        Rendered::Latex(tex) => {
            let _ = writeln!(
                out,
                r#"<div class="output latex">{}</div>"#,
                latex_markup(tex, markdown.math_renderer())
            );
        }
        Rendered::Image { mime_type, bytes } => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
            let _ = writeln!(
                out,
                r#"<div class="output image"><img src="data:{};base64,{}"></div>"#,
                mime_type, encoded
            );
        }
        Rendered::Json(value) => {
            let pretty = serde_json::to_string_pretty(value).unwrap_or_default();
            let _ = writeln!(out, r#"<pre class="output json">{}</pre>"#, encode_text(&pretty));
        }
        Rendered::Javascript(script) => {
            let _ = writeln!(out, "<script>{}</script>", script);
        }
        Rendered::Text(text) => {
            let _ = writeln!(out, r#"<pre class="output text">{}</pre>"#, encode_text(text));
        }
    }
}

/// Typeset a `text/latex` payload.
///
/// `$$..$$` and `\[..\]` are display math, `$..$` and `\(..\)` inline math.
/// Undelimited TeX is treated as display math.
fn latex_markup(tex: &str, math: &impl MathRenderer) -> String {
    let tex = tex.trim();
    let display =
        strip_delimiters(tex, "$$", "$$").or_else(|| strip_delimiters(tex, "\\[", "\\]"));
    let inline =
        strip_delimiters(tex, "$", "$").or_else(|| strip_delimiters(tex, "\\(", "\\)"));

    match (display, inline) {
        (Some(inner), _) => math.block(inner),
        (None, Some(inner)) => math.inline(inner),
        (None, None) => math.block(tex),
    }
}

fn strip_delimiters<'a>(tex: &'a str, open: &str, close: &str) -> Option<&'a str> {
    tex.strip_prefix(open)?.strip_suffix(close)
}

/// Format error output for display.
fn format_error(ename: &str, evalue: &str, traceback: &[String]) -> String {
    let mut output = format!("{}: {}\n", ename, evalue);

    if !traceback.is_empty() {
        output.push('\n');
        for line in traceback {
            output.push_str(&strip_ansi_codes(line));
            output.push('\n');
        }
    }

    output
}

/// Strip ANSI escape codes, which kernels embed in tracebacks.
fn strip_ansi_codes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            result.push(c);
            continue;
        }
        if chars.peek() == Some(&'[') {
            chars.next();
            // CSI sequences end at the first letter
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        }
    }

    result
}

fn theme_css(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => LIGHT_THEME,
        Theme::Dark => DARK_THEME,
    }
}

const LIGHT_THEME: &str = r#":root {
  --theme-app-bg: #ffffff;
  --theme-app-fg: #111111;
  --theme-primary-bg: #f6f8fa;
  --theme-cell-input-bg: #fafafa;
  --theme-cell-prompt-fg: #6e7781;
  --theme-cell-output-bg: #ffffff;
  --theme-error-fg: #b22222;
  --theme-raw-stripe-a: #efefef;
  --theme-raw-stripe-b: #f1f1f1;
  --theme-border: #e1e4e8;
}"#;

const DARK_THEME: &str = r#":root {
  --theme-app-bg: #1e1e1e;
  --theme-app-fg: #e6e6e6;
  --theme-primary-bg: #252526;
  --theme-cell-input-bg: #2a2a2a;
  --theme-cell-prompt-fg: #8b949e;
  --theme-cell-output-bg: #1e1e1e;
  --theme-error-fg: #f48771;
  --theme-raw-stripe-a: #2b2b2b;
  --theme-raw-stripe-b: #303030;
  --theme-border: #3c3c3c;
}"#;

const BASE_CSS: &str = r#"body {
  margin: 0;
  background: var(--theme-app-bg);
  color: var(--theme-app-fg);
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
}
.notebook-render { max-width: 960px; margin: 0 auto; padding: 20px; --prompt-width: 50px; }
.cell { margin-bottom: 12px; }
.input { display: flex; background: var(--theme-cell-input-bg); border: 1px solid var(--theme-border); }
.prompt {
  width: var(--prompt-width);
  flex: none;
  padding: 9px 0;
  text-align: right;
  font-family: monospace;
  color: var(--theme-cell-prompt-fg);
}
pre { margin: 0; padding: 9px 10px; overflow-x: auto; white-space: pre-wrap; }
.source { flex: 1; }
.outputs { padding-left: calc(var(--prompt-width) + 10px); background: var(--theme-cell-output-bg); }
.outputs.collapsed { max-height: 200px; overflow-y: auto; }
.stream.stderr { background: #fdd; color: #333; }
.error { color: var(--theme-error-fg); }
.output.image img { max-width: 100%; }
.content-margin { padding: 10px 10px 10px calc(var(--prompt-width, 50px) + 10px); }
.raw-cell {
  background: repeating-linear-gradient(
    -45deg,
    transparent,
    transparent 10px,
    var(--theme-raw-stripe-a) 10px,
    var(--theme-raw-stripe-b) 20px
  );
}"#;
