//! Markdown and math for markdown cells.
//!
//! Markdown is parsed with `pulldown-cmark` with its math extension enabled.
//! Math spans (`$...$` inline, `$$...$$` display) are intercepted and handed to
//! a [`MathRenderer`]; every other node takes the default HTML path. Raw HTML
//! in the source is passed through.
//!
//! [`KatexRenderer`] typesets math to HTML with KaTeX at render time.
//! [`KatexMarkup`] only emits delimiters for a page-side typesetter.

use pulldown_cmark::{CowStr, Event, Options, Parser, html};

/// Typesets math spans found in markdown.
pub trait MathRenderer {
    /// Markup for `$...$`.
    fn inline(&self, tex: &str) -> String;

    /// Markup for `$$...$$`.
    fn block(&self, tex: &str) -> String;
}

/// Emits KaTeX auto-render delimiters (`\(..\)` and `\[..\]`) inside tagged
/// spans, leaving typesetting to the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct KatexMarkup;

impl MathRenderer for KatexMarkup {
    fn inline(&self, tex: &str) -> String {
        format!(
            r#"<span class="math math-inline">\({}\)</span>"#,
            html_escape::encode_text(tex)
        )
    }

    fn block(&self, tex: &str) -> String {
        format!(
            r#"<span class="math math-display">\[{}\]</span>"#,
            html_escape::encode_text(tex)
        )
    }
}

/// Typesets math with KaTeX. TeX that KaTeX rejects is logged and emitted
/// as [`KatexMarkup`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct KatexRenderer;

impl KatexRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn typeset(tex: &str, display_mode: bool) -> Option<String> {
    let opts = match katex::Opts::builder().display_mode(display_mode).build() {
        Ok(opts) => opts,
        Err(e) => {
            tracing::warn!(%e, "invalid KaTeX options");
            return None;
        }
    };

    match katex::render_with_opts(tex, &opts) {
        Ok(html) => Some(html),
        Err(e) => {
            tracing::warn!(%e, display_mode, "failed to typeset math");
            None
        }
    }
}

impl MathRenderer for KatexRenderer {
    fn inline(&self, tex: &str) -> String {
        match typeset(tex, false) {
            Some(html) => format!(r#"<span class="math math-inline">{}</span>"#, html),
            None => KatexMarkup.inline(tex),
        }
    }

    fn block(&self, tex: &str) -> String {
        match typeset(tex, true) {
            Some(html) => format!(r#"<span class="math math-display">{}</span>"#, html),
            None => KatexMarkup.block(tex),
        }
    }
}

/// A math span extracted from markdown source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan {
    pub display: bool,
    pub tex: String,
}

/// Markdown-to-HTML pipeline with math interception.
#[derive(Debug, Clone)]
pub struct MarkdownPipeline<M = KatexMarkup> {
    options: Options,
    math: M,
}

impl MarkdownPipeline<KatexMarkup> {
    pub fn new() -> Self {
        Self::with_math_renderer(KatexMarkup)
    }
}

impl Default for MarkdownPipeline<KatexMarkup> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MathRenderer> MarkdownPipeline<M> {
    /// Use a custom math renderer.
    pub fn with_math_renderer(math: M) -> Self {
        let options = Options::ENABLE_MATH
            | Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        Self { options, math }
    }

    /// The renderer math spans are handed to.
    pub fn math_renderer(&self) -> &M {
        &self.math
    }

    /// Render markdown source to HTML.
    pub fn render_html(&self, source: &str) -> String {
        let events = Parser::new_ext(source, self.options).map(|event| match event {
            Event::InlineMath(tex) => Event::InlineHtml(CowStr::from(self.math.inline(&tex))),
            Event::DisplayMath(tex) => Event::InlineHtml(CowStr::from(self.math.block(&tex))),
            other => other,
        });

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, events);
        out
    }

    /// Math spans in document order.
    pub fn math_spans(&self, source: &str) -> Vec<MathSpan> {
        Parser::new_ext(source, self.options)
            .filter_map(|event| match event {
                Event::InlineMath(tex) => Some(MathSpan {
                    display: false,
                    tex: tex.into_string(),
                }),
                Event::DisplayMath(tex) => Some(MathSpan {
                    display: true,
                    tex: tex.into_string(),
                }),
                _ => None,
            })
            .collect()
    }
}
