//! Syntax highlighting for code cell source.
//!
//! Source is turned into classed spans (`hl-` prefixed scope names); the
//! colors come from a syntect theme emitted as page CSS.

use std::sync::LazyLock;

use nbrender_core::Theme;
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Kernel language tags that name a syntax under another token.
fn syntax_token(language: &str) -> &str {
    match language {
        "ipython" | "ipython2" | "ipython3" => "python",
        "text/x-c++src" => "cpp",
        other => other,
    }
}

fn find_syntax(language: &str) -> &'static SyntaxReference {
    SYNTAX_SET
        .find_syntax_by_token(syntax_token(language))
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

/// Highlight `source` as `language`, returning escaped HTML.
///
/// Unknown languages are highlighted as plain text.
pub fn highlight(source: &str, language: &str) -> String {
    let syntax = find_syntax(language);
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);

    for line in LinesWithEndings::from(source) {
        if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
            tracing::warn!(%e, language, "highlighting failed, drawing plain source");
            return html_escape::encode_text(source).into_owned();
        }
    }

    generator.finalize()
}

/// Token colors for the page theme.
pub fn theme_css(theme: Theme) -> String {
    let name = match theme {
        Theme::Light => "InspiredGitHub",
        Theme::Dark => "base16-ocean.dark",
    };

    let Some(highlight_theme) = THEME_SET.themes.get(name) else {
        tracing::warn!("syntax theme '{}' is not bundled", name);
        return String::new();
    };

    match css_for_theme_with_class_style(highlight_theme, CLASS_STYLE) {
        Ok(css) => css,
        Err(e) => {
            tracing::warn!(%e, "failed to build syntax theme CSS");
            String::new()
        }
    }
}
