//! Language tag resolution for syntax highlighting.

use crate::model::{CodemirrorMode, DocumentMetadata};

/// Language used when the document does not declare one.
pub const FALLBACK_LANGUAGE: &str = "text";

/// Resolve the document's language tag.
///
/// Tries `language_info.codemirror_mode.name`, then `codemirror_mode` itself
/// when it is a plain tag, then `language_info.name`. The first non-empty
/// value wins; otherwise [`FALLBACK_LANGUAGE`].
pub fn resolve_language(metadata: &DocumentMetadata) -> String {
    let Some(info) = metadata.language_info.as_ref() else {
        return FALLBACK_LANGUAGE.to_string();
    };

    let (mode_name, mode_tag) = match &info.codemirror_mode {
        Some(CodemirrorMode::Spec { name, .. }) => (name.as_deref(), None),
        Some(CodemirrorMode::Name(tag)) => (None, Some(tag.as_str())),
        None => (None, None),
    };

    [mode_name, mode_tag, info.name.as_deref()]
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(FALLBACK_LANGUAGE)
        .to_string()
}
