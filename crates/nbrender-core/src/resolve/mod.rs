//! Pure resolvers over document and cell metadata.
//!
//! Both resolvers read metadata only. They never fail: absent or malformed
//! keys fall back to documented defaults.

mod language;
mod visibility;

pub use language::{FALLBACK_LANGUAGE, resolve_language};
pub use visibility::{Visibility, resolve_visibility};
