//! Decides whether a string entry is player-facing text worth translating.

use crate::types::{Entry, record_signature};

/// Plugin/archive extensions; a source mentioning one is an asset reference.
pub const BINARY_EXTENSIONS: &[&str] = &[".esm", ".esl", ".bsa"];

/// Record signatures whose strings never reach the player: game settings, keywords,
/// worldspaces, cells and navmeshes.
pub const HIDDEN_RECORD_TYPES: &[&str] = &["GMST", "KYWD", "WRLD", "CELL", "NAVM"];

/// Sources this short (after trimming) made only of code-like characters are treated as
/// internal identifiers.
pub const SHORT_CODE_MAX_CHARS: usize = 3;

/// Whether `source` is visible, translatable text.
///
/// `record_type` is matched on its part before the first colon, case-sensitively.
/// `editor_id` is accepted for completeness and does not currently affect the decision.
pub fn is_visible(source: &str, record_type: &str, _editor_id: &str) -> bool {
    if source.trim().is_empty() {
        return false;
    }
    if BINARY_EXTENSIONS.iter().any(|ext| source.contains(ext)) {
        return false;
    }
    if HIDDEN_RECORD_TYPES.contains(&record_signature(record_type)) {
        return false;
    }
    if is_short_code(source) {
        return false;
    }
    true
}

/// [`is_visible`] applied to an entry's fields.
pub fn is_entry_visible(entry: &Entry) -> bool {
    is_visible(&entry.source, &entry.record_type, &entry.editor_id)
}

fn is_short_code(source: &str) -> bool {
    let code_like = source
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | ' ' | '-'));
    code_like && source.trim().chars().count() <= SHORT_CODE_MAX_CHARS
}
