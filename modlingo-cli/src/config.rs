//! Lexicon table files: loading user tables and exporting the built-in one.
//!
//! The file format follows the extension: `.json`, `.toml`, `.yaml`/`.yml`.

use std::path::Path;

use modlingo::Lexicon;
use tracing::warn;

use crate::validation::validate_lexicon_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexiconFileFormat {
    Json,
    Toml,
    Yaml,
}

impl LexiconFileFormat {
    pub fn from_path(path: &str) -> Result<Self, String> {
        validate_lexicon_path(path)?;
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(LexiconFileFormat::Json),
            "toml" => Ok(LexiconFileFormat::Toml),
            _ => Ok(LexiconFileFormat::Yaml),
        }
    }
}

/// Parses a lexicon table in the given format.
pub fn parse_lexicon(content: &str, format: LexiconFileFormat) -> Result<Lexicon, String> {
    match format {
        LexiconFileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        LexiconFileFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        LexiconFileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Reads a lexicon table file.
pub fn read_lexicon_file(path: &str) -> Result<Lexicon, String> {
    let format = LexiconFileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read lexicon '{}': {}", path, e))?;
    parse_lexicon(&content, format).map_err(|e| format!("Invalid lexicon '{}': {}", path, e))
}

/// The lexicon for a run: the built-in table, a file replacing it, or a file merged
/// over it when `extend` is set.
pub fn resolve_lexicon(path: Option<&str>, extend: bool) -> Result<Lexicon, String> {
    match path {
        None => Ok(Lexicon::builtin()),
        Some(path) => {
            let loaded = read_lexicon_file(path)?;
            if loaded.is_empty() {
                warn!(path = %path, "lexicon has no words and no opener rules");
            }
            if extend {
                Ok(Lexicon::builtin().merge(loaded))
            } else {
                Ok(loaded)
            }
        }
    }
}

/// Serializes a lexicon in the format named by `path`'s extension and writes it there.
pub fn write_lexicon_file(lexicon: &Lexicon, path: &str) -> Result<(), String> {
    let text = match LexiconFileFormat::from_path(path)? {
        LexiconFileFormat::Json => serde_json::to_string_pretty(lexicon).map_err(|e| e.to_string()),
        LexiconFileFormat::Toml => toml::to_string_pretty(lexicon).map_err(|e| e.to_string()),
        LexiconFileFormat::Yaml => serde_yaml::to_string(lexicon).map_err(|e| e.to_string()),
    }
    .map_err(|e| format!("Failed to serialize lexicon: {}", e))?;

    std::fs::write(path, text).map_err(|e| format!("Failed to write lexicon '{}': {}", path, e))
}
