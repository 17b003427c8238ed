//! Core types for modlingo.
//! Documents decode into these; the pipeline mutates them; encoders serialize them.

use serde::{Deserialize, Serialize};

/// Addon tag written into the header of the strings-only output.
pub const AUTO_ADDON: &str = "AUTO";
/// Source language label of the strings-only output.
pub const AUTO_SOURCE_LANGUAGE: &str = "english";
/// Destination language label of the strings-only output.
pub const AUTO_DEST_LANGUAGE: &str = "russian";
/// Schema version literal of the strings-only output.
pub const AUTO_VERSION: &str = "2";

/// A complete localization resource (one SST XML export).
/// Contains the header metadata and every string entry in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resource {
    /// Header-level metadata (addon name, language labels, schema version).
    pub metadata: Metadata,

    /// Ordered list of all entries in this resource.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Header of an SST document (`<Params>`). Any field missing from the document is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Metadata {
    pub addon: String,
    pub source_language: String,
    pub dest_language: String,
    pub version: String,
}

impl Metadata {
    /// The fixed header stamped on every strings-only output.
    pub fn auto() -> Self {
        Metadata {
            addon: AUTO_ADDON.to_string(),
            source_language: AUTO_SOURCE_LANGUAGE.to_string(),
            dest_language: AUTO_DEST_LANGUAGE.to_string(),
            version: AUTO_VERSION.to_string(),
        }
    }
}

/// One translatable unit: a `<String>` element of the document.
///
/// `source` is never changed by the pipeline. `dest` is overwritten only when it holds no
/// target-script text and the translation attempt produced some.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    /// Original text (`<Source>`).
    pub source: String,

    /// Translated text (`<Dest>`); empty when the element is absent.
    #[serde(default)]
    pub dest: String,

    /// Record tag such as `INFO:NAM1` (`<REC>`); empty when absent.
    #[serde(default)]
    pub record_type: String,

    /// Editor identifier (`<EDID>`); empty when absent.
    #[serde(default)]
    pub editor_id: String,
}

impl Entry {
    pub fn new(source: impl Into<String>) -> Self {
        Entry {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_dest(mut self, dest: impl Into<String>) -> Self {
        self.dest = dest.into();
        self
    }

    pub fn with_record_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = record_type.into();
        self
    }

    pub fn with_editor_id(mut self, editor_id: impl Into<String>) -> Self {
        self.editor_id = editor_id.into();
        self
    }

    /// The record signature, i.e. the part of `record_type` before the first colon.
    pub fn record_signature(&self) -> &str {
        record_signature(&self.record_type)
    }
}

pub(crate) fn record_signature(record_type: &str) -> &str {
    record_type.split(':').next().unwrap_or(record_type)
}
