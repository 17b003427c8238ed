//! Support for xTranslator SST XML exports ("FormID references" layout).
//!
//! The whole document is kept as an element tree, so writing it back reproduces every
//! element and attribute of the input. Entries are the `<String>` elements at any depth,
//! in document order; only their `<Dest>` text is ever changed.

use std::io::{BufRead, Write};

use crate::{
    error::Error,
    formats::element::{self, Element},
    traits::Parser,
    types::{Entry, Metadata, Resource},
};

pub(crate) const ROOT: &str = "SSTXMLRessources";
pub(crate) const PARAMS: &str = "Params";
pub(crate) const ADDON: &str = "Addon";
pub(crate) const VERSION: &str = "Version";
pub(crate) const CONTENT: &str = "Content";
pub(crate) const STRING: &str = "String";
pub(crate) const SOURCE: &str = "Source";
pub(crate) const DEST: &str = "Dest";
pub(crate) const REC: &str = "REC";
pub(crate) const EDID: &str = "EDID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    root: Element,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let root = element::parse(reader)?;
        Ok(Format { root })
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        element::write(&self.root, writer)
    }
}

impl Format {
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Header values from `<Params>`.
    pub fn metadata(&self) -> Metadata {
        read_params(&self.root)
    }

    /// All entries in document order.
    pub fn entries(&self) -> Vec<Entry> {
        self.root
            .descendants(STRING)
            .into_iter()
            .map(entry_from_element)
            .collect()
    }

    /// Writes the `dest` of each entry back into the matching `<String>` element.
    ///
    /// Entries are matched by position, so `entries` must come from [`Format::entries`] of
    /// this document. Every `<String>` ends up with a `<Dest>` child; an existing `<Dest>` is
    /// only rewritten when its text differs.
    pub fn apply_destinations(&mut self, entries: &[Entry]) -> Result<(), Error> {
        let expected = self.root.descendants(STRING).len();
        if expected != entries.len() {
            return Err(Error::DataMismatch(format!(
                "document has {} strings but {} entries were supplied",
                expected,
                entries.len()
            )));
        }

        let mut pending = entries.iter();
        self.root.visit_descendants_mut(STRING, &mut |string: &mut Element| {
            if let Some(entry) = pending.next() {
                set_dest(string, &entry.dest);
            }
        });
        Ok(())
    }
}

impl From<&Format> for Resource {
    fn from(value: &Format) -> Self {
        Resource {
            metadata: value.metadata(),
            entries: value.entries(),
        }
    }
}

impl From<Format> for Resource {
    fn from(value: Format) -> Self {
        Resource::from(&value)
    }
}

/// Builds a fresh document in this layout from a resource.
impl From<&Resource> for Format {
    fn from(value: &Resource) -> Self {
        let mut root = Element::new(ROOT);
        root.push_child(params_element(&value.metadata));

        let mut content = Element::new(CONTENT);
        for entry in &value.entries {
            let mut string = Element::new(STRING);
            if !entry.editor_id.is_empty() {
                string.push_child(Element::with_text(EDID, &entry.editor_id));
            }
            if !entry.record_type.is_empty() {
                string.push_child(Element::with_text(REC, &entry.record_type));
            }
            string.push_child(Element::with_text(SOURCE, &entry.source));
            string.push_child(Element::with_text(DEST, &entry.dest));
            content.push_child(string);
        }
        root.push_child(content);

        Format { root }
    }
}

/// Reads the `<Params>` header of `root`; missing fields are empty.
pub(crate) fn read_params(root: &Element) -> Metadata {
    let Some(params) = root.child(PARAMS) else {
        return Metadata::default();
    };
    let field = |name: &str| params.child_text(name).unwrap_or_default();
    Metadata {
        addon: field(ADDON),
        source_language: field(SOURCE),
        dest_language: field(DEST),
        version: field(VERSION),
    }
}

pub(crate) fn params_element(metadata: &Metadata) -> Element {
    let mut params = Element::new(PARAMS);
    params.push_child(Element::with_text(ADDON, &metadata.addon));
    params.push_child(Element::with_text(SOURCE, &metadata.source_language));
    params.push_child(Element::with_text(DEST, &metadata.dest_language));
    params.push_child(Element::with_text(VERSION, &metadata.version));
    params
}

fn entry_from_element(string: &Element) -> Entry {
    let field = |name: &str| string.child_text(name).unwrap_or_default();
    Entry {
        source: field(SOURCE),
        dest: field(DEST),
        record_type: field(REC),
        editor_id: field(EDID),
    }
}

fn set_dest(string: &mut Element, dest: &str) {
    match string.child_mut(DEST) {
        Some(existing) => {
            if existing.text() != dest {
                existing.set_text(dest);
            }
        }
        None => string.push_child(Element::with_text(DEST, dest)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SSTXMLRessources>
  <Params>
    <Addon>Dawnguard</Addon>
    <Source>english</Source>
    <Dest>russian</Dest>
    <Version>2</Version>
  </Params>
  <Content>
    <String List="0" sID="000D62">
      <EDID>DLC1KeyA</EDID>
      <REC>KEYM:FULL</REC>
      <Source>Dwarven Key</Source>
      <Dest>Dwarven Key</Dest>
    </String>
    <String List="1" sID="000D63" Partial="1">
      <REC>INFO:NAM1</REC>
      <Source>Find the book.</Source>
    </String>
  </Content>
</SSTXMLRessources>
"#;

    #[test]
    fn test_parse_metadata_and_entries() {
        let format = Format::from_str(SAMPLE).unwrap();
        let meta = format.metadata();
        assert_eq!(meta.addon, "Dawnguard");
        assert_eq!(meta.source_language, "english");
        assert_eq!(meta.dest_language, "russian");
        assert_eq!(meta.version, "2");

        let entries = format.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].editor_id, "DLC1KeyA");
        assert_eq!(entries[0].record_type, "KEYM:FULL");
        assert_eq!(entries[0].source, "Dwarven Key");
        assert_eq!(entries[0].dest, "Dwarven Key");
        assert_eq!(entries[1].editor_id, "");
        assert_eq!(entries[1].dest, "");
    }

    #[test]
    fn test_missing_params_yield_empty_metadata() {
        let format =
            Format::from_str("<SSTXMLRessources><Content/></SSTXMLRessources>").unwrap();
        assert_eq!(format.metadata(), Metadata::default());
        assert!(format.entries().is_empty());
    }

    #[test]
    fn test_apply_destinations_creates_missing_dest() {
        let mut format = Format::from_str(SAMPLE).unwrap();
        let mut entries = format.entries();
        entries[1].dest = "Найди книгу.".to_string();
        format.apply_destinations(&entries).unwrap();

        let strings = format.root().descendants(STRING);
        assert_eq!(
            strings[1].child_text(DEST).as_deref(),
            Some("Найди книгу.")
        );
        // untouched attributes survive
        assert_eq!(strings[1].attribute("Partial"), Some("1"));
        assert_eq!(strings[0].attribute("sID"), Some("000D62"));
    }

    #[test]
    fn test_nested_strings_are_entries() {
        let mut format = Format::from_str(
            "<SSTXMLRessources><Content><String><Source>Find the key</Source>\
             <String><Source>Bring the oil</Source></String></String></Content></SSTXMLRessources>",
        )
        .unwrap();
        let mut entries = format.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source, "Find the key");
        assert_eq!(entries[1].source, "Bring the oil");

        entries[1].dest = "Принеси the масло".to_string();
        format.apply_destinations(&entries).unwrap();
        let strings = format.root().descendants(STRING);
        assert_eq!(strings[0].child_text(DEST).as_deref(), Some(""));
        assert_eq!(
            strings[1].child_text(DEST).as_deref(),
            Some("Принеси the масло")
        );
    }

    #[test]
    fn test_apply_destinations_rejects_length_mismatch() {
        let mut format = Format::from_str(SAMPLE).unwrap();
        let err = format.apply_destinations(&[Entry::new("x")]).unwrap_err();
        assert!(matches!(err, Error::DataMismatch(_)));
    }

    #[test]
    fn test_write_keeps_unknown_fields() {
        let mut format = Format::from_str(SAMPLE).unwrap();
        let entries = format.entries();
        format.apply_destinations(&entries).unwrap();

        let mut out = Vec::new();
        format.to_writer(&mut out).unwrap();
        let xml = String::from_utf8(out).unwrap();
        assert!(xml.contains(r#"<String List="1" sID="000D63" Partial="1">"#));
        assert!(xml.contains("<EDID>DLC1KeyA</EDID>"));
        assert!(xml.contains("<Dest/>"));

        let reparsed = Format::from_str(&xml).unwrap();
        assert_eq!(reparsed.entries(), entries);
    }

    #[test]
    fn test_resource_conversion_builds_sst_layout() {
        let format = Format::from_str(SAMPLE).unwrap();
        let resource = Resource::from(&format);
        let rebuilt = Format::from(&resource);
        assert_eq!(rebuilt.root().name, ROOT);
        assert_eq!(Resource::from(&rebuilt), resource);
    }
}
