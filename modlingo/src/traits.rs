//! Traits for reading and writing resource documents in modlingo.

use std::{
    fs::File,
    io::{self, BufRead, BufWriter, Cursor, Read, Write},
    path::Path,
};

use encoding_rs::{Encoding, UTF_8};
use lazy_static::lazy_static;
use regex::bytes::Regex;

use crate::error::Error;

lazy_static! {
    static ref XML_ENCODING_REGEX: Regex =
        Regex::new(r#"^\s*<\?xml[^>]*?\sencoding\s*=\s*["']([A-Za-z0-9._:-]+)["']"#).unwrap();
}

/// The encoding named in the XML declaration, when it is not a UTF form.
///
/// Only declarations readable as ASCII are considered; UTF-16 documents are recognized by
/// their BOM instead.
pub(crate) fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(256)];
    let label = XML_ENCODING_REGEX.captures(head)?.get(1)?;
    let encoding = Encoding::for_label(label.as_bytes())?;
    (encoding.output_encoding() != UTF_8).then_some(encoding)
}

/// A trait for parsing and writing one resource document from/to one file.
///
/// # Example
///
/// ```rust,no_run
/// use modlingo::traits::Parser;
/// let format = modlingo::formats::sst::Format::read_from("Dawnguard_english_russian.xml")?;
/// format.write_to("Dawnguard_copy.xml")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    ///
    /// The file is decoded to UTF-8 before parsing: a BOM wins, then a legacy encoding
    /// named in the XML declaration (`windows-1251`, ...), otherwise the bytes must be UTF-8.
    /// Bytes that are not valid text are an [`Error::InvalidResource`].
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(declared_encoding(&bytes))
            .bom_override(true)
            .build(bytes.as_slice());

        let mut decoded = String::new();
        decoder
            .read_to_string(&mut decoded)
            .map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => {
                    Error::InvalidResource(format!("input is not valid UTF-8: {}", e))
                }
                _ => Error::Io(e),
            })?;

        Self::from_str(&decoded)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path, replacing any existing file.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::write_error(path, e))?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer).map_err(|e| match e {
            Error::Io(source) => Error::write_error(path, source),
            other => other,
        })?;
        writer.flush().map_err(|e| Error::write_error(path, e))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_encoding() {
        let cp1251 = br#"<?xml version="1.0" encoding="windows-1251"?><SSTXMLRessources/>"#;
        assert_eq!(declared_encoding(cp1251), Some(encoding_rs::WINDOWS_1251));

        let single_quoted = b"<?xml version='1.0' encoding='cp1251'?><a/>";
        assert_eq!(declared_encoding(single_quoted), Some(encoding_rs::WINDOWS_1251));
    }

    #[test]
    fn test_utf_declarations_are_not_transcoded() {
        assert_eq!(declared_encoding(br#"<?xml version="1.0" encoding="UTF-8"?><a/>"#), None);
        assert_eq!(declared_encoding(br#"<?xml version="1.0" encoding="UTF-16"?><a/>"#), None);
        assert_eq!(declared_encoding(br#"<?xml version="1.0"?><a/>"#), None);
        assert_eq!(declared_encoding(b"<a/>"), None);
        assert_eq!(declared_encoding(br#"<?xml version="1.0" encoding="klingon"?><a/>"#), None);
    }
}
