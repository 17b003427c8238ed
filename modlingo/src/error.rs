//! All error types for the modlingo crate.
//!
//! Only structural and I/O failures are errors. A string that no rule or dictionary entry
//! applies to is not an error: it is left as found.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("invalid lexicon: {0}")]
    Lexicon(String),
}

impl Error {
    /// Wraps an I/O failure on an output file with the path it was written to.
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a new lexicon validation error
    pub fn lexicon_error(message: impl Into<String>) -> Self {
        Error::Lexicon(message.into())
    }

    /// Whether the error comes from an input document that could not be parsed.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::XmlParse(_) | Error::InvalidResource(_) | Error::DataMismatch(_)
        )
    }
}
