//! Support for the "Strings only" SST XML layout: a fixed header and bare
//! `<Source>`/`<Dest>` pairs, matched by xTranslator on source text alone.

use std::io::{BufRead, Write};

use serde::Serialize;

use crate::{
    error::Error,
    formats::{
        element::{self, Element},
        sst::{CONTENT, DEST, ROOT, SOURCE, STRING, params_element, read_params},
    },
    traits::Parser,
    types::{Entry, Metadata, Resource},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Format {
    pub metadata: Metadata,
    pub pairs: Vec<Pair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair {
    pub source: String,
    pub dest: String,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let root = element::parse(reader)?;
        if root.name != ROOT {
            return Err(Error::InvalidResource(format!(
                "expected <{}> root, found <{}>",
                ROOT, root.name
            )));
        }

        let metadata = read_params(&root);

        let pairs = root
            .descendants(STRING)
            .into_iter()
            .map(|string| Pair {
                source: string.child_text(SOURCE).unwrap_or_default(),
                dest: string.child_text(DEST).unwrap_or_default(),
            })
            .collect();

        Ok(Format { metadata, pairs })
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut root = Element::new(ROOT);
        root.push_child(params_element(&self.metadata));

        let mut content = Element::new(CONTENT);
        for pair in &self.pairs {
            let mut string = Element::new(STRING);
            string.push_child(Element::with_text(SOURCE, &pair.source));
            string.push_child(Element::with_text(DEST, &pair.dest));
            content.push_child(string);
        }
        root.push_child(content);

        element::write(&root, writer)
    }
}

/// Strips a resource down to its source/destination pairs under the fixed
/// `AUTO` / `english` / `russian` / `2` header. Every entry is kept, visible or not.
impl From<&Resource> for Format {
    fn from(value: &Resource) -> Self {
        Format {
            metadata: Metadata::auto(),
            pairs: value
                .entries
                .iter()
                .map(|entry| Pair {
                    source: entry.source.clone(),
                    dest: entry.dest.clone(),
                })
                .collect(),
        }
    }
}

impl From<Format> for Resource {
    fn from(value: Format) -> Self {
        Resource {
            metadata: value.metadata,
            entries: value
                .pairs
                .into_iter()
                .map(|pair| Entry::new(pair.source).with_dest(pair.dest))
                .collect(),
        }
    }
}
