//! A small owned XML element tree.
//!
//! SST exports carry attributes and children modlingo does not model (`List`, `sID`,
//! `Partial`, `INDX`, ...). They are kept in this tree so the full output reproduces the
//! input with only `<Dest>` changed.
//!
//! Whitespace-only text between child elements is dropped on read and regenerated by the
//! indenting writer. Text inside leaf elements is kept exactly as read.

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{BufRead, Write};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attributes in document order, values unescaped.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A leaf element holding `text`. Empty text yields an empty element.
    pub fn with_text(name: impl Into<String>, text: &str) -> Self {
        let mut element = Element::new(name);
        element.set_text(text);
        element
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First direct child element named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    pub fn push_child(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    /// Text preceding the first child element.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(_) => break,
            }
        }
        out
    }

    /// Text of the first child named `name`, `None` if there is no such child.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(Element::text)
    }

    /// Replaces all direct text of this element with `text`, keeping child elements.
    pub fn set_text(&mut self, text: &str) {
        self.children.retain(|node| matches!(node, Node::Element(_)));
        if !text.is_empty() {
            self.children.insert(0, Node::Text(text.to_string()));
        }
    }

    /// All descendants named `name` in document order, not including `self`.
    pub fn descendants(&self, name: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_descendants(self, name, &mut out);
        out
    }

    /// Visits every descendant named `name` in document order, not including `self`.
    /// A match is visited before the matches nested inside it.
    pub fn visit_descendants_mut<F>(&mut self, name: &str, f: &mut F)
    where
        F: FnMut(&mut Element),
    {
        for node in &mut self.children {
            if let Node::Element(e) = node {
                if e.name == name {
                    f(e);
                }
                e.visit_descendants_mut(name, f);
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    /// Drops layout whitespace once the element is known to contain child elements.
    fn strip_layout_whitespace(&mut self) {
        if self.elements().next().is_some() {
            self.children.retain(|node| match node {
                Node::Text(t) => !t.trim().is_empty(),
                Node::Element(_) => true,
            });
        }
    }
}

fn collect_descendants<'a>(element: &'a Element, name: &str, out: &mut Vec<&'a Element>) {
    for child in element.elements() {
        if child.name == name {
            out.push(child);
        }
        collect_descendants(child, name, out);
    }
}

/// Parses a whole document into its root element.
pub fn parse<R: BufRead>(reader: R) -> Result<Element, Error> {
    let mut xml_reader = Reader::from_reader(reader);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => stack.push(start_element(e)?),
            Ok(Event::Empty(ref e)) => {
                let element = start_element(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let mut element = stack.pop().ok_or_else(|| {
                    Error::InvalidResource("closing tag without an open element".to_string())
                })?;
                element.strip_layout_whitespace();
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(Error::XmlParse)?;
                push_text(&mut stack, &text)?;
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_text(&mut stack, &text)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(Error::InvalidResource(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| Error::InvalidResource("document has no root element".to_string()))
}

/// Writes `root` as a UTF-8 document with two-space indentation.
pub fn write<W: Write>(root: &Element, mut writer: W) -> Result<(), Error> {
    let mut xml_writer = Writer::new_with_indent(&mut writer, b' ', 2);
    xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_element(&mut xml_writer, root)?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn write_element<W: Write>(xml_writer: &mut Writer<W>, element: &Element) -> Result<(), Error> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        xml_writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    xml_writer.write_event(Event::Start(start))?;
    for node in &element.children {
        match node {
            Node::Element(child) => write_element(xml_writer, child)?,
            Node::Text(text) => xml_writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    xml_writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

fn start_element(e: &BytesStart) -> Result<Element, Error> {
    let mut element = Element::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.to_string();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), Error> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::InvalidResource(format!(
            "second root element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), Error> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_text(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(Error::InvalidResource(
            "text outside the root element".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_str(xml: &str) -> Result<Element, Error> {
        parse(Cursor::new(xml))
    }

    fn write_string(root: &Element) -> String {
        let mut out = Vec::new();
        write(root, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_keeps_attributes_and_leaf_text() {
        let root = parse_str(
            r#"<Content>
                <String List="0" sID="00A1">
                    <Source>  Spaced &amp; escaped  </Source>
                    <Dest/>
                </String>
            </Content>"#,
        )
        .unwrap();

        let strings = root.descendants("String");
        assert_eq!(strings.len(), 1);
        assert_eq!(strings[0].attribute("List"), Some("0"));
        assert_eq!(strings[0].attribute("sID"), Some("00A1"));
        assert_eq!(
            strings[0].child_text("Source").as_deref(),
            Some("  Spaced & escaped  ")
        );
        assert_eq!(strings[0].child_text("Dest").as_deref(), Some(""));
        assert_eq!(strings[0].child_text("REC"), None);
    }

    #[test]
    fn test_parse_cdata_and_char_refs() {
        let root = parse_str("<a><b><![CDATA[<p>x</p>]]></b><c>&#1055;</c></a>").unwrap();
        assert_eq!(root.child_text("b").as_deref(), Some("<p>x</p>"));
        assert_eq!(root.child_text("c").as_deref(), Some("П"));
    }

    #[test]
    fn test_parse_rejects_mismatched_tags() {
        assert!(parse_str("<a><b></a></b>").is_err());
    }

    #[test]
    fn test_parse_rejects_unclosed_document() {
        assert!(parse_str("<a><b>text</b>").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_document() {
        let err = parse_str("   ").unwrap_err();
        assert!(matches!(err, Error::InvalidResource(_)));
    }

    #[test]
    fn test_write_indents_two_spaces() {
        let mut root = Element::new("Root");
        let mut string = Element::new("String");
        string.attributes.push(("sID".to_string(), "01".to_string()));
        string.push_child(Element::with_text("Source", "Hi <there>"));
        string.push_child(Element::with_text("Dest", ""));
        root.push_child(string);

        let xml = write_string(&root);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("\n  <String sID=\"01\">\n"));
        assert!(xml.contains("\n    <Source>Hi &lt;there&gt;</Source>\n"));
        assert!(xml.contains("\n    <Dest/>\n"));
        assert!(xml.ends_with("</Root>\n"));
    }

    #[test]
    fn test_write_then_parse_preserves_tree() {
        let original = parse_str(
            r#"<Root a="1"><String><Source> lead</Source><Dest>Ключ</Dest><Extra x="y"/></String></Root>"#,
        )
        .unwrap();
        let reparsed = parse_str(&write_string(&original)).unwrap();
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_set_text_keeps_child_elements() {
        let mut element = parse_str("<Dest>old<i/></Dest>").unwrap();
        element.set_text("new");
        assert_eq!(element.text(), "new");
        assert_eq!(element.elements().count(), 1);
        element.set_text("");
        assert_eq!(element.text(), "");
        assert_eq!(element.elements().count(), 1);
    }

    #[test]
    fn test_visit_descendants_in_document_order() {
        let mut root = parse_str(
            "<Root><Content><String><Source>a</Source></String></Content><String><Source>b</Source></String></Root>",
        )
        .unwrap();
        let mut seen = Vec::new();
        root.visit_descendants_mut("String", &mut |e: &mut Element| {
            seen.push(e.child_text("Source").unwrap_or_default())
        });
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn test_descendants_include_nested_matches() {
        let mut root = parse_str(
            "<Root><String><Source>outer</Source><String><Source>inner</Source></String></String></Root>",
        )
        .unwrap();
        let found: Vec<String> = root
            .descendants("String")
            .iter()
            .map(|e| e.child_text("Source").unwrap_or_default())
            .collect();
        assert_eq!(found, vec!["outer", "inner"]);

        let mut seen = Vec::new();
        root.visit_descendants_mut("String", &mut |e: &mut Element| {
            seen.push(e.child_text("Source").unwrap_or_default())
        });
        assert_eq!(seen, found);
    }
}
