// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Serializes a subtree of a [`super::Document`] back to XML bytes.
//!
//! `quick-xml` has no tree-writer API either, so this walks the arena by
//! hand and emits events through a `quick_xml::Writer`. Escaping of text
//! and attribute values is delegated to `quick-xml`'s own `BytesText`/
//! `BytesStart` constructors so we match its entity-escaping rules exactly
//! rather than re-implementing them.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;
use std::io::Cursor;

use super::{Document, NodeId, NodeKind};

fn qualified_name(local_name: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(p) => format!("{p}:{local_name}"),
        None => local_name.to_string(),
    }
}

/// Serializes `node` and its subtree to a UTF-8 XML byte buffer.
///
/// Attribute and element ordering is exactly the order stored on the
/// [`super::DomNode`] — callers that need schema-ordered output (the
/// `EncryptedData` template builder) are responsible for building the
/// tree in that order up front.
pub fn serialize_node(doc: &Document, node: NodeId) -> Vec<u8> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_node(doc, node, &mut writer);
    writer.into_inner().into_inner()
}

fn write_node(doc: &Document, node: NodeId, writer: &mut Writer<Cursor<Vec<u8>>>) {
    let dom = doc.node(node);
    match &dom.kind {
        NodeKind::Text(text) => {
            let _ = writer.write_event(Event::Text(BytesText::new(text)));
        }
        NodeKind::Element { local_name, prefix, .. } => {
            let qname = qualified_name(local_name, prefix.as_deref());
            let mut start = BytesStart::new(qname.clone());
            for (key, value) in &dom.attrs {
                start.push_attribute((key.as_str(), value.as_str()));
            }

            if dom.children.is_empty() {
                let _ = writer.write_event(Event::Empty(start));
            } else {
                let _ = writer.write_event(Event::Start(start));
                for &child in &dom.children {
                    write_node(doc, child, writer);
                }
                let _ = writer.write_event(Event::End(BytesEnd::new(qname)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_document;
    use super::*;

    #[test]
    fn round_trips_element_with_attribute_and_child() {
        let mut doc = Document::new();
        let root = doc.create_element("EncryptedData", None, Some("http://www.w3.org/2001/04/xmlenc#"));
        doc.set_attr(root, "Id", "e1");
        let child = doc.create_element("CipherData", None, Some("http://www.w3.org/2001/04/xmlenc#"));
        doc.append_child(root, child);

        let bytes = serialize_node(&doc, root);
        let xml = String::from_utf8(bytes).unwrap();
        assert!(xml.starts_with("<EncryptedData"));
        assert!(xml.contains(r#"Id="e1""#));
        assert!(xml.contains("<CipherData/>"));
        assert!(xml.ends_with("</EncryptedData>"));
    }

    #[test]
    fn escapes_special_characters_in_text_and_attributes() {
        let mut doc = Document::new();
        let node = doc.create_element("CipherValue", None, None);
        doc.set_attr(node, "Note", "a & b");
        let text = doc.create_text("<data>");
        doc.append_child(node, text);

        let xml = String::from_utf8(serialize_node(&doc, node)).unwrap();
        assert!(xml.contains("&amp;"));
        assert!(xml.contains("&lt;data&gt;"));
    }

    #[test]
    fn parse_then_serialize_preserves_structure() {
        let original = br#"<Root xmlns="urn:test" Id="r1"><Child>text</Child></Root>"#;
        let (doc, root) = parse_document(original).unwrap();
        let xml = String::from_utf8(serialize_node(&doc, root)).unwrap();
        assert!(xml.contains("<Child>text</Child>"));
        assert!(xml.contains(r#"Id="r1""#));
    }
}
