// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Parses a byte buffer into a [`super::Document`] using `quick-xml`'s
//! streaming tokenizer, resolving namespace prefixes against an explicit
//! scope stack as we descend (there is no DOM API in `quick-xml` itself).

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::collections::HashMap;
use xmlenc_domain::XmlEncError;

use super::{Document, NodeId};

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// One element's in-scope prefix→URI bindings, including the default
/// namespace under the empty-string key.
#[derive(Default, Clone)]
struct Scope(HashMap<String, String>);

impl Scope {
    fn resolve(scopes: &[Scope], prefix: &str) -> Option<String> {
        for scope in scopes.iter().rev() {
            if let Some(uri) = scope.0.get(prefix) {
                return Some(uri.clone());
            }
        }
        None
    }
}

fn split_qname(qname: &[u8]) -> (Option<String>, String) {
    let raw = decode(qname);
    match raw.split_once(':') {
        Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
        None => (None, raw),
    }
}

/// Parses `bytes` as a complete XML document (or well-formed fragment with
/// a single root element) and returns the document plus the root node id.
pub fn parse_document(bytes: &[u8]) -> Result<(Document, NodeId), XmlEncError> {
    let mut reader = Reader::from_reader(bytes);
    let mut doc = Document::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut scopes: Vec<Scope> = Vec::new();
    let mut root: Option<NodeId> = None;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| XmlEncError::XmlOperationFailed(format!("xml parse error: {e}")))?;
        match event {
            Event::Eof => break,
            Event::Start(e) => {
                let (node, scope) = open_element(&mut doc, &e, &scopes)?;
                attach(&mut doc, &stack, node, &mut root);
                stack.push(node);
                scopes.push(scope);
            }
            Event::Empty(e) => {
                let (node, _scope) = open_element(&mut doc, &e, &scopes)?;
                attach(&mut doc, &stack, node, &mut root);
            }
            Event::End(_) => {
                stack.pop();
                scopes.pop();
            }
            Event::Text(t) => {
                if let Some(&parent) = stack.last() {
                    let text = t
                        .unescape()
                        .map_err(|e| XmlEncError::XmlOperationFailed(format!("bad text content: {e}")))?
                        .into_owned();
                    let node = doc.create_text(text);
                    doc.append_child(parent, node);
                }
            }
            Event::CData(t) => {
                if let Some(&parent) = stack.last() {
                    let node = doc.create_text(decode(&t.into_inner()));
                    doc.append_child(parent, node);
                }
            }
            _ => {}
        }
        buf.clear();
    }

    let root = root.ok_or_else(|| XmlEncError::XmlOperationFailed("document has no root element".to_string()))?;
    Ok((doc, root))
}

fn open_element(
    doc: &mut Document,
    start: &quick_xml::events::BytesStart<'_>,
    outer_scopes: &[Scope],
) -> Result<(NodeId, Scope), XmlEncError> {
    let mut scope = Scope::default();
    let mut attrs = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlEncError::XmlOperationFailed(format!("bad attribute: {e}")))?;
        let value = attr
            .unescape_value()
            .map_err(|e| XmlEncError::XmlOperationFailed(format!("bad attribute value: {e}")))?
            .into_owned();
        let raw_key = decode(attr.key.as_ref());

        if raw_key == "xmlns" {
            scope.0.insert(String::new(), value.clone());
        } else if let Some(prefix) = raw_key.strip_prefix("xmlns:") {
            scope.0.insert(prefix.to_string(), value.clone());
        }
        attrs.push((raw_key, value));
    }

    let (prefix, local_name) = split_qname(start.name().as_ref());
    let mut all_scopes: Vec<&Scope> = outer_scopes.iter().collect();
    all_scopes.push(&scope);
    let flattened: Vec<Scope> = all_scopes.into_iter().cloned().collect();
    let ns_uri = match &prefix {
        Some(p) => Scope::resolve(&flattened, p),
        None => Scope::resolve(&flattened, ""),
    };

    let node = doc.create_element(local_name, prefix.as_deref(), ns_uri.as_deref());
    for (k, v) in attrs {
        doc.set_attr(node, k, v);
    }
    Ok((node, scope))
}

fn attach(doc: &mut Document, stack: &[NodeId], node: NodeId, root: &mut Option<NodeId>) {
    if let Some(&parent) = stack.last() {
        doc.append_child(parent, node);
    } else if root.is_none() {
        *root = Some(node);
    }
}
