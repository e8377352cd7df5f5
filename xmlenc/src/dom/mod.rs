// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Arena-Based Mutable XML DOM
//!
//! `quick-xml` gives us a streaming tokenizer/writer, not a mutable tree —
//! and this engine needs in-place mutation (splice a node, replace a
//! node's children, register an `Id` index) that a streaming API can't
//! provide directly. `Document` is a small arena: nodes live in a `Vec`
//! addressed by [`NodeId`], with parent/children indices rather than the
//! prev/next pointer cycles the original C implementation uses. This is
//! the same treatment the transform chain (C1) gets, applied to the XML
//! tree for the same reason: no raw pointers, no ownership cycles.

use xmlenc_domain::XmlEncError;

mod parse;
mod serialize;

pub use parse::parse_document;
pub use serialize::serialize_node;

/// Index into [`Document::nodes`]. Stable for the lifetime of the document;
/// a detached node's slot becomes `None` but its id is never reused.
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element {
        local_name: String,
        prefix: Option<String>,
        ns_uri: Option<String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
pub struct DomNode {
    pub kind: NodeKind,
    /// `(qualified_name, value)` pairs in source/insertion order, including
    /// `xmlns`/`xmlns:*` declarations.
    pub attrs: Vec<(String, String)>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl DomNode {
    fn element(local_name: impl Into<String>, prefix: Option<String>, ns_uri: Option<String>) -> Self {
        Self {
            kind: NodeKind::Element {
                local_name: local_name.into(),
                prefix,
                ns_uri,
            },
            attrs: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    fn text(content: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text(content.into()),
            attrs: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    pub fn local_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { local_name, .. } => Some(local_name),
            NodeKind::Text(_) => None,
        }
    }

    pub fn ns_uri(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { ns_uri, .. } => ns_uri.as_deref(),
            NodeKind::Text(_) => None,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

/// An arena-owned XML document (or detached fragment) plus its `Id`
/// attribute index.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Option<DomNode>>,
    /// Document-level `Id` index, populated by [`Document::register_id`].
    ids: std::collections::HashMap<String, NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            ids: std::collections::HashMap::new(),
        }
    }

    fn alloc(&mut self, node: DomNode) -> NodeId {
        self.nodes.push(Some(node));
        self.nodes.len() - 1
    }

    pub fn node(&self, id: NodeId) -> &DomNode {
        self.nodes[id].as_ref().expect("dangling NodeId")
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut DomNode {
        self.nodes[id].as_mut().expect("dangling NodeId")
    }

    /// Creates a detached element node (no parent, no children) with the
    /// given local name, prefix, and resolved namespace URI.
    pub fn create_element(
        &mut self,
        local_name: impl Into<String>,
        prefix: Option<&str>,
        ns_uri: Option<&str>,
    ) -> NodeId {
        self.alloc(DomNode::element(
            local_name,
            prefix.map(|p| p.to_string()),
            ns_uri.map(|u| u.to_string()),
        ))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.alloc(DomNode::text(content))
    }

    pub fn set_attr(&mut self, node: NodeId, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let dom = self.node_mut(node);
        if let Some(existing) = dom.attrs.iter_mut().find(|(k, _)| *k == name) {
            existing.1 = value;
        } else {
            dom.attrs.push((name, value));
        }
    }

    pub fn get_attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).get_attr(name)
    }

    /// Appends `child` at the end of `parent`'s children, without any
    /// schema-order validation (callers that need schema order use the
    /// template builders, which call this after computing the insertion
    /// index).
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Inserts `child` into `parent`'s children at `index`.
    pub fn insert_child_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.insert(index, child);
    }

    /// Detaches `node` from its parent, if any. The node and its subtree
    /// remain allocated (addressable) but are no longer reachable from the
    /// root unless re-attached.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.node(node).parent {
            let idx = self.node(parent).children.iter().position(|&c| c == node);
            if let Some(idx) = idx {
                self.node_mut(parent).children.remove(idx);
            }
        }
        self.node_mut(node).parent = None;
    }

    /// Finds the first element child of `parent` with the given local name
    /// and namespace URI.
    pub fn find_child(&self, parent: NodeId, local_name: &str, ns_uri: Option<&str>) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&c| self.check_node_name(c, local_name, ns_uri))
    }

    pub fn check_node_name(&self, node: NodeId, local_name: &str, ns_uri: Option<&str>) -> bool {
        let dom = self.node(node);
        dom.local_name() == Some(local_name) && dom.ns_uri() == ns_uri
    }

    /// The first element child of `parent`, skipping any text nodes
    /// (whitespace formatting).
    pub fn first_element_child(&self, parent: NodeId) -> Option<NodeId> {
        self.node(parent).children.iter().copied().find(|&c| self.node(c).is_element())
    }

    /// The next element sibling after `node`, skipping text nodes.
    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.node(node).parent?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&c| c == node)?;
        siblings[pos + 1..].iter().copied().find(|&c| self.node(c).is_element())
    }

    /// Concatenated text content of `node`'s descendants, in document
    /// order — the same semantics as `xmlNodeGetContent`.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let dom = self.node(node);
        match &dom.kind {
            NodeKind::Text(s) => out.push_str(s),
            NodeKind::Element { .. } => {
                for &child in &dom.children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Replaces all of `node`'s children with `new_text`, matching
    /// `xmlNodeSetContent` + `xmlNodeAddContent`.
    pub fn set_text_content(&mut self, node: NodeId, new_text: &str) {
        let old_children = std::mem::take(&mut self.node_mut(node).children);
        for child in old_children {
            self.node_mut(child).parent = None;
        }
        let text_id = self.create_text(new_text);
        self.append_child(node, text_id);
    }

    /// Replaces `target` in its parent's children with `replacement`,
    /// matching `xmlReplaceNode`. `target` becomes detached.
    pub fn replace_node(&mut self, target: NodeId, replacement: NodeId) -> Result<(), XmlEncError> {
        let parent = self
            .node(target)
            .parent
            .ok_or_else(|| XmlEncError::invalid_data("cannot replace a node with no parent"))?;
        let idx = self
            .node(parent)
            .children
            .iter()
            .position(|&c| c == target)
            .ok_or_else(|| XmlEncError::invalid_data("target node not found among parent's children"))?;
        self.node_mut(parent).children[idx] = replacement;
        self.node_mut(replacement).parent = Some(parent);
        self.node_mut(target).parent = None;
        Ok(())
    }

    /// Replaces `target`'s position in its parent's children with the
    /// independent sibling list `replacements` — used for `Type=#Content`
    /// decryption, which must yield a children-list rather than a single
    /// wrapping element (see the design note correcting the original's
    /// shared buffer-replace behavior).
    pub fn replace_node_with_siblings(&mut self, target: NodeId, replacements: Vec<NodeId>) -> Result<(), XmlEncError> {
        let parent = self
            .node(target)
            .parent
            .ok_or_else(|| XmlEncError::invalid_data("cannot replace a node with no parent"))?;
        let idx = self
            .node(parent)
            .children
            .iter()
            .position(|&c| c == target)
            .ok_or_else(|| XmlEncError::invalid_data("target node not found among parent's children"))?;
        for &r in &replacements {
            self.node_mut(r).parent = Some(parent);
        }
        self.node_mut(parent).children.splice(idx..idx + 1, replacements);
        self.node_mut(target).parent = None;
        Ok(())
    }

    /// Replaces all of `node`'s children with `replacements` (each becomes
    /// a direct child of `node`), matching `Type=#Content` encryption
    /// splicing.
    pub fn replace_children(&mut self, node: NodeId, replacements: Vec<NodeId>) {
        let old = std::mem::take(&mut self.node_mut(node).children);
        for child in old {
            self.node_mut(child).parent = None;
        }
        for &r in &replacements {
            self.node_mut(r).parent = Some(node);
        }
        self.node_mut(node).children = replacements;
    }

    /// Registers `node`'s `Id` attribute (if any) in the document-level id
    /// index, so later `#id` URI references resolve to it.
    pub fn register_id(&mut self, node: NodeId) {
        if let Some(id) = self.get_attr(node, "Id") {
            self.ids.insert(id.to_string(), node);
        }
    }

    pub fn resolve_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENC_NS: &str = "http://www.w3.org/2001/04/xmlenc#";

    #[test]
    fn append_and_find_child_round_trip() {
        let mut doc = Document::new();
        let parent = doc.create_element("EncryptedData", None, Some(ENC_NS));
        let child = doc.create_element("CipherData", None, Some(ENC_NS));
        doc.append_child(parent, child);

        let found = doc.find_child(parent, "CipherData", Some(ENC_NS));
        assert_eq!(found, Some(child));
        assert_eq!(doc.find_child(parent, "CipherData", None), None);
    }

    #[test]
    fn next_element_sibling_skips_text_nodes() {
        let mut doc = Document::new();
        let parent = doc.create_element("CipherData", None, Some(ENC_NS));
        let a = doc.create_element("CipherValue", None, Some(ENC_NS));
        let t = doc.create_text("\n  ");
        let b = doc.create_element("EncryptionProperties", None, Some(ENC_NS));
        doc.append_child(parent, a);
        doc.append_child(parent, t);
        doc.append_child(parent, b);

        assert_eq!(doc.next_element_sibling(a), Some(b));
    }

    #[test]
    fn replace_node_detaches_target_and_attaches_replacement() {
        let mut doc = Document::new();
        let root = doc.create_element("Root", None, None);
        let original = doc.create_element("Data", None, None);
        doc.append_child(root, original);

        let replacement = doc.create_element("EncryptedData", None, Some(ENC_NS));
        doc.replace_node(original, replacement).unwrap();

        assert_eq!(doc.node(root).children, vec![replacement]);
        assert!(doc.node(original).parent.is_none());
    }

    #[test]
    fn replace_node_with_siblings_yields_children_list() {
        let mut doc = Document::new();
        let root = doc.create_element("Root", None, None);
        let target = doc.create_element("EncryptedData", None, Some(ENC_NS));
        doc.append_child(root, target);

        let a = doc.create_element("a", None, None);
        let b = doc.create_element("b", None, None);
        doc.replace_node_with_siblings(target, vec![a, b]).unwrap();

        assert_eq!(doc.node(root).children, vec![a, b]);
    }

    #[test]
    fn register_and_resolve_id() {
        let mut doc = Document::new();
        let node = doc.create_element("EncryptedData", None, Some(ENC_NS));
        doc.set_attr(node, "Id", "e1");
        doc.register_id(node);

        assert_eq!(doc.resolve_id("e1"), Some(node));
        assert_eq!(doc.resolve_id("missing"), None);
    }

    #[test]
    fn text_content_concatenates_descendant_text() {
        let mut doc = Document::new();
        let node = doc.create_element("CipherValue", None, Some(ENC_NS));
        let t1 = doc.create_text("AAAA");
        let t2 = doc.create_text("BBBB");
        doc.append_child(node, t1);
        doc.append_child(node, t2);

        assert_eq!(doc.text_content(node), "AAAABBBB");
    }
}
