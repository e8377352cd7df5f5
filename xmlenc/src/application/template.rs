// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Template Builder (C2)
//!
//! Pure DOM-construction helpers that produce well-formed `EncryptedData`
//! skeletons. Every helper verifies its parent's identity, rejects schema
//! violations (`NodeAlreadyPresent` for elements the schema allows at most
//! once, or for `CipherValue`/`CipherReference` mutual exclusion), and
//! inserts the new child at the position §3's invariant mandates —
//! regardless of call order.

use xmlenc_domain::XmlEncError;

use crate::dom::{Document, NodeId};
use crate::infrastructure::dsig::DS_NS;

pub const ENC_NS: &str = "http://www.w3.org/2001/04/xmlenc#";

const RANK_ENCRYPTION_METHOD: u8 = 0;
const RANK_KEY_INFO: u8 = 1;
const RANK_CIPHER_DATA: u8 = 2;
const RANK_ENCRYPTION_PROPERTIES: u8 = 3;
const RANK_OTHER: u8 = 4;

fn rank_of(doc: &Document, child: NodeId) -> u8 {
    match doc.node(child).local_name() {
        Some("EncryptionMethod") => RANK_ENCRYPTION_METHOD,
        Some("KeyInfo") => RANK_KEY_INFO,
        Some("CipherData") => RANK_CIPHER_DATA,
        Some("EncryptionProperties") => RANK_ENCRYPTION_PROPERTIES,
        _ => RANK_OTHER,
    }
}

/// Inserts `child` into `parent`'s children at the position schema order
/// demands for `rank`, regardless of what's already present.
fn insert_in_schema_order(doc: &mut Document, parent: NodeId, child: NodeId, rank: u8) {
    let idx = doc.node(parent).children.iter().take_while(|&&c| rank_of(doc, c) <= rank).count();
    doc.insert_child_at(parent, idx, child);
}

/// Creates a detached `EncryptedData` element with a `CipherData` child
/// already attached, and the given optional attributes.
pub fn create_encrypted_data(
    doc: &mut Document,
    id: Option<&str>,
    enc_type: Option<&str>,
    mime_type: Option<&str>,
    encoding: Option<&str>,
) -> NodeId {
    let encrypted_data = doc.create_element("EncryptedData", None, Some(ENC_NS));
    doc.set_attr(encrypted_data, "xmlns", ENC_NS);
    if let Some(id) = id {
        doc.set_attr(encrypted_data, "Id", id);
    }
    if let Some(t) = enc_type {
        doc.set_attr(encrypted_data, "Type", t);
    }
    if let Some(m) = mime_type {
        doc.set_attr(encrypted_data, "MimeType", m);
    }
    if let Some(e) = encoding {
        doc.set_attr(encrypted_data, "Encoding", e);
    }

    let cipher_data = doc.create_element("CipherData", None, Some(ENC_NS));
    doc.append_child(encrypted_data, cipher_data);
    encrypted_data
}

fn require_encrypted_data(doc: &Document, node: NodeId) -> Result<(), XmlEncError> {
    if !doc.check_node_name(node, "EncryptedData", Some(ENC_NS)) {
        return Err(XmlEncError::invalid_node("EncryptedData", doc.node(node).local_name().unwrap_or("?")));
    }
    Ok(())
}

fn require_cipher_data(doc: &Document, node: NodeId) -> Result<(), XmlEncError> {
    if !doc.check_node_name(node, "CipherData", Some(ENC_NS)) {
        return Err(XmlEncError::invalid_node("CipherData", doc.node(node).local_name().unwrap_or("?")));
    }
    Ok(())
}

/// Adds an `EncryptionMethod Algorithm="alg_id"` child. Fails if one is
/// already present.
pub fn add_encryption_method(doc: &mut Document, encrypted_data: NodeId, alg_id: &str) -> Result<NodeId, XmlEncError> {
    require_encrypted_data(doc, encrypted_data)?;
    if doc.find_child(encrypted_data, "EncryptionMethod", Some(ENC_NS)).is_some() {
        return Err(XmlEncError::node_already_present("EncryptionMethod"));
    }
    let node = doc.create_element("EncryptionMethod", None, Some(ENC_NS));
    doc.set_attr(node, "Algorithm", alg_id);
    insert_in_schema_order(doc, encrypted_data, node, RANK_ENCRYPTION_METHOD);
    Ok(node)
}

/// Adds a `ds:KeyInfo` child. Fails if one is already present.
pub fn add_key_info(doc: &mut Document, encrypted_data: NodeId) -> Result<NodeId, XmlEncError> {
    require_encrypted_data(doc, encrypted_data)?;
    if doc.find_child(encrypted_data, "KeyInfo", Some(DS_NS)).is_some() {
        return Err(XmlEncError::node_already_present("KeyInfo"));
    }
    let node = doc.create_element("KeyInfo", Some("ds"), Some(DS_NS));
    doc.set_attr(node, "xmlns:ds", DS_NS);
    insert_in_schema_order(doc, encrypted_data, node, RANK_KEY_INFO);
    Ok(node)
}

/// Adds an `EncryptionProperties` child. Fails if one is already present.
pub fn add_encryption_properties(doc: &mut Document, encrypted_data: NodeId, id: Option<&str>) -> Result<NodeId, XmlEncError> {
    require_encrypted_data(doc, encrypted_data)?;
    if doc.find_child(encrypted_data, "EncryptionProperties", Some(ENC_NS)).is_some() {
        return Err(XmlEncError::node_already_present("EncryptionProperties"));
    }
    let node = doc.create_element("EncryptionProperties", None, Some(ENC_NS));
    if let Some(id) = id {
        doc.set_attr(node, "Id", id);
    }
    insert_in_schema_order(doc, encrypted_data, node, RANK_ENCRYPTION_PROPERTIES);
    Ok(node)
}

/// Adds an `EncryptionProperty` child, auto-creating `EncryptionProperties`
/// if it is not already present.
pub fn add_encryption_property(
    doc: &mut Document,
    encrypted_data: NodeId,
    id: Option<&str>,
    target: Option<&str>,
) -> Result<NodeId, XmlEncError> {
    require_encrypted_data(doc, encrypted_data)?;
    let properties = match doc.find_child(encrypted_data, "EncryptionProperties", Some(ENC_NS)) {
        Some(existing) => existing,
        None => add_encryption_properties(doc, encrypted_data, None)?,
    };
    let node = doc.create_element("EncryptionProperty", None, Some(ENC_NS));
    if let Some(id) = id {
        doc.set_attr(node, "Id", id);
    }
    if let Some(target) = target {
        doc.set_attr(node, "Target", target);
    }
    doc.append_child(properties, node);
    Ok(node)
}

fn has_cipher_value_or_reference(doc: &Document, cipher_data: NodeId) -> bool {
    doc.find_child(cipher_data, "CipherValue", Some(ENC_NS)).is_some()
        || doc.find_child(cipher_data, "CipherReference", Some(ENC_NS)).is_some()
}

/// Adds an empty `CipherValue` child. Fails if `CipherValue` or
/// `CipherReference` is already present.
pub fn add_cipher_value(doc: &mut Document, cipher_data: NodeId) -> Result<NodeId, XmlEncError> {
    require_cipher_data(doc, cipher_data)?;
    if has_cipher_value_or_reference(doc, cipher_data) {
        return Err(XmlEncError::node_already_present("CipherValue"));
    }
    let node = doc.create_element("CipherValue", None, Some(ENC_NS));
    doc.append_child(cipher_data, node);
    Ok(node)
}

/// Adds a `CipherReference URI="uri"` child. Fails if `CipherValue` or
/// `CipherReference` is already present.
pub fn add_cipher_reference(doc: &mut Document, cipher_data: NodeId, uri: Option<&str>) -> Result<NodeId, XmlEncError> {
    require_cipher_data(doc, cipher_data)?;
    if has_cipher_value_or_reference(doc, cipher_data) {
        return Err(XmlEncError::node_already_present("CipherReference"));
    }
    let node = doc.create_element("CipherReference", None, Some(ENC_NS));
    if let Some(uri) = uri {
        doc.set_attr(node, "URI", uri);
    }
    doc.append_child(cipher_data, node);
    Ok(node)
}

/// Adds a `ds:Transform Algorithm="alg_id"` under `cipher_reference`,
/// auto-creating the `Transforms` parent if it is not already present.
pub fn add_transform(doc: &mut Document, cipher_reference: NodeId, alg_id: &str) -> Result<NodeId, XmlEncError> {
    if !doc.check_node_name(cipher_reference, "CipherReference", Some(ENC_NS)) {
        return Err(XmlEncError::invalid_node(
            "CipherReference",
            doc.node(cipher_reference).local_name().unwrap_or("?"),
        ));
    }
    let transforms = match doc.find_child(cipher_reference, "Transforms", Some(ENC_NS)) {
        Some(existing) => existing,
        None => {
            let node = doc.create_element("Transforms", None, Some(ENC_NS));
            doc.set_attr(node, "xmlns:ds", DS_NS);
            doc.append_child(cipher_reference, node);
            node
        }
    };
    let node = doc.create_element("Transform", Some("ds"), Some(DS_NS));
    doc.set_attr(node, "Algorithm", alg_id);
    doc.append_child(transforms, node);
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_encrypted_data_attaches_cipher_data() {
        let mut doc = Document::new();
        let ed = create_encrypted_data(&mut doc, Some("e1"), None, None, None);
        assert_eq!(doc.get_attr(ed, "Id"), Some("e1"));
        let cd = doc.first_element_child(ed).unwrap();
        assert_eq!(doc.node(cd).local_name(), Some("CipherData"));
    }

    #[test]
    fn children_are_always_inserted_in_schema_order_regardless_of_call_order() {
        let mut doc = Document::new();
        let ed = create_encrypted_data(&mut doc, None, None, None, None);

        add_encryption_properties(&mut doc, ed, None).unwrap();
        add_key_info(&mut doc, ed).unwrap();
        add_encryption_method(&mut doc, ed, "urn:test:alg").unwrap();

        let names: Vec<&str> = doc.node(ed).children.iter().map(|&c| doc.node(c).local_name().unwrap()).collect();
        assert_eq!(names, vec!["EncryptionMethod", "KeyInfo", "CipherData", "EncryptionProperties"]);
    }

    #[test]
    fn duplicate_encryption_method_is_rejected() {
        let mut doc = Document::new();
        let ed = create_encrypted_data(&mut doc, None, None, None, None);
        add_encryption_method(&mut doc, ed, "urn:test:alg").unwrap();
        let err = add_encryption_method(&mut doc, ed, "urn:test:other").unwrap_err();
        assert!(matches!(err, XmlEncError::NodeAlreadyPresent { .. }));
    }

    #[test]
    fn cipher_value_and_cipher_reference_are_mutually_exclusive() {
        let mut doc = Document::new();
        let ed = create_encrypted_data(&mut doc, None, None, None, None);
        let cd = doc.first_element_child(ed).unwrap();
        add_cipher_value(&mut doc, cd).unwrap();
        let err = add_cipher_reference(&mut doc, cd, Some("data:,x")).unwrap_err();
        assert!(matches!(err, XmlEncError::NodeAlreadyPresent { .. }));
    }

    #[test]
    fn add_transform_auto_creates_transforms_parent() {
        let mut doc = Document::new();
        let ed = create_encrypted_data(&mut doc, None, None, None, None);
        let cd = doc.first_element_child(ed).unwrap();
        let reference = add_cipher_reference(&mut doc, cd, Some("data:,x")).unwrap();
        add_transform(&mut doc, reference, "http://www.w3.org/2000/09/xmldsig#base64").unwrap();

        let transforms = doc.find_child(reference, "Transforms", Some(ENC_NS)).unwrap();
        let transform = doc.first_element_child(transforms).unwrap();
        assert_eq!(doc.get_attr(transform, "Algorithm"), Some("http://www.w3.org/2000/09/xmldsig#base64"));
    }

    #[test]
    fn add_encryption_property_auto_creates_properties_parent() {
        let mut doc = Document::new();
        let ed = create_encrypted_data(&mut doc, None, None, None, None);
        add_encryption_property(&mut doc, ed, Some("p1"), None).unwrap();

        let properties = doc.find_child(ed, "EncryptionProperties", Some(ENC_NS)).unwrap();
        let property = doc.first_element_child(properties).unwrap();
        assert_eq!(doc.get_attr(property, "Id"), Some("p1"));
    }
}
