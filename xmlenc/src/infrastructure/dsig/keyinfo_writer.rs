// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `KeyInfo` Writer
//!
//! Serializes the effective key description back onto a `ds:KeyInfo` node
//! after an encrypt — C5 step 6. This is a minimal concrete
//! implementation: a `ds:KeyName` when the key carries a name, and for RSA
//! public keys a `ds:KeyValue/ds:RSAKeyValue` with base64-encoded
//! modulus/exponent, matching the two key-description forms the rest of
//! this engine (and its test scenarios) actually need.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;

use xmlenc_domain::value_objects::key::KeyType;
use xmlenc_domain::value_objects::Key;
use xmlenc_domain::XmlEncError;

use crate::dom::{Document, NodeId};

use super::DS_NS;

/// Writes `key`'s description as children of `key_info_node`.
pub fn write_key_info(doc: &mut Document, key_info_node: NodeId, key: &Key) -> Result<(), XmlEncError> {
    if let Some(name) = key.name() {
        let key_name = doc.create_element("KeyName", Some("ds"), Some(DS_NS));
        let text = doc.create_text(name.to_string());
        doc.append_child(key_name, text);
        doc.append_child(key_info_node, key_name);
    }

    if key.key_type() == KeyType::RsaPublic {
        let public_key: RsaPublicKey = rsa::pkcs8::DecodePublicKey::from_public_key_der(key.bytes())
            .map_err(|e| XmlEncError::invalid_data(format!("cannot parse RSA public key for KeyInfo: {e}")))?;

        let key_value = doc.create_element("KeyValue", Some("ds"), Some(DS_NS));
        let rsa_key_value = doc.create_element("RSAKeyValue", Some("ds"), Some(DS_NS));

        let modulus = doc.create_element("Modulus", Some("ds"), Some(DS_NS));
        let modulus_text = doc.create_text(STANDARD.encode(public_key.n().to_bytes_be()));
        doc.append_child(modulus, modulus_text);

        let exponent = doc.create_element("Exponent", Some("ds"), Some(DS_NS));
        let exponent_text = doc.create_text(STANDARD.encode(public_key.e().to_bytes_be()));
        doc.append_child(exponent, exponent_text);

        doc.append_child(rsa_key_value, modulus);
        doc.append_child(rsa_key_value, exponent);
        doc.append_child(key_value, rsa_key_value);
        doc.append_child(key_info_node, key_value);
    }

    Ok(())
}
