// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Encrypt Session (C3)
//!
//! The three entry points for producing an `EncryptedData` result:
//! `encrypt_memory` (caller-supplied plaintext buffer), `encrypt_uri`
//! (plaintext pulled from a resolved URI), and `encrypt_xml_node`
//! (plaintext serialized from a `Type=#Element`/`#Content` source node,
//! with the template spliced into the tree in its place). All three drive
//! C5 to build the chain, push the plaintext through it, then hand the
//! ciphertext to C6 to write into `CipherData`.

use xmlenc_domain::entities::EncResult;
use xmlenc_domain::services::transform::Direction;
use xmlenc_domain::value_objects::EncType;
use xmlenc_domain::XmlEncError;

use crate::application::ctx::Ctx;
use crate::application::session::Session;
use crate::application::{cipher_data_driver, encrypted_data_driver};
use crate::dom::{serialize_node, Document, NodeId};
use crate::infrastructure::transforms::UriInputTransform;

fn finalize(ctx: &Ctx, doc: &mut Document, result: &mut EncResult, session: &Session, ciphertext: Vec<u8>) -> Result<(), XmlEncError> {
    cipher_data_driver::write(doc, session.cipher_data_node, &ciphertext).map_err(|e| ctx.report_err(e))?;
    result.buffer = Some(ciphertext);
    Ok(())
}

/// Encrypts `data` in place and writes the ciphertext into `encrypted_data`'s
/// `CipherData`. Does not touch the surrounding document tree.
pub fn encrypt_memory(ctx: &mut Ctx, doc: &mut Document, encrypted_data: NodeId, data: &[u8]) -> Result<EncResult, XmlEncError> {
    let mut result = EncResult::new(true);
    let mut session = encrypted_data_driver::drive(ctx, doc, encrypted_data, Direction::Encrypt, &mut result)?;
    let ciphertext = session.chain.push_through(data).map_err(|e| ctx.report_err(e))?;
    finalize(ctx, doc, &mut result, &session, ciphertext)?;
    Ok(result)
}

/// Resolves `uri` into the plaintext buffer, then encrypts exactly as
/// [`encrypt_memory`] would. The URI-input transform replaces its own
/// `write` input with the loaded bytes on `flush`, so the seed buffer
/// pushed through the chain is empty.
pub fn encrypt_uri(ctx: &mut Ctx, doc: &mut Document, encrypted_data: NodeId, uri: &str) -> Result<EncResult, XmlEncError> {
    let mut result = EncResult::new(true);
    let mut session = encrypted_data_driver::drive(ctx, doc, encrypted_data, Direction::Encrypt, &mut result)?;
    let uri_input = UriInputTransform::resolve(uri).map_err(|e| ctx.report_err(e))?;
    session.chain.add_head(Box::new(uri_input)).map_err(|e| ctx.report_err(e))?;
    let ciphertext = session.chain.push_through(&[]).map_err(|e| ctx.report_err(e))?;
    finalize(ctx, doc, &mut result, &session, ciphertext)?;
    Ok(result)
}

/// Serializes `source` per `encrypted_data`'s `Type` attribute, encrypts
/// the serialized bytes, and splices `encrypted_data` into the tree in
/// `source`'s place — replacing `source` outright for `#Element`, or
/// becoming `source`'s sole child for `#Content`. An absent `Type` is
/// treated the same as `#Element`. Leaves the tree untouched if `Ctx`'s
/// `ignoreType` switch is set.
pub fn encrypt_xml_node(ctx: &mut Ctx, doc: &mut Document, encrypted_data: NodeId, source: NodeId) -> Result<EncResult, XmlEncError> {
    let enc_type = EncType::parse(doc.get_attr(encrypted_data, "Type"));
    if !enc_type.is_known() {
        return Err(ctx.report_err(XmlEncError::invalid_data(
            "encrypt_xml_node requires Type=#Element, Type=#Content, or no Type attribute on the EncryptedData template",
        )));
    }

    let plaintext = match enc_type {
        EncType::Element | EncType::Unset => serialize_node(doc, source),
        EncType::Content => {
            let mut buf = Vec::new();
            for &child in &doc.node(source).children {
                buf.extend(serialize_node(doc, child));
            }
            buf
        }
        EncType::Other(_) => unreachable!("checked above"),
    };

    let mut result = EncResult::new(true);
    let mut session = encrypted_data_driver::drive(ctx, doc, encrypted_data, Direction::Encrypt, &mut result)?;
    let ciphertext = session.chain.push_through(&plaintext).map_err(|e| ctx.report_err(e))?;
    finalize(ctx, doc, &mut result, &session, ciphertext)?;

    if !ctx.ignore_type() {
        match enc_type {
            EncType::Element | EncType::Unset => doc.replace_node(source, encrypted_data).map_err(|e| ctx.report_err(e))?,
            EncType::Content => doc.replace_children(source, vec![encrypted_data]),
            EncType::Other(_) => unreachable!("checked above"),
        }
        result.replaced = true;
    }

    Ok(result)
}
