// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # EncryptedData Driver (C5)
//!
//! Walks an `EncryptedData` element's children in schema order, resolves
//! the cipher transform and the key, and produces a [`Session`] ready for
//! C3/C4 to drive. Key resolution happens here: if the caller did not
//! supply a key (`result.key` is `None` on entry), the key manager
//! callback is invoked with selection hints derived from the transform's
//! descriptor and the operation's direction.

use xmlenc_domain::entities::EncResult;
use xmlenc_domain::services::transform::Direction;
use xmlenc_domain::value_objects::key::KeyUsage;
use xmlenc_domain::value_objects::EncType;
use xmlenc_domain::XmlEncError;

use crate::application::ctx::Ctx;
use crate::application::session::Session;
use crate::application::template::ENC_NS;
use crate::dom::Document;
use crate::dom::NodeId;
use crate::infrastructure::dsig::write_key_info;

/// Walks `encrypted_data`, builds the transform chain's cipher link, and
/// resolves the key — populating `result` with the copied attributes and
/// (if not already present) the resolved key.
pub fn drive(ctx: &mut Ctx, doc: &mut Document, encrypted_data: NodeId, direction: Direction, result: &mut EncResult) -> Result<Session, XmlEncError> {
    if !doc.check_node_name(encrypted_data, "EncryptedData", Some(ENC_NS)) {
        let found = doc.node(encrypted_data).local_name().unwrap_or("?").to_string();
        return Err(ctx.report_err(XmlEncError::invalid_node("EncryptedData", found)));
    }

    result.id = doc.get_attr(encrypted_data, "Id").map(str::to_string);
    result.enc_type = EncType::parse(doc.get_attr(encrypted_data, "Type"));
    result.mime_type = doc.get_attr(encrypted_data, "MimeType").map(str::to_string);
    result.encoding = doc.get_attr(encrypted_data, "Encoding").map(str::to_string);

    doc.register_id(encrypted_data);

    let mut cursor = doc.first_element_child(encrypted_data);

    let alg_id = if let Some(node) = cursor.filter(|&n| doc.check_node_name(n, "EncryptionMethod", Some(ENC_NS))) {
        let alg = doc
            .get_attr(node, "Algorithm")
            .ok_or_else(|| ctx.report_err(XmlEncError::invalid_node_content("EncryptionMethod")))?
            .to_string();
        cursor = doc.next_element_sibling(node);
        alg
    } else if let Some(default_method) = ctx.default_encryption_method() {
        default_method.to_string()
    } else {
        return Err(ctx.report_err(XmlEncError::invalid_data(
            "encryption method not specified: no EncryptionMethod element and no Ctx default",
        )));
    };

    let mut chain = crate::infrastructure::chain::TransformChain::new();
    let transform_id = xmlenc_domain::value_objects::TransformId::new(alg_id.clone()).map_err(|e| ctx.report_err(e))?;
    let mut cipher = ctx.registry().create(&transform_id).map_err(|e| ctx.report_err(e))?;
    cipher.set_direction(direction).map_err(|e| ctx.report_err(e))?;
    let descriptor = cipher.descriptor();
    chain.add_tail(cipher).map_err(|e| ctx.report_err(e))?;
    result.encryption_method = Some(alg_id);

    let key_info_node = cursor.filter(|&n| doc.check_node_name(n, "KeyInfo", Some(crate::infrastructure::dsig::DS_NS)));
    if let Some(node) = key_info_node {
        cursor = doc.next_element_sibling(node);
    }

    if result.key.is_none() {
        let required_key_type = match direction {
            Direction::Encrypt => descriptor.key_type_enc,
            Direction::Decrypt => descriptor.key_type_dec,
        };
        let key_manager = ctx
            .key_manager()
            .ok_or_else(|| ctx.report_err(XmlEncError::key_not_found(None, "no key supplied and no key manager configured")))?;

        ctx.key_mngr_ctx_mut().key_type = required_key_type;
        ctx.key_mngr_ctx_mut().key_usage = Some(match direction {
            Direction::Encrypt => KeyUsage::Encrypt,
            Direction::Decrypt => KeyUsage::Decrypt,
        });

        let key_info_text = key_info_node.map(|n| doc.text_content(n)).filter(|s| !s.is_empty());
        let key_mngr_ctx = ctx.key_mngr_ctx_mut().clone();
        let resolved = key_manager.resolve(key_info_text.as_deref(), &key_mngr_ctx).ok_or_else(|| {
            ctx.report_err(XmlEncError::key_not_found(
                key_mngr_ctx.key_id.clone(),
                format!("{:?}", key_mngr_ctx.key_usage),
            ))
        })?;
        result.key = Some(resolved);
    }

    chain
        .add_key_at(0, result.key.as_ref().expect("key resolved or supplied above"))
        .map_err(|e| ctx.report_err(e))?;

    if direction == Direction::Encrypt {
        if let Some(key_info) = key_info_node {
            write_key_info(doc, key_info, result.key.as_ref().unwrap()).map_err(|e| ctx.report_err(e))?;
        }
    }

    let cipher_data_node = cursor.ok_or_else(|| ctx.report_err(XmlEncError::node_not_found("CipherData")))?;
    if !doc.check_node_name(cipher_data_node, "CipherData", Some(ENC_NS)) {
        let found = doc.node(cipher_data_node).local_name().unwrap_or("?").to_string();
        return Err(ctx.report_err(XmlEncError::invalid_node("CipherData", found)));
    }

    if direction == Direction::Encrypt {
        chain
            .add_tail(crate::infrastructure::transforms::base64_encoder())
            .map_err(|e| ctx.report_err(e))?;
        chain
            .add_tail(Box::new(crate::infrastructure::transforms::MemBufferSink::new()))
            .map_err(|e| ctx.report_err(e))?;
    }

    Ok(Session {
        direction,
        chain,
        cipher_index: 0,
        cipher_data_node,
        enc_type: result.enc_type.clone(),
    })
}
