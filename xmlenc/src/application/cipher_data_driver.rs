// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # CipherData Driver (C6)
//!
//! Read path (decrypt): either takes `CipherData/CipherValue`'s base64
//! text through a freshly prepended decoder, or resolves a
//! `CipherReference` into an external [`TransformState`] pipeline and
//! transplants the session's remaining chain links onto it one at a time.
//!
//! Write path (encrypt): writes (or overwrites) `CipherValue`'s text with
//! the session's ciphertext, bracketed by newlines; a `CipherReference`
//! child is left untouched.

use xmlenc_domain::XmlEncError;

use crate::application::session::Session;
use crate::application::template::ENC_NS;
use crate::dom::Document;
use crate::infrastructure::dsig::transforms_reader::{read_transform_algorithms, TransformState};
use crate::infrastructure::transforms::base64_decoder;
use crate::infrastructure::transforms::MemBufferSink;

/// Executes the read path: produces the plaintext buffer for `session`'s
/// `CipherData` node.
pub fn read(ctx: &crate::application::ctx::Ctx, doc: &mut Document, session: &mut Session) -> Result<Vec<u8>, XmlEncError> {
    let cipher_data = session.cipher_data_node;
    let first = doc
        .first_element_child(cipher_data)
        .ok_or_else(|| ctx.report_err(XmlEncError::node_not_found("CipherValue or CipherReference")))?;

    if doc.check_node_name(first, "CipherValue", Some(ENC_NS)) {
        session.chain.add_head(base64_decoder()).map_err(|e| ctx.report_err(e))?;
        session.cipher_index += 1;
        session.chain.add_tail(Box::new(MemBufferSink::new())).map_err(|e| ctx.report_err(e))?;

        let text = doc.text_content(first);
        if text.trim().is_empty() {
            return Err(ctx.report_err(XmlEncError::invalid_node_content("CipherValue")));
        }
        session.chain.push_through(text.as_bytes()).map_err(|e| ctx.report_err(e))
    } else if doc.check_node_name(first, "CipherReference", Some(ENC_NS)) {
        let uri = doc
            .get_attr(first, "URI")
            .ok_or_else(|| ctx.report_err(XmlEncError::invalid_node_content("CipherReference")))?
            .to_string();

        let mut state = TransformState::seeded(&uri).map_err(|e| ctx.report_err(e))?;

        if let Some(transforms_node) = doc.find_child(first, "Transforms", Some(ENC_NS)) {
            for alg in read_transform_algorithms(doc, transforms_node) {
                let id = xmlenc_domain::value_objects::TransformId::new(alg).map_err(|e| ctx.report_err(e))?;
                if id.as_str() == xmlenc_domain::value_objects::TransformId::base64().as_str() {
                    state.update(base64_decoder()).map_err(|e| ctx.report_err(e))?;
                } else {
                    let transform = ctx.registry().create(&id).map_err(|e| ctx.report_err(e))?;
                    state.update(transform).map_err(|e| ctx.report_err(e))?;
                }
            }
        }

        // Transplant the session chain's own transforms onto the external
        // pipeline, one at a time, then finalize in binary-result mode.
        while session.chain.len() > 0 {
            let transform = session.chain.take(0);
            state.update(transform).map_err(|e| ctx.report_err(e))?;
        }

        state.finalize().map_err(|e| ctx.report_err(e))
    } else {
        Err(ctx.report_err(XmlEncError::invalid_node(
            "CipherValue|CipherReference",
            doc.node(first).local_name().unwrap_or("?").to_string(),
        )))
    }
}

/// Executes the write path: writes `ciphertext` as `CipherData`'s
/// `CipherValue` text (creating it if absent); no-ops for
/// `CipherReference`.
pub fn write(doc: &mut Document, cipher_data: crate::dom::NodeId, ciphertext: &[u8]) -> Result<(), XmlEncError> {
    let framed = {
        let mut s = String::from("\n");
        s.push_str(&String::from_utf8_lossy(ciphertext));
        s.push('\n');
        s
    };

    match doc.first_element_child(cipher_data) {
        None => {
            let node = crate::application::template::add_cipher_value(doc, cipher_data)?;
            doc.set_text_content(node, &framed);
            Ok(())
        }
        Some(node) if doc.check_node_name(node, "CipherValue", Some(ENC_NS)) => {
            doc.set_text_content(node, &framed);
            if doc.next_element_sibling(node).is_some() {
                return Err(XmlEncError::invalid_node("end of CipherData", "unexpected trailing element"));
            }
            Ok(())
        }
        Some(node) if doc.check_node_name(node, "CipherReference", Some(ENC_NS)) => Ok(()),
        Some(node) => Err(XmlEncError::invalid_node(
            "CipherValue|CipherReference",
            doc.node(node).local_name().unwrap_or("?").to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ctx::Ctx;
    use crate::application::template::{add_cipher_reference, add_cipher_value, add_transform, create_encrypted_data};
    use crate::infrastructure::chain::TransformChain;
    use crate::infrastructure::transforms::BuiltinRegistry;
    use xmlenc_domain::services::transform::Direction;
    use xmlenc_domain::value_objects::EncType;

    fn session_with_chain(cipher_data: crate::dom::NodeId) -> Session {
        Session {
            direction: Direction::Decrypt,
            chain: TransformChain::new(),
            cipher_index: 0,
            cipher_data_node: cipher_data,
            enc_type: EncType::Unset,
        }
    }

    #[test]
    fn write_creates_cipher_value_when_absent() {
        let mut doc = Document::new();
        let ed = create_encrypted_data(&mut doc, None, None, None, None);
        let cd = doc.find_child(ed, "CipherData", Some(ENC_NS)).unwrap();

        write(&mut doc, cd, b"Y2lwaGVy").unwrap();
        let cv = doc.find_child(cd, "CipherValue", Some(ENC_NS)).unwrap();
        assert_eq!(doc.text_content(cv), "\nY2lwaGVy\n");
    }

    #[test]
    fn write_overwrites_existing_cipher_value() {
        let mut doc = Document::new();
        let ed = create_encrypted_data(&mut doc, None, None, None, None);
        let cd = doc.find_child(ed, "CipherData", Some(ENC_NS)).unwrap();
        add_cipher_value(&mut doc, cd).unwrap();

        write(&mut doc, cd, b"new").unwrap();
        let cv = doc.find_child(cd, "CipherValue", Some(ENC_NS)).unwrap();
        assert_eq!(doc.text_content(cv), "\nnew\n");
    }

    #[test]
    fn write_is_a_no_op_for_cipher_reference() {
        let mut doc = Document::new();
        let ed = create_encrypted_data(&mut doc, None, None, None, None);
        let cd = doc.find_child(ed, "CipherData", Some(ENC_NS)).unwrap();
        add_cipher_reference(&mut doc, cd, Some("data:,x")).unwrap();

        write(&mut doc, cd, b"ignored").unwrap();
        let reference = doc.find_child(cd, "CipherReference", Some(ENC_NS)).unwrap();
        assert_eq!(doc.get_attr(reference, "URI"), Some("data:,x"));
    }

    #[test]
    fn read_decodes_cipher_value_text() {
        let mut doc = Document::new();
        let ed = create_encrypted_data(&mut doc, None, None, None, None);
        let cd = doc.find_child(ed, "CipherData", Some(ENC_NS)).unwrap();
        let cv = add_cipher_value(&mut doc, cd).unwrap();
        doc.set_text_content(cv, "aGVsbG8=");

        let ctx = Ctx::new(Box::new(BuiltinRegistry::new()));
        let mut session = session_with_chain(cd);
        let out = read(&ctx, &mut doc, &mut session).unwrap();
        assert_eq!(out, b"hello");
    }

    #[test]
    fn read_resolves_cipher_reference_with_base64_transform() {
        let mut doc = Document::new();
        let ed = create_encrypted_data(&mut doc, None, None, None, None);
        let cd = doc.find_child(ed, "CipherData", Some(ENC_NS)).unwrap();
        let reference = add_cipher_reference(&mut doc, cd, Some("data:application/octet-stream,aGVsbG8=")).unwrap();
        add_transform(&mut doc, reference, "http://www.w3.org/2000/09/xmldsig#base64").unwrap();

        let ctx = Ctx::new(Box::new(BuiltinRegistry::new()));
        let mut session = session_with_chain(cd);
        let out = read(&ctx, &mut doc, &mut session).unwrap();
        assert_eq!(out, b"hello");
    }
}
