// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Decrypt Session (C4)
//!
//! Drives C5 to build the chain and resolve the key, hands `CipherData`
//! to C6's read path to produce the plaintext buffer, then splices the
//! result into the tree per `Type`: `#Element` parses the plaintext as a
//! standalone element and replaces `encrypted_data` outright; `#Content`
//! parses it as a fragment and replaces `encrypted_data` with the parsed
//! children; any other `Type` (including absent) leaves the tree
//! untouched and only populates `result.buffer`.

use xmlenc_domain::entities::EncResult;
use xmlenc_domain::services::transform::Direction;
use xmlenc_domain::value_objects::{EncType, Key};
use xmlenc_domain::XmlEncError;

use crate::application::ctx::Ctx;
use crate::application::{cipher_data_driver, encrypted_data_driver};
use crate::dom::{parse_document, Document, NodeId};

/// Decrypts `encrypted_data`. If `key` is supplied it is used as-is and no
/// key manager lookup happens; otherwise C5 resolves one via `Ctx`'s key
/// manager.
pub fn decrypt(ctx: &mut Ctx, doc: &mut Document, encrypted_data: NodeId, key: Option<Key>) -> Result<EncResult, XmlEncError> {
    let mut result = EncResult::new(false);
    result.key = key;

    let mut session = encrypted_data_driver::drive(ctx, doc, encrypted_data, Direction::Decrypt, &mut result)?;
    let plaintext = cipher_data_driver::read(ctx, doc, &mut session)?;

    if !ctx.ignore_type() {
        match session.enc_type {
            EncType::Element => {
                let (fragment, root) = parse_document(&plaintext).map_err(|e| ctx.report_err(e))?;
                let grafted = graft(doc, &fragment, root);
                doc.replace_node(encrypted_data, grafted).map_err(|e| ctx.report_err(e))?;
                result.replaced = true;
            }
            EncType::Content => {
                let wrapped = wrap_fragment(&plaintext);
                let (fragment, root) = parse_document(wrapped.as_bytes()).map_err(|e| ctx.report_err(e))?;
                let children: Vec<NodeId> = doc_children(&fragment, root);
                let grafted: Vec<NodeId> = children.into_iter().map(|c| graft(doc, &fragment, c)).collect();
                doc.replace_node_with_siblings(encrypted_data, grafted).map_err(|e| ctx.report_err(e))?;
                result.replaced = true;
            }
            _ => {}
        }
    }

    result.buffer = Some(plaintext);
    Ok(result)
}

fn doc_children(fragment: &Document, node: NodeId) -> Vec<NodeId> {
    fragment.node(node).children.clone()
}

fn wrap_fragment(plaintext: &[u8]) -> String {
    let mut s = String::from("<xmlenc-fragment>");
    s.push_str(&String::from_utf8_lossy(plaintext));
    s.push_str("</xmlenc-fragment>");
    s
}

/// Copies `node` and its subtree from `fragment` into `doc`, since a
/// freshly parsed fragment lives in its own arena and node ids are not
/// portable across documents.
fn graft(doc: &mut Document, fragment: &Document, node: NodeId) -> NodeId {
    let dom = fragment.node(node);
    match &dom.kind {
        crate::dom::NodeKind::Text(text) => doc.create_text(text.clone()),
        crate::dom::NodeKind::Element { local_name, prefix, ns_uri } => {
            let copy = doc.create_element(local_name.clone(), prefix.as_deref(), ns_uri.as_deref());
            for (k, v) in &dom.attrs {
                doc.set_attr(copy, k.clone(), v.clone());
            }
            let children: Vec<NodeId> = dom.children.clone();
            for child in children {
                let grafted_child = graft(doc, fragment, child);
                doc.append_child(copy, grafted_child);
            }
            copy
        }
    }
}
