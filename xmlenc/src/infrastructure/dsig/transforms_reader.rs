// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Transforms Reader & `TransformState` (C6 `CipherReference` path)
//!
//! A thin wrapper reusing [`crate::infrastructure::chain::TransformChain`]:
//! `TransformState::seeded` resolves a `CipherReference`'s `URI` into a
//! buffer, `update` accepts transforms detached one-by-one from the
//! session's chain (per the transplant described in the design notes), and
//! `finalize` drives the buffer through them to produce the plaintext.

use xmlenc_domain::services::transform::BinaryTransform;
use xmlenc_domain::XmlEncError;

use crate::infrastructure::chain::TransformChain;
use crate::infrastructure::transforms::uri_input::resolve_uri;

/// Parses a `<Transforms><ds:Transform Algorithm="..."/>*</Transforms>`
/// element's `Algorithm` attribute list, in document order, from the
/// already-parsed DOM. The caller resolves each id through the transform
/// registry and feeds the result to [`TransformState::update`].
pub fn read_transform_algorithms(doc: &crate::dom::Document, transforms_node: crate::dom::NodeId) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = doc.first_element_child(transforms_node);
    while let Some(node) = cursor {
        if let Some(alg) = doc.get_attr(node, "Algorithm") {
            out.push(alg.to_string());
        }
        cursor = doc.next_element_sibling(node);
    }
    out
}

/// An external pipeline rooted at a resolved URI, independent of the
/// session's own chain — used only by `CipherReference` decryption.
#[derive(Debug)]
pub struct TransformState {
    buffer: Vec<u8>,
    chain: TransformChain,
}

impl TransformState {
    /// Resolves `uri` into the starting buffer.
    pub fn seeded(uri: &str) -> Result<Self, XmlEncError> {
        Ok(Self {
            buffer: resolve_uri(uri)?,
            chain: TransformChain::new(),
        })
    }

    /// Appends a transform, detached from the session's own chain, to this
    /// pipeline's tail.
    pub fn update(&mut self, transform: Box<dyn BinaryTransform>) -> Result<(), XmlEncError> {
        self.chain.add_tail(transform)
    }

    /// Drives the seeded buffer through every appended transform and
    /// returns the result — "binary-result mode" in the design notes,
    /// since this engine has no XML/C14n transforms to run afterward.
    pub fn finalize(mut self) -> Result<Vec<u8>, XmlEncError> {
        self.chain.push_through(&self.buffer)
    }
}
