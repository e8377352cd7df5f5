// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Session (EncState)
//!
//! Transient bookkeeping for one encrypt/decrypt call: the transform
//! chain under construction, the cipher transform's current index within
//! it (shifts when C6 prepends a base64-decoder), the located
//! `CipherData` node, and the `Type` attribute driving the splice step.

use xmlenc_domain::services::transform::Direction;
use xmlenc_domain::value_objects::EncType;

use crate::dom::NodeId;
use crate::infrastructure::chain::TransformChain;

#[derive(Debug)]
pub struct Session {
    pub direction: Direction,
    pub chain: TransformChain,
    pub cipher_index: usize,
    pub cipher_data_node: NodeId,
    pub enc_type: EncType,
}
