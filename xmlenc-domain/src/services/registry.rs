// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Transform Registry Port (C5/C1 collaborator)
//!
//! The registry hands out already-boxed [`BinaryTransform`] implementations
//! keyed by algorithm id. The EncryptedData driver and the CipherData
//! driver both call `create` to instantiate the transforms the template
//! names; neither driver knows the concrete cipher/codec types.

use crate::error::XmlEncError;
use crate::services::transform::BinaryTransform;
use crate::value_objects::transform_id::TransformId;

/// Looks up and instantiates transforms by algorithm id.
pub trait TransformRegistry: std::fmt::Debug + Send + Sync {
    /// Instantiate a fresh, `Configured`-phase transform for `id`.
    ///
    /// Returns `InvalidData` if `id` is not registered — the EncryptedData
    /// driver maps that into the same fatal path as "encryption method not
    /// specified".
    fn create(&self, id: &TransformId) -> Result<Box<dyn BinaryTransform>, XmlEncError>;

    /// Whether `id` is registered, without instantiating it.
    fn is_registered(&self, id: &TransformId) -> bool;
}
