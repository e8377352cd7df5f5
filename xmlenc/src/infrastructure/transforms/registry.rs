// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Built-in Transform Registry
//!
//! Pre-registers AES-128/256-CBC and RSA-OAEP under their W3C algorithm
//! URIs. Other algorithm ids (3DES, AES-GCM, …) remain valid
//! `TransformId` values elsewhere in the engine — `is_registered` simply
//! reports them as absent, and `create` returns `InvalidData`, matching
//! C5 step 3's "encryption method not specified" fatal path.

use std::collections::HashMap;

use xmlenc_domain::services::registry::TransformRegistry;
use xmlenc_domain::services::transform::BinaryTransform;
use xmlenc_domain::value_objects::TransformId;
use xmlenc_domain::XmlEncError;

use super::cipher::aes_cbc::{AesCbcTransform, AesKeySize};
use super::cipher::rsa_oaep::RsaOaepTransform;

type Factory = fn() -> Box<dyn BinaryTransform>;

/// The registry shipped with this engine: a fixed id → constructor table
/// built once at startup.
#[derive(Debug)]
pub struct BuiltinRegistry {
    factories: HashMap<String, Factory>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        let mut factories: HashMap<String, Factory> = HashMap::new();
        factories.insert(TransformId::aes128_cbc().to_string(), || {
            Box::new(AesCbcTransform::new(AesKeySize::Aes128))
        });
        factories.insert(TransformId::aes256_cbc().to_string(), || {
            Box::new(AesCbcTransform::new(AesKeySize::Aes256))
        });
        factories.insert(TransformId::rsa_oaep().to_string(), || Box::new(RsaOaepTransform::new()));
        Self { factories }
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformRegistry for BuiltinRegistry {
    fn create(&self, id: &TransformId) -> Result<Box<dyn BinaryTransform>, XmlEncError> {
        let factory = self
            .factories
            .get(id.as_str())
            .ok_or_else(|| XmlEncError::invalid_data(format!("no registered transform for '{id}'")))?;
        Ok(factory())
    }

    fn is_registered(&self, id: &TransformId) -> bool {
        self.factories.contains_key(id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aes_algorithms_are_pre_registered() {
        let registry = BuiltinRegistry::new();
        assert!(registry.is_registered(&TransformId::aes128_cbc()));
        assert!(registry.is_registered(&TransformId::aes256_cbc()));
        assert!(registry.is_registered(&TransformId::rsa_oaep()));
    }

    #[test]
    fn unknown_algorithm_is_not_registered_and_create_fails() {
        let registry = BuiltinRegistry::new();
        let id = TransformId::new("http://www.w3.org/2001/04/xmlenc#tripledes-cbc").unwrap();
        assert!(!registry.is_registered(&id));
        assert!(registry.create(&id).is_err());
    }
}
