// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Transform Id Value Object
//!
//! `TransformId` wraps the algorithm URI that appears as `Algorithm="..."`
//! on `EncryptionMethod` and `ds:Transform` elements. It is the key the
//! transform registry looks up to produce a boxed [`crate::services::transform::BinaryTransform`].

use crate::error::XmlEncError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated algorithm URI, e.g.
/// `http://www.w3.org/2001/04/xmlenc#aes128-cbc`.
#[derive(Debug, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransformId(String);

impl TransformId {
    pub fn new(uri: impl Into<String>) -> Result<Self, XmlEncError> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(XmlEncError::invalid_data("transform id URI cannot be empty"));
        }
        Ok(Self(uri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The well-known AES-128-CBC algorithm URI.
    pub fn aes128_cbc() -> Self {
        Self("http://www.w3.org/2001/04/xmlenc#aes128-cbc".to_string())
    }

    /// The well-known AES-256-CBC algorithm URI.
    pub fn aes256_cbc() -> Self {
        Self("http://www.w3.org/2001/04/xmlenc#aes256-cbc".to_string())
    }

    /// The well-known RSA-OAEP key-transport algorithm URI.
    pub fn rsa_oaep() -> Self {
        Self("http://www.w3.org/2001/04/xmlenc#rsa-oaep-mgf1p".to_string())
    }

    /// Base64 codec pseudo-transform (not on the wire as an `Algorithm`
    /// value; used internally as a registry key for C1/C6 chain building).
    pub fn base64() -> Self {
        Self("http://www.w3.org/2000/09/xmldsig#base64".to_string())
    }
}

impl fmt::Display for TransformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TransformId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_uri() {
        assert!(TransformId::new("").is_err());
    }

    #[test]
    fn well_known_ids_round_trip_through_display() {
        assert_eq!(
            TransformId::aes128_cbc().to_string(),
            "http://www.w3.org/2001/04/xmlenc#aes128-cbc"
        );
        assert_eq!(
            TransformId::rsa_oaep().to_string(),
            "http://www.w3.org/2001/04/xmlenc#rsa-oaep-mgf1p"
        );
    }
}
