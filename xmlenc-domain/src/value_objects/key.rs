// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Key Value Object
//!
//! A `Key` is the unit of secret or public material a cipher transform
//! consumes. It tracks where the bytes came from (`origin`) so callers and
//! key managers can distinguish material the engine resolved itself from
//! material handed in directly; nothing in the EncryptedData driver (C5)
//! branches on it when deciding whether to write `KeyInfo` back onto the
//! template — that decision depends only on whether a `KeyInfo` node is
//! present, not on where the key came from.

use zeroize::Zeroize;

/// Where a `Key`'s bytes came from.
///
/// Mirrors the `origin` tag on the session's `key` field in the original
/// design. Informational only: the EncryptedData driver writes `KeyInfo`
/// back onto the template whenever the template carries a `KeyInfo` node,
/// regardless of this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyOrigin {
    /// Supplied directly by the caller to `encrypt_*`/`decrypt`.
    Static,
    /// Derived at runtime (e.g. from a passphrase) — reserved for future
    /// key-derivation transforms; not produced by anything in this engine
    /// today.
    Dynamic,
    /// Resolved via the key manager callback during the EncryptedData walk.
    KeyManager,
}

/// The key type a transform requires, distinguished by direction since an
/// asymmetric cipher may need a public key to encrypt and a private key to
/// decrypt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Aes128,
    Aes256,
    RsaPublic,
    RsaPrivate,
}

/// What the key is being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyUsage {
    Encrypt,
    Decrypt,
}

impl std::fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encrypt => write!(f, "encrypt"),
            Self::Decrypt => write!(f, "decrypt"),
        }
    }
}

/// Key material plus its provenance and an optional human-readable name
/// (surfaced on `ds:KeyName` when the key is written back to a `KeyInfo`
/// node).
///
/// Key bytes are zeroized on drop; `Key` is intentionally not `Clone` to
/// keep the number of live copies of secret material minimal — callers that
/// need to retain a key duplicate it explicitly via [`Key::duplicate`].
#[derive(Debug)]
pub struct Key {
    bytes: Vec<u8>,
    key_type: KeyType,
    origin: KeyOrigin,
    name: Option<String>,
}

impl Key {
    pub fn new(bytes: Vec<u8>, key_type: KeyType, origin: KeyOrigin) -> Self {
        Self {
            bytes,
            key_type,
            origin,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn origin(&self) -> KeyOrigin {
        self.origin
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Produces an owned copy, preserving the `origin` tag — used when a
    /// `Result` needs to retain the key independently of the session that
    /// resolved it.
    pub fn duplicate(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            key_type: self.key_type,
            origin: self.origin,
            name: self.name.clone(),
        }
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_preserves_origin_and_bytes() {
        let key = Key::new(vec![1, 2, 3, 4], KeyType::Aes128, KeyOrigin::KeyManager).with_name("k1");
        let dup = key.duplicate();
        assert_eq!(dup.bytes(), key.bytes());
        assert_eq!(dup.origin(), key.origin());
        assert_eq!(dup.name(), Some("k1"));
    }

    #[test]
    fn key_usage_display() {
        assert_eq!(KeyUsage::Encrypt.to_string(), "encrypt");
        assert_eq!(KeyUsage::Decrypt.to_string(), "decrypt");
    }
}
