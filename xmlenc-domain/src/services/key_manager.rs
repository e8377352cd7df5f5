// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Key Manager Port (C5 collaborator)
//!
//! `KeyManager` is the pluggable resolution callback the EncryptedData
//! driver invokes when the caller did not supply a key directly. The
//! driver populates [`KeyManagerContext`] with selection hints (required
//! key type, usage, and an optional key id) before calling
//! [`KeyManager::resolve`].

use crate::value_objects::key::{Key, KeyType, KeyUsage};

/// Selection hints the EncryptedData driver sets before resolving a key.
#[derive(Debug, Clone)]
pub struct KeyManagerContext {
    pub key_type: Option<KeyType>,
    pub key_usage: Option<KeyUsage>,
    pub key_id: Option<String>,
}

impl KeyManagerContext {
    pub fn new() -> Self {
        Self {
            key_type: None,
            key_usage: None,
            key_id: None,
        }
    }
}

impl Default for KeyManagerContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A `KeyInfo` node's opaque representation, as surfaced to the key
/// manager. The engine does not interpret `KeyInfo` content itself beyond
/// what the dsig KeyInfo writer produces; the key manager is free to parse
/// whatever representation it is given (e.g. a `ds:KeyName` text value) to
/// pick the right key.
pub type KeyInfoHandle<'a> = Option<&'a str>;

/// Resolves a `Key` from an optional `KeyInfo` hint plus the context's
/// selection fields. Returning `None` is a `KeyNotFound` error at the call
/// site — the trait itself does not construct `XmlEncError` since it lives
/// in the domain layer and does not know about the XML tree.
pub trait KeyManager: std::fmt::Debug + Send + Sync {
    fn resolve(&self, key_info: KeyInfoHandle<'_>, ctx: &KeyManagerContext) -> Option<Key>;
}
