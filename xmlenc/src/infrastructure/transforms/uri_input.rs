// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # URI Input Transform
//!
//! Resolves `data:` URIs and local file paths into an in-memory buffer at
//! construction time. The original drives this transform with a pull
//! discipline (`read` at the chain tail, blocking on I/O as needed); this
//! engine's one-buffer-per-operation model (§5 Non-goals: no streaming)
//! lets the resource be loaded eagerly and then replayed through the same
//! push-based `write`/`flush` the rest of the chain uses. No network
//! fetcher is implemented — only `data:` and local file paths resolve.

use xmlenc_domain::services::transform::{BinaryTransform, Direction, TransformDescriptor, TransformKind, TransformPhase};
use xmlenc_domain::value_objects::{Key, TransformId};
use xmlenc_domain::XmlEncError;

#[derive(Debug)]
pub struct UriInputTransform {
    phase: TransformPhase,
    loaded: Vec<u8>,
}

impl UriInputTransform {
    /// Resolves `uri` immediately, returning the loaded bytes or a fatal
    /// error if the URI scheme isn't supported or the resource can't be
    /// read.
    pub fn resolve(uri: &str) -> Result<Self, XmlEncError> {
        let loaded = resolve_uri(uri)?;
        Ok(Self {
            phase: TransformPhase::Configured,
            loaded,
        })
    }
}

/// Resolves a `data:` URI (optionally `;base64`) or a local file path into
/// raw bytes.
pub fn resolve_uri(uri: &str) -> Result<Vec<u8>, XmlEncError> {
    if let Some(rest) = uri.strip_prefix("data:") {
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| XmlEncError::invalid_data("malformed data: URI, missing ','"))?;
        if meta.contains("base64") {
            use base64::engine::general_purpose::STANDARD;
            use base64::Engine;
            STANDARD
                .decode(payload.as_bytes())
                .map_err(|e| XmlEncError::invalid_data(format!("invalid base64 in data: URI: {e}")))
        } else {
            Ok(payload.as_bytes().to_vec())
        }
    } else {
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        std::fs::read(path).map_err(|e| XmlEncError::invalid_data(format!("cannot read '{path}': {e}")))
    }
}

impl BinaryTransform for UriInputTransform {
    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            id: TransformId::new("urn:xmlenc:uri-input").unwrap(),
            kind: TransformKind::Binary,
            key_type_enc: None,
            key_type_dec: None,
        }
    }

    fn phase(&self) -> TransformPhase {
        self.phase
    }

    fn set_direction(&mut self, _direction: Direction) -> Result<(), XmlEncError> {
        Ok(())
    }

    fn add_key(&mut self, _key: &Key) -> Result<(), XmlEncError> {
        Ok(())
    }

    fn write(&mut self, _input: &[u8]) -> Result<(), XmlEncError> {
        self.phase = TransformPhase::Running;
        Ok(())
    }

    fn flush(&mut self) -> Result<Vec<u8>, XmlEncError> {
        self.phase = TransformPhase::Finalized;
        Ok(std::mem::take(&mut self.loaded))
    }
}
