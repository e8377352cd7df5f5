// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # RSA-OAEP Key-Transport Transform
//!
//! Implements `http://www.w3.org/2001/04/xmlenc#rsa-oaep-mgf1p`: encrypts
//! (or decrypts) a symmetric content-key under an RSA public/private key
//! pair with OAEP padding (MGF1/SHA-256, diverging from the XML-Enc
//! default of SHA-1 — see the design notes' Open Questions — with no
//! explicit `DigestMethod` negotiation implemented).

use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use xmlenc_domain::services::transform::{BinaryTransform, Direction, TransformDescriptor, TransformKind, TransformPhase};
use xmlenc_domain::value_objects::key::KeyType;
use xmlenc_domain::value_objects::{Key, TransformId};
use xmlenc_domain::XmlEncError;

/// A key the caller installed on an [`RsaOaepTransform`], distinguishing
/// public (encrypt) from private (decrypt) material since the two take
/// different RustCrypto types.
#[derive(Debug)]
enum RsaKey {
    Public(RsaPublicKey),
    Private(RsaPrivateKey),
}

#[derive(Debug)]
pub struct RsaOaepTransform {
    direction: Option<Direction>,
    key: Option<RsaKey>,
    phase: TransformPhase,
    buf: Vec<u8>,
}

impl RsaOaepTransform {
    pub fn new() -> Self {
        Self {
            direction: None,
            key: None,
            phase: TransformPhase::Configured,
            buf: Vec::new(),
        }
    }

    fn id() -> String {
        TransformId::rsa_oaep().to_string()
    }
}

impl Default for RsaOaepTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryTransform for RsaOaepTransform {
    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            id: TransformId::rsa_oaep(),
            kind: TransformKind::Binary,
            key_type_enc: Some(KeyType::RsaPublic),
            key_type_dec: Some(KeyType::RsaPrivate),
        }
    }

    fn phase(&self) -> TransformPhase {
        self.phase
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), XmlEncError> {
        if self.phase != TransformPhase::Configured {
            return Err(XmlEncError::transform_internal(
                Self::id(),
                "set_direction called after the transform started running",
            ));
        }
        self.direction = Some(direction);
        Ok(())
    }

    fn add_key(&mut self, key: &Key) -> Result<(), XmlEncError> {
        let parsed = match key.key_type() {
            KeyType::RsaPublic => {
                let spki = rsa::pkcs8::DecodePublicKey::from_public_key_der(key.bytes())
                    .map_err(|e| XmlEncError::transform_internal(Self::id(), format!("bad RSA public key: {e}")))?;
                RsaKey::Public(spki)
            }
            KeyType::RsaPrivate => {
                let pkcs8 = rsa::pkcs8::DecodePrivateKey::from_pkcs8_der(key.bytes())
                    .map_err(|e| XmlEncError::transform_internal(Self::id(), format!("bad RSA private key: {e}")))?;
                RsaKey::Private(pkcs8)
            }
            other => {
                return Err(XmlEncError::transform_internal(
                    Self::id(),
                    format!("RSA-OAEP requires an RSA key, got {other:?}"),
                ))
            }
        };
        self.key = Some(parsed);
        Ok(())
    }

    fn write(&mut self, input: &[u8]) -> Result<(), XmlEncError> {
        self.phase = TransformPhase::Running;
        self.buf.extend_from_slice(input);
        Ok(())
    }

    fn flush(&mut self) -> Result<Vec<u8>, XmlEncError> {
        self.phase = TransformPhase::Finalized;
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| XmlEncError::transform_internal(Self::id(), "no key installed"))?;
        let direction = self
            .direction
            .ok_or_else(|| XmlEncError::transform_internal(Self::id(), "direction not set"))?;
        let input = std::mem::take(&mut self.buf);

        match (direction, key) {
            (Direction::Encrypt, RsaKey::Public(pk)) => {
                let mut rng = rand::rngs::OsRng;
                pk.encrypt(&mut rng, Oaep::new::<Sha256>(), &input)
                    .map_err(|e| XmlEncError::transform_internal(Self::id(), format!("RSA-OAEP encrypt failed: {e}")))
            }
            (Direction::Decrypt, RsaKey::Private(sk)) => sk
                .decrypt(Oaep::new::<Sha256>(), &input)
                .map_err(|e| XmlEncError::transform_internal(Self::id(), format!("RSA-OAEP decrypt failed: {e}"))),
            _ => Err(XmlEncError::transform_internal(
                Self::id(),
                "key type does not match the configured direction (need public key to encrypt, private to decrypt)",
            )),
        }
    }
}
