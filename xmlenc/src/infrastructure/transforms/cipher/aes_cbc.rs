// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # AES-CBC Cipher Transform
//!
//! Implements `http://www.w3.org/2001/04/xmlenc#aes128-cbc` and
//! `...#aes256-cbc`. On encrypt, a fresh random IV is generated, PKCS#7
//! padding is applied, and the wire format is `IV || ciphertext`
//! (mandated by the XML-Enc block-cipher convention); on decrypt the IV is
//! the leading block and padding is stripped on unpad.

use aes::{Aes128, Aes256};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;

use xmlenc_domain::services::transform::{BinaryTransform, Direction, TransformDescriptor, TransformKind, TransformPhase};
use xmlenc_domain::value_objects::key::KeyType;
use xmlenc_domain::value_objects::{Key, TransformId};
use xmlenc_domain::XmlEncError;

const BLOCK_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesKeySize {
    Aes128,
    Aes256,
}

impl AesKeySize {
    fn byte_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes256 => 32,
        }
    }

    fn transform_id(self) -> TransformId {
        match self {
            Self::Aes128 => TransformId::aes128_cbc(),
            Self::Aes256 => TransformId::aes256_cbc(),
        }
    }

    fn key_type(self) -> KeyType {
        match self {
            Self::Aes128 => KeyType::Aes128,
            Self::Aes256 => KeyType::Aes256,
        }
    }
}

#[derive(Debug)]
pub struct AesCbcTransform {
    size: AesKeySize,
    direction: Option<Direction>,
    key: Option<Vec<u8>>,
    phase: TransformPhase,
    buf: Vec<u8>,
}

impl AesCbcTransform {
    pub fn new(size: AesKeySize) -> Self {
        Self {
            size,
            direction: None,
            key: None,
            phase: TransformPhase::Configured,
            buf: Vec::new(),
        }
    }
}

impl BinaryTransform for AesCbcTransform {
    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            id: self.size.transform_id(),
            kind: TransformKind::Binary,
            key_type_enc: Some(self.size.key_type()),
            key_type_dec: Some(self.size.key_type()),
        }
    }

    fn phase(&self) -> TransformPhase {
        self.phase
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), XmlEncError> {
        if self.phase != TransformPhase::Configured {
            return Err(XmlEncError::transform_internal(
                self.size.transform_id().to_string(),
                "set_direction called after the transform started running",
            ));
        }
        self.direction = Some(direction);
        Ok(())
    }

    fn add_key(&mut self, key: &Key) -> Result<(), XmlEncError> {
        if key.bytes().len() != self.size.byte_len() {
            return Err(XmlEncError::transform_internal(
                self.size.transform_id().to_string(),
                format!("expected a {}-byte key, got {}", self.size.byte_len(), key.bytes().len()),
            ));
        }
        self.key = Some(key.bytes().to_vec());
        Ok(())
    }

    fn write(&mut self, input: &[u8]) -> Result<(), XmlEncError> {
        self.phase = TransformPhase::Running;
        self.buf.extend_from_slice(input);
        Ok(())
    }

    fn flush(&mut self) -> Result<Vec<u8>, XmlEncError> {
        self.phase = TransformPhase::Finalized;
        let id = self.size.transform_id().to_string();
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| XmlEncError::transform_internal(id.clone(), "no key installed"))?;
        let direction = self
            .direction
            .ok_or_else(|| XmlEncError::transform_internal(id.clone(), "direction not set"))?;
        let input = std::mem::take(&mut self.buf);

        match direction {
            Direction::Encrypt => encrypt(self.size, key, &input).map_err(|e| XmlEncError::transform_internal(id, e)),
            Direction::Decrypt => decrypt(self.size, key, &input).map_err(|e| XmlEncError::transform_internal(id, e)),
        }
    }
}

fn encrypt(size: AesKeySize, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, String> {
    let mut iv = [0u8; BLOCK_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut iv);

    let ciphertext = match size {
        AesKeySize::Aes128 => cbc::Encryptor::<Aes128>::new_from_slices(key, &iv)
            .map_err(|e| format!("bad key/iv length: {e}"))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        AesKeySize::Aes256 => cbc::Encryptor::<Aes256>::new_from_slices(key, &iv)
            .map_err(|e| format!("bad key/iv length: {e}"))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
    };

    let mut out = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

fn decrypt(size: AesKeySize, key: &[u8], wire: &[u8]) -> Result<Vec<u8>, String> {
    if wire.len() < BLOCK_SIZE {
        return Err(format!("ciphertext shorter than one block ({} bytes)", wire.len()));
    }
    let (iv, body) = wire.split_at(BLOCK_SIZE);

    let plaintext = match size {
        AesKeySize::Aes128 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|e| format!("bad key/iv length: {e}"))?
            .decrypt_padded_vec_mut::<Pkcs7>(body)
            .map_err(|e| format!("padding/decrypt error: {e}"))?,
        AesKeySize::Aes256 => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|e| format!("bad key/iv length: {e}"))?
            .decrypt_padded_vec_mut::<Pkcs7>(body)
            .map_err(|e| format!("padding/decrypt error: {e}"))?,
    };
    Ok(plaintext)
}
