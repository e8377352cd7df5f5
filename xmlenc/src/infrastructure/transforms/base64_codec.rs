// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Base64 Codec Transform
//!
//! Encode and decode are fixed-mode transforms, constructed directly by
//! the EncryptedData/CipherData drivers rather than looked up by algorithm
//! URI — base64 never appears as an `EncryptionMethod Algorithm` value, it
//! is internal chain plumbing (C5 step 9, C6 read path).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use xmlenc_domain::services::transform::{BinaryTransform, Direction, TransformDescriptor, TransformKind, TransformPhase};
use xmlenc_domain::value_objects::{Key, TransformId};
use xmlenc_domain::XmlEncError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Encode,
    Decode,
}

#[derive(Debug)]
pub struct Base64Codec {
    mode: Mode,
    phase: TransformPhase,
    buf: Vec<u8>,
}

/// A fresh base64-encode transform: binary in, base64 text out.
pub fn base64_encoder() -> Box<dyn BinaryTransform> {
    Box::new(Base64Codec {
        mode: Mode::Encode,
        phase: TransformPhase::Configured,
        buf: Vec::new(),
    })
}

/// A fresh base64-decode transform: base64 text in, binary out.
pub fn base64_decoder() -> Box<dyn BinaryTransform> {
    Box::new(Base64Codec {
        mode: Mode::Decode,
        phase: TransformPhase::Configured,
        buf: Vec::new(),
    })
}

impl BinaryTransform for Base64Codec {
    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            id: TransformId::base64(),
            kind: TransformKind::Binary,
            key_type_enc: None,
            key_type_dec: None,
        }
    }

    fn phase(&self) -> TransformPhase {
        self.phase
    }

    fn set_direction(&mut self, _direction: Direction) -> Result<(), XmlEncError> {
        // Codec transforms have a fixed mode chosen at construction; the
        // encrypt/decrypt direction bit only matters to cipher transforms.
        Ok(())
    }

    fn add_key(&mut self, _key: &Key) -> Result<(), XmlEncError> {
        Ok(())
    }

    fn write(&mut self, input: &[u8]) -> Result<(), XmlEncError> {
        self.phase = TransformPhase::Running;
        self.buf.extend_from_slice(input);
        Ok(())
    }

    fn flush(&mut self) -> Result<Vec<u8>, XmlEncError> {
        self.phase = TransformPhase::Finalized;
        let input = std::mem::take(&mut self.buf);
        match self.mode {
            Mode::Encode => Ok(STANDARD.encode(&input).into_bytes()),
            Mode::Decode => {
                let text = String::from_utf8_lossy(&input);
                let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                STANDARD
                    .decode(cleaned.as_bytes())
                    .map_err(|e| XmlEncError::invalid_data(format!("invalid base64 content: {e}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoder_then_decoder_round_trips_bytes() {
        let mut enc = base64_encoder();
        enc.write(b"hello world").unwrap();
        let encoded = enc.flush().unwrap();

        let mut dec = base64_decoder();
        dec.write(&encoded).unwrap();
        let decoded = dec.flush().unwrap();
        assert_eq!(decoded, b"hello world");
    }

    #[test]
    fn decoder_tolerates_embedded_whitespace() {
        let mut enc = base64_encoder();
        enc.write(b"abc").unwrap();
        let mut encoded = enc.flush().unwrap();
        encoded.insert(2, b'\n');

        let mut dec = base64_decoder();
        dec.write(&encoded).unwrap();
        assert_eq!(dec.flush().unwrap(), b"abc");
    }
}
