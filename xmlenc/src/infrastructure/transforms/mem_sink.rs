// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Memory-Buffer Sink Transform
//!
//! The chain's terminal link on the encrypt path (C5 step 9): accumulates
//! whatever the previous link produces and hands it back unchanged. It
//! exists so `TransformChain::push_through`'s uniform write-then-flush
//! loop has a tail to flush even when the "real" work already happened in
//! the link before it.

use xmlenc_domain::services::transform::{BinaryTransform, Direction, TransformDescriptor, TransformKind, TransformPhase};
use xmlenc_domain::value_objects::{Key, TransformId};
use xmlenc_domain::XmlEncError;

#[derive(Debug, Default)]
pub struct MemBufferSink {
    phase: TransformPhase,
    buf: Vec<u8>,
}

impl MemBufferSink {
    pub fn new() -> Self {
        Self {
            phase: TransformPhase::Configured,
            buf: Vec::new(),
        }
    }
}

impl BinaryTransform for MemBufferSink {
    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            id: TransformId::new("urn:xmlenc:mem-buffer-sink").unwrap(),
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

    fn write(&mut self, input: &[u8]) -> Result<(), XmlEncError> {
        self.phase = TransformPhase::Running;
        self.buf.extend_from_slice(input);
        Ok(())
    }

    fn flush(&mut self) -> Result<Vec<u8>, XmlEncError> {
        self.phase = TransformPhase::Finalized;
        Ok(std::mem::take(&mut self.buf))
    }
}
