// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Binary Transform Contract (C1)
//!
//! `BinaryTransform` is the abstract capability set every link in the
//! transform chain exposes. The chain (infrastructure layer) operates only
//! through this trait — it never downcasts to a concrete cipher or codec
//! type. Implementations are modeled as a tagged union of built-in kinds
//! handed out already-boxed by the registry, per the design note on
//! polymorphic transforms.

use crate::error::XmlEncError;
use crate::value_objects::key::Key;
use crate::value_objects::transform_id::TransformId;

/// The three kinds a transform's static descriptor can report. Only
/// `Binary` transforms may be added to a [`BinaryTransform`] chain; the
/// other two exist so the descriptor shape matches the source's
/// `xmlSecTransformType` without this engine implementing XML/C14n
/// transforms itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Binary,
    Xml,
    C14n,
}

/// Encrypt or decrypt — the direction a cipher transform was configured
/// for. Codec and sink transforms ignore this; cipher transforms use it to
/// select their underlying operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Direction-bit state machine (design note: "Direction-bit mutability on
/// cipher transforms"). `set_direction` is legal only in `Configured`; once
/// any byte has been written the transform moves to `Running` and a second
/// `set_direction` call is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformPhase {
    Configured,
    Running,
    Finalized,
}

/// Per-transform metadata exposed by the registry, independent of any
/// particular instance.
#[derive(Debug, Clone)]
pub struct TransformDescriptor {
    pub id: TransformId,
    pub kind: TransformKind,
    /// Key type required when this transform runs in the encrypt direction,
    /// if it is a cipher.
    pub key_type_enc: Option<crate::value_objects::key::KeyType>,
    /// Key type required when this transform runs in the decrypt direction.
    pub key_type_dec: Option<crate::value_objects::key::KeyType>,
}

/// A single link in the transform chain.
///
/// Contract: `set_direction` must be called at most once and only while
/// `phase() == Configured`. `add_key` may be called any time before the
/// first `write`/`flush`. `write` may be called multiple times (push
/// discipline accumulates input); `flush` finalizes and returns whatever
/// output the transform has produced, after which the transform is
/// `Finalized` and further `write`/`flush` calls are errors.
///
/// This engine only ever drives one in-memory buffer through a transform
/// per operation (see the engine's explicit streaming non-goal), so every
/// implementation may buffer its entire input before producing output in
/// `flush` — there is no requirement to produce partial output from
/// `write`.
pub trait BinaryTransform: std::fmt::Debug {
    fn descriptor(&self) -> TransformDescriptor;

    fn phase(&self) -> TransformPhase;

    fn set_direction(&mut self, direction: Direction) -> Result<(), XmlEncError>;

    fn add_key(&mut self, key: &Key) -> Result<(), XmlEncError>;

    /// Push discipline: feed input bytes. May be called zero or more times
    /// before `flush`.
    fn write(&mut self, input: &[u8]) -> Result<(), XmlEncError>;

    /// Finalize the transform and return its accumulated output.
    fn flush(&mut self) -> Result<Vec<u8>, XmlEncError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NoopTransform {
        phase: TransformPhase,
        buf: Vec<u8>,
    }

    impl BinaryTransform for NoopTransform {
        fn descriptor(&self) -> TransformDescriptor {
            TransformDescriptor {
                id: TransformId::new("urn:test:noop").unwrap(),
                kind: TransformKind::Binary,
                key_type_enc: None,
                key_type_dec: None,
            }
        }

        fn phase(&self) -> TransformPhase {
            self.phase
        }

        fn set_direction(&mut self, _direction: Direction) -> Result<(), XmlEncError> {
            if self.phase != TransformPhase::Configured {
                return Err(XmlEncError::transform_internal(
                    "urn:test:noop",
                    "set_direction called after the transform started running",
                ));
            }
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

    #[test]
    fn direction_can_only_be_set_once_before_running() {
        let mut t = NoopTransform {
            phase: TransformPhase::Configured,
            buf: Vec::new(),
        };
        assert!(t.set_direction(Direction::Encrypt).is_ok());
        t.write(b"x").unwrap();
        assert!(t.set_direction(Direction::Decrypt).is_err());
    }

    #[test]
    fn write_then_flush_round_trips_bytes() {
        let mut t = NoopTransform {
            phase: TransformPhase::Configured,
            buf: Vec::new(),
        };
        t.write(b"hello").unwrap();
        t.write(b" world").unwrap();
        let out = t.flush().unwrap();
        assert_eq!(out, b"hello world");
        assert_eq!(t.phase(), TransformPhase::Finalized);
    }
}
