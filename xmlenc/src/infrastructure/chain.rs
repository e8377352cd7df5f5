// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Transform Chain (C1)
//!
//! The original links transforms through `prev`/`next` pointers owned by
//! the chain; here the chain owns a `Vec<Box<dyn BinaryTransform>>` and
//! "prev"/"next" is just adjacency in the vector. `add_tail`/`add_head`
//! reject anything but a `Binary`-kind transform, matching the source's
//! `xmlSecTransformType` check before linking.

use xmlenc_domain::services::transform::{BinaryTransform, Direction, TransformKind};
use xmlenc_domain::value_objects::Key;
use xmlenc_domain::XmlEncError;

/// An ordered pipeline of binary transforms, driven either by push
/// (`write`+`flush` at the head) or pull (`read_to_end` at the tail) — a
/// single chain instance must not mix disciplines.
#[derive(Debug, Default)]
pub struct TransformChain {
    links: Vec<Box<dyn BinaryTransform>>,
}

impl TransformChain {
    pub fn new() -> Self {
        Self { links: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Inserts `transform` after the current tail. Rejects non-`Binary`
    /// transforms with `InvalidTransform`.
    pub fn add_tail(&mut self, transform: Box<dyn BinaryTransform>) -> Result<(), XmlEncError> {
        Self::require_binary(&*transform)?;
        self.links.push(transform);
        Ok(())
    }

    /// Inserts `transform` before the current head.
    pub fn add_head(&mut self, transform: Box<dyn BinaryTransform>) -> Result<(), XmlEncError> {
        Self::require_binary(&*transform)?;
        self.links.insert(0, transform);
        Ok(())
    }

    fn require_binary(transform: &dyn BinaryTransform) -> Result<(), XmlEncError> {
        let descriptor = transform.descriptor();
        if descriptor.kind != TransformKind::Binary {
            return Err(XmlEncError::invalid_transform(descriptor.id.to_string()));
        }
        Ok(())
    }

    /// Sets the direction on every link currently in the chain. Must be
    /// called before the first `write`/`push_through`.
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), XmlEncError> {
        for link in &mut self.links {
            link.set_direction(direction)?;
        }
        Ok(())
    }

    /// Installs `key` on the link at `index` (the cipher transform's
    /// position in the chain — the only link that consumes key material).
    pub fn add_key_at(&mut self, index: usize, key: &Key) -> Result<(), XmlEncError> {
        self.links[index].add_key(key)
    }

    /// Removes and returns the link at `index`, shifting the remainder
    /// down — used by the `CipherReference` transplant (4.6), which moves
    /// each transform from the session chain onto an external pipeline
    /// one at a time.
    pub fn take(&mut self, index: usize) -> Box<dyn BinaryTransform> {
        self.links.remove(index)
    }

    /// Push discipline: feeds `input` through every link in order and
    /// returns the tail's accumulated output. This engine only ever drives
    /// one in-memory buffer per operation, so there is no separate
    /// "write then later flush" API at the chain level — every call
    /// writes and immediately flushes each link before handing the result
    /// to the next.
    pub fn push_through(&mut self, input: &[u8]) -> Result<Vec<u8>, XmlEncError> {
        let mut buf = input.to_vec();
        for link in &mut self.links {
            link.write(&buf)?;
            buf = link.flush()?;
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlenc_domain::services::transform::{TransformDescriptor, TransformPhase};
    use xmlenc_domain::value_objects::TransformId;

    #[derive(Debug)]
    struct Upper {
        phase: TransformPhase,
        kind: TransformKind,
    }

    impl BinaryTransform for Upper {
        fn descriptor(&self) -> TransformDescriptor {
            TransformDescriptor {
                id: TransformId::new("urn:test:upper").unwrap(),
                kind: self.kind,
                key_type_enc: None,
                key_type_dec: None,
            }
        }
        fn phase(&self) -> TransformPhase {
            self.phase
        }
        fn set_direction(&mut self, _d: Direction) -> Result<(), XmlEncError> {
            Ok(())
        }
        fn add_key(&mut self, _k: &Key) -> Result<(), XmlEncError> {
            Ok(())
        }
        fn write(&mut self, _input: &[u8]) -> Result<(), XmlEncError> {
            self.phase = TransformPhase::Running;
            Ok(())
        }
        fn flush(&mut self) -> Result<Vec<u8>, XmlEncError> {
            self.phase = TransformPhase::Finalized;
            Ok(Vec::new())
        }
    }

    fn binary_upper() -> Upper {
        Upper {
            phase: TransformPhase::Configured,
            kind: TransformKind::Binary,
        }
    }

    #[test]
    fn rejects_non_binary_transform_on_add_tail() {
        let mut chain = TransformChain::new();
        let xml_transform = Upper {
            phase: TransformPhase::Configured,
            kind: TransformKind::Xml,
        };
        let err = chain.add_tail(Box::new(xml_transform)).unwrap_err();
        assert!(matches!(err, XmlEncError::InvalidTransform { .. }));
    }

    #[test]
    fn push_through_drives_every_link_in_order() {
        #[derive(Debug)]
        struct Append(u8);
        impl BinaryTransform for Append {
            fn descriptor(&self) -> TransformDescriptor {
                TransformDescriptor {
                    id: TransformId::new("urn:test:append").unwrap(),
                    kind: TransformKind::Binary,
                    key_type_enc: None,
                    key_type_dec: None,
                }
            }
            fn phase(&self) -> TransformPhase {
                TransformPhase::Running
            }
            fn set_direction(&mut self, _d: Direction) -> Result<(), XmlEncError> {
                Ok(())
            }
            fn add_key(&mut self, _k: &Key) -> Result<(), XmlEncError> {
                Ok(())
            }
            fn write(&mut self, input: &[u8]) -> Result<(), XmlEncError> {
                self.0 = input.len() as u8;
                Ok(())
            }
            fn flush(&mut self) -> Result<Vec<u8>, XmlEncError> {
                let mut out = vec![0u8; self.0 as usize];
                out.push(b'!');
                Ok(out)
            }
        }

        let mut chain = TransformChain::new();
        chain.add_tail(Box::new(Append(0))).unwrap();
        chain.add_tail(Box::new(Append(0))).unwrap();
        let out = chain.push_through(b"abc").unwrap();
        assert_eq!(out.len(), 5);
        assert_eq!(out.last(), Some(&b'!'));
    }

    #[test]
    fn add_tail_accepts_binary_transform() {
        let mut chain = TransformChain::new();
        chain.add_tail(Box::new(binary_upper())).unwrap();
        assert_eq!(chain.len(), 1);
    }
}
