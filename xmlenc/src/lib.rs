// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # XML Encryption Engine
//!
//! An implementation of the W3C XML-Encryption Core syntax and processing
//! rules: building `EncryptedData` templates, driving a transform chain
//! of ciphers and codecs over a plaintext or ciphertext buffer, and
//! splicing the result back into an XML document according to `Type`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 Application                    │
//! │  Ctx, Session, Template builder,                │
//! │  EncryptedData/CipherData drivers,              │
//! │  encrypt_memory/encrypt_uri/encrypt_xml_node,   │
//! │  decrypt                                        │
//! └──────────────────────────────────────────────┘
//!                        │
//! ┌──────────────────────────────────────────────┐
//! │                   Domain                       │
//! │  Key/TransformId/EncType value objects,         │
//! │  TransformRegistry/KeyManager/BinaryTransform    │
//! │  contracts, EncResult                           │
//! └──────────────────────────────────────────────┘
//!                        │
//! ┌──────────────────────────────────────────────┐
//! │                Infrastructure                  │
//! │  TransformChain, built-in cipher/codec          │
//! │  transforms and registry, dsig collaborators,   │
//! │  reporter callback, layered runtime config      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The arena-based XML DOM (`dom`) sits underneath all of these: it gives
//! the engine in-place mutation (splicing a node, replacing a node's
//! children) that `quick-xml`'s streaming tokenizer/writer doesn't provide
//! on its own.
//!
//! ## Quick Start
//!
//! ```no_run
//! use xmlenc::application::{ctx::Ctx, template, encrypt_session};
//! use xmlenc::dom::Document;
//! use xmlenc::infrastructure::BuiltinRegistry;
//!
//! let mut doc = Document::new();
//! let encrypted_data = template::create_encrypted_data(&mut doc, None, None, None, None);
//! template::add_encryption_method(&mut doc, encrypted_data, "http://www.w3.org/2001/04/xmlenc#aes128-cbc").unwrap();
//!
//! let mut ctx = Ctx::new(Box::new(BuiltinRegistry::new()));
//! // ... install a key manager, then:
//! // let result = encrypt_session::encrypt_memory(&mut ctx, &mut doc, encrypted_data, b"plaintext")?;
//! ```

pub mod application;
pub mod dom;
pub mod infrastructure;

pub use application::Ctx;
pub use dom::Document;
pub use xmlenc_domain::entities::EncResult;
pub use xmlenc_domain::XmlEncError;
