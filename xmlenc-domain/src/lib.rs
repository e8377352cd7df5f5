// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # XML-Encryption Domain
//!
//! Pure business logic for the XML-Encryption engine: the error taxonomy,
//! value objects (`Key`, `TransformId`, `EncType`), the `EncResult` entity,
//! and the domain service contracts (`BinaryTransform`, `KeyManager`,
//! `TransformRegistry`) that the infrastructure layer implements.
//!
//! This crate has no XML parser, no cipher implementation, and no logging
//! framework dependency — those are infrastructure concerns, wired in by
//! the `xmlenc` crate.

pub mod entities;
pub mod error;
pub mod services;
pub mod value_objects;

pub use error::XmlEncError;
