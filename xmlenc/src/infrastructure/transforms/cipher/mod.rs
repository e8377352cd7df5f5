// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Concrete cipher transforms: AES-128/256-CBC (symmetric content
//! encryption) and RSA-OAEP (asymmetric key transport). Both honor the
//! `Configured → Running → Finalized` direction-bit discipline from the
//! shared `BinaryTransform` contract.

pub mod aes_cbc;
pub mod rsa_oaep;

pub use aes_cbc::AesCbcTransform;
pub use rsa_oaep::RsaOaepTransform;
