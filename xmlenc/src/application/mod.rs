// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Application layer: the per-call context, the transient session a drive
//! produces, the template builder, the EncryptedData/CipherData drivers,
//! and the encrypt/decrypt entry points that tie them together.

pub mod cipher_data_driver;
pub mod ctx;
pub mod decrypt_session;
pub mod encrypt_session;
pub mod encrypted_data_driver;
pub mod session;
pub mod template;

pub use ctx::Ctx;
pub use decrypt_session::decrypt;
pub use encrypt_session::{encrypt_memory, encrypt_uri, encrypt_xml_node};
pub use session::Session;
