// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Minimal XML-DSig collaborators this engine needs: a `KeyInfo` writer
//! and the `CipherReference` transforms-reader/`TransformState` pair.
//! Neither aims to be a complete XML-DSig implementation — both exist
//! only to drive the scenarios this engine's `KeyInfo`/`CipherReference`
//! handling requires.

pub mod keyinfo_writer;
pub mod transforms_reader;

pub const DS_NS: &str = "http://www.w3.org/2000/09/xmldsig#";

pub use keyinfo_writer::write_key_info;
pub use transforms_reader::TransformState;
