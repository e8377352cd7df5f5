// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Concrete `BinaryTransform` implementations: the base64 codec, the
//! memory-buffer sink, the URI-input source, the registry that wires
//! algorithm ids to cipher transforms, and the cipher implementations
//! themselves (in the `cipher` submodule).

pub mod base64_codec;
pub mod cipher;
pub mod mem_sink;
pub mod registry;
pub mod uri_input;

pub use base64_codec::{base64_decoder, base64_encoder};
pub use mem_sink::MemBufferSink;
pub use registry::BuiltinRegistry;
pub use uri_input::UriInputTransform;
