// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Infrastructure layer: concrete adapters implementing the domain's
//! service contracts — the transform chain, the built-in cipher/codec
//! transforms and their registry, the minimal dsig collaborators, the
//! reporter callback, and layered runtime configuration.

pub mod chain;
pub mod dsig;
pub mod reporter;
pub mod runtime_config;
pub mod transforms;

pub use chain::TransformChain;
pub use reporter::{CapturingReporter, NullReporter, ReportLevel, ReporterCallback, TracingReporter};
pub use runtime_config::RuntimeConfig;
pub use transforms::BuiltinRegistry;
