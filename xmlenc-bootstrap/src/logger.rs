// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Logger Wiring
//!
//! Installs a `tracing-subscriber` formatter on stderr for the process and
//! hands back the [`ReporterCallback`] the engine's `Ctx` should be built
//! with — [`TracingReporter`] once the subscriber is installed, so the
//! engine's structured `code`/`reason` events flow through the same
//! pipeline as everything else the binary logs.

use xmlenc::infrastructure::{ReporterCallback, TracingReporter};

/// Installs the process-wide `tracing` subscriber. `verbose` selects
/// `DEBUG` as the maximum level; otherwise `INFO`.
pub fn init(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let subscriber = tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).finish();
    // `main` calls this once; a second call during tests would panic, so
    // tests use `reporter()` directly instead of going through `init`.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// The reporter `Ctx` is constructed with once `init` has installed the
/// subscriber.
pub fn reporter() -> Box<dyn ReporterCallback> {
    Box::new(TracingReporter::new())
}
