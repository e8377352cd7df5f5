// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Reporter Callback
//!
//! The original engine reports errors through a macro that captures the
//! call site and formats a message. A callback trait serves the same
//! purpose without baking in a format string: `Ctx` holds one, and every
//! fallible operation that carries a `Ctx` reports through it — with
//! structured fields, so a `tracing` subscriber can index on
//! `code`/`reason` rather than parsing free text — before returning its
//! `Result::Err`, via `Ctx::report_err`. The template builder (C2) takes
//! no `Ctx` and so reports nothing; its schema-violation errors surface
//! directly to the caller constructing the template.

/// Severity of a single reported event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Error,
    Warn,
    Info,
    Debug,
}

/// Reports structured diagnostic events produced by the engine.
pub trait ReporterCallback: std::fmt::Debug + Send + Sync {
    fn report(&self, level: ReportLevel, code: &str, reason: &str);

    fn error(&self, code: &str, reason: &str) {
        self.report(ReportLevel::Error, code, reason);
    }

    fn warn(&self, code: &str, reason: &str) {
        self.report(ReportLevel::Warn, code, reason);
    }

    fn info(&self, code: &str, reason: &str) {
        self.report(ReportLevel::Info, code, reason);
    }

    fn debug(&self, code: &str, reason: &str) {
        self.report(ReportLevel::Debug, code, reason);
    }
}

/// Default reporter: routes every event through `tracing`.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl TracingReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ReporterCallback for TracingReporter {
    fn report(&self, level: ReportLevel, code: &str, reason: &str) {
        match level {
            ReportLevel::Error => tracing::error!(target: "xmlenc", code, reason),
            ReportLevel::Warn => tracing::warn!(target: "xmlenc", code, reason),
            ReportLevel::Info => tracing::info!(target: "xmlenc", code, reason),
            ReportLevel::Debug => tracing::debug!(target: "xmlenc", code, reason),
        }
    }
}

/// Discards every event. Used when the caller wires its own observability
/// and does not want the engine's reporter duplicating it.
#[derive(Debug, Default)]
pub struct NullReporter;

impl ReporterCallback for NullReporter {
    fn report(&self, _level: ReportLevel, _code: &str, _reason: &str) {}
}

/// Captures events in memory for test assertions.
#[derive(Debug, Default)]
pub struct CapturingReporter {
    events: std::sync::Mutex<Vec<(ReportLevel, String, String)>>,
}

impl CapturingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(ReportLevel, String, String)> {
        self.events.lock().unwrap().clone()
    }
}

impl ReporterCallback for CapturingReporter {
    fn report(&self, level: ReportLevel, code: &str, reason: &str) {
        self.events.lock().unwrap().push((level, code.to_string(), reason.to_string()));
    }
}
