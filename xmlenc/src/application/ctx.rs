// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Context (Ctx)
//!
//! Process-level handle shared across encrypt/decrypt calls: the
//! transform registry, an optional key manager callback, the preferred
//! default encryption method, the `ignoreType` splicing switch, and the
//! reporter callback every fallible operation that carries a `Ctx`
//! reports through (via [`Ctx::report_err`]) before returning `Err`.

use xmlenc_domain::services::registry::TransformRegistry;
use xmlenc_domain::services::{KeyManager, KeyManagerContext};
use xmlenc_domain::value_objects::TransformId;
use xmlenc_domain::XmlEncError;

use crate::infrastructure::reporter::{NullReporter, ReporterCallback};
use crate::infrastructure::RuntimeConfig;

/// Process-level handle. Not `Clone` — callers that need concurrent
/// operations either share one `Ctx` behind their own synchronization or
/// construct one `Ctx` per thread (see §5's concurrency model).
pub struct Ctx {
    registry: Box<dyn TransformRegistry>,
    key_manager: Option<Box<dyn KeyManager>>,
    reporter: Box<dyn ReporterCallback>,
    config: RuntimeConfig,
    key_mngr_ctx: KeyManagerContext,
}

impl Ctx {
    pub fn new(registry: Box<dyn TransformRegistry>) -> Self {
        Self {
            registry,
            key_manager: None,
            reporter: Box::new(NullReporter),
            config: RuntimeConfig::default(),
            key_mngr_ctx: KeyManagerContext::new(),
        }
    }

    pub fn with_key_manager(mut self, key_manager: Box<dyn KeyManager>) -> Self {
        self.key_manager = Some(key_manager);
        self
    }

    pub fn with_reporter(mut self, reporter: Box<dyn ReporterCallback>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &dyn TransformRegistry {
        self.registry.as_ref()
    }

    pub fn key_manager(&self) -> Option<&dyn KeyManager> {
        self.key_manager.as_deref()
    }

    pub fn reporter(&self) -> &dyn ReporterCallback {
        self.reporter.as_ref()
    }

    /// Reports `err` through the reporter callback at Error level, then
    /// hands it back unchanged — for `.map_err(|e| ctx.report_err(e))` or
    /// `.ok_or_else(|| ctx.report_err(...))` at a fallible operation's
    /// return site.
    pub fn report_err(&self, err: XmlEncError) -> XmlEncError {
        self.reporter.error(err.category(), &err.to_string());
        err
    }

    pub fn key_mngr_ctx_mut(&mut self) -> &mut KeyManagerContext {
        &mut self.key_mngr_ctx
    }

    pub fn ignore_type(&self) -> bool {
        self.config.ignore_type
    }

    pub fn default_encryption_method(&self) -> Option<TransformId> {
        self.config
            .default_encryption_method
            .as_deref()
            .and_then(|uri| TransformId::new(uri).ok())
    }
}
