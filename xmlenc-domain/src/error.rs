// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Error Taxonomy
//!
//! `XmlEncError` is the single error type returned by every public operation
//! in the engine. Each variant corresponds to one kind of failure the
//! EncryptedData/CipherData drivers and the transform chain can produce;
//! variants carry structured context rather than a bare message so callers
//! and the reporter callback can render a precise diagnostic.

use thiserror::Error;

/// Errors produced by the XML-Encryption engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlEncError {
    #[error("allocation failed: {0}")]
    AllocationFailed(String),

    #[error("xml operation failed: {0}")]
    XmlOperationFailed(String),

    #[error("node already present: {node}")]
    NodeAlreadyPresent { node: &'static str },

    #[error("node not found: {node}")]
    NodeNotFound { node: &'static str },

    #[error("invalid node: expected {expected}, found {found}")]
    InvalidNode { expected: &'static str, found: String },

    #[error("invalid node content: {node}")]
    InvalidNodeContent { node: &'static str },

    #[error("invalid type attribute: {type_uri}")]
    InvalidType { type_uri: String },

    #[error("invalid transform: {transform_id} is not a binary transform")]
    InvalidTransform { transform_id: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("key not found (key_id={key_id:?}, usage={usage})")]
    KeyNotFound { key_id: Option<String>, usage: String },

    #[error("transform internal error in {transform_id}: {reason}")]
    TransformInternal { transform_id: String, reason: String },
}

impl XmlEncError {
    pub fn invalid_node(expected: &'static str, found: impl Into<String>) -> Self {
        Self::InvalidNode {
            expected,
            found: found.into(),
        }
    }

    pub fn node_not_found(node: &'static str) -> Self {
        Self::NodeNotFound { node }
    }

    pub fn node_already_present(node: &'static str) -> Self {
        Self::NodeAlreadyPresent { node }
    }

    pub fn invalid_type(type_uri: impl Into<String>) -> Self {
        Self::InvalidType {
            type_uri: type_uri.into(),
        }
    }

    pub fn invalid_transform(transform_id: impl Into<String>) -> Self {
        Self::InvalidTransform {
            transform_id: transform_id.into(),
        }
    }

    pub fn invalid_data(reason: impl Into<String>) -> Self {
        Self::InvalidData(reason.into())
    }

    pub fn invalid_node_content(node: &'static str) -> Self {
        Self::InvalidNodeContent { node }
    }

    pub fn key_not_found(key_id: Option<String>, usage: impl Into<String>) -> Self {
        Self::KeyNotFound {
            key_id,
            usage: usage.into(),
        }
    }

    pub fn transform_internal(transform_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TransformInternal {
            transform_id: transform_id.into(),
            reason: reason.into(),
        }
    }

    /// Coarse category string, used for metrics/log grouping.
    pub fn category(&self) -> &'static str {
        match self {
            Self::AllocationFailed(_) => "allocation",
            Self::XmlOperationFailed(_) => "xml",
            Self::NodeAlreadyPresent { .. } => "schema",
            Self::NodeNotFound { .. } => "schema",
            Self::InvalidNode { .. } => "schema",
            Self::InvalidNodeContent { .. } => "schema",
            Self::InvalidType { .. } => "schema",
            Self::InvalidTransform { .. } => "chain",
            Self::InvalidData(_) => "config",
            Self::KeyNotFound { .. } => "key",
            Self::TransformInternal { .. } => "transform",
        }
    }

    /// Whether a caller might plausibly retry the same operation unchanged
    /// and succeed. This engine has no transient failure modes other than
    /// allocation pressure: everything else is a structural/config problem
    /// that will reproduce deterministically.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::AllocationFailed(_))
    }
}
