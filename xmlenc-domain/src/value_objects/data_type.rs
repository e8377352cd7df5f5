// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # EncryptedData `Type` Value Object
//!
//! Models the `Type` attribute on `EncryptedData`. `Element` and `Content`
//! are recognized for splicing purposes; an absent `Type` is treated as
//! `Element` during encryption, per the original's `ctx->type == NULL`
//! fallback, but leaves the tree untouched during decryption. Any other
//! URI is preserved verbatim but ignored by the splice step (the
//! asymmetric handling between encrypt and decrypt for unknown values is
//! intentional, see the design notes on the CipherData driver).

use std::fmt;

pub const ELEMENT_TYPE_URI: &str = "http://www.w3.org/2001/04/xmlenc#Element";
pub const CONTENT_TYPE_URI: &str = "http://www.w3.org/2001/04/xmlenc#Content";

/// The parsed `Type` attribute, or its absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncType {
    /// No `Type` attribute present.
    Unset,
    /// `Type=#Element` — plaintext is a single XML element.
    Element,
    /// `Type=#Content` — plaintext is zero-or-more child nodes.
    Content,
    /// Some other URI, preserved for the caller but not spliced.
    Other(String),
}

impl EncType {
    pub fn parse(attr: Option<&str>) -> Self {
        match attr {
            None => Self::Unset,
            Some(ELEMENT_TYPE_URI) => Self::Element,
            Some(CONTENT_TYPE_URI) => Self::Content,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// The literal attribute value to write back to the template, if any.
    pub fn as_attr_value(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Element => Some(ELEMENT_TYPE_URI),
            Self::Content => Some(CONTENT_TYPE_URI),
            Self::Other(uri) => Some(uri.as_str()),
        }
    }

    /// `Unset` counts as known here because encryption treats an absent
    /// `Type` the same as `#Element`; only an unrecognized non-empty URI
    /// (`Other`) is rejected.
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Unset | Self::Element | Self::Content)
    }
}

impl fmt::Display for EncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_attr_value() {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "(unset)"),
        }
    }
}
