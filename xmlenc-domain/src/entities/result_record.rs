// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Result Record (C7)
//!
//! `EncResult` is the user-visible record handed back from an encrypt or
//! decrypt operation. It owns everything it reports: attribute strings
//! copied from the template, the resolved key (if any), and the
//! plaintext/ciphertext buffer produced by the chain.

use crate::value_objects::data_type::EncType;
use crate::value_objects::key::Key;

/// What happened during one encrypt or decrypt call.
///
/// `Drop` frees the owned buffer and key automatically; there is no manual
/// destroy step as there would be in the original C API.
#[derive(Debug)]
pub struct EncResult {
    pub id: Option<String>,
    pub enc_type: EncType,
    pub mime_type: Option<String>,
    pub encoding: Option<String>,
    pub encryption_method: Option<String>,
    pub key: Option<Key>,
    pub buffer: Option<Vec<u8>>,
    pub replaced: bool,
    pub encrypt: bool,
}

impl EncResult {
    pub fn new(encrypt: bool) -> Self {
        Self {
            id: None,
            enc_type: EncType::Unset,
            mime_type: None,
            encoding: None,
            encryption_method: None,
            key: None,
            buffer: None,
            replaced: false,
            encrypt,
        }
    }

    /// Human-readable diagnostic dump, mirroring the original's plain-text
    /// debug dump (`xmlSecEncResultDebugDump`).
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        if self.encrypt {
            out.push_str("= ENCRYPTION RESULT\n");
        } else {
            out.push_str(&format!(
                "= DECRYPTION RESULT ({})\n",
                if self.replaced { "replaced" } else { "not-replaced" }
            ));
        }
        if let Some(id) = &self.id {
            out.push_str(&format!("== Id: \"{id}\"\n"));
        }
        if let Some(t) = self.enc_type.as_attr_value() {
            out.push_str(&format!("== Type: \"{t}\"\n"));
        }
        if let Some(m) = &self.mime_type {
            out.push_str(&format!("== MimeType: \"{m}\"\n"));
        }
        if let Some(e) = &self.encoding {
            out.push_str(&format!("== Encoding: \"{e}\"\n"));
        }
        if let Some(buf) = &self.buffer {
            out.push_str("== start buffer:\n");
            out.push_str(&String::from_utf8_lossy(buf));
            out.push_str("\n== end buffer\n");
        }
        out
    }

    /// XML-framed diagnostic dump, mirroring
    /// `xmlSecEncResultDebugXmlDump`.
    pub fn debug_xml_dump(&self) -> String {
        let mut out = String::new();
        if self.encrypt {
            out.push_str("<EncryptionResult>\n");
        } else {
            out.push_str(&format!(
                "<DecryptionResult type=\"{}\">\n",
                if self.replaced { "replaced" } else { "not-replaced" }
            ));
        }
        if let Some(id) = &self.id {
            out.push_str(&format!("<Id>{id}</Id>\n"));
        }
        if let Some(t) = self.enc_type.as_attr_value() {
            out.push_str(&format!("<Type>{t}</Type>\n"));
        }
        if let Some(m) = &self.mime_type {
            out.push_str(&format!("<MimeType>{m}</MimeType>\n"));
        }
        if let Some(e) = &self.encoding {
            out.push_str(&format!("<Encoding>{e}</Encoding>\n"));
        }
        if let Some(buf) = &self.buffer {
            out.push_str("<Buffer>");
            out.push_str(&String::from_utf8_lossy(buf));
            out.push_str("</Buffer>\n");
        }
        if self.encrypt {
            out.push_str("</EncryptionResult>\n");
        } else {
            out.push_str("</DecryptionResult>\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_dump_renders_populated_fields() {
        let mut result = EncResult::new(true);
        result.id = Some("e1".to_string());
        result.enc_type = EncType::Element;
        result.buffer = Some(b"abc".to_vec());

        let dump = result.debug_dump();
        assert!(dump.contains("ENCRYPTION RESULT"));
        assert!(dump.contains("Id: \"e1\""));
        assert!(dump.contains("abc"));
    }

    #[test]
    fn xml_dump_marks_replaced_on_decrypt() {
        let mut result = EncResult::new(false);
        result.replaced = true;
        let dump = result.debug_xml_dump();
        assert!(dump.contains("<DecryptionResult type=\"replaced\">"));
    }
}
