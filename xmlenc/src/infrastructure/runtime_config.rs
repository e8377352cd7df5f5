// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Layered Runtime Configuration
//!
//! `RuntimeConfig` is loaded once at `Ctx` construction from three layers,
//! lowest precedence first: built-in defaults, an optional TOML file, then
//! `XMLENC_`-prefixed environment variables. Explicit constructor
//! overrides (e.g. a CLI flag) take precedence over all three.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// The subset of engine behavior that is configurable without touching
/// code: the default encryption method and the `ignoreType` splicing
/// switch (see `Ctx`), plus the path the key manager's static table is
/// loaded from when the CLI is used standalone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Default `EncryptionMethod` algorithm URI used when a template omits
    /// one. `None` means "no default — missing method is fatal".
    pub default_encryption_method: Option<String>,
    /// If true, `encrypt_xml_node`/`decrypt` never splice the XML tree.
    #[serde(default)]
    pub ignore_type: bool,
    /// Path to a TOML file mapping key ids to base64-encoded key bytes,
    /// consumed by the bootstrap binary's `StaticKeyManager`.
    pub key_table_path: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_encryption_method: None,
            ignore_type: false,
            key_table_path: None,
        }
    }
}

impl RuntimeConfig {
    /// Loads defaults, then `file_path` if it exists, then `XMLENC_*` env
    /// vars, merging each layer over the previous one.
    pub fn load(file_path: Option<&str>) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("ignore_type", defaults.ignore_type)?
            .set_default("default_encryption_method", Option::<String>::None)?
            .set_default("key_table_path", Option::<String>::None)?;

        if let Some(path) = file_path {
            builder = builder.add_source(File::with_name(path).required(false));
        }

        builder = builder.add_source(Environment::with_prefix("XMLENC").separator("_"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_default_method_and_ignore_type_false() {
        let cfg = RuntimeConfig::default();
        assert!(cfg.default_encryption_method.is_none());
        assert!(!cfg.ignore_type);
    }

    #[test]
    fn load_with_no_file_falls_back_to_defaults() {
        let cfg = RuntimeConfig::load(None).unwrap();
        assert!(!cfg.ignore_type);
        assert!(cfg.key_table_path.is_none());
    }

    #[test]
    fn env_var_overrides_default() {
        std::env::set_var("XMLENC_IGNORE_TYPE", "true");
        let cfg = RuntimeConfig::load(None).unwrap();
        assert!(cfg.ignore_type);
        std::env::remove_var("XMLENC_IGNORE_TYPE");
    }
}
