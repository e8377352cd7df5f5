// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Bootstrap
//!
//! The composition root for the `xmlenc` binary. It sits **outside** the
//! domain/application/infrastructure layering in the `xmlenc`/`xmlenc-domain`
//! crates and provides:
//!
//! - **Argument parsing** ([`cli`]) - `clap`-derived `encrypt`/`decrypt`
//!   subcommands plus post-parse validation (file existence, key length,
//!   algorithm resolution).
//! - **Exit-code mapping** ([`exit_code`]) - BSD `sysexits.h`-style codes,
//!   derived from the engine's error taxonomy.
//! - **Logger wiring** ([`logger`]) - installs the `tracing-subscriber`
//!   formatter and hands back the `ReporterCallback` the engine's `Ctx`
//!   is built with.
//! - **Config loading** - `--config` names an optional TOML file that
//!   `ctx_for` layers under `XMLENC_*` env vars via `RuntimeConfig::load`
//!   before attaching the result to `Ctx`.
//!
//! This engine is single-threaded and synchronous (see its concurrency
//! model) and exposes no OS signal surface or background task to
//! coordinate shutdown for, so unlike a long-running service's bootstrap
//! layer this one has no `platform`/`shutdown`/`signals` modules — `run`
//! below is the entire lifecycle: parse, validate, drive the engine once,
//! return.

pub mod cli;
pub mod exit_code;
pub mod logger;

use std::fmt;
use std::fs;

use anyhow::Context;

use xmlenc::application::{ctx::Ctx, encrypt_session, decrypt_session, template};
use xmlenc::dom::{parse_document, serialize_node, Document};
use xmlenc::infrastructure::{BuiltinRegistry, RuntimeConfig};
use xmlenc_domain::services::{KeyManager, KeyManagerContext};
use xmlenc_domain::value_objects::key::{Key, KeyOrigin, KeyType};
use xmlenc_domain::value_objects::TransformId;

use crate::cli::{Command, ValidatedArgs};

/// Hands back the one key the binary was invoked with, regardless of
/// what `KeyInfo` hint the document carries — the CLI has no keystore,
/// only `--key-hex`.
struct FixedKeyManager {
    bytes: Vec<u8>,
    key_type: KeyType,
}

impl fmt::Debug for FixedKeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedKeyManager").field("key_type", &self.key_type).finish()
    }
}

impl KeyManager for FixedKeyManager {
    fn resolve(&self, _key_info: Option<&str>, _ctx: &KeyManagerContext) -> Option<Key> {
        Some(Key::new(self.bytes.clone(), self.key_type, KeyOrigin::KeyManager))
    }
}

fn key_type_for(algorithm: &TransformId) -> KeyType {
    if algorithm.as_str() == TransformId::aes256_cbc().as_str() {
        KeyType::Aes256
    } else {
        KeyType::Aes128
    }
}

fn ctx_for(args: &ValidatedArgs, verbose: bool, config_path: Option<&str>) -> anyhow::Result<Ctx> {
    let key_manager = FixedKeyManager {
        bytes: args.key.clone(),
        key_type: key_type_for(&args.algorithm),
    };
    let config = RuntimeConfig::load(config_path).with_context(|| match config_path {
        Some(path) => format!("loading runtime config from {path}"),
        None => "loading runtime config".to_string(),
    })?;
    Ok(Ctx::new(Box::new(BuiltinRegistry::new()))
        .with_key_manager(Box::new(key_manager))
        .with_reporter(if verbose { crate::logger::reporter() } else { Box::new(xmlenc::infrastructure::NullReporter) })
        .with_config(config))
}

fn run_encrypt(args: ValidatedArgs, verbose: bool, config_path: Option<&str>) -> anyhow::Result<()> {
    let plaintext = fs::read(&args.input).with_context(|| format!("reading {}", args.input.display()))?;

    let mut doc = Document::new();
    let encrypted_data = template::create_encrypted_data(&mut doc, None, None, None, None);
    template::add_encryption_method(&mut doc, encrypted_data, args.algorithm.as_str())?;

    let mut ctx = ctx_for(&args, verbose, config_path)?;
    encrypt_session::encrypt_memory(&mut ctx, &mut doc, encrypted_data, &plaintext)?;

    let xml = serialize_node(&doc, encrypted_data);
    fs::write(&args.output, xml).with_context(|| format!("writing {}", args.output.display()))?;
    Ok(())
}

fn run_decrypt(args: ValidatedArgs, verbose: bool, config_path: Option<&str>) -> anyhow::Result<()> {
    let xml = fs::read(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let (mut doc, root) = parse_document(&xml)?;

    if !doc.check_node_name(root, "EncryptedData", Some(template::ENC_NS)) {
        anyhow::bail!("{} does not have an EncryptedData root element", args.input.display());
    }

    let mut ctx = ctx_for(&args, verbose, config_path)?;
    let result = decrypt_session::decrypt(&mut ctx, &mut doc, root, None)?;

    let plaintext = result.buffer.unwrap_or_default();
    fs::write(&args.output, plaintext).with_context(|| format!("writing {}", args.output.display()))?;
    Ok(())
}

/// Runs one subcommand end to end: validate, drive the engine, write the
/// result. The caller maps the returned `Result` to a process exit code
/// via [`exit_code::result_to_exit_code`].
pub fn run(parsed: cli::Cli) -> anyhow::Result<()> {
    let config_path = parsed.config.as_deref().map(|p| p.to_string_lossy().into_owned());
    match parsed.command {
        Command::Encrypt {
            input,
            output,
            key_hex,
            algorithm,
        } => {
            let args = cli::validate(input, output, &key_hex, &algorithm)?;
            run_encrypt(args, parsed.verbose, config_path.as_deref())
        }
        Command::Decrypt {
            input,
            output,
            key_hex,
            algorithm,
        } => {
            let args = cli::validate(input, output, &key_hex, &algorithm)?;
            run_decrypt(args, parsed.verbose, config_path.as_deref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_then_decrypt_round_trips_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plain.txt");
        let encrypted = dir.path().join("enc.xml");
        let restored = dir.path().join("restored.txt");
        fs::write(&input, b"the quick brown fox").unwrap();

        let key_hex = "00".repeat(16);

        let enc_args = cli::validate(input.clone(), encrypted.clone(), &key_hex, "aes128-cbc").unwrap();
        run_encrypt(enc_args, false, None).unwrap();
        assert!(encrypted.exists());

        let dec_args = cli::validate(encrypted, restored.clone(), &key_hex, "aes128-cbc").unwrap();
        run_decrypt(dec_args, false, None).unwrap();

        assert_eq!(fs::read(&restored).unwrap(), b"the quick brown fox");
    }

    #[test]
    fn ctx_for_layers_config_file_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("xmlenc.toml");
        fs::write(&config_path, "ignore_type = true\n").unwrap();

        let args = ValidatedArgs {
            input: dir.path().join("in.bin"),
            output: dir.path().join("out.bin"),
            key: vec![0u8; 16],
            algorithm: TransformId::aes128_cbc(),
        };

        let ctx = ctx_for(&args, false, Some(config_path.to_str().unwrap())).unwrap();
        assert!(ctx.ignore_type());
    }
}
