// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface
//!
//! Parsing and validation for the `xmlenc` binary: two subcommands,
//! `encrypt` and `decrypt`, each taking an input file, an output file, a
//! hex-encoded key, and an algorithm URI or short name.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use xmlenc_domain::value_objects::TransformId;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("--key-hex is not valid hex: {0}")]
    InvalidKeyHex(#[from] hex::FromHexError),

    #[error("unknown --algorithm: {0} (expected aes128-cbc, aes256-cbc, or a full Algorithm URI)")]
    UnknownAlgorithm(String),

    #[error("key length {actual} bytes does not match {algorithm} (expected {expected} bytes)")]
    KeyLengthMismatch {
        algorithm: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Parser, Debug)]
#[command(name = "xmlenc", about = "W3C XML-Encryption Core command-line driver", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Emit debug-level logging to stderr.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// TOML file layered between built-in defaults and `XMLENC_*` env vars
    /// (see `RuntimeConfig::load`). Missing files are not an error.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encrypt a file's contents into an EncryptedData document.
    Encrypt {
        #[arg(long = "in")]
        input: PathBuf,
        #[arg(long = "out")]
        output: PathBuf,
        #[arg(long = "key-hex")]
        key_hex: String,
        #[arg(long = "algorithm", default_value = "aes128-cbc")]
        algorithm: String,
    },
    /// Decrypt an EncryptedData document's CipherData back to plaintext.
    Decrypt {
        #[arg(long = "in")]
        input: PathBuf,
        #[arg(long = "out")]
        output: PathBuf,
        #[arg(long = "key-hex")]
        key_hex: String,
        #[arg(long = "algorithm", default_value = "aes128-cbc")]
        algorithm: String,
    },
}

/// A subcommand's arguments after hex-decoding the key and resolving the
/// algorithm name/URI, ready to hand to the engine.
pub struct ValidatedArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub key: Vec<u8>,
    pub algorithm: TransformId,
}

fn resolve_algorithm(name: &str) -> Result<(TransformId, usize), ParseError> {
    match name {
        "aes128-cbc" | "http://www.w3.org/2001/04/xmlenc#aes128-cbc" => Ok((TransformId::aes128_cbc(), 16)),
        "aes256-cbc" | "http://www.w3.org/2001/04/xmlenc#aes256-cbc" => Ok((TransformId::aes256_cbc(), 32)),
        other => Err(ParseError::UnknownAlgorithm(other.to_string())),
    }
}

/// Validates one subcommand's raw arguments: the input file must exist,
/// `--key-hex` must decode and match the algorithm's key length, and
/// `--algorithm` must resolve to a known `TransformId`.
pub fn validate(input: PathBuf, output: PathBuf, key_hex: &str, algorithm: &str) -> Result<ValidatedArgs, ParseError> {
    if !input.exists() {
        return Err(ParseError::InputNotFound(input));
    }

    let key = hex::decode(key_hex)?;
    let (algorithm, expected_len) = resolve_algorithm(algorithm)?;
    if key.len() != expected_len {
        return Err(ParseError::KeyLengthMismatch {
            algorithm: algorithm.as_str().to_string(),
            expected: expected_len,
            actual: key.len(),
        });
    }

    Ok(ValidatedArgs {
        input,
        output,
        key,
        algorithm,
    })
}

pub fn parse() -> Cli {
    Cli::parse()
}
