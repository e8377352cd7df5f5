// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Exit Codes
//!
//! BSD `sysexits.h`-style process exit codes. The engine's error taxonomy
//! ([`xmlenc_domain::XmlEncError::category`]) and the CLI's own parse
//! errors both map onto this enum so a caller scripting against the binary
//! can branch on exit status rather than scraping stderr text.

use std::process::ExitCode as StdExitCode;

use crate::cli::ParseError;

/// Process exit status, one variant per `sysexits.h` code this binary can
/// produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok,
    /// EX_USAGE (64) - the command line was used incorrectly.
    Usage,
    /// EX_DATAERR (65) - the input data was incorrect in some way.
    DataErr,
    /// EX_NOINPUT (66) - an input file did not exist or was not readable.
    NoInput,
    /// EX_UNAVAILABLE (69) - required material (e.g. a key) was unavailable.
    Unavailable,
    /// EX_SOFTWARE (70) - an internal software error was detected.
    Software,
    /// EX_CANTCREAT (73) - an output file could not be created.
    CantCreat,
    /// EX_IOERR (74) - an I/O error occurred while reading or writing.
    IoErr,
}

impl ExitCode {
    pub fn code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Usage => 64,
            Self::DataErr => 65,
            Self::NoInput => 66,
            Self::Unavailable => 69,
            Self::Software => 70,
            Self::CantCreat => 73,
            Self::IoErr => 74,
        }
    }
}

impl From<ExitCode> for StdExitCode {
    fn from(value: ExitCode) -> Self {
        StdExitCode::from(value.code())
    }
}

impl From<&ParseError> for ExitCode {
    fn from(_: &ParseError) -> Self {
        ExitCode::Usage
    }
}

impl From<&xmlenc_domain::XmlEncError> for ExitCode {
    fn from(err: &xmlenc_domain::XmlEncError) -> Self {
        match err.category() {
            "key" => ExitCode::Unavailable,
            "config" => ExitCode::DataErr,
            "schema" | "xml" => ExitCode::DataErr,
            "chain" | "transform" => ExitCode::Software,
            "allocation" => ExitCode::Software,
            _ => ExitCode::Software,
        }
    }
}

impl From<&std::io::Error> for ExitCode {
    fn from(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ExitCode::NoInput,
            std::io::ErrorKind::PermissionDenied => ExitCode::CantCreat,
            _ => ExitCode::IoErr,
        }
    }
}

/// Maps a top-level `anyhow::Error` from `run` to a process exit code by
/// downcasting to the concrete error types the binary can produce.
pub fn map_error_to_exit_code(err: &anyhow::Error) -> ExitCode {
    if let Some(e) = err.downcast_ref::<ParseError>() {
        return ExitCode::from(e);
    }
    if let Some(e) = err.downcast_ref::<xmlenc_domain::XmlEncError>() {
        return ExitCode::from(e);
    }
    if let Some(e) = err.downcast_ref::<std::io::Error>() {
        return ExitCode::from(e);
    }
    ExitCode::Software
}

/// Converts a top-level `Result` into the process's `std::process::ExitCode`,
/// printing the error to stderr on failure.
pub fn result_to_exit_code(result: anyhow::Result<()>) -> StdExitCode {
    match result {
        Ok(()) => ExitCode::Ok.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            map_error_to_exit_code(&err).into()
        }
    }
}
