// /////////////////////////////////////////////////////////////////////////////
// XML Encryption Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = xmlenc_bootstrap::cli::parse();
    xmlenc_bootstrap::logger::init(cli.verbose);
    xmlenc_bootstrap::exit_code::result_to_exit_code(xmlenc_bootstrap::run(cli))
}
