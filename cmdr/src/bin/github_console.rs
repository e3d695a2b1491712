/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

use std::process::ExitCode;

use clap::Parser;
use gh_console_cmdr::{CLIArg, try_init_logging, try_run_command, ui_str};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli_arg = CLIArg::parse();

    if let Err(report) = try_init_logging(&cli_arg.global_options) {
        eprintln!("{report:?}");
    }
    // % is Display, ? is Debug.
    tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg.command);

    match try_run_command(cli_arg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            // % is Display, ? is Debug.
            tracing::error!(message = "Command failed", error = ?report);
            eprintln!("{}", ui_str::failed_to_execute_msg(&report));
            ExitCode::FAILURE
        }
    }
}
