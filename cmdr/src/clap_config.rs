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

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(bin_name = "github-console")]
#[command(about = "🐙 GitHub command-line console, type `Service.Method(args)` at the prompt")]
#[command(version)]
#[command(next_line_help = true)]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version} 💻\n\nUSAGE 📓:\n  github-console [\x1b[32mCommand\x1b[0m] [\x1b[34mOptions\x1b[0m]\n\n{all-args}\n",
    subcommand_help_heading("Command")
)]
/// More info:
/// - <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CLIArg {
    /// Without a command, the interactive console is started.
    #[command(subcommand)]
    pub command: Option<CLICommand>,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        long,
        short = 't',
        value_name = "TOKEN",
        help = "GitHub token, falls back to the GITHUB_TOKEN environment variable, then to a prompt"
    )]
    pub token: Option<String>,

    #[arg(
        global = true,
        long,
        value_name = "PATH",
        help = "History file, defaults to `~/.gh_history`"
    )]
    pub history_file: Option<PathBuf>,

    #[arg(long, value_name = "PROMPT", help = "Prompt shown before each line of input")]
    pub prompt: Option<String>,

    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file for debugging"
    )]
    pub enable_logging: bool,

    #[arg(
        global = true,
        long,
        value_name = "PATH",
        help = "Log file used with --enable-logging"
    )]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum CLICommand {
    #[clap(about = "Print the name, commit, version and target of github-console")]
    Version,

    #[clap(about = "Delete the history file")]
    ClearHistory,
}
