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

// Production code must not unwrap inside functions that return a `Result`.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

//! # github-console
//!
//! An interactive console for the GitHub REST API, built on the [`gh_console`] engine.
//!
//! ```text
//! $ github-console --token <TOKEN>
//! Welcome to the Github console!
//! $🐌 Users.Get(octocat)
//! {
//!   "login": "octocat",
//!   ...
//! }
//! $🐌 exit
//! ```
//!
//! - Commands look like `Service.Method(arg1, arg2)`. Arguments may be quoted with `"`,
//!   which is needed when they contain a `,` or `)`. Press <kbd>Tab</kbd> to see what
//!   is available, the list comes from the [`github::OPERATIONS`] table.
//! - The token comes from `--token`, else the `GITHUB_TOKEN` environment variable, else
//!   it is asked for (without echo).
//! - History is kept in `~/.gh_history` (see `--history-file`), and can be deleted with
//!   `github-console clear-history`.
//! - `GITHUB_API_URL` points the console at another API host (eg: GitHub Enterprise).
//!
//! # Run the binary target
//!
//! ```sh
//! cargo run --bin github-console -- --help
//! ```

// Attach sources.
pub mod clap_config;
pub mod credentials;
pub mod github;
pub mod launcher;
pub mod ui_str;
pub mod version_info;

// Re-export.
pub use clap_config::*;
pub use credentials::*;
pub use github::*;
pub use launcher::*;
pub use version_info::*;

// Constants.
/// Name of the binary, as reported by `github-console version`.
pub const APP_NAME: &str = "github-console";

pub const WELCOME_MESSAGE: &str = "Welcome to the Github console!";

/// Environment variable that supplies the token when `--token` is not given.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Environment variable that overrides [`DEFAULT_API_URL`].
pub const API_URL_ENV_VAR: &str = "GITHUB_API_URL";

pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub const TOKEN_PROMPT: &str = "Your github token: ";

pub const DEBUG_GITHUB_MOD: bool = true;
