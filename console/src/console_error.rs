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

//! Errors that the console engine can surface to its caller, or display via the
//! [`crate::OutputSink`]. Events that are part of normal control flow (an aborted line,
//! a closed input stream) are not errors, see [`crate::ReadLineEvent`].

use std::path::PathBuf;

/// Use [miette] and [thiserror] to provide fine grained errors for every failure mode
/// of the history file, and the plumbing between the session loop and the producer
/// thread.
#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum ConsoleError {
    /// Writing the history file at the end of a session failed. This is the terminal
    /// result of the session.
    #[error("📑 Could not write history file: '{}'", .path.display())]
    #[diagnostic(
        code(gh_console::persist_history),
        help("Check that the folder exists and that you have write permissions")
    )]
    PersistHistory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The history file was written, but restricting its permissions failed. This is
    /// treated just as seriously as a failed write, since the file may leak commands.
    #[error("🔒 Could not restrict permissions of history file: '{}'", .path.display())]
    #[diagnostic(code(gh_console::set_history_permissions))]
    SetHistoryPermissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Removing the history file on an explicit clear request failed. This is only ever
    /// displayed, it is never fatal.
    #[error("can't delete history file: {source}")]
    #[diagnostic(code(gh_console::delete_history))]
    DeleteHistory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The user's home folder could not be determined, so there is no default location
    /// for the history file.
    #[error("🏠 Could not determine the home folder for the history file")]
    #[diagnostic(
        code(gh_console::home_folder),
        help("Pass an explicit history file path instead")
    )]
    HomeFolderNotFound,

    /// The producer thread that owns the line reader could not be started.
    #[error("🧵 Could not spawn the line reader producer thread")]
    #[diagnostic(code(gh_console::spawn_producer))]
    SpawnProducer(#[source] std::io::Error),
}
