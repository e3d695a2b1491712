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

//! Styled strings shown by the binary.

use std::fmt::Display;

use crossterm::style::Stylize as _;

/// The one line summary of a failed top level command, in bold red.
#[must_use]
pub fn failed_to_execute_msg(error: impl Display) -> String {
    format!("Failed to command execute: {error}")
        .red()
        .bold()
        .to_string()
}

/// Printed once logging is on, so the user knows where to look.
#[must_use]
pub fn logging_to_file_msg(path: impl Display) -> String {
    format!("Logging to {path}").dark_grey().to_string()
}
