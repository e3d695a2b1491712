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

//! The only two patterns the console understands on its own. Everything else is handed
//! to the [`crate::Executor`] verbatim.
//!
//! Whitespace here means ASCII whitespace (space, `\t`, `\n`, `\x0C`, `\r`), which is
//! what `\s` matches in the grammar `^\s*exit\s*;*\s*$`.

use strum_macros::Display;

use crate::EXIT_TOKEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InputKind {
    /// Nothing but whitespace (or nothing at all). Ignored.
    Blank,
    /// A request to end the session.
    Exit,
    /// Anything else.
    Command,
}

fn is_blank(c: char) -> bool { c.is_ascii_whitespace() }

/// `true` if `line` is empty or consists only of whitespace.
#[must_use]
pub fn is_whitespace_only(line: &str) -> bool { line.chars().all(is_blank) }

/// `true` if `line` matches `^\s*exit\s*;*\s*$`. The token is case sensitive, any
/// number of trailing semicolons is allowed, but not whitespace between them.
#[must_use]
pub fn is_exit_request(line: &str) -> bool {
    let Some(rest) = line.trim_matches(is_blank).strip_prefix(EXIT_TOKEN) else {
        return false;
    };
    rest.trim_start_matches(is_blank)
        .trim_start_matches(';')
        .is_empty()
}

#[must_use]
pub fn classify_input(line: &str) -> InputKind {
    if is_whitespace_only(line) {
        InputKind::Blank
    } else if is_exit_request(line) {
        InputKind::Exit
    } else {
        InputKind::Command
    }
}
