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

//! The line reader capability. This is the only component that touches the terminal
//! for input. It is synchronous and blocking by contract, which is why the session loop
//! drives it from a dedicated thread (see [`crate::producer`]).
//!
//! There are 3 implementations:
//! 1. [`RustylineReader`] - interactive terminal, with line editing, recall (up arrow),
//!    completion and masked input.
//! 2. [`BufReadLineReader`] - any [`std::io::BufRead`], used when `stdin` is piped.
//! 3. [`ScriptedLineReader`] - plays back a fixed script of events, used in tests and
//!    demos.

// Attach sources.
pub mod buf_read_reader;
pub mod rustyline_reader;
pub mod scripted_reader;

// Re-export.
pub use buf_read_reader::*;
pub use rustyline_reader::*;
pub use scripted_reader::*;

use std::io::{self, IsTerminal as _};

use crate::CompletionCallback;

/// Outcome of a single [`LineReader::read_line`] call.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ReadLineEvent {
    /// The user entered a line of text.
    Line(String),

    /// The user pressed Ctrl+C while editing the line. The session is expected to
    /// recover from this and prompt again.
    Aborted,

    /// The user pressed Ctrl+D, or the input stream was closed.
    Eof,
}

/// Errors from a [`LineReader`]. Note that [`LineReaderError::Aborted`] and
/// [`LineReaderError::Closed`] are only produced by [`LineReader::read_masked_line`],
/// since [`LineReader::read_line`] reports those as a [`ReadLineEvent`].
#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum LineReaderError {
    /// An internal I/O error occurred.
    #[error(transparent)]
    #[diagnostic(code(gh_console::line_reader::io))]
    IO(#[from] io::Error),

    #[error("input was aborted")]
    #[diagnostic(code(gh_console::line_reader::aborted))]
    Aborted,

    #[error("input stream closed")]
    #[diagnostic(code(gh_console::line_reader::closed))]
    Closed,

    /// The underlying line editor failed for a reason other than I/O.
    #[error("line editor failed: {0}")]
    #[diagnostic(code(gh_console::line_reader::editor))]
    Editor(String),
}

/// Operations the console engine requires from a line reader.
///
/// Implementations must be [`Send`] because the reader is moved onto the producer
/// thread for the lifetime of the session.
pub trait LineReader: Send {
    /// Block until the user supplies a line, interrupts the edit, or the stream closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying terminal or stream fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadLineEvent, LineReaderError>;

    /// Same as [`Self::read_line`] but the input is not echoed. This is meant for
    /// credentials, the result is never added to the recall buffer.
    ///
    /// # Errors
    ///
    /// Returns [`LineReaderError::Aborted`] or [`LineReaderError::Closed`] if there is no
    /// line to return, or an error if the underlying terminal or stream fails.
    fn read_masked_line(&mut self, prompt: &str) -> Result<String, LineReaderError>;

    /// Replace the recall buffer (oldest entry first).
    fn set_history(&mut self, entries: &[String]);

    fn append_history(&mut self, entry: &str);

    fn clear_history(&mut self);

    /// Install the function that is called to offer inline suggestions.
    fn set_completion_callback(&mut self, callback: CompletionCallback);
}

pub type BoxedLineReader = Box<dyn LineReader>;

/// Pick the reader that suits the current `stdin`. An interactive terminal gets a
/// [`RustylineReader`], anything else (eg: `echo "Users.Get(octocat)" | app`) gets a
/// [`BufReadLineReader`].
///
/// # Errors
///
/// Returns an error if the terminal line editor can't be created.
pub fn try_new_default_line_reader() -> Result<BoxedLineReader, LineReaderError> {
    if io::stdin().is_terminal() {
        Ok(Box::new(RustylineReader::try_new()?))
    } else {
        // % is Display, ? is Debug.
        tracing::debug!(message = "stdin is not a terminal, reading lines from pipe");
        Ok(Box::new(BufReadLineReader::new_stdin()))
    }
}
