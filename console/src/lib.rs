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

//! The `gh_console` library is the engine behind an interactive, line oriented console
//! (a REPL). It repeatedly prompts the user, reads one line, classifies it, and forwards
//! ordinary commands to a pluggable [`Executor`], while persisting the input history
//! across sessions.
//!
//! # Why a producer thread?
//!
//! 1. Line editors like [`rustyline`] block the calling thread inside `read_line()`. And
//!    there is no way to terminate an OS thread that is blocked in Rust, short of exiting
//!    the process.
//! 2. The session still has to react to things that happen while nobody is typing: a
//!    `SIGINT` / `SIGTERM` delivered to the process, or the embedding application
//!    cancelling the session via a [`tokio_util::sync::CancellationToken`].
//!
//! So the [`LineReader`] is moved onto a dedicated producer thread (see [`producer`]).
//! The session loop hands it a prompt, and then `select!`s on three things at once:
//! - the cancellation token,
//! - the OS interrupt notification ([`signals`]),
//! - the single slot channel that carries the result of the read.
//!
//! If either of the first two fires, the loop terminates right away and simply abandons
//! the outstanding read (the process is about to exit anyway).
//!
//! # Two kinds of Ctrl+C
//!
//! - When the terminal is in raw mode, the line editor captures <kbd>Ctrl+C</kbd> itself
//!   and reports [`ReadLineEvent::Aborted`]. This only clears the current input line, and
//!   the session keeps going.
//! - A process level interrupt (eg: `kill -INT <pid>`) arrives via [`signals`] and always
//!   terminates the session, even in the middle of a read.
//!
//! # History
//!
//! The [`HistoryManager`] is owned by the session loop. It is loaded from disk when the
//! [`Session`] is created, deduplicates consecutive repeats, keeps the reader's recall
//! buffer in sync, and is written back exactly once when the loop terminates, with the
//! file permissions forced to owner read / write only.
//!
//! # Completion
//!
//! [`complete_words()`] is a pure, cursor aware, case insensitive prefix filter over a
//! fixed list of candidate words. [`word_completer()`] wraps it into the
//! [`CompletionCallback`] that line readers accept.
//!
//! # Logging
//!
//! [`tracing_setup::init()`] wires up a [`tracing_subscriber`] registry that can write to
//! `stdout`, `stderr`, the session's [`OutputSink`], and / or a log file.

// Attach sources.
pub mod completion;
pub mod console_error;
pub mod grammar;
pub mod history;
pub mod line_reader;
pub mod output_sink;
pub mod producer;
pub mod session;
pub mod signals;
pub mod tracing_setup;

// Re-export the public API.
pub use completion::*;
pub use console_error::*;
pub use grammar::*;
pub use history::*;
pub use line_reader::*;
pub use output_sink::*;
pub use session::*;
pub use signals::*;

// Type aliases.
pub type StdMutex<T> = std::sync::Mutex<T>;

// Constants.
/// The file (inside the user's home folder) that stores the input scrollback.
pub const HISTORY_FILE_NAME: &str = ".gh_history";

/// The default prompt line prefix used when asking for user input.
pub const DEFAULT_PROMPT: &str = "$🐌 ";

/// Candidates containing this character are "qualified" (eg: `Issues.List`) and are not
/// offered when completing an empty line.
pub const QUALIFIER_SEPARATOR: char = '.';

/// The only token (besides `Ctrl+D`) that ends a session.
pub const EXIT_TOKEN: &str = "exit";

/// Rendezvous capacity of the producer's result channel.
pub const PRODUCER_CHANNEL_CAPACITY: usize = 1;

/// Debug flags, flip them on to get more verbose traces from a module.
pub const DEBUG_PRODUCER_MOD: bool = false;
pub const DEBUG_HISTORY_MOD: bool = true;
