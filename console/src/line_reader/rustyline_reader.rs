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

use std::borrow::Cow;

use rustyline::{Config,
                Context,
                Editor,
                Helper,
                completion::{Completer, Pair},
                config::{ColorMode, Configurer as _},
                error::ReadlineError,
                highlight::Highlighter,
                hint::Hinter,
                history::DefaultHistory,
                validate::Validator};

use crate::{Completion, CompletionCallback, LineReader, LineReaderError, ReadLineEvent};

/// Glue between the console's [`CompletionCallback`] and `rustyline`'s helper traits. It
/// also masks input with `*` while a password is being read.
#[derive(Default)]
pub struct ConsoleHelper {
    pub maybe_completion_callback: Option<CompletionCallback>,
    pub masking: bool,
}

impl std::fmt::Debug for ConsoleHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleHelper")
            .field("has_completion_callback", &self.maybe_completion_callback.is_some())
            .field("masking", &self.masking)
            .finish()
    }
}

impl Completer for ConsoleHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if self.masking {
            return Ok((pos, vec![]));
        }
        let Some(callback) = &self.maybe_completion_callback else {
            return Ok((pos, vec![]));
        };

        // `rustyline` reports a byte offset, the completion callback counts characters.
        let cursor = line.get(..pos).map_or(0, |before| before.chars().count());
        let Completion {
            head, candidates, ..
        } = callback(line, cursor);

        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();

        // Candidates replace everything between the end of `head` and the cursor.
        Ok((head.len(), pairs))
    }
}

impl Highlighter for ConsoleHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking {
            Cow::Owned("*".repeat(line.chars().count()))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool { self.masking }
}

impl Hinter for ConsoleHelper {
    type Hint = String;
}

impl Validator for ConsoleHelper {}

impl Helper for ConsoleHelper {}

/// [`LineReader`] backed by a `rustyline` editor attached to the controlling terminal.
///
/// History is never added automatically. The session decides what goes into the recall
/// buffer (see [`crate::HistoryManager`]).
pub struct RustylineReader {
    pub editor: Editor<ConsoleHelper, DefaultHistory>,
}

impl std::fmt::Debug for RustylineReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RustylineReader")
            .field("helper", &self.editor.helper())
            .finish_non_exhaustive()
    }
}

impl RustylineReader {
    /// # Errors
    ///
    /// Returns an error if the terminal can't be configured for line editing.
    pub fn try_new() -> Result<Self, LineReaderError> {
        let config = Config::builder().auto_add_history(false).build();
        let mut editor = Editor::with_config(config).map_err(LineReaderError::from)?;
        editor.set_helper(Some(ConsoleHelper::default()));
        Ok(Self { editor })
    }

    fn set_masking(&mut self, masking: bool) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.masking = masking;
        }
        // Masking is done by the highlighter, so colors must be forced on.
        self.editor.set_color_mode(if masking {
            ColorMode::Forced
        } else {
            ColorMode::Enabled
        });
    }
}

impl From<ReadlineError> for LineReaderError {
    fn from(error: ReadlineError) -> Self {
        match error {
            ReadlineError::Io(io_error) => LineReaderError::IO(io_error),
            ReadlineError::Interrupted => LineReaderError::Aborted,
            ReadlineError::Eof => LineReaderError::Closed,
            other => LineReaderError::Editor(other.to_string()),
        }
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadLineEvent, LineReaderError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadLineEvent::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadLineEvent::Aborted),
            Err(ReadlineError::Eof) => Ok(ReadLineEvent::Eof),
            Err(error) => Err(error.into()),
        }
    }

    fn read_masked_line(&mut self, prompt: &str) -> Result<String, LineReaderError> {
        self.set_masking(true);
        let result = self.editor.readline(prompt);
        self.set_masking(false);
        result.map_err(LineReaderError::from)
    }

    fn set_history(&mut self, entries: &[String]) {
        self.clear_history();
        for entry in entries {
            self.append_history(entry);
        }
    }

    fn append_history(&mut self, entry: &str) {
        if let Err(error) = self.editor.add_history_entry(entry) {
            // % is Display, ? is Debug.
            tracing::warn!(message = "Could not add entry to recall buffer", error = %error);
        }
    }

    fn clear_history(&mut self) {
        if let Err(error) = self.editor.clear_history() {
            // % is Display, ? is Debug.
            tracing::warn!(message = "Could not clear recall buffer", error = %error);
        }
    }

    fn set_completion_callback(&mut self, callback: CompletionCallback) {
        match self.editor.helper_mut() {
            Some(helper) => helper.maybe_completion_callback = Some(callback),
            None => self.editor.set_helper(Some(ConsoleHelper {
                maybe_completion_callback: Some(callback),
                masking: false,
            })),
        }
    }
}
