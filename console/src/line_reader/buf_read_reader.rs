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

use std::io::{self, BufRead, BufReader};

use crate::{CompletionCallback, LineReader, LineReaderError, ReadLineEvent};

/// [`LineReader`] for input that is not an interactive terminal, eg: when `stdin` is
/// piped. There is no line editing, so no prompt is rendered and completion is never
/// offered, but the recall buffer is still tracked so that the session behaves the same.
pub struct BufReadLineReader {
    pub reader: Box<dyn BufRead + Send>,
    pub recall_buffer: Vec<String>,
    pub maybe_completion_callback: Option<CompletionCallback>,
}

impl std::fmt::Debug for BufReadLineReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufReadLineReader")
            .field("recall_buffer", &self.recall_buffer)
            .finish_non_exhaustive()
    }
}

impl BufReadLineReader {
    pub fn new(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            recall_buffer: vec![],
            maybe_completion_callback: None,
        }
    }

    #[must_use]
    pub fn new_stdin() -> Self { Self::new(BufReader::new(io::stdin())) }

    /// Returns [None] when the stream is exhausted.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

impl LineReader for BufReadLineReader {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadLineEvent, LineReaderError> {
        Ok(match self.next_line()? {
            Some(line) => ReadLineEvent::Line(line),
            None => ReadLineEvent::Eof,
        })
    }

    fn read_masked_line(&mut self, _prompt: &str) -> Result<String, LineReaderError> {
        self.next_line()?.ok_or(LineReaderError::Closed)
    }

    fn set_history(&mut self, entries: &[String]) {
        self.recall_buffer = entries.to_vec();
    }

    fn append_history(&mut self, entry: &str) { self.recall_buffer.push(entry.to_string()); }

    fn clear_history(&mut self) { self.recall_buffer.clear(); }

    fn set_completion_callback(&mut self, callback: CompletionCallback) {
        self.maybe_completion_callback = Some(callback);
    }
}
