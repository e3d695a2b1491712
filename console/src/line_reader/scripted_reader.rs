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

use std::{collections::VecDeque,
          sync::{Arc, PoisonError}};

use crate::{CompletionCallback, LineReader, LineReaderError, ReadLineEvent, StdMutex};

/// What a [`ScriptedLineReader`] does once every scripted event has been played back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhenExhausted {
    /// Report [`ReadLineEvent::Eof`], just like a closed stream.
    Eof,
    /// Block the calling thread forever, just like a user who never types anything.
    Block,
}

/// Shared view into a [`ScriptedLineReader`], which stays usable after the reader itself
/// has been moved onto the producer thread. You can safely clone this struct, since it
/// only contains [Arc]s.
#[derive(Clone, Default)]
pub struct ScriptedReaderProbe {
    pub safe_recall_buffer: Arc<StdMutex<Vec<String>>>,
    pub safe_prompts: Arc<StdMutex<Vec<String>>>,
    pub safe_completion_callback: Arc<StdMutex<Option<CompletionCallback>>>,
}

impl std::fmt::Debug for ScriptedReaderProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedReaderProbe")
            .field("recall_buffer", &self.get_recall_buffer())
            .field("prompts", &self.get_prompts())
            .finish_non_exhaustive()
    }
}

impl ScriptedReaderProbe {
    #[must_use]
    pub fn get_recall_buffer(&self) -> Vec<String> {
        self.safe_recall_buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every prompt the reader was asked to display, in order.
    #[must_use]
    pub fn get_prompts(&self) -> Vec<String> {
        self.safe_prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn get_completion_callback(&self) -> Option<CompletionCallback> {
        self.safe_completion_callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// [`LineReader`] that plays back a fixed script of [`ReadLineEvent`]s. This makes the
/// whole session loop testable without a terminal.
#[derive(Debug)]
pub struct ScriptedLineReader {
    pub script: VecDeque<ReadLineEvent>,
    pub when_exhausted: WhenExhausted,
    pub probe: ScriptedReaderProbe,
}

impl ScriptedLineReader {
    pub fn new(
        script: impl IntoIterator<Item = ReadLineEvent>,
        when_exhausted: WhenExhausted,
    ) -> Self {
        Self {
            script: script.into_iter().collect(),
            when_exhausted,
            probe: ScriptedReaderProbe::default(),
        }
    }

    /// Each string becomes a [`ReadLineEvent::Line`], followed by end of stream.
    #[must_use]
    pub fn from_lines(lines: &[&str]) -> Self {
        Self::new(
            lines.iter().map(|line| ReadLineEvent::Line((*line).to_string())),
            WhenExhausted::Eof,
        )
    }

    #[must_use]
    pub fn probe(&self) -> ScriptedReaderProbe { self.probe.clone() }

    fn next_event(&mut self) -> ReadLineEvent {
        if let Some(event) = self.script.pop_front() {
            return event;
        }
        match self.when_exhausted {
            WhenExhausted::Eof => ReadLineEvent::Eof,
            WhenExhausted::Block => loop {
                std::thread::park();
            },
        }
    }

    fn lock_recall_buffer(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.probe
            .safe_recall_buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl LineReader for ScriptedLineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadLineEvent, LineReaderError> {
        self.probe
            .safe_prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        Ok(self.next_event())
    }

    fn read_masked_line(&mut self, _prompt: &str) -> Result<String, LineReaderError> {
        match self.next_event() {
            ReadLineEvent::Line(line) => Ok(line),
            ReadLineEvent::Aborted => Err(LineReaderError::Aborted),
            ReadLineEvent::Eof => Err(LineReaderError::Closed),
        }
    }

    fn set_history(&mut self, entries: &[String]) {
        *self.lock_recall_buffer() = entries.to_vec();
    }

    fn append_history(&mut self, entry: &str) {
        self.lock_recall_buffer().push(entry.to_string());
    }

    fn clear_history(&mut self) { self.lock_recall_buffer().clear(); }

    fn set_completion_callback(&mut self, callback: CompletionCallback) {
        *self
            .probe
            .safe_completion_callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(callback);
    }
}
