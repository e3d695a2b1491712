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

//! The producer thread owns the [`LineReader`], so that the session loop (a tokio task)
//! never blocks on user input.
//!
//! The session loop talks to it with [`ProducerRequest`]s, sent over a
//! [`std::sync::mpsc`] channel, which are processed strictly in order. Only
//! [`ProducerRequest::ReadLine`] produces a reply, which travels back over a single slot
//! [`tokio::sync::mpsc`] channel so that the loop can `select!` on it.
//!
//! Dropping the [`Producer`] closes the request channel, which ends the thread the next
//! time it is idle. A thread that is blocked inside `read_line()` can't be stopped, and
//! is simply abandoned (detached).

use std::{sync::mpsc as std_mpsc, thread};

use tokio::sync::mpsc;

use crate::{BoxedLineReader, ConsoleError, DEBUG_PRODUCER_MOD, LineReaderError,
            PRODUCER_CHANNEL_CAPACITY, ReadLineEvent, RecallBuffer};

/// Name of the OS thread that blocks on the line reader.
pub const PRODUCER_THREAD_NAME: &str = "line-reader-producer";

/// What the reader produced in response to a [`ProducerRequest::ReadLine`].
pub type ProducerResult = Result<ReadLineEvent, LineReaderError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProducerRequest {
    /// Block on the reader with this prompt, and send back the result.
    ReadLine(String),
    SetHistory(Vec<String>),
    AppendHistory(String),
    ClearHistory,
}

/// Handle to the producer thread, held by the session loop.
#[derive(Debug)]
pub struct Producer {
    request_sender: std_mpsc::Sender<ProducerRequest>,
    result_receiver: mpsc::Receiver<ProducerResult>,
}

impl Producer {
    /// Move `line_reader` onto a new, named OS thread.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::SpawnProducer`] if the OS refuses to create the thread.
    pub fn try_spawn(line_reader: BoxedLineReader) -> Result<Self, ConsoleError> {
        let (request_sender, request_receiver) = std_mpsc::channel::<ProducerRequest>();
        let (result_sender, result_receiver) =
            mpsc::channel::<ProducerResult>(PRODUCER_CHANNEL_CAPACITY);

        thread::Builder::new()
            .name(PRODUCER_THREAD_NAME.to_string())
            .spawn(move || run_producer(line_reader, request_receiver, result_sender))
            .map_err(ConsoleError::SpawnProducer)?;

        Ok(Self {
            request_sender,
            result_receiver,
        })
    }

    /// Ask the producer to read the next line. The answer arrives via [`Self::recv()`].
    /// Returns `false` if the producer thread has already exited.
    pub fn request_line(&self, prompt: &str) -> bool {
        self.send(ProducerRequest::ReadLine(prompt.to_string()))
    }

    /// Wait for the result of the last [`Self::request_line()`]. Returns `None` once the
    /// producer thread is gone. This is cancel safe, so it can be used in a `select!`.
    pub async fn recv(&mut self) -> Option<ProducerResult> {
        self.result_receiver.recv().await
    }

    fn send(&self, request: ProducerRequest) -> bool {
        DEBUG_PRODUCER_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "📤 Producer request", request = ?request);
        });
        self.request_sender.send(request).is_ok()
    }
}

impl RecallBuffer for Producer {
    fn set_history(&mut self, entries: &[String]) {
        self.send(ProducerRequest::SetHistory(entries.to_vec()));
    }

    fn append_history(&mut self, entry: &str) {
        self.send(ProducerRequest::AppendHistory(entry.to_string()));
    }

    fn clear_history(&mut self) { self.send(ProducerRequest::ClearHistory); }
}

/// The body of the producer thread. Runs until the request channel closes, or the
/// session loop stops listening for results.
fn run_producer(
    mut line_reader: BoxedLineReader,
    request_receiver: std_mpsc::Receiver<ProducerRequest>,
    result_sender: mpsc::Sender<ProducerResult>,
) {
    DEBUG_PRODUCER_MOD.then(|| {
        tracing::debug!(message = "🧵 Producer thread started");
    });

    while let Ok(request) = request_receiver.recv() {
        match request {
            ProducerRequest::ReadLine(prompt) => {
                let result = line_reader.read_line(&prompt);
                DEBUG_PRODUCER_MOD.then(|| {
                    // % is Display, ? is Debug.
                    tracing::debug!(message = "📥 Producer read", result = ?result);
                });
                if result_sender.blocking_send(result).is_err() {
                    break;
                }
            }
            ProducerRequest::SetHistory(entries) => line_reader.set_history(&entries),
            ProducerRequest::AppendHistory(entry) => line_reader.append_history(&entry),
            ProducerRequest::ClearHistory => line_reader.clear_history(),
        }
    }

    DEBUG_PRODUCER_MOD.then(|| {
        tracing::debug!(message = "🧵 Producer thread exiting");
    });
}
