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

//! The session loop. See the crate docs for the big picture.

// Attach sources.
pub mod config;
pub mod executor;
pub mod state;

// Re-export.
pub use config::*;
pub use executor::*;
pub use state::*;

use std::fmt::Display;

use tokio_util::sync::CancellationToken;

use crate::{BoxedLineReader, ConsoleError, HistoryManager, InputKind, Interrupt,
            InterruptReceiver, OutputSink, ReadLineEvent, classify_input,
            producer::{Producer, ProducerResult},
            word_completer};

/// Printed when the input stream ends.
pub const EXIT_NOTICE: &str = "\nexiting.";

/// Printed when the cancellation token fires.
pub const CANCELLED_NOTICE: &str = "session cancelled, exiting.";

/// What woke the loop up while it was awaiting input.
#[derive(Debug)]
enum Wakeup {
    Cancelled,
    Interrupted(Interrupt),
    Produced(Option<ProducerResult>),
}

/// One interactive console session. Created once per interactive invocation.
///
/// The session loop ([`Session::interactive()`]) is the sole owner of the history. The
/// line reader lives on the producer thread and is only reached through messages.
pub struct Session<E: Executor> {
    pub prompt: String,
    history: HistoryManager,
    output_sink: OutputSink,
    executor: E,
    cancellation_token: CancellationToken,
    interrupt_receiver: InterruptReceiver,
    /// Becomes `false` once every interrupt sender has been dropped.
    listen_for_interrupts: bool,
    producer: Producer,
    state: SessionState,
    maybe_termination_reason: Option<TerminationReason>,
    is_history_persisted: bool,
}

impl<E: Executor> std::fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("prompt", &self.prompt)
            .field("history", &self.history)
            .field("state", &self.state)
            .field("maybe_termination_reason", &self.maybe_termination_reason)
            .finish_non_exhaustive()
    }
}

impl<E: Executor> Session<E> {
    /// Install the completion callback on `line_reader`, move it onto the producer
    /// thread, and load the history.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::SpawnProducer`] if the producer thread can't be started.
    /// A missing or unreadable history file is not an error.
    pub fn try_new(
        config: SessionConfig,
        mut line_reader: BoxedLineReader,
        executor: E,
        output_sink: OutputSink,
        cancellation_token: CancellationToken,
        interrupt_receiver: InterruptReceiver,
    ) -> Result<Self, ConsoleError> {
        let SessionConfig {
            prompt,
            history_file_path,
            completion_words,
        } = config;

        line_reader.set_completion_callback(word_completer(completion_words));
        let mut producer = Producer::try_spawn(line_reader)?;
        let history = HistoryManager::load(history_file_path, &mut producer);

        Ok(Self {
            prompt,
            history,
            output_sink,
            executor,
            cancellation_token,
            interrupt_receiver,
            listen_for_interrupts: true,
            producer,
            state: SessionState::Idle,
            maybe_termination_reason: None,
            is_history_persisted: false,
        })
    }

    #[must_use]
    pub fn history(&self) -> &HistoryManager { &self.history }

    #[must_use]
    pub fn state(&self) -> SessionState { self.state }

    #[must_use]
    pub fn clone_output_sink(&self) -> OutputSink { self.output_sink.clone() }

    #[must_use]
    pub fn executor(&self) -> &E { &self.executor }

    pub fn welcome(&self, message: impl Display) { self.output_sink.println(message); }

    /// Forget the history, in memory, in the reader, and on disk.
    pub fn clear_history(&mut self) {
        self.history.clear(&mut self.producer, &self.output_sink);
    }

    /// Run the loop to termination, then persist the history.
    ///
    /// # Errors
    ///
    /// Returns an error if the history can't be written (see
    /// [`HistoryManager::persist()`]).
    pub async fn run(&mut self) -> Result<TerminationReason, ConsoleError> {
        let termination_reason = self.interactive().await;
        self.persist_history()?;
        Ok(termination_reason)
    }

    /// Write the history to disk. Only the first call does anything, so the history is
    /// persisted exactly once per session.
    ///
    /// # Errors
    ///
    /// See [`HistoryManager::persist()`].
    pub fn persist_history(&mut self) -> Result<(), ConsoleError> {
        if self.is_history_persisted {
            return Ok(());
        }
        self.is_history_persisted = true;
        self.history.persist()
    }

    /// The prompt loop. Returns once the session is terminated. Calling it again after
    /// that returns the same reason right away.
    pub async fn interactive(&mut self) -> TerminationReason {
        loop {
            if let Some(termination_reason) = &self.maybe_termination_reason {
                return termination_reason.clone();
            }

            if self.cancellation_token.is_cancelled() {
                self.terminate_with_notice(TerminationReason::Cancelled, CANCELLED_NOTICE);
                continue;
            }

            self.transition(SessionState::AwaitingInput);
            if !self.producer.request_line(&self.prompt) {
                self.terminate_with_notice(TerminationReason::EndOfInput, EXIT_NOTICE);
                continue;
            }

            match self.await_input().await {
                Wakeup::Cancelled => {
                    self.terminate_with_notice(TerminationReason::Cancelled, CANCELLED_NOTICE);
                }
                Wakeup::Interrupted(interrupt) => {
                    let notice = format!("caught interrupt: {interrupt}, exiting.");
                    self.terminate_with_notice(
                        TerminationReason::Interrupted(interrupt),
                        notice,
                    );
                }
                Wakeup::Produced(None | Some(Ok(ReadLineEvent::Eof))) => {
                    self.terminate_with_notice(TerminationReason::EndOfInput, EXIT_NOTICE);
                }
                Wakeup::Produced(Some(Err(error))) => {
                    // % is Display, ? is Debug.
                    tracing::error!(message = "Line reader failed", error = ?error);
                    let error_text = error.to_string();
                    self.terminate_with_notice(
                        TerminationReason::ReaderFailed(error_text.clone()),
                        error_text,
                    );
                }
                Wakeup::Produced(Some(Ok(ReadLineEvent::Aborted))) => {
                    self.transition(SessionState::Idle);
                }
                Wakeup::Produced(Some(Ok(ReadLineEvent::Line(line)))) => {
                    self.handle_line(line).await;
                }
            }
        }
    }

    /// Wait for whichever comes first. Cancellation wins ties, then interrupts.
    async fn await_input(&mut self) -> Wakeup {
        loop {
            tokio::select! {
                biased;

                () = self.cancellation_token.cancelled() => {
                    break Wakeup::Cancelled;
                }

                maybe_interrupt = self.interrupt_receiver.recv(), if self.listen_for_interrupts => {
                    match maybe_interrupt {
                        Some(interrupt) => break Wakeup::Interrupted(interrupt),
                        // Every sender is gone, stop polling the closed channel.
                        None => self.listen_for_interrupts = false,
                    }
                }

                maybe_result = self.producer.recv() => {
                    break Wakeup::Produced(maybe_result);
                }
            }
        }
    }

    async fn handle_line(&mut self, line: String) {
        let input_kind = classify_input(&line);

        // % is Display, ? is Debug.
        tracing::debug!(message = "⌨️ Input", line = ?line, kind = %input_kind);

        match input_kind {
            InputKind::Blank => self.transition(SessionState::Idle),
            InputKind::Exit => self.terminate(TerminationReason::ExitRequested),
            InputKind::Command => {
                self.transition(SessionState::Dispatching);
                let outcome = dispatch(
                    &mut self.executor,
                    self.cancellation_token.child_token(),
                    &line,
                )
                .await;

                // % is Display, ? is Debug.
                tracing::debug!(message = "🚀 Dispatched", command = ?line, outcome = ?outcome);

                match &outcome {
                    DispatchOutcome::Succeeded => {}
                    DispatchOutcome::Failed(report) => self.output_sink.println(report),
                    DispatchOutcome::Fault(message) => self
                        .output_sink
                        .println(format!("[native] error: {message}")),
                }

                if outcome.is_recordable() {
                    self.history.append(&line, &mut self.producer);
                }

                self.transition(SessionState::Idle);
            }
        }
    }

    fn terminate_with_notice(
        &mut self,
        termination_reason: TerminationReason,
        notice: impl Display,
    ) {
        self.output_sink.println(notice);
        self.terminate(termination_reason);
    }

    fn terminate(&mut self, termination_reason: TerminationReason) {
        // % is Display, ? is Debug.
        tracing::info!(message = "🛑 Session terminated", reason = %termination_reason);
        self.maybe_termination_reason = Some(termination_reason);
        self.transition(SessionState::Terminated);
    }

    fn transition(&mut self, next_state: SessionState) {
        // % is Display, ? is Debug.
        tracing::debug!(message = "🔀 Session state", from = %self.state, to = %next_state);
        self.state = next_state;
    }
}
