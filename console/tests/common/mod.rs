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

//! Shared harness for the session integration tests.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::{path::PathBuf,
          sync::{Arc, PoisonError}};

use gh_console::{BoxedLineReader, Executor, InterruptSender, OutputSink,
                 ReadLineEvent, ScriptedLineReader, ScriptedReaderProbe, Session,
                 SessionConfig, StdMutex, WhenExhausted, create_interrupt_channel};
use gh_test_fixtures::{StdoutMock, TempDir, create_temp_dir};
use tokio_util::sync::CancellationToken;

/// Records every command it receives. Commands starting with `panic` panic, and
/// commands starting with `fail` return an error (both are still recorded here).
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    pub safe_commands: Arc<StdMutex<Vec<String>>>,
}

impl RecordingExecutor {
    pub fn get_commands(&self) -> Vec<String> {
        self.safe_commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Executor for RecordingExecutor {
    async fn execute(
        &mut self,
        _cancellation_token: CancellationToken,
        command: &str,
    ) -> miette::Result<()> {
        self.safe_commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command.to_string());

        if command.starts_with("panic") {
            panic!("executor exploded");
        }
        if command.starts_with("fail") {
            miette::bail!("executor failed: {command}");
        }
        Ok(())
    }
}

/// Waits on its cancellation token and records whether it saw the cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancellationAwareExecutor {
    pub safe_observed_cancellation: Arc<StdMutex<bool>>,
    pub session_cancellation_token: CancellationToken,
}

impl Executor for CancellationAwareExecutor {
    async fn execute(
        &mut self,
        cancellation_token: CancellationToken,
        _command: &str,
    ) -> miette::Result<()> {
        // Cancel the whole session, then make sure the child token noticed.
        self.session_cancellation_token.cancel();
        cancellation_token.cancelled().await;
        *self
            .safe_observed_cancellation
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = true;
        Ok(())
    }
}

/// Everything a test needs to drive a [`Session`] and inspect what happened.
pub struct TestSession<E: Executor> {
    pub session: Session<E>,
    pub stdout_mock: StdoutMock,
    pub probe: ScriptedReaderProbe,
    pub cancellation_token: CancellationToken,
    pub interrupt_sender: InterruptSender,
    pub history_file_path: PathBuf,
    /// Keeps the folder with the history file alive.
    pub temp_dir: TempDir,
}

pub const TEST_PROMPT: &str = "test> ";

pub fn completion_words() -> Vec<String> {
    ["Issues", "Issues.Create", "Issues.List", "Repositories.Get"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn create_test_session<E: Executor>(
    script: impl IntoIterator<Item = ReadLineEvent>,
    when_exhausted: WhenExhausted,
    executor: E,
    cancellation_token: CancellationToken,
    maybe_history_content: Option<&str>,
) -> TestSession<E> {
    let temp_dir = create_temp_dir().unwrap();
    let history_file_path = temp_dir.join(".gh_history");
    if let Some(content) = maybe_history_content {
        std::fs::write(&history_file_path, content).unwrap();
    }

    let reader = ScriptedLineReader::new(script, when_exhausted);
    let probe = reader.probe();
    let stdout_mock = StdoutMock::default();
    let (interrupt_sender, interrupt_receiver) = create_interrupt_channel();

    let config = SessionConfig::default()
        .with_prompt(TEST_PROMPT)
        .with_history_file_path(&history_file_path)
        .with_completion_words(completion_words());

    let session = Session::try_new(
        config,
        Box::new(reader) as BoxedLineReader,
        executor,
        OutputSink::new(stdout_mock.clone()),
        cancellation_token.clone(),
        interrupt_receiver,
    )
    .unwrap();

    TestSession {
        session,
        stdout_mock,
        probe,
        cancellation_token,
        interrupt_sender,
        history_file_path,
        temp_dir,
    }
}

/// Each string becomes a [`ReadLineEvent::Line`].
pub fn lines(lines: &[&str]) -> Vec<ReadLineEvent> {
    lines
        .iter()
        .map(|line| ReadLineEvent::Line((*line).to_string()))
        .collect()
}
