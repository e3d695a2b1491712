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

mod common;

use std::{fs, io::Cursor, time::Duration};

use common::*;
use gh_console::{BufReadLineReader, ConsoleError, Interrupt, OutputSink, ReadLineEvent,
                 ScriptedLineReader, Session, SessionConfig, SessionState,
                 TerminationReason, WhenExhausted, create_interrupt_channel};
use gh_test_fixtures::{StdoutMock, create_temp_dir};
use pretty_assertions::assert_eq;
use test_case::test_case;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_consecutive_duplicates_are_recorded_once() {
    let executor = RecordingExecutor::default();
    let mut it = create_test_session(
        lines(&["Users.Get(octocat)", "Users.Get(octocat)", "Issues.List(a, b)"]),
        WhenExhausted::Eof,
        executor.clone(),
        CancellationToken::new(),
        None,
    );

    let termination_reason = it.session.run().await.unwrap();

    assert_eq!(termination_reason, TerminationReason::EndOfInput);
    assert_eq!(executor.get_commands().len(), 3);
    assert_eq!(it.session.history().entries, vec![
        "Users.Get(octocat)",
        "Issues.List(a, b)"
    ]);
    assert_eq!(
        fs::read_to_string(&it.history_file_path).unwrap(),
        "Users.Get(octocat)\nIssues.List(a, b)"
    );
}

#[test_case(""; "empty")]
#[test_case("   "; "spaces")]
#[test_case("\t \t"; "tabs")]
#[tokio::test]
async fn test_whitespace_only_lines_are_ignored(line: &str) {
    let executor = RecordingExecutor::default();
    let mut it = create_test_session(
        lines(&[line, "Users.Get(octocat)"]),
        WhenExhausted::Eof,
        executor.clone(),
        CancellationToken::new(),
        None,
    );

    it.session.run().await.unwrap();

    assert_eq!(executor.get_commands(), vec!["Users.Get(octocat)"]);
    assert_eq!(it.session.history().entries, vec!["Users.Get(octocat)"]);
    // The blank line caused a re-prompt: blank, command, end of input.
    assert_eq!(it.probe.get_prompts().len(), 3);
}

#[test_case("exit"; "plain")]
#[test_case("  exit;; "; "padded with semicolons")]
#[test_case("exit;"; "one semicolon")]
#[tokio::test]
async fn test_exit_terminates_without_dispatch(exit_line: &str) {
    let executor = RecordingExecutor::default();
    let mut it = create_test_session(
        lines(&[exit_line, "never.Dispatched()"]),
        WhenExhausted::Eof,
        executor.clone(),
        CancellationToken::new(),
        None,
    );

    let termination_reason = it.session.run().await.unwrap();

    assert_eq!(termination_reason, TerminationReason::ExitRequested);
    assert_eq!(it.session.state(), SessionState::Terminated);
    assert!(executor.get_commands().is_empty());
    assert!(it.session.history().is_empty());
    assert_eq!(it.probe.get_prompts(), vec![TEST_PROMPT]);
}

#[test_case("exit now"; "trailing word")]
#[test_case("exits"; "longer token")]
#[tokio::test]
async fn test_almost_exit_is_dispatched(line: &str) {
    let executor = RecordingExecutor::default();
    let mut it = create_test_session(
        lines(&[line]),
        WhenExhausted::Eof,
        executor.clone(),
        CancellationToken::new(),
        None,
    );

    it.session.run().await.unwrap();

    assert_eq!(executor.get_commands(), vec![line]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_persisted_file_is_owner_only_even_if_it_was_not() {
    use std::os::unix::fs::PermissionsExt as _;

    let mut it = create_test_session(
        lines(&["Repositories.Get(rust-lang, rust)"]),
        WhenExhausted::Eof,
        RecordingExecutor::default(),
        CancellationToken::new(),
        Some("Users.Get(octocat)"),
    );
    fs::set_permissions(&it.history_file_path, fs::Permissions::from_mode(0o644)).unwrap();

    it.session.run().await.unwrap();

    let mode = fs::metadata(&it.history_file_path)
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(
        fs::read_to_string(&it.history_file_path).unwrap(),
        "Users.Get(octocat)\nRepositories.Get(rust-lang, rust)"
    );
}

#[tokio::test]
async fn test_executor_panic_is_contained() {
    let executor = RecordingExecutor::default();
    let mut it = create_test_session(
        lines(&["panic.Now()", "Users.Get(octocat)"]),
        WhenExhausted::Eof,
        executor.clone(),
        CancellationToken::new(),
        None,
    );

    let termination_reason = it.session.run().await.unwrap();

    assert_eq!(termination_reason, TerminationReason::EndOfInput);
    assert_eq!(executor.get_commands(), vec![
        "panic.Now()",
        "Users.Get(octocat)"
    ]);
    assert_eq!(it.session.history().entries, vec!["Users.Get(octocat)"]);
    assert!(
        it.stdout_mock
            .get_lines()
            .contains(&"[native] error: executor exploded".to_string())
    );
}

#[tokio::test]
async fn test_executor_error_is_displayed_and_still_recorded() {
    let mut it = create_test_session(
        lines(&["fail.Please()"]),
        WhenExhausted::Eof,
        RecordingExecutor::default(),
        CancellationToken::new(),
        None,
    );

    it.session.run().await.unwrap();

    assert_eq!(it.session.history().entries, vec!["fail.Please()"]);
    assert!(
        it.stdout_mock
            .get_lines()
            .contains(&"executor failed: fail.Please()".to_string())
    );
}

#[tokio::test]
async fn test_aborted_input_reprompts() {
    let executor = RecordingExecutor::default();
    let mut script = vec![ReadLineEvent::Aborted, ReadLineEvent::Aborted];
    script.extend(lines(&["Users.Get(octocat)"]));
    let mut it = create_test_session(
        script,
        WhenExhausted::Eof,
        executor.clone(),
        CancellationToken::new(),
        None,
    );

    let termination_reason = it.session.run().await.unwrap();

    assert_eq!(termination_reason, TerminationReason::EndOfInput);
    assert_eq!(executor.get_commands(), vec!["Users.Get(octocat)"]);
    // Aborted, aborted, command, end of input.
    assert_eq!(it.probe.get_prompts().len(), 4);
}

#[tokio::test]
async fn test_end_of_input_prints_exit_notice() {
    let mut it = create_test_session(
        Vec::<ReadLineEvent>::new(),
        WhenExhausted::Eof,
        RecordingExecutor::default(),
        CancellationToken::new(),
        None,
    );

    it.session.run().await.unwrap();

    assert_eq!(it.stdout_mock.get_copy_of_buffer_as_string(), "\nexiting.\n");
}

#[tokio::test]
async fn test_os_interrupt_while_awaiting_input_terminates() {
    let executor = RecordingExecutor::default();
    let mut it = create_test_session(
        Vec::<ReadLineEvent>::new(),
        WhenExhausted::Block,
        executor.clone(),
        CancellationToken::new(),
        None,
    );

    let interrupt_sender = it.interrupt_sender.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        interrupt_sender.send(Interrupt::Interrupt).await.unwrap();
    });

    let termination_reason =
        tokio::time::timeout(Duration::from_secs(5), it.session.run())
            .await
            .unwrap()
            .unwrap();

    assert_eq!(
        termination_reason,
        TerminationReason::Interrupted(Interrupt::Interrupt)
    );
    assert_eq!(it.stdout_mock.get_lines(), vec![
        "caught interrupt: interrupt, exiting."
    ]);
    assert!(executor.get_commands().is_empty());
    // The (empty) history was still written.
    assert!(it.history_file_path.exists());
}

#[tokio::test]
async fn test_cancellation_while_awaiting_input_terminates() {
    let cancellation_token = CancellationToken::new();
    let mut it = create_test_session(
        Vec::<ReadLineEvent>::new(),
        WhenExhausted::Block,
        RecordingExecutor::default(),
        cancellation_token.clone(),
        None,
    );

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancellation_token.cancel();
    });

    let termination_reason =
        tokio::time::timeout(Duration::from_secs(5), it.session.run())
            .await
            .unwrap()
            .unwrap();

    assert_eq!(termination_reason, TerminationReason::Cancelled);
    assert_eq!(it.stdout_mock.get_lines(), vec!["session cancelled, exiting."]);
}

#[tokio::test]
async fn test_executor_gets_a_child_of_the_session_token() {
    let cancellation_token = CancellationToken::new();
    let executor = CancellationAwareExecutor {
        session_cancellation_token: cancellation_token.clone(),
        ..Default::default()
    };
    let safe_observed_cancellation = executor.safe_observed_cancellation.clone();
    let mut it = create_test_session(
        lines(&["Users.Get(octocat)", "never.Read()"]),
        WhenExhausted::Eof,
        executor,
        cancellation_token,
        None,
    );

    let termination_reason = it.session.run().await.unwrap();

    assert!(*safe_observed_cancellation.lock().unwrap());
    assert_eq!(termination_reason, TerminationReason::Cancelled);
    // The loop noticed the cancellation before asking for another line.
    assert_eq!(it.probe.get_prompts().len(), 1);
}

#[tokio::test]
async fn test_dropped_interrupt_sender_does_not_end_the_session() {
    let executor = RecordingExecutor::default();
    let it = create_test_session(
        lines(&["Users.Get(octocat)"]),
        WhenExhausted::Eof,
        executor.clone(),
        CancellationToken::new(),
        None,
    );
    let mut session = it.session;
    drop(it.interrupt_sender);

    let termination_reason = session.run().await.unwrap();

    assert_eq!(termination_reason, TerminationReason::EndOfInput);
    assert_eq!(executor.get_commands(), vec!["Users.Get(octocat)"]);
}

#[tokio::test]
async fn test_missing_history_file_means_empty_history_and_recall_buffer() {
    let mut it = create_test_session(
        Vec::<ReadLineEvent>::new(),
        WhenExhausted::Eof,
        RecordingExecutor::default(),
        CancellationToken::new(),
        None,
    );

    assert!(it.session.history().is_empty());

    it.session.run().await.unwrap();

    assert!(it.probe.get_recall_buffer().is_empty());
}

#[tokio::test]
async fn test_loaded_history_reaches_the_recall_buffer() {
    let mut it = create_test_session(
        lines(&["c"]),
        WhenExhausted::Eof,
        RecordingExecutor::default(),
        CancellationToken::new(),
        Some("a\nb"),
    );

    assert_eq!(it.session.history().entries, vec!["a", "b"]);

    it.session.run().await.unwrap();

    assert_eq!(it.probe.get_recall_buffer(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_completion_callback_is_installed() {
    let it = create_test_session(
        Vec::<ReadLineEvent>::new(),
        WhenExhausted::Eof,
        RecordingExecutor::default(),
        CancellationToken::new(),
        None,
    );

    let completion_callback = it.probe.get_completion_callback().unwrap();

    let completion = completion_callback("", 0);
    assert_eq!(completion.candidates, vec!["Issues"]);

    let completion = completion_callback("Iss(x)", 3);
    assert_eq!(completion.candidates, vec![
        "Issues",
        "Issues.Create",
        "Issues.List"
    ]);
    assert_eq!(completion.tail, "(x)");
}

#[tokio::test]
async fn test_history_is_persisted_exactly_once() {
    let mut it = create_test_session(
        lines(&["a"]),
        WhenExhausted::Eof,
        RecordingExecutor::default(),
        CancellationToken::new(),
        None,
    );

    it.session.run().await.unwrap();
    fs::remove_file(&it.history_file_path).unwrap();

    it.session.persist_history().unwrap();
    // Terminated is absorbing, running again changes nothing.
    assert_eq!(it.session.run().await.unwrap(), TerminationReason::EndOfInput);

    assert!(!it.history_file_path.exists());
}

#[tokio::test]
async fn test_clear_history_deletes_file() {
    let mut it = create_test_session(
        Vec::<ReadLineEvent>::new(),
        WhenExhausted::Eof,
        RecordingExecutor::default(),
        CancellationToken::new(),
        Some("a\nb"),
    );

    it.session.clear_history();

    assert!(it.session.history().is_empty());
    assert!(!it.history_file_path.exists());
    assert_eq!(it.stdout_mock.get_lines(), vec!["history file deleted."]);
}

#[tokio::test]
async fn test_welcome_goes_to_output_sink() {
    let it = create_test_session(
        Vec::<ReadLineEvent>::new(),
        WhenExhausted::Eof,
        RecordingExecutor::default(),
        CancellationToken::new(),
        None,
    );

    it.session.welcome("Welcome to the Github console!");
    it.session.clone_output_sink().println("via clone");

    assert_eq!(it.stdout_mock.get_lines(), vec![
        "Welcome to the Github console!",
        "via clone"
    ]);
}

#[tokio::test]
async fn test_reader_failure_terminates_the_session() {
    let temp_dir = create_temp_dir().unwrap();
    let stdout_mock = StdoutMock::default();
    let (_interrupt_sender, interrupt_receiver) = create_interrupt_channel();
    let executor = RecordingExecutor::default();
    // Not valid UTF-8.
    let reader = BufReadLineReader::new(Cursor::new(vec![0xff, 0xfe, b'\n']));

    let mut session = Session::try_new(
        SessionConfig::default().with_history_file_path(temp_dir.join("history")),
        Box::new(reader),
        executor.clone(),
        OutputSink::new(stdout_mock.clone()),
        CancellationToken::new(),
        interrupt_receiver,
    )
    .unwrap();

    let termination_reason = session.run().await.unwrap();

    assert!(matches!(
        termination_reason,
        TerminationReason::ReaderFailed(_)
    ));
    assert!(executor.get_commands().is_empty());
    assert_eq!(stdout_mock.get_lines().len(), 1);
}

#[tokio::test]
async fn test_piped_input_behaves_like_typed_input() {
    let temp_dir = create_temp_dir().unwrap();
    let stdout_mock = StdoutMock::default();
    let (_interrupt_sender, interrupt_receiver) = create_interrupt_channel();
    let executor = RecordingExecutor::default();
    let reader =
        BufReadLineReader::new(Cursor::new("Users.Get(octocat)\n\n  \nexit;\nnope\n"));

    let mut session = Session::try_new(
        SessionConfig::default().with_history_file_path(temp_dir.join("history")),
        Box::new(reader),
        executor.clone(),
        OutputSink::new(stdout_mock),
        CancellationToken::new(),
        interrupt_receiver,
    )
    .unwrap();

    let termination_reason = session.run().await.unwrap();

    assert_eq!(termination_reason, TerminationReason::ExitRequested);
    assert_eq!(executor.get_commands(), vec!["Users.Get(octocat)"]);
}

#[tokio::test]
async fn test_run_surfaces_persist_failure() {
    let temp_dir = create_temp_dir().unwrap();
    let history_file_path = temp_dir.join("missing").join("history");
    let (_interrupt_sender, interrupt_receiver) = create_interrupt_channel();
    let executor = RecordingExecutor::default();
    let reader = ScriptedLineReader::from_lines(&["Users.Get(octocat)"]);

    let mut session = Session::try_new(
        SessionConfig::default().with_history_file_path(history_file_path.clone()),
        Box::new(reader),
        executor.clone(),
        OutputSink::new(StdoutMock::default()),
        CancellationToken::new(),
        interrupt_receiver,
    )
    .unwrap();

    let result = session.run().await;

    assert!(matches!(
        result,
        Err(ConsoleError::PersistHistory { ref path, .. }) if *path == history_file_path
    ));
    assert_eq!(executor.get_commands(), vec!["Users.Get(octocat)"]);
    assert_eq!(session.state(), SessionState::Terminated);
}
