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

//! Runs the command the user asked for on the command line.

use std::path::PathBuf;

use gh_console::{DetachedRecallBuffer, HistoryManager, OutputSink, Session, SessionConfig,
                 TerminationReason, spawn_os_interrupt_listener,
                 try_get_default_history_file_path, try_new_default_line_reader,
                 tracing_setup::{self, TracingConfig}};
use tokio_util::sync::CancellationToken;

use crate::{ApiClient, CLIArg, CLICommand, GitHubExecutor, GlobalOption, VersionInfo,
            WELCOME_MESSAGE, api_base_url, completion_words, read_token_env_var,
            try_acquire_token, ui_str};

/// # Errors
///
/// Returns an error if the chosen command fails.
pub async fn try_run_command(cli_arg: CLIArg) -> miette::Result<()> {
    let CLIArg {
        command,
        global_options,
    } = cli_arg;

    match command {
        Some(CLICommand::Version) => {
            OutputSink::default().println(VersionInfo::default());
            Ok(())
        }
        Some(CLICommand::ClearHistory) => {
            clear_history(&global_options, &OutputSink::default())
        }
        None => run_console(global_options).await.map(|_| ()),
    }
}

/// Turn on logging to a file, if the user asked for it. Logging never goes to the
/// terminal, since that would clobber the prompt.
///
/// # Errors
///
/// Returns an error if the log file can't be set up.
pub fn try_init_logging(global_options: &GlobalOption) -> miette::Result<()> {
    if !global_options.enable_logging {
        return Ok(());
    }
    let tracing_config =
        TracingConfig::default().with_log_file_or_default(global_options.log_file.clone());
    if let Some(path) = tracing_config.writer_config.get_log_file_path() {
        OutputSink::default().println(ui_str::logging_to_file_msg(path.display()));
    }
    tracing_setup::init(tracing_config)
}

/// # Errors
///
/// Returns an error if no path was given and the home folder can't be found.
pub fn resolve_history_file_path(global_options: &GlobalOption) -> miette::Result<PathBuf> {
    match &global_options.history_file {
        Some(path) => Ok(path.clone()),
        None => Ok(try_get_default_history_file_path()?),
    }
}

/// Delete the history file, the same way the console's own clear does.
///
/// # Errors
///
/// Returns an error if the history file path can't be determined. Failing to delete the
/// file is reported on `output_sink`, but is not an error.
pub fn clear_history(
    global_options: &GlobalOption,
    output_sink: &OutputSink,
) -> miette::Result<()> {
    let history_file_path = resolve_history_file_path(global_options)?;
    let mut recall_buffer = DetachedRecallBuffer;
    let mut history = HistoryManager::load(history_file_path, &mut recall_buffer);
    history.clear(&mut recall_buffer, output_sink);
    Ok(())
}

/// Acquire the token, start the interactive session, and persist the history once it
/// ends.
///
/// # Errors
///
/// Returns an error if the token is missing or invalid, the session can't be started,
/// or the history can't be saved.
pub async fn run_console(global_options: GlobalOption) -> miette::Result<TerminationReason> {
    let mut line_reader = try_new_default_line_reader()?;
    let token = try_acquire_token(
        global_options.token.clone(),
        read_token_env_var(),
        line_reader.as_mut(),
    )?;

    let output_sink = OutputSink::default();
    let api_client = ApiClient::try_new(token, &api_base_url())?;
    let executor = GitHubExecutor::new(api_client, output_sink.clone());

    let mut config = SessionConfig::default()
        .with_history_file_path(resolve_history_file_path(&global_options)?)
        .with_completion_words(completion_words());
    if let Some(prompt) = global_options.prompt {
        config = config.with_prompt(prompt);
    }

    let cancellation_token = CancellationToken::new();
    let mut session = Session::try_new(
        config,
        line_reader,
        executor,
        output_sink,
        cancellation_token.clone(),
        spawn_os_interrupt_listener(),
    )?;

    session.welcome(WELCOME_MESSAGE);
    let result = session.run().await;

    // Stop anything still racing the token.
    cancellation_token.cancel();

    let termination_reason = result?;
    // % is Display, ? is Debug.
    tracing::info!(message = "👋 Console closed", reason = %termination_reason);
    Ok(termination_reason)
}

#[cfg(test)]
mod tests {
    use gh_test_fixtures::{StdoutMock, create_temp_dir};

    use super::*;

    fn global_options(history_file: PathBuf) -> GlobalOption {
        GlobalOption {
            token: None,
            history_file: Some(history_file),
            prompt: None,
            enable_logging: false,
            log_file: None,
        }
    }

    #[test]
    fn test_clear_history_deletes_file() {
        let temp_dir = create_temp_dir().unwrap();
        let path = temp_dir.join(".gh_history");
        std::fs::write(&path, "Users.Get(octocat)").unwrap();
        let stdout_mock = StdoutMock::default();

        clear_history(&global_options(path.clone()), &OutputSink::new(stdout_mock.clone()))
            .unwrap();

        assert!(!path.exists());
        assert_eq!(stdout_mock.get_lines(), vec!["history file deleted."]);
    }

    #[test]
    fn test_clear_history_without_file_reports() {
        let temp_dir = create_temp_dir().unwrap();
        let stdout_mock = StdoutMock::default();

        clear_history(
            &global_options(temp_dir.join("missing")),
            &OutputSink::new(stdout_mock.clone()),
        )
        .unwrap();

        assert!(
            stdout_mock.get_lines()[0].starts_with("can't delete history file:")
        );
    }

    #[test]
    fn test_resolve_history_file_path_prefers_flag() {
        let path = PathBuf::from("/tmp/custom_history");
        assert_eq!(
            resolve_history_file_path(&global_options(path.clone())).unwrap(),
            path
        );
    }

    #[test]
    fn test_logging_disabled_is_a_no_op() {
        let mut options = global_options(PathBuf::from("unused"));
        options.enable_logging = false;
        assert!(try_init_logging(&options).is_ok());
    }
}
