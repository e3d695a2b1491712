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

use gh_console::{Executor, OutputSink};
use tokio_util::sync::CancellationToken;

use crate::{ApiClient, CommandCall, GitHubError, find_operation};

/// The [`Executor`] behind `github-console`: parses `Service.Method(args)`, looks it up
/// in [`crate::OPERATIONS`], calls the API, and pretty prints the JSON it gets back.
#[derive(Debug)]
pub struct GitHubExecutor {
    pub api_client: ApiClient,
    pub output_sink: OutputSink,
}

impl GitHubExecutor {
    #[must_use]
    pub fn new(api_client: ApiClient, output_sink: OutputSink) -> Self {
        Self {
            api_client,
            output_sink,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the command can't be parsed, names an unknown operation, has
    /// the wrong number of arguments, or the API call fails.
    pub async fn try_execute(
        &self,
        cancellation_token: CancellationToken,
        command: &str,
    ) -> Result<(), GitHubError> {
        let command_call = CommandCall::parse(command)?;
        let operation = find_operation(&command_call.service, &command_call.method)?;
        operation.check_arity(&command_call.args)?;

        // % is Display, ? is Debug.
        tracing::info!(
            message = "🐙 Calling GitHub",
            service = %command_call.service,
            method = %command_call.method,
            params = ?command_call.args
        );

        let maybe_value = self
            .api_client
            .send(cancellation_token, operation, &command_call.args)
            .await?;

        if let Some(value) = maybe_value {
            self.output_sink.println(serde_json::to_string_pretty(&value)?);
        }

        Ok(())
    }
}

impl Executor for GitHubExecutor {
    async fn execute(
        &mut self,
        cancellation_token: CancellationToken,
        command: &str,
    ) -> miette::Result<()> {
        Ok(self.try_execute(cancellation_token, command).await?)
    }
}

#[cfg(test)]
mod tests {
    use gh_test_fixtures::StdoutMock;

    use super::*;
    use crate::{CommandParseError, Token};

    fn executor() -> (GitHubExecutor, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        let api_client = ApiClient::try_new(
            Token::try_new("ghp_test").unwrap(),
            "http://127.0.0.1:9",
        )
        .unwrap();
        (
            GitHubExecutor::new(api_client, OutputSink::new(stdout_mock.clone())),
            stdout_mock,
        )
    }

    #[tokio::test]
    async fn test_parse_error_is_reported() {
        let (executor, stdout_mock) = executor();
        let result = executor
            .try_execute(CancellationToken::new(), "octocat")
            .await;
        assert!(matches!(
            result,
            Err(GitHubError::Parse(CommandParseError::MissingServiceOrMethod))
        ));
        assert!(stdout_mock.get_copy_of_buffer().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_operation_is_reported() {
        let (mut executor, _) = executor();
        let report = executor
            .execute(CancellationToken::new(), "Users.Delete(octocat)")
            .await
            .unwrap_err();
        assert_eq!(report.to_string(), "unknown command `Users.Delete`");
    }

    #[tokio::test]
    async fn test_arity_is_checked_before_any_request() {
        let (executor, _) = executor();
        let result = executor
            .try_execute(CancellationToken::new(), "Repositories.Get(rust-lang)")
            .await;
        assert!(matches!(
            result,
            Err(GitHubError::ArityMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }
}
