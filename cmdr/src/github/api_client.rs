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

use reqwest::{Url,
              header::{ACCEPT, HeaderMap, HeaderName, HeaderValue}};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::{API_URL_ENV_VAR, APP_NAME, CommandParseError, DEBUG_GITHUB_MOD,
            DEFAULT_API_URL, Operation, Token};

pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
pub const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum GitHubError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] CommandParseError),

    #[error("unknown command `{name}`")]
    #[diagnostic(
        code(gh_console_cmdr::github::unknown_operation),
        help("Press Tab on an empty line to see the available services")
    )]
    UnknownOperation { name: String },

    #[error("`{signature}` expects {expected} argument(s), got {actual}")]
    #[diagnostic(code(gh_console_cmdr::github::arity_mismatch))]
    ArityMismatch {
        signature: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid API url `{url}`: {reason}")]
    #[diagnostic(code(gh_console_cmdr::github::invalid_url))]
    InvalidUrl { url: String, reason: String },

    #[error("request to GitHub failed")]
    #[diagnostic(code(gh_console_cmdr::github::http))]
    Http(#[from] reqwest::Error),

    #[error("GitHub API responded with {status}: {message}")]
    #[diagnostic(code(gh_console_cmdr::github::api))]
    Api { status: u16, message: String },

    #[error("request cancelled")]
    #[diagnostic(code(gh_console_cmdr::github::cancelled))]
    Cancelled,

    #[error("GitHub sent a response that isn't valid JSON")]
    #[diagnostic(code(gh_console_cmdr::github::json))]
    Json(#[from] serde_json::Error),
}

/// Shape of the body GitHub sends along with an error status.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Thin client for the GitHub REST API. Owned by one [`crate::GitHubExecutor`], so there
/// is one per session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    token: Token,
    pub base_url: Url,
}

/// [`DEFAULT_API_URL`], unless [`API_URL_ENV_VAR`] is set.
#[must_use]
pub fn api_base_url() -> String {
    std::env::var(API_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns an error if `base_url` can't be used as a base, or if the HTTP client
    /// can't be created.
    pub fn try_new(token: Token, base_url: &str) -> Result<Self, GitHubError> {
        let invalid_url = |reason: String| GitHubError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let base_url = Url::parse(base_url).map_err(|error| invalid_url(error.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid_url("it can't be a base".to_string()));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        default_headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .user_agent(format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            token,
            base_url,
        })
    }

    /// Fill the path template of `operation` with `args`, and add its query params.
    /// Every path segment is percent encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the base url can't have path segments appended.
    pub fn build_url(&self, operation: &Operation, args: &[String]) -> Result<Url, GitHubError> {
        let mut url = self.base_url.clone();

        {
            let mut path_segments =
                url.path_segments_mut()
                    .map_err(|()| GitHubError::InvalidUrl {
                        url: self.base_url.to_string(),
                        reason: "it can't be a base".to_string(),
                    })?;
            path_segments.pop_if_empty();
            for segment in operation.path.split('/') {
                let value = match segment
                    .strip_prefix('{')
                    .and_then(|it| it.strip_suffix('}'))
                {
                    Some(param) => operation.arg_for(param, args).unwrap_or_default(),
                    None => segment,
                };
                path_segments.push(value);
            }
        }

        if !operation.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for param in operation.query_params {
                query_pairs.append_pair(param, operation.arg_for(param, args).unwrap_or_default());
            }
        }

        Ok(url)
    }

    /// The JSON body for `operation`, or `None` if it has no body params.
    #[must_use]
    pub fn build_body(operation: &Operation, args: &[String]) -> Option<serde_json::Value> {
        if operation.body_params.is_empty() {
            return None;
        }
        let body: serde_json::Map<String, serde_json::Value> = operation
            .body_params
            .iter()
            .map(|param| {
                let value = operation.arg_for(param, args).unwrap_or_default();
                ((*param).to_string(), serde_json::Value::from(value))
            })
            .collect();
        Some(serde_json::Value::Object(body))
    }

    /// Perform `operation`, racing `cancellation_token`. Returns the parsed response
    /// body, or `None` if there was none (eg: `204 No Content`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request is cancelled, fails, GitHub responds with a non
    /// success status, or the body isn't JSON.
    pub async fn send(
        &self,
        cancellation_token: CancellationToken,
        operation: &Operation,
        args: &[String],
    ) -> Result<Option<serde_json::Value>, GitHubError> {
        let url = self.build_url(operation, args)?;

        DEBUG_GITHUB_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "🐙 Request", verb = %operation.verb, url = %url);
        });

        let mut request = self
            .client
            .request(operation.verb.into(), url)
            .bearer_auth(self.token.expose());
        if let Some(body) = Self::build_body(operation, args) {
            request = request.json(&body);
        }

        let response = tokio::select! {
            biased;
            () = cancellation_token.cancelled() => return Err(GitHubError::Cancelled),
            result = request.send() => result?,
        };

        let status = response.status();
        let text = tokio::select! {
            biased;
            () = cancellation_token.cancelled() => return Err(GitHubError::Cancelled),
            result = response.text() => result?,
        };

        DEBUG_GITHUB_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "🐙 Response", status = %status, bytes = text.len());
        });

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map_or_else(|_| text.trim().to_string(), |it| it.message);
            return Err(GitHubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&text)?))
    }
}
