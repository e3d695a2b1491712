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

//! Where the GitHub token comes from: `--token`, else [`TOKEN_ENV_VAR`], else a masked
//! prompt. An empty value at any step moves on to the next one.

use std::fmt::{Debug, Formatter};

use gh_console::{LineReader, LineReaderError};

use crate::{TOKEN_ENV_VAR, TOKEN_PROMPT};

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum CredentialsError {
    #[error("invalid github token: it is empty")]
    #[diagnostic(
        code(gh_console_cmdr::credentials::empty),
        help("Pass --token, or set the GITHUB_TOKEN environment variable")
    )]
    Empty,

    #[error("invalid github token: it contains whitespace")]
    #[diagnostic(code(gh_console_cmdr::credentials::whitespace))]
    ContainsWhitespace,

    #[error("could not read the github token")]
    #[diagnostic(code(gh_console_cmdr::credentials::read))]
    Read(#[from] LineReaderError),
}

/// A validated GitHub token. Its [`Debug`] output never reveals the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "Token(****)") }
}

impl Token {
    /// # Errors
    ///
    /// Returns an error if `raw` is empty, or contains whitespace anywhere.
    pub fn try_new(raw: impl Into<String>) -> Result<Self, CredentialsError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(CredentialsError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(CredentialsError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn expose(&self) -> &str { &self.0 }
}

/// The value of [`TOKEN_ENV_VAR`], if it is set.
#[must_use]
pub fn read_token_env_var() -> Option<String> { std::env::var(TOKEN_ENV_VAR).ok() }

/// Pick the token from the first non empty source, prompting (without echo) on
/// `line_reader` as the last resort.
///
/// # Errors
///
/// Returns an error if the chosen value is invalid, or if the prompt fails.
pub fn try_acquire_token(
    maybe_flag_value: Option<String>,
    maybe_env_value: Option<String>,
    line_reader: &mut dyn LineReader,
) -> Result<Token, CredentialsError> {
    let non_empty = |maybe: Option<String>| maybe.filter(|it| !it.is_empty());

    if let Some(value) = non_empty(maybe_flag_value) {
        tracing::debug!(message = "🔑 Using token from --token");
        return Token::try_new(value);
    }

    if let Some(value) = non_empty(maybe_env_value) {
        // % is Display, ? is Debug.
        tracing::debug!(message = "🔑 Using token from environment", var = %TOKEN_ENV_VAR);
        return Token::try_new(value);
    }

    let value = line_reader.read_masked_line(TOKEN_PROMPT)?;
    Token::try_new(value.trim())
}
