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

use std::{path::PathBuf, sync::Arc};

use crate::{DEFAULT_PROMPT, HISTORY_FILE_NAME, try_get_default_history_file_path};

/// Startup configuration of a [`crate::Session`].
///
/// ```
/// use gh_console::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_prompt("gh> ")
///     .with_history_file_path("/tmp/.gh_history")
///     .with_completion_words(["Users", "Users.Get"]);
/// assert_eq!(config.prompt, "gh> ");
/// assert_eq!(config.completion_words.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub prompt: String,
    pub history_file_path: PathBuf,
    /// Immutable for the lifetime of the session.
    pub completion_words: Arc<[String]>,
}

impl Default for SessionConfig {
    /// The history file lives in the home folder. If that can't be determined, the
    /// current working folder is used instead.
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            history_file_path: try_get_default_history_file_path()
                .unwrap_or_else(|_| PathBuf::from(HISTORY_FILE_NAME)),
            completion_words: Arc::from(Vec::<String>::new()),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn with_history_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file_path = path.into();
        self
    }

    #[must_use]
    pub fn with_completion_words(
        mut self,
        words: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.completion_words = words.into_iter().map(Into::into).collect();
        self
    }
}
