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

//! The history manager: an append only, in memory log of accepted commands, which is
//! loaded from disk when a session starts and written back when it ends.
//!
//! The file format is plain text, one command per line.

use std::{fs::{self, OpenOptions},
          io::Write as _,
          path::{Path, PathBuf}};

use crate::{ConsoleError, DEBUG_HISTORY_MOD, HISTORY_FILE_NAME, OutputSink};

/// Permission bits of the history file after every write: owner read / write only.
pub const HISTORY_FILE_MODE: u32 = 0o600;

/// Anything that mirrors the session history into a line reader's recall buffer (the
/// entries the user can bring back with the up arrow).
pub trait RecallBuffer {
    fn set_history(&mut self, entries: &[String]);
    fn append_history(&mut self, entry: &str);
    fn clear_history(&mut self);
}

/// A [`RecallBuffer`] that isn't attached to any reader. Use it to manage the history
/// file without a running session, eg: to clear it from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedRecallBuffer;

impl RecallBuffer for DetachedRecallBuffer {
    fn set_history(&mut self, _entries: &[String]) {}
    fn append_history(&mut self, _entry: &str) {}
    fn clear_history(&mut self) {}
}

/// `$HOME/.gh_history`.
///
/// # Errors
///
/// Returns [`ConsoleError::HomeFolderNotFound`] if the home folder can't be determined.
pub fn try_get_default_history_file_path() -> Result<PathBuf, ConsoleError> {
    dirs::home_dir()
        .map(|home| home.join(HISTORY_FILE_NAME))
        .ok_or(ConsoleError::HomeFolderNotFound)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryManager {
    /// Oldest first. No two consecutive entries are the same.
    pub entries: Vec<String>,
    pub history_file_path: PathBuf,
}

impl HistoryManager {
    /// Load the history from `history_file_path` and mirror it into `recall_buffer`.
    ///
    /// A missing file, or one that can't be read for any other reason, is not an error.
    /// It simply results in an empty history, and the recall buffer is cleared.
    pub fn load(
        history_file_path: impl Into<PathBuf>,
        recall_buffer: &mut dyn RecallBuffer,
    ) -> Self {
        let history_file_path = history_file_path.into();

        // Invalid UTF-8 is replaced, the rest of each line is kept.
        match fs::read(&history_file_path) {
            Ok(bytes) => {
                let entries: Vec<String> = String::from_utf8_lossy(&bytes)
                    .lines()
                    .map(String::from)
                    .collect();
                recall_buffer.set_history(&entries);
                DEBUG_HISTORY_MOD.then(|| {
                    // % is Display, ? is Debug.
                    tracing::debug!(
                        message = "📑 Loaded history file",
                        path = ?history_file_path,
                        entries = entries.len()
                    );
                });
                Self {
                    entries,
                    history_file_path,
                }
            }
            Err(error) => {
                recall_buffer.clear_history();
                DEBUG_HISTORY_MOD.then(|| {
                    // % is Display, ? is Debug.
                    tracing::debug!(
                        message = "📑 No usable history file, starting empty",
                        path = ?history_file_path,
                        error = %error
                    );
                });
                Self {
                    entries: vec![],
                    history_file_path,
                }
            }
        }
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> { self.entries.last().map(String::as_str) }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Record `command`, unless it is the same as the most recent entry. Returns `true`
    /// if the history grew.
    pub fn append(&mut self, command: &str, recall_buffer: &mut dyn RecallBuffer) -> bool {
        if self.last() == Some(command) {
            return false;
        }
        self.entries.push(command.to_string());
        recall_buffer.append_history(command);
        true
    }

    /// The on disk representation: entries joined by newlines.
    #[must_use]
    pub fn serialize(&self) -> String { self.entries.join("\n") }

    /// Write the history to disk, then restrict the file to owner read / write. The
    /// permissions are set as a separate step, so that a file that already existed with
    /// broader permissions gets corrected too.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::PersistHistory`] if the file can't be written, and
    /// [`ConsoleError::SetHistoryPermissions`] if its permissions can't be changed.
    pub fn persist(&self) -> Result<(), ConsoleError> {
        let path = &self.history_file_path;
        let persist_error = |source| ConsoleError::PersistHistory {
            path: path.clone(),
            source,
        };

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt as _;
            options.mode(HISTORY_FILE_MODE);
        }

        let mut file = options.open(path).map_err(persist_error)?;
        file.write_all(self.serialize().as_bytes())
            .map_err(persist_error)?;
        file.flush().map_err(persist_error)?;
        drop(file);

        restrict_to_owner(path).map_err(|source| ConsoleError::SetHistoryPermissions {
            path: path.clone(),
            source,
        })?;

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "📑 Persisted history file",
            path = ?path,
            entries = self.entries.len()
        );

        Ok(())
    }

    /// Forget everything: truncate the in memory log, clear the recall buffer, and
    /// delete the history file. The outcome of the deletion is reported to `output_sink`
    /// and is never fatal.
    pub fn clear(&mut self, recall_buffer: &mut dyn RecallBuffer, output_sink: &OutputSink) {
        self.entries.clear();
        recall_buffer.clear_history();

        match fs::remove_file(&self.history_file_path) {
            Ok(()) => output_sink.println("history file deleted."),
            Err(source) => {
                let error = ConsoleError::DeleteHistory {
                    path: self.history_file_path.clone(),
                    source,
                };
                // % is Display, ? is Debug.
                tracing::warn!(message = "Could not delete history file", error = ?error);
                output_sink.println(error);
            }
        }
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt as _;
    fs::set_permissions(path, fs::Permissions::from_mode(HISTORY_FILE_MODE))
}

#[cfg(not(unix))]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    // Only the read-only bit is portable. Make sure it is not set, so that the next
    // session can write the file again.
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}
