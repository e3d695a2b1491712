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

use std::{fmt::Debug, path::PathBuf};

use tracing_core::LevelFilter;

use crate::OutputSink;

/// The log file used when logging is enabled without a path.
pub const DEFAULT_LOG_FILE_NAME: &str = "github_console_debug.log";

/// Where logs go, and how verbose they are. Starts out disabled; each `with_*` call adds
/// a destination.
///
/// ```
/// use gh_console::tracing_setup::{DisplayPreference, TracingConfig, WriterConfig};
///
/// let config = TracingConfig::default()
///     .with_log_file("console.log")
///     .with_display(DisplayPreference::Stderr);
/// assert!(matches!(config.writer_config, WriterConfig::DisplayAndFile(..)));
/// ```
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level: tracing::Level,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            writer_config: WriterConfig::None,
            level: tracing::Level::DEBUG,
        }
    }
}

#[derive(Debug, Clone)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(PathBuf),
    DisplayAndFile(DisplayPreference, PathBuf),
}

/// The display a log line is echoed to. [`DisplayPreference::OutputSink`] interleaves
/// logs with the console's own output.
#[derive(Clone)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
    OutputSink(OutputSink),
}

impl Debug for DisplayPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayPreference::Stdout => write!(f, "Stdout"),
            DisplayPreference::Stderr => write!(f, "Stderr"),
            DisplayPreference::OutputSink(_) => write!(f, "OutputSink"),
        }
    }
}

impl WriterConfig {
    /// Replaces any display already set, keeps the file.
    #[must_use]
    pub fn add_display(self, display: DisplayPreference) -> Self {
        match self {
            WriterConfig::None | WriterConfig::Display(_) => WriterConfig::Display(display),
            WriterConfig::File(path) | WriterConfig::DisplayAndFile(_, path) => {
                WriterConfig::DisplayAndFile(display, path)
            }
        }
    }

    /// Replaces any file already set, keeps the display.
    #[must_use]
    pub fn add_file(self, path: PathBuf) -> Self {
        match self {
            WriterConfig::None | WriterConfig::File(_) => WriterConfig::File(path),
            WriterConfig::Display(display) | WriterConfig::DisplayAndFile(display, _) => {
                WriterConfig::DisplayAndFile(display, path)
            }
        }
    }

    #[must_use]
    pub fn get_log_file_path(&self) -> Option<&PathBuf> {
        match self {
            WriterConfig::File(path) | WriterConfig::DisplayAndFile(_, path) => Some(path),
            WriterConfig::None | WriterConfig::Display(_) => None,
        }
    }
}

impl TracingConfig {
    #[must_use]
    pub fn with_display(mut self, display: DisplayPreference) -> Self {
        self.writer_config = self.writer_config.add_display(display);
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.writer_config = self.writer_config.add_file(path.into());
        self
    }

    /// Log to `maybe_path`, or to [`DEFAULT_LOG_FILE_NAME`] in the current folder.
    #[must_use]
    pub fn with_log_file_or_default(self, maybe_path: Option<PathBuf>) -> Self {
        self.with_log_file(maybe_path.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.into()))
    }

    #[must_use]
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool { !matches!(self.writer_config, WriterConfig::None) }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { LevelFilter::from_level(self.level) }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_default_is_disabled() {
        let config = TracingConfig::default();
        assert!(!config.is_enabled());
        assert!(config.writer_config.get_log_file_path().is_none());
    }

    #[test]
    fn test_display_then_file_keeps_both() {
        let config = TracingConfig::default()
            .with_display(DisplayPreference::Stdout)
            .with_log_file("a.log");
        assert!(matches!(
            config.writer_config,
            WriterConfig::DisplayAndFile(DisplayPreference::Stdout, ref path) if path == Path::new("a.log")
        ));
    }

    #[test]
    fn test_later_file_replaces_earlier_one() {
        let config = TracingConfig::default()
            .with_log_file("a.log")
            .with_log_file("b.log");
        assert_eq!(
            config.writer_config.get_log_file_path(),
            Some(&PathBuf::from("b.log"))
        );
    }

    #[test]
    fn test_log_file_or_default() {
        let config = TracingConfig::default().with_log_file_or_default(None);
        assert_eq!(
            config.writer_config.get_log_file_path(),
            Some(&PathBuf::from(DEFAULT_LOG_FILE_NAME))
        );
    }

    #[test]
    fn test_level_filter() {
        let config = TracingConfig::default().with_level(tracing::Level::WARN);
        assert_eq!(config.get_level_filter(), LevelFilter::WARN);
    }
}
