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

//! Wire up [`tracing`] for the console. Logs can go to a display (`stdout`, `stderr`, or
//! the session's [`crate::OutputSink`]), to a file, or both.
//!
//! Since the console owns the terminal while a prompt is up, an interactive application
//! should usually log to a file only.

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod writer_config;

// Re-export.
pub use tracing_config::*;
pub use writer_config::*;

use miette::IntoDiagnostic as _;
use tracing_subscriber::{Layer, layer::SubscriberExt as _, util::SubscriberInitExt as _};

pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Simply initialize the tracing system with the provided [`TracingConfig`]. Does
/// nothing if the config is disabled (see [`TracingConfig::is_enabled()`]).
///
/// # Errors
///
/// Returns an error if the log file can't be set up, or if a global subscriber has
/// already been installed.
pub fn init(tracing_config: TracingConfig) -> miette::Result<()> {
    match try_create_layers(&tracing_config)? {
        Some(layers) => tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .into_diagnostic(),
        None => Ok(()),
    }
}

/// Returns the layers. This does not initialize the tracing system. Don't forget to do
/// this manually, eg:
/// `try_create_layers(..)?.map(|layers| tracing_subscriber::registry().with(layers).init());`
///
/// # Errors
///
/// Returns an error if the log file can't be set up.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<tracing_subscriber::Registry>>>>> {
    if !tracing_config.is_enabled() {
        return Ok(None);
    }

    let level_filter = tracing_config.get_level_filter();
    let writer_config = tracing_config.get_writer_config();

    let mut layers: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Needed if more layers get added that don't have a level filter of their own.
    layers.push(Box::new(level_filter));

    if let Some(layer) = writer_config.try_create_display_layer(level_filter)? {
        layers.push(layer);
    }

    if let Some(layer) = writer_config.try_create_file_layer(level_filter)? {
        layers.push(layer);
    }

    Ok(Some(layers))
}

#[cfg(test)]
mod tests {
    use gh_test_fixtures::StdoutMock;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;
    use crate::OutputSink;

    #[test]
    fn test_no_layers_when_disabled() {
        assert!(try_create_layers(&TracingConfig::default()).unwrap().is_none());
    }

    #[test]
    fn test_display_and_file_layers() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = TracingConfig::default()
            .with_log_file(temp_dir.path().join("console.log"))
            .with_display(DisplayPreference::Stderr);
        let layers = try_create_layers(&config).unwrap().unwrap();
        // Level filter, display, file.
        assert_eq!(layers.len(), 3);
    }

    #[test]
    fn test_output_sink_display_receives_events() {
        let stdout_mock = StdoutMock::default();
        let config = TracingConfig::default()
            .with_display(DisplayPreference::OutputSink(OutputSink::new(
                stdout_mock.clone(),
            )))
            .with_level(tracing::Level::INFO);
        let layers = try_create_layers(&config).unwrap().unwrap();
        let subscriber = tracing_subscriber::registry().with(layers);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(message = "history saved", entries = 3);
            tracing::debug!(message = "filtered out");
        });

        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.contains("history saved"), "{output}");
        assert!(output.contains("entries=3"), "{output}");
        assert!(!output.contains("filtered out"), "{output}");
    }

    #[test]
    fn test_file_layer_writes_to_log_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_file_path = temp_dir.path().join("console.log");
        let config = TracingConfig::default().with_log_file(&log_file_path);
        let layers = try_create_layers(&config).unwrap().unwrap();
        let subscriber = tracing_subscriber::registry().with(layers);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(message = "could not delete history file");
        });

        let content = std::fs::read_to_string(&log_file_path).unwrap();
        assert!(content.contains("could not delete history file"), "{content}");
    }
}
