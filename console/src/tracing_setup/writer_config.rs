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

use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, registry::LookupSpan};

use super::{DisplayPreference, DynLayer, WriterConfig, rolling_file_appender_impl};

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
    };
}

impl WriterConfig {
    /// This erases the concrete type of the writer, and returns a boxed layer. This is
    /// useful for composition of layers. There's more info in the docs
    /// [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/index.html#runtime-configuration-with-layers).
    ///
    /// # Errors
    ///
    /// Never fails today, the signature matches [`Self::try_create_file_layer()`].
    pub fn try_create_display_layer<S>(
        &self,
        level_filter: LevelFilter,
    ) -> miette::Result<Option<Box<DynLayer<S>>>>
    where
        S: tracing_core::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        let preferred_display = match self {
            WriterConfig::Display(it) | WriterConfig::DisplayAndFile(it, _) => it.clone(),
            WriterConfig::None | WriterConfig::File(_) => return Ok(None),
        };

        let fmt_layer = create_fmt!();

        let layer: Box<DynLayer<S>> = match preferred_display {
            DisplayPreference::Stdout => Box::new(
                fmt_layer
                    .with_ansi(true)
                    .with_writer(std::io::stdout)
                    .with_filter(level_filter),
            ),
            DisplayPreference::Stderr => Box::new(
                fmt_layer
                    .with_ansi(true)
                    .with_writer(std::io::stderr)
                    .with_filter(level_filter),
            ),
            DisplayPreference::OutputSink(output_sink) => {
                let tracing_writer = move || -> Box<dyn std::io::Write> {
                    Box::new(output_sink.clone())
                };
                Box::new(
                    fmt_layer
                        .with_ansi(true)
                        .with_writer(tracing_writer)
                        .with_filter(level_filter),
                )
            }
        };

        Ok(Some(layer))
    }

    /// Same as [`Self::try_create_display_layer()`], but for the log file.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file path has no parent folder or file name.
    pub fn try_create_file_layer<S>(
        &self,
        level_filter: LevelFilter,
    ) -> miette::Result<Option<Box<DynLayer<S>>>>
    where
        S: tracing_core::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        let log_file_path = match self {
            WriterConfig::File(it) | WriterConfig::DisplayAndFile(_, it) => it,
            WriterConfig::None | WriterConfig::Display(_) => return Ok(None),
        };

        let file = rolling_file_appender_impl::try_create(log_file_path)?;
        Ok(Some(Box::new(
            create_fmt!()
                .with_ansi(false)
                .with_writer(file)
                .with_filter(level_filter),
        )))
    }
}
