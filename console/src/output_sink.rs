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

use std::{fmt::{Debug, Display},
          io::{self, Write},
          sync::{Arc, PoisonError}};

use crate::StdMutex;

pub type SendRawWriter = dyn Write + Send;
pub type SafeRawWriter = Arc<StdMutex<SendRawWriter>>;

/// Append only text stream that receives welcome banners, prompt loop diagnostics, and
/// error text. One line per logical message.
///
/// You can safely clone this struct, since it only contains an `Arc<StdMutex<..>>`. All
/// the clones write to the same underlying writer. This is how the sink is shared with
/// collaborators (like an [`crate::Executor`], or a tracing layer) while the session loop
/// still owns it.
///
/// You can provide your own implementation of `dyn Write + Send` via dependency
/// injection, so that you can capture the output in tests.
#[derive(Clone)]
pub struct OutputSink {
    pub safe_raw_writer: SafeRawWriter,
}

impl Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OutputSink")
    }
}

impl Default for OutputSink {
    fn default() -> Self { Self::new_stdout() }
}

impl OutputSink {
    #[must_use]
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            safe_raw_writer: Arc::new(StdMutex::new(writer)),
        }
    }

    #[must_use]
    pub fn new_stdout() -> Self { Self::new(io::stdout()) }

    /// Write `message` followed by a newline, and flush. Failures to write to the
    /// display are ignored, there is nowhere else to report them.
    pub fn println(&self, message: impl Display) {
        let mut writer = self
            .safe_raw_writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{message}").ok();
        writer.flush().ok();
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.safe_raw_writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.safe_raw_writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}
