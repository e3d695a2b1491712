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

use std::path::{Path, PathBuf};

use miette::IntoDiagnostic as _;

/// A folder that is removed (with everything in it) when this struct is dropped.
#[derive(Debug)]
pub struct TempDir {
    inner: tempfile::TempDir,
}

impl TempDir {
    #[must_use]
    pub fn path(&self) -> &Path { self.inner.path() }

    #[must_use]
    pub fn join(&self, file_name: impl AsRef<Path>) -> PathBuf { self.path().join(file_name) }
}

impl AsRef<Path> for TempDir {
    fn as_ref(&self) -> &Path { self.path() }
}

/// Create a temporary directory, prefixed with `gh_console_`. The directory is
/// automatically deleted when the [`TempDir`] struct is dropped.
///
/// # Errors
///
/// Returns an error if the folder can't be created.
pub fn create_temp_dir() -> miette::Result<TempDir> {
    let inner = tempfile::Builder::new()
        .prefix("gh_console_")
        .tempdir()
        .into_diagnostic()?;
    Ok(TempDir { inner })
}
