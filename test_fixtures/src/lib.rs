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

//! Reusable test fixtures for the crates in this workspace. This crate is intended to be
//! a [`dev-dependency`](https://doc.rust-lang.org/cargo/reference/specifying-dependencies.html#dev-dependencies)
//! only.
//!
//! 1. [`StdoutMock`] captures everything the console prints, so that tests can assert on
//!    it (optionally with ANSI escape sequences stripped).
//! 2. [`create_temp_dir()`] makes a folder that is removed when the [`TempDir`] is
//!    dropped, handy for history and log files.
//!
//! ```
//! use std::io::Write as _;
//!
//! use gh_test_fixtures::StdoutMock;
//!
//! let mut stdout_mock = StdoutMock::default();
//! let stdout_mock_clone = stdout_mock.clone(); // Points to the same buffer.
//!
//! stdout_mock.write_all(b"hello world").unwrap();
//!
//! assert_eq!(stdout_mock_clone.get_copy_of_buffer_as_string(), "hello world");
//! ```

// Attach sources.
pub mod output_device_fixtures;
pub mod temp_dir;

// Re-export.
pub use output_device_fixtures::*;
pub use temp_dir::*;

// Type aliases.
pub type StdMutex<T> = std::sync::Mutex<T>;
