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

use crate::Interrupt;

/// The states of the session loop. [`SessionState::Terminated`] is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum SessionState {
    #[default]
    Idle,
    /// A prompt has been handed to the producer, and the loop is waiting for it, a
    /// cancellation, or an interrupt.
    AwaitingInput,
    /// The executor is running a command.
    Dispatching,
    Terminated,
}

/// Why the session loop reached [`SessionState::Terminated`].
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum TerminationReason {
    /// The user typed `exit`.
    ExitRequested,
    /// The input stream was closed (eg: <kbd>Ctrl+D</kbd>), or the producer went away.
    EndOfInput,
    /// The session's cancellation token fired.
    Cancelled,
    /// A process level interrupt was delivered.
    #[strum(to_string = "Interrupted({0})")]
    Interrupted(Interrupt),
    /// The line reader failed with an I/O (or editor) error.
    #[strum(to_string = "ReaderFailed({0})")]
    ReaderFailed(String),
}
