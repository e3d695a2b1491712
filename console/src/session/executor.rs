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

use std::{any::Any, future::Future, panic::AssertUnwindSafe};

use futures_util::FutureExt as _;
use tokio_util::sync::CancellationToken;

/// The command handler plugged into a [`crate::Session`]. It receives every line that is
/// neither blank nor an exit request, verbatim.
///
/// - The [`CancellationToken`] is a child of the session's token. Long running work
///   should race it.
/// - Returning an error is a normal outcome: the error is displayed and the command is
///   still recorded in the history.
/// - Panicking is survivable: the panic is caught at the dispatch boundary, displayed,
///   and the command is not recorded.
pub trait Executor: Send {
    fn execute(
        &mut self,
        cancellation_token: CancellationToken,
        command: &str,
    ) -> impl Future<Output = miette::Result<()>> + Send;
}

/// The result of handing one command to an [`Executor`].
#[derive(Debug)]
pub enum DispatchOutcome {
    Succeeded,
    Failed(miette::Report),
    /// The executor panicked. Holds the panic message.
    Fault(String),
}

impl DispatchOutcome {
    /// Whether the command should be recorded in the history.
    #[must_use]
    pub fn is_recordable(&self) -> bool { !matches!(self, DispatchOutcome::Fault(_)) }
}

/// Run `command` on `executor`, catching any panic it raises (whether while creating the
/// future, or while polling it).
pub async fn dispatch<E: Executor>(
    executor: &mut E,
    cancellation_token: CancellationToken,
    command: &str,
) -> DispatchOutcome {
    let future = async move { executor.execute(cancellation_token, command).await };
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(())) => DispatchOutcome::Succeeded,
        Ok(Err(report)) => DispatchOutcome::Failed(report),
        Err(panic_payload) => DispatchOutcome::Fault(panic_message(&*panic_payload)),
    }
}

fn panic_message(panic_payload: &(dyn Any + Send)) -> String {
    if let Some(message) = panic_payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic_payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
