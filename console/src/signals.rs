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

//! Process level interrupts (`SIGINT`, `SIGTERM`), delivered to the session loop as
//! messages on a channel.
//!
//! These are distinct from the <kbd>Ctrl+C</kbd> that a line editor in raw mode captures
//! itself (see [`crate::ReadLineEvent::Aborted`]), and they always end the session.

use tokio::sync::mpsc;

/// Which interrupt was delivered. The display form is the conventional signal
/// description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Interrupt {
    /// `SIGINT`.
    #[strum(serialize = "interrupt")]
    Interrupt,
    /// `SIGTERM`.
    #[strum(serialize = "terminated")]
    Terminate,
}

pub type InterruptSender = mpsc::Sender<Interrupt>;
pub type InterruptReceiver = mpsc::Receiver<Interrupt>;

/// Capacity of the interrupt channel. A single pending interrupt is enough to end the
/// session, and the rest are dropped.
pub const INTERRUPT_CHANNEL_CAPACITY: usize = 1;

/// Create an interrupt channel that is not connected to the OS. Useful for embedding the
/// console in an application that handles signals itself, and for tests.
#[must_use]
pub fn create_interrupt_channel() -> (InterruptSender, InterruptReceiver) {
    mpsc::channel(INTERRUPT_CHANNEL_CAPACITY)
}

/// Spawn a task that listens for `SIGINT` (and `SIGTERM` on unix) and forwards them to
/// the returned receiver. Must be called from within a tokio runtime.
pub fn spawn_os_interrupt_listener() -> InterruptReceiver {
    let (sender, receiver) = create_interrupt_channel();
    tokio::spawn(listen_for_os_interrupts(sender));
    receiver
}

async fn listen_for_os_interrupts(sender: InterruptSender) {
    loop {
        let Some(interrupt) = wait_for_os_interrupt().await else {
            return;
        };
        // % is Display, ? is Debug.
        tracing::debug!(message = "⚡ OS interrupt received", interrupt = %interrupt);
        // Stop listening once nobody cares anymore.
        if sender.try_send(interrupt).is_err() && sender.is_closed() {
            return;
        }
    }
}

#[cfg(unix)]
async fn wait_for_os_interrupt() -> Option<Interrupt> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(error) => {
            // % is Display, ? is Debug.
            tracing::warn!(message = "Can't listen for SIGTERM", error = %error);
            return tokio::signal::ctrl_c().await.ok().map(|()| Interrupt::Interrupt);
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => result.ok().map(|()| Interrupt::Interrupt),
        maybe = sigterm.recv() => maybe.map(|()| Interrupt::Terminate),
    }
}

#[cfg(not(unix))]
async fn wait_for_os_interrupt() -> Option<Interrupt> {
    tokio::signal::ctrl_c()
        .await
        .ok()
        .map(|()| Interrupt::Interrupt)
}
