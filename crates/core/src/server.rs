// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TA protocol
//!
//! A single long-lived task: wait for an arrival, admit one student, summon
//! them, and (in serialized mode) wait until they have been helped. The loop
//! ends when a wake-up finds shutdown flagged and nobody left waiting.

use crate::error::OfficeError;
use crate::event::Event;
use crate::handoff::ServiceMode;
use crate::office::Rendezvous;
use crate::pacer::Pause;
use crate::room::Admission;
use tracing::{debug, info};

/// Where the TA is in its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Idle,
    Admitting,
    Serving,
    Terminated,
}

/// What the TA did before going home
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerSummary {
    /// Students summoned
    pub summoned: u64,
}

/// The TA
#[derive(Debug)]
pub struct TeachingAssistant {
    state: ServerState,
    summoned: u64,
}

impl Default for TeachingAssistant {
    fn default() -> Self {
        Self::new()
    }
}

impl TeachingAssistant {
    pub fn new() -> Self {
        Self {
            state: ServerState::Idle,
            summoned: 0,
        }
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    fn enter(&mut self, state: ServerState) {
        debug!(from = ?self.state, to = ?state, "ta transition");
        self.state = state;
    }

    /// Serve students until the office closes
    pub async fn run(mut self, rv: Rendezvous) -> Result<ServerSummary, OfficeError> {
        loop {
            self.enter(ServerState::Idle);
            rv.handoff.wait_arrival().await?;

            self.enter(ServerState::Admitting);
            let waiting = match rv.room.admit_next() {
                Admission::Closed => break,
                Admission::Admitted { waiting } => waiting,
            };

            rv.events.emit(Event::TaSummoned { waiting });
            rv.handoff.summon();
            self.summoned += 1;

            self.enter(ServerState::Serving);
            if rv.handoff.mode() == ServiceMode::Serialized {
                rv.handoff.wait_completion().await?;
            }

            rv.pacer.pause(Pause::TaReady).await;
        }

        self.enter(ServerState::Terminated);
        info!(summoned = self.summoned, "ta finished");
        rv.events.emit(Event::TaDone);
        Ok(ServerSummary {
            summoned: self.summoned,
        })
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
