// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handoff signals between the TA and the students
//!
//! Each signal is a counting semaphore whose permits are forgotten on
//! acquire, so a post made before anyone waits is kept rather than lost.

use crate::error::OfficeError;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

/// Whether the TA waits for one service to end before summoning the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceMode {
    /// One student in service at a time: the TA waits for a completion
    /// acknowledgment before calling anyone else
    #[default]
    Serialized,
    /// The TA summons the next student as soon as it is ready, so several
    /// students may be in service at once
    Overlapping,
}

impl std::fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceMode::Serialized => write!(f, "serialized"),
            ServiceMode::Overlapping => write!(f, "overlapping"),
        }
    }
}

/// The arrival, summons and completion signals
#[derive(Debug)]
pub struct HandoffChannel {
    mode: ServiceMode,
    arrivals: Semaphore,
    summons: Semaphore,
    completions: Semaphore,
}

impl HandoffChannel {
    pub fn new(mode: ServiceMode) -> Self {
        Self {
            mode,
            arrivals: Semaphore::new(0),
            summons: Semaphore::new(0),
            completions: Semaphore::new(0),
        }
    }

    pub fn mode(&self) -> ServiceMode {
        self.mode
    }

    /// A student sat down (or the coordinator is waking the TA for shutdown)
    pub fn post_arrival(&self) {
        self.arrivals.add_permits(1);
    }

    pub async fn wait_arrival(&self) -> Result<(), OfficeError> {
        take(&self.arrivals, "arrival").await
    }

    /// Call exactly one waiting student
    pub fn summon(&self) {
        self.summons.add_permits(1);
    }

    pub async fn wait_summons(&self) -> Result<(), OfficeError> {
        take(&self.summons, "summons").await
    }

    /// A student finished service. Only serialized mode has anyone
    /// listening, so overlapping mode posts nothing.
    pub fn acknowledge_service(&self) {
        if self.mode == ServiceMode::Serialized {
            self.completions.add_permits(1);
        }
    }

    pub async fn wait_completion(&self) -> Result<(), OfficeError> {
        take(&self.completions, "completion").await
    }

    /// Arrival posts nobody has consumed yet
    pub fn pending_arrival_signals(&self) -> usize {
        self.arrivals.available_permits()
    }

    /// Summons posted but not yet taken by a student
    pub fn outstanding_summons(&self) -> usize {
        self.summons.available_permits()
    }

    pub fn outstanding_completions(&self) -> usize {
        self.completions.available_permits()
    }
}

async fn take(signal: &Semaphore, name: &'static str) -> Result<(), OfficeError> {
    let permit = signal
        .acquire()
        .await
        .map_err(|_| OfficeError::SignalClosed(name))?;
    permit.forget();
    Ok(())
}

#[cfg(test)]
#[path = "handoff_tests.rs"]
mod tests;
