// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pacing hook for simulated work
//!
//! The protocol never depends on how long anything takes. A [`Pacer`] is
//! asked to pause at each point where real work would happen and may block
//! for any duration, including none.

use crate::config::{DelayConfig, DelayRange};
use crate::event::StudentId;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Where in the protocol a pause happens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// A student on the way to the office (before each attempt)
    Arrival(StudentId),
    /// A student being helped
    Service(StudentId),
    /// The TA getting ready for the next student
    TaReady,
}

/// Blocks for a while at each [`Pause`]
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, pause: Pause);
}

/// Pacer that never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Pacer for NoDelay {
    async fn pause(&self, _pause: Pause) {}
}

/// Pacer that sleeps for a uniformly random duration from its configured
/// ranges
#[derive(Debug)]
pub struct RandomPacer {
    delays: DelayConfig,
    rng: Mutex<StdRng>,
}

impl RandomPacer {
    pub fn new(delays: DelayConfig) -> Self {
        Self {
            delays,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible delays for a given seed
    pub fn seeded(delays: DelayConfig, seed: u64) -> Self {
        Self {
            delays,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draw the delay for a pause without sleeping
    pub fn delay_for(&self, pause: Pause) -> Duration {
        let range = match pause {
            Pause::Arrival(_) => self.delays.arrival,
            Pause::Service(_) => self.delays.service,
            Pause::TaReady => self.delays.ta_ready,
        };
        self.draw(range)
    }

    fn draw(&self, range: DelayRange) -> Duration {
        if range.min >= range.max {
            return range.min;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(range.min..=range.max)
    }
}

#[async_trait]
impl Pacer for RandomPacer {
    async fn pause(&self, pause: Pause) {
        let delay = self.delay_for(pause);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}


/// Fake pacer for testing
///
/// Records every pause, yields to the scheduler so other tasks get a chance
/// to interleave, and optionally sleeps a fixed time per kind of pause
/// (useful with a paused tokio clock).
#[derive(Clone, Default)]
pub struct FakePacer {
    pauses: Arc<Mutex<Vec<Pause>>>,
    service_time: Duration,
    arrival_time: Duration,
}

impl FakePacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service_time(mut self, duration: Duration) -> Self {
        self.service_time = duration;
        self
    }

    pub fn with_arrival_time(mut self, duration: Duration) -> Self {
        self.arrival_time = duration;
        self
    }

    /// All pauses requested so far
    pub fn pauses(&self) -> Vec<Pause> {
        self.pauses.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of arrival pauses taken by one student
    pub fn arrival_attempts(&self, student: StudentId) -> usize {
        self.pauses()
            .iter()
            .filter(|p| **p == Pause::Arrival(student))
            .count()
    }
}

#[async_trait]
impl Pacer for FakePacer {
    async fn pause(&self, pause: Pause) {
        self.pauses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(pause);

        let delay = match pause {
            Pause::Arrival(_) => self.arrival_time,
            Pause::Service(_) => self.service_time,
            Pause::TaReady => Duration::ZERO,
        };
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
#[path = "pacer_tests.rs"]
mod tests;
