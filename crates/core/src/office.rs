// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Office-hours coordinator
//!
//! Bootstraps the shared room and signals, spawns the TA and every student,
//! and tears everything down once all students have left:
//!
//! 1. join every student task
//! 2. flag shutdown under the room lock
//! 3. post one arrival pulse so a parked TA wakes and sees the flag
//! 4. join the TA

use crate::config::OfficeConfig;
use crate::error::OfficeError;
use crate::event::{EventSink, StudentId, TracingSink};
use crate::handoff::{HandoffChannel, ServiceMode};
use crate::pacer::{Pacer, RandomPacer};
use crate::room::WaitingRoom;
use crate::server::{ServerSummary, TeachingAssistant};
use crate::student::{Student, StudentOutcome};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, info_span, warn, Instrument};

/// Shared handles every task needs
#[derive(Clone)]
pub struct Rendezvous {
    pub room: Arc<WaitingRoom>,
    pub handoff: Arc<HandoffChannel>,
    pub pacer: Arc<dyn Pacer>,
    pub events: Arc<dyn EventSink>,
}

impl Rendezvous {
    pub fn new(
        chairs: u32,
        mode: ServiceMode,
        pacer: Arc<dyn Pacer>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            room: Arc::new(WaitingRoom::new(chairs)),
            handoff: Arc::new(HandoffChannel::new(mode)),
            pacer,
            events,
        }
    }

    /// Flag shutdown and wake the TA so it can observe the flag
    pub fn close(&self) {
        self.room.mark_shutting_down();
        self.handoff.post_arrival();
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficeReport {
    pub students: u32,
    pub chairs: u32,
    pub service_mode: ServiceMode,
    pub served: u32,
    pub gave_up: u32,
    pub denials: u64,
    pub summoned: u64,
    pub peak_occupied: u32,
    pub peak_in_service: u32,
    /// Students who left without help, by id
    pub unserved: Vec<StudentId>,
}

impl fmt::Display for OfficeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Office hours over: {}/{} students helped ({} mode, {} chairs)",
            self.served, self.students, self.service_mode, self.chairs
        )?;
        writeln!(f, "  Turned away at the door: {}", self.denials)?;
        writeln!(f, "  Busiest hallway: {} seated", self.peak_occupied)?;
        write!(f, "  Most helped at once: {}", self.peak_in_service)?;
        if !self.unserved.is_empty() {
            let ids: Vec<String> = self.unserved.iter().map(|id| id.to_string()).collect();
            write!(f, "\n  Gave up: {}", ids.join(", "))?;
        }
        Ok(())
    }
}

/// One office-hours session: a TA, a hallway, and N students
pub struct Office {
    config: OfficeConfig,
    rv: Rendezvous,
}

impl Office {
    /// Validate the config and set up a random pacer and tracing events
    pub fn new(config: OfficeConfig) -> Result<Self, OfficeError> {
        config.validate()?;
        let pacer: Arc<dyn Pacer> = match config.seed {
            Some(seed) => Arc::new(RandomPacer::seeded(config.delays, seed)),
            None => Arc::new(RandomPacer::new(config.delays)),
        };
        let rv = Rendezvous::new(
            config.chairs,
            config.service_mode,
            pacer,
            Arc::new(TracingSink),
        );
        Ok(Self { config, rv })
    }

    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.rv.pacer = Arc::new(pacer);
        self
    }

    pub fn with_events(mut self, events: impl EventSink + 'static) -> Self {
        self.rv.events = Arc::new(events);
        self
    }

    pub fn config(&self) -> &OfficeConfig {
        &self.config
    }

    /// The waiting room this office will use, for observing a run in progress
    pub fn room(&self) -> Arc<WaitingRoom> {
        Arc::clone(&self.rv.room)
    }

    /// The handoff signals this office will use
    pub fn handoff(&self) -> Arc<HandoffChannel> {
        Arc::clone(&self.rv.handoff)
    }

    /// Run until every student has left and the TA has gone home
    pub async fn run(self) -> Result<OfficeReport, OfficeError> {
        let Office { config, rv } = self;
        info!(
            students = config.students,
            chairs = config.chairs,
            mode = %config.service_mode,
            "office hours starting"
        );

        let ta = tokio::spawn(
            TeachingAssistant::new()
                .run(rv.clone())
                .instrument(info_span!("ta")),
        );

        let students: Vec<(StudentId, JoinHandle<Result<StudentOutcome, OfficeError>>)> = (1
            ..=config.students)
            .map(|n| {
                let student = Student::new(n).with_patience(config.patience);
                let id = student.id();
                let handle = tokio::spawn(
                    student
                        .run(rv.clone())
                        .instrument(info_span!("student", id = n)),
                );
                (id, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(students.len());
        let mut pending = students.into_iter();
        while let Some((id, handle)) = pending.next() {
            match join(handle, || format!("student {}", id)).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    warn!(student = id.0, error = %e, "student task failed, abandoning session");
                    for (_, rest) in pending {
                        rest.abort();
                    }
                    ta.abort();
                    return Err(e);
                }
            }
        }

        info!("all students gone, closing the office");
        rv.close();
        let summary = join(ta, || "ta".to_string()).await?;

        Ok(report(&config, &rv, &outcomes, summary))
    }
}

async fn join<T>(
    handle: JoinHandle<Result<T, OfficeError>>,
    task: impl FnOnce() -> String,
) -> Result<T, OfficeError> {
    handle
        .await
        .map_err(|source| OfficeError::Join {
            task: task(),
            source,
        })?
}

fn report(
    config: &OfficeConfig,
    rv: &Rendezvous,
    outcomes: &[StudentOutcome],
    summary: ServerSummary,
) -> OfficeReport {
    let room = rv.room.snapshot();
    let unserved: Vec<StudentId> = outcomes
        .iter()
        .filter(|o| !o.is_served())
        .map(|o| o.student())
        .collect();
    let gave_up = u32::try_from(unserved.len()).unwrap_or(u32::MAX);

    OfficeReport {
        students: config.students,
        chairs: config.chairs,
        service_mode: config.service_mode,
        served: config.students.saturating_sub(gave_up),
        gave_up,
        denials: room.denials,
        summoned: summary.summoned,
        peak_occupied: room.peak_occupied,
        peak_in_service: room.peak_in_service,
        unserved,
    }
}

#[cfg(test)]
#[path = "office_tests.rs"]
mod tests;
