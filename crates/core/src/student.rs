// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Student protocol
//!
//! Each student runs in its own task:
//!
//! ```text
//! Idle -> Arriving -> Waiting -> Serving -> Done
//!           |  no chair
//!           v
//!          Idle (retry after another delay)
//! ```
//!
//! With a patience limit a student that keeps finding the hallway full ends
//! in `GaveUp` instead.

use crate::error::OfficeError;
use crate::event::{Event, StudentId};
use crate::office::Rendezvous;
use crate::pacer::Pause;
use crate::room::Seating;
use tracing::{debug, warn};

/// Where a student is in the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentState {
    Idle,
    Arriving,
    /// Seated in the hallway, waiting to be called
    Waiting,
    Serving,
    Done,
    GaveUp,
}

impl StudentState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StudentState::Done | StudentState::GaveUp)
    }
}

/// How a student's visit ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentOutcome {
    Served { student: StudentId, attempts: u32 },
    GaveUp { student: StudentId, attempts: u32 },
}

impl StudentOutcome {
    pub fn student(&self) -> StudentId {
        match self {
            StudentOutcome::Served { student, .. } | StudentOutcome::GaveUp { student, .. } => {
                *student
            }
        }
    }

    pub fn is_served(&self) -> bool {
        matches!(self, StudentOutcome::Served { .. })
    }
}

/// One student looking for help
#[derive(Debug)]
pub struct Student {
    id: StudentId,
    patience: Option<u32>,
    state: StudentState,
    served: bool,
    attempts: u32,
}

impl Student {
    pub fn new(id: u32) -> Self {
        Self {
            id: StudentId(id),
            patience: None,
            state: StudentState::Idle,
            served: false,
            attempts: 0,
        }
    }

    /// Give up after this many arrival attempts without a chair
    pub fn with_patience(mut self, patience: Option<u32>) -> Self {
        self.patience = patience;
        self
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn state(&self) -> StudentState {
        self.state
    }

    pub fn is_served(&self) -> bool {
        self.served
    }

    fn enter(&mut self, state: StudentState) {
        debug!(student = self.id.0, from = ?self.state, to = ?state, "student transition");
        self.state = state;
    }

    fn out_of_patience(&self) -> bool {
        self.patience.is_some_and(|limit| self.attempts >= limit)
    }

    /// Run the protocol until this student has been helped (or gives up)
    pub async fn run(mut self, rv: Rendezvous) -> Result<StudentOutcome, OfficeError> {
        while !self.served {
            if self.out_of_patience() {
                warn!(student = self.id.0, attempts = self.attempts, "student gave up");
                self.enter(StudentState::GaveUp);
                rv.events.emit(Event::StudentGaveUp {
                    student: self.id,
                    attempts: self.attempts,
                });
                return Ok(StudentOutcome::GaveUp {
                    student: self.id,
                    attempts: self.attempts,
                });
            }

            rv.pacer.pause(Pause::Arrival(self.id)).await;
            self.attempts += 1;
            self.enter(StudentState::Arriving);
            rv.events.emit(Event::StudentArrived { student: self.id });

            match rv.room.take_seat() {
                Seating::Seated { waiting } => {
                    rv.events.emit(Event::StudentSeated {
                        student: self.id,
                        waiting,
                    });
                    rv.handoff.post_arrival();
                }
                Seating::NoChair => {
                    rv.events.emit(Event::StudentDenied {
                        student: self.id,
                        attempt: self.attempts,
                    });
                    self.enter(StudentState::Idle);
                    continue;
                }
            }

            self.enter(StudentState::Waiting);
            rv.handoff.wait_summons().await?;

            self.enter(StudentState::Serving);
            rv.room.begin_service();
            rv.events.emit(Event::StudentSummoned { student: self.id });
            rv.pacer.pause(Pause::Service(self.id)).await;
            rv.room.end_service();
            rv.events.emit(Event::ServiceFinished { student: self.id });

            assert!(!self.served, "student {} served twice", self.id);
            self.served = true;
            rv.handoff.acknowledge_service();
        }

        self.enter(StudentState::Done);
        rv.events.emit(Event::StudentDeparted { student: self.id });
        Ok(StudentOutcome::Served {
            student: self.id,
            attempts: self.attempts,
        })
    }
}

#[cfg(test)]
#[path = "student_tests.rs"]
mod tests;
