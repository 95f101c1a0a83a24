// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status events emitted by the TA and the students
//!
//! Events are for observability only. Which events appear in a run is
//! testable; their wording is not part of the protocol.

use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Identifier of one student, assigned 1..=N at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StudentId(pub u32);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something observable happened in the office
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    StudentArrived { student: StudentId },
    StudentSeated { student: StudentId, waiting: u32 },
    StudentDenied { student: StudentId, attempt: u32 },
    StudentGaveUp { student: StudentId, attempts: u32 },
    TaSummoned { waiting: u32 },
    StudentSummoned { student: StudentId },
    ServiceFinished { student: StudentId },
    StudentDeparted { student: StudentId },
    TaDone,
}

impl Event {
    /// Stable event name, e.g. `student:seated`
    pub fn name(&self) -> &'static str {
        match self {
            Event::StudentArrived { .. } => "student:arrived",
            Event::StudentSeated { .. } => "student:seated",
            Event::StudentDenied { .. } => "student:denied",
            Event::StudentGaveUp { .. } => "student:gave_up",
            Event::TaSummoned { .. } => "ta:summoned",
            Event::StudentSummoned { .. } => "student:summoned",
            Event::ServiceFinished { .. } => "service:finished",
            Event::StudentDeparted { .. } => "student:departed",
            Event::TaDone => "ta:done",
        }
    }

    /// The student this event concerns, if any
    pub fn student(&self) -> Option<StudentId> {
        match self {
            Event::StudentArrived { student }
            | Event::StudentSeated { student, .. }
            | Event::StudentDenied { student, .. }
            | Event::StudentGaveUp { student, .. }
            | Event::StudentSummoned { student }
            | Event::ServiceFinished { student }
            | Event::StudentDeparted { student } => Some(*student),
            Event::TaSummoned { .. } | Event::TaDone => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::StudentArrived { student } => {
                write!(f, "Student {} arrives at the office", student)
            }
            Event::StudentSeated { student, waiting } => write!(
                f,
                "Student {} sits in the hallway. Waiting: {}",
                student, waiting
            ),
            Event::StudentDenied { student, .. } => write!(
                f,
                "No chair available. Student {} leaves and will come back later.",
                student
            ),
            Event::StudentGaveUp { student, attempts } => write!(
                f,
                "Student {} gives up after {} attempts without a chair.",
                student, attempts
            ),
            Event::TaSummoned { waiting } => write!(
                f,
                "TA calls a student. Waiting students left: {}",
                waiting
            ),
            Event::StudentSummoned { student } => {
                write!(f, "Student {} is getting help from TA.", student)
            }
            Event::ServiceFinished { student } => {
                write!(f, "TA finished helping student {}", student)
            }
            Event::StudentDeparted { student } => {
                write!(f, "Student {} leaves after getting help.", student)
            }
            Event::TaDone => write!(f, "TA is done for the day."),
        }
    }
}

/// Receives every event emitted during a run
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

/// Sink that logs each event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: Event) {
        tracing::info!(
            event = event.name(),
            student = event.student().map(|s| s.0),
            "{}",
            event
        );
    }
}

/// Sink that keeps every event in memory, in emission order
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Events concerning one student, in the order that student emitted them
    pub fn for_student(&self, student: StudentId) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.student() == Some(student))
            .collect()
    }

    /// Number of recorded events with the given name
    pub fn count(&self, name: &str) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|e| e.name() == name)
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
