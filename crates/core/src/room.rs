// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waiting room state
//!
//! The hallway chairs, the pending-arrival count and the shutdown flag live
//! behind one mutex. Every decision that reads more than one of them (seating
//! a student, admitting one, deciding to shut down) happens inside a single
//! critical section so no arrival can slip in between the checks.

use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

/// Lock-protected waiting room counters
#[derive(Debug)]
pub struct Hallway {
    capacity: u32,
    occupied: u32,
    arrivals: u32,
    shutting_down: bool,
    in_service: u32,
    peak_occupied: u32,
    peak_in_service: u32,
    denials: u64,
    admissions: u64,
}

impl Hallway {
    fn new(capacity: u32) -> Self {
        Self {
            capacity,
            occupied: 0,
            arrivals: 0,
            shutting_down: false,
            in_service: 0,
            peak_occupied: 0,
            peak_in_service: 0,
            denials: 0,
            admissions: 0,
        }
    }

    /// Take a chair if one is free. Otherwise returns false, leaving occupancy
    /// unchanged and counting the denial.
    pub fn try_occupy_seat(&mut self) -> bool {
        if self.occupied >= self.capacity {
            self.denials += 1;
            return false;
        }
        self.occupied += 1;
        assert!(
            self.occupied <= self.capacity,
            "waiting room over capacity: {} > {}",
            self.occupied,
            self.capacity
        );
        self.peak_occupied = self.peak_occupied.max(self.occupied);
        true
    }

    /// Free exactly one chair. Must pair with an earlier successful
    /// [`Hallway::try_occupy_seat`].
    pub fn release_one_seat(&mut self) {
        assert!(self.occupied > 0, "released a seat from an empty waiting room");
        self.occupied -= 1;
    }

    /// Record a seated student as waiting to be called
    pub fn record_arrival(&mut self) {
        self.arrivals += 1;
    }

    /// Remove one student from the pending-arrival count
    pub fn take_arrival(&mut self) {
        assert!(self.arrivals > 0, "took an arrival that was never recorded");
        self.arrivals -= 1;
    }

    pub fn mark_shutting_down(&mut self) {
        self.shutting_down = true;
    }

    /// True once shutdown is flagged and nobody is left waiting to be called
    pub fn is_shutting_down_and_empty(&self) -> bool {
        self.shutting_down && self.arrivals == 0
    }

    fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            capacity: self.capacity,
            occupied: self.occupied,
            pending_arrivals: self.arrivals,
            shutting_down: self.shutting_down,
            in_service: self.in_service,
            peak_occupied: self.peak_occupied,
            peak_in_service: self.peak_in_service,
            denials: self.denials,
            admissions: self.admissions,
        }
    }
}

/// Point-in-time copy of the waiting room counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoomSnapshot {
    pub capacity: u32,
    pub occupied: u32,
    pub pending_arrivals: u32,
    pub shutting_down: bool,
    pub in_service: u32,
    pub peak_occupied: u32,
    pub peak_in_service: u32,
    pub denials: u64,
    pub admissions: u64,
}

/// Result of a student trying to sit down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seating {
    /// Seated; `waiting` counts everyone now waiting to be called
    Seated { waiting: u32 },
    /// Every chair was taken
    NoChair,
}

/// Result of the TA trying to pull a student out of the waiting room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// One student admitted; `waiting` is how many are still seated
    Admitted { waiting: u32 },
    /// Shutdown was flagged and the room is drained
    Closed,
}

/// The shared waiting room
#[derive(Debug)]
pub struct WaitingRoom {
    state: Mutex<Hallway>,
}

impl WaitingRoom {
    pub fn new(capacity: u32) -> Self {
        Self {
            state: Mutex::new(Hallway::new(capacity)),
        }
    }

    /// Acquire the room lock. Never hold the guard across an await.
    pub fn lock(&self) -> MutexGuard<'_, Hallway> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn capacity(&self) -> u32 {
        self.lock().capacity
    }

    pub fn try_occupy_seat(&self) -> bool {
        self.lock().try_occupy_seat()
    }

    pub fn release_one_seat(&self) {
        self.lock().release_one_seat();
    }

    pub fn mark_shutting_down(&self) {
        self.lock().mark_shutting_down();
    }

    pub fn is_shutting_down_and_empty(&self) -> bool {
        self.lock().is_shutting_down_and_empty()
    }

    /// Occupy a chair and join the pending-arrival count in one step
    pub fn take_seat(&self) -> Seating {
        let mut hallway = self.lock();
        if !hallway.try_occupy_seat() {
            return Seating::NoChair;
        }
        hallway.record_arrival();
        Seating::Seated {
            waiting: hallway.occupied,
        }
    }

    /// Either report the drained shutdown state or release one chair and
    /// consume one pending arrival, in one critical section
    pub fn admit_next(&self) -> Admission {
        let mut hallway = self.lock();
        if hallway.is_shutting_down_and_empty() {
            return Admission::Closed;
        }
        hallway.release_one_seat();
        hallway.take_arrival();
        hallway.admissions += 1;
        Admission::Admitted {
            waiting: hallway.occupied,
        }
    }

    /// A summoned student starts being helped
    pub fn begin_service(&self) {
        let mut hallway = self.lock();
        hallway.in_service += 1;
        hallway.peak_in_service = hallway.peak_in_service.max(hallway.in_service);
    }

    /// A student finished being helped
    pub fn end_service(&self) {
        let mut hallway = self.lock();
        assert!(hallway.in_service > 0, "ended a service that never began");
        hallway.in_service -= 1;
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        self.lock().snapshot()
    }
}

#[cfg(test)]
#[path = "room_tests.rs"]
mod tests;
