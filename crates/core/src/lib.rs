// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! oh-core: the office-hours rendezvous
//!
//! One TA, a hallway with a fixed number of chairs, and many students who
//! each need help exactly once. This crate provides:
//! - The waiting room state and its single lock
//! - The arrival / summons / completion handoff signals
//! - The TA and student protocols
//! - A coordinator that runs a whole session and shuts it down cleanly

pub mod config;
pub mod error;
pub mod event;
pub mod handoff;
pub mod office;
pub mod pacer;
pub mod room;
pub mod server;
pub mod student;

pub use config::{DelayConfig, DelayRange, OfficeConfig};
pub use error::{ConfigError, OfficeError};
pub use event::{Event, EventSink, RecordingSink, StudentId, TracingSink};
pub use handoff::{HandoffChannel, ServiceMode};
pub use office::{Office, OfficeReport, Rendezvous};
pub use pacer::{FakePacer, NoDelay, Pacer, Pause, RandomPacer};
pub use room::{Admission, RoomSnapshot, Seating, WaitingRoom};
pub use server::{ServerState, ServerSummary, TeachingAssistant};
pub use student::{Student, StudentOutcome, StudentState};
