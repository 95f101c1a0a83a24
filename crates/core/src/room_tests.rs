// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_room_is_empty() {
    let room = WaitingRoom::new(3);
    let snap = room.snapshot();
    assert_eq!(snap.capacity, 3);
    assert_eq!(snap.occupied, 0);
    assert_eq!(snap.pending_arrivals, 0);
    assert!(!snap.shutting_down);
}

#[test]
fn occupy_succeeds_until_full() {
    let room = WaitingRoom::new(2);
    assert!(room.try_occupy_seat());
    assert!(room.try_occupy_seat());
    assert!(!room.try_occupy_seat());
    assert_eq!(room.snapshot().occupied, 2);
}

#[test]
fn denied_occupy_keeps_occupancy_and_counts_denial() {
    let room = WaitingRoom::new(1);
    assert!(room.try_occupy_seat());
    let before = room.snapshot();
    assert!(!room.try_occupy_seat());
    let after = room.snapshot();
    assert_eq!(after.occupied, before.occupied);
    assert_eq!(after.pending_arrivals, before.pending_arrivals);
    assert_eq!(after.denials, before.denials + 1);
}

#[test]
fn zero_capacity_room_never_seats() {
    let room = WaitingRoom::new(0);
    assert_eq!(room.take_seat(), Seating::NoChair);
    assert_eq!(room.snapshot().occupied, 0);
}

#[test]
fn release_frees_a_chair() {
    let room = WaitingRoom::new(1);
    assert!(room.try_occupy_seat());
    room.release_one_seat();
    assert_eq!(room.snapshot().occupied, 0);
    assert!(room.try_occupy_seat());
}

#[test]
#[should_panic(expected = "empty waiting room")]
fn release_from_empty_room_is_fatal() {
    let room = WaitingRoom::new(3);
    room.release_one_seat();
}

#[test]
fn take_seat_records_arrival() {
    let room = WaitingRoom::new(3);
    assert_eq!(room.take_seat(), Seating::Seated { waiting: 1 });
    assert_eq!(room.take_seat(), Seating::Seated { waiting: 2 });
    let snap = room.snapshot();
    assert_eq!(snap.occupied, 2);
    assert_eq!(snap.pending_arrivals, 2);
}

#[test]
fn admit_next_releases_seat_and_arrival_together() {
    let room = WaitingRoom::new(3);
    room.take_seat();
    room.take_seat();

    assert_eq!(room.admit_next(), Admission::Admitted { waiting: 1 });
    let snap = room.snapshot();
    assert_eq!(snap.occupied, 1);
    assert_eq!(snap.pending_arrivals, 1);
    assert_eq!(snap.admissions, 1);
}

#[test]
fn admit_next_closes_once_shut_down_and_drained() {
    let room = WaitingRoom::new(3);
    room.mark_shutting_down();
    assert!(room.is_shutting_down_and_empty());
    assert_eq!(room.admit_next(), Admission::Closed);
    assert_eq!(room.snapshot().admissions, 0);
}

#[test]
fn shutdown_with_pending_arrival_still_admits() {
    let room = WaitingRoom::new(3);
    room.take_seat();
    room.mark_shutting_down();
    assert!(!room.is_shutting_down_and_empty());
    assert_eq!(room.admit_next(), Admission::Admitted { waiting: 0 });
    assert_eq!(room.admit_next(), Admission::Closed);
}

#[test]
fn mark_shutting_down_is_idempotent() {
    let room = WaitingRoom::new(1);
    room.mark_shutting_down();
    room.mark_shutting_down();
    assert!(room.snapshot().shutting_down);
}

#[test]
#[should_panic(expected = "never recorded")]
fn admitting_without_arrival_is_fatal() {
    let room = WaitingRoom::new(1);
    // Seat taken without recording an arrival: the books no longer balance
    assert!(room.try_occupy_seat());
    room.admit_next();
}

#[test]
fn service_tracking_records_peak() {
    let room = WaitingRoom::new(1);
    room.begin_service();
    room.begin_service();
    room.end_service();
    room.begin_service();
    room.end_service();
    room.end_service();
    let snap = room.snapshot();
    assert_eq!(snap.in_service, 0);
    assert_eq!(snap.peak_in_service, 2);
}

#[test]
fn guard_exposes_combined_check() {
    let room = WaitingRoom::new(2);
    {
        let mut hallway = room.lock();
        assert!(hallway.try_occupy_seat());
        hallway.record_arrival();
        hallway.mark_shutting_down();
        assert!(!hallway.is_shutting_down_and_empty());
        hallway.release_one_seat();
        hallway.take_arrival();
        assert!(hallway.is_shutting_down_and_empty());
    }
    assert_eq!(room.capacity(), 2);
}

// =============================================================================
// Property Tests
// =============================================================================

use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Arrive,
    Admit,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![Just(Step::Arrive), Just(Step::Admit)]
}

proptest! {
    #[test]
    fn occupancy_never_exceeds_capacity(
        capacity in 0u32..6,
        steps in proptest::collection::vec(arb_step(), 0..64),
    ) {
        let room = WaitingRoom::new(capacity);
        let mut seated = 0u32;

        for step in steps {
            match step {
                Step::Arrive => {
                    if let Seating::Seated { .. } = room.take_seat() {
                        seated += 1;
                    }
                }
                Step::Admit if seated > 0 => {
                    let admitted = matches!(room.admit_next(), Admission::Admitted { .. });
                    prop_assert!(admitted, "a seated student was not admitted");
                    seated -= 1;
                }
                Step::Admit => {}
            }

            let snap = room.snapshot();
            prop_assert!(snap.occupied <= snap.capacity);
            prop_assert_eq!(snap.occupied, seated);
            prop_assert_eq!(snap.pending_arrivals, seated);
        }

        prop_assert!(room.snapshot().peak_occupied <= capacity);
    }
}
