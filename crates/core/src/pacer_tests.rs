// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn test_delays() -> DelayConfig {
    DelayConfig {
        arrival: DelayRange::new(Duration::from_millis(10), Duration::from_millis(50)),
        service: DelayRange::fixed(Duration::from_millis(7)),
        ta_ready: DelayRange::ZERO,
    }
}

#[test]
fn random_delays_stay_in_range() {
    let pacer = RandomPacer::new(test_delays());
    for _ in 0..200 {
        let delay = pacer.delay_for(Pause::Arrival(StudentId(1)));
        assert!(delay >= Duration::from_millis(10));
        assert!(delay <= Duration::from_millis(50));
    }
}

#[test]
fn sub_millisecond_ranges_are_respected() {
    let range = DelayRange::new(Duration::from_micros(1500), Duration::from_micros(1900));
    let pacer = RandomPacer::seeded(
        DelayConfig {
            arrival: range,
            service: range,
            ta_ready: range,
        },
        3,
    );
    for _ in 0..200 {
        let delay = pacer.delay_for(Pause::TaReady);
        assert!(
            delay >= range.min && delay <= range.max,
            "drew {:?} outside {:?}..={:?}",
            delay,
            range.min,
            range.max
        );
    }
}

#[test]
fn fixed_range_returns_exact_delay() {
    let pacer = RandomPacer::new(test_delays());
    assert_eq!(
        pacer.delay_for(Pause::Service(StudentId(2))),
        Duration::from_millis(7)
    );
    assert_eq!(pacer.delay_for(Pause::TaReady), Duration::ZERO);
}

#[test]
fn same_seed_gives_same_delays() {
    let a = RandomPacer::seeded(test_delays(), 7);
    let b = RandomPacer::seeded(test_delays(), 7);
    let draws_a: Vec<_> = (0..20)
        .map(|_| a.delay_for(Pause::Arrival(StudentId(1))))
        .collect();
    let draws_b: Vec<_> = (0..20)
        .map(|_| b.delay_for(Pause::Arrival(StudentId(1))))
        .collect();
    assert_eq!(draws_a, draws_b);
}

#[tokio::test(start_paused = true)]
async fn random_pacer_sleeps_for_drawn_delay() {
    let pacer = RandomPacer::new(test_delays());
    let start = tokio::time::Instant::now();
    pacer.pause(Pause::Service(StudentId(1))).await;
    assert!(start.elapsed() >= Duration::from_millis(7));
}

#[tokio::test]
async fn no_delay_returns_immediately() {
    NoDelay.pause(Pause::TaReady).await;
}

#[tokio::test]
async fn fake_pacer_records_pauses() {
    let pacer = FakePacer::new();
    pacer.pause(Pause::Arrival(StudentId(1))).await;
    pacer.pause(Pause::Arrival(StudentId(1))).await;
    pacer.pause(Pause::Service(StudentId(1))).await;
    pacer.pause(Pause::TaReady).await;

    assert_eq!(pacer.pauses().len(), 4);
    assert_eq!(pacer.arrival_attempts(StudentId(1)), 2);
    assert_eq!(pacer.arrival_attempts(StudentId(2)), 0);
}

#[tokio::test(start_paused = true)]
async fn fake_pacer_sleeps_for_service_time() {
    let pacer = FakePacer::new().with_service_time(Duration::from_secs(2));
    let start = tokio::time::Instant::now();
    pacer.pause(Pause::Service(StudentId(1))).await;
    assert!(start.elapsed() >= Duration::from_secs(2));
}
