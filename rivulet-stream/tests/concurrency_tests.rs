// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Disposable, Signal, Stream};
use rivulet_stream::prelude::*;
use rivulet_test_utils::{ProbeSource, Recorder};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const ROUNDS: usize = 20;
const PER_SIDE: u32 = 200;

/// Starts one thread per source; each waits on a shared barrier, emits
/// `0..PER_SIDE` and completes.
fn race(sources: Vec<ProbeSource<Signal<u32>>>) -> Vec<JoinHandle<()>> {
    let barrier = Arc::new(Barrier::new(sources.len()));
    sources
        .into_iter()
        .map(|source| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for value in 0..PER_SIDE {
                    source.next(value);
                }
                source.complete();
            })
        })
        .collect()
}

fn join_all(handles: Vec<JoinHandle<()>>) -> anyhow::Result<()> {
    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("producer thread panicked"))?;
    }
    Ok(())
}

#[test]
fn test_zip_pairs_every_element_in_order_across_threads() -> anyhow::Result<()> {
    for _ in 0..ROUNDS {
        // Arrange
        let left = ProbeSource::<Signal<u32>>::new();
        let right = ProbeSource::<Signal<u32>>::new();
        let recorder = Recorder::subscribe(&left.stream().zip(right.stream()));

        // Act
        join_all(race(vec![left, right]))?;

        // Assert
        let expected: Vec<_> = (0..PER_SIDE).map(|value| (value, value)).collect();
        assert_eq!(recorder.elements(), expected);
        assert!(recorder.is_completed());
        assert_eq!(recorder.terminations(), 1);
    }

    Ok(())
}

#[test]
fn test_combine_latest_terminates_once_across_threads() -> anyhow::Result<()> {
    for _ in 0..ROUNDS {
        // Arrange
        let left = ProbeSource::<Signal<u32>>::new();
        let right = ProbeSource::<Signal<u32>>::new();
        let combined = left
            .stream()
            .combine_latest(right.stream(), |left, right| (*left, *right));
        let recorder = Recorder::subscribe(&combined);

        // Act
        join_all(race(vec![left, right]))?;

        // Assert
        let elements = recorder.elements();
        assert_eq!(recorder.terminations(), 1);
        assert!(recorder.is_completed());
        assert_eq!(elements.last(), Some(&(PER_SIDE - 1, PER_SIDE - 1)));
        // Each side's value only moves forward.
        assert!(elements
            .windows(2)
            .all(|pair| pair[0].0 <= pair[1].0 && pair[0].1 <= pair[1].1));
    }

    Ok(())
}

#[test]
fn test_merge_with_keeps_each_source_in_order_across_threads() -> anyhow::Result<()> {
    for _ in 0..ROUNDS {
        // Arrange
        let left = ProbeSource::<Signal<u32>>::new();
        let right = ProbeSource::<Signal<u32>>::new();
        let tagged_left = left.stream().map(|value| value * 2);
        let tagged_right = right.stream().map(|value| value * 2 + 1);
        let recorder = Recorder::subscribe(&tagged_left.merge_with(tagged_right));

        // Act
        join_all(race(vec![left, right]))?;

        // Assert
        let elements = recorder.elements();
        let evens: Vec<_> = elements.iter().filter(|v| *v % 2 == 0).map(|v| v / 2).collect();
        let odds: Vec<_> = elements.iter().filter(|v| *v % 2 == 1).map(|v| v / 2).collect();
        assert_eq!(evens, (0..PER_SIDE).collect::<Vec<_>>());
        assert_eq!(odds, (0..PER_SIDE).collect::<Vec<_>>());
        assert_eq!(recorder.terminations(), 1);
        assert!(recorder.is_completed());
    }

    Ok(())
}

#[test]
fn test_merge_inner_counts_every_element_across_threads() -> anyhow::Result<()> {
    for _ in 0..ROUNDS {
        // Arrange
        let first = ProbeSource::<Signal<u32>>::new();
        let second = ProbeSource::<Signal<u32>>::new();
        let streams = Stream::<Signal<Stream<Signal<u32>>>>::sequence(vec![
            first.stream(),
            second.stream(),
        ]);
        let recorder = Recorder::subscribe(&streams.merge_inner());

        // Act
        join_all(race(vec![first, second]))?;

        // Assert
        assert_eq!(recorder.elements().len(), 2 * PER_SIDE as usize);
        assert_eq!(recorder.terminations(), 1);
        assert!(recorder.is_completed());
    }

    Ok(())
}

#[test]
fn test_dispose_racing_delivery_stops_the_flow() -> anyhow::Result<()> {
    // Arrange
    let source = ProbeSource::<Signal<u32>>::new();
    let (recorder, subscription) = Recorder::subscribe_with_handle(&source.stream());
    let stop = Arc::new(AtomicBool::new(false));
    let producer = {
        let source = source.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut value = 0;
            while !stop.load(Ordering::SeqCst) {
                source.next(value);
                value += 1;
            }
        })
    };
    while recorder.len() < 100 {
        thread::yield_now();
    }

    // Act
    subscription.dispose();
    let at_dispose = recorder.len();
    thread::sleep(Duration::from_millis(20));
    stop.store(true, Ordering::SeqCst);
    producer
        .join()
        .map_err(|_| anyhow::anyhow!("producer thread panicked"))?;

    // Assert
    let delivered = recorder.len();
    // Only an event already past the disposal check may still land.
    assert!(delivered <= at_dispose + 1, "{delivered} > {at_dispose} + 1");
    assert_eq!(recorder.elements(), (0..delivered as u32).collect::<Vec<_>>());
    assert!(!recorder.is_terminated());
    assert_eq!(source.live(), 0);
    assert_eq!(source.disposals(), 1);

    Ok(())
}
