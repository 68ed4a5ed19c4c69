// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Disposable, RivuletError, Signal, StreamItem};
use rivulet_runtime::VirtualTimeQueue;
use rivulet_stream_time::prelude::*;
use rivulet_test_utils::test_data::{animal_cat, animal_dog, person_alice, person_bob, TestData};
use rivulet_test_utils::{test_source, Recorder};
use std::time::Duration;

#[test]
fn test_sample_emits_latest_per_period() -> anyhow::Result<()> {
    // Arrange
    let queue = VirtualTimeQueue::new();
    let (tx, stream) = test_source::<Signal<TestData>>();
    let recorder = Recorder::subscribe(&stream.sample(Duration::from_millis(100), queue.clone()));

    // Act
    tx.next(person_alice())?;
    tx.next(person_bob())?;
    queue.advance_by(Duration::from_millis(100));
    tx.next(animal_dog())?;
    queue.advance_by(Duration::from_millis(50));
    tx.next(animal_cat())?;
    queue.advance_by(Duration::from_millis(50));

    // Assert
    assert_eq!(recorder.elements(), vec![person_bob(), animal_cat()]);

    Ok(())
}

#[test]
fn test_sample_skips_periods_without_new_element() -> anyhow::Result<()> {
    // Arrange
    let queue = VirtualTimeQueue::new();
    let (tx, stream) = test_source::<Signal<i32>>();
    let recorder = Recorder::subscribe(&stream.sample(Duration::from_millis(10), queue.clone()));

    // Act
    tx.next(1)?;
    queue.advance_by(Duration::from_millis(50));

    // Assert
    assert_eq!(recorder.elements(), vec![1]);

    Ok(())
}

#[test]
fn test_sample_forwards_completion_immediately_and_stops() -> anyhow::Result<()> {
    // Arrange
    let queue = VirtualTimeQueue::new();
    let (tx, stream) = test_source::<Signal<i32>>();
    let recorder = Recorder::subscribe(&stream.sample(Duration::from_millis(100), queue.clone()));

    // Act
    tx.next(1)?;
    tx.complete()?;

    // Assert
    assert!(recorder.is_completed());
    assert!(recorder.elements().is_empty());
    assert_eq!(queue.pending(), 0);

    Ok(())
}

#[test]
fn test_sample_forwards_failure_immediately() -> anyhow::Result<()> {
    // Arrange
    let queue = VirtualTimeQueue::new();
    let (tx, stream) = test_source::<StreamItem<i32>>();
    let recorder = Recorder::subscribe(&stream.sample(Duration::from_millis(100), queue.clone()));

    // Act
    tx.next(1)?;
    queue.advance_by(Duration::from_millis(100));
    tx.fail(RivuletError::stream_error("sensor offline"))?;

    // Assert
    assert_eq!(recorder.elements(), vec![1]);
    assert!(recorder.is_failed());
    assert_eq!(queue.pending(), 0);

    Ok(())
}

#[test]
fn test_sample_dispose_stops_ticker() -> anyhow::Result<()> {
    // Arrange
    let queue = VirtualTimeQueue::new();
    let (tx, stream) = test_source::<Signal<i32>>();
    let (recorder, subscription) =
        Recorder::subscribe_with_handle(&stream.sample(Duration::from_millis(10), queue.clone()));
    tx.next(1)?;

    // Act
    subscription.dispose();
    queue.advance_by(Duration::from_millis(100));

    // Assert
    assert!(recorder.is_empty());
    assert_eq!(queue.pending(), 0);

    Ok(())
}
