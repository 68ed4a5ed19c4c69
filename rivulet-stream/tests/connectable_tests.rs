// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Disposable, Signal, Stream};
use rivulet_stream::prelude::*;
use rivulet_test_utils::test_data::{person_alice, person_bob, person_charlie, TestData};
use rivulet_test_utils::{test_source, ProbeSource, Recorder};

#[test]
fn test_publish_multicasts_one_production() -> anyhow::Result<()> {
    // Arrange
    let probe = ProbeSource::<Signal<TestData>>::new();
    let connectable = probe.stream().publish();
    let first = Recorder::new();
    let second = Recorder::new();
    connectable.observe(first.observer());
    connectable.observe(second.observer());

    // Act
    connectable.connect();
    probe.next(person_alice());

    // Assert
    assert_eq!(probe.subscriptions(), 1);
    assert_eq!(first.elements(), vec![person_alice()]);
    assert_eq!(second.elements(), vec![person_alice()]);

    Ok(())
}

#[test]
fn test_publish_does_not_replay_to_late_observers() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_source::<Signal<i32>>();
    let connectable = stream.publish();
    connectable.connect();
    tx.next(1)?;

    // Act
    let late = Recorder::new();
    connectable.observe(late.observer());
    tx.next(2)?;

    // Assert
    assert_eq!(late.elements(), vec![2]);

    Ok(())
}

#[test]
fn test_connect_is_idempotent() -> anyhow::Result<()> {
    // Arrange
    let probe = ProbeSource::<Signal<i32>>::new();
    let connectable = probe.stream().publish();

    // Act
    let first = connectable.connect();
    let second = connectable.connect();

    // Assert
    assert_eq!(probe.subscriptions(), 1);
    first.dispose();
    assert!(second.is_disposed());
    assert_eq!(probe.disposals(), 1);

    Ok(())
}

#[test]
fn test_connect_after_disposal_reconnects() -> anyhow::Result<()> {
    // Arrange
    let probe = ProbeSource::<Signal<i32>>::new();
    let connectable = probe.stream().publish();
    connectable.connect().dispose();

    // Act
    connectable.connect();

    // Assert
    assert_eq!(probe.subscriptions(), 2);
    assert_eq!(probe.live(), 1);

    Ok(())
}

#[test]
fn test_replay_one_delivers_buffered_element_first() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_source::<Signal<TestData>>();
    let connectable = stream.replay(1);
    connectable.connect();
    tx.next(person_alice())?;
    tx.next(person_bob())?;

    // Act
    let late = Recorder::new();
    connectable.observe(late.observer());
    tx.next(person_charlie())?;

    // Assert
    assert_eq!(late.elements(), vec![person_bob(), person_charlie()]);

    Ok(())
}

#[test]
fn test_replay_keeps_bounded_history() -> anyhow::Result<()> {
    // Arrange
    let connectable = Stream::<Signal<i32>>::sequence(1..=5).replay(3);
    connectable.connect();

    // Act
    let late = Recorder::new();
    connectable.observe(late.observer());

    // Assert
    assert_eq!(
        late.events(),
        vec![
            Signal::Next(3),
            Signal::Next(4),
            Signal::Next(5),
            Signal::Completed
        ]
    );

    Ok(())
}

#[test]
fn test_ref_count_connects_once_and_disconnects_at_zero() -> anyhow::Result<()> {
    // Arrange
    let probe = ProbeSource::<Signal<i32>>::new();
    let shared = probe.stream().publish().ref_count();

    // Act
    let (first, first_handle) = Recorder::subscribe_with_handle(&shared);
    let (second, second_handle) = Recorder::subscribe_with_handle(&shared);
    probe.next(1);
    first_handle.dispose();
    let disposals_with_one_left = probe.disposals();
    probe.next(2);
    second_handle.dispose();

    // Assert
    assert_eq!(probe.subscriptions(), 1);
    assert_eq!(disposals_with_one_left, 0);
    assert_eq!(probe.disposals(), 1);
    assert_eq!(first.elements(), vec![1]);
    assert_eq!(second.elements(), vec![1, 2]);

    Ok(())
}

#[test]
fn test_ref_count_reconnects_after_dropping_to_zero() -> anyhow::Result<()> {
    // Arrange
    let probe = ProbeSource::<Signal<i32>>::new();
    let shared = probe.stream().share();
    let (_first, handle) = Recorder::subscribe_with_handle(&shared);
    handle.dispose();

    // Act
    let (second, _handle) = Recorder::subscribe_with_handle(&shared);
    probe.next(7);

    // Assert
    assert_eq!(probe.subscriptions(), 2);
    assert_eq!(second.elements(), vec![7]);

    Ok(())
}

#[test]
fn test_to_stream_registers_on_subject() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_source::<Signal<i32>>();
    let connectable = stream.publish();
    let recorder = Recorder::subscribe(&connectable.to_stream());

    // Act
    connectable.connect();
    tx.next(5)?;

    // Assert
    assert_eq!(recorder.elements(), vec![5]);

    Ok(())
}
