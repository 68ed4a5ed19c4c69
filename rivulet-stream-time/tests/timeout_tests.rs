// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{RivuletError, StreamItem};
use rivulet_runtime::VirtualTimeQueue;
use rivulet_stream_time::prelude::*;
use rivulet_test_utils::test_data::{person_alice, person_bob, TestData};
use rivulet_test_utils::{test_source, ProbeSource, Recorder};
use std::time::Duration;

#[test]
fn test_timeout_fails_silent_stream() -> anyhow::Result<()> {
    // Arrange
    let queue = VirtualTimeQueue::new();
    let probe = ProbeSource::<StreamItem<TestData>>::new();
    let guarded = probe.stream().timeout(
        Duration::from_millis(100),
        queue.clone(),
        RivuletError::stream_error("no data"),
    );
    let recorder = Recorder::subscribe(&guarded);

    // Act
    queue.advance_by(Duration::from_millis(100));

    // Assert
    assert!(recorder.is_failed());
    assert!(matches!(
        recorder.failure(),
        Some(RivuletError::StreamProcessingError { .. })
    ));
    assert_eq!(probe.disposals(), 1);

    Ok(())
}

#[test]
fn test_timeout_restarts_after_each_element() -> anyhow::Result<()> {
    // Arrange
    let queue = VirtualTimeQueue::new();
    let (tx, stream) = test_source::<StreamItem<TestData>>();
    let guarded = stream.timeout(
        Duration::from_millis(100),
        queue.clone(),
        RivuletError::stream_error("stalled"),
    );
    let recorder = Recorder::subscribe(&guarded);

    // Act
    queue.advance_by(Duration::from_millis(90));
    tx.next(person_alice())?;
    queue.advance_by(Duration::from_millis(90));
    tx.next(person_bob())?;
    queue.advance_by(Duration::from_millis(90));

    // Assert
    assert_eq!(recorder.elements(), vec![person_alice(), person_bob()]);
    assert!(!recorder.is_terminated());

    Ok(())
}

#[test]
fn test_timeout_completion_cancels_timer() -> anyhow::Result<()> {
    // Arrange
    let queue = VirtualTimeQueue::new();
    let (tx, stream) = test_source::<StreamItem<i32>>();
    let guarded = stream.timeout(
        Duration::from_millis(100),
        queue.clone(),
        RivuletError::stream_error("stalled"),
    );
    let recorder = Recorder::subscribe(&guarded);

    // Act
    tx.next(1)?;
    tx.complete()?;
    queue.advance_by(Duration::from_millis(500));

    // Assert
    assert_eq!(recorder.events(), vec![StreamItem::Value(1), StreamItem::Completed]);
    assert_eq!(queue.pending(), 0);

    Ok(())
}
