// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Disposable, NonDisposable, RivuletError, Stream, StreamItem};
use rivulet_stream::prelude::*;
use rivulet_test_utils::{ProbeSource, Recorder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn failing_stream(attempts: &Arc<AtomicUsize>) -> Stream<StreamItem<i32>> {
    let attempts = Arc::clone(attempts);
    Stream::new(move |observer| {
        let attempt = attempts.fetch_add(1, Ordering::SeqCst);
        observer.next(attempt as i32);
        observer.failed(RivuletError::stream_error(format!("attempt {attempt}")));
        NonDisposable::arc()
    })
}

#[test]
fn test_retry_resubscribes_until_attempts_exhausted() -> anyhow::Result<()> {
    // Arrange
    let attempts = Arc::new(AtomicUsize::new(0));
    let stream = failing_stream(&attempts).retry(2);

    // Act
    let recorder = Recorder::subscribe(&stream);

    // Assert
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert_eq!(recorder.elements(), vec![0, 1, 2]);
    assert!(recorder.is_failed());
    assert_eq!(recorder.terminations(), 1);

    Ok(())
}

#[test]
fn test_retry_zero_forwards_first_failure() -> anyhow::Result<()> {
    // Arrange
    let attempts = Arc::new(AtomicUsize::new(0));

    // Act
    let recorder = Recorder::subscribe(&failing_stream(&attempts).retry(0));

    // Assert
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(recorder.is_failed());

    Ok(())
}

#[test]
fn test_retry_disposes_failed_attempt_before_next() -> anyhow::Result<()> {
    // Arrange
    let probe = ProbeSource::<StreamItem<i32>>::new();
    let recorder = Recorder::subscribe(&probe.stream().retry(1));

    // Act
    probe.next(1);
    probe.fail(RivuletError::stream_error("first"));
    let live_after_retry = probe.live();
    probe.next(2);
    probe.complete();

    // Assert
    assert_eq!(probe.subscriptions(), 2);
    assert_eq!(live_after_retry, 1);
    assert_eq!(recorder.elements(), vec![1, 2]);
    assert!(recorder.is_completed());

    Ok(())
}

#[test]
fn test_retry_stops_when_disposed() -> anyhow::Result<()> {
    // Arrange
    let probe = ProbeSource::<StreamItem<i32>>::new();
    let (recorder, subscription) = Recorder::subscribe_with_handle(&probe.stream().retry(5));

    // Act
    subscription.dispose();
    let reached = probe.fail(RivuletError::stream_error("late"));

    // Assert
    assert_eq!(reached, 0);
    assert_eq!(probe.subscriptions(), 1);
    assert!(recorder.is_empty());

    Ok(())
}

#[test]
fn test_on_error_consumes_failure_as_completion() -> anyhow::Result<()> {
    // Arrange
    let probe = ProbeSource::<StreamItem<i32>>::new();
    let recorder = Recorder::subscribe(
        &probe
            .stream()
            .on_error(|error| error.to_string().contains("recoverable")),
    );

    // Act
    probe.next(1);
    probe.fail(RivuletError::stream_error("recoverable glitch"));

    // Assert
    assert_eq!(recorder.elements(), vec![1]);
    assert!(recorder.is_completed());

    Ok(())
}

#[test]
fn test_on_error_propagates_when_handler_declines() -> anyhow::Result<()> {
    // Arrange
    let stream = Stream::<StreamItem<i32>>::failed(RivuletError::stream_error("fatal"))
        .on_error(|error| error.to_string().contains("recoverable"));

    // Act
    let recorder = Recorder::subscribe(&stream);

    // Assert
    assert!(recorder.is_failed());
    assert!(recorder
        .failure()
        .is_some_and(|error| error.to_string().contains("fatal")));

    Ok(())
}
