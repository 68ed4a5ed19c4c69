// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{RivuletError, Signal, Stream, StreamItem};
use rivulet_stream::prelude::*;
use rivulet_test_utils::{test_source, ProbeSource, Recorder};

type Streams<T> = Signal<Stream<Signal<T>>>;

#[test]
fn test_merge_inner_forwards_from_all_inner_streams() -> anyhow::Result<()> {
    // Arrange
    let (outer, streams) = test_source::<Streams<i32>>();
    let (first, first_stream) = test_source::<Signal<i32>>();
    let (second, second_stream) = test_source::<Signal<i32>>();
    let recorder = Recorder::subscribe(&streams.merge_inner());

    // Act
    outer.next(first_stream)?;
    outer.next(second_stream)?;
    first.next(1)?;
    second.next(2)?;
    first.next(3)?;

    // Assert
    assert_eq!(recorder.elements(), vec![1, 2, 3]);

    Ok(())
}

#[test]
fn test_merge_inner_completes_after_outer_and_all_inner() -> anyhow::Result<()> {
    // Arrange
    let (outer, streams) = test_source::<Streams<i32>>();
    let (first, first_stream) = test_source::<Signal<i32>>();
    let recorder = Recorder::subscribe(&streams.merge_inner());

    // Act
    outer.next(first_stream)?;
    outer.complete()?;
    let after_outer = recorder.is_terminated();
    first.next(1)?;
    first.complete()?;

    // Assert
    assert!(!after_outer);
    assert_eq!(recorder.events(), vec![Signal::Next(1), Signal::Completed]);

    Ok(())
}

#[test]
fn test_merge_inner_of_empty_outer_completes() -> anyhow::Result<()> {
    // Arrange
    let streams = Stream::<Streams<i32>>::completed();

    // Act
    let recorder = Recorder::subscribe(&streams.merge_inner());

    // Assert
    assert_eq!(recorder.events(), vec![Signal::Completed]);

    Ok(())
}

#[test]
fn test_merge_inner_failure_disposes_every_inner() -> anyhow::Result<()> {
    // Arrange
    let (outer, streams) = test_source::<StreamItem<Stream<StreamItem<i32>>>>();
    let first = ProbeSource::<StreamItem<i32>>::new();
    let second = ProbeSource::<StreamItem<i32>>::new();
    let recorder = Recorder::subscribe(&streams.merge_inner());

    // Act
    outer.next(first.stream())?;
    outer.next(second.stream())?;
    second.fail(RivuletError::stream_error("boom"));
    let reached = first.next(1);

    // Assert
    assert!(recorder.is_failed());
    assert_eq!(reached, 0);
    assert_eq!(outer.subscriber_count(), 0);

    Ok(())
}

#[test]
fn test_switch_to_latest_disposes_superseded_inner() -> anyhow::Result<()> {
    // Arrange
    let (outer, streams) = test_source::<Streams<&str>>();
    let first = ProbeSource::<Signal<&str>>::new();
    let (second, second_stream) = test_source::<Signal<&str>>();
    let recorder = Recorder::subscribe(&streams.switch_to_latest());

    // Act
    outer.next(first.stream())?;
    first.next("a");
    outer.next(second_stream)?;
    let stale = first.next("stale");
    second.next("b")?;

    // Assert
    assert_eq!(recorder.elements(), vec!["a", "b"]);
    assert_eq!(stale, 0);
    assert_eq!(first.disposals(), 1);

    Ok(())
}

#[test]
fn test_switch_to_latest_needs_outer_and_active_inner_completion() -> anyhow::Result<()> {
    // Arrange
    let (outer, streams) = test_source::<Streams<i32>>();
    let (first, first_stream) = test_source::<Signal<i32>>();
    let recorder = Recorder::subscribe(&streams.switch_to_latest());

    // Act
    outer.next(first_stream)?;
    first.complete()?;
    let after_inner = recorder.is_terminated();
    outer.complete()?;

    // Assert
    assert!(!after_inner);
    assert_eq!(recorder.events(), vec![Signal::Completed]);

    Ok(())
}

#[test]
fn test_concat_inner_runs_inner_streams_sequentially() -> anyhow::Result<()> {
    // Arrange
    let (outer, streams) = test_source::<Streams<i32>>();
    let (first, first_stream) = test_source::<Signal<i32>>();
    let second = ProbeSource::<Signal<i32>>::new();
    let recorder = Recorder::subscribe(&streams.concat_inner());

    // Act
    outer.next(first_stream)?;
    outer.next(second.stream())?;
    outer.complete()?;
    first.next(1)?;
    let second_subscribed_early = second.subscriptions();
    first.complete()?;
    second.next(2);
    let before_second_completes = recorder.is_terminated();
    second.complete();

    // Assert
    assert_eq!(second_subscribed_early, 0);
    assert!(!before_second_completes);
    assert_eq!(
        recorder.events(),
        vec![Signal::Next(1), Signal::Next(2), Signal::Completed]
    );

    Ok(())
}

#[test]
fn test_outer_failure_goes_through_propagate_function() -> anyhow::Result<()> {
    // Arrange
    let (outer, streams) = test_source::<StreamItem<Stream<Signal<String>>>>();
    let recorder = Recorder::subscribe(&streams.merge_inner_with(|error, observer| {
        observer.next(format!("recovered: {error}"));
        observer.completed();
    }));

    // Act
    outer.next(Stream::just("inner".to_string()))?;
    outer.fail(RivuletError::stream_error("outer broke"))?;

    // Assert
    assert_eq!(
        recorder.elements(),
        vec![
            "inner".to_string(),
            "recovered: Stream processing error: outer broke".to_string()
        ]
    );
    assert!(recorder.is_completed());

    Ok(())
}

#[test]
fn test_flat_map_variants() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::<Signal<i32>>::sequence(vec![1, 2]);
    let expand = |x: i32| Stream::<Signal<i32>>::sequence(vec![x, x * 10]);

    // Act
    let merged = Recorder::subscribe(&source.clone().flat_map_merge(expand));
    let latest = Recorder::subscribe(&source.clone().flat_map_latest(expand));
    let concatenated = Recorder::subscribe(&source.flat_map_concat(expand));

    // Assert
    assert_eq!(merged.elements(), vec![1, 10, 2, 20]);
    assert_eq!(latest.elements(), vec![1, 10, 2, 20]);
    assert_eq!(concatenated.elements(), vec![1, 10, 2, 20]);
    assert!(concatenated.is_completed());

    Ok(())
}

#[test]
fn test_flat_map_merge_releases_finished_inner_streams() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_source::<Signal<u64>>();
    let inners: Vec<_> = (0..100).map(|_| ProbeSource::<Signal<u64>>::new()).collect();
    let streams: Vec<_> = inners.iter().map(ProbeSource::<Signal<u64>>::stream).collect();
    let merged = source.flat_map_merge(move |index| streams[index as usize].clone());
    let recorder = Recorder::subscribe(&merged);

    // Act
    for (index, inner) in inners.iter().enumerate() {
        tx.next(index as u64)?;
        inner.next(index as u64 * 2);
        inner.complete();
    }

    // Assert
    assert_eq!(recorder.len(), 100);
    assert!(!recorder.is_terminated());
    assert!(inners.iter().all(|inner| inner.live() == 0));
    assert!(inners.iter().all(|inner| inner.disposals() == 1));

    Ok(())
}

#[test]
fn test_flat_map_merge_over_many_short_inner_streams() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::<Signal<u64>>::sequence(0..1_000);

    // Act
    let merged = source.flat_map_merge(|value| Stream::<Signal<u64>>::just(value));
    let recorder = Recorder::subscribe(&merged);

    // Assert
    assert_eq!(recorder.elements().iter().sum::<u64>(), 499_500);
    assert!(recorder.is_completed());

    Ok(())
}
