// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{RivuletError, Signal, Stream, StreamItem};
use rivulet_stream::prelude::*;
use rivulet_test_utils::test_data::{
    animal_dog, person_alice, person_bob, plant_rose, push, DataVariant, TestData,
};
use rivulet_test_utils::{test_source, Recorder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_map_transforms_elements_and_keeps_completion() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_source::<Signal<TestData>>();
    let recorder = Recorder::subscribe(&stream.map(|data| data.to_string()));

    // Act
    push(person_alice(), &tx);
    push(animal_dog(), &tx);
    tx.complete()?;

    // Assert
    assert_eq!(
        recorder.elements(),
        vec![person_alice().to_string(), animal_dog().to_string()]
    );
    assert!(recorder.is_completed());

    Ok(())
}

#[test]
fn test_map_forwards_failure_unchanged() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_source::<StreamItem<i32>>();
    let recorder = Recorder::subscribe(&stream.map(|x| x * 2));

    // Act
    tx.next(21)?;
    tx.fail(RivuletError::stream_error("sensor offline"))?;

    // Assert
    assert_eq!(recorder.elements(), vec![42]);
    assert!(recorder.is_failed());

    Ok(())
}

#[test]
fn test_map_event_converts_between_families() -> anyhow::Result<()> {
    // Arrange
    let stream = Stream::<Signal<i32>>::sequence(vec![1, 2]).map_event(|event| match event {
        Signal::Next(x) => StreamItem::Value(x),
        Signal::Completed => StreamItem::Completed,
    });

    // Act
    let recorder = Recorder::subscribe(&stream);

    // Assert
    assert_eq!(
        recorder.events(),
        vec![
            StreamItem::Value(1),
            StreamItem::Value(2),
            StreamItem::Completed
        ]
    );

    Ok(())
}

#[test]
fn test_filter_keeps_matching_variants() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_source::<Signal<TestData>>();
    let people = stream.filter(|data| data.variant() == DataVariant::Person);
    let recorder = Recorder::subscribe(&people);

    // Act
    push(person_alice(), &tx);
    push(animal_dog(), &tx);
    push(plant_rose(), &tx);
    push(person_bob(), &tx);

    // Assert
    assert_eq!(recorder.elements(), vec![person_alice(), person_bob()]);

    Ok(())
}

#[test]
fn test_tap_sees_every_event_including_termination() -> anyhow::Result<()> {
    // Arrange
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let stream = Stream::<Signal<i32>>::sequence(vec![1, 2, 3]).tap(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    // Act
    let recorder = Recorder::subscribe(&stream);

    // Assert
    assert_eq!(seen.load(Ordering::SeqCst), 4);
    assert_eq!(recorder.elements(), vec![1, 2, 3]);

    Ok(())
}

#[test]
fn test_scan_emits_seed_on_subscription() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_source::<Signal<u32>>();
    let totals = stream.scan(100, |acc, x| acc + x);

    // Act
    let recorder = Recorder::subscribe(&totals);
    let before = recorder.elements();
    tx.next(1)?;
    tx.next(2)?;

    // Assert
    assert_eq!(before, vec![100]);
    assert_eq!(recorder.elements(), vec![100, 101, 103]);

    Ok(())
}

#[test]
fn test_scan_state_is_per_subscription() -> anyhow::Result<()> {
    // Arrange
    let totals = Stream::<Signal<u32>>::sequence(vec![1, 2]).scan(0, |acc, x| acc + x);

    // Act
    let first = Recorder::subscribe(&totals);
    let second = Recorder::subscribe(&totals);

    // Assert
    assert_eq!(first.elements(), vec![0, 1, 3]);
    assert_eq!(second.elements(), vec![0, 1, 3]);

    Ok(())
}

#[test]
fn test_distinct_drops_consecutive_duplicates() -> anyhow::Result<()> {
    // Arrange
    let stream = Stream::<Signal<i32>>::sequence(vec![1, 1, 2, 2, 3, 1]).distinct();

    // Act
    let recorder = Recorder::subscribe(&stream);

    // Assert
    assert_eq!(recorder.elements(), vec![1, 2, 3, 1]);
    assert!(recorder.is_completed());

    Ok(())
}

#[test]
fn test_distinct_by_compares_against_previous_element() -> anyhow::Result<()> {
    // Arrange
    let stream = Stream::<Signal<i32>>::sequence(vec![1, 2, 5, 6, 10])
        .distinct_by(|previous, current| current - previous > 2);

    // Act
    let recorder = Recorder::subscribe(&stream);

    // Assert
    assert_eq!(recorder.elements(), vec![1, 5, 10]);

    Ok(())
}

#[test]
fn test_distinct_optional_treats_none_as_equal() -> anyhow::Result<()> {
    // Arrange
    let stream =
        Stream::<Signal<Option<i32>>>::sequence(vec![None, None, Some(1), Some(1), None, Some(2)])
            .distinct_optional();

    // Act
    let recorder = Recorder::subscribe(&stream);

    // Assert
    assert_eq!(
        recorder.elements(),
        vec![None, Some(1), None, Some(2)]
    );

    Ok(())
}

#[test]
fn test_ignore_elements_forwards_only_termination() -> anyhow::Result<()> {
    // Arrange
    let stream = Stream::<Signal<i32>>::sequence(vec![1, 2, 3]).ignore_elements();

    // Act
    let recorder = Recorder::subscribe(&stream);

    // Assert
    assert_eq!(recorder.events(), vec![Signal::Completed]);

    Ok(())
}

#[test]
fn test_default_if_empty_synthesizes_element() -> anyhow::Result<()> {
    // Arrange
    let empty = Stream::<Signal<TestData>>::completed().default_if_empty(plant_rose());
    let full = Stream::<Signal<TestData>>::just(person_alice()).default_if_empty(plant_rose());

    // Act
    let empty_recorder = Recorder::subscribe(&empty);
    let full_recorder = Recorder::subscribe(&full);

    // Assert
    assert_eq!(
        empty_recorder.events(),
        vec![Signal::Next(plant_rose()), Signal::Completed]
    );
    assert_eq!(full_recorder.elements(), vec![person_alice()]);

    Ok(())
}

#[test]
fn test_default_if_empty_forwards_bare_failure() -> anyhow::Result<()> {
    // Arrange
    let stream = Stream::<StreamItem<i32>>::failed(RivuletError::stream_error("boom"))
        .default_if_empty(7);

    // Act
    let recorder = Recorder::subscribe(&stream);

    // Assert
    assert_eq!(recorder.len(), 1);
    assert!(recorder.is_failed());

    Ok(())
}

#[test]
fn test_start_with_prepends_elements() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_source::<Signal<i32>>();
    let recorder = Recorder::subscribe(&stream.start_with(vec![-1, 0]));

    // Act
    tx.next(1)?;

    // Assert
    assert_eq!(recorder.elements(), vec![-1, 0, 1]);

    Ok(())
}
