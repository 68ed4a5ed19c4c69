// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{RivuletError, Signal, StreamItem};
use rivulet_stream::prelude::*;
use rivulet_test_utils::test_data::{animal_dog, person_alice, plant_rose, push, TestData};
use rivulet_test_utils::{test_source, ProbeSource, Recorder};

#[test]
fn test_merge_interleaves_in_arrival_order() -> anyhow::Result<()> {
    // Arrange
    let (left_tx, left) = test_source::<Signal<TestData>>();
    let (right_tx, right) = test_source::<Signal<TestData>>();
    let recorder = Recorder::subscribe(&left.merge_with(right));

    // Act
    push(person_alice(), &left_tx);
    push(animal_dog(), &right_tx);
    push(plant_rose(), &left_tx);

    // Assert
    assert_eq!(
        recorder.elements(),
        vec![person_alice(), animal_dog(), plant_rose()]
    );

    Ok(())
}

#[test]
fn test_merge_completes_after_both_sides() -> anyhow::Result<()> {
    // Arrange
    let (left_tx, left) = test_source::<Signal<i32>>();
    let (right_tx, right) = test_source::<Signal<i32>>();
    let recorder = Recorder::subscribe(&left.merge_with(right));

    // Act
    left_tx.complete()?;
    let after_left = recorder.is_terminated();
    right_tx.next(1)?;
    right_tx.complete()?;

    // Assert
    assert!(!after_left);
    assert_eq!(recorder.events(), vec![Signal::Next(1), Signal::Completed]);

    Ok(())
}

#[test]
fn test_merge_failure_disposes_both_sides() -> anyhow::Result<()> {
    // Arrange
    let left = ProbeSource::<StreamItem<i32>>::new();
    let right = ProbeSource::<StreamItem<i32>>::new();
    let recorder = Recorder::subscribe(&left.stream().merge_with(right.stream()));

    // Act
    left.next(1);
    right.fail(RivuletError::stream_error("boom"));
    let reached = left.next(2);

    // Assert
    assert_eq!(recorder.elements(), vec![1]);
    assert!(recorder.is_failed());
    assert_eq!(reached, 0);
    assert_eq!(left.disposals(), 1);
    assert_eq!(right.disposals(), 1);

    Ok(())
}
