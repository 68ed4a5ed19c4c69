// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Disposable, Signal};
use rivulet_test_utils::test_data::{
    animal_dog, person_alice, plant_rose, push, DataVariant, TestData,
};
use rivulet_test_utils::{test_source, ProbeSource, Recorder};

#[test]
fn test_source_broadcasts_to_every_subscription() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_source::<Signal<TestData>>();
    let first = Recorder::subscribe(&stream);
    let second = Recorder::subscribe(&stream);

    // Act
    push(person_alice(), &tx);
    tx.complete()?;

    // Assert
    assert_eq!(first.elements(), vec![person_alice()]);
    assert_eq!(second.events(), first.events());
    assert!(second.is_completed());

    Ok(())
}

#[test]
fn test_probe_counts_subscriptions_and_disposals() -> anyhow::Result<()> {
    // Arrange
    let probe = ProbeSource::<Signal<i32>>::new();
    let stream = probe.stream();

    // Act
    let (recorder, subscription) = Recorder::subscribe_with_handle(&stream);
    let reached = probe.next(1);
    subscription.dispose();
    let reached_after_dispose = probe.next(2);

    // Assert
    assert_eq!(reached, 1);
    assert_eq!(reached_after_dispose, 0);
    assert_eq!(probe.subscriptions(), 1);
    assert_eq!(probe.disposals(), 1);
    assert_eq!(recorder.elements(), vec![1]);

    Ok(())
}

#[test]
fn test_probe_releases_observer_after_completion() -> anyhow::Result<()> {
    // Arrange
    let probe = ProbeSource::<Signal<i32>>::new();
    let recorder = Recorder::subscribe(&probe.stream());

    // Act
    probe.complete();

    // Assert
    assert!(recorder.is_completed());
    assert_eq!(probe.live(), 0);
    assert_eq!(probe.disposals(), 1);

    Ok(())
}

#[test]
fn test_data_variant_fixtures() -> anyhow::Result<()> {
    // Arrange
    let dog = animal_dog();

    // Act
    let variant = dog.variant();

    // Assert
    assert_eq!(variant, DataVariant::Animal);
    assert_eq!(variant.fixture(), dog);
    assert_eq!(person_alice().to_string(), "Alice (25)");
    assert_eq!(dog.to_string(), "Dog with 4 legs");
    assert_eq!(plant_rose().to_string(), "Rose at 15cm");

    Ok(())
}
