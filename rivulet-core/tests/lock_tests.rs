// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::ReentrantLock;
use std::sync::Arc;
use std::thread;

#[test]
fn test_lock_reenters_on_same_thread() -> anyhow::Result<()> {
    // Arrange
    let state = ReentrantLock::new(Vec::<u32>::new());

    // Act
    let outer = state.lock();
    outer.borrow_mut().push(1);
    state.with(|values| values.push(2));
    drop(outer);

    // Assert
    assert_eq!(state.with(|values| values.clone()), vec![1, 2]);

    Ok(())
}

#[test]
fn test_with_serializes_updates_across_threads() -> anyhow::Result<()> {
    // Arrange
    let counter = Arc::new(ReentrantLock::new(0_u64));

    // Act
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..1_000 {
                    counter.with(|count| *count += 1);
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker panicked");
    }

    // Assert
    assert_eq!(counter.with(|count| *count), 4_000);

    Ok(())
}
