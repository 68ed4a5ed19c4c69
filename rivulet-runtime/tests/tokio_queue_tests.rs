// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(feature = "runtime-tokio")]

use rivulet_core::Disposable;
use rivulet_runtime::{ExecutionContext, Queue, TokioQueue};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn counting(counter: &Arc<AtomicUsize>) -> Box<dyn FnOnce() + Send> {
    let counter = Arc::clone(counter);
    Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test(start_paused = true)]
async fn test_tokio_queue_fires_after_delay() -> anyhow::Result<()> {
    // Arrange
    let queue = TokioQueue::current().ok_or_else(|| anyhow::anyhow!("no tokio runtime"))?;
    let fired = Arc::new(AtomicUsize::new(0));

    // Act
    queue.after(Duration::from_millis(100), counting(&fired));
    sleep(Duration::from_millis(50)).await;
    let early = fired.load(Ordering::SeqCst);
    sleep(Duration::from_millis(100)).await;

    // Assert
    assert_eq!(early, 0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_tokio_queue_cancelled_timer_does_not_fire() -> anyhow::Result<()> {
    // Arrange
    let queue = TokioQueue::current().ok_or_else(|| anyhow::anyhow!("no tokio runtime"))?;
    let fired = Arc::new(AtomicUsize::new(0));
    let timer = queue.after(Duration::from_millis(100), counting(&fired));

    // Act
    timer.dispose();
    sleep(Duration::from_millis(200)).await;

    // Assert
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_tokio_queue_execute_and_clock() -> anyhow::Result<()> {
    // Arrange
    let queue = TokioQueue::current().ok_or_else(|| anyhow::anyhow!("no tokio runtime"))?;
    let fired = Arc::new(AtomicUsize::new(0));
    let start = queue.now();

    // Act
    queue.execute(counting(&fired));
    sleep(Duration::from_secs(1)).await;

    // Assert
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(queue.now() - start >= Duration::from_secs(1));

    Ok(())
}
