// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cep_core::{CepError, StreamItem};
use cep_exec::{MainContext, MergeOnMainExt, Subscription};
use cep_test_utils::{test_channel, test_channel_with_errors, Recorder};
use std::time::Duration;
use tokio::time::{sleep, timeout};

// Long enough for the driver to pull each value before the next is sent
const STEP: Duration = Duration::from_millis(20);

async fn wait_finished(subscription: &Subscription) -> anyhow::Result<()> {
    timeout(Duration::from_millis(500), subscription.finished()).await?;
    Ok(())
}

#[tokio::test]
async fn test_merge_alternating_sources_deliver_every_pair() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let (touch_tx, touches) = test_channel::<&str>();
    let (pressure_tx, pressures) = test_channel::<u32>();
    let recorder = Recorder::new();

    let sink = recorder.clone();
    let subscription = touches.merge_on_main(pressures, &context, move |touch, pressure| {
        sink.record((touch, pressure));
    });

    // Act: a1, b1, a2, b2
    touch_tx.send("a1")?;
    sleep(STEP).await;
    pressure_tx.send(1)?;
    sleep(STEP).await;
    touch_tx.send("a2")?;
    sleep(STEP).await;
    pressure_tx.send(2)?;
    drop(touch_tx);
    drop(pressure_tx);

    // Assert
    wait_finished(&subscription).await?;
    assert_eq!(recorder.values(), vec![("a1", 1), ("a2", 2)]);

    Ok(())
}

#[tokio::test]
async fn test_merge_same_origin_windows_deliver_nothing() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let (touch_tx, touches) = test_channel::<&str>();
    let (pressure_tx, pressures) = test_channel::<u32>();
    let recorder = Recorder::new();

    let sink = recorder.clone();
    let subscription = touches.merge_on_main(pressures, &context, move |touch, pressure| {
        sink.record((touch, pressure));
    });

    // Act: a1, a2, b1, b2
    touch_tx.send("a1")?;
    sleep(STEP).await;
    touch_tx.send("a2")?;
    sleep(STEP).await;
    pressure_tx.send(1)?;
    sleep(STEP).await;
    pressure_tx.send(2)?;
    drop(touch_tx);
    drop(pressure_tx);

    // Assert
    wait_finished(&subscription).await?;
    assert!(recorder.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_merge_callbacks_run_on_main_context() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let (touch_tx, touches) = test_channel::<&str>();
    let (pressure_tx, pressures) = test_channel::<u32>();
    let recorder = Recorder::new();

    let probe = context.clone();
    let sink = recorder.clone();
    let subscription =
        touches.merge_on_main(pressures, &context, move |_, _| sink.record(probe.is_current()));

    // Act
    touch_tx.send("began")?;
    sleep(STEP).await;
    pressure_tx.send(3)?;

    // Assert
    assert_eq!(recorder.wait_for(1, 500).await, vec![true]);
    subscription.cancel();

    Ok(())
}

#[tokio::test]
async fn test_merge_failure_of_either_source_ends_silently() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let (touch_tx, touches) = test_channel_with_errors::<&str, CepError>();
    let (pressure_tx, pressures) = test_channel_with_errors::<u32, CepError>();
    let recorder = Recorder::new();

    let sink = recorder.clone();
    let subscription = touches.merge_on_main(pressures, &context, move |touch, pressure| {
        sink.record((touch, pressure));
    });

    // Act
    touch_tx.send(StreamItem::Value("a1"))?;
    sleep(STEP).await;
    pressure_tx.send(StreamItem::Error(CepError::stream_error("pressure lost")))?;

    // Assert: finished although the touch source is still open
    wait_finished(&subscription).await?;
    assert!(recorder.is_empty());

    Ok(())
}
