// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cep_core::{CepError, StreamItem};
use cep_exec::{BatchExt, MainContext, Subscription};
use cep_test_utils::person::{person_alice, person_bob, person_charlie, person_diane, Person};
use cep_test_utils::{test_channel, test_channel_with_errors, Recorder};
use futures::{stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio::time::{sleep, timeout};

#[derive(Debug, thiserror::Error)]
#[error("no key for {0}")]
struct MissingKey(i32);

async fn wait_finished(subscription: &Subscription) -> anyhow::Result<()> {
    timeout(Duration::from_millis(500), subscription.finished()).await?;
    Ok(())
}

fn values<T: Send + 'static>(items: Vec<T>) -> impl futures::Stream<Item = StreamItem<T>> + Send + 'static {
    stream::iter(items).map(StreamItem::Value)
}

#[tokio::test]
async fn test_group_partitions_by_key() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let recorder = Recorder::new();

    // Act
    let subscription = values(vec![1, 2, 3, 4]).group_on_main(
        &context,
        |x| Ok::<_, Infallible>(x % 2),
        recorder.callback(),
    );

    // Assert
    wait_finished(&subscription).await?;
    let mut deliveries = recorder.values();
    assert_eq!(deliveries.len(), 1);
    let groups = &mut deliveries[0];
    groups.sort();
    assert_eq!(*groups, vec![vec![1, 3], vec![2, 4]]);

    Ok(())
}

#[tokio::test]
async fn test_group_keeps_emission_order_inside_groups() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let recorder = Recorder::new();
    let people = vec![person_alice(), person_bob(), person_charlie(), person_diane()];

    // Act
    let subscription = values(people).group_on_main(
        &context,
        |person: &Person| Ok::<_, Infallible>(person.age),
        recorder.callback(),
    );

    // Assert
    wait_finished(&subscription).await?;
    let mut groups = recorder.values().remove(0);
    groups.sort_by_key(|group| group[0].age);
    assert_eq!(
        groups,
        vec![
            vec![person_alice(), person_charlie()],
            vec![person_bob()],
            vec![person_diane()],
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_group_key_failure_delivers_nothing() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let recorder = Recorder::<Vec<Vec<i32>>>::new();

    // Act
    let subscription = values(vec![1, 2, -3, 4]).group_on_main(
        &context,
        |&x| if x < 0 { Err(MissingKey(x)) } else { Ok(x % 2) },
        recorder.callback(),
    );

    // Assert
    wait_finished(&subscription).await?;
    assert!(recorder.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_group_failure_delivers_nothing() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let (tx, stream) = test_channel_with_errors::<i32, CepError>();
    let recorder = Recorder::<Vec<Vec<i32>>>::new();
    let subscription =
        stream.group_on_main(&context, |x| Ok::<_, Infallible>(x % 2), recorder.callback());

    // Act
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Value(2))?;
    tx.send(StreamItem::Value(3))?;
    tx.send(StreamItem::Error(CepError::stream_error("touch source lost")))?;

    // Assert
    wait_finished(&subscription).await?;
    assert!(recorder.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_group_waits_for_completion() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let (tx, stream) = test_channel::<i32>();
    let recorder = Recorder::new();
    let subscription =
        stream.group_on_main(&context, |x| Ok::<_, Infallible>(*x), recorder.callback());

    // Act & Assert
    tx.send(1)?;
    tx.send(1)?;
    sleep(Duration::from_millis(50)).await;
    assert!(recorder.is_empty());

    drop(tx);
    wait_finished(&subscription).await?;
    assert_eq!(recorder.values(), vec![vec![vec![1, 1]]]);

    Ok(())
}

#[tokio::test]
async fn test_group_on_empty_stream_delivers_no_groups_once() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let recorder = Recorder::<Vec<Vec<i32>>>::new();

    // Act
    let subscription =
        values(Vec::<i32>::new()).group_on_main(&context, |x| Ok::<_, Infallible>(*x), recorder.callback());

    // Assert
    wait_finished(&subscription).await?;
    assert_eq!(recorder.values(), vec![Vec::<Vec<i32>>::new()]);

    Ok(())
}

#[tokio::test]
async fn test_order_sorts_ascending() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let recorder = Recorder::new();

    // Act
    let subscription = values(vec![3, 1, 2]).order_on_main(&context, |a, b| a < b, recorder.callback());

    // Assert
    wait_finished(&subscription).await?;
    assert_eq!(recorder.values(), vec![vec![1, 2, 3]]);

    Ok(())
}

#[tokio::test]
async fn test_order_is_stable() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let recorder = Recorder::new();
    let people = vec![person_diane(), person_alice(), person_bob(), person_charlie()];

    // Act
    let subscription = values(people).order_on_main(
        &context,
        |a: &Person, b: &Person| a.age < b.age,
        recorder.callback(),
    );

    // Assert
    wait_finished(&subscription).await?;
    assert_eq!(
        recorder.values(),
        vec![vec![person_alice(), person_charlie(), person_bob(), person_diane()]]
    );

    Ok(())
}

#[tokio::test]
async fn test_order_failure_delivers_nothing() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let (tx, stream) = test_channel_with_errors::<i32, CepError>();
    let recorder = Recorder::<Vec<i32>>::new();
    let subscription = stream.order_on_main(&context, |a, b| a < b, recorder.callback());

    // Act
    tx.send(StreamItem::Value(2))?;
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Error(CepError::stream_error("boom")))?;

    // Assert
    wait_finished(&subscription).await?;
    assert!(recorder.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_order_on_empty_stream_delivers_empty_result_once() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let recorder = Recorder::<Vec<i32>>::new();

    // Act
    let subscription = values(Vec::<i32>::new()).order_on_main(&context, |a, b| a < b, recorder.callback());

    // Assert
    wait_finished(&subscription).await?;
    assert_eq!(recorder.values(), vec![Vec::<i32>::new()]);

    Ok(())
}

#[tokio::test]
async fn test_order_callback_runs_on_main_context() -> anyhow::Result<()> {
    // Arrange
    let context = MainContext::new()?;
    let recorder = Recorder::new();
    let probe = context.clone();
    let sink = recorder.clone();

    // Act
    let subscription = values(vec![2, 1]).order_on_main(&context, |a, b| a < b, move |_| {
        sink.record(probe.is_current());
    });

    // Assert
    wait_finished(&subscription).await?;
    assert_eq!(recorder.values(), vec![true]);

    Ok(())
}
