// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cep_core::{CepError, StreamItem};
use cep_stream::PairwiseExt;
use cep_test_utils::person::{person_alice, person_bob, person_charlie};
use cep_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, test_channel_with_errors,
    unwrap_stream,
};

#[tokio::test]
async fn test_pairwise_emits_each_element_with_its_predecessor() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let mut pairs = Box::pin(stream.pairwise());

    // Act & Assert
    tx.send(1)?;
    assert_no_element_emitted(&mut pairs, 50).await;

    tx.send(2)?;
    assert_eq!(unwrap_stream(&mut pairs, 500).await.ok(), Some((1, 2)));

    tx.send(3)?;
    assert_eq!(unwrap_stream(&mut pairs, 500).await.ok(), Some((2, 3)));

    drop(tx);
    assert_stream_ended(&mut pairs, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_pairwise_single_value_completes_without_pair() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let mut pairs = Box::pin(stream.pairwise());

    // Act
    tx.send(42)?;
    drop(tx);

    // Assert
    assert_stream_ended(&mut pairs, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_pairwise_on_empty_stream_completes() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let mut pairs = Box::pin(stream.pairwise());

    // Act
    drop(tx);

    // Assert
    assert_stream_ended(&mut pairs, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_pairwise_clones_held_value_into_both_pairs() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel();
    let mut pairs = Box::pin(stream.pairwise());

    // Act
    tx.send(person_alice())?;
    tx.send(person_bob())?;
    tx.send(person_charlie())?;

    // Assert
    assert_eq!(
        unwrap_stream(&mut pairs, 500).await.ok(),
        Some((person_alice(), person_bob()))
    );
    assert_eq!(
        unwrap_stream(&mut pairs, 500).await.ok(),
        Some((person_bob(), person_charlie()))
    );

    Ok(())
}

#[tokio::test]
async fn test_pairwise_forwards_failure_and_ends() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors::<i32, CepError>();
    let mut pairs = Box::pin(stream.pairwise());

    // Act
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Error(CepError::stream_error("sensor lost")))?;
    tx.send(StreamItem::Value(2))?;

    // Assert
    assert!(unwrap_stream(&mut pairs, 500).await.is_error());
    assert_stream_ended(&mut pairs, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_pairwise_failure_before_any_value_is_forwarded() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors::<i32, CepError>();
    let mut pairs = Box::pin(stream.pairwise());

    // Act
    tx.send(StreamItem::Error(CepError::stream_error("no input")))?;

    // Assert
    assert!(unwrap_stream(&mut pairs, 500).await.is_error());
    assert_stream_ended(&mut pairs, 500).await;

    Ok(())
}
