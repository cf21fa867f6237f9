// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use braid_core::{CancelReason, IntoSource, SourceExt};
use braid_stream::{drain, EarlyZip, EarlyZipExt};
use braid_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, unwrap_stream, ScriptedSource,
    SourceEvent, SourceLog, Step,
};
use futures::stream::{self, FusedStream};
use futures::{FutureExt, StreamExt};

fn ended_at(index: usize, sources: usize) -> Vec<(usize, CancelReason)> {
    (0..sources)
        .map(|source| (source, CancelReason::SourceEnded { index }))
        .collect()
}

#[tokio::test]
async fn test_equal_lengths_interleave() -> anyhow::Result<()> {
    // Arrange
    let numbers = stream::iter(vec!["1", "2", "3"]).into_source();
    let letters = stream::iter(vec!["a", "b", "c"]).into_source();

    // Act
    let merged = drain(numbers.early_zip([letters])).await?;

    // Assert
    assert_eq!(merged, vec!["1", "a", "2", "b", "3", "c"]);

    Ok(())
}

#[tokio::test]
async fn test_equal_lengths_yield_k_times_n_items_round_robin() -> anyhow::Result<()> {
    for sources in 1..=4usize {
        for length in 0..=3usize {
            // Arrange
            let log = SourceLog::new();
            let scripted = (0..sources)
                .map(|id| ScriptedSource::new(id, (0..length).map(move |round| (id, round)), &log))
                .collect();

            // Act
            let merged = drain(EarlyZip::new(scripted)?).await?;

            // Assert
            let expected: Vec<_> = (0..length)
                .flat_map(|round| (0..sources).map(move |id| (id, round)))
                .collect();
            assert_eq!(merged.len(), length * sources);
            assert_eq!(merged, expected);
            assert_eq!(log.cancellations(), ended_at(0, sources));
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_shorter_first_source_cancels_longer() -> anyhow::Result<()> {
    // Arrange
    let log = SourceLog::new();
    let zip = EarlyZip::new(vec![
        ScriptedSource::new(0, ["1", "2"], &log),
        ScriptedSource::new(1, ["a", "b", "c", "d"], &log),
    ])?;

    // Act
    let merged = drain(zip).await?;

    // Assert
    assert_eq!(merged, vec!["1", "a", "2", "b"]);
    assert_eq!(log.cancellations(), ended_at(0, 2));
    assert_eq!(log.reads(0), 3);
    assert_eq!(log.reads(1), 2);

    Ok(())
}

#[tokio::test]
async fn test_shorter_second_source_keeps_item_read_this_round() -> anyhow::Result<()> {
    // Arrange
    let log = SourceLog::new();
    let zip = EarlyZip::new(vec![
        ScriptedSource::new(0, ["1", "2", "3", "4"], &log),
        ScriptedSource::new(1, ["a", "b"], &log),
    ])?;

    // Act
    let merged = drain(zip).await?;

    // Assert
    assert_eq!(merged, vec!["1", "a", "2", "b", "3"]);
    assert_eq!(log.cancellations(), ended_at(1, 2));
    assert_eq!(log.reads(0), 3);
    assert_eq!(log.reads(1), 3);

    Ok(())
}

#[tokio::test]
async fn test_three_uneven_sources_stop_after_one_round() -> anyhow::Result<()> {
    // Arrange
    let log = SourceLog::new();
    let zip = EarlyZip::new(vec![
        ScriptedSource::new(0, ["1"], &log),
        ScriptedSource::new(1, ["a", "b"], &log),
        ScriptedSource::new(2, ["A", "B", "C"], &log),
    ])?;

    // Act
    let merged = drain(zip).await?;

    // Assert
    assert_eq!(merged, vec!["1", "a", "A"]);
    assert_eq!(log.cancellations(), ended_at(0, 3));
    assert_eq!(log.reads(1), 1);
    assert_eq!(log.reads(2), 1);

    Ok(())
}

#[tokio::test]
async fn test_source_empty_on_first_read_cancels_siblings() -> anyhow::Result<()> {
    // Arrange
    let log = SourceLog::new();
    let zip = EarlyZip::new(vec![
        ScriptedSource::new(0, ["1", "2"], &log),
        ScriptedSource::new(1, Vec::<&str>::new(), &log),
        ScriptedSource::new(2, ["A", "B"], &log),
    ])?;

    // Act
    let merged = drain(zip).await?;

    // Assert
    assert_eq!(merged, vec!["1"]);
    assert_eq!(log.cancellations(), ended_at(1, 3));
    assert_eq!(log.reads(2), 0);

    Ok(())
}

#[tokio::test]
async fn test_single_source_cancels_itself_on_exhaustion() -> anyhow::Result<()> {
    // Arrange
    let log = SourceLog::new();
    let zip = EarlyZip::new(vec![ScriptedSource::new(0, [1, 2, 3], &log)])?;

    // Act
    let merged = drain(zip).await?;

    // Assert
    assert_eq!(merged, vec![1, 2, 3]);
    assert_eq!(log.cancellations(), ended_at(0, 1));

    Ok(())
}

#[tokio::test]
async fn test_reads_are_sequential_in_index_order() -> anyhow::Result<()> {
    // Arrange
    let log = SourceLog::new();
    let zip = EarlyZip::new(vec![
        ScriptedSource::from_steps(0, [Step::Yield, Step::Item(1), Step::Yield, Step::Item(2)], &log),
        ScriptedSource::from_steps(1, [Step::Item(10), Step::Yield, Step::Item(20)], &log),
    ])?;

    // Act
    let merged = drain(zip).await?;

    // Assert
    assert_eq!(merged, vec![1, 10, 2, 20]);
    let reads: Vec<_> = log
        .events()
        .into_iter()
        .filter_map(|event| match event {
            SourceEvent::Read { source } => Some(source),
            _ => None,
        })
        .collect();
    assert_eq!(reads, vec![0, 1, 0, 1, 0]);

    Ok(())
}

#[tokio::test]
async fn test_items_are_observable_before_round_completes() -> anyhow::Result<()> {
    // Arrange
    let log = SourceLog::new();
    let mut zip = EarlyZip::new(vec![
        ScriptedSource::from_steps(0, [Step::Item("1")], &log),
        ScriptedSource::from_steps(1, [Step::Stall], &log),
    ])?;

    // Act & Assert
    assert_eq!(unwrap_stream(&mut zip, 100).await?, "1");
    assert!(zip.next().now_or_never().is_none());
    assert_eq!(log.reads(1), 0);

    Ok(())
}

#[tokio::test]
async fn test_fast_source_waits_for_slow_source() -> anyhow::Result<()> {
    // Arrange
    let (tx_slow, slow) = test_channel::<i32>();
    let (tx_fast, fast) = test_channel::<i32>();
    let mut zip = slow
        .into_fallible_source()
        .early_zip([fast.into_fallible_source()]);

    // Act
    tx_fast.send(10)?;
    tx_fast.send(20)?;

    // Assert - nothing until index 0 has an item
    assert_no_element_emitted(&mut zip, 50).await;

    tx_slow.send(1)?;
    assert_eq!(unwrap_stream(&mut zip, 100).await?, 1);
    assert_eq!(unwrap_stream(&mut zip, 100).await?, 10);
    assert_no_element_emitted(&mut zip, 50).await;

    drop(tx_slow);
    assert_stream_ended(&mut zip, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_boxed_sources_of_different_types() -> anyhow::Result<()> {
    // Arrange
    let log = SourceLog::new();
    let scripted = ScriptedSource::new(0, [1, 2, 3], &log).boxed();
    let iterated = stream::iter(vec![100, 200]).into_source().boxed();

    // Act
    let merged = drain(scripted.early_zip([iterated])).await?;

    // Assert
    assert_eq!(merged, vec![1, 100, 2, 200, 3]);
    assert_eq!(log.cancellations(), vec![(0, CancelReason::SourceEnded { index: 1 })]);

    Ok(())
}

#[tokio::test]
async fn test_terminated_output_stays_ended_without_new_cancellations() -> anyhow::Result<()> {
    // Arrange
    let log = SourceLog::new();
    let mut zip = EarlyZip::new(vec![
        ScriptedSource::new(0, ["x"], &log),
        ScriptedSource::new(1, ["y"], &log),
    ])?;
    assert!(!zip.is_terminated());

    // Act
    let first = drain(&mut zip).await?;
    let second = drain(&mut zip).await?;

    // Assert
    assert_eq!(first, vec!["x", "y"]);
    assert!(second.is_empty());
    assert!(zip.is_terminated());
    assert_eq!(log.cancellations().len(), 2);
    assert_eq!(zip.source_count(), 2);

    Ok(())
}
