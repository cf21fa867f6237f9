// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use braid_core::StreamItem;
use braid_stream::{drain, LimitOptions, LimitedExt};
use braid_test_utils::{assert_no_element_emitted, assert_stream_ended, test_channel, unwrap_stream};
use futures::stream::{self, FusedStream};
use std::num::NonZeroUsize;

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn chunks(n: usize) -> impl futures::Stream<Item = StreamItem<usize>> + Unpin {
    stream::iter((1..=n).map(StreamItem::Value))
}

#[tokio::test]
async fn test_fewer_chunks_than_limit_pass_unchanged() -> anyhow::Result<()> {
    for options in [LimitOptions::default(), LimitOptions::strict()] {
        for limit in 1..=4 {
            for count in 0..=limit {
                // Arrange
                let limited = chunks(count).limited(size(limit), options);

                // Act
                let output = drain(limited).await?;

                // Assert
                assert_eq!(output, (1..=count).collect::<Vec<_>>());
            }
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_lenient_overflow_closes_after_size_chunks() -> anyhow::Result<()> {
    // Arrange
    let limited = chunks(10).limited(size(3), LimitOptions::default());

    // Act
    let output = drain(limited).await?;

    // Assert
    assert_eq!(output, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test]
async fn test_exact_size_waits_for_end_before_closing() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<&str>();
    let mut limited = stream.limited(size(2), LimitOptions::strict());

    // Act
    tx.send("a")?;
    tx.send("b")?;

    // Assert
    assert_eq!(unwrap_stream(&mut limited, 100).await?, "a");
    assert_eq!(unwrap_stream(&mut limited, 100).await?, "b");

    // No look-ahead: the limit is not enforced before another chunk shows up
    assert_no_element_emitted(&mut limited, 50).await;
    assert!(!limited.is_terminated());

    drop(tx);
    assert_stream_ended(&mut limited, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_overflow_drops_upstream() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<u32>();
    let mut limited = stream.limited(size(1), LimitOptions::default());

    // Act
    tx.send(1)?;
    tx.send(2)?;

    // Assert
    assert_eq!(unwrap_stream(&mut limited, 100).await?, 1);
    assert_stream_ended(&mut limited, 100).await;
    assert!(limited.is_terminated());
    assert!(tx.is_closed());

    Ok(())
}

#[tokio::test]
async fn test_terminated_limiter_stays_ended() -> anyhow::Result<()> {
    // Arrange
    let mut limited = chunks(5).limited(size(2), LimitOptions::default());

    // Act
    let first = drain(&mut limited).await?;
    let second = drain(&mut limited).await?;

    // Assert
    assert_eq!(first, vec![1, 2]);
    assert!(second.is_empty());
    assert_eq!(limited.transform().count(), 2);
    assert_eq!(limited.transform().remaining(), 0);

    Ok(())
}

#[tokio::test]
async fn test_try_limited_accepts_positive_size() -> anyhow::Result<()> {
    // Arrange
    let limited = chunks(4).try_limited(2, LimitOptions::default())?;

    // Act
    let output = drain(limited).await?;

    // Assert
    assert_eq!(output, vec![1, 2]);

    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_options_deserialize_with_defaults() -> anyhow::Result<()> {
    let strict: LimitOptions = serde_json::from_str(r#"{"error": true}"#)?;
    let lenient: LimitOptions = serde_json::from_str("{}")?;

    assert_eq!(strict, LimitOptions::strict());
    assert_eq!(lenient, LimitOptions::default());
    assert_eq!(serde_json::to_string(&strict)?, r#"{"error":true}"#);

    Ok(())
}
