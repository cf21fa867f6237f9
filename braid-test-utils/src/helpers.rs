// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use braid_core::{BraidError, Result, StreamItem};
use futures::stream::{Stream, StreamExt};
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Waits for the next item and unwraps it into a `Result`.
///
/// Fails if the stream ended or nothing arrived within `timeout_ms`.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> Result<T>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(StreamItem::Value(v))) => Ok(v),
        Ok(Some(StreamItem::Error(e))) => Err(e),
        Ok(None) => Err(BraidError::stream_error("Stream ended")),
        Err(_) => Err(BraidError::stream_error("Timed out waiting for an item")),
    }
}

/// Asserts that the stream reports end-of-stream within `timeout_ms`.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(None) => {}
        Ok(Some(_)) => panic!("Expected the stream to end, but it emitted an item"),
        Err(_) => panic!("Expected the stream to end, but it is still pending"),
    }
}

pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected item emitted, expected no output.");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}
