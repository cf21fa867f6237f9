// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use braid_core::{Result, StreamItem};
use core::pin::pin;
use futures::{Stream, StreamExt};

/// Drains a stream of `StreamItem`s to completion.
///
/// Returns every value in order, or the first error. Draining a stream that
/// already terminated yields an empty `Vec`.
pub async fn drain<S, T>(stream: S) -> Result<Vec<T>>
where
    S: Stream<Item = StreamItem<T>>,
{
    let mut stream = pin!(stream);
    let mut values = Vec::new();

    while let Some(item) = stream.next().await {
        match item {
            StreamItem::Value(value) => values.push(value),
            StreamItem::Error(e) => return Err(e),
        }
    }

    Ok(values)
}
