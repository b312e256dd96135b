//! # Progressive Stream
//!
//! Exposes a fetch run as an ordered, finite sequence of [`FetchEvent`]s. The
//! run is driven by its own task and pushes events into a channel, so a
//! consumer that disconnects early does not stop the fetch.

use super::events::FetchEvent;
use super::paginator::{FetchRequest, FetchRun};
use crate::source::ReviewSource;
use futures::Stream;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Starts a run on a background task and returns the receiving end of its
/// event channel.
///
/// The task keeps fetching after the receiver is dropped; only the events are
/// discarded.
pub fn spawn_event_stream(
    source: Arc<dyn ReviewSource>,
    request: FetchRequest,
) -> mpsc::UnboundedReceiver<FetchEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut run = FetchRun::new(source, request);
        let mut detached = false;
        while let Some(event) = run.next_event().await {
            if detached {
                continue;
            }
            if tx.send(event).is_err() {
                debug!("Stream consumer went away; finishing the run without it.");
                detached = true;
            }
        }
    });
    rx
}

/// Drives a run inline as a `Stream`, without a background task.
///
/// Dropping the stream drops the run, so use [`spawn_event_stream`] when the
/// fetch must outlive its consumer.
pub fn event_stream(run: FetchRun) -> impl Stream<Item = FetchEvent> {
    futures::stream::unfold(run, |mut run| async move {
        run.next_event().await.map(|event| (event, run))
    })
}
