//! Wholesale occupancy recount on booking change events.
//!
//! The schedule screen shows live "N booked" counts per class. Change
//! events only say that *something* changed; the tracker never applies
//! deltas. Every event re-issues the batched counts query and replaces the
//! whole map, so duplicated, reordered, or coalesced events cannot drift
//! the counts. A periodic tick backs up the event stream.

#![allow(async_fn_in_trait)]

use std::collections::HashMap;
use std::time::Duration;

use futures::{Stream, StreamExt as _};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use gymbros_domain::id::ClassId;

/// A change notification from the bookings table. The payload is
/// deliberately not trusted for counting; any kind triggers the same
/// wholesale refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingChange {
    Inserted,
    Updated,
    Deleted,
}

/// Batched occupancy query: live-booking counts for the given class ids.
/// Ids absent from the result have zero live bookings.
pub trait OccupancyApi {
    async fn live_counts(
        &self,
        class_ids: &[ClassId],
    ) -> Result<HashMap<ClassId, u32>, anyhow::Error>;
}

/// Read side handed to the UI. Missing ids read as 0.
#[derive(Debug, Clone)]
pub struct OccupancyView {
    rx: watch::Receiver<HashMap<ClassId, u32>>,
}

impl OccupancyView {
    pub fn count(&self, class_id: ClassId) -> u32 {
        self.rx.borrow().get(&class_id).copied().unwrap_or(0)
    }

    /// Wait for the next published map (test and UI-notification hook).
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecountConfig {
    /// Backup refresh period when no events arrive.
    pub refresh_interval: Duration,
}

impl Default for RecountConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(30),
        }
    }
}

pub struct OccupancyTracker<A> {
    api: A,
    visible: Vec<ClassId>,
    config: RecountConfig,
    counts_tx: watch::Sender<HashMap<ClassId, u32>>,
}

impl<A: OccupancyApi> OccupancyTracker<A> {
    /// `visible` is the set of class ids on screen; only their counts are
    /// queried and published.
    pub fn new(api: A, visible: Vec<ClassId>, config: RecountConfig) -> (Self, OccupancyView) {
        let (counts_tx, rx) = watch::channel(HashMap::new());
        (
            Self {
                api,
                visible,
                config,
                counts_tx,
            },
            OccupancyView { rx },
        )
    }

    /// Consume `changes` until the stream ends. The first interval tick
    /// fires immediately, so the initial counts load needs no event.
    pub async fn run(self, changes: impl Stream<Item = BookingChange>) {
        let mut changes = std::pin::pin!(changes);
        let mut tick = tokio::time::interval(self.config.refresh_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => self.refresh().await,
                change = changes.next() => match change {
                    Some(_) => self.refresh().await,
                    None => break,
                },
            }
        }
    }

    /// Re-issue the counts query and replace the published map. A failed
    /// query keeps the previous map; the next event or tick retries.
    async fn refresh(&self) {
        match self.api.live_counts(&self.visible).await {
            Ok(counts) => {
                let _ = self.counts_tx.send(counts);
            }
            Err(e) => {
                tracing::debug!(error = %e, "occupancy recount failed, keeping last counts");
            }
        }
    }
}
