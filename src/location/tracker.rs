use crate::domain::{AccuracyHint, Position};
use crate::location::provider::{LocationProvider, PositionError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, instrument, trace, warn};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WatchOptions {
    pub accuracy: AccuracyHint,
    /// Lower bound between two readings, the provider may deliver less often.
    pub min_interval: Duration,
    /// Readings closer than this to the last delivered one are dropped.
    pub min_distance_m: f64,
}

#[derive(Error, Clone, Debug, PartialEq)]
pub enum TrackingError {
    #[error("location permission has not been granted")]
    PermissionDenied,
    #[error("invalid watch options: {0}")]
    InvalidOptions(String),
}

/// Handle of a running position feed. Dropping it stops the feed.
#[derive(Debug)]
struct TrackingSubscription {
    id: u64,
    feed: JoinHandle<()>,
}

impl Drop for TrackingSubscription {
    fn drop(&mut self) {
        self.feed.abort();
    }
}

/// Owns the one position feed of a screen.
#[derive(Debug)]
pub struct Tracker {
    provider: Arc<dyn LocationProvider>,
    subscription: Option<TrackingSubscription>,
    next_id: u64,
}

impl Tracker {
    pub fn new(provider: Arc<dyn LocationProvider>) -> Self {
        Tracker {
            provider,
            subscription: None,
            next_id: 1,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.subscription.as_ref().is_some_and(|s| !s.feed.is_finished())
    }

    /// Starts delivering readings to `tx`, replacing any feed that is already running. Returns
    /// without waiting for the provider. A feed that loses permission sends
    /// `TrackingError::PermissionDenied` and ends.
    #[instrument(skip(self, tx))]
    pub fn start_watching(&mut self, options: WatchOptions, tx: Sender<Result<Position, TrackingError>>) -> Result<(), TrackingError> {
        if options.min_interval.is_zero() {
            return Err(TrackingError::InvalidOptions("minimum interval must be positive".to_string()));
        }

        if !(options.min_distance_m.is_finite() && options.min_distance_m >= 0.0) {
            return Err(TrackingError::InvalidOptions(format!("invalid minimum distance {}", options.min_distance_m)));
        }

        self.stop();

        let id = self.next_id;
        self.next_id += 1;

        let provider = self.provider.clone();
        let feed = tokio::spawn(async move {
            feed(id, provider, options, tx).await;
        });

        self.subscription = Some(TrackingSubscription { id, feed });
        info!(subscription = id, "🛰️ Started position feed");
        Ok(())
    }

    /// Stops the running feed, if any.
    pub fn stop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            info!(subscription = subscription.id, "🛰️ Stopped position feed");
        }
    }
}

#[instrument(skip(provider, options, tx))]
async fn feed(id: u64, provider: Arc<dyn LocationProvider>, options: WatchOptions, tx: Sender<Result<Position, TrackingError>>) {
    let mut last: Option<Position> = None;
    let mut ticker = interval(options.min_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await; // The first tick completes immediately

        let position = match provider.current_position(options.accuracy).await {
            Ok(position) => position,
            Err(PositionError::PermissionDenied) => {
                warn!("🛰️ Position feed ended, permission denied");
                let _ = tx.send(Err(TrackingError::PermissionDenied)).await;
                return;
            }
            Err(e) => {
                warn!("⚠️ Skipping position reading: {}", e);
                continue;
            }
        };

        if let Some(previous) = last {
            let moved = previous.distance_to(&position);
            if moved < options.min_distance_m {
                trace!(moved, "Skipping position, moved less than {} m", options.min_distance_m);
                continue;
            }
        }

        last = Some(position);
        debug!(latitude = position.latitude(), longitude = position.longitude(), "🛰️ New position");
        if tx.send(Ok(position)).await.is_err() {
            debug!("🛰️ Position feed ended, nobody is listening");
            return;
        }
    }
}
