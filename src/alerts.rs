use crate::domain::Alert;
use std::fmt::Debug;
use tracing::{info, warn};

/// Where user-visible alerts go. Fire-and-forget, nothing is acknowledged.
pub trait AlertSink: Debug + Send + Sync {
    fn notify(&self, alert: &Alert);
}

#[derive(Debug, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn notify(&self, alert: &Alert) {
        match alert {
            Alert::PermissionDenied
            | Alert::PositionUnavailable(_)
            | Alert::TrackingStartFailed(_)
            | Alert::ConnectionLost
            | Alert::MapUnavailable(_) => warn!("🔔 {}", alert),
            Alert::TrackingStarted | Alert::TrackingStopped | Alert::ConnectionRestored => info!("🔔 {}", alert),
        }
    }
}
