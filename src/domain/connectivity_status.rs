use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectivityStatus {
    #[default]
    Unknown,
    Connected,
    Disconnected,
}

impl Display for ConnectivityStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectivityStatus::Unknown => write!(f, "unknown"),
            ConnectivityStatus::Connected => write!(f, "connected"),
            ConnectivityStatus::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Outcome of the latest completed connectivity check. Status and timestamp are only ever
/// replaced together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectivityReport {
    status: ConnectivityStatus,
    checked_at: Option<DateTime<Utc>>,
    reason: Option<String>,
}

impl ConnectivityReport {
    pub fn connected(checked_at: DateTime<Utc>) -> Self {
        ConnectivityReport {
            status: ConnectivityStatus::Connected,
            checked_at: Some(checked_at),
            reason: None,
        }
    }

    pub fn disconnected(reason: impl Into<String>, checked_at: DateTime<Utc>) -> Self {
        ConnectivityReport {
            status: ConnectivityStatus::Disconnected,
            checked_at: Some(checked_at),
            reason: Some(reason.into()),
        }
    }

    pub fn status(&self) -> ConnectivityStatus {
        self.status
    }

    pub fn checked_at(&self) -> Option<DateTime<Utc>> {
        self.checked_at
    }

    /// Why the last check ended up disconnected.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}
