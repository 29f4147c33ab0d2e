use crate::domain::{ConnectivityReport, ConnectivityStatus, Position, ScreenError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionState {
    #[default]
    Pending,
    Granted,
    Denied,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PositionState {
    #[default]
    Loading,
    Ready(Position),
    Failed(ScreenError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MapState {
    #[default]
    Hidden,
    Interactive,
    Placeholder,
}

/// Everything the location screen shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScreenState {
    pub permission: PermissionState,
    pub position: PositionState,
    pub tracking: bool,
    pub tracking_error: Option<ScreenError>,
    pub connectivity: ConnectivityReport,
    pub map: MapState,
    /// Id of the most recent position fetch, older results are discarded.
    pub latest_fetch: u64,
}

impl ScreenState {
    pub fn position(&self) -> Option<&Position> {
        match &self.position {
            PositionState::Ready(position) => Some(position),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.position, PositionState::Loading)
    }

    pub fn error(&self) -> Option<&ScreenError> {
        match &self.position {
            PositionState::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn connectivity_error(&self) -> Option<ScreenError> {
        match self.connectivity.status() {
            ConnectivityStatus::Disconnected => Some(ScreenError::ProbeFailed(self.connectivity.reason().unwrap_or("unknown").to_string())),
            _ => None,
        }
    }
}
