use crate::domain::{Alert, ConnectivityReport, Position, ScreenError};
use crate::location::{Permission, PositionError, TrackingError};
use crate::screen::state::{MapState, PermissionState, PositionState, ScreenState};

/// Something that happened: a user command or an adapter reporting back.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Mounted,
    Refresh,
    ToggleTracking,
    Center,
    VerifyConnection,
    PermissionResolved(Permission),
    PositionFetched(u64, Position),
    PositionFailed(u64, PositionError),
    PositionUpdated(Position),
    TrackingStarted,
    TrackingFailed(TrackingError),
    MapRendered,
    MapFailed(String),
    ConnectivityChanged(ConnectivityReport),
}

/// Work the screen asks its adapters to do.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    RequestPermission,
    FetchPosition(u64),
    StartTracking,
    StopTracking,
    RenderMap(Position),
    RecenterMap(Position),
    VerifyConnection,
    Notify(Alert),
}

pub fn reduce(state: &ScreenState, action: Action) -> (ScreenState, Vec<Effect>) {
    let mut next = state.clone();

    let effects = match action {
        Action::Mounted => {
            next.permission = PermissionState::Pending;
            next.position = PositionState::Loading;
            vec![Effect::RequestPermission]
        }
        Action::PermissionResolved(Permission::Granted) => {
            next.permission = PermissionState::Granted;
            vec![fetch(&mut next)]
        }
        Action::PermissionResolved(Permission::Denied) => {
            deny(&mut next);
            vec![Effect::Notify(Alert::PermissionDenied)]
        }
        Action::Refresh => match state.permission {
            PermissionState::Granted => vec![fetch(&mut next)],
            PermissionState::Denied => vec![Effect::Notify(Alert::PermissionDenied)],
            PermissionState::Pending => vec![],
        },
        Action::PositionFetched(id, _) | Action::PositionFailed(id, _) if id != state.latest_fetch => vec![],
        Action::PositionFetched(_, position) => {
            next.position = PositionState::Ready(position);
            vec![Effect::RenderMap(position)]
        }
        Action::PositionFailed(_, PositionError::PermissionDenied) => {
            deny(&mut next);
            if next.tracking {
                next.tracking = false;
                vec![Effect::StopTracking, Effect::Notify(Alert::PermissionDenied)]
            } else {
                vec![Effect::Notify(Alert::PermissionDenied)]
            }
        }
        Action::PositionFailed(_, error) => {
            let reason = error.to_string();
            next.position = PositionState::Failed(ScreenError::PositionUnavailable(reason.clone()));
            vec![Effect::Notify(Alert::PositionUnavailable(reason))]
        }
        Action::ToggleTracking if state.tracking => {
            next.tracking = false;
            vec![Effect::StopTracking, Effect::Notify(Alert::TrackingStopped)]
        }
        Action::ToggleTracking => match state.permission {
            PermissionState::Granted => vec![Effect::StartTracking],
            PermissionState::Denied => vec![Effect::Notify(Alert::PermissionDenied)],
            PermissionState::Pending => vec![],
        },
        Action::TrackingStarted => {
            next.tracking = true;
            next.tracking_error = None;
            vec![Effect::Notify(Alert::TrackingStarted)]
        }
        Action::TrackingFailed(error) => {
            let reason = error.to_string();
            next.tracking = false;
            next.tracking_error = Some(ScreenError::TrackingStartFailed(reason.clone()));
            vec![Effect::Notify(Alert::TrackingStartFailed(reason))]
        }
        Action::PositionUpdated(position) if state.tracking => {
            // A live reading supersedes any fetch still in flight
            next.latest_fetch += 1;
            next.position = PositionState::Ready(position);
            vec![Effect::RenderMap(position)]
        }
        // Left over from a feed that has been stopped
        Action::PositionUpdated(_) => vec![],
        Action::Center => match (state.position(), state.map) {
            (Some(position), MapState::Interactive) => vec![Effect::RecenterMap(*position)],
            _ => vec![],
        },
        Action::MapRendered => {
            next.map = MapState::Interactive;
            vec![]
        }
        Action::MapFailed(reason) => {
            next.map = MapState::Placeholder;
            if state.map == MapState::Placeholder {
                vec![]
            } else {
                vec![Effect::Notify(Alert::MapUnavailable(reason))]
            }
        }
        Action::VerifyConnection => vec![Effect::VerifyConnection],
        Action::ConnectivityChanged(report) => {
            next.connectivity = report;
            vec![]
        }
    };

    (next, effects)
}

fn fetch(state: &mut ScreenState) -> Effect {
    state.latest_fetch += 1;
    state.position = PositionState::Loading;
    Effect::FetchPosition(state.latest_fetch)
}

fn deny(state: &mut ScreenState) {
    state.permission = PermissionState::Denied;
    state.position = PositionState::Failed(ScreenError::PermissionDenied);
    state.map = MapState::Hidden;
}
