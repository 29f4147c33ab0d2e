use thiserror::Error;

/// Everything that can go wrong on the screen. None of these end the program, they end up
/// in the screen state and as an alert.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ScreenError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
    #[error("tracking could not be started: {0}")]
    TrackingStartFailed(String),
    #[error("network unreachable: {0}")]
    ProbeFailed(String),
}
