use crate::domain::{AccuracyHint, Position};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// The device's location service. Permission must have been granted before any position is
/// requested, a denial is final for the session.
#[async_trait]
pub trait LocationProvider: Debug + Send + Sync {
    async fn request_permission(&self) -> Permission;

    async fn current_position(&self, accuracy: AccuracyHint) -> Result<Position, PositionError>;
}

#[derive(Error, Clone, Debug, PartialEq)]
pub enum PositionError {
    #[error("location permission has not been granted")]
    PermissionDenied,
    #[error("location provider timed out")]
    Timeout,
    #[error("location provider failed: {0}")]
    Provider(String),
}
