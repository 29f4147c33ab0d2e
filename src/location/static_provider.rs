use crate::domain::{AccuracyHint, Position};
use crate::location::provider::{LocationProvider, Permission, PositionError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument};

/// Reports a fixed position, for machines without a positioning device.
#[derive(Debug)]
pub struct StaticLocationProvider {
    position: Position,
    permission_granted: bool,
    asked: AtomicBool,
}

impl StaticLocationProvider {
    pub fn new(position: Position, permission_granted: bool) -> Self {
        StaticLocationProvider {
            position,
            permission_granted,
            asked: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn request_permission(&self) -> Permission {
        self.asked.store(true, Ordering::SeqCst);
        if self.permission_granted { Permission::Granted } else { Permission::Denied }
    }

    #[instrument(skip(self))]
    async fn current_position(&self, _accuracy: AccuracyHint) -> Result<Position, PositionError> {
        if !self.permission_granted || !self.asked.load(Ordering::SeqCst) {
            return Err(PositionError::PermissionDenied);
        }

        debug!(latitude = self.position.latitude(), longitude = self.position.longitude(), "📍 Static position");
        Ok(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn madrid() -> Position {
        Position::new(40.4168, -3.7038, Some(5.0)).unwrap()
    }

    #[tokio::test]
    async fn returns_the_position_once_permission_is_granted() {
        let provider = StaticLocationProvider::new(madrid(), true);

        assert_eq!(provider.request_permission().await, Permission::Granted);
        assert_eq!(provider.current_position(AccuracyHint::High).await, Ok(madrid()));
    }

    #[tokio::test]
    async fn refuses_a_position_before_permission_is_requested() {
        let provider = StaticLocationProvider::new(madrid(), true);

        assert_eq!(provider.current_position(AccuracyHint::High).await, Err(PositionError::PermissionDenied));
    }

    #[tokio::test]
    async fn refuses_a_position_when_permission_is_denied() {
        let provider = StaticLocationProvider::new(madrid(), false);

        assert_eq!(provider.request_permission().await, Permission::Denied);
        assert_eq!(provider.current_position(AccuracyHint::Low).await, Err(PositionError::PermissionDenied));
    }
}
