use crate::domain::{AccuracyHint, Position};
use crate::location::provider::{LocationProvider, Permission, PositionError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, instrument, warn};

/// Resolves the position through an IP geolocation service. No OS permission is involved,
/// so permission is always granted.
#[derive(Debug)]
pub struct IpLocationProvider {
    client: Client,
    url: String,
    request_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lon: f64,
    accuracy: Option<f64>,
}

impl IpLocationProvider {
    pub fn new(client: Client, url: impl Into<String>, request_timeout: Duration) -> Self {
        IpLocationProvider {
            client,
            url: url.into(),
            request_timeout,
        }
    }

    async fn lookup(&self) -> Result<Position, PositionError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| PositionError::Provider(e.to_string()))?;

        let body = response.json::<LookupResponse>().await.map_err(|e| PositionError::Provider(e.to_string()))?;
        Position::new(body.lat, body.lon, body.accuracy).map_err(|e| PositionError::Provider(e.to_string()))
    }
}

#[async_trait]
impl LocationProvider for IpLocationProvider {
    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn current_position(&self, _accuracy: AccuracyHint) -> Result<Position, PositionError> {
        info!("🌍 Looking up position...");
        match timeout(self.request_timeout, self.lookup()).await {
            Ok(Ok(position)) => {
                info!(latitude = position.latitude(), longitude = position.longitude(), "🌍 Looking up position... OK");
                Ok(position)
            }
            Ok(Err(e)) => {
                warn!("🌍 Looking up position... failed, {}", e);
                Err(e)
            }
            Err(_) => {
                warn!("⏳ Looking up position... no answer within {:?}", self.request_timeout);
                Err(PositionError::Timeout)
            }
        }
    }
}
