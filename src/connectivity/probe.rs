use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Confirms the internet is actually reachable.
#[async_trait]
pub trait ReachabilityProbe: Debug + Send + Sync {
    async fn probe(&self) -> Result<(), ProbeError>;
}

/// Every way a probe can fail. All of them mean disconnected.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ProbeError {
    #[error("no answer within {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
}

/// Sends a `HEAD` request to a well-known endpoint.
#[derive(Debug)]
pub struct HttpProbe {
    client: Client,
    url: String,
}

impl HttpProbe {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        HttpProbe { client, url: url.into() }
    }
}

#[async_trait]
impl ReachabilityProbe for HttpProbe {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn probe(&self) -> Result<(), ProbeError> {
        let response = self.client.head(&self.url).send().await.map_err(|e| ProbeError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(status = %status, "Probe answered");
        if status.is_success() {
            Ok(())
        } else {
            Err(ProbeError::Status(status.as_u16()))
        }
    }
}
