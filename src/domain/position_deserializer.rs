use crate::domain::Position;
use serde::de::Error;
use serde::{Deserialize, Deserializer};

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Debug, Deserialize)]
        pub struct Inner {
            latitude: f64,
            longitude: f64,
            accuracy_m: Option<f64>,
        }

        let inner = Inner::deserialize(deserializer)?;
        Position::new(inner.latitude, inner.longitude, inner.accuracy_m).map_err(|e| Error::custom(format!("invalid location {}", e)))
    }
}
