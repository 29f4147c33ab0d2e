use crate::domain::{AccuracyHint, Position};
use config::{Config, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    location: Location,
    map: Map,
    connectivity: Connectivity,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    pub fn load_from(name: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name(name).required(true))
            .add_source(config::File::with_name(&format!("{}_local", name)).required(false))
            .add_source(config::Environment::with_prefix("PINPOINT").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    log_level: String,
    command_buffer_size: usize,
}

impl Core {
    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }

    pub fn command_buffer_size(&self) -> usize {
        self.command_buffer_size
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Static,
    Ip,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    provider: ProviderKind,
    #[serde(default = "default_true")]
    permission_granted: bool,
    static_position: Option<Position>,
    ip_lookup_url: String,
    #[serde(with = "humantime_serde")]
    request_timeout: Duration,
    #[serde(default)]
    accuracy: AccuracyHint,
    #[serde(with = "humantime_serde")]
    watch_min_interval: Duration,
    watch_min_distance_m: f64,
}

impl Location {
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn permission_granted(&self) -> bool {
        self.permission_granted
    }

    pub fn static_position(&self) -> Option<Position> {
        self.static_position
    }

    pub fn ip_lookup_url(&self) -> &str {
        &self.ip_lookup_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn accuracy(&self) -> AccuracyHint {
        self.accuracy
    }

    pub fn watch_min_interval(&self) -> Duration {
        self.watch_min_interval
    }

    pub fn watch_min_distance_m(&self) -> f64 {
        self.watch_min_distance_m
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Web,
    Native,
}

#[derive(Debug, Deserialize)]
pub struct Map {
    surface: SurfaceKind,
    zoom: u8,
    tile_url: String,
    attribution: String,
    output_path: PathBuf,
}

impl Map {
    pub fn surface(&self) -> SurfaceKind {
        self.surface
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn tile_url(&self) -> &str {
        &self.tile_url
    }

    pub fn attribution(&self) -> &str {
        &self.attribution
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Connectivity {
    probe_url: String,
    #[serde(with = "humantime_serde")]
    probe_timeout: Duration,
    #[serde(with = "humantime_serde")]
    poll_interval: Duration,
    interfaces_path: PathBuf,
    #[serde(with = "humantime_serde")]
    interfaces_poll_interval: Duration,
}

impl Connectivity {
    pub fn probe_url(&self) -> &str {
        &self.probe_url
    }

    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn interfaces_path(&self) -> &Path {
        &self.interfaces_path
    }

    pub fn interfaces_poll_interval(&self) -> Duration {
        self.interfaces_poll_interval
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    log_level: "debug".to_string(),
                    command_buffer_size: 8,
                },
                location: Location {
                    provider: ProviderKind::Static,
                    permission_granted: true,
                    static_position: Some(Position::new(40.4168, -3.7038, Some(5.0)).unwrap()),
                    ip_lookup_url: "https://ip.url/json".to_string(),
                    request_timeout: Duration::from_secs(10),
                    accuracy: AccuracyHint::High,
                    watch_min_interval: Duration::from_secs(5),
                    watch_min_distance_m: 10.0,
                },
                map: Map {
                    surface: SurfaceKind::Native,
                    zoom: 15,
                    tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
                    attribution: "&copy; OpenStreetMap contributors".to_string(),
                    output_path: std::env::temp_dir().join("pinpoint_map.html"),
                },
                connectivity: Connectivity {
                    probe_url: "https://probe.url/".to_string(),
                    probe_timeout: Duration::from_secs(5),
                    poll_interval: Duration::from_secs(30),
                    interfaces_path: PathBuf::from("/sys/class/net"),
                    interfaces_poll_interval: Duration::from_secs(2),
                },
            },
        }
    }

    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.config.map.output_path = path;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_the_bundled_configuration() -> Result<(), ConfigError> {
        let config = AppConfig::load_from(concat!(env!("CARGO_MANIFEST_DIR"), "/config"))?;

        assert_eq!(config.core().log_level(), tracing::Level::INFO);
        assert_eq!(config.location().provider(), ProviderKind::Static);
        assert_eq!(config.location().accuracy(), AccuracyHint::High);
        assert_eq!(config.location().static_position(), Some(Position::new(40.4168, -3.7038, Some(5.0)).unwrap()));
        assert_eq!(config.map().surface(), SurfaceKind::Web);
        assert_eq!(config.connectivity().probe_timeout(), Duration::from_secs(5));
        assert_eq!(config.connectivity().poll_interval(), Duration::from_secs(30));
        Ok(())
    }

    #[test]
    fn unknown_log_levels_fall_back_to_info() {
        let core = Core {
            log_level: "chatty".to_string(),
            command_buffer_size: 1,
        };

        assert_eq!(core.log_level(), tracing::Level::INFO);
    }
}
