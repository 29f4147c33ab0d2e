use crate::alerts::{AlertSink, LogAlertSink};
use crate::app_config::{AppConfig, ProviderKind, SurfaceKind};
use crate::command_reader::read_commands;
use crate::connectivity::{ConnectivityMonitor, HttpProbe, MonitorSettings, SysfsInterfaces};
use crate::location::{IpLocationProvider, LocationProvider, StaticLocationProvider, WatchOptions};
use crate::map::{MapSurface, NativeMapSurface, WebMapSurface};
use crate::screen::Screen;
use crate::view_listener::view_listener;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::{signal, task};
use tracing::info;

mod alerts;
mod app_config;
mod command_reader;
mod connectivity;
mod domain;
mod http_client;
mod location;
mod map;
mod screen;
#[cfg(test)]
mod test_support;
mod view_listener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    tracing_subscriber::fmt()
        .with_max_level(config.core().log_level())
        .with_writer(std::io::stderr)
        .init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    info!("✅  Loaded configuration");

    let client = http_client::new_client()?;
    let alerts: Arc<dyn AlertSink> = Arc::new(LogAlertSink);

    let location = config.location();
    let provider: Arc<dyn LocationProvider> = match location.provider() {
        ProviderKind::Static => {
            let position = location.static_position().ok_or("location.static_position is required for the static provider")?;
            Arc::new(StaticLocationProvider::new(position, location.permission_granted()))
        }
        ProviderKind::Ip => Arc::new(IpLocationProvider::new(client.clone(), location.ip_lookup_url(), location.request_timeout())),
    };
    info!(provider = ?location.provider(), "✅  Initialized location provider");

    let map: Box<dyn MapSurface> = match config.map().surface() {
        SurfaceKind::Web => Box::new(WebMapSurface::new(config.map())),
        SurfaceKind::Native => Box::new(NativeMapSurface::new(config.map().zoom())),
    };
    info!(surface = map.kind(), "✅  Initialized map surface");

    let connectivity = config.connectivity();
    let interfaces = Arc::new(SysfsInterfaces::start(connectivity.interfaces_path(), connectivity.interfaces_poll_interval()).await);
    let probe = Arc::new(HttpProbe::new(client, connectivity.probe_url()));
    let monitor = ConnectivityMonitor::start(interfaces, probe, alerts.clone(), MonitorSettings::from(connectivity));
    info!(state = ?monitor.state(), status = %monitor.report().status(), "✅  Started connectivity monitor");

    let screen = Screen::new(
        provider,
        map,
        monitor,
        alerts,
        WatchOptions {
            accuracy: location.accuracy(),
            min_interval: location.watch_min_interval(),
            min_distance_m: location.watch_min_distance_m(),
        },
    );

    let view_rx = screen.subscribe();
    task::spawn(async move {
        view_listener(view_rx).await;
    });

    let (commands_tx, commands_rx) = mpsc::channel(config.core().command_buffer_size());
    task::spawn(async move {
        read_commands(BufReader::new(tokio::io::stdin()), commands_tx).await;
    });
    info!("✅  Listening for commands: refresh, track, center, verify, quit");

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));
    tokio::select! {
        _ = screen.run(commands_rx) => {}
        _ = signal::ctrl_c() => info!("🛑 Interrupted"),
    }

    Ok(())
}
