use crate::connectivity::interfaces::{InterfaceError, InterfaceState, NetworkInterfaces};
use async_trait::async_trait;
use futures::stream::FuturesUnordered;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReadDirStream;
use tracing::{debug, info, instrument, warn};

const LOOPBACK: &str = "lo";

/// Reads interface state from `/sys/class/net`. Linux has no change notification there, so
/// a watcher polls and publishes changes.
#[derive(Debug)]
pub struct SysfsInterfaces {
    path: PathBuf,
    rx: watch::Receiver<InterfaceState>,
    watcher: JoinHandle<()>,
}

impl SysfsInterfaces {
    pub async fn start(path: impl Into<PathBuf>, poll_interval: Duration) -> Self {
        let path = path.into();
        let initial = read_state(&path).await.unwrap_or(InterfaceState::Inactive);
        let (tx, rx) = watch::channel(initial);

        let watcher_path = path.clone();
        let watcher = tokio::spawn(async move {
            watch_interfaces(watcher_path, poll_interval, tx).await;
        });

        info!(path = %path.display(), ?initial, "🔌 Watching network interfaces");
        SysfsInterfaces { path, rx, watcher }
    }
}

impl Drop for SysfsInterfaces {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

#[async_trait]
impl NetworkInterfaces for SysfsInterfaces {
    async fn current_state(&self) -> Result<InterfaceState, InterfaceError> {
        read_state(&self.path).await
    }

    fn subscribe(&self) -> watch::Receiver<InterfaceState> {
        self.rx.clone()
    }
}

#[instrument(skip(tx))]
async fn watch_interfaces(path: PathBuf, poll_interval: Duration, tx: watch::Sender<InterfaceState>) {
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let state = read_state(&path).await.unwrap_or_else(|e| {
            warn!("⚠️ {}", e);
            InterfaceState::Inactive
        });

        let changed = tx.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            *current = state;
            true
        });

        if changed {
            info!(?state, "🔌 Network interfaces changed");
        }
    }
}

/// Active when any interface other than loopback reports `up`.
async fn read_state(path: &Path) -> Result<InterfaceState, InterfaceError> {
    let mut interfaces = Vec::new();
    let mut entries = ReadDirStream::new(fs::read_dir(path).await?);
    while let Some(entry) = entries.next().await {
        match entry {
            Ok(entry) if entry.file_name() != LOOPBACK => interfaces.push(entry.path()),
            Ok(_) => {}
            Err(err) => warn!("⚠️ Unable to read interface entry: {}", err),
        }
    }

    let mut operstates = FuturesUnordered::from_iter(interfaces.into_iter().map(|interface| async move {
        let operstate = fs::read_to_string(interface.join("operstate")).await;
        (interface, operstate)
    }));

    while let Some((interface, operstate)) = operstates.next().await {
        match operstate {
            Ok(operstate) if operstate.trim() == "up" => {
                debug!(interface = %interface.display(), "Interface is up");
                return Ok(InterfaceState::Active);
            }
            Ok(_) => {}
            Err(err) => debug!(interface = %interface.display(), "Unable to read operstate: {}", err),
        }
    }

    Ok(InterfaceState::Inactive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::io;

    async fn fake_sysfs(name: &str, interfaces: &[(&str, &str)]) -> io::Result<PathBuf> {
        let root = temp_dir().join(format!("pinpoint_sysfs_{}", name));
        let _ = fs::remove_dir_all(&root).await;
        for (interface, operstate) in interfaces {
            fs::create_dir_all(root.join(interface)).await?;
            fs::write(root.join(interface).join("operstate"), format!("{}\n", operstate)).await?;
        }
        fs::create_dir_all(&root).await?;
        Ok(root)
    }

    #[tokio::test]
    async fn active_when_an_interface_is_up() -> Result<(), InterfaceError> {
        let root = fake_sysfs("up", &[("lo", "unknown"), ("eth0", "down"), ("wlan0", "up")]).await?;

        assert_eq!(read_state(&root).await?, InterfaceState::Active);
        Ok(())
    }

    #[tokio::test]
    async fn inactive_when_only_loopback_is_up() -> Result<(), InterfaceError> {
        let root = fake_sysfs("loopback", &[("lo", "up"), ("eth0", "down")]).await?;

        assert_eq!(read_state(&root).await?, InterfaceState::Inactive);
        Ok(())
    }

    #[tokio::test]
    async fn inactive_without_interfaces() -> Result<(), InterfaceError> {
        let root = fake_sysfs("empty", &[]).await?;

        assert_eq!(read_state(&root).await?, InterfaceState::Inactive);
        Ok(())
    }

    #[tokio::test]
    async fn fails_for_a_missing_directory() {
        let result = read_state(&temp_dir().join("pinpoint_sysfs_does_not_exist")).await;

        assert!(matches!(result, Err(InterfaceError::Io(_))));
    }

    #[tokio::test]
    async fn publishes_changes() -> Result<(), InterfaceError> {
        let root = fake_sysfs("changes", &[("eth0", "down")]).await?;
        let interfaces = SysfsInterfaces::start(&root, Duration::from_millis(10)).await;
        let mut rx = interfaces.subscribe();
        assert_eq!(*rx.borrow(), InterfaceState::Inactive);

        fs::write(root.join("eth0").join("operstate"), "up\n").await?;
        rx.changed().await.unwrap();

        assert_eq!(*rx.borrow_and_update(), InterfaceState::Active);
        assert_eq!(interfaces.current_state().await?, InterfaceState::Active);
        Ok(())
    }
}
