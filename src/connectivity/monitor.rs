use crate::alerts::AlertSink;
use crate::app_config::Connectivity;
use crate::connectivity::interfaces::{InterfaceState, NetworkInterfaces};
use crate::connectivity::probe::{ProbeError, ReachabilityProbe};
use crate::domain::{Alert, ConnectivityReport, ConnectivityStatus};
use chrono::Utc;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval, timeout};
use tracing::{debug, info, instrument, warn};

const NO_INTERFACE: &str = "no active network interface";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorState {
    Unknown,
    Checking,
    Connected,
    Disconnected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitorSettings {
    pub poll_interval: Duration,
    pub probe_timeout: Duration,
}

impl From<&Connectivity> for MonitorSettings {
    fn from(config: &Connectivity) -> Self {
        MonitorSettings {
            poll_interval: config.poll_interval(),
            probe_timeout: config.probe_timeout(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trigger {
    Timer,
    InterfaceChanged(InterfaceState),
    Manual,
}

/// Tells whether the internet is reachable. An active interface alone is not enough: when
/// one is up, a reachability probe has the final word.
///
/// Checks run when the monitor starts, on every poll interval, on every interface change
/// and on request. Only the latest check counts, a newer check abandons the probe of an
/// older one. Dropping the monitor stops everything it started.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    report_rx: watch::Receiver<ConnectivityReport>,
    state_rx: watch::Receiver<MonitorState>,
    verify_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl ConnectivityMonitor {
    pub fn start(
        interfaces: Arc<dyn NetworkInterfaces>,
        probe: Arc<dyn ReachabilityProbe>,
        alerts: Arc<dyn AlertSink>,
        settings: MonitorSettings,
    ) -> Self {
        let (report_tx, report_rx) = watch::channel(ConnectivityReport::default());
        let (state_tx, state_rx) = watch::channel(MonitorState::Unknown);
        let (verify_tx, verify_rx) = mpsc::channel(1);

        let run_loop = RunLoop {
            interfaces,
            probe,
            alerts,
            settings,
            report_tx,
            state_tx,
            latest_check: 0,
        };
        let task = tokio::spawn(run_loop.run(verify_rx));

        ConnectivityMonitor {
            report_rx,
            state_rx,
            verify_tx,
            task,
        }
    }

    pub fn report(&self) -> ConnectivityReport {
        self.report_rx.borrow().clone()
    }

    pub fn state(&self) -> MonitorState {
        *self.state_rx.borrow()
    }

    /// Notified once for every completed check, also when the status did not change.
    pub fn subscribe(&self) -> watch::Receiver<ConnectivityReport> {
        self.report_rx.clone()
    }

    /// Requests an extra check.
    pub fn verify(&self) {
        // A full queue means a check is already pending
        if self.verify_tx.try_send(()).is_err() {
            debug!("🌐 Verification already pending");
        }
    }

    /// Stops the poll timer, unsubscribes from interface changes and abandons a running probe.
    pub fn shutdown(self) {
        info!("🌐 Stopping connectivity monitor...");
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.task.abort();
        debug!("🌐 Connectivity monitor stopped");
    }
}

struct RunLoop {
    interfaces: Arc<dyn NetworkInterfaces>,
    probe: Arc<dyn ReachabilityProbe>,
    alerts: Arc<dyn AlertSink>,
    settings: MonitorSettings,
    report_tx: watch::Sender<ConnectivityReport>,
    state_tx: watch::Sender<MonitorState>,
    latest_check: u64,
}

type InFlightProbe = BoxFuture<'static, (u64, Result<(), ProbeError>)>;

impl RunLoop {
    #[instrument(name = "connectivity_monitor", skip_all)]
    async fn run(mut self, mut verify_rx: mpsc::Receiver<()>) {
        info!("🌐 Starting connectivity monitor...");
        let mut interface_rx = self.interfaces.subscribe();
        let mut interface_events = true;

        // The first tick completes right away, which is the initial check
        let mut ticker = interval(self.settings.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut in_flight: Option<InFlightProbe> = None;

        loop {
            let trigger = tokio::select! {
                _ = ticker.tick() => Trigger::Timer,
                changed = interface_rx.changed(), if interface_events => match changed {
                    Ok(()) => {
                        let state = *interface_rx.borrow_and_update();
                        Trigger::InterfaceChanged(state)
                    }
                    Err(_) => {
                        warn!("⚠️ Interface change events ended, relying on the poll interval");
                        interface_events = false;
                        continue;
                    }
                },
                Some(()) = verify_rx.recv() => Trigger::Manual,
                (check_id, result) = wait_for(&mut in_flight) => {
                    in_flight = None;
                    self.complete_probe(check_id, result);
                    continue;
                }
            };

            // Whatever was still in flight belongs to an older check
            if in_flight.take().is_some() {
                debug!("🌐 Abandoning probe of check {}", self.latest_check);
            }

            in_flight = self.check(trigger).await;
        }
    }

    /// Starts a new check, returns the probe to wait for if one is needed.
    #[instrument(skip(self), fields(check_id = self.latest_check + 1))]
    async fn check(&mut self, trigger: Trigger) -> Option<InFlightProbe> {
        self.latest_check += 1;
        let check_id = self.latest_check;
        self.state_tx.send_replace(MonitorState::Checking);
        debug!("🌐 Checking connectivity...");

        let interface_state = match trigger {
            Trigger::InterfaceChanged(InterfaceState::Inactive) => InterfaceState::Inactive,
            _ => self.interfaces.current_state().await.unwrap_or_else(|e| {
                warn!("⚠️ {}", e);
                InterfaceState::Inactive
            }),
        };

        if interface_state == InterfaceState::Inactive {
            self.complete(check_id, ConnectivityReport::disconnected(NO_INTERFACE, Utc::now()));
            return None;
        }

        let probe = self.probe.clone();
        let probe_timeout = self.settings.probe_timeout;
        Some(Box::pin(async move {
            let result = match timeout(probe_timeout, probe.probe()).await {
                Ok(result) => result,
                Err(_) => Err(ProbeError::Timeout(probe_timeout)),
            };
            (check_id, result)
        }))
    }

    fn complete_probe(&mut self, check_id: u64, result: Result<(), ProbeError>) {
        let report = match result {
            Ok(()) => ConnectivityReport::connected(Utc::now()),
            Err(e) => {
                debug!(check_id, "🌐 Probe failed: {}", e);
                ConnectivityReport::disconnected(e.to_string(), Utc::now())
            }
        };
        self.complete(check_id, report);
    }

    fn complete(&mut self, check_id: u64, report: ConnectivityReport) {
        if check_id != self.latest_check {
            debug!(check_id, latest_check = self.latest_check, "🌐 Discarding result of a superseded check");
            return;
        }

        let previous = self.report_tx.borrow().status();
        let status = report.status();
        info!(check_id, %status, "🌐 Checking connectivity... {}", status);

        self.state_tx.send_replace(match status {
            ConnectivityStatus::Connected => MonitorState::Connected,
            _ => MonitorState::Disconnected,
        });
        self.report_tx.send_replace(report);

        if status != previous {
            match status {
                ConnectivityStatus::Connected => self.alerts.notify(&Alert::ConnectionRestored),
                ConnectivityStatus::Disconnected => self.alerts.notify(&Alert::ConnectionLost),
                ConnectivityStatus::Unknown => {}
            }
        }
    }
}

async fn wait_for(probe: &mut Option<InFlightProbe>) -> (u64, Result<(), ProbeError>) {
    match probe {
        Some(probe) => probe.await,
        None => std::future::pending().await,
    }
}
