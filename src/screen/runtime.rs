use crate::alerts::AlertSink;
use crate::connectivity::ConnectivityMonitor;
use crate::domain::{ConnectivityReport, Position};
use crate::location::{LocationProvider, Tracker, TrackingError, WatchOptions};
use crate::map::MapSurface;
use crate::screen::commands::UiCommand;
use crate::screen::reducer::{Action, Effect, reduce};
use crate::screen::state::ScreenState;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, trace};

const ACTION_BUFFER_SIZE: usize = 16;
const POSITION_BUFFER_SIZE: usize = 16;

/// Runs the location screen: feeds commands and adapter events through the reducer and
/// carries out the resulting effects. Everything the screen starts (position requests, the
/// tracking feed, the connectivity monitor) is owned here and released when it is dropped.
#[derive(Debug)]
pub struct Screen {
    state: ScreenState,
    provider: Arc<dyn LocationProvider>,
    tracker: Tracker,
    map: Box<dyn MapSurface>,
    monitor: ConnectivityMonitor,
    alerts: Arc<dyn AlertSink>,
    watch_options: WatchOptions,
    state_tx: watch::Sender<ScreenState>,
    actions_tx: mpsc::Sender<Action>,
    actions_rx: mpsc::Receiver<Action>,
    positions_tx: mpsc::Sender<Result<Position, TrackingError>>,
    positions_rx: mpsc::Receiver<Result<Position, TrackingError>>,
    connectivity_rx: watch::Receiver<ConnectivityReport>,
    requests: JoinSet<()>,
}

impl Screen {
    pub fn new(
        provider: Arc<dyn LocationProvider>,
        map: Box<dyn MapSurface>,
        monitor: ConnectivityMonitor,
        alerts: Arc<dyn AlertSink>,
        watch_options: WatchOptions,
    ) -> Self {
        let (state_tx, _) = watch::channel(ScreenState::default());
        let (actions_tx, actions_rx) = mpsc::channel(ACTION_BUFFER_SIZE);
        let (positions_tx, positions_rx) = mpsc::channel(POSITION_BUFFER_SIZE);
        let connectivity_rx = monitor.subscribe();

        Screen {
            state: ScreenState::default(),
            tracker: Tracker::new(provider.clone()),
            provider,
            map,
            monitor,
            alerts,
            watch_options,
            state_tx,
            actions_tx,
            actions_rx,
            positions_tx,
            positions_rx,
            connectivity_rx,
            requests: JoinSet::new(),
        }
    }

    /// Notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ScreenState> {
        self.state_tx.subscribe()
    }

    /// Runs until the user quits or the command channel closes.
    #[instrument(name = "screen", skip_all, fields(map = self.map.kind()))]
    pub async fn run(mut self, mut commands: mpsc::Receiver<UiCommand>) {
        info!("📱 Opening location screen...");
        self.dispatch(Action::Mounted).await;

        loop {
            let action = tokio::select! {
                command = commands.recv() => match command.and_then(UiCommand::action) {
                    Some(action) => action,
                    None => break,
                },
                Some(action) = self.actions_rx.recv() => action,
                Some(reading) = self.positions_rx.recv() => match reading {
                    Ok(position) => Action::PositionUpdated(position),
                    Err(e) => Action::TrackingFailed(e),
                },
                Ok(()) = self.connectivity_rx.changed() => {
                    let report = self.connectivity_rx.borrow_and_update().clone();
                    Action::ConnectivityChanged(report)
                }
            };

            self.dispatch(action).await;
        }

        info!("📱 Closing location screen");
    }

    pub async fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);

        while let Some(action) = queue.pop_front() {
            trace!(?action, "📱 Reducing action");
            let (state, effects) = reduce(&self.state, action);
            if state != self.state {
                self.state = state;
                self.state_tx.send_replace(self.state.clone());
            }

            for effect in effects {
                if let Some(follow_up) = self.run_effect(effect).await {
                    queue.push_back(follow_up);
                }
            }
        }
    }

    /// Effects that finish quickly run inline and may return the next action, slow ones are
    /// spawned and report back through the action channel.
    async fn run_effect(&mut self, effect: Effect) -> Option<Action> {
        debug!(?effect, "📱 Running effect");
        match effect {
            Effect::RequestPermission => {
                let provider = self.provider.clone();
                self.spawn_request(async move { Action::PermissionResolved(provider.request_permission().await) });
                None
            }
            Effect::FetchPosition(id) => {
                let provider = self.provider.clone();
                let accuracy = self.watch_options.accuracy;
                self.spawn_request(async move {
                    match provider.current_position(accuracy).await {
                        Ok(position) => Action::PositionFetched(id, position),
                        Err(e) => Action::PositionFailed(id, e),
                    }
                });
                None
            }
            Effect::StartTracking => match self.tracker.start_watching(self.watch_options, self.positions_tx.clone()) {
                Ok(()) => Some(Action::TrackingStarted),
                Err(e) => Some(Action::TrackingFailed(e)),
            },
            Effect::StopTracking => {
                self.tracker.stop();
                None
            }
            Effect::RenderMap(position) => match self.map.render(&position).await {
                Ok(()) => Some(Action::MapRendered),
                Err(e) => Some(Action::MapFailed(e.to_string())),
            },
            Effect::RecenterMap(position) => match self.map.recenter(&position).await {
                Ok(()) => None,
                Err(e) => Some(Action::MapFailed(e.to_string())),
            },
            Effect::VerifyConnection => {
                self.monitor.verify();
                None
            }
            Effect::Notify(alert) => {
                self.alerts.notify(&alert);
                None
            }
        }
    }

    /// Runs a slow request in the background, its result comes back through the action channel.
    fn spawn_request(&mut self, request: impl Future<Output = Action> + Send + 'static) {
        while self.requests.try_join_next().is_some() {}

        let tx = self.actions_tx.clone();
        self.requests.spawn(async move {
            let _ = tx.send(request.await).await;
        });
    }
}
