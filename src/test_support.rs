use crate::alerts::AlertSink;
use crate::connectivity::{InterfaceError, InterfaceState, NetworkInterfaces, ProbeError, ReachabilityProbe};
use crate::domain::{AccuracyHint, Alert, Position};
use crate::location::{LocationProvider, Permission, PositionError};
use crate::map::{MapError, MapSurface};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

/// Answers with scripted readings, or the same reading forever.
#[derive(Debug)]
pub struct ScriptedLocationProvider {
    permission: Permission,
    readings: Mutex<VecDeque<Result<Position, PositionError>>>,
    repeat: Option<Position>,
    delay: Duration,
    position_requests: AtomicUsize,
    permission_requests: AtomicUsize,
}

impl ScriptedLocationProvider {
    pub fn sequence(readings: Vec<Result<Position, PositionError>>) -> Self {
        ScriptedLocationProvider {
            permission: Permission::Granted,
            readings: Mutex::new(readings.into()),
            repeat: None,
            delay: Duration::ZERO,
            position_requests: AtomicUsize::new(0),
            permission_requests: AtomicUsize::new(0),
        }
    }

    pub fn repeating(position: Position) -> Self {
        ScriptedLocationProvider {
            repeat: Some(position),
            ..Self::sequence(vec![])
        }
    }

    pub fn denying() -> Self {
        ScriptedLocationProvider {
            permission: Permission::Denied,
            ..Self::sequence(vec![])
        }
    }

    /// Every reading takes `delay` to arrive.
    pub fn answering_after(self, delay: Duration) -> Self {
        ScriptedLocationProvider { delay, ..self }
    }

    pub fn position_requests(&self) -> usize {
        self.position_requests.load(Ordering::SeqCst)
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for ScriptedLocationProvider {
    async fn request_permission(&self) -> Permission {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        self.permission
    }

    async fn current_position(&self, _accuracy: AccuracyHint) -> Result<Position, PositionError> {
        self.position_requests.fetch_add(1, Ordering::SeqCst);
        if self.permission == Permission::Denied {
            return Err(PositionError::PermissionDenied);
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(reading) = self.readings.lock().unwrap().pop_front() {
            return reading;
        }

        self.repeat.ok_or(PositionError::Timeout)
    }
}

#[derive(Debug)]
pub struct FakeInterfaces {
    tx: watch::Sender<InterfaceState>,
}

impl FakeInterfaces {
    pub fn new(state: InterfaceState) -> Self {
        let (tx, _) = watch::channel(state);
        FakeInterfaces { tx }
    }

    pub fn change(&self, state: InterfaceState) {
        self.tx.send_replace(state);
    }

    pub fn subscribers(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[async_trait]
impl NetworkInterfaces for FakeInterfaces {
    async fn current_state(&self) -> Result<InterfaceState, InterfaceError> {
        Ok(*self.tx.borrow())
    }

    fn subscribe(&self) -> watch::Receiver<InterfaceState> {
        self.tx.subscribe()
    }
}

/// Answers with scripted results after a delay. Fails once the script runs out.
#[derive(Debug, Default)]
pub struct FakeProbe {
    responses: Mutex<VecDeque<(Result<(), ProbeError>, Duration)>>,
    calls: AtomicUsize,
    in_flight: Arc<AtomicUsize>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, delay: Duration) {
        self.responses.lock().unwrap().push_back((Ok(()), delay));
    }

    pub fn push_err(&self, error: ProbeError, delay: Duration) {
        self.responses.lock().unwrap().push_back((Err(error), delay));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReachabilityProbe for FakeProbe {
    async fn probe(&self) -> Result<(), ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _guard = InFlightGuard(self.in_flight.clone());

        let next = self.responses.lock().unwrap().pop_front();
        let (result, delay) = next.unwrap_or((Err(ProbeError::Transport("no scripted response".to_string())), Duration::ZERO));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    Render(Position),
    Recenter(Position),
}

/// Records what it was asked to show, can be told to fail every render.
#[derive(Debug, Default)]
pub struct RecordingMapSurface {
    calls: Arc<Mutex<Vec<MapCall>>>,
    fail: bool,
    marker: Option<Position>,
}

impl RecordingMapSurface {
    pub fn failing() -> Self {
        RecordingMapSurface {
            fail: true,
            ..Self::default()
        }
    }

    /// Shared view on the calls, stays usable after the surface moved into a screen.
    pub fn calls(&self) -> Arc<Mutex<Vec<MapCall>>> {
        self.calls.clone()
    }
}

#[async_trait]
impl MapSurface for RecordingMapSurface {
    fn kind(&self) -> &'static str {
        "recording"
    }

    async fn render(&mut self, position: &Position) -> Result<(), MapError> {
        self.calls.lock().unwrap().push(MapCall::Render(*position));
        if self.fail {
            return Err(MapError::Io {
                source: std::io::Error::other("view crashed"),
                path: "map.html".into(),
            });
        }
        self.marker = Some(*position);
        Ok(())
    }

    async fn recenter(&mut self, position: &Position) -> Result<(), MapError> {
        self.calls.lock().unwrap().push(MapCall::Recenter(*position));
        if self.marker.is_none() {
            return Err(MapError::NotRendered);
        }
        Ok(())
    }

    fn marker(&self) -> Option<Position> {
        self.marker
    }
}

#[derive(Debug, Default)]
pub struct RecordingAlertSink {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingAlertSink {
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlertSink {
    fn notify(&self, alert: &Alert) {
        self.alerts.lock().unwrap().push(alert.clone());
    }
}
