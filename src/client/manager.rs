use crate::client::stream::StreamHandle;
use crate::client::StreamGateway;
use crate::config::RetryPolicy;
use crate::events::{Notice, StreamEvent, TransportFrame};
use crate::models::ids::ClientId;
use crate::storage::NotificationLog;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};

/// Connection state as observed by consumers. Exactly one value at any time,
/// owned exclusively by the manager and mutated only on transport lifecycle
/// events. Derived UI state (e.g. a spinner) is computed from this, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// User-driven operations, sent from a [`super::session::StreamController`].
#[derive(Debug)]
pub enum Command {
    Connect,
    Disconnect,
}

/// Owns the single active stream handle and drives all state transitions.
///
/// Commands, inbound frames, the heartbeat check and the retry deadline are
/// all multiplexed onto one task, so no two handlers ever run concurrently and
/// no lock is needed around the handle. The one ordering discipline that
/// matters: the old handle is always closed before a new one is opened.
pub struct StreamManager {
    pub gateway: Arc<dyn StreamGateway>,
    pub client_id: ClientId,
    pub heartbeat_timeout: Duration,
    pub check_interval: Duration,
    pub retry: RetryPolicy,
    pub notices_tx: broadcast::Sender<Notice>,
    pub state_tx: watch::Sender<ConnectionState>,
    pub log: Arc<NotificationLog>,

    // State
    pub handle: Option<StreamHandle>,
    pub last_seen: Option<Instant>,
    pub retry_at: Option<Instant>,
}

enum Step {
    Command(Option<Command>),
    Frame(Option<TransportFrame>),
    CheckHeartbeat,
    RetryDue,
}

impl StreamManager {
    /// Event loop. Returns when the command channel closes.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        let mut check = interval(self.check_interval);
        check.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let step = tokio::select! {
                cmd = commands.recv() => Step::Command(cmd),
                frame = Self::next_frame(&mut self.handle) => Step::Frame(frame),
                _ = check.tick() => Step::CheckHeartbeat,
                _ = Self::retry_deadline(self.retry_at) => Step::RetryDue,
            };

            match step {
                Step::Command(Some(Command::Connect)) => {
                    self.retry_at = None;
                    self.connect().await;
                }
                Step::Command(Some(Command::Disconnect)) => self.disconnect(),
                Step::Command(None) => {
                    self.close_handle();
                    self.set_state(ConnectionState::Disconnected);
                    debug!(target: "order_stream", "Controller dropped, stopping manager");
                    break;
                }
                Step::Frame(Some(frame)) => self.dispatch(frame),
                Step::Frame(None) => self.on_transport_error("event stream closed"),
                Step::CheckHeartbeat => self.check_staleness().await,
                Step::RetryDue => {
                    self.retry_at = None;
                    info!(target: "order_stream", "Retrying connection after transport error");
                    self.connect().await;
                }
            }
        }
    }

    async fn next_frame(handle: &mut Option<StreamHandle>) -> Option<TransportFrame> {
        match handle {
            Some(handle) => handle.next().await,
            None => std::future::pending().await,
        }
    }

    async fn retry_deadline(at: Option<Instant>) {
        match at {
            Some(at) => sleep_until(at).await,
            None => std::future::pending().await,
        }
    }

    /// Idempotent re-entry: any existing handle is closed before the new one
    /// opens, so stale frames can never race a newer handle.
    async fn connect(&mut self) {
        self.close_handle();
        self.last_seen = None;
        self.set_state(ConnectionState::Connecting);
        match self.gateway.connect_stream(&self.client_id).await {
            Ok(handle) => {
                debug!(target: "order_stream", "Stream handle opened for {}", self.client_id);
                self.handle = Some(handle);
            }
            Err(e) => {
                warn!(target: "order_stream", "Failed to open stream: {e}");
                self.set_state(ConnectionState::Disconnected);
                self.schedule_retry();
            }
        }
    }

    /// No-op when already disconnected: no duplicate notices, no error.
    fn disconnect(&mut self) {
        self.retry_at = None;
        if self.handle.is_none() && *self.state_tx.borrow() == ConnectionState::Disconnected {
            return;
        }
        self.close_handle();
        self.set_state(ConnectionState::Disconnected);
        info!(target: "order_stream", "Disconnected from order notification service");
        let _ = self.notices_tx.send(Notice::Disconnected);
    }

    fn dispatch(&mut self, frame: TransportFrame) {
        match StreamEvent::from_frame(frame) {
            Some(StreamEvent::Connect) | Some(StreamEvent::Heartbeat) => self.record_liveness(),
            Some(StreamEvent::OrderUpdate(event)) => {
                info!(
                    target: "order_stream",
                    "Order {} updated to {}",
                    event.order_id,
                    event.status
                );
                let _ = self.notices_tx.send(Notice::OrderReceived {
                    order_id: event.order_id.clone(),
                    status: event.status,
                });
                self.log.push(event);
            }
            Some(StreamEvent::TransportError(reason)) => self.on_transport_error(&reason),
            None => {}
        }
    }

    fn record_liveness(&mut self) {
        self.last_seen = Some(Instant::now());
        if *self.state_tx.borrow() != ConnectionState::Connected {
            self.set_state(ConnectionState::Connected);
            info!(target: "order_stream", "Connected to order notification service");
            let _ = self.notices_tx.send(Notice::Connected);
        }
    }

    /// Transport errors surface as a state change only; whether to dial again
    /// is the retry policy's call.
    fn on_transport_error(&mut self, reason: &str) {
        warn!(target: "order_stream", "Transport error: {reason}");
        self.close_handle();
        self.set_state(ConnectionState::Disconnected);
        self.schedule_retry();
    }

    fn schedule_retry(&mut self) {
        if self.retry.retry_on_error {
            debug!(
                target: "order_stream",
                "Scheduling reconnect in {:?}",
                self.retry.delay
            );
            self.retry_at = Some(Instant::now() + self.retry.delay);
        }
    }

    /// The sole path by which a half-open connection that never signals a
    /// transport error gets healed. Reconnects immediately, not after a delay;
    /// the state guard means at most one cycle per breach.
    async fn check_staleness(&mut self) {
        if *self.state_tx.borrow() != ConnectionState::Connected {
            return;
        }
        let stale = self
            .last_seen
            .map_or(false, |seen| seen.elapsed() > self.heartbeat_timeout);
        if !stale {
            return;
        }
        warn!(
            target: "order_stream",
            "No liveness signal for over {:?}, reconnecting",
            self.heartbeat_timeout
        );
        let _ = self.notices_tx.send(Notice::Reconnecting);
        self.close_handle();
        self.set_state(ConnectionState::Disconnected);
        self.connect().await;
    }

    fn close_handle(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.close();
        }
    }

    fn set_state(&self, state: ConnectionState) {
        self.state_tx.send_replace(state);
    }
}
