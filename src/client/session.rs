use crate::client::http::ReqwestGateway;
use crate::client::manager::{Command, ConnectionState, StreamManager};
use crate::client::StreamGateway;
use crate::config::{RetryPolicy, StreamConfig};
use crate::error::StreamError;
use crate::events::Notice;
use crate::models::ids::ClientId;
use crate::storage::NotificationLog;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};

const COMMAND_CHANNEL_CAPACITY: usize = 16;

/// Entry point tying together gateway, configuration, the notification log and
/// the consumer-facing channels. Subscribe and grab a controller first, then
/// hand the client to a task via [`OrderStreamClient::run`].
pub struct OrderStreamClient {
    gateway: Arc<dyn StreamGateway>,
    client_id: ClientId,
    heartbeat_timeout: Duration,
    check_interval: Duration,
    retry: RetryPolicy,
    notices_tx: broadcast::Sender<Notice>,
    state_tx: watch::Sender<ConnectionState>,
    state_rx: watch::Receiver<ConnectionState>,
    log: Arc<NotificationLog>,
    commands_tx: mpsc::Sender<Command>,
    commands_rx: mpsc::Receiver<Command>,
}

impl fmt::Debug for OrderStreamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderStreamClient")
            .field("client_id", &self.client_id)
            .field("heartbeat_timeout", &self.heartbeat_timeout)
            .field("check_interval", &self.check_interval)
            .finish()
    }
}

impl OrderStreamClient {
    pub fn new(config: StreamConfig) -> Self {
        let gateway: Arc<dyn StreamGateway> = Arc::new(ReqwestGateway::with_config(&config));
        Self::with_gateway(gateway, config)
    }

    pub fn with_gateway(gateway: Arc<dyn StreamGateway>, config: StreamConfig) -> Self {
        let (notices_tx, _rx) = broadcast::channel(config.notice_channel_capacity);
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        Self {
            gateway,
            client_id: ClientId::from(config.client_id),
            heartbeat_timeout: config.heartbeat_timeout,
            check_interval: config.heartbeat_check_interval,
            retry: config.retry,
            notices_tx,
            state_tx,
            state_rx,
            log: Arc::new(NotificationLog::new()),
            commands_tx,
            commands_rx,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// User-visible notifications (connected, disconnected, reconnecting,
    /// order received).
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices_tx.subscribe()
    }

    /// Connection state, for rendering. A spinner is
    /// `*state.borrow() == ConnectionState::Connecting`.
    pub fn state(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    pub fn notifications(&self) -> Arc<NotificationLog> {
        self.log.clone()
    }

    pub fn controller(&self) -> StreamController {
        StreamController {
            commands: self.commands_tx.clone(),
            gateway: self.gateway.clone(),
        }
    }

    /// Drive the connection manager until every controller is dropped.
    pub async fn run(self) {
        let manager = StreamManager {
            gateway: self.gateway,
            client_id: self.client_id,
            heartbeat_timeout: self.heartbeat_timeout,
            check_interval: self.check_interval,
            retry: self.retry,
            notices_tx: self.notices_tx,
            state_tx: self.state_tx,
            log: self.log,
            handle: None,
            last_seen: None,
            retry_at: None,
        };
        manager.run(self.commands_rx).await;
    }
}

/// Cloneable remote control for a running client.
#[derive(Clone)]
pub struct StreamController {
    commands: mpsc::Sender<Command>,
    gateway: Arc<dyn StreamGateway>,
}

impl StreamController {
    pub async fn connect(&self) -> Result<(), StreamError> {
        self.commands
            .send(Command::Connect)
            .await
            .map_err(|_| StreamError::ManagerStopped)
    }

    pub async fn disconnect(&self) -> Result<(), StreamError> {
        self.commands
            .send(Command::Disconnect)
            .await
            .map_err(|_| StreamError::ManagerStopped)
    }

    /// Trigger one simulated ORDER_UPDATE on the backend. The update itself
    /// arrives over the stream, not in this response.
    pub async fn simulate_order(&self) -> Result<(), StreamError> {
        self.gateway.simulate_order().await
    }
}
