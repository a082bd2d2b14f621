use crate::client::urls::DEFAULT_BASE_URL;
use std::time::Duration;

/// Identity the original deployment pinned for its single-page session. Callers
/// running several sessions against the same backend should override it, e.g.
/// with [`crate::utils::random_client_id`].
pub const DEFAULT_CLIENT_ID: &str = "client-121113";

pub const BASE_URL_ENV: &str = "ORDER_STREAM_BASE_URL";
pub const CLIENT_ID_ENV: &str = "ORDER_STREAM_CLIENT_ID";

/// What to do after a transport error. Inert by default: the manager just
/// transitions to disconnected and waits for an explicit `connect()`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub retry_on_error: bool,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_on_error: false,
            delay: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub base_url: String,
    pub client_id: String,
    /// Longest tolerated gap between liveness signals while connected.
    pub heartbeat_timeout: Duration,
    /// How often the staleness check runs while connected.
    pub heartbeat_check_interval: Duration,
    pub retry: RetryPolicy,
    pub retry_base_ms: u32,
    pub max_retries: u32,
    pub notice_channel_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            heartbeat_timeout: Duration::from_secs(45),
            heartbeat_check_interval: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            retry_base_ms: 20,
            max_retries: 3,
            notice_channel_capacity: 512,
        }
    }
}

impl StreamConfig {
    pub fn builder() -> StreamConfigBuilder {
        StreamConfigBuilder::default()
    }

    /// Defaults overridden by `ORDER_STREAM_BASE_URL` / `ORDER_STREAM_CLIENT_ID`
    /// where set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(id) = std::env::var(CLIENT_ID_ENV) {
            if !id.is_empty() {
                config.client_id = id;
            }
        }
        config
    }
}

#[derive(Default)]
pub struct StreamConfigBuilder {
    config: StreamConfig,
}

impl StreamConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.config.client_id = id.into();
        self
    }

    pub fn heartbeat_timeout(mut self, timeout: Duration) -> Self {
        self.config.heartbeat_timeout = timeout;
        self
    }

    pub fn heartbeat_check_interval(mut self, interval: Duration) -> Self {
        self.config.heartbeat_check_interval = interval;
        self
    }

    pub fn retry_policy(mut self, retry_on_error: bool, delay: Duration) -> Self {
        self.config.retry = RetryPolicy {
            retry_on_error,
            delay,
        };
        self
    }

    pub fn http_retry_policy(mut self, base_ms: u32, max_retries: u32) -> Self {
        self.config.retry_base_ms = base_ms;
        self.config.max_retries = max_retries;
        self
    }

    pub fn notice_channel_capacity(mut self, capacity: usize) -> Self {
        self.config.notice_channel_capacity = capacity;
        self
    }

    pub fn build(self) -> StreamConfig {
        self.config
    }
}
