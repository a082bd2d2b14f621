use crate::client::stream::StreamHandle;
use crate::client::urls::UrlBuilder;
use crate::client::StreamGateway;
use crate::config::StreamConfig;
use crate::error::StreamError;
use crate::events::TransportFrame;
use crate::models::ids::ClientId;
use crate::parsing::SseParser;
use async_trait::async_trait;
use futures_util::StreamExt;
use log::debug;
use reqwest::{header, Client};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use tokio::sync::mpsc;

const FRAME_CHANNEL_CAPACITY: usize = 64;

pub struct ReqwestGateway {
    pub client: ClientWithMiddleware,
    pub urls: UrlBuilder,
}

impl ReqwestGateway {
    pub fn new() -> Self {
        Self::with_config(&StreamConfig::default())
    }

    pub fn with_config(config: &StreamConfig) -> Self {
        let retry_policy = ExponentialBackoff::builder()
            .base(config.retry_base_ms)
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Self {
            client,
            urls: UrlBuilder::new(&config.base_url),
        }
    }
}

impl Default for ReqwestGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamGateway for ReqwestGateway {
    async fn connect_stream(&self, client_id: &ClientId) -> Result<StreamHandle, StreamError> {
        let url = self.urls.sse_connect(client_id);
        let resp = self
            .client
            .get(&url)
            .header(header::ACCEPT, "text/event-stream")
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let url = resp.url().to_string();
            let body = resp.text().await.unwrap_or_default();
            return Err(StreamError::RequestFailed { status, body, url });
        }

        debug!(target: "order_stream", "Stream opened at {url}");
        let (frames_tx, frames_rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
        let task = tokio::spawn(read_stream(resp, frames_tx));
        Ok(StreamHandle::new(frames_rx, task))
    }

    async fn simulate_order(&self) -> Result<(), StreamError> {
        let url = self.urls.order_simulate();
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let url = resp.url().to_string();
            let body = resp.text().await.unwrap_or_default();
            return Err(StreamError::RequestFailed { status, body, url });
        }
        Ok(())
    }
}

/// Reader side of one stream handle: parse the byte stream into named events
/// and forward them as frames until the body ends, errors, or the handle is
/// closed (receiver dropped or task aborted).
async fn read_stream(resp: reqwest::Response, frames: mpsc::Sender<TransportFrame>) {
    if frames.send(TransportFrame::Open).await.is_err() {
        return;
    }
    let mut parser = SseParser::new();
    let mut body = resp.bytes_stream();
    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(bytes) => {
                for raw in parser.push(&bytes) {
                    debug!(target: "order_stream", "Stream event {}", raw.name);
                    if frames.send(TransportFrame::Event(raw)).await.is_err() {
                        return;
                    }
                }
            }
            Err(e) => {
                let _ = frames.send(TransportFrame::Error(e.to_string())).await;
                return;
            }
        }
    }
    let _ = frames
        .send(TransportFrame::Error(String::from("event stream ended")))
        .await;
}
