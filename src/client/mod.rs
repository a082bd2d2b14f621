use crate::client::stream::StreamHandle;
use crate::error::StreamError;
use crate::models::ids::ClientId;
use async_trait::async_trait;

/// Transport seam. Production uses [`http::ReqwestGateway`]; tests substitute
/// a mock that feeds frames by hand.
#[async_trait]
pub trait StreamGateway: Send + Sync {
    /// Open the server-push stream for `client_id`. A returned handle is live;
    /// a returned error means no handle was opened at all.
    async fn connect_stream(&self, client_id: &ClientId) -> Result<StreamHandle, StreamError>;

    /// Ask the backend to emit one ORDER_UPDATE asynchronously.
    async fn simulate_order(&self) -> Result<(), StreamError>;
}

pub mod http;
pub mod manager;
pub mod session;
pub mod stream;
pub mod urls;
