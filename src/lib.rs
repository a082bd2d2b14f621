pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod parsing;
pub mod storage;
pub mod utils;

pub use client::http::ReqwestGateway;
pub use client::manager::{ConnectionState, StreamManager};
pub use client::session::{OrderStreamClient, StreamController};
pub use client::StreamGateway;
pub use config::{RetryPolicy, StreamConfig, StreamConfigBuilder};
pub use error::StreamError;
pub use events::{Notice, StreamEvent};
pub use models::enums::OrderStatus;
pub use models::OrderEvent;
pub use storage::NotificationLog;
