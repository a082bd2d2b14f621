use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("request failed: {status}")]
    RequestFailed {
        status: StatusCode,
        body: String,
        url: String,
    },
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("middleware: {0}")]
    Middleware(#[from] reqwest_middleware::Error),
    #[error("stream manager is not running")]
    ManagerStopped,
}
