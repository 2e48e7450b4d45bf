pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ AskRequest, AskResponse };

pub use self::http::HttpTransport;

/// Why a turn failed. The widget shows the same apology for all of them;
/// the variants exist for logs and tests.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// The single call the widget makes: one question in, one answer out.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse, TransportError>;
}
