use async_trait::async_trait;
use log::debug;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE } };
use url::Url;

use super::{ ChatTransport, TransportError };
use crate::models::{ AskRequest, AskResponse };

/// POSTs JSON to the configured endpoint with reqwest. No timeout beyond the
/// client's default.
pub struct HttpTransport {
    http: HttpClient,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(TransportError::Network)?;

        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse, TransportError> {
        debug!("POST {} (conversation {})", self.endpoint, request.conversation_id);

        let resp = self.http
            .post(self.endpoint.clone())
            .json(request)
            .send().await
            .map_err(TransportError::Network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(TransportError::Network)?;
        serde_json::from_str::<AskResponse>(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
