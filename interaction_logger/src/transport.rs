//! The network seam between the handler and the logging endpoint.
//!
//! The handler only needs "post this payload, give me back status and body".
//! [`HttpTransport`] does that over reqwest; tests substitute their own
//! [`Transport`] to script responses without a server.

use crate::error::TransportError;
use crate::payload::InteractionPayload;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use url::Url;

/// Fixed path of the interaction logging endpoint.
pub const LOG_INTERACTION_PATH: &str = "/api/log_interaction";

/// Status code and unparsed body of an endpoint response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `payload` as a JSON POST to `path`.
    ///
    /// Any HTTP status is a successful send; only failures to reach the
    /// server or read the response are errors.
    async fn post_json(
        &self,
        path: &str,
        payload: &InteractionPayload,
    ) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed transport rooted at a base URL such as `http://127.0.0.1:5000`.
///
/// No timeout is set; the client's defaults apply.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self, TransportError> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Builds a transport against `API_BASE_URL` from the global config.
    pub fn from_config() -> Result<Self, TransportError> {
        Self::new(&util::config::api_base_url())
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        path: &str,
        payload: &InteractionPayload,
    ) -> Result<RawResponse, TransportError> {
        let url = self.endpoint(path)?;

        // `.json()` sets `Content-Type: application/json`.
        let resp = self.client.post(url).json(payload).send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;

        Ok(RawResponse { status, body })
    }
}
