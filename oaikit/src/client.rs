//! HTTP transport shared by every endpoint family.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, info_span, warn};

use crate::config::ClientConfig;
use crate::endpoint::{BodyEncoding, Endpoint};
use crate::error::{Error, Result};

/// Longest error body excerpt written to the debug log.
const ERROR_BODY_LOG_LIMIT: usize = 512;

/// OpenAI API client.
///
/// Cheap to clone: the configuration sits behind an [`Arc`] and the transport
/// handle is reference counted. Clones may be used from any number of tasks.
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl Client {
    /// Create a new client with its own transport handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid or the
    /// transport cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let http = builder
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Create a client that sends through a caller-owned transport handle.
    ///
    /// `timeout_secs` is ignored here; configure timeouts on `http` instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`] and [`Client::new`].
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Start a request with authentication headers attached.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, self.config.url(path))
            .bearer_auth(&self.config.api_key);

        if let Some(org) = &self.config.organization {
            req = req.header("OpenAI-Organization", org);
        }

        req
    }

    /// POST a JSON document to an endpoint and return the success body.
    pub(crate) async fn post_json<B>(&self, endpoint: Endpoint, body: &B) -> Result<Bytes>
    where
        B: Serialize + ?Sized,
    {
        debug_assert_eq!(endpoint.encoding(), BodyEncoding::Json, "{endpoint:?}");

        // Serialize up front so encoding failures never reach the network.
        let payload = serde_json::to_vec(body).map_err(|e| Error::encoding(endpoint, e.to_string()))?;

        let req = self
            .request(Method::POST, endpoint.path())
            .header(CONTENT_TYPE, "application/json")
            .body(payload);

        self.execute(endpoint, req).await
    }

    /// POST a multipart form to an endpoint and return the success body.
    ///
    /// The content type, boundary included, is set by the form itself.
    pub(crate) async fn post_multipart(
        &self,
        endpoint: Endpoint,
        form: reqwest::multipart::Form,
    ) -> Result<Bytes> {
        debug_assert_eq!(endpoint.encoding(), BodyEncoding::Multipart, "{endpoint:?}");

        let req = self.request(Method::POST, endpoint.path()).multipart(form);
        self.execute(endpoint, req).await
    }

    /// Send a request without a body to `path` and return the success body.
    pub(crate) async fn send_empty(
        &self,
        method: Method,
        endpoint: Endpoint,
        path: &str,
    ) -> Result<Bytes> {
        let req = self.request(method, path);
        self.execute(endpoint, req).await
    }

    /// Run a single exchange and apply the status check.
    async fn execute(&self, endpoint: Endpoint, req: RequestBuilder) -> Result<Bytes> {
        let span = info_span!("oaikit.request", endpoint = endpoint.label());

        async move {
            debug!("sending request");

            let response = req
                .send()
                .await
                .map_err(|source| Error::transport(endpoint, source))?;

            let status = response.status();
            if status != StatusCode::OK {
                let body = response.bytes().await.unwrap_or_default();
                warn!(status = status.as_u16(), "request failed");
                debug!(body = %excerpt(&body), "error response body");
                return Err(Error::remote_status(endpoint, status.as_u16()));
            }

            let body = response
                .bytes()
                .await
                .map_err(|source| Error::transport(endpoint, source))?;

            debug!(status = status.as_u16(), bytes = body.len(), "response received");
            Ok(body)
        }
        .instrument(span)
        .await
    }
}

/// Decode a success body as JSON into the endpoint's response type.
pub(crate) fn decode_json<T: DeserializeOwned>(endpoint: Endpoint, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| Error::decoding(endpoint, source))
}

fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(ERROR_BODY_LOG_LIMIT) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    }
}
