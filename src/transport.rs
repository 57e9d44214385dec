//! The HTTP transport collaborator.
//!
//! The executor talks to the network through the [`Transport`] trait: one
//! asynchronous `send` per call, no retries, no timeouts imposed at this
//! layer. [`HttpTransport`] is the production implementation over
//! `reqwest`; tests substitute their own implementors.

use async_trait::async_trait;

use crate::distill::RequestSpec;
use crate::error::TransportError;

/// Raw outcome of one transport attempt.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends a fully resolved request, once.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestSpec) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport with connection pooling.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds the transport with a pooled HTTP client.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestSpec) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.to_reqwest(), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}
