//! # HTTP Service
//!
//! Performs the live GET for an invocation and normalizes whatever happens
//! into an [`InvocationResult`]. Nothing in here returns an error to the
//! caller once the client exists.

use anyhow::Result;
use bytes::Bytes;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Response, StatusCode};

use crate::config::HttpSettings;
use crate::engine::models::InvocationResult;

/// Service for executing endpoint invocations
#[derive(Debug, Clone)]
pub struct HttpService {
    /// The underlying HTTP client, cheap to clone
    client: Client,
}

impl HttpService {
    /// Create a new HttpService from settings
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        tracing::debug!("Creating HttpService with settings: {:?}", settings);

        let mut builder =
            Client::builder().user_agent(concat!("apidock/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;
        tracing::info!("HTTP client created successfully");

        Ok(Self { client })
    }

    /// GET `url` and normalize the outcome
    pub async fn get_json(&self, url: &str) -> InvocationResult {
        tracing::debug!("GET {}", url);

        let (status, status_text, bytes) = match self.fetch(url).await {
            Ok(fetched) => fetched,
            Err(e) => {
                // One line per cause
                let mut message = format!("{e}");
                for cause in e.chain().skip(1) {
                    message.push_str(&format!("\n  Caused by: {cause}"));
                }
                tracing::error!("HTTP request to {} failed: {}", url, message);
                return InvocationResult::network_error(message);
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(body) => {
                tracing::debug!(
                    "GET {} -> {} ({} bytes)",
                    url,
                    status.as_u16(),
                    bytes.len()
                );
                InvocationResult::from_response(status.as_u16(), status_text, body)
            }
            Err(e) => {
                tracing::warn!(
                    "Response from {} ({}) is not valid JSON: {}",
                    url,
                    status.as_u16(),
                    e
                );
                InvocationResult::network_error(format!("invalid JSON in response body: {e}"))
            }
        }
    }

    /// Send the request and read the whole body
    async fn fetch(&self, url: &str) -> Result<(StatusCode, String, Bytes)> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let status_text = reason_phrase(&response);
        let bytes = response.bytes().await?;
        Ok((status, status_text, bytes))
    }
}

/// The reason phrase the server sent, else the canonical one for the code
fn reason_phrase(response: &Response) -> String {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
        .or_else(|| response.status().canonical_reason())
        .unwrap_or("")
        .to_string()
}
