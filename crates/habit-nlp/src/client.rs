//! Shared JSON-over-HTTP plumbing for the language services
//!
//! Author: hephaex@gmail.com

use std::time::Duration;

use habit_core::{HabitError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// A `reqwest` client bound to one service base URL
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: String,
}

impl ServiceClient {
    /// Create a client with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HabitError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST a JSON body and decode a JSON response
    ///
    /// Transport failures, non-success statuses and undecodable bodies are
    /// all reported through `on_error`.
    pub async fn post_json<Req, Resp>(
        &self,
        path: &str,
        body: &Req,
        on_error: fn(String) -> HabitError,
    ) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(url = %url, "calling language service");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| on_error(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| on_error(format!("Failed to read response from {url}: {e}")))?;

        if !status.is_success() {
            return Err(on_error(format!("{url} returned {status}: {text}")));
        }

        decode(&text).map_err(|e| on_error(format!("Failed to parse response from {url}: {e}")))
    }
}

/// Decode a JSON response body
pub fn decode<T: DeserializeOwned>(body: &str) -> std::result::Result<T, serde_json::Error> {
    serde_json::from_str(body)
}
