//! Summary Backend Client
//!
//! HTTP client for the tenant backend's summary endpoint.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::models::SummaryPayload;
use crate::screen::{LoadError, SummarySource};

/// reqwest-backed [`SummarySource`]
pub struct HttpSummarySource {
    client: Client,
    list_url: String,
}

impl HttpSummarySource {
    /// Create a client for the configured backend
    pub fn new(config: &BackendConfig) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LoadError::Request(e.to_string()))?;

        Ok(Self {
            client,
            list_url: config.list_url(),
        })
    }

    pub fn list_url(&self) -> &str {
        &self.list_url
    }
}

fn map_request_error(e: reqwest::Error) -> LoadError {
    if e.is_timeout() {
        LoadError::Timeout
    } else if e.is_connect() {
        LoadError::Unavailable
    } else if e.is_decode() {
        LoadError::Decode(e.to_string())
    } else {
        LoadError::Request(e.to_string())
    }
}

#[async_trait(?Send)]
impl SummarySource for HttpSummarySource {
    fn endpoint(&self) -> &str {
        &self.list_url
    }

    async fn fetch_summary(&self) -> Result<SummaryPayload, LoadError> {
        let response = self
            .client
            .get(&self.list_url)
            .send()
            .await
            .map_err(map_request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LoadError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.bytes().await.map_err(map_request_error)?;
        serde_json::from_slice(&body).map_err(|e| LoadError::Decode(e.to_string()))
    }
}
