//! HTTP API Client
//!
//! Browser fetch of the tenant summary.

use async_trait::async_trait;
use gloo_net::http::Request;
use tenant_dashboard::{LoadError, SummaryPayload, SummarySource};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://0.0.0.0:8080";

/// Summary endpoint path
pub const LIST_PATH: &str = "/list";

/// Local storage key overriding the API base URL
const API_URL_KEY: &str = "tenant_dashboard_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

    normalize_base(stored.as_deref())
}

/// Trim a stored base URL, falling back to the default when blank
fn normalize_base(stored: Option<&str>) -> String {
    match stored.map(str::trim) {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
        _ => DEFAULT_API_BASE.to_string(),
    }
}

/// gloo-net backed summary source
pub struct GlooSummarySource {
    list_url: String,
}

impl GlooSummarySource {
    pub fn new(api_base: &str) -> Self {
        Self {
            list_url: format!("{}{}", api_base, LIST_PATH),
        }
    }

    /// Source pointed at the configured API base
    pub fn from_storage() -> Self {
        Self::new(&get_api_base())
    }
}

#[async_trait(?Send)]
impl SummarySource for GlooSummarySource {
    fn endpoint(&self) -> &str {
        &self.list_url
    }

    async fn fetch_summary(&self) -> Result<SummaryPayload, LoadError> {
        let response = Request::get(&self.list_url)
            .send()
            .await
            .map_err(|e| LoadError::Request(format!("Network error: {}", e)))?;

        if !response.ok() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(LoadError::Api { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Request(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| LoadError::Decode(e.to_string()))
    }
}
