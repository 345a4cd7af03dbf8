//! Summary Loader
//!
//! One-shot fetch of the summary payload for a dashboard screen. The loader
//! issues at most one request per screen and discards responses that resolve
//! after the screen has been dismissed.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::models::SummaryPayload;

/// Anything that can produce the summary payload
///
/// Futures are not required to be `Send` so browser fetches can implement it.
#[async_trait(?Send)]
pub trait SummarySource {
    /// Endpoint description used in log fields
    fn endpoint(&self) -> &str;

    async fn fetch_summary(&self) -> Result<SummaryPayload, LoadError>;
}

/// Errors that can occur while fetching the summary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Summary backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid summary payload: {0}")]
    Decode(String),
}

/// Guard tying an in-flight load to the screen that started it
#[derive(Debug, Clone)]
pub struct ScreenLifetime {
    active: Arc<AtomicBool>,
}

impl ScreenLifetime {
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Mark the screen as gone; pending results will be dropped
    pub fn dismiss(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Default for ScreenLifetime {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Payload fetched while the screen was still shown
    Loaded(SummaryPayload),
    /// Fetch failed; already logged
    Failed(LoadError),
    /// A load was already issued for this screen
    AlreadyStarted,
    /// The screen was dismissed before the response arrived
    Discarded,
}

/// Fire-once loader for a single screen activation
pub struct DataLoader<S> {
    source: S,
    started: AtomicBool,
}

impl<S: SummarySource> DataLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            started: AtomicBool::new(false),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether the one allowed request has been issued
    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Issue the summary request unless one was already issued
    ///
    /// Failures are logged here and never propagated to the caller.
    pub async fn load_once(&self, lifetime: &ScreenLifetime) -> LoadOutcome {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::debug!(endpoint = %self.source.endpoint(), "Summary already requested, skipping");
            return LoadOutcome::AlreadyStarted;
        }

        tracing::info!(endpoint = %self.source.endpoint(), "Loading tenant summary");
        let result = self.source.fetch_summary().await;

        if !lifetime.is_active() {
            tracing::debug!(
                endpoint = %self.source.endpoint(),
                "Screen dismissed before summary arrived, discarding"
            );
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(payload) => {
                tracing::info!(
                    total_count = payload.total_count,
                    latest = payload.latest.len(),
                    records = payload.all.len(),
                    "Tenant summary loaded"
                );
                LoadOutcome::Loaded(payload)
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.source.endpoint(),
                    error = %e,
                    "Failed to load tenant summary"
                );
                LoadOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TenantRecord;
    use std::sync::atomic::AtomicUsize;

    struct StaticSource {
        result: Result<SummaryPayload, LoadError>,
        calls: AtomicUsize,
        dismiss_on_fetch: Option<ScreenLifetime>,
    }

    impl StaticSource {
        fn ok(payload: SummaryPayload) -> Self {
            Self {
                result: Ok(payload),
                calls: AtomicUsize::new(0),
                dismiss_on_fetch: None,
            }
        }

        fn err(error: LoadError) -> Self {
            Self {
                result: Err(error),
                calls: AtomicUsize::new(0),
                dismiss_on_fetch: None,
            }
        }
    }

    #[async_trait(?Send)]
    impl SummarySource for StaticSource {
        fn endpoint(&self) -> &str {
            "static"
        }

        async fn fetch_summary(&self) -> Result<SummaryPayload, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(lifetime) = &self.dismiss_on_fetch {
                lifetime.dismiss();
            }
            self.result.clone()
        }
    }

    fn payload() -> SummaryPayload {
        SummaryPayload {
            total_count: 3,
            latest: vec![TenantRecord::new("S1")],
            all: vec![TenantRecord::new("S1")],
        }
    }

    #[tokio::test]
    async fn test_loads_payload() {
        let loader = DataLoader::new(StaticSource::ok(payload()));
        let outcome = loader.load_once(&ScreenLifetime::new()).await;

        assert_eq!(outcome, LoadOutcome::Loaded(payload()));
        assert!(loader.has_started());
    }

    #[tokio::test]
    async fn test_second_load_issues_no_request() {
        let loader = DataLoader::new(StaticSource::ok(payload()));
        let lifetime = ScreenLifetime::new();

        loader.load_once(&lifetime).await;
        let second = loader.load_once(&lifetime).await;

        assert_eq!(second, LoadOutcome::AlreadyStarted);
        assert_eq!(loader.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_reported_not_raised() {
        let loader = DataLoader::new(StaticSource::err(LoadError::Unavailable));
        let outcome = loader.load_once(&ScreenLifetime::new()).await;
        assert_eq!(outcome, LoadOutcome::Failed(LoadError::Unavailable));
    }

    #[tokio::test]
    async fn test_dismissed_screen_discards_response() {
        let lifetime = ScreenLifetime::new();
        let mut source = StaticSource::ok(payload());
        source.dismiss_on_fetch = Some(lifetime.clone());

        let loader = DataLoader::new(source);
        let outcome = loader.load_once(&lifetime).await;

        assert_eq!(outcome, LoadOutcome::Discarded);
        assert!(!lifetime.is_active());
    }

    #[test]
    fn test_error_display() {
        let err = LoadError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error 502: bad gateway");
        assert_eq!(LoadError::Timeout.to_string(), "Request timeout");
    }
}
