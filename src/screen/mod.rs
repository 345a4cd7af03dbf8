//! Dashboard Screen
//!
//! Render-target independent state for the tenant dashboard screen.
//!
//! ## Lifecycle
//!
//! - `LoadingInitial`: before the summary fetch resolves
//! - `Loaded`: after the first fetch succeeded or failed (no way back)
//!
//! A failed fetch still moves the screen to `Loaded`, with the all-zero
//! summary it started with.

mod cards;
mod command;
mod loader;

pub use cards::{summary_cards, CardIcon, IconSet, SummaryCard};
pub use command::{ScreenCommand, UnknownCommand};
pub use loader::{DataLoader, LoadError, LoadOutcome, ScreenLifetime, SummarySource};

use chrono::Duration;
use serde::Serialize;

use crate::aggregate::{aggregate_signups, Granularity, SignupSeries, TimestampNormalizer};
use crate::clock::Clock;
use crate::models::{SummaryPayload, TenantRecord};

/// Screen lifecycle phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenPhase {
    #[default]
    LoadingInitial,
    Loaded,
}

/// In-memory state of one dashboard screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    phase: ScreenPhase,
    summary: SummaryPayload,
    last_error: Option<LoadError>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ScreenPhase::LoadingInitial
    }

    pub fn summary(&self) -> &SummaryPayload {
        &self.summary
    }

    /// Error of the failed load, if the load failed
    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    /// `Err` with the recorded error when the load failed
    pub fn load_result(&self) -> Result<(), LoadError> {
        match &self.last_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Fold a load outcome into the state
    ///
    /// Returns `true` when the state changed.
    pub fn apply(&mut self, outcome: LoadOutcome) -> bool {
        match outcome {
            LoadOutcome::Loaded(payload) => {
                self.summary = payload;
                self.last_error = None;
                self.phase = ScreenPhase::Loaded;
                true
            }
            LoadOutcome::Failed(error) => {
                self.last_error = Some(error);
                self.phase = ScreenPhase::Loaded;
                true
            }
            LoadOutcome::AlreadyStarted | LoadOutcome::Discarded => false,
        }
    }

    /// Chart series for the current summary
    pub fn signup_series(
        &self,
        granularity: Granularity,
        normalizer: &dyn TimestampNormalizer,
    ) -> SignupSeries {
        aggregate_signups(&self.summary.all, granularity, normalizer)
    }

    pub fn cards(
        &self,
        normalizer: &dyn TimestampNormalizer,
        clock: &dyn Clock,
        latest_window: Duration,
    ) -> [SummaryCard; 3] {
        summary_cards(&self.summary, normalizer, clock, latest_window)
    }

    /// Rows of the latest-tenants table
    pub fn latest(&self) -> &[TenantRecord] {
        &self.summary.latest
    }

    /// Select a table row by position
    ///
    /// Navigation to a detail view does not exist; selection only logs.
    pub fn select_row(&self, index: usize) -> Option<&TenantRecord> {
        let record = self.summary.latest.get(index)?;
        select_tenant(&record.school_id);
        Some(record)
    }

    /// Select a table row by school id, or by 1-based row number when no
    /// school id matches
    pub fn select(&self, target: &str) -> Option<&TenantRecord> {
        if let Some(record) = self.select_school(target) {
            return Some(record);
        }
        match target.parse::<usize>() {
            Ok(row) if row > 0 => self.select_row(row - 1),
            _ => None,
        }
    }

    /// Select a table row by school id
    pub fn select_school(&self, school_id: &str) -> Option<&TenantRecord> {
        let record = self
            .summary
            .latest
            .iter()
            .find(|t| t.school_id == school_id)?;
        select_tenant(&record.school_id);
        Some(record)
    }
}

/// Row-click handler for the latest-tenants table
pub fn select_tenant(school_id: &str) {
    tracing::info!(school_id = %school_id, "Navigate to details for schoolId: {}", school_id);
}
