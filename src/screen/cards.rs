//! Summary Cards
//!
//! The three headline numbers shown above the chart.

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::aggregate::TimestampNormalizer;
use crate::clock::Clock;
use crate::models::SummaryPayload;

/// Icon shown on a summary card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardIcon {
    People,
    Bell,
    Archive,
}

/// Rendering capability for card icons
///
/// Each render target supplies its own representation of the same icons.
pub trait IconSet {
    type Output;

    fn render(&self, icon: CardIcon) -> Self::Output;
}

/// A single summary card: icon, label, value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub icon: CardIcon,
    pub label: &'static str,
    pub value: u64,
}

impl SummaryCard {
    pub fn new(icon: CardIcon, label: &'static str, value: u64) -> Self {
        Self { icon, label, value }
    }
}

/// Build the card row for a payload
///
/// "Latest (24h)" counts entries of `latest` created within `window` of the
/// clock's current instant; "Latest (10)" is the size of `latest` itself.
pub fn summary_cards(
    payload: &SummaryPayload,
    normalizer: &dyn TimestampNormalizer,
    clock: &dyn Clock,
    window: Duration,
) -> [SummaryCard; 3] {
    let now = clock.now();
    let since = now - window;

    let recent = payload
        .latest
        .iter()
        .filter_map(|t| t.created_at.as_deref())
        .filter_map(|raw| normalizer.normalize(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .filter(|dt| *dt > since && *dt <= now)
        .count() as u64;

    [
        SummaryCard::new(CardIcon::People, "Total Tenants", payload.total_count),
        SummaryCard::new(CardIcon::Bell, "Latest (24h)", recent),
        SummaryCard::new(CardIcon::Archive, "Latest (10)", payload.latest.len() as u64),
    ]
}
