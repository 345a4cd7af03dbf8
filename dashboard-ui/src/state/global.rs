//! Global Application State
//!
//! Reactive state management using Leptos signals.

use chrono::Duration;
use leptos::*;
use tenant_dashboard::{
    DashboardState, Granularity, SignupSeries, SummaryCard, SystemClock, ZoneSuffixNormalizer,
};

/// Window for the "Latest (24h)" card
pub const LATEST_WINDOW_HOURS: i64 = 24;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Screen state: phase, summary payload, last load error
    pub dashboard: RwSignal<DashboardState>,
    /// Chart granularity chosen in the selector
    pub granularity: RwSignal<Granularity>,
    /// Timestamp normalizer for createdAt values
    pub normalizer: StoredValue<ZoneSuffixNormalizer>,
    /// Chart series, re-aggregated only when the summary or granularity changes
    pub series: Memo<SignupSeries>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    provide_context(GlobalState::new());
}

impl GlobalState {
    pub fn new() -> Self {
        let dashboard = create_rw_signal(DashboardState::new());
        let granularity = create_rw_signal(Granularity::default());
        let normalizer = store_value(ZoneSuffixNormalizer::default());

        let series = create_memo(move |_| {
            let granularity = granularity.get();
            normalizer.with_value(|n| dashboard.with(|s| s.signup_series(granularity, n)))
        });

        Self {
            dashboard,
            granularity,
            normalizer,
            series,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.dashboard.with(|s| s.is_loading())
    }

    pub fn cards(&self) -> [SummaryCard; 3] {
        let window = Duration::hours(LATEST_WINDOW_HOURS);
        self.normalizer
            .with_value(|n| self.dashboard.with(|s| s.cards(n, &SystemClock, window)))
    }
}
