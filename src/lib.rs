//! # Tenant Dashboard
//!
//! Admin dashboard for the school tenant backend: headline tenant counts,
//! a signup chart bucketed by day or month, and the most recent tenants.
//!
//! ## Modules
//!
//! - [`models`]: Summary payload returned by the backend
//! - [`aggregate`]: Signup bucketing and timestamp normalization
//! - [`screen`]: Screen state machine, summary cards and the one-shot loader
//! - [`client`]: reqwest source for the summary endpoint (`native`)
//! - [`render`]: Terminal rendition of the screen (`native`)
//! - [`export`]: CSV/JSON export of the chart series (`native`)
//! - [`config`]: TOML configuration with environment overrides (`native`)
//!
//! The core (`models`, `aggregate`, `screen`, `clock`) has no native-only
//! dependencies and is shared with the WebAssembly dashboard.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tenant_dashboard::{
//!     BackendConfig, DashboardState, DataLoader, Granularity, HttpSummarySource,
//!     ScreenLifetime, ZoneSuffixNormalizer,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = DataLoader::new(HttpSummarySource::new(&BackendConfig::default())?);
//!     let mut state = DashboardState::new();
//!
//!     state.apply(loader.load_once(&ScreenLifetime::new()).await);
//!
//!     let series = state.signup_series(Granularity::Month, &ZoneSuffixNormalizer::default());
//!     for point in &series.points {
//!         println!("{}: {}", point.label, point.signups);
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod clock;
pub mod models;
pub mod screen;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod export;
#[cfg(feature = "native")]
pub mod render;

// Re-export top-level types for convenience
pub use aggregate::{
    aggregate_signups, axis_ticks, ChartPoint, Granularity, ParseGranularityError, SignupSeries,
    TimestampNormalizer, ZoneSuffixNormalizer,
};

pub use clock::{Clock, FixedClock, SystemClock};

pub use models::{SummaryPayload, TenantRecord};

pub use screen::{
    select_tenant, summary_cards, CardIcon, DashboardState, DataLoader, IconSet, LoadError,
    LoadOutcome, ScreenCommand, ScreenLifetime, ScreenPhase, SummaryCard, SummarySource,
    UnknownCommand,
};

#[cfg(feature = "native")]
pub use client::HttpSummarySource;

#[cfg(feature = "native")]
pub use config::{
    BackendConfig, Config, ConfigError, ConfigSearch, DashboardConfig, LoggingConfig,
    TimezoneConfig,
};

#[cfg(feature = "native")]
pub use export::{export_to_path, write_series, ExportError, ExportFormat};

#[cfg(feature = "native")]
pub use render::{render_dashboard, IconStyle, RenderOptions, TerminalIcons};
