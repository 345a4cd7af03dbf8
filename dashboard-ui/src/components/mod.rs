//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod loading;
pub mod signup_chart;
pub mod summary_card;
pub mod tenant_table;

pub use loading::Loading;
pub use signup_chart::SignupChart;
pub use summary_card::StatCard;
pub use tenant_table::TenantTable;
