//! Summary Payload Types
//!
//! Wire types returned by the backend's `/list` endpoint.

use serde::{Deserialize, Serialize};

/// Full response of the summary endpoint
///
/// Replaces any previously loaded summary wholesale; there is no merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPayload {
    /// Total number of tenants known to the backend
    #[serde(default)]
    pub total_count: u64,
    /// Most recently created tenants
    #[serde(default)]
    pub latest: Vec<TenantRecord>,
    /// Every tenant, used for the signup chart
    #[serde(default)]
    pub all: Vec<TenantRecord>,
}

/// A single tenant (school) as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRecord {
    pub school_id: String,
    #[serde(default)]
    pub school_name: Option<String>,
    /// Creation timestamp, possibly carrying a zone abbreviation ("... IST")
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TenantRecord {
    pub fn new(school_id: impl Into<String>) -> Self {
        Self {
            school_id: school_id.into(),
            school_name: None,
            created_at: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.school_name = Some(name.into());
        self
    }

    pub fn created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Name to show in tables, `N/A` when the backend sent none
    pub fn display_name(&self) -> &str {
        match self.school_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "N/A",
        }
    }
}
