//! Timestamp Normalization
//!
//! Backend timestamps arrive as local wall-clock strings with a trailing zone
//! abbreviation (`2025-06-22T10:00:00 IST`). The normalizer resolves the
//! abbreviation to an offset and converts to the dashboard's display offset.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// India Standard Time, the backend's native zone
pub const IST_OFFSET_MINUTES: i32 = 5 * 60 + 30;

/// Naive layouts accepted after the zone suffix is removed
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Strategy for turning a raw `createdAt` string into an instant
pub trait TimestampNormalizer {
    /// Returns the instant expressed in the display offset, or `None` if the
    /// string cannot be interpreted.
    fn normalize(&self, raw: &str) -> Option<DateTime<FixedOffset>>;
}

/// Normalizer driven by a table of known zone abbreviations
#[derive(Debug, Clone)]
pub struct ZoneSuffixNormalizer {
    suffixes: HashMap<String, FixedOffset>,
    display: FixedOffset,
}

fn zone_suffix() -> &'static Regex {
    static ZONE_SUFFIX: OnceLock<Regex> = OnceLock::new();
    // Literal pattern, cannot fail to compile
    ZONE_SUFFIX.get_or_init(|| {
        Regex::new(r"^(.*\S)\s+([A-Za-z]{2,5})$").expect("zone suffix pattern is valid")
    })
}

/// Build an offset from minutes east of UTC
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

impl ZoneSuffixNormalizer {
    /// Create a normalizer with no known suffixes
    pub fn new(display: FixedOffset) -> Self {
        Self {
            suffixes: HashMap::new(),
            display,
        }
    }

    /// Register a zone abbreviation (case-insensitive)
    pub fn with_suffix(mut self, abbreviation: &str, offset: FixedOffset) -> Self {
        self.suffixes
            .insert(abbreviation.trim().to_ascii_uppercase(), offset);
        self
    }

    /// Offset every normalized instant is expressed in
    pub fn display_offset(&self) -> FixedOffset {
        self.display
    }

    fn split_suffix<'a>(&self, raw: &'a str) -> Option<(&'a str, Option<FixedOffset>)> {
        match zone_suffix().captures(raw) {
            Some(caps) => {
                let abbreviation = caps.get(2)?.as_str().to_ascii_uppercase();
                // Unknown abbreviations are rejected rather than guessed
                let offset = *self.suffixes.get(&abbreviation)?;
                Some((caps.get(1)?.as_str(), Some(offset)))
            }
            None => Some((raw, None)),
        }
    }
}

impl Default for ZoneSuffixNormalizer {
    fn default() -> Self {
        let ist = offset_from_minutes(IST_OFFSET_MINUTES).unwrap_or(Utc.fix());
        Self::new(ist)
            .with_suffix("IST", ist)
            .with_suffix("UTC", Utc.fix())
            .with_suffix("GMT", Utc.fix())
    }
}

impl TimestampNormalizer for ZoneSuffixNormalizer {
    fn normalize(&self, raw: &str) -> Option<DateTime<FixedOffset>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (body, zone) = self.split_suffix(trimmed)?;

        // An explicit offset wins over any abbreviation
        if let Ok(dt) = DateTime::parse_from_rfc3339(body) {
            return Some(dt.with_timezone(&self.display));
        }

        let naive = parse_naive(body)?;
        let local = zone
            .unwrap_or(self.display)
            .from_local_datetime(&naive)
            .single()?;

        Some(local.with_timezone(&self.display))
    }
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
