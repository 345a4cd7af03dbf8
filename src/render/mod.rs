//! Terminal Rendering
//!
//! Text rendition of the dashboard screen: summary cards, view-mode line,
//! signup bar chart and the latest-tenants table.

mod chart;
mod table;

pub use chart::render_chart;
pub use table::render_table;

use serde::Deserialize;
use std::fmt::Write;

use crate::aggregate::SignupSeries;
use crate::models::TenantRecord;
use crate::screen::{CardIcon, IconSet, ScreenPhase, SummaryCard};

/// Width of one card column
const CARD_WIDTH: usize = 24;

/// Which glyphs to use for card icons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconStyle {
    #[default]
    Emoji,
    Ascii,
}

/// Terminal icon set
#[derive(Debug, Clone, Copy)]
pub struct TerminalIcons {
    style: IconStyle,
}

impl TerminalIcons {
    pub fn new(style: IconStyle) -> Self {
        Self { style }
    }
}

impl IconSet for TerminalIcons {
    type Output = &'static str;

    fn render(&self, icon: CardIcon) -> &'static str {
        match (self.style, icon) {
            (IconStyle::Emoji, CardIcon::People) => "👥",
            (IconStyle::Emoji, CardIcon::Bell) => "🔔",
            (IconStyle::Emoji, CardIcon::Archive) => "📦",
            (IconStyle::Ascii, CardIcon::People) => "[P]",
            (IconStyle::Ascii, CardIcon::Bell) => "[!]",
            (IconStyle::Ascii, CardIcon::Archive) => "[#]",
        }
    }
}

/// Layout options for the terminal screen
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub chart_height: usize,
    pub bar_width: usize,
    pub icons: IconStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            chart_height: 10,
            bar_width: 8,
            icons: IconStyle::Emoji,
        }
    }
}

/// Render the card row
pub fn render_cards(cards: &[SummaryCard], icons: &impl IconSet<Output = &'static str>) -> String {
    let mut labels = String::new();
    let mut values = String::new();

    for card in cards {
        let label = format!("{} {}", icons.render(card.icon), card.label);
        // Emoji glyphs occupy two columns but count as one char
        let width = label.chars().count() + usize::from(!label.is_ascii());
        let pad = CARD_WIDTH.saturating_sub(width);
        let _ = write!(labels, "{}{}", label, " ".repeat(pad));
        let _ = write!(values, "{:<width$}", card.value, width = CARD_WIDTH);
    }

    format!("{}\n{}\n", labels.trim_end(), values.trim_end())
}

/// Render the whole screen
pub fn render_dashboard(
    phase: ScreenPhase,
    cards: &[SummaryCard],
    series: &SignupSeries,
    latest: &[TenantRecord],
    options: &RenderOptions,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Dashboard");
    let _ = writeln!(output, "=========");
    let _ = writeln!(output);

    if phase == ScreenPhase::LoadingInitial {
        let _ = writeln!(output, "Loading...");
        let _ = writeln!(output);
    }

    output.push_str(&render_cards(cards, &TerminalIcons::new(options.icons)));
    let _ = writeln!(output);

    let _ = writeln!(output, "View Mode: {}", series.granularity.display_name());
    let _ = writeln!(output);

    let _ = writeln!(output, "Tenant Signups Over Time");
    output.push_str(&render_chart(series, options.chart_height, options.bar_width));
    let _ = writeln!(output);

    let _ = writeln!(output, "Latest Tenants");
    output.push_str(&render_table(latest));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{ChartPoint, Granularity};

    fn cards() -> Vec<SummaryCard> {
        vec![
            SummaryCard::new(CardIcon::People, "Total Tenants", 42),
            SummaryCard::new(CardIcon::Bell, "Latest (24h)", 1),
            SummaryCard::new(CardIcon::Archive, "Latest (10)", 3),
        ]
    }

    #[test]
    fn test_ascii_cards() {
        let out = render_cards(&cards(), &TerminalIcons::new(IconStyle::Ascii));
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[P] Total Tenants"));
        assert!(lines[0].contains("[!] Latest (24h)"));
        assert!(lines[1].starts_with("42"));
        assert!(lines[1].trim_end().ends_with('3'));
    }

    #[test]
    fn test_emoji_icons() {
        let icons = TerminalIcons::new(IconStyle::Emoji);
        assert_eq!(icons.render(CardIcon::People), "👥");
        assert_eq!(icons.render(CardIcon::Archive), "📦");
    }

    #[test]
    fn test_dashboard_sections() {
        let series = SignupSeries {
            granularity: Granularity::Month,
            points: vec![ChartPoint {
                label: "Jun 2025".to_string(),
                signups: 3,
            }],
            skipped: 0,
        };
        let latest = vec![TenantRecord::new("S1").name("Oak Hill")];

        let out = render_dashboard(
            ScreenPhase::Loaded,
            &cards(),
            &series,
            &latest,
            &RenderOptions::default(),
        );

        assert!(out.starts_with("Dashboard\n"));
        assert!(!out.contains("Loading..."));
        assert!(out.contains("View Mode: Month-wise"));
        assert!(out.contains("Tenant Signups Over Time"));
        assert!(out.contains("Jun 2025"));
        assert!(out.contains("Oak Hill"));
    }

    #[test]
    fn test_loading_banner() {
        let out = render_dashboard(
            ScreenPhase::LoadingInitial,
            &cards(),
            &SignupSeries::default(),
            &[],
            &RenderOptions::default(),
        );
        assert!(out.contains("Loading..."));
    }
}
