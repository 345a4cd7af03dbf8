//! Summary Card Component
//!
//! Displays one headline number with its icon.

use leptos::*;
use tenant_dashboard::{CardIcon, IconSet, SummaryCard};

/// Icons as HTML glyph views
pub struct HtmlIcons;

impl IconSet for HtmlIcons {
    type Output = View;

    fn render(&self, icon: CardIcon) -> View {
        let (glyph, color) = icon_style(icon);
        view! {
            <span class=format!("text-3xl rounded-full p-3 bg-gray-700 {}", color)>{glyph}</span>
        }
        .into_view()
    }
}

fn icon_style(icon: CardIcon) -> (&'static str, &'static str) {
    match icon {
        CardIcon::People => ("👥", "text-blue-400"),
        CardIcon::Bell => ("🔔", "text-yellow-400"),
        CardIcon::Archive => ("📦", "text-green-400"),
    }
}

/// Summary card component
#[component]
pub fn StatCard(card: SummaryCard) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700 flex items-center space-x-4">
            {HtmlIcons.render(card.icon)}
            <div>
                <div class="text-gray-400 text-sm">{card.label}</div>
                <div class="text-3xl font-bold mt-1">{card.value}</div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons_are_distinct() {
        let glyphs: Vec<_> = [CardIcon::People, CardIcon::Bell, CardIcon::Archive]
            .into_iter()
            .map(|icon| icon_style(icon).0)
            .collect();
        assert_eq!(glyphs, vec!["👥", "🔔", "📦"]);
    }
}
