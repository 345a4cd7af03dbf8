//! Loading Component

use leptos::*;

/// Full-width loading spinner
#[component]
pub fn Loading(
    #[prop(default = "Loading...")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 space-y-3">
            <div class="loading-spinner w-8 h-8" />
            <span class="text-gray-400 text-sm">{label}</span>
        </div>
    }
}
