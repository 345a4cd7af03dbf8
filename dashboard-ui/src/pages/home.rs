//! Home Page
//!
//! The tenant dashboard screen: summary cards, signup chart and the latest
//! tenants table. The summary is fetched once when the page mounts.

use leptos::*;
use std::rc::Rc;
use tenant_dashboard::{DataLoader, Granularity, LoadOutcome, ScreenLifetime};

use crate::api::GlooSummarySource;
use crate::components::{Loading, SignupChart, StatCard, TenantTable};
use crate::state::GlobalState;

/// Home page component
#[component]
pub fn Home() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let lifetime = ScreenLifetime::new();
    let loader = Rc::new(DataLoader::new(GlooSummarySource::from_storage()));

    // Fetch the summary on mount
    let lifetime_for_load = lifetime.clone();
    create_effect(move |_| {
        let loader = Rc::clone(&loader);
        let lifetime = lifetime_for_load.clone();
        spawn_local(async move {
            match loader.load_once(&lifetime).await {
                LoadOutcome::AlreadyStarted | LoadOutcome::Discarded => {}
                outcome => {
                    if let LoadOutcome::Failed(e) = &outcome {
                        web_sys::console::error_1(
                            &format!("Failed to fetch tenant summary: {}", e).into(),
                        );
                    }
                    state.dashboard.update(|s| {
                        s.apply(outcome);
                    });
                }
            }
        });
    });

    on_cleanup(move || lifetime.dismiss());

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-400 mt-1">"Tenant signups at a glance"</p>
            </div>

            {move || {
                if state.is_loading() {
                    view! { <Loading /> }.into_view()
                } else {
                    view! { <Loaded /> }.into_view()
                }
            }}
        </div>
    }
}

/// Screen body once the first fetch has resolved
#[component]
fn Loaded() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <section class="grid grid-cols-1 md:grid-cols-3 gap-4">
            {move || {
                state.cards()
                    .into_iter()
                    .map(|card| view! { <StatCard card=card /> })
                    .collect_view()
            }}
        </section>

        <section class="bg-gray-800 rounded-xl p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-semibold">"Tenant Signups Over Time"</h2>
                <GranularitySelect />
            </div>

            <SignupChart />

            {move || {
                let skipped = state.series.with(|s| s.skipped);
                (skipped > 0).then(|| view! {
                    <p class="text-gray-500 text-xs mt-2">
                        {format!("{} records skipped: missing or unparseable createdAt", skipped)}
                    </p>
                })
            }}
        </section>

        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Latest Tenants"</h2>
            <TenantTable />
        </section>
    }
}

/// Date-wise / Month-wise selector
#[component]
fn GranularitySelect() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let on_change = move |ev| {
        if let Ok(granularity) = event_target_value(&ev).parse::<Granularity>() {
            state.granularity.set(granularity);
        }
    };

    view! {
        <select
            on:change=on_change
            prop:value=move || state.granularity.get().as_str()
            class="bg-gray-700 text-white rounded-lg px-3 py-2 text-sm"
        >
            {[Granularity::Day, Granularity::Month]
                .into_iter()
                .map(|g| view! { <option value=g.as_str()>{g.display_name()}</option> })
                .collect_view()}
        </select>
    }
}
