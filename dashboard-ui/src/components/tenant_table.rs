//! Latest Tenants Table

use leptos::*;
use tenant_dashboard::select_tenant;

use crate::state::GlobalState;

/// Console line emitted when a row is clicked
pub fn navigation_message(school_id: &str) -> String {
    format!("Navigate to details for schoolId: {}", school_id)
}

/// Table of the most recently created tenants
#[component]
pub fn TenantTable() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <table class="w-full text-left text-sm">
            <thead class="text-gray-400 border-b border-gray-700">
                <tr>
                    <th class="py-2">"School ID"</th>
                    <th class="py-2">"Name"</th>
                    <th class="py-2">"Created At"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let latest = state.dashboard.with(|s| s.latest().to_vec());

                    if latest.is_empty() {
                        return view! {
                            <tr>
                                <td colspan="3" class="py-4 text-gray-400">"No tenants yet."</td>
                            </tr>
                        }.into_view();
                    }

                    latest.into_iter().map(|tenant| {
                        let school_id = tenant.school_id.clone();
                        let on_click = move |_| {
                            select_tenant(&school_id);
                            web_sys::console::log_1(&navigation_message(&school_id).into());
                        };

                        view! {
                            <tr
                                on:click=on_click
                                class="border-b border-gray-700 last:border-0 hover:bg-gray-700 cursor-pointer"
                            >
                                <td class="py-2 font-mono">{tenant.school_id.clone()}</td>
                                <td class="py-2">{tenant.display_name().to_string()}</td>
                                <td class="py-2 text-gray-400">
                                    {tenant.created_at.clone().unwrap_or_else(|| "-".to_string())}
                                </td>
                            </tr>
                        }
                    }).collect_view()
                }}
            </tbody>
        </table>
    }
}
