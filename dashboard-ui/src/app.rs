//! App Root Component

use leptos::*;

use crate::pages::Home;
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <header class="bg-gray-800 border-b border-gray-700 py-4 px-4">
                <div class="container mx-auto flex items-center space-x-3">
                    <span class="text-2xl">"🏫"</span>
                    <span class="text-xl font-bold">"Tenant Admin"</span>
                </div>
            </header>

            <main class="flex-1 container mx-auto px-4 py-8">
                <Home />
            </main>
        </div>
    }
}
