//! Settings Page
//!
//! API connection configuration and tracked-company reference.

use leptos::*;

use crate::api;
use crate::state::global::{GlobalState, TRACKED_COMPANIES};

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Configure your Spyglass dashboard"</p>
            </div>

            // API Connection
            <ApiSettings />

            // Tracked companies
            <CompanyLegend />

            // About
            <AboutSection />
        </div>
    }
}

/// API connection settings
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<bool>);
    let (api_version, set_api_version) = create_signal(None::<String>);

    let state_for_test = state.clone();
    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);

        let url = api_url.get();
        api::set_api_base(&url);

        let state_clone = state_for_test.clone();
        spawn_local(async move {
            match api::check_health().await {
                Ok(info) => {
                    set_test_result.set(Some(true));
                    set_api_version.set(info.version);
                    state_clone.show_success("Connection successful!");
                }
                Err(e) => {
                    set_test_result.set(Some(false));
                    state_clone.show_error(&format!("Connection failed: {}", e));
                }
            }
            set_testing.set(false);
        });
    };

    let state_for_save = state.clone();
    let save_url = move |_| {
        let url = api_url.get();
        api::set_api_base(&url);
        state_for_save.show_success("API URL saved");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <div class="space-y-4">
                // API URL
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Spyglass API URL"</label>
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            prop:value=move || api_url.get()
                            on:input=move |ev| set_api_url.set(event_target_value(&ev))
                            class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                        <button
                            on:click=test_connection
                            disabled=move || testing.get()
                            class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                                   rounded-lg font-medium transition-colors"
                        >
                            {move || if testing.get() { "Testing..." } else { "Test" }}
                        </button>
                        <button
                            on:click=save_url
                            class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                                   rounded-lg font-medium transition-colors"
                        >
                            "Save"
                        </button>
                    </div>
                </div>

                // Connection status
                <div class="flex items-center space-x-2">
                    <span class="text-sm text-gray-400">"Status:"</span>
                    {move || {
                        match test_result.get() {
                            Some(true) => view! {
                                <span class="text-green-400">"✓ Connected"</span>
                            }.into_view(),
                            Some(false) => view! {
                                <span class="text-red-400">"✕ Failed"</span>
                            }.into_view(),
                            None => view! {
                                <span class="text-gray-400">"Not tested"</span>
                            }.into_view(),
                        }
                    }}
                    {move || api_version.get().map(|v| view! {
                        <span class="text-sm text-gray-500">{format!("API v{}", v)}</span>
                    })}
                </div>
            </div>
        </section>
    }
}

/// Tracked companies and their display colors
#[component]
fn CompanyLegend() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Tracked Companies"</h2>
            <p class="text-gray-400 text-sm mb-4">
                "Each company keeps one color across markers, charts, and badges."
            </p>

            <div class="grid md:grid-cols-2 lg:grid-cols-5 gap-4">
                {TRACKED_COMPANIES.into_iter().map(|company| {
                    let color = state.color_for(company);
                    view! {
                        <div class="flex items-center space-x-3 p-3 bg-gray-700 rounded-lg">
                            <span
                                class="w-4 h-4 rounded-full"
                                style=format!("background-color: {}", color)
                            />
                            <span class="font-medium">{company}</span>
                        </div>
                    }
                }).collect_view()}
            </div>
        </section>
    }
}

/// About section
#[component]
fn AboutSection() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"About Spyglass"</h2>

            <div class="space-y-4 text-gray-300">
                <p>
                    "Spyglass tracks the competitive landscape of the EMS sector: "
                    "facilities, investments, sentiment, and strategic signals distilled "
                    "from filings, news, and earnings calls."
                </p>

                <div class="grid md:grid-cols-2 gap-4 text-sm">
                    <div class="p-4 bg-gray-700 rounded-lg">
                        <h3 class="font-medium text-white mb-2">"Built With"</h3>
                        <ul class="space-y-1 text-gray-400">
                            <li>"• Leptos (WASM UI Framework)"</li>
                            <li>"• Leaflet (Facility Map)"</li>
                            <li>"• Spyglass Analytics API"</li>
                        </ul>
                    </div>

                    <div class="p-4 bg-gray-700 rounded-lg">
                        <h3 class="font-medium text-white mb-2">"Coverage"</h3>
                        <ul class="space-y-1 text-gray-400">
                            <li>"• Global facility footprints"</li>
                            <li>"• CapEx and AI-investment signals"</li>
                            <li>"• Filing sentiment"</li>
                            <li>"• Alerts and earnings calendar"</li>
                        </ul>
                    </div>
                </div>

                <p class="text-sm text-gray-400">
                    "Version 0.1.0"
                </p>
            </div>
        </section>
    }
}
