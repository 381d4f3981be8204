//! Reports Page
//!
//! Report export: format listing, per-company downloads, recent export
//! history.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::components::CardSkeleton;
use crate::state::global::{GlobalState, TRACKED_COMPANIES};

const RECENT_EXPORTS_KEY: &str = "spyglass_recent_exports";
const RECENT_EXPORTS_LIMIT: usize = 5;

/// A locally remembered export.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
struct RecentExport {
    company: String,
    format: String,
    timestamp: i64,
}

/// Reports page component
#[component]
pub fn Reports() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let formats = create_rw_signal(Vec::<api::ExportFormat>::new());
    let recent = create_rw_signal(load_recent_exports());
    let selected_company = create_rw_signal("all".to_string());
    let (loading, set_loading) = create_signal(true);
    let (downloading, set_downloading) = create_signal(None::<String>);

    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            set_loading.set(true);

            match api::fetch_export_formats().await {
                Ok(data) => {
                    formats.set(data);
                    state.mark_refreshed();
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }

            set_loading.set(false);
        });
    });

    let state_for_download = state.clone();
    let download = move |format: api::ExportFormat| {
        let company = selected_company.get();
        set_downloading.set(Some(format.id.clone()));

        let state = state_for_download.clone();
        spawn_local(async move {
            match api::download_report(&format, &company).await {
                Ok((filename, bytes)) => {
                    if let Err(e) = save_to_disk(&filename, &bytes) {
                        state.show_error(&e);
                    } else {
                        recent.update(|list| {
                            list.insert(
                                0,
                                RecentExport {
                                    company: company.clone(),
                                    format: format.id.clone(),
                                    timestamp: chrono::Utc::now().timestamp_millis(),
                                },
                            );
                            list.truncate(RECENT_EXPORTS_LIMIT);
                        });
                        store_recent_exports(&recent.get_untracked());
                        state.show_success(&format!("Downloaded {}", filename));
                    }
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
            set_downloading.set(None);
        });
    };

    view! {
        <div class="space-y-8">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Reports"</h1>
                <p class="text-gray-400 mt-1">"Export competitive-intelligence reports"</p>
            </div>

            // Scope selector
            <div class="flex items-center gap-2 flex-wrap">
                <span class="text-sm text-gray-400 mr-2">"Report scope:"</span>
                <ScopeButton label="All Companies" scope="all" selected=selected_company />
                {TRACKED_COMPANIES.into_iter().map(|company| view! {
                    <ScopeButton label=company scope=company selected=selected_company />
                }).collect_view()}
            </div>

            // Format cards
            {move || {
                if loading.get() {
                    view! {
                        <div class="grid md:grid-cols-3 gap-4">
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                        </div>
                    }.into_view()
                } else {
                    let available = formats.get();
                    if available.is_empty() {
                        view! {
                            <section class="bg-gray-800 rounded-xl p-6 text-center">
                                <p class="text-gray-400">"No export formats available"</p>
                            </section>
                        }.into_view()
                    } else {
                        let download = download.clone();
                        view! {
                            <div class="grid md:grid-cols-3 gap-4">
                                {available.into_iter().map(|format| {
                                    let download = download.clone();
                                    view! {
                                        <FormatCard
                                            format=format
                                            downloading=downloading
                                            on_download=Callback::new(move |f| download(f))
                                        />
                                    }
                                }).collect_view()}
                            </div>
                        }.into_view()
                    }
                }
            }}

            // Recent exports
            <RecentExports recent=recent />
        </div>
    }
}

/// Report scope toggle button
#[component]
fn ScopeButton(
    label: &'static str,
    scope: &'static str,
    selected: RwSignal<String>,
) -> impl IntoView {
    view! {
        <button
            on:click=move |_| selected.set(scope.to_string())
            class=move || {
                let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                if selected.get() == scope {
                    format!("{} bg-primary-600 text-white", base)
                } else {
                    format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                }
            }
        >
            {label}
        </button>
    }
}

/// One export format card with its download button
#[component]
fn FormatCard(
    format: api::ExportFormat,
    downloading: ReadSignal<Option<String>>,
    on_download: Callback<api::ExportFormat>,
) -> impl IntoView {
    let format_for_click = format.clone();
    let format_id = format.id.clone();
    let available = format.available;
    let is_downloading = create_memo(move |_| downloading.get().as_deref() == Some(&format_id));

    let icon = match format.id.as_str() {
        "pdf" => "📄",
        "excel" => "📊",
        "powerpoint" => "📽",
        _ => "🗂",
    };

    view! {
        <div class="bg-gray-800 rounded-xl p-6 border border-gray-700 flex flex-col">
            <div class="flex items-center space-x-3 mb-3">
                <span class="text-3xl">{icon}</span>
                <div>
                    <h3 class="font-semibold">{format.name.clone()}</h3>
                    <span class="text-xs text-gray-500">{format!(".{}", format.extension)}</span>
                </div>
            </div>

            <p class="text-sm text-gray-400 flex-1">{format.description.clone()}</p>

            <button
                on:click=move |_| on_download.call(format_for_click.clone())
                disabled=move || !available || is_downloading.get()
                class="mt-4 px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       rounded-lg text-sm font-medium transition-colors"
            >
                {move || {
                    if is_downloading.get() {
                        "Generating..."
                    } else if available {
                        "Download"
                    } else {
                        "Unavailable"
                    }
                }}
            </button>
        </div>
    }
}

/// Recent export history
#[component]
fn RecentExports(recent: RwSignal<Vec<RecentExport>>) -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Recent Exports"</h2>

            {move || {
                let list = recent.get();
                if list.is_empty() {
                    return view! {
                        <p class="text-gray-400 text-sm">"No exports yet"</p>
                    }.into_view();
                }

                list.into_iter().map(|entry| {
                    let time = chrono::DateTime::from_timestamp_millis(entry.timestamp)
                        .map(|dt| dt.format("%b %d, %H:%M").to_string())
                        .unwrap_or_default();

                    view! {
                        <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0 text-sm">
                            <span class="capitalize">
                                {format!("{} · {}", entry.company, entry.format)}
                            </span>
                            <span class="text-gray-400">{time}</span>
                        </div>
                    }
                }).collect_view()
            }}
        </section>
    }
}

/// Hand a downloaded report to the browser via a Blob object URL.
fn save_to_disk(filename: &str, bytes: &[u8]) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts)
        .map_err(|_| "Failed to build blob".to_string())?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Failed to create object URL".to_string())?;

    let anchor = document
        .create_element("a")
        .map_err(|_| "Failed to create anchor".to_string())?;
    let _ = anchor.set_attribute("href", &url);
    let _ = anchor.set_attribute("download", filename);

    if let Some(element) = anchor.dyn_ref::<web_sys::HtmlElement>() {
        element.click();
    }

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Load the export history from local storage.
fn load_recent_exports() -> Vec<RecentExport> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    let Ok(Some(storage)) = window.local_storage() else {
        return Vec::new();
    };
    let Ok(Some(raw)) = storage.get_item(RECENT_EXPORTS_KEY) else {
        return Vec::new();
    };

    serde_json::from_str(&raw).unwrap_or_default()
}

/// Persist the export history to local storage.
fn store_recent_exports(recent: &[RecentExport]) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(raw) = serde_json::to_string(recent) {
                let _ = storage.set_item(RECENT_EXPORTS_KEY, &raw);
            }
        }
    }
}
