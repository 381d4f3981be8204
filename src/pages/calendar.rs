//! Calendar Page
//!
//! Earnings calendar: yearly event table, upcoming events, and sync.

use leptos::*;

use crate::api;
use crate::components::{CompanyBadge, ListSkeleton, StatCard};
use crate::state::global::GlobalState;

/// Earnings calendar page
#[component]
pub fn Calendar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let events = create_rw_signal(Vec::<api::CalendarEvent>::new());
    let upcoming = create_rw_signal(Vec::<api::CalendarEvent>::new());
    let summary = create_rw_signal(None::<api::CalendarSummary>);
    let selected_year = create_rw_signal(current_year());
    let (loading, set_loading) = create_signal(true);
    let (syncing, set_syncing) = create_signal(false);

    // Refetch when the selected year changes (and on mount)
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let year = selected_year.get();
        let state = state_for_effect.clone();
        spawn_local(async move {
            set_loading.set(true);

            match api::fetch_calendar_events(year).await {
                Ok(data) => {
                    events.set(data);
                    state.mark_refreshed();
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }

            match api::fetch_upcoming_events(60).await {
                Ok(data) => upcoming.set(data),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch upcoming events: {}", e).into(),
                    );
                }
            }

            match api::fetch_calendar_summary().await {
                Ok(data) => summary.set(Some(data)),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch calendar summary: {}", e).into(),
                    );
                }
            }

            set_loading.set(false);
        });
    });

    let state_for_sync = state.clone();
    let sync = move |_| {
        set_syncing.set(true);

        let state = state_for_sync.clone();
        spawn_local(async move {
            match api::sync_calendar().await {
                Ok(_) => {
                    state.show_success("Calendar synced");
                    // Retrigger the fetch effect
                    selected_year.update(|_| {});
                }
                Err(e) => state.show_error(&e),
            }
            set_syncing.set(false);
        });
    };

    view! {
        <div class="space-y-8">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Earnings Calendar"</h1>
                    <p class="text-gray-400 mt-1">"Upcoming and historical earnings events"</p>
                </div>

                <button
                    on:click=sync
                    disabled=move || syncing.get()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors"
                >
                    {move || if syncing.get() { "Syncing..." } else { "Sync Calendar" }}
                </button>
            </div>

            // Summary cards
            <SummaryCards summary=summary />

            <div class="grid lg:grid-cols-3 gap-8">
                // Event table
                <div class="lg:col-span-2">
                    <section class="bg-gray-800 rounded-xl p-6">
                        <div class="flex items-center justify-between mb-4">
                            <h2 class="text-xl font-semibold">"Events"</h2>
                            <YearSelect selected=selected_year />
                        </div>

                        {move || {
                            if loading.get() {
                                view! { <ListSkeleton count=6 /> }.into_view()
                            } else {
                                view! { <EventTable events=events /> }.into_view()
                            }
                        }}
                    </section>
                </div>

                // Upcoming rail
                <div>
                    <section class="bg-gray-800 rounded-xl p-6 sticky top-4">
                        <h2 class="text-xl font-semibold mb-4">"Next 60 Days"</h2>
                        <UpcomingList upcoming=upcoming />
                    </section>
                </div>
            </div>
        </div>
    }
}

/// Calendar summary stat cards
#[component]
fn SummaryCards(summary: RwSignal<Option<api::CalendarSummary>>) -> impl IntoView {
    let count = move |pick: fn(&api::CalendarSummary) -> usize| {
        summary
            .get()
            .map(|s| pick(&s).to_string())
            .unwrap_or_else(|| "—".to_string())
    };

    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            <StatCard
                label="Total Events"
                value=Signal::derive(move || count(|s| s.total_events))
                icon="🗓"
            />
            <StatCard
                label="Confirmed"
                value=Signal::derive(move || count(|s| s.confirmed_events))
                icon="✅"
            />
            <StatCard
                label="Next 30 Days"
                value=Signal::derive(move || count(|s| s.upcoming_30_days))
                icon="⏳"
            />
            <StatCard
                label="Next Event"
                value=Signal::derive(move || {
                    summary.get()
                        .and_then(|s| s.next_event)
                        .map(|e| e.company)
                        .unwrap_or_else(|| "—".to_string())
                })
                caption="Earliest estimated date"
                icon="📌"
            />
        </div>
    }
}

/// Year dropdown around the current year
#[component]
fn YearSelect(selected: RwSignal<i32>) -> impl IntoView {
    let years: Vec<i32> = {
        let current = current_year();
        (current - 2..=current + 1).collect()
    };

    view! {
        <select
            on:change=move |ev| {
                if let Ok(year) = event_target_value(&ev).parse() {
                    selected.set(year);
                }
            }
            class="bg-gray-700 rounded-lg px-3 py-2 text-sm
                   border border-gray-600 focus:border-primary-500 focus:outline-none"
        >
            {years.into_iter().map(|year| view! {
                <option value=year.to_string() selected=move || selected.get() == year>
                    {year.to_string()}
                </option>
            }).collect_view()}
        </select>
    }
}

/// Event table for the selected year
#[component]
fn EventTable(events: RwSignal<Vec<api::CalendarEvent>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="overflow-x-auto">
            <table class="w-full text-sm">
                <thead>
                    <tr class="text-left text-gray-400 border-b border-gray-700">
                        <th class="pb-3 pr-4">"Company"</th>
                        <th class="pb-3 pr-4">"Quarter"</th>
                        <th class="pb-3 pr-4">"Date"</th>
                        <th class="pb-3">"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let list = events.get();
                        if list.is_empty() {
                            return view! {
                                <tr>
                                    <td colspan="4" class="py-8 text-center text-gray-400">
                                        "No events for this year"
                                    </td>
                                </tr>
                            }.into_view();
                        }

                        let state = state.clone();
                        list.into_iter().map(|event| {
                            let color = state.color_for(&event.company);
                            let status_class = if event.confirmed {
                                "text-green-400"
                            } else {
                                "text-gray-400"
                            };

                            view! {
                                <tr class="border-b border-gray-700 last:border-0">
                                    <td class="py-3 pr-4">
                                        <CompanyBadge company=event.company.clone() color=color />
                                    </td>
                                    <td class="py-3 pr-4 text-gray-300">
                                        {format!("{} FY{}", event.quarter, event.fiscal_year)}
                                    </td>
                                    <td class="py-3 pr-4 text-gray-300">{event.estimated_date.clone()}</td>
                                    <td class=format!("py-3 capitalize {}", status_class)>
                                        {if event.confirmed { "Confirmed".to_string() } else { event.status.clone() }}
                                    </td>
                                </tr>
                            }
                        }).collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}

/// Upcoming events list
#[component]
fn UpcomingList(upcoming: RwSignal<Vec<api::CalendarEvent>>) -> impl IntoView {
    view! {
        <div class="space-y-3">
            {move || {
                let list = upcoming.get();
                if list.is_empty() {
                    return view! {
                        <p class="text-gray-400 text-sm">"Nothing scheduled in this window"</p>
                    }.into_view();
                }

                list.into_iter().map(|event| {
                    let when = match event.days_until {
                        Some(days) if days <= 0 => "Today".to_string(),
                        Some(1) => "Tomorrow".to_string(),
                        Some(days) => format!("{} days", days),
                        None => event.estimated_date.clone(),
                    };

                    view! {
                        <div class="flex items-center justify-between p-3 bg-gray-700 rounded-lg">
                            <div>
                                <div class="font-medium text-sm">{event.company}</div>
                                <div class="text-xs text-gray-400">
                                    {format!("{} · {}", event.quarter, event.estimated_date)}
                                </div>
                            </div>
                            <span class="text-xs text-primary-400 font-medium">{when}</span>
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}

/// Current year in UTC.
fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Utc::now().year()
}
