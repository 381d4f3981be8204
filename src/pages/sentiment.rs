//! Sentiment Page
//!
//! Filing-sentiment scores and per-company language breakdown.

use leptos::*;

use crate::api;
use crate::components::{CardSkeleton, CompanyBadge, ListSkeleton, StatCard};
use crate::state::global::GlobalState;

/// Sentiment analysis page
#[component]
pub fn Sentiment() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let dashboard = create_rw_signal(None::<api::SentimentDashboard>);
    let comparison = create_rw_signal(Vec::<api::CompanySentiment>::new());
    let (loading, set_loading) = create_signal(true);

    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            set_loading.set(true);

            match api::fetch_sentiment_dashboard().await {
                Ok(data) => {
                    dashboard.set(Some(data));
                    state.mark_refreshed();
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }

            match api::fetch_sentiment_comparison().await {
                Ok(data) => comparison.set(data),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch sentiment comparison: {}", e).into(),
                    );
                }
            }

            set_loading.set(false);
        });
    });

    view! {
        <div class="space-y-8">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Sentiment Analysis"</h1>
                <p class="text-gray-400 mt-1">"Management tone across SEC filings and earnings calls"</p>
            </div>

            // Summary cards
            {move || {
                if loading.get() {
                    view! {
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                        </div>
                    }.into_view()
                } else {
                    view! { <SentimentCards dashboard=dashboard /> }.into_view()
                }
            }}

            // Score bars per company
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Sentiment Scores"</h2>
                {move || {
                    if loading.get() {
                        view! { <ListSkeleton count=5 /> }.into_view()
                    } else {
                        view! { <ScoreBars dashboard=dashboard /> }.into_view()
                    }
                }}
            </section>

            // Detailed language breakdown
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Language Breakdown"</h2>
                <BreakdownTable comparison=comparison />
            </section>
        </div>
    }
}

/// Sentiment summary stat cards
#[component]
fn SentimentCards(dashboard: RwSignal<Option<api::SentimentDashboard>>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            <StatCard
                label="Most Positive"
                value=Signal::derive(move || {
                    dashboard.get()
                        .and_then(|d| d.summary.most_positive)
                        .unwrap_or_else(|| "N/A".to_string())
                })
                icon="😊"
            />
            <StatCard
                label="Most Negative"
                value=Signal::derive(move || {
                    dashboard.get()
                        .and_then(|d| d.summary.most_negative)
                        .unwrap_or_else(|| "N/A".to_string())
                })
                icon="😟"
            />
            <StatCard
                label="Most AI-Focused"
                value=Signal::derive(move || {
                    dashboard.get()
                        .and_then(|d| d.summary.most_ai_focused)
                        .unwrap_or_else(|| "N/A".to_string())
                })
                icon="🧠"
            />
            <StatCard
                label="Average Score"
                value=Signal::derive(move || {
                    dashboard.get()
                        .map(|d| format!("{:+.2}", d.summary.average_sentiment))
                        .unwrap_or_else(|| "—".to_string())
                })
                caption="-1 bearish to +1 bullish"
                icon="⚖️"
            />
        </div>
    }
}

/// Horizontal score bars, one per company
#[component]
fn ScoreBars(dashboard: RwSignal<Option<api::SentimentDashboard>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="space-y-4">
            {move || {
                let companies = dashboard.get().map(|d| d.companies).unwrap_or_default();

                if companies.is_empty() {
                    return view! {
                        <p class="text-gray-400 text-sm">"No sentiment data yet"</p>
                    }.into_view();
                }

                let state = state.clone();
                companies.into_iter().map(|entry| {
                    let color = state.color_for(&entry.company);
                    // Scores run -1..1; map to 0..100% of the bar width
                    let percent = ((entry.sentiment_score + 1.0) / 2.0 * 100.0).clamp(0.0, 100.0);
                    let (trend_arrow, trend_color) = match entry.trend.as_str() {
                        "improving" => ("↑", "text-green-400"),
                        "declining" => ("↓", "text-red-400"),
                        _ => ("→", "text-gray-400"),
                    };

                    view! {
                        <div>
                            <div class="flex items-center justify-between mb-1">
                                <CompanyBadge company=entry.company.clone() color=color.clone() />
                                <div class="flex items-center space-x-3 text-sm">
                                    <span class=trend_color>
                                        {trend_arrow}
                                        " "
                                        {format!("{:+.2}", entry.sentiment_change)}
                                    </span>
                                    <span class="font-semibold">
                                        {format!("{:+.2}", entry.sentiment_score)}
                                    </span>
                                </div>
                            </div>
                            <div class="h-2 bg-gray-700 rounded-full overflow-hidden">
                                <div
                                    class="h-full rounded-full"
                                    style=format!("width: {}%; background-color: {}", percent, color)
                                />
                            </div>
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}

/// Detailed word-count table
#[component]
fn BreakdownTable(comparison: RwSignal<Vec<api::CompanySentiment>>) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            <table class="w-full text-sm">
                <thead>
                    <tr class="text-left text-gray-400 border-b border-gray-700">
                        <th class="pb-3 pr-4">"Company"</th>
                        <th class="pb-3 pr-4">"Documents"</th>
                        <th class="pb-3 pr-4">"Positive / 1k words"</th>
                        <th class="pb-3 pr-4">"Negative / 1k words"</th>
                        <th class="pb-3 pr-4">"Uncertainty"</th>
                        <th class="pb-3">"AI Mentions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = comparison.get();

                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td colspan="6" class="py-8 text-center text-gray-400">
                                        "No comparison data yet"
                                    </td>
                                </tr>
                            }.into_view();
                        }

                        rows.into_iter().map(|row| view! {
                            <tr class="border-b border-gray-700 last:border-0">
                                <td class="py-3 pr-4 font-medium">{row.company}</td>
                                <td class="py-3 pr-4 text-gray-300">{row.documents_analyzed}</td>
                                <td class="py-3 pr-4 text-green-400">{format!("{:.1}", row.positive_per_1k)}</td>
                                <td class="py-3 pr-4 text-red-400">{format!("{:.1}", row.negative_per_1k)}</td>
                                <td class="py-3 pr-4 text-gray-300">{row.uncertainty_words}</td>
                                <td class="py-3 text-gray-300">{row.ai_mentions}</td>
                            </tr>
                        }).collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
