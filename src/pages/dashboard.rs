//! Dashboard Page
//!
//! Company comparison overview: trend outlooks, AI-focus classification, and
//! sentiment at a glance.

use leptos::*;

use crate::api;
use crate::components::{Bar, BarChart, CardSkeleton, CompanyBadge, StatCard};
use crate::state::global::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let trends = create_rw_signal(None::<api::TrendAnalysis>);
    let classification = create_rw_signal(None::<api::Classification>);
    let sentiment = create_rw_signal(None::<api::SentimentDashboard>);
    let (loading, set_loading) = create_signal(true);

    // Fetch initial data on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            set_loading.set(true);
            state.loading.set(true);

            match api::fetch_trend_analysis().await {
                Ok(data) => trends.set(Some(data)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch trends: {}", e).into());
                }
            }

            match api::fetch_classification().await {
                Ok(data) => classification.set(Some(data)),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch classification: {}", e).into(),
                    );
                }
            }

            match api::fetch_sentiment_dashboard().await {
                Ok(data) => {
                    sentiment.set(Some(data));
                    state.mark_refreshed();
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }

            state.loading.set(false);
            set_loading.set(false);
        });
    });

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Overview"</h1>
                    <p class="text-gray-400 mt-1">"Competitive landscape at a glance"</p>
                </div>
            </div>

            // Market outlook banner
            {move || {
                trends.get().and_then(|t| t.market_outlook).map(|outlook| view! {
                    <section class="bg-gray-800 rounded-xl p-6 border-l-4 border-primary-500">
                        <h2 class="text-lg font-semibold mb-2">"Market Outlook"</h2>
                        <p class="text-gray-300">{outlook}</p>
                    </section>
                })
            }}

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
                    view! { <SentimentSummaryCards sentiment=sentiment /> }.into_view()
                }
            }}

            // Trend outlook per company
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Trend Outlook"</h2>
                <TrendTable trends=trends />
            </section>

            // AI focus chart
            <section class="bg-gray-800 rounded-xl p-6">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-semibold">"AI Investment Focus"</h2>
                    {move || {
                        classification.get().map(|c| view! {
                            <span class="text-sm text-gray-400">
                                {format!("Industry average: {:.0}%", c.industry_average_ai_focus)}
                            </span>
                        })
                    }}
                </div>
                <AiFocusChart classification=classification />
            </section>
        </div>
    }
}

/// Sentiment summary stat cards
#[component]
fn SentimentSummaryCards(sentiment: RwSignal<Option<api::SentimentDashboard>>) -> impl IntoView {
    let summary_field = move |pick: fn(&api::SentimentSummary) -> Option<String>| {
        sentiment
            .get()
            .and_then(|s| pick(&s.summary))
            .unwrap_or_else(|| "N/A".to_string())
    };

    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            <StatCard
                label="Most Positive"
                value=Signal::derive(move || summary_field(|s| s.most_positive.clone()))
                caption="Highest sentiment score"
                icon="📈"
            />
            <StatCard
                label="Most Negative"
                value=Signal::derive(move || summary_field(|s| s.most_negative.clone()))
                caption="Lowest sentiment score"
                icon="📉"
            />
            <StatCard
                label="Most AI-Focused"
                value=Signal::derive(move || summary_field(|s| s.most_ai_focused.clone()))
                caption="By filing mentions"
                icon="🧠"
            />
            <StatCard
                label="Average Sentiment"
                value=Signal::derive(move || {
                    sentiment.get()
                        .map(|s| format!("{:.0}%", s.summary.average_sentiment * 100.0))
                        .unwrap_or_else(|| "—".to_string())
                })
                caption="Across tracked companies"
                icon="⚖️"
            />
        </div>
    }
}

/// Per-company trend outlook table
#[component]
fn TrendTable(trends: RwSignal<Option<api::TrendAnalysis>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="overflow-x-auto">
            <table class="w-full text-sm">
                <thead>
                    <tr class="text-left text-gray-400 border-b border-gray-700">
                        <th class="pb-3 pr-4">"Company"</th>
                        <th class="pb-3 pr-4">"CapEx"</th>
                        <th class="pb-3 pr-4">"AI Focus"</th>
                        <th class="pb-3 pr-4">"Sentiment"</th>
                        <th class="pb-3">"Outlook"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let companies = trends.get().map(|t| t.companies).unwrap_or_default();

                        if companies.is_empty() {
                            return view! {
                                <tr>
                                    <td colspan="5" class="py-8 text-center text-gray-400">
                                        "No trend data yet"
                                    </td>
                                </tr>
                            }.into_view();
                        }

                        let state = state.clone();
                        companies.into_iter().map(|trend| {
                            let color = state.color_for(&trend.company);
                            view! {
                                <tr class="border-b border-gray-700 last:border-0">
                                    <td class="py-3 pr-4">
                                        <CompanyBadge company=trend.company.clone() color=color />
                                    </td>
                                    <td class="py-3 pr-4"><TrendCell trend=trend.capex_trend /></td>
                                    <td class="py-3 pr-4"><TrendCell trend=trend.ai_focus_trend /></td>
                                    <td class="py-3 pr-4"><TrendCell trend=trend.sentiment_trend /></td>
                                    <td class="py-3 capitalize text-gray-300">{trend.overall_outlook}</td>
                                </tr>
                            }
                        }).collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}

/// Direction arrow with confidence for one trend dimension
#[component]
fn TrendCell(trend: api::TrendDirection) -> impl IntoView {
    let (arrow, color) = trend_arrow(&trend.direction);

    view! {
        <span class=format!("inline-flex items-center space-x-1 {}", color)>
            <span>{arrow}</span>
            <span class="text-xs text-gray-500">
                {format!("{:.0}%", trend.confidence * 100.0)}
            </span>
        </span>
    }
}

/// Arrow glyph and color class for a trend direction.
fn trend_arrow(direction: &str) -> (&'static str, &'static str) {
    match direction {
        "increasing" | "up" => ("↑", "text-green-400"),
        "decreasing" | "down" => ("↓", "text-red-400"),
        _ => ("→", "text-gray-400"),
    }
}

/// AI-focus percentage bar chart
#[component]
fn AiFocusChart(classification: RwSignal<Option<api::Classification>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_bars = state.clone();
    let bars = Signal::derive(move || {
        classification
            .get()
            .map(|c| {
                c.companies
                    .iter()
                    .map(|entry| Bar {
                        color: state_for_bars.color_for(&entry.company),
                        label: entry.company.clone(),
                        value: entry.overall_ai_focus_percentage,
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    });

    view! { <BarChart bars=bars /> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_arrows_map_directions() {
        assert_eq!(trend_arrow("increasing").0, "↑");
        assert_eq!(trend_arrow("decreasing").0, "↓");
        assert_eq!(trend_arrow("stable").0, "→");
        assert_eq!(trend_arrow("unknown").0, "→");
    }
}
