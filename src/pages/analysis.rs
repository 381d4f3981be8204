//! Analysis Page
//!
//! CapEx mention tracking and AI-investment focus from SEC filings.

use leptos::*;

use crate::api;
use crate::components::{Bar, BarChart, ChartSkeleton, CompanyBadge, Series, StackedBar, StackedBarChart};
use crate::state::global::GlobalState;

const AI_SERIES: [Series; 2] = [
    Series { name: "AI mentions", color: "#8B5CF6" },
    Series { name: "Data center mentions", color: "#10B981" },
];

/// Investment analysis page
#[component]
pub fn Analysis() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let capex = create_rw_signal(Vec::<api::CapexMention>::new());
    let ai_investments = create_rw_signal(Vec::<api::AiInvestmentMention>::new());
    let (loading, set_loading) = create_signal(true);

    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            set_loading.set(true);

            match api::fetch_capex_mentions().await {
                Ok(data) => {
                    capex.set(data);
                    state.mark_refreshed();
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }

            match api::fetch_ai_investment_mentions().await {
                Ok(data) => ai_investments.set(data),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch AI investments: {}", e).into(),
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
                <h1 class="text-3xl font-bold">"Investment Analysis"</h1>
                <p class="text-gray-400 mt-1">"CapEx commitments and AI spending signals from filings"</p>
            </div>

            // CapEx chart
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"CapEx Mentions by Company"</h2>
                {move || {
                    if loading.get() {
                        view! { <ChartSkeleton /> }.into_view()
                    } else {
                        view! { <CapexChart capex=capex /> }.into_view()
                    }
                }}
            </section>

            // AI investment chart
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"AI Investment Focus"</h2>
                {move || {
                    if loading.get() {
                        view! { <ChartSkeleton /> }.into_view()
                    } else {
                        view! { <AiInvestmentChart ai_investments=ai_investments /> }.into_view()
                    }
                }}
            </section>

            // Recent context excerpts
            <ContextExcerpts capex=capex />
        </div>
    }
}

/// CapEx mention counts as a bar chart
#[component]
fn CapexChart(capex: RwSignal<Vec<api::CapexMention>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_bars = state.clone();
    let bars = Signal::derive(move || {
        capex
            .get()
            .iter()
            .map(|mention| Bar {
                color: state_for_bars.color_for(&mention.company),
                label: mention.company.clone(),
                value: mention.count as f64,
            })
            .collect::<Vec<_>>()
    });

    view! { <BarChart bars=bars /> }
}

/// AI vs data-center mention stacked chart
#[component]
fn AiInvestmentChart(ai_investments: RwSignal<Vec<api::AiInvestmentMention>>) -> impl IntoView {
    let rows = Signal::derive(move || {
        ai_investments
            .get()
            .iter()
            .map(|mention| StackedBar {
                label: mention.company.clone(),
                values: vec![
                    mention.ai_mentions as f64,
                    mention.data_center_mentions as f64,
                ],
            })
            .collect::<Vec<_>>()
    });

    view! { <StackedBarChart rows=rows series=AI_SERIES.to_vec() /> }
}

/// Recent CapEx context excerpts, grouped by company
#[component]
fn ContextExcerpts(capex: RwSignal<Vec<api::CapexMention>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        {move || {
            let mentions: Vec<_> = capex
                .get()
                .into_iter()
                .filter(|m| !m.recent_context.is_empty())
                .collect();

            if mentions.is_empty() {
                return view! {}.into_view();
            }

            let state = state.clone();
            view! {
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Recent CapEx Context"</h2>
                    <div class="grid md:grid-cols-2 gap-6">
                        {mentions.into_iter().map(|mention| {
                            let color = state.color_for(&mention.company);
                            view! {
                                <div class="bg-gray-700 rounded-lg p-4">
                                    <div class="mb-3">
                                        <CompanyBadge company=mention.company.clone() color=color />
                                    </div>
                                    <div class="space-y-2">
                                        {mention.recent_context.into_iter().take(3).map(|excerpt| view! {
                                            <p class="text-sm text-gray-300 border-l-2 border-gray-600 pl-3">
                                                {format!("\u{201C}{}\u{201D}", excerpt)}
                                            </p>
                                        }).collect_view()}
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                </section>
            }.into_view()
        }}
    }
}
