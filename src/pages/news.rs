//! News Page
//!
//! Company and industry news with the upcoming-earnings rail.

use leptos::*;
use std::collections::HashMap;

use crate::api;
use crate::components::{ListSkeleton, Loading};
use crate::state::global::GlobalState;

/// Tickers tracked by the news feed, in display order.
const TICKERS: [&str; 5] = ["FLEX", "JBL", "CLS", "BHE", "SANM"];

/// Full company name for a ticker.
fn company_name(ticker: &str) -> &'static str {
    match ticker {
        "FLEX" => "Flex Ltd.",
        "JBL" => "Jabil Inc.",
        "CLS" => "Celestica Inc.",
        "BHE" => "Benchmark Electronics",
        "SANM" => "Sanmina Corporation",
        _ => "Unknown",
    }
}

/// Badge classes for a news category.
fn category_class(category: &str) -> &'static str {
    match category {
        "earnings" => "bg-green-900/60 text-green-300",
        "ai" => "bg-purple-900/60 text-purple-300",
        "capex" => "bg-orange-900/60 text-orange-300",
        "strategy" => "bg-blue-900/60 text-blue-300",
        "operations" => "bg-gray-700 text-gray-300",
        _ => "bg-gray-700 text-gray-400",
    }
}

/// News page component
#[component]
pub fn News() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let company_news = create_rw_signal(HashMap::<String, api::CompanyNews>::new());
    let industry_news = create_rw_signal(Vec::<api::NewsItem>::new());
    let earnings = create_rw_signal(Vec::<api::UpcomingEarnings>::new());
    let (loading, set_loading) = create_signal(true);
    let selected_ticker = create_rw_signal("FLEX".to_string());

    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            set_loading.set(true);

            match api::fetch_company_news(5).await {
                Ok(data) => {
                    company_news.set(data);
                    state.mark_refreshed();
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }

            match api::fetch_industry_news(10).await {
                Ok(data) => industry_news.set(data),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch industry news: {}", e).into(),
                    );
                }
            }

            match api::fetch_upcoming_earnings().await {
                Ok(data) => earnings.set(data),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch upcoming earnings: {}", e).into(),
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
                <h1 class="text-3xl font-bold">"News & Signals"</h1>
                <p class="text-gray-400 mt-1">"Competitor and industry coverage"</p>
            </div>

            <div class="grid lg:grid-cols-3 gap-8">
                // Company news (two columns)
                <div class="lg:col-span-2 space-y-6">
                    // Ticker selector
                    <div class="flex items-center gap-2 flex-wrap">
                        {TICKERS.into_iter().map(|ticker| {
                            let t = ticker.to_string();
                            let t_for_class = t.clone();

                            view! {
                                <button
                                    on:click=move |_| selected_ticker.set(t.clone())
                                    class=move || {
                                        let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                                        if selected_ticker.get() == t_for_class {
                                            format!("{} bg-primary-600 text-white", base)
                                        } else {
                                            format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                                        }
                                    }
                                >
                                    {ticker}
                                </button>
                            }
                        }).collect_view()}
                    </div>

                    <section class="bg-gray-800 rounded-xl p-6">
                        <h2 class="text-xl font-semibold mb-4">
                            {move || company_name(&selected_ticker.get()).to_string()}
                        </h2>

                        {move || {
                            if loading.get() {
                                return view! { <ListSkeleton count=5 /> }.into_view();
                            }

                            let ticker = selected_ticker.get();
                            let items = company_news.get()
                                .get(&ticker)
                                .map(|n| n.news.clone())
                                .unwrap_or_default();

                            if items.is_empty() {
                                view! {
                                    <p class="text-gray-400 text-sm">"No recent news for this company"</p>
                                }.into_view()
                            } else {
                                items.into_iter().map(|item| view! {
                                    <NewsCard item=item />
                                }).collect_view()
                            }
                        }}
                    </section>

                    // Industry news
                    <section class="bg-gray-800 rounded-xl p-6">
                        <h2 class="text-xl font-semibold mb-4">"Industry News"</h2>

                        {move || {
                            if loading.get() {
                                return view! { <ListSkeleton count=4 /> }.into_view();
                            }

                            let items = industry_news.get();
                            if items.is_empty() {
                                view! {
                                    <p class="text-gray-400 text-sm">"No industry news available"</p>
                                }.into_view()
                            } else {
                                items.into_iter().map(|item| view! {
                                    <NewsCard item=item />
                                }).collect_view()
                            }
                        }}
                    </section>
                </div>

                // Upcoming earnings rail
                <div>
                    <section class="bg-gray-800 rounded-xl p-6 sticky top-4">
                        <h2 class="text-xl font-semibold mb-4">"Upcoming Earnings"</h2>
                        {move || {
                            if loading.get() {
                                view! { <Loading /> }.into_view()
                            } else {
                                view! { <UpcomingEarningsRail earnings=earnings /> }.into_view()
                            }
                        }}
                    </section>
                </div>
            </div>
        </div>
    }
}

/// One news article
#[component]
fn NewsCard(item: api::NewsItem) -> impl IntoView {
    view! {
        <a
            href=item.url.clone()
            target="_blank"
            rel="noopener"
            class="block py-3 border-b border-gray-700 last:border-0 hover:bg-gray-750 -mx-2 px-2 rounded transition-colors"
        >
            <div class="font-medium">{item.title}</div>
            {(!item.description.is_empty()).then(|| view! {
                <p class="text-sm text-gray-400 mt-1 line-clamp-2">{item.description.clone()}</p>
            })}
            <div class="flex items-center gap-2 mt-2">
                {(!item.source.is_empty()).then(|| view! {
                    <span class="text-xs text-gray-500">{item.source.clone()}</span>
                })}
                {item.categories.iter().map(|category| view! {
                    <span class=format!(
                        "text-xs px-2 py-0.5 rounded-full capitalize {}",
                        category_class(category)
                    )>
                        {category.clone()}
                    </span>
                }).collect_view()}
            </div>
        </a>
    }
}

/// Upcoming earnings list
#[component]
fn UpcomingEarningsRail(earnings: RwSignal<Vec<api::UpcomingEarnings>>) -> impl IntoView {
    view! {
        <div class="space-y-3">
            {move || {
                let entries = earnings.get();
                if entries.is_empty() {
                    return view! {
                        <p class="text-gray-400 text-sm">"No scheduled announcements"</p>
                    }.into_view();
                }

                entries.into_iter().map(|entry| {
                    let when = match entry.days_until {
                        Some(days) if days <= 0 => "Today".to_string(),
                        Some(1) => "Tomorrow".to_string(),
                        Some(days) => format!("In {} days", days),
                        None => entry.expected_month.clone(),
                    };

                    view! {
                        <div class="flex items-center justify-between p-3 bg-gray-700 rounded-lg">
                            <div>
                                <div class="font-medium text-sm">{entry.company_name}</div>
                                <div class="text-xs text-gray-400">
                                    {format!("{} · {}", entry.ticker, entry.quarter)}
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickers_resolve_to_company_names() {
        assert_eq!(company_name("FLEX"), "Flex Ltd.");
        assert_eq!(company_name("SANM"), "Sanmina Corporation");
        assert_eq!(company_name("XXXX"), "Unknown");
    }

    #[test]
    fn categories_have_distinct_badge_styles() {
        assert_ne!(category_class("ai"), category_class("earnings"));
        assert_eq!(category_class("nonsense"), category_class("other"));
    }
}
