//! Map Page
//!
//! Global facility map with filters, regional comparison charts, and the
//! facility list.

use leptos::*;
use std::collections::HashMap;

use crate::api;
use crate::components::{
    Bar, BarChart, CardSkeleton, CompanyBadge, FacilityMap, Series, StackedBar, StackedBarChart,
    StatCard,
};
use crate::state::global::{
    facility_kinds, filter_facilities, Facility, GlobalState, TRACKED_COMPANIES,
};

const REGIONS: [&str; 3] = ["Americas", "EMEA", "APAC"];

const REGION_SERIES: [Series; 3] = [
    Series { name: "Americas", color: "#3B82F6" },
    Series { name: "EMEA", color: "#8B5CF6" },
    Series { name: "APAC", color: "#10B981" },
];

/// Geographic analysis page
#[component]
pub fn MapPage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let facilities = create_rw_signal(Vec::<Facility>::new());
    let comparison = create_rw_signal(None::<api::GeographicComparison>);
    let (loading, set_loading) = create_signal(true);

    // Filters owned by the page: company multi-select, type single-select
    let selected_companies = create_rw_signal(Vec::<String>::new());
    let selected_kind = create_rw_signal(None::<String>);

    // Fetch facilities and footprint comparison on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            set_loading.set(true);
            state.loading.set(true);

            match api::fetch_facilities().await {
                Ok(response) => {
                    facilities.set(response.facilities);
                    state.mark_refreshed();
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }

            match api::fetch_geographic_comparison().await {
                Ok(data) => {
                    comparison.set(Some(data));
                }
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch footprint comparison: {}", e).into(),
                    );
                }
            }

            state.loading.set(false);
            set_loading.set(false);
        });
    });

    // Facilities surviving the current filters
    let filtered = create_memo(move |_| {
        let selected = selected_companies.get();
        let kind = selected_kind.get();
        filter_facilities(&facilities.get(), &selected, kind.as_deref())
    });

    let company_colors = state.company_colors;

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Geographic Analysis"</h1>
                    <p class="text-gray-400 mt-1">"Global facility mapping and regional distribution"</p>
                </div>
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
                    view! { <MapSummary facilities=facilities comparison=comparison /> }.into_view()
                }
            }}

            // Filters
            <div class="space-y-3">
                <CompanyFilter selected=selected_companies />
                <KindFilter facilities=facilities selected=selected_kind />
            </div>

            // The map itself
            <section class="bg-gray-800 rounded-xl p-6">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-semibold">"Facility Map"</h2>
                    <span class="text-sm text-gray-400">
                        {move || format!("{} locations", filtered.get().len())}
                    </span>
                </div>
                <FacilityMap
                    facilities=Signal::derive(move || filtered.get())
                    company_colors=Signal::derive(move || company_colors.get())
                />
            </section>

            // Charts
            <div class="grid lg:grid-cols-2 gap-8">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Facilities by Company"</h2>
                    <FacilityCountChart facilities=facilities />
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Regional Distribution"</h2>
                    <RegionalChart comparison=comparison />
                </section>
            </div>

            // Facility list
            <FacilityList filtered=filtered />

            // Shared locations
            <SharedLocations comparison=comparison />
        </div>
    }
}

/// Summary stat cards for the map page
#[component]
fn MapSummary(
    facilities: RwSignal<Vec<Facility>>,
    comparison: RwSignal<Option<api::GeographicComparison>>,
) -> impl IntoView {
    let leader_value = move |region: &'static str| {
        comparison
            .get()
            .and_then(|c| c.regional_leaders.get(region).cloned().flatten())
            .map(|l| l.company)
            .unwrap_or_else(|| "N/A".to_string())
    };

    let leader_caption = move |region: &'static str| {
        comparison
            .get()
            .and_then(|c| c.regional_leaders.get(region).cloned().flatten())
            .map(|l| format!("{} facilities", l.count))
            .unwrap_or_else(|| "No data".to_string())
    };

    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            <StatCard
                label="Total Facilities"
                value=Signal::derive(move || facilities.get().len().to_string())
                caption="Across all companies"
                icon="🏭"
            />
            <StatCard
                label="Shared Locations"
                value=Signal::derive(move || {
                    comparison.get()
                        .map(|c| c.overlap_analysis.shared_locations.to_string())
                        .unwrap_or_else(|| "—".to_string())
                })
                caption="Cities with multiple companies"
                icon="🤝"
            />
            <StatCard
                label="APAC Leader"
                value=Signal::derive(move || leader_value("APAC"))
                caption=leader_caption("APAC")
                icon="📍"
            />
            <StatCard
                label="Americas Leader"
                value=Signal::derive(move || leader_value("Americas"))
                caption=leader_caption("Americas")
                icon="🌎"
            />
        </div>
    }
}

/// Company multi-select filter row
#[component]
fn CompanyFilter(selected: RwSignal<Vec<String>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let toggle_company = move |company: String| {
        selected.update(|s| {
            if s.contains(&company) {
                s.retain(|c| c != &company);
            } else {
                s.push(company);
            }
        });
    };

    view! {
        <div class="flex items-center gap-2 flex-wrap">
            <span class="text-sm text-gray-400 mr-2">"Companies:"</span>

            <button
                on:click=move |_| selected.set(Vec::new())
                class=move || {
                    let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                    if selected.get().is_empty() {
                        format!("{} bg-white text-gray-900", base)
                    } else {
                        format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                    }
                }
            >
                "All"
            </button>

            {TRACKED_COMPANIES.into_iter().map(|company| {
                let name = company.to_string();
                let name_for_click = name.clone();
                let name_for_class = name.clone();
                let color = state.color_for(company);

                view! {
                    <button
                        on:click=move |_| toggle_company(name_for_click.clone())
                        class="px-4 py-2 rounded-lg text-sm font-medium transition-colors"
                        style=move || {
                            if selected.get().contains(&name_for_class) {
                                format!("background-color: {}; color: white", color)
                            } else {
                                "background-color: #374151; color: #d1d5db".to_string()
                            }
                        }
                    >
                        {name}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

/// Facility-type single-select filter
#[component]
fn KindFilter(
    facilities: RwSignal<Vec<Facility>>,
    selected: RwSignal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="flex items-center gap-2">
            <span class="text-sm text-gray-400 mr-2">"Facility type:"</span>
            <select
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    selected.set(if value == "all" { None } else { Some(value) });
                }
                class="bg-gray-700 rounded-lg px-3 py-2 text-sm
                       border border-gray-600 focus:border-primary-500 focus:outline-none"
            >
                <option value="all">"All types"</option>
                {move || {
                    facility_kinds(&facilities.get()).into_iter().map(|kind| {
                        view! { <option value=kind.clone()>{kind}</option> }
                    }).collect_view()
                }}
            </select>
        </div>
    }
}

/// Facilities-per-company bar chart
#[component]
fn FacilityCountChart(facilities: RwSignal<Vec<Facility>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_bars = state.clone();
    let bars = Signal::derive(move || {
        let counts = count_by_company(&facilities.get());
        counts
            .into_iter()
            .map(|(company, count)| Bar {
                color: state_for_bars.color_for(&company),
                label: company,
                value: count as f64,
            })
            .collect::<Vec<_>>()
    });

    view! { <BarChart bars=bars /> }
}

/// Regional distribution stacked chart
#[component]
fn RegionalChart(comparison: RwSignal<Option<api::GeographicComparison>>) -> impl IntoView {
    let rows = Signal::derive(move || {
        comparison
            .get()
            .map(|c| {
                c.companies
                    .iter()
                    .map(|footprint| StackedBar {
                        label: footprint.company.clone(),
                        values: REGIONS
                            .iter()
                            .map(|region| {
                                *footprint.regional_distribution.get(*region).unwrap_or(&0) as f64
                            })
                            .collect(),
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    });

    view! { <StackedBarChart rows=rows series=REGION_SERIES.to_vec() /> }
}

/// Filtered facility list cards
#[component]
fn FacilityList(filtered: Memo<Vec<Facility>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-semibold">"Facility Locations"</h2>
                <span class="text-sm text-gray-400">
                    {move || format!("{} locations", filtered.get().len())}
                </span>
            </div>

            <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-4">
                {move || {
                    let facilities = filtered.get();
                    if facilities.is_empty() {
                        view! {
                            <div class="col-span-full text-center py-8">
                                <p class="text-gray-400">"No facilities match the current filters"</p>
                            </div>
                        }.into_view()
                    } else {
                        let state = state.clone();
                        facilities.into_iter().map(|facility| {
                            let color = state.color_for(&facility.company);
                            let border = if facility.is_headquarters {
                                "border-amber-600"
                            } else {
                                "border-gray-700"
                            };

                            view! {
                                <div class=format!(
                                    "p-4 rounded-xl border bg-gray-750 {} transition-colors hover:border-gray-500",
                                    border
                                )>
                                    <div class="flex items-start justify-between mb-2">
                                        <span class="font-semibold">
                                            {if facility.is_headquarters { "🏛 " } else { "🏭 " }}
                                            {facility.city.clone()}
                                        </span>
                                        <CompanyBadge
                                            company=facility.company.clone()
                                            color=color
                                        />
                                    </div>
                                    <p class="text-sm text-gray-400">{facility.country.clone()}</p>
                                    <div class="flex items-center justify-between mt-2 text-xs text-gray-500">
                                        <span>{facility.kind.clone()}</span>
                                        <span>{format!("{:.2}, {:.2}", facility.lat, facility.lng)}</span>
                                    </div>
                                </div>
                            }
                        }).collect_view()
                    }
                }}
            </div>
        </section>
    }
}

/// Cities where multiple companies operate
#[component]
fn SharedLocations(comparison: RwSignal<Option<api::GeographicComparison>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        {move || {
            let locations = comparison
                .get()
                .map(|c| c.overlap_analysis.locations)
                .unwrap_or_default();

            if locations.is_empty() {
                return view! {}.into_view();
            }

            let mut sorted: Vec<_> = locations.into_iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(&b.0));

            let state = state.clone();
            view! {
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Shared Manufacturing Locations"</h2>
                    <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-4">
                        {sorted.into_iter().map(|(city, companies)| {
                            let state = state.clone();
                            view! {
                                <div class="p-4 bg-gray-700 rounded-xl border border-gray-600">
                                    <h4 class="font-semibold mb-2">{city}</h4>
                                    <div class="flex flex-wrap gap-1">
                                        {companies.into_iter().map(|company| {
                                            let color = state.color_for(&company);
                                            view! {
                                                <span
                                                    class="text-xs px-2 py-0.5 rounded text-white"
                                                    style=format!("background-color: {}", color)
                                                >
                                                    {company}
                                                </span>
                                            }
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

/// Facility count per company, tracked companies first in display order.
fn count_by_company(facilities: &[Facility]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for facility in facilities {
        *counts.entry(facility.company.as_str()).or_insert(0) += 1;
    }

    let mut ordered = Vec::new();
    for company in TRACKED_COMPANIES {
        if let Some(count) = counts.remove(company) {
            ordered.push((company.to_string(), count));
        }
    }

    // Untracked companies come last, alphabetically
    let mut rest: Vec<_> = counts
        .into_iter()
        .map(|(company, count)| (company.to_string(), count))
        .collect();
    rest.sort();
    ordered.extend(rest);

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(company: &str) -> Facility {
        Facility {
            company: company.to_string(),
            city: "Austin".to_string(),
            country: "USA".to_string(),
            lat: 30.0,
            lng: -97.0,
            kind: "Manufacturing".to_string(),
            is_headquarters: false,
        }
    }

    #[test]
    fn counts_follow_tracked_company_order() {
        let facilities = vec![
            facility("Sanmina"),
            facility("Flex"),
            facility("Sanmina"),
            facility("Acme"),
        ];

        let counts = count_by_company(&facilities);
        assert_eq!(
            counts,
            vec![
                ("Flex".to_string(), 1),
                ("Sanmina".to_string(), 2),
                ("Acme".to_string(), 1),
            ]
        );
    }
}
