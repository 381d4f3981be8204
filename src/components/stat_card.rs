//! Stat Card Component
//!
//! Summary number cards used at the top of each page.

use leptos::*;

/// Stat card showing a headline number with a label and caption
#[component]
pub fn StatCard(
    /// Short label above the value
    #[prop(into)]
    label: String,
    /// Headline value
    #[prop(into)]
    value: Signal<String>,
    /// Caption under the value
    #[prop(optional, into)]
    caption: Option<String>,
    /// Decorative emoji shown opposite the label
    #[prop(optional)]
    icon: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700 hover:border-gray-600 transition-colors">
            <div class="flex items-center justify-between">
                <span class="text-gray-400 text-sm">{label}</span>
                {icon.map(|i| view! { <span class="text-lg">{i}</span> })}
            </div>

            <div class="text-3xl font-bold mt-2">
                {move || value.get()}
            </div>

            {caption.map(|c| view! {
                <p class="text-gray-500 text-sm mt-1">{c}</p>
            })}
        </div>
    }
}
