//! Badge Components
//!
//! Company and severity badges shared across lists and cards.

use leptos::*;

/// Company badge: initial-letter square in the company color plus the name
#[component]
pub fn CompanyBadge(
    #[prop(into)] company: String,
    #[prop(into)] color: String,
) -> impl IntoView {
    let initial = company.chars().next().unwrap_or('?').to_string();

    view! {
        <span class="inline-flex items-center space-x-2">
            <span
                class="w-6 h-6 rounded-md flex items-center justify-center text-white text-xs font-bold"
                style=format!("background-color: {}", color)
            >
                {initial}
            </span>
            <span class="font-medium">{company}</span>
        </span>
    }
}

/// Severity badge for alerts
#[component]
pub fn SeverityBadge(#[prop(into)] severity: String) -> impl IntoView {
    let class = severity_class(&severity);

    view! {
        <span class=format!("text-xs px-2 py-0.5 rounded-full font-medium capitalize {}", class)>
            {severity}
        </span>
    }
}

/// Tailwind classes for an alert severity level.
fn severity_class(severity: &str) -> &'static str {
    match severity {
        "critical" => "bg-red-900/60 text-red-300 border border-red-700",
        "high" => "bg-orange-900/60 text-orange-300 border border-orange-700",
        "medium" => "bg-yellow-900/60 text-yellow-300 border border-yellow-700",
        "low" => "bg-blue-900/60 text-blue-300 border border-blue-700",
        _ => "bg-gray-700 text-gray-300 border border-gray-600",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_severity_gets_neutral_style() {
        assert!(severity_class("weird").contains("bg-gray-700"));
        assert!(severity_class("critical").contains("red"));
    }
}
