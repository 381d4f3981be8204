//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use std::collections::HashMap;

/// Companies tracked by the dashboard, in display order.
pub const TRACKED_COMPANIES: [&str; 5] = ["Flex", "Jabil", "Celestica", "Benchmark", "Sanmina"];

/// Brand colors used for markers, charts, and badges.
const COMPANY_COLORS: [(&str, &str); 5] = [
    ("Flex", "#00A0E3"),
    ("Jabil", "#1E4D2B"),
    ("Celestica", "#003366"),
    ("Benchmark", "#B8860B"),
    ("Sanmina", "#C41E3A"),
];

/// Neutral gray for companies without an assigned color.
pub const FALLBACK_COLOR: &str = "#64748B";

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Company-to-color mapping shared by the map, charts, and badges
    pub company_colors: RwSignal<HashMap<String, String>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    /// Last successful data refresh
    pub last_refresh: RwSignal<Option<i64>>,
}

/// A single physical location belonging to a tracked company.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Facility {
    pub company: String,
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_headquarters: bool,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let colors: HashMap<String, String> = COMPANY_COLORS
        .iter()
        .map(|(company, color)| (company.to_string(), color.to_string()))
        .collect();

    let state = GlobalState {
        company_colors: create_rw_signal(colors),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        last_refresh: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Resolve the display color for a company, falling back to neutral gray.
    pub fn color_for(&self, company: &str) -> String {
        self.company_colors
            .get()
            .get(company)
            .cloned()
            .unwrap_or_else(|| FALLBACK_COLOR.to_string())
    }

    /// Record a successful data refresh.
    pub fn mark_refreshed(&self) {
        self.last_refresh
            .set(Some(chrono::Utc::now().timestamp_millis()));
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

/// Apply the map page's filters: company multi-select (empty selection means
/// all companies) and facility-type single-select.
pub fn filter_facilities(
    facilities: &[Facility],
    companies: &[String],
    kind: Option<&str>,
) -> Vec<Facility> {
    facilities
        .iter()
        .filter(|f| companies.is_empty() || companies.iter().any(|c| c == &f.company))
        .filter(|f| kind.map_or(true, |k| f.kind == k))
        .cloned()
        .collect()
}

/// Distinct facility types present in a facility list, sorted for stable
/// rendering of the type filter.
pub fn facility_kinds(facilities: &[Facility]) -> Vec<String> {
    let mut kinds: Vec<String> = facilities.iter().map(|f| f.kind.clone()).collect();
    kinds.sort();
    kinds.dedup();
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(company: &str, city: &str, kind: &str) -> Facility {
        Facility {
            company: company.to_string(),
            city: city.to_string(),
            country: "USA".to_string(),
            lat: 30.0,
            lng: -97.0,
            kind: kind.to_string(),
            is_headquarters: false,
        }
    }

    #[test]
    fn empty_company_selection_keeps_everything() {
        let facilities = vec![
            facility("Flex", "Austin", "Manufacturing"),
            facility("Jabil", "St. Petersburg", "Headquarters"),
        ];
        let filtered = filter_facilities(&facilities, &[], None);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn company_and_kind_filters_compose() {
        let facilities = vec![
            facility("Flex", "Austin", "Manufacturing"),
            facility("Flex", "Singapore", "Office"),
            facility("Jabil", "Guadalajara", "Manufacturing"),
        ];
        let filtered = filter_facilities(
            &facilities,
            &["Flex".to_string()],
            Some("Manufacturing"),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].city, "Austin");
    }

    #[test]
    fn facility_kinds_are_sorted_and_deduped() {
        let facilities = vec![
            facility("Flex", "Austin", "Office"),
            facility("Jabil", "Penang", "Manufacturing"),
            facility("Sanmina", "San Jose", "Office"),
        ];
        assert_eq!(facility_kinds(&facilities), vec!["Manufacturing", "Office"]);
    }
}
