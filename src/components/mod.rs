//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod badge;
pub mod chart;
pub mod facility_map;
pub mod leaflet;
pub mod loading;
pub mod nav;
pub mod stat_card;
pub mod toast;

pub use badge::{CompanyBadge, SeverityBadge};
pub use chart::{Bar, BarChart, Series, StackedBar, StackedBarChart};
pub use facility_map::FacilityMap;
pub use loading::{CardSkeleton, ChartSkeleton, ListSkeleton, Loading};
pub use nav::Nav;
pub use stat_card::StatCard;
pub use toast::Toast;
