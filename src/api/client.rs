//! HTTP API Client
//!
//! Functions for communicating with the Spyglass REST API. All analytics
//! (anomaly detection, sentiment scoring, trend classification) are computed
//! server-side; this client only mirrors the JSON contracts.

use gloo_net::http::{Request, Response};
use std::collections::HashMap;

use crate::state::global::Facility;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8001/api";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("spyglass_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item("spyglass_api_url", url);
        }
    }
}

// ============ Response Types ============

/// FastAPI-style error body.
#[derive(Debug, serde::Deserialize)]
struct ApiError {
    detail: String,
}

/// Extract a server error message from a non-OK response.
async fn error_message(response: Response, fallback: &str) -> String {
    response
        .json::<ApiError>()
        .await
        .map(|e| e.detail)
        .unwrap_or_else(|_| fallback.to_string())
}

#[derive(Debug, serde::Deserialize)]
pub struct FacilitiesResponse {
    pub facilities: Vec<Facility>,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub by_company: HashMap<String, usize>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CompanyFootprint {
    pub company: String,
    pub total_facilities: usize,
    pub regional_distribution: HashMap<String, usize>,
    #[serde(default)]
    pub primary_region: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegionalLeader {
    pub company: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct OverlapAnalysis {
    #[serde(default)]
    pub shared_locations: usize,
    /// City name to the companies operating there.
    #[serde(default)]
    pub locations: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct GeographicComparison {
    pub companies: Vec<CompanyFootprint>,
    #[serde(default)]
    pub regional_leaders: HashMap<String, Option<RegionalLeader>>,
    #[serde(default)]
    pub overlap_analysis: OverlapAnalysis,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SentimentEntry {
    pub company: String,
    pub sentiment_score: f64,
    #[serde(default)]
    pub positive_words: u32,
    #[serde(default)]
    pub negative_words: u32,
    #[serde(default)]
    pub ai_mentions: u32,
    #[serde(default)]
    pub trend: String,
    #[serde(default)]
    pub sentiment_change: f64,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SentimentSummary {
    #[serde(default)]
    pub most_positive: Option<String>,
    #[serde(default)]
    pub most_negative: Option<String>,
    #[serde(default)]
    pub most_ai_focused: Option<String>,
    #[serde(default)]
    pub average_sentiment: f64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SentimentDashboard {
    pub companies: Vec<SentimentEntry>,
    #[serde(default)]
    pub summary: SentimentSummary,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CompanySentiment {
    pub company: String,
    #[serde(default)]
    pub documents_analyzed: u32,
    pub sentiment_score: f64,
    #[serde(default)]
    pub positive_words: u32,
    #[serde(default)]
    pub negative_words: u32,
    #[serde(default)]
    pub uncertainty_words: u32,
    #[serde(default)]
    pub ai_mentions: u32,
    #[serde(default)]
    pub positive_per_1k: f64,
    #[serde(default)]
    pub negative_per_1k: f64,
    #[serde(default)]
    pub word_count: u64,
}

#[derive(Debug, serde::Deserialize)]
struct SentimentComparison {
    companies: Vec<CompanySentiment>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CapexMention {
    pub company: String,
    pub count: u32,
    #[serde(default)]
    pub recent_context: Vec<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AiInvestmentMention {
    pub company: String,
    pub ai_mentions: u32,
    pub data_center_mentions: u32,
    pub total: u32,
}

#[derive(Debug, serde::Deserialize)]
struct MentionsResponse<T> {
    #[serde(default = "Vec::new")]
    mentions: Vec<T>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct TrendDirection {
    pub direction: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CompanyTrend {
    pub company: String,
    #[serde(default)]
    pub overall_outlook: String,
    pub capex_trend: TrendDirection,
    pub ai_focus_trend: TrendDirection,
    pub sentiment_trend: TrendDirection,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct TrendAnalysis {
    pub companies: Vec<CompanyTrend>,
    #[serde(default)]
    pub market_outlook: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CompanyClassification {
    pub company: String,
    pub overall_ai_focus_percentage: f64,
    #[serde(default)]
    pub investment_focus: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Classification {
    pub companies: Vec<CompanyClassification>,
    #[serde(default)]
    pub industry_average_ai_focus: f64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CompanyNews {
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

#[derive(Debug, serde::Deserialize)]
struct AllNewsResponse {
    #[serde(default)]
    companies: HashMap<String, CompanyNews>,
}

#[derive(Debug, serde::Deserialize)]
struct IndustryNewsResponse {
    #[serde(default)]
    news: Vec<NewsItem>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct UpcomingEarnings {
    pub ticker: String,
    pub company_name: String,
    pub quarter: String,
    #[serde(default)]
    pub expected_month: String,
    #[serde(default)]
    pub expected_year: Option<i32>,
    #[serde(default)]
    pub days_until: Option<i64>,
}

#[derive(Debug, serde::Deserialize)]
struct UpcomingEarningsResponse {
    #[serde(default)]
    upcoming_earnings: Vec<UpcomingEarnings>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Alert {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub dismissed: bool,
}

#[derive(Debug, serde::Deserialize)]
struct AlertsResponse {
    alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct AlertSummary {
    #[serde(default)]
    pub total_active: usize,
    #[serde(default)]
    pub unread: usize,
    #[serde(default)]
    pub by_severity: HashMap<String, usize>,
    #[serde(default)]
    pub by_company: HashMap<String, usize>,
    #[serde(default)]
    pub has_critical: bool,
    #[serde(default)]
    pub has_high: bool,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct EmailConfig {
    pub enabled: bool,
    #[serde(default)]
    pub has_api_key: bool,
    #[serde(default)]
    pub from_email: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SlackConfig {
    pub enabled: bool,
    #[serde(default)]
    pub has_webhook: bool,
    #[serde(default)]
    pub has_bot_token: bool,
    #[serde(default)]
    pub default_channel: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct NotificationConfig {
    pub email: EmailConfig,
    pub slack: SlackConfig,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct DetectionResult {
    #[serde(default)]
    pub new_alerts: usize,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of a test notification. The server reports `logged` when the
/// channel is not configured and the notification was written to the log
/// instead of delivered.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct NotificationOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub logged: bool,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct DigestOutcome {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub alert_count: usize,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub company: String,
    #[serde(default)]
    pub ticker: String,
    pub quarter: String,
    #[serde(default)]
    pub fiscal_year: i32,
    pub estimated_date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub days_until: Option<i64>,
}

#[derive(Debug, serde::Deserialize)]
struct CalendarEventsResponse {
    #[serde(default)]
    events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CalendarSummary {
    #[serde(default)]
    pub total_events: usize,
    #[serde(default)]
    pub confirmed_events: usize,
    #[serde(default)]
    pub upcoming_30_days: usize,
    #[serde(default)]
    pub upcoming_7_days: usize,
    #[serde(default)]
    pub next_event: Option<CalendarEvent>,
    #[serde(default)]
    pub companies_tracked: usize,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ExportFormat {
    pub id: String,
    pub name: String,
    pub extension: String,
    pub available: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, serde::Deserialize)]
struct ExportFormatsResponse {
    formats: Vec<ExportFormat>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

// ============ Geographic ============

/// Fetch all facilities for the map
pub async fn fetch_facilities() -> Result<FacilitiesResponse, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/geographic/facilities", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load facilities").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Compare geographic footprints across all companies
pub async fn fetch_geographic_comparison() -> Result<GeographicComparison, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/geographic/compare", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load footprint comparison").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

// ============ Sentiment ============

/// Fetch the sentiment dashboard (scores, trends, summary)
pub async fn fetch_sentiment_dashboard() -> Result<SentimentDashboard, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/sentiment/dashboard", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load sentiment dashboard").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the detailed per-company sentiment comparison
pub async fn fetch_sentiment_comparison() -> Result<Vec<CompanySentiment>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/sentiment/compare", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load sentiment comparison").await);
    }

    let result: SentimentComparison = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.companies)
}

// ============ Analysis ============

/// Fetch CapEx mention analysis
pub async fn fetch_capex_mentions() -> Result<Vec<CapexMention>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/analysis/capex", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load CapEx analysis").await);
    }

    let result: MentionsResponse<CapexMention> = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.mentions)
}

/// Fetch AI-investment mention analysis
pub async fn fetch_ai_investment_mentions() -> Result<Vec<AiInvestmentMention>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/analysis/ai-investments", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load AI-investment analysis").await);
    }

    let result: MentionsResponse<AiInvestmentMention> = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.mentions)
}

// ============ Analytics ============

/// Fetch trend classification for all companies
pub async fn fetch_trend_analysis() -> Result<TrendAnalysis, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/analytics/trends", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load trend analysis").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch AI-focus classification for all companies
pub async fn fetch_classification() -> Result<Classification, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/analytics/classification", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load classification").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

// ============ News ============

/// Fetch recent news per company, keyed by ticker
pub async fn fetch_company_news(
    count_per_company: usize,
) -> Result<HashMap<String, CompanyNews>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!(
        "{}/news/all?count_per_company={}",
        api_base, count_per_company
    ))
    .send()
    .await
    .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load company news").await);
    }

    let result: AllNewsResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.companies)
}

/// Fetch industry-wide news
pub async fn fetch_industry_news(count: usize) -> Result<Vec<NewsItem>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/news/industry?count={}", api_base, count))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load industry news").await);
    }

    let result: IndustryNewsResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.news)
}

/// Fetch upcoming earnings announcements
pub async fn fetch_upcoming_earnings() -> Result<Vec<UpcomingEarnings>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/earnings/upcoming", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load upcoming earnings").await);
    }

    let result: UpcomingEarningsResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.upcoming_earnings)
}

// ============ Alerts ============

/// Filters accepted by the alerts listing endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertFilter {
    pub company: Option<String>,
    pub severity: Option<String>,
    pub unread_only: bool,
}

impl AlertFilter {
    /// Build the query string, omitting unset filters.
    pub fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(company) = &self.company {
            params.push(format!("company={}", company));
        }
        if let Some(severity) = &self.severity {
            params.push(format!("severity={}", severity));
        }
        if self.unread_only {
            params.push("unread_only=true".to_string());
        }
        params.join("&")
    }
}

/// Fetch alerts with optional filters
pub async fn fetch_alerts(filter: &AlertFilter) -> Result<Vec<Alert>, String> {
    let api_base = get_api_base();
    let query = filter.to_query();

    let url = if query.is_empty() {
        format!("{}/alerts", api_base)
    } else {
        format!("{}/alerts?{}", api_base, query)
    };

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load alerts").await);
    }

    let result: AlertsResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.alerts)
}

/// Fetch the alert summary
pub async fn fetch_alert_summary() -> Result<AlertSummary, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/alerts/summary", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load alert summary").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch notification channel configuration
pub async fn fetch_notification_config() -> Result<NotificationConfig, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/alerts/config", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load notification config").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Run alert detection across all companies
pub async fn run_alert_detection() -> Result<DetectionResult, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/alerts/detect", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Alert detection failed").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Mark an alert as read
pub async fn mark_alert_read(alert_id: i64) -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/alerts/{}/read", api_base, alert_id))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to mark alert read").await);
    }

    Ok(())
}

/// Dismiss an alert
pub async fn dismiss_alert(alert_id: i64) -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/alerts/{}/dismiss", api_base, alert_id))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to dismiss alert").await);
    }

    Ok(())
}

/// Send a test email notification
pub async fn send_test_email(email: &str) -> Result<NotificationOutcome, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!(
        "{}/alerts/test/email?email={}",
        api_base,
        urlencode(email)
    ))
    .send()
    .await
    .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Test email failed").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Send a test Slack notification
pub async fn send_test_slack(channel: Option<&str>) -> Result<NotificationOutcome, String> {
    let api_base = get_api_base();

    let url = match channel {
        Some(channel) => format!("{}/alerts/test/slack?channel={}", api_base, urlencode(channel)),
        None => format!("{}/alerts/test/slack", api_base),
    };

    let response = Request::post(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Test Slack message failed").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Send an alert digest via email and/or Slack
pub async fn send_alert_digest(
    email: Option<&str>,
    slack_channel: Option<&str>,
    period: &str,
) -> Result<DigestOutcome, String> {
    #[derive(serde::Serialize)]
    struct DigestRequest {
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        slack_channel: Option<String>,
        period: String,
    }

    let api_base = get_api_base();

    let response = Request::post(&format!("{}/alerts/notify/digest", api_base))
        .json(&DigestRequest {
            email: email.map(str::to_string),
            slack_channel: slack_channel.map(str::to_string),
            period: period.to_string(),
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Digest failed").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

// ============ Calendar ============

/// Fetch earnings-calendar events for a year
pub async fn fetch_calendar_events(year: i32) -> Result<Vec<CalendarEvent>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/calendar?year={}", api_base, year))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load calendar").await);
    }

    let result: CalendarEventsResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.events)
}

/// Fetch events in the next N days
pub async fn fetch_upcoming_events(days: u32) -> Result<Vec<CalendarEvent>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/calendar/upcoming?days={}", api_base, days))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load upcoming events").await);
    }

    let result: CalendarEventsResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.events)
}

/// Fetch the calendar summary
pub async fn fetch_calendar_summary() -> Result<CalendarSummary, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/calendar/summary", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load calendar summary").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Re-sync the earnings calendar from upstream sources
pub async fn sync_calendar() -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/calendar/sync", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Calendar sync failed").await);
    }

    Ok(())
}

// ============ Exports ============

/// Fetch the available report export formats
pub async fn fetch_export_formats() -> Result<Vec<ExportFormat>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/exports/formats", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to load export formats").await);
    }

    let result: ExportFormatsResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.formats)
}

/// Download a generated report. Returns the suggested filename and the raw
/// bytes; the caller is responsible for handing them to the browser.
pub async fn download_report(
    format: &ExportFormat,
    company: &str,
) -> Result<(String, Vec<u8>), String> {
    let api_base = get_api_base();

    let url = if company == "all" {
        format!("{}/exports/{}/comparison/all", api_base, format.id)
    } else {
        format!(
            "{}/exports/{}/{}",
            api_base,
            format.id,
            company.to_lowercase()
        )
    };

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Export failed").await);
    }

    let disposition = response.headers().get("Content-Disposition");
    let filename = report_filename(disposition.as_deref(), company, &format.extension);

    let bytes = response
        .binary()
        .await
        .map_err(|e| format!("Download error: {}", e))?;

    Ok((filename, bytes))
}

/// Resolve the report filename from a Content-Disposition header, falling
/// back to a name derived from the company and format extension.
fn report_filename(disposition: Option<&str>, company: &str, extension: &str) -> String {
    if let Some(disposition) = disposition {
        if let Some(value) = disposition.split("filename=").nth(1) {
            let name = value.trim().trim_matches('"');
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }
    format!("{}-report.{}", company.to_lowercase(), extension)
}

// ============ Health ============

/// Check API health by probing the service root
pub async fn check_health() -> Result<ApiInfo, String> {
    let api_base = get_api_base();
    let root_url = api_base.trim_end_matches("/api").to_string();

    let response = Request::get(&format!("{}/", root_url))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err("API is not healthy".to_string());
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Minimal percent-encoding for query parameter values
fn urlencode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{:02X}", byte));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_filter_query_omits_unset_fields() {
        let filter = AlertFilter::default();
        assert_eq!(filter.to_query(), "");

        let filter = AlertFilter {
            severity: Some("critical".to_string()),
            unread_only: true,
            ..Default::default()
        };
        assert_eq!(filter.to_query(), "severity=critical&unread_only=true");
    }

    #[test]
    fn report_filename_prefers_content_disposition() {
        let name = report_filename(
            Some("attachment; filename=\"flex-q2.xlsx\""),
            "Flex",
            "xlsx",
        );
        assert_eq!(name, "flex-q2.xlsx");
    }

    #[test]
    fn report_filename_falls_back_to_company_and_extension() {
        assert_eq!(report_filename(None, "Jabil", "pdf"), "jabil-report.pdf");
        assert_eq!(report_filename(Some("inline"), "all", "pptx"), "all-report.pptx");
    }

    #[test]
    fn urlencode_escapes_reserved_characters() {
        assert_eq!(urlencode("analyst@example.com"), "analyst%40example.com");
        assert_eq!(urlencode("#competitive-intel"), "%23competitive-intel");
    }
}
