//! Alerts Page
//!
//! Anomaly alert feed with filters, detection trigger, and the notification
//! settings workflow (test sends and digests).

use leptos::*;

use crate::api;
use crate::components::{CompanyBadge, ListSkeleton, SeverityBadge, StatCard};
use crate::state::global::{GlobalState, TRACKED_COMPANIES};

const SEVERITIES: [&str; 4] = ["critical", "high", "medium", "low"];

/// Icon for an alert type.
fn alert_icon(kind: &str) -> &'static str {
    match kind {
        "capex_anomaly" | "capex_spike" => "📈",
        "capex_drop" => "📉",
        "sentiment_shift" | "sentiment_negative" => "🌧",
        "sentiment_positive" => "☀️",
        "ai_investment_change" | "ai_investment_surge" => "🧠",
        "new_filing" => "📄",
        "strategic_change" => "⚡",
        _ => "🔔",
    }
}

/// Alerts page component
#[component]
pub fn Alerts() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let alerts = create_rw_signal(Vec::<api::Alert>::new());
    let summary = create_rw_signal(None::<api::AlertSummary>);
    let filter = create_rw_signal(api::AlertFilter::default());
    let (loading, set_loading) = create_signal(true);
    let (detecting, set_detecting) = create_signal(false);
    let (show_settings, set_show_settings) = create_signal(false);

    // Refetch whenever the filter changes (and on mount)
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let current_filter = filter.get();
        let state = state_for_effect.clone();
        spawn_local(async move {
            set_loading.set(true);

            match api::fetch_alerts(&current_filter).await {
                Ok(data) => {
                    alerts.set(data);
                    state.mark_refreshed();
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }

            match api::fetch_alert_summary().await {
                Ok(data) => summary.set(Some(data)),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch alert summary: {}", e).into(),
                    );
                }
            }

            set_loading.set(false);
        });
    });

    // Run server-side anomaly detection, then refresh the feed
    let state_for_detect = state.clone();
    let run_detection = move |_| {
        set_detecting.set(true);

        let state = state_for_detect.clone();
        spawn_local(async move {
            match api::run_alert_detection().await {
                Ok(result) => {
                    state.show_success(&format!("Detection found {} new alerts", result.new_alerts));
                    // Nudge the filter signal to trigger a refetch
                    filter.update(|_| {});
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
            set_detecting.set(false);
        });
    };

    view! {
        <div class="space-y-8">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Alerts"</h1>
                    <p class="text-gray-400 mt-1">"Anomalies and strategic changes across competitors"</p>
                </div>

                <div class="flex items-center space-x-2">
                    <button
                        on:click=move |_| set_show_settings.update(|s| *s = !*s)
                        class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                    >
                        "⚙ Notifications"
                    </button>
                    <button
                        on:click=run_detection
                        disabled=move || detecting.get()
                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if detecting.get() { "Detecting..." } else { "Run Detection" }}
                    </button>
                </div>
            </div>

            // Notification settings panel
            {move || {
                show_settings.get().then(|| view! { <NotificationSettings /> })
            }}

            // Summary cards
            <AlertSummaryCards summary=summary />

            // Filters
            <AlertFilters filter=filter />

            // Alert feed
            <section class="bg-gray-800 rounded-xl p-6">
                {move || {
                    if loading.get() {
                        view! { <ListSkeleton count=5 /> }.into_view()
                    } else {
                        view! { <AlertFeed alerts=alerts filter=filter /> }.into_view()
                    }
                }}
            </section>
        </div>
    }
}

/// Alert summary stat cards
#[component]
fn AlertSummaryCards(summary: RwSignal<Option<api::AlertSummary>>) -> impl IntoView {
    let count = move |pick: fn(&api::AlertSummary) -> usize| {
        summary
            .get()
            .map(|s| pick(&s).to_string())
            .unwrap_or_else(|| "—".to_string())
    };

    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            <StatCard
                label="Active Alerts"
                value=Signal::derive(move || count(|s| s.total_active))
                icon="🔔"
            />
            <StatCard
                label="Unread"
                value=Signal::derive(move || count(|s| s.unread))
                icon="✉️"
            />
            <StatCard
                label="Critical"
                value=Signal::derive(move || {
                    count(|s| s.by_severity.get("critical").copied().unwrap_or(0))
                })
                icon="🚨"
            />
            <StatCard
                label="High"
                value=Signal::derive(move || {
                    count(|s| s.by_severity.get("high").copied().unwrap_or(0))
                })
                icon="⚠️"
            />
        </div>
    }
}

/// Severity / company / unread filter rows
#[component]
fn AlertFilters(filter: RwSignal<api::AlertFilter>) -> impl IntoView {
    let filter_button = move |label: String, active: Signal<bool>, on_click: Callback<()>| {
        view! {
            <button
                on:click=move |_| on_click.call(())
                class=move || {
                    let base = "px-3 py-1.5 rounded-lg text-sm font-medium transition-colors";
                    if active.get() {
                        format!("{} bg-primary-600 text-white", base)
                    } else {
                        format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                    }
                }
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="space-y-3">
            <div class="flex items-center gap-2 flex-wrap">
                <span class="text-sm text-gray-400 mr-2">"Severity:"</span>

                {filter_button(
                    "All".to_string(),
                    Signal::derive(move || filter.get().severity.is_none()),
                    Callback::new(move |_| filter.update(|f| f.severity = None)),
                )}

                {SEVERITIES.into_iter().map(|severity| {
                    filter_button(
                        severity.to_string(),
                        Signal::derive(move || filter.get().severity.as_deref() == Some(severity)),
                        Callback::new(move |_| {
                            filter.update(|f| f.severity = Some(severity.to_string()))
                        }),
                    )
                }).collect_view()}

                {filter_button(
                    "Unread only".to_string(),
                    Signal::derive(move || filter.get().unread_only),
                    Callback::new(move |_| filter.update(|f| f.unread_only = !f.unread_only)),
                )}
            </div>

            <div class="flex items-center gap-2 flex-wrap">
                <span class="text-sm text-gray-400 mr-2">"Company:"</span>

                {filter_button(
                    "All".to_string(),
                    Signal::derive(move || filter.get().company.is_none()),
                    Callback::new(move |_| filter.update(|f| f.company = None)),
                )}

                {TRACKED_COMPANIES.into_iter().map(|company| {
                    filter_button(
                        company.to_string(),
                        Signal::derive(move || filter.get().company.as_deref() == Some(company)),
                        Callback::new(move |_| {
                            filter.update(|f| f.company = Some(company.to_string()))
                        }),
                    )
                }).collect_view()}
            </div>
        </div>
    }
}

/// The alert list with read/dismiss actions
#[component]
fn AlertFeed(alerts: RwSignal<Vec<api::Alert>>, filter: RwSignal<api::AlertFilter>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_read = state.clone();
    let mark_read = move |alert_id: i64| {
        let state = state_for_read.clone();
        spawn_local(async move {
            match api::mark_alert_read(alert_id).await {
                Ok(_) => {
                    alerts.update(|list| {
                        if let Some(alert) = list.iter_mut().find(|a| a.id == alert_id) {
                            alert.read = true;
                        }
                    });
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    let state_for_dismiss = state.clone();
    let dismiss = move |alert_id: i64| {
        let state = state_for_dismiss.clone();
        spawn_local(async move {
            match api::dismiss_alert(alert_id).await {
                Ok(_) => {
                    alerts.update(|list| list.retain(|a| a.id != alert_id));
                    // Summary counts changed server-side; refetch on next filter touch
                    filter.update(|_| {});
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <div class="space-y-3">
            {move || {
                let list = alerts.get();
                if list.is_empty() {
                    return view! {
                        <div class="text-center py-12">
                            <div class="text-4xl mb-2">"🎉"</div>
                            <p class="text-gray-400">"No alerts match the current filters"</p>
                        </div>
                    }.into_view();
                }

                let state = state.clone();
                list.into_iter().map(|alert| {
                    let color = state.color_for(&alert.company);
                    let opacity = if alert.read { "opacity-60" } else { "" };
                    let body = alert.message.clone()
                        .or(alert.description.clone())
                        .unwrap_or_default();
                    let timestamp = format_timestamp(&alert.created_at);
                    let alert_id = alert.id;
                    let is_read = alert.read;

                    view! {
                        <div class=format!(
                            "flex items-start justify-between p-4 bg-gray-750 rounded-lg border border-gray-700 {}",
                            opacity
                        )>
                            <div class="flex items-start space-x-3">
                                <span class="text-2xl">{alert_icon(&alert.kind)}</span>
                                <div>
                                    <div class="flex items-center gap-2 flex-wrap">
                                        <span class="font-semibold">{alert.title.clone()}</span>
                                        <SeverityBadge severity=alert.severity.clone() />
                                    </div>
                                    {(!body.is_empty()).then(|| view! {
                                        <p class="text-sm text-gray-400 mt-1">{body.clone()}</p>
                                    })}
                                    <div class="flex items-center gap-3 mt-2 text-xs text-gray-500">
                                        <CompanyBadge company=alert.company.clone() color=color />
                                        <span>{timestamp}</span>
                                    </div>
                                </div>
                            </div>

                            <div class="flex items-center space-x-2 ml-4">
                                {(!is_read).then(|| {
                                    let mark_read = mark_read.clone();
                                    view! {
                                        <button
                                            on:click=move |_| mark_read(alert_id)
                                            title="Mark read"
                                            class="p-2 text-gray-400 hover:text-white hover:bg-gray-600 rounded transition-colors"
                                        >
                                            "✓"
                                        </button>
                                    }
                                })}
                                {
                                    let dismiss = dismiss.clone();
                                    view! {
                                        <button
                                            on:click=move |_| dismiss(alert_id)
                                            title="Dismiss"
                                            class="p-2 text-gray-400 hover:text-red-400 hover:bg-gray-600 rounded transition-colors"
                                        >
                                            "✕"
                                        </button>
                                    }
                                }
                            </div>
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}

/// Notification settings: channel status, test sends, digest dispatch
#[component]
fn NotificationSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let config = create_rw_signal(None::<api::NotificationConfig>);
    let (test_email, set_test_email) = create_signal(String::new());
    let (test_channel, set_test_channel) = create_signal(String::new());
    let (sending, set_sending) = create_signal(false);

    // Fetch channel configuration on open
    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_notification_config().await {
                Ok(data) => config.set(Some(data)),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch notification config: {}", e).into(),
                    );
                }
            }
        });
    });

    let state_for_email = state.clone();
    let send_test_email = move |_| {
        let email = test_email.get();
        if email.is_empty() {
            state_for_email.show_error("Enter an email address first");
            return;
        }

        set_sending.set(true);
        let state = state_for_email.clone();
        spawn_local(async move {
            match api::send_test_email(&email).await {
                Ok(outcome) if outcome.logged => {
                    state.show_success("Email logged (sender not configured)");
                }
                Ok(outcome) if outcome.success => {
                    state.show_success("Test email sent");
                }
                Ok(_) => {
                    state.show_error("Failed to send test email");
                }
                Err(e) => state.show_error(&e),
            }
            set_sending.set(false);
        });
    };

    let state_for_slack = state.clone();
    let send_test_slack = move |_| {
        set_sending.set(true);

        let channel = test_channel.get();
        let state = state_for_slack.clone();
        spawn_local(async move {
            let channel = (!channel.is_empty()).then_some(channel);
            match api::send_test_slack(channel.as_deref()).await {
                Ok(outcome) if outcome.logged => {
                    state.show_success("Message logged (Slack not configured)");
                }
                Ok(outcome) if outcome.success => {
                    state.show_success("Test Slack message sent");
                }
                Ok(_) => {
                    state.show_error("Failed to send Slack message");
                }
                Err(e) => state.show_error(&e),
            }
            set_sending.set(false);
        });
    };

    let state_for_digest = state.clone();
    let send_digest = move |_| {
        set_sending.set(true);

        let email = test_email.get();
        let channel = test_channel.get();
        let state = state_for_digest.clone();
        spawn_local(async move {
            let email = (!email.is_empty()).then_some(email);
            let channel = (!channel.is_empty()).then_some(channel);

            if email.is_none() && channel.is_none() {
                state.show_error("Enter an email or a Slack channel for the digest");
                set_sending.set(false);
                return;
            }

            match api::send_alert_digest(email.as_deref(), channel.as_deref(), "daily").await {
                Ok(outcome) => {
                    state.show_success(&format!("Digest sent with {} alerts", outcome.alert_count));
                }
                Err(e) => state.show_error(&e),
            }
            set_sending.set(false);
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 border border-gray-700">
            <h2 class="text-xl font-semibold mb-4">"Notification Settings"</h2>

            // Channel status
            <div class="grid md:grid-cols-2 gap-4 mb-6">
                {move || {
                    match config.get() {
                        Some(config) => view! {
                            <ChannelStatus
                                name="Email"
                                enabled=config.email.enabled
                                detail=if config.email.from_email.is_empty() {
                                    "No sender configured".to_string()
                                } else {
                                    format!("From {}", config.email.from_email)
                                }
                            />
                            <ChannelStatus
                                name="Slack"
                                enabled=config.slack.enabled
                                detail=if config.slack.default_channel.is_empty() {
                                    "No default channel".to_string()
                                } else {
                                    format!("Default {}", config.slack.default_channel)
                                }
                            />
                        }.into_view(),
                        None => view! {
                            <div class="col-span-2 text-sm text-gray-400">"Loading channel status..."</div>
                        }.into_view(),
                    }
                }}
            </div>

            <div class="grid md:grid-cols-2 gap-4">
                // Email test
                <div class="p-4 bg-gray-700 rounded-lg space-y-3">
                    <h3 class="font-medium">"Test Email"</h3>
                    <input
                        type="email"
                        placeholder="analyst@example.com"
                        prop:value=move || test_email.get()
                        on:input=move |ev| set_test_email.set(event_target_value(&ev))
                        class="w-full bg-gray-800 rounded-lg px-3 py-2 text-sm
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                    <button
                        on:click=send_test_email
                        disabled=move || sending.get()
                        class="w-full px-4 py-2 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                               rounded-lg text-sm font-medium transition-colors"
                    >
                        "Send Test Email"
                    </button>
                </div>

                // Slack test
                <div class="p-4 bg-gray-700 rounded-lg space-y-3">
                    <h3 class="font-medium">"Test Slack"</h3>
                    <input
                        type="text"
                        placeholder="#competitive-intel (optional)"
                        prop:value=move || test_channel.get()
                        on:input=move |ev| set_test_channel.set(event_target_value(&ev))
                        class="w-full bg-gray-800 rounded-lg px-3 py-2 text-sm
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                    <button
                        on:click=send_test_slack
                        disabled=move || sending.get()
                        class="w-full px-4 py-2 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                               rounded-lg text-sm font-medium transition-colors"
                    >
                        "Send Test Message"
                    </button>
                </div>
            </div>

            // Digest
            <div class="mt-4 flex items-center justify-between p-4 bg-gray-700 rounded-lg">
                <div>
                    <h3 class="font-medium">"Daily Digest"</h3>
                    <p class="text-sm text-gray-400">
                        "Send a summary of recent alerts to the channels above"
                    </p>
                </div>
                <button
                    on:click=send_digest
                    disabled=move || sending.get()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg text-sm font-medium transition-colors"
                >
                    {move || if sending.get() { "Sending..." } else { "Send Digest" }}
                </button>
            </div>
        </section>
    }
}

/// Enabled/disabled status row for one notification channel
#[component]
fn ChannelStatus(
    name: &'static str,
    enabled: bool,
    #[prop(into)] detail: String,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between p-3 bg-gray-700 rounded-lg">
            <div>
                <span class="font-medium">{name}</span>
                <p class="text-xs text-gray-400">{detail}</p>
            </div>
            {if enabled {
                view! { <span class="text-green-400 text-sm">"● Enabled"</span> }.into_view()
            } else {
                view! { <span class="text-gray-500 text-sm">"○ Disabled"</span> }.into_view()
            }}
        </div>
    }
}

/// Human-readable alert timestamp.
fn format_timestamp(created_at: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(created_at)
        .map(|dt| dt.format("%b %d, %H:%M").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_alert_types_have_specific_icons() {
        assert_eq!(alert_icon("capex_spike"), "📈");
        assert_eq!(alert_icon("ai_investment_surge"), "🧠");
        assert_eq!(alert_icon("mystery_type"), "🔔");
    }

    #[test]
    fn timestamps_parse_rfc3339_and_pass_through_garbage() {
        assert_eq!(
            format_timestamp("2026-08-08T14:30:00+00:00"),
            "Aug 08, 14:30"
        );
        assert_eq!(format_timestamp("not-a-date"), "not-a-date");
    }
}
