//! Contest Banner Component
//!
//! This week's contest with a live countdown to the deadline.

use std::time::Duration;

use chrono::Utc;
use leptos::prelude::*;

use crate::context::use_app;
use crate::format::{contest_deadline, countdown, parse_date, week_label};
use crate::models::{Contest, ContestStatus};

fn status_label(status: ContestStatus) -> &'static str {
    match status {
        ContestStatus::Open => "Open",
        ContestStatus::Closed => "Closed",
        ContestStatus::Processed => "Results in",
        ContestStatus::Unknown => "Unknown",
    }
}

#[component]
pub fn ContestBanner() -> impl IntoView {
    let ctx = use_app();
    let (now, set_now) = signal(Utc::now());

    match set_interval_with_handle(move || set_now.set(Utc::now()), Duration::from_secs(30)) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => tracing::debug!(error = ?e, "countdown timer unavailable"),
    }

    let timezone = ctx.timezone;

    let render = move |contest: Contest| {
        let deadline = contest_deadline(&contest);
        let closes = deadline.filter(|_| contest.is_open()).map(|deadline| {
            let iso = deadline.to_rfc3339();
            view! {
                <div class="contest-deadline">"Closes " {move || timezone.format_datetime(&iso)}</div>
            }
        });
        let release = parse_date(&contest.chart_release_date)
            .map(week_label)
            .unwrap_or_else(|| contest.chart_release_date.clone());
        let class = if contest.is_open() { "contest-banner open" } else { "contest-banner closed" };
        view! {
            <div class=class>
                <div class="contest-title">
                    <span class="contest-name">"Weekly contest #" {contest.id}</span>
                    <span class="contest-status">{status_label(contest.status)}</span>
                </div>
                <div class="contest-dates">
                    {format!("{} to {}", contest.start_date, contest.end_date)}
                    " · Results: " {release}
                </div>
                {closes}
                {deadline.filter(|_| contest.is_open()).map(|deadline| view! {
                    <div class="contest-countdown">{move || countdown(now.get(), deadline)}</div>
                })}
            </div>
        }
    };

    move || match ctx.predictions.contest.get() {
        Some(contest) => render(contest).into_any(),
        None => view! {
            <div class="contest-banner none">"No contest is running right now. Check back next week."</div>
        }
        .into_any(),
    }
}
