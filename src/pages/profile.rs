//! Profile Page
//!
//! Point totals, display preferences and recent client logs.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::components::TimezoneSelector;
use crate::context::use_app;
use crate::format::{points_label, thousands};
use crate::models::User;

/// Lines shown in the diagnostics panel
const LOG_LINES: usize = 50;

fn accuracy_label(user: &User) -> String {
    user.accuracy()
        .map(|pct| format!("{:.0}%", pct))
        .unwrap_or_else(|| "–".to_string())
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_app();

    // Points move after each weekly processing run
    Effect::new(move |_| {
        if ctx.auth.is_authenticated_untracked() {
            spawn_local(async move { ctx.auth.reload_user().await });
        }
    });

    let stats = move || {
        ctx.auth.user.get().map(|user| {
            view! {
                <section class="profile-stats">
                    <h1>{user.username.clone()}</h1>
                    <p class="profile-email">{user.email.clone()}</p>
                    <dl>
                        <dt>"Total points"</dt>
                        <dd>{points_label(user.total_points)}</dd>
                        <dt>"This week"</dt>
                        <dd>{points_label(user.weekly_points)}</dd>
                        <dt>"Predictions made"</dt>
                        <dd>{thousands(user.predictions_made)}</dd>
                        <dt>"Accuracy"</dt>
                        <dd>{accuracy_label(&user)}</dd>
                    </dl>
                </section>
            }
        })
    };

    let (show_logs, set_show_logs) = signal(false);
    let logs = move || {
        let lines = console_logger::recent_lines();
        let skip = lines.len().saturating_sub(LOG_LINES);
        lines.into_iter().skip(skip).collect::<Vec<_>>().join("\n")
    };

    view! {
        <div class="profile-page">
            <Show
                when=move || ctx.auth.is_authenticated()
                fallback=|| view! { <p class="empty"><A href="/login">"Log in"</A>" to see your profile."</p> }
            >
                {stats}
            </Show>

            <section class="preferences">
                <h2>"Preferences"</h2>
                <TimezoneSelector />
            </section>

            <section class="diagnostics">
                <button class="link-btn" on:click=move |_| set_show_logs.update(|v| *v = !*v)>
                    {move || if show_logs.get() { "Hide recent logs" } else { "Show recent logs" }}
                </button>
                <Show when=move || show_logs.get()>
                    <pre class="log-lines">{logs}</pre>
                </Show>
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_label() {
        let mut user = User::default();
        assert_eq!(accuracy_label(&user), "–");
        user.predictions_made = 3;
        user.correct_predictions = 1;
        assert_eq!(accuracy_label(&user), "33%");
    }
}
