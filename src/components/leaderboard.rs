//! Leaderboard Component

use leptos::prelude::*;

use crate::context::use_app;
use crate::format::points_label;
use crate::models::LeaderboardEntry;

#[component]
pub fn Leaderboard(#[prop(default = 10)] limit: usize) -> impl IntoView {
    let ctx = use_app();

    let rows = move || {
        ctx.predictions
            .leaderboard
            .get()
            .into_iter()
            .take(limit)
            .enumerate()
            .collect::<Vec<_>>()
    };
    let me = move || ctx.auth.user.with(|u| u.as_ref().map(|u| u.id));

    view! {
        <section class="leaderboard">
            <h2>"Leaderboard"</h2>
            <Show
                when=move || !ctx.predictions.leaderboard.with(Vec::is_empty)
                fallback=|| view! { <p class="empty">"No scores yet this season."</p> }
            >
                <ol class="leaderboard-rows">
                    <For
                        each=rows
                        key=|(rank, entry): &(usize, LeaderboardEntry)| (*rank, entry.id, entry.points)
                        children=move |(rank, entry): (usize, LeaderboardEntry)| {
                            let id = entry.id;
                            let is_me = move || me() == Some(id);
                            view! {
                                <li class=move || if is_me() { "leaderboard-row me" } else { "leaderboard-row" }>
                                    <span class="rank">{rank + 1}</span>
                                    <span class="username">{entry.username.clone()}</span>
                                    <span class="points">{points_label(entry.points)}</span>
                                </li>
                            }
                        }
                    />
                </ol>
            </Show>
        </section>
    }
}
