//! Predictions Page
//!
//! Contest banner, the prediction form, the user's own picks and the leaderboard.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::components::{ContestBanner, ErrorBanner, Leaderboard, Loading, PredictionForm};
use crate::context::use_app;
use crate::format::points_label;
use crate::models::{Prediction, PredictionType};

fn describe(prediction: &Prediction) -> String {
    match (prediction.prediction_type, prediction.position) {
        (PredictionType::Entry, Some(p)) => format!("debuts at #{}", p),
        (PredictionType::PositionChange, Some(c)) if c > 0 => format!("climbs {} places", c),
        (PredictionType::PositionChange, Some(c)) => format!("falls {} places", c.abs()),
        (PredictionType::Exit, _) => "drops off the chart".to_string(),
        (_, None) => prediction.prediction_type.label().to_lowercase(),
    }
}

fn outcome(prediction: &Prediction) -> (&'static str, String) {
    match (prediction.is_correct, prediction.points) {
        (Some(true), points) => ("outcome correct", format!("+{}", points_label(points.unwrap_or(0) as i64))),
        (Some(false), _) => ("outcome wrong", "Missed".to_string()),
        (None, _) => ("outcome pending", "Pending".to_string()),
    }
}

#[component]
pub fn PredictionsPage() -> impl IntoView {
    let ctx = use_app();
    let predictions = ctx.predictions;

    let retry = Callback::new(move |_| {
        let authenticated = ctx.auth.is_authenticated_untracked();
        spawn_local(async move {
            predictions.reload(authenticated).await;
        });
    });

    view! {
        <div class="predictions-page">
            <h1>"Chart predictions"</h1>
            <ErrorBanner error=Signal::derive(move || predictions.error.get()) on_retry=retry />
            <Show when=move || predictions.loading.get()>
                <Loading inline=true label="Loading contest…" />
            </Show>
            <ContestBanner />

            <div class="predictions-columns">
                <div class="predictions-main">
                    <Show
                        when=move || ctx.auth.is_authenticated()
                        fallback=|| view! {
                            <p class="empty"><A href="/login">"Log in"</A>" to make predictions."</p>
                        }
                    >
                        <PredictionForm />
                        <section class="my-predictions">
                            <h2>"Your predictions"</h2>
                            <Show
                                when=move || !predictions.predictions.with(Vec::is_empty)
                                fallback=|| view! { <p class="empty">"Nothing yet this week."</p> }
                            >
                                <ul>
                                    <For
                                        each=move || predictions.predictions.get()
                                        key=|p: &Prediction| (p.id, p.is_correct, p.points)
                                        children=move |p: Prediction| {
                                            let (class, result) = outcome(&p);
                                            view! {
                                                <li class="my-prediction">
                                                    <span class="prediction-target">
                                                        {format!("{} by {}", p.target_name, p.artist)}
                                                    </span>
                                                    <span class="prediction-detail">{describe(&p)}</span>
                                                    <span class=class>{result}</span>
                                                </li>
                                            }
                                        }
                                    />
                                </ul>
                            </Show>
                        </section>
                    </Show>
                </div>
                <Leaderboard />
            </div>
        </div>
    }
}
