//! Prediction Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app;
use crate::models::PredictionType;
use crate::scoring::{potential_points, rules_summary};
use crate::store::predictions::FORM_FIELD;
use crate::validation::{message_for, FieldError, PredictionInput};

fn position_hint(kind: PredictionType) -> Option<&'static str> {
    match kind {
        PredictionType::Entry => Some("Debut position (1-100)"),
        PredictionType::PositionChange => Some("Places up (+) or down (-)"),
        PredictionType::Exit => None,
    }
}

#[component]
pub fn PredictionForm() -> impl IntoView {
    let ctx = use_app();
    let predictions = ctx.predictions;

    let (kind, set_kind) = signal(PredictionType::Entry);
    let (target_name, set_target_name) = signal(String::new());
    let (artist, set_artist) = signal(String::new());
    let (position, set_position) = signal(String::new());
    let (errors, set_errors) = signal(Vec::<FieldError>::new());
    let (submitted, set_submitted) = signal(false);

    let field_error = move |field: &'static str| {
        move || message_for(&errors.get(), field).map(|msg| view! { <span class="field-error">{msg}</span> })
    };

    let potential = move || {
        let parsed = position.get().trim().trim_start_matches('+').parse::<i32>().ok();
        potential_points(kind.get(), parsed)
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = PredictionInput {
            prediction_type: Some(kind.get_untracked()),
            target_name: target_name.get_untracked(),
            artist: artist.get_untracked(),
            position: position.get_untracked(),
        };
        set_submitted.set(false);
        spawn_local(async move {
            match predictions.submit(input).await {
                Ok(_) => {
                    set_errors.set(Vec::new());
                    set_target_name.set(String::new());
                    set_artist.set(String::new());
                    set_position.set(String::new());
                    set_submitted.set(true);
                }
                Err(errs) => set_errors.set(errs),
            }
        });
    };

    view! {
        <form class="prediction-form" on:submit=on_submit>
            <h2>"Make a prediction"</h2>

            <div class="type-selector-row">
                {PredictionType::ALL.into_iter().map(|t| view! {
                    <button
                        type="button"
                        class=move || if kind.get() == t { "type-btn active" } else { "type-btn" }
                        on:click=move |_| set_kind.set(t)
                    >
                        {t.label()}
                    </button>
                }).collect_view()}
            </div>
            <p class="rules">{move || rules_summary(kind.get())}</p>

            <label>
                "Song"
                <input
                    type="text"
                    placeholder="Song title"
                    prop:value=move || target_name.get()
                    on:input=move |ev| set_target_name.set(event_target_value(&ev))
                />
                {field_error("target_name")}
            </label>

            <label>
                "Artist"
                <input
                    type="text"
                    placeholder="Artist"
                    prop:value=move || artist.get()
                    on:input=move |ev| set_artist.set(event_target_value(&ev))
                />
                {field_error("artist")}
            </label>

            {move || position_hint(kind.get()).map(|hint| view! {
                <label>
                    {hint}
                    <input
                        type="text"
                        inputmode="numeric"
                        prop:value=move || position.get()
                        on:input=move |ev| set_position.set(event_target_value(&ev))
                    />
                    {field_error("position")}
                </label>
            })}

            <p class="potential">{move || format!("Worth up to {} pts", potential())}</p>

            {field_error(FORM_FIELD)}
            <Show when=move || submitted.get()>
                <p class="form-success">"Prediction saved. Good luck!"</p>
            </Show>

            <button
                type="submit"
                disabled=move || predictions.submitting.get() || !predictions.contest.with(|c| c.as_ref().is_some_and(|c| c.is_open()))
            >
                {move || if predictions.submitting.get() { "Submitting…" } else { "Submit prediction" }}
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_needs_no_position() {
        assert!(position_hint(PredictionType::Exit).is_none());
        assert!(position_hint(PredictionType::Entry).is_some());
    }
}
