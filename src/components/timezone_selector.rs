//! Timezone Selector Component

use leptos::prelude::*;

use crate::context::use_app;
use crate::store::timezone::{timezone_label, SUPPORTED_TIMEZONES};

#[component]
pub fn TimezoneSelector() -> impl IntoView {
    let timezone = use_app().timezone;

    // A detected zone outside the list still shows up as the selected option
    let extra = move || {
        let current = timezone.timezone.get();
        (!SUPPORTED_TIMEZONES.iter().any(|(id, _)| *id == current)).then(|| {
            let label = timezone_label(&current).to_string();
            view! { <option value=current selected=true>{label}</option> }
        })
    };

    view! {
        <label class="timezone-selector">
            "Timezone "
            <select on:change=move |ev| timezone.set_timezone(&event_target_value(&ev))>
                {extra}
                {SUPPORTED_TIMEZONES.iter().map(|(id, label)| {
                    let id = *id;
                    view! {
                        <option value=id selected=move || timezone.timezone.get() == id>
                            {*label}
                        </option>
                    }
                }).collect_view()}
            </select>
        </label>
    }
}
