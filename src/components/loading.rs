//! Loading Component

use leptos::prelude::*;

/// Spinner; block-level unless `inline`
#[component]
pub fn Loading(
    #[prop(optional)] inline: bool,
    #[prop(into, optional)] label: Option<String>,
) -> impl IntoView {
    let class = if inline { "loading-spinner inline" } else { "loading-spinner" };
    view! {
        <div class=if inline { "loading inline" } else { "loading" }>
            <span class=class />
            {label.map(|text| view! { <span class="loading-label">{text}</span> })}
        </div>
    }
}
