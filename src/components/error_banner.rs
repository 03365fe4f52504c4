//! Error Banner Component
//!
//! Shows an `ApiError` with a Retry button when retrying can help.

use leptos::prelude::*;

use crate::error::ApiError;

#[component]
pub fn ErrorBanner(
    #[prop(into)] error: Signal<Option<ApiError>>,
    #[prop(into, optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        error.get().map(|e| {
            let retry = on_retry.filter(|_| e.is_retryable());
            view! {
                <div class="error-banner" role="alert">
                    <span class="error-text">{e.user_message()}</span>
                    {retry.map(|cb| view! {
                        <button class="retry-btn" on:click=move |_| cb.run(())>"Retry"</button>
                    })}
                </div>
            }
        })
    }
}
