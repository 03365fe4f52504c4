//! Auth Pages

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::components::{LoginForm, RegisterForm};
use crate::context::use_app;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();
    view! {
        <div class="auth-page">
            <Show when=move || !ctx.auth.is_authenticated() fallback=|| view! { <Redirect path="/" /> }>
                <LoginForm />
            </Show>
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_app();
    view! {
        <div class="auth-page">
            <Show when=move || !ctx.auth.is_authenticated() fallback=|| view! { <Redirect path="/" /> }>
                <RegisterForm />
            </Show>
        </div>
    }
}
