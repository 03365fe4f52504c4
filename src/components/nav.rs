//! Navigation Component
//!
//! Header with links and the signed-in user.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::context::use_app;
use crate::format::points_label;

#[component]
pub fn Nav() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();

    let logout = move |_| {
        ctx.logout();
        navigate("/", Default::default());
    };

    view! {
        <nav class="nav-bar">
            <A href="/" attr:class="nav-brand">
                <span class="nav-logo">"🌊"</span>
                <span class="nav-title">"Waveger"</span>
            </A>

            <div class="nav-links">
                <NavLink href="/" label="Charts" />
                <NavLink href="/predictions" label="Predictions" />
                <Show when=move || ctx.auth.is_authenticated()>
                    <NavLink href="/favourites" label="Favourites" />
                </Show>
            </div>

            <div class="nav-user">
                {move || match ctx.auth.user.get() {
                    Some(user) => view! {
                        <A href="/profile" attr:class="nav-profile">
                            <span class="nav-username">{user.username.clone()}</span>
                            <span class="nav-points">{points_label(user.total_points)}</span>
                        </A>
                        <button class="nav-logout" on:click=logout.clone()>"Log out"</button>
                    }
                    .into_any(),
                    None => view! {
                        <A href="/login" attr:class="nav-login">"Log in"</A>
                        <A href="/register" attr:class="nav-register">"Sign up"</A>
                    }
                    .into_any(),
                }}
            </div>
        </nav>
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A href=href attr:class="nav-link">
            {label}
        </A>
    }
}
