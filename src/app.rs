//! Waveger Frontend App
//!
//! Root component: provides the stores, starts initialization and routes.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

use crate::api;
use crate::components::{Loading, Nav};
use crate::context::AppContext;
use crate::pages::{ChartPage, FavouritesPage, LoginPage, PredictionsPage, ProfilePage, RegisterPage};
use crate::store::{init::initialize, InitPhase};

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    // A refresh token the backend rejects ends the session everywhere
    api::client().set_session_expired_hook(move || ctx.session_expired());

    spawn_local(initialize(ctx));

    view! {
        <Router>
            <div class="app-layout">
                <Nav />
                <StartupStatus />
                <main class="main-content">
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=path!("/") view=ChartPage />
                        <Route path=path!("/charts/:id") view=ChartPage />
                        <Route path=path!("/favourites") view=FavouritesPage />
                        <Route path=path!("/predictions") view=PredictionsPage />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/register") view=RegisterPage />
                        <Route path=path!("/profile") view=ProfilePage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// Thin bar shown until every store has loaded
#[component]
fn StartupStatus() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    view! {
        <Show when=move || ctx.phase.get() != InitPhase::Ready>
            <div class="startup-status">
                <Loading inline=true />
                <span>{move || format!("{}…", ctx.phase.get().label())}</span>
            </div>
        </Show>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page not found"</h1>
            <p>"That page is not on the chart."</p>
            <A href="/">"Back to the charts"</A>
        </div>
    }
}
