//! Favourite Button Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::context::use_app;
use crate::models::Song;
use crate::store::FavouriteKey;

/// Heart toggle for one song on one chart; sends signed-out users to login
#[component]
pub fn FavouriteButton(song: Song, #[prop(into)] chart_id: String, #[prop(into)] chart_title: String) -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let key = FavouriteKey::for_song(&song, &chart_id);

    let is_favourited = {
        let key = key.clone();
        move || ctx.favourites.is_favourited(&key)
    };
    let is_pending = move || ctx.favourites.is_pending(&key);

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if !ctx.auth.is_authenticated_untracked() {
            navigate("/login", Default::default());
            return;
        }
        let (song, chart_id, chart_title) = (song.clone(), chart_id.clone(), chart_title.clone());
        spawn_local(async move {
            ctx.favourites.toggle(song, chart_id, chart_title).await;
        });
    };

    let class = {
        let is_favourited = is_favourited.clone();
        let is_pending = is_pending.clone();
        move || match (is_favourited(), is_pending()) {
            (true, true) => "favourite-btn active pending",
            (true, false) => "favourite-btn active",
            (false, true) => "favourite-btn pending",
            (false, false) => "favourite-btn",
        }
    };

    let title = {
        let is_favourited = is_favourited.clone();
        move || if is_favourited() { "Remove from favourites" } else { "Add to favourites" }
    };
    let icon = move || if is_favourited() { "♥" } else { "♡" };

    view! {
        <button class=class title=title disabled=is_pending on:click=on_click>
            {icon}
        </button>
    }
}
