//! Favourites Page
//!
//! Favourite songs grouped by song, with every chart they were saved from.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::components::{Artwork, DeleteConfirmButton, ErrorBanner, Loading};
use crate::context::use_app;
use crate::format::{movement, weeks_label};
use crate::models::{FavouriteChartEntry, FavouriteSong};

#[component]
pub fn FavouritesPage() -> impl IntoView {
    let ctx = use_app();
    let favourites = ctx.favourites;

    // Always show fresh data when the page opens
    Effect::new(move |_| {
        if ctx.auth.is_authenticated() {
            spawn_local(async move {
                favourites.refresh().await;
            });
        }
    });

    let retry = Callback::new(move |_| {
        spawn_local(async move {
            favourites.refresh().await;
        });
    });

    view! {
        <div class="favourites-page">
            <h1>"Your favourites"</h1>
            <Show
                when=move || ctx.auth.is_authenticated()
                fallback=|| view! {
                    <p class="empty"><A href="/login">"Log in"</A>" to keep track of songs you love."</p>
                }
            >
                <ErrorBanner error=Signal::derive(move || favourites.error.get()) on_retry=retry />
                <Show when=move || favourites.loading.get() && favourites.state.with(|s| s.count() == 0)>
                    <Loading label="Loading favourites…" />
                </Show>
                <Show when=move || !favourites.loading.get() && favourites.state.with(|s| s.count() == 0)>
                    <p class="empty">"No favourites yet. Tap ♡ on any song in a chart."</p>
                </Show>
                <ul class="favourite-songs">
                    <For
                        each=move || favourites.state.with(|s| s.songs.clone())
                        key=|song: &FavouriteSong| (song.song_id, song.charts.len())
                        children=move |song: FavouriteSong| view! { <FavouriteCard song=song /> }
                    />
                </ul>
            </Show>
        </div>
    }
}

#[component]
fn FavouriteCard(song: FavouriteSong) -> impl IntoView {
    let timezone = use_app().timezone;
    let charts = song.charts.clone();
    let added = song.added_at.clone().map(|added_at| view! {
        <span class="favourite-added">"Added " {move || timezone.format_datetime(&added_at)}</span>
    });
    view! {
        <li class="favourite-card">
            <Artwork name=song.song_name.clone() artist=song.artist.clone() fallback=song.image_url.clone() size=96 />
            <div class="favourite-info">
                <span class="song-name">{song.song_name.clone()}</span>
                <span class="song-artist">{song.artist.clone()}</span>
                {added}
            </div>
            <ul class="chart-appearances">
                {charts.into_iter().map(|entry| view! { <ChartAppearance entry=entry /> }).collect_view()}
            </ul>
        </li>
    }
}

#[component]
fn ChartAppearance(entry: FavouriteChartEntry) -> impl IntoView {
    let favourites = use_app().favourites;
    let favourite_id = entry.favourite_id;
    let title = entry.chart_title.clone().unwrap_or_else(|| entry.chart_id.clone());
    let prompt = format!("Remove from {}?", title);
    let details = entry.position.map(|position| {
        let change = movement(position, entry.last_week_position, entry.peak_position, entry.weeks_on_chart);
        let weeks = entry.weeks_on_chart.map(weeks_label).unwrap_or_default();
        view! {
            <span class="appearance-position">"#" {position}</span>
            <span class=change.css_class()>{change.label()}</span>
            <span class="appearance-weeks">{weeks}</span>
        }
    });

    view! {
        <li class="chart-appearance">
            <A href=format!("/charts/{}", entry.chart_id)>{title}</A>
            {details}
            <DeleteConfirmButton
                button_class="favourite-remove-btn"
                prompt=prompt
                on_confirm=move |_| {
                    spawn_local(async move {
                        favourites.remove(favourite_id).await;
                    });
                }
            />
        </li>
    }
}
