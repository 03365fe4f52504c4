//! Song Card Component
//!
//! One chart row: position, movement, artwork, stats and actions.

use leptos::prelude::*;

use super::{Artwork, FavouriteButton, PreviewButton};
use crate::format::{song_movement, weeks_label};
use crate::models::Song;

#[component]
pub fn SongCard(song: Song, #[prop(into)] chart_id: String, #[prop(into)] chart_title: String) -> impl IntoView {
    let movement = song_movement(&song);
    let last_week = song
        .last_week_position
        .map(|p| p.to_string())
        .unwrap_or_else(|| "–".to_string());
    let peak = song
        .peak_position
        .map(|p| p.to_string())
        .unwrap_or_else(|| "–".to_string());
    let weeks = song.weeks_on_chart.map(weeks_label);

    view! {
        <li class="song-card">
            <div class="song-rank">
                <span class="song-position">{song.position}</span>
                <span class=movement.css_class()>{movement.label()}</span>
            </div>

            <Artwork name=song.name.clone() artist=song.artist.clone() fallback=song.image.clone() size=80 />

            <div class="song-info">
                <span class="song-name">{song.name.clone()}</span>
                <span class="song-artist">{song.artist.clone()}</span>
            </div>

            <div class="song-stats">
                <span class="stat" title="Last week">"LW " {last_week}</span>
                <span class="stat" title="Peak position">"Peak " {peak}</span>
                {weeks.map(|w| view! { <span class="stat" title="Weeks on chart">{w}</span> })}
            </div>

            <div class="song-actions">
                <PreviewButton name=song.name.clone() artist=song.artist.clone() />
                <FavouriteButton song=song.clone() chart_id=chart_id chart_title=chart_title />
            </div>
        </li>
    }
}
