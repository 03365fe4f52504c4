//! Favourites Endpoints

use serde::{Deserialize, Serialize};

use super::{query_string, ApiClient, MessageResponse};
use crate::error::ApiError;
use crate::models::{FavouriteSong, Song};

// ========================
// Argument Structs
// ========================

#[derive(Debug, Serialize)]
pub struct ToggleFavouriteArgs<'a> {
    pub song_name: &'a str,
    pub artist: &'a str,
    pub chart_id: &'a str,
    pub chart_title: &'a str,
    pub image_url: Option<&'a str>,
    pub position: Option<u32>,
    pub peak_position: Option<u32>,
    pub weeks_on_chart: Option<u32>,
    pub last_week_position: Option<u32>,
}

impl<'a> ToggleFavouriteArgs<'a> {
    pub fn from_song(song: &'a Song, chart_id: &'a str, chart_title: &'a str) -> Self {
        Self {
            song_name: &song.name,
            artist: &song.artist,
            chart_id,
            chart_title,
            image_url: song.image.as_deref(),
            position: Some(song.position),
            peak_position: song.peak_position,
            weeks_on_chart: song.weeks_on_chart,
            last_week_position: song.last_week_position,
        }
    }
}

#[derive(Deserialize)]
struct FavouritesResponse {
    favourites: Vec<FavouriteSong>,
}

#[derive(Deserialize)]
struct ToggleResponse {
    favourite_id: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavouriteStatus {
    pub is_favourited: bool,
    #[serde(default)]
    pub favourite_id: Option<u32>,
}

/// Outcome of a toggle as decided by the server
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToggleOutcome {
    Added(Option<u32>),
    Removed(Option<u32>),
}

impl ToggleOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, ToggleOutcome::Added(_))
    }
}

// ========================
// Commands
// ========================

pub async fn list_favourites(client: &ApiClient, chart_id: Option<&str>) -> Result<Vec<FavouriteSong>, ApiError> {
    let query = query_string(&[("chart_id", chart_id)]);
    let resp: FavouritesResponse = client.get(&format!("favourites{}", query)).await?;
    Ok(resp.favourites)
}

/// Server toggles: 201 means added, 200 means removed
pub async fn toggle_favourite(client: &ApiClient, args: &ToggleFavouriteArgs<'_>) -> Result<ToggleOutcome, ApiError> {
    let (status, resp): (u16, ToggleResponse) = client.post_with_status("favourites", args).await?;
    Ok(if status == 201 {
        ToggleOutcome::Added(resp.favourite_id)
    } else {
        ToggleOutcome::Removed(resp.favourite_id)
    })
}

pub async fn remove_favourite(client: &ApiClient, favourite_id: u32) -> Result<(), ApiError> {
    let _: MessageResponse = client.delete(&format!("favourites/{}", favourite_id)).await?;
    Ok(())
}

/// Whether one song on one chart is saved
pub async fn check_favourite(
    client: &ApiClient,
    song_name: &str,
    artist: &str,
    chart_id: &str,
) -> Result<FavouriteStatus, ApiError> {
    let query = query_string(&[
        ("song_name", Some(song_name)),
        ("artist", Some(artist)),
        ("chart_id", Some(chart_id)),
    ]);
    client.get(&format!("favourites/check{}", query)).await
}
