//! Apple Music Endpoints
//!
//! The backend only mints the developer token; catalog search goes straight
//! to Apple with it.

use serde::Deserialize;

use super::{query_string, ApiClient};
use crate::config::APPLE_MUSIC_API_BASE;
use crate::error::ApiError;
use crate::models::AppleMusicTrack;

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    results: SearchResults,
}

#[derive(Deserialize, Default)]
struct SearchResults {
    #[serde(default)]
    songs: Option<SongResults>,
}

#[derive(Deserialize)]
struct SongResults {
    #[serde(default)]
    data: Vec<SongResource>,
}

#[derive(Deserialize)]
struct SongResource {
    attributes: SongAttributes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SongAttributes {
    name: String,
    artist_name: String,
    #[serde(default)]
    artwork: Option<Artwork>,
    #[serde(default)]
    previews: Vec<Preview>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct Artwork {
    url: String,
}

#[derive(Deserialize)]
struct Preview {
    url: String,
}

pub async fn developer_token(client: &ApiClient) -> Result<String, ApiError> {
    let resp: TokenResponse = client.get_public("apple-music-token").await?;
    if resp.token.trim().is_empty() {
        return Err(ApiError::Decode("empty Apple Music token".into()));
    }
    Ok(resp.token)
}

/// First catalog song matching "name artist"
pub async fn search_song(
    client: &ApiClient,
    token: &str,
    name: &str,
    artist: &str,
) -> Result<Option<AppleMusicTrack>, ApiError> {
    let term = format!("{} {}", name, artist);
    let url = format!(
        "{}/catalog/{}/search{}",
        APPLE_MUSIC_API_BASE,
        client.config().apple_music_storefront,
        query_string(&[("term", Some(term.as_str())), ("types", Some("songs")), ("limit", Some("1"))]),
    );
    let resp: SearchResponse = client.get_external(&url, token).await?;
    Ok(first_track(resp))
}

fn first_track(resp: SearchResponse) -> Option<AppleMusicTrack> {
    let song = resp.results.songs?.data.into_iter().next()?;
    let attrs = song.attributes;
    Some(AppleMusicTrack {
        name: attrs.name,
        artist: attrs.artist_name,
        artwork_url: attrs.artwork.map(|a| a.url),
        preview_url: attrs.previews.into_iter().next().map(|p| p.url),
        url: attrs.url,
    })
}

/// Fill the `{w}x{h}` artwork template
pub fn artwork_url(template: &str, size: u32) -> String {
    template
        .replace("{w}", &size.to_string())
        .replace("{h}", &size.to_string())
}
