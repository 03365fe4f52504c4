//! Music Store
//!
//! Apple Music artwork and previews for chart songs, looked up once per song.

use std::collections::{HashMap, HashSet};

use leptos::prelude::*;

use super::{claim, InitGuard};
use crate::api;
use crate::models::AppleMusicTrack;

/// Cache key shared by every chart the song appears on
pub fn music_key(name: &str, artist: &str) -> String {
    format!("{}|{}", name.trim().to_lowercase(), artist.trim().to_lowercase())
}

#[derive(Clone, Copy)]
pub struct MusicStore {
    pub token: RwSignal<Option<String>>,
    /// None records a miss so it is not searched again
    pub tracks: RwSignal<HashMap<String, Option<AppleMusicTrack>>>,
    in_flight: StoredValue<HashSet<String>>,
    guard: StoredValue<InitGuard>,
}

impl MusicStore {
    pub fn new() -> Self {
        Self {
            token: RwSignal::new(None),
            tracks: RwSignal::new(HashMap::new()),
            in_flight: StoredValue::new(HashSet::new()),
            guard: StoredValue::new(InitGuard::new()),
        }
    }

    pub async fn init(&self) {
        if !claim(self.guard) {
            return;
        }
        match api::apple_music::developer_token(&api::client()).await {
            Ok(token) => {
                tracing::debug!("apple music token loaded");
                self.token.set(Some(token));
                self.guard.update_value(|g| g.finish(true));
            }
            Err(e) => {
                // artwork falls back to chart images
                tracing::warn!(error = %e, "apple music unavailable");
                self.guard.update_value(|g| g.finish(false));
            }
        }
    }

    pub fn track(&self, name: &str, artist: &str) -> Option<AppleMusicTrack> {
        let key = music_key(name, artist);
        self.tracks.with(|tracks| tracks.get(&key).cloned().flatten())
    }

    /// Search once per key; concurrent callers for the same key share the first request
    pub async fn lookup(&self, name: String, artist: String) {
        let key = music_key(&name, &artist);
        if self.tracks.with_untracked(|t| t.contains_key(&key)) {
            return;
        }
        let Some(token) = self.token.get_untracked() else {
            return;
        };
        let claimed = self
            .in_flight
            .try_update_value(|keys| keys.insert(key.clone()))
            .unwrap_or(false);
        if !claimed {
            return;
        }

        match api::apple_music::search_song(&api::client(), &token, &name, &artist).await {
            Ok(track) => {
                if track.is_none() {
                    tracing::debug!(song = %name, "no apple music match");
                }
                self.tracks.update(|t| {
                    t.insert(key.clone(), track);
                });
            }
            // not cached; a later render may retry
            Err(e) => tracing::debug!(song = %name, error = %e, "apple music search failed"),
        }
        self.in_flight.update_value(|keys| {
            keys.remove(&key);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_key_normalises() {
        assert_eq!(music_key(" Espresso", "Sabrina Carpenter "), "espresso|sabrina carpenter");
        assert_eq!(music_key("ESPRESSO", "sabrina carpenter"), music_key("Espresso", "Sabrina Carpenter"));
        assert_ne!(music_key("Espresso", "A"), music_key("Espresso", "B"));
    }
}
