//! Favourites Store
//!
//! Optimistic favourite toggles. The pure `FavouritesState` tracks what the
//! server last said plus the desired state of toggles still in flight;
//! `FavouritesStore` wraps it in signals and talks to the backend.

use std::collections::HashMap;

use leptos::prelude::*;

use super::{claim, InitGuard};
use crate::api::{self, favourites::ToggleFavouriteArgs};
use crate::error::ApiError;
use crate::models::{FavouriteSong, Song};

/// Identity of a favourite: one song on one chart
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FavouriteKey {
    song_name: String,
    artist: String,
    chart_id: String,
}

impl FavouriteKey {
    pub fn new(song_name: &str, artist: &str, chart_id: &str) -> Self {
        Self {
            song_name: song_name.trim().to_lowercase(),
            artist: artist.trim().to_lowercase(),
            chart_id: chart_id.to_string(),
        }
    }

    pub fn for_song(song: &Song, chart_id: &str) -> Self {
        Self::new(&song.name, &song.artist, chart_id)
    }

    fn matches(&self, song: &FavouriteSong) -> bool {
        song.song_name.trim().to_lowercase() == self.song_name
            && song.artist.trim().to_lowercase() == self.artist
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavouritesState {
    /// Last list fetched from the server
    pub songs: Vec<FavouriteSong>,
    /// Desired state of toggles awaiting a response
    pending: HashMap<FavouriteKey, bool>,
    /// Toggle results not yet reflected in `songs`
    confirmed: HashMap<FavouriteKey, bool>,
}

impl FavouritesState {
    fn server_has(&self, key: &FavouriteKey) -> bool {
        if let Some(known) = self.confirmed.get(key) {
            return *known;
        }
        self.songs
            .iter()
            .any(|s| key.matches(s) && s.charts.iter().any(|c| c.chart_id == key.chart_id))
    }

    /// What the UI should show: a pending toggle's target wins over server state
    pub fn is_favourited(&self, key: &FavouriteKey) -> bool {
        self.pending
            .get(key)
            .copied()
            .unwrap_or_else(|| self.server_has(key))
    }

    pub fn is_pending(&self, key: &FavouriteKey) -> bool {
        self.pending.contains_key(key)
    }

    /// Start a toggle. Returns the optimistic new state, or None if one is already in flight.
    pub fn begin_toggle(&mut self, key: FavouriteKey) -> Option<bool> {
        if self.pending.contains_key(&key) {
            return None;
        }
        let desired = !self.is_favourited(&key);
        self.pending.insert(key, desired);
        Some(desired)
    }

    /// Apply the server's verdict, which may differ from the optimistic guess
    pub fn complete_toggle(&mut self, key: &FavouriteKey, added: bool) {
        self.pending.remove(key);
        if !added {
            self.drop_chart_entry(key);
        }
        self.confirmed.insert(key.clone(), added);
    }

    /// Roll back to the server state
    pub fn fail_toggle(&mut self, key: &FavouriteKey) {
        self.pending.remove(key);
    }

    /// Fresh list from the server supersedes confirmed toggles
    pub fn replace_songs(&mut self, songs: Vec<FavouriteSong>) {
        self.songs = songs;
        self.confirmed.clear();
    }

    pub fn favourite_id(&self, key: &FavouriteKey) -> Option<u32> {
        self.songs
            .iter()
            .filter(|s| key.matches(s))
            .flat_map(|s| s.charts.iter())
            .find(|c| c.chart_id == key.chart_id)
            .map(|c| c.favourite_id)
    }

    /// Remove by favourite id; songs left without chart entries disappear
    pub fn remove_by_id(&mut self, favourite_id: u32) -> bool {
        let before: usize = self.songs.iter().map(|s| s.charts.len()).sum();
        for song in &mut self.songs {
            song.charts.retain(|c| c.favourite_id != favourite_id);
        }
        self.songs.retain(|s| !s.charts.is_empty());
        let after: usize = self.songs.iter().map(|s| s.charts.len()).sum();
        after < before
    }

    pub fn count(&self) -> usize {
        self.songs.len()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn drop_chart_entry(&mut self, key: &FavouriteKey) {
        for song in self.songs.iter_mut().filter(|s| key.matches(s)) {
            song.charts.retain(|c| c.chart_id != key.chart_id);
        }
        self.songs.retain(|s| !s.charts.is_empty());
    }
}

/// Lost responses leave the server state unknown
fn toggle_may_have_applied(error: &ApiError) -> bool {
    matches!(error, ApiError::Timeout | ApiError::Network(_))
}

#[derive(Clone, Copy)]
pub struct FavouritesStore {
    pub state: RwSignal<FavouritesState>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<ApiError>>,
    guard: StoredValue<InitGuard>,
}

impl FavouritesStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(FavouritesState::default()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            guard: StoredValue::new(InitGuard::new()),
        }
    }

    /// First load for a signed-in user; no-op when signed out or already loaded
    pub async fn init(&self, authenticated: bool) {
        if !authenticated || !claim(self.guard) {
            return;
        }
        let ok = self.refresh().await;
        self.guard.update_value(|g| g.finish(ok));
    }

    pub async fn refresh(&self) -> bool {
        self.loading.set(true);
        self.error.set(None);
        let result = api::favourites::list_favourites(&api::client(), None).await;
        self.loading.set(false);
        match result {
            Ok(songs) => {
                tracing::debug!(count = songs.len(), "favourites loaded");
                self.state.update(|s| s.replace_songs(songs));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load favourites");
                self.error.set(Some(e));
                false
            }
        }
    }

    pub fn is_favourited(&self, key: &FavouriteKey) -> bool {
        self.state.with(|s| s.is_favourited(key))
    }

    pub fn is_pending(&self, key: &FavouriteKey) -> bool {
        self.state.with(|s| s.is_pending(key))
    }

    pub async fn toggle(&self, song: Song, chart_id: String, chart_title: String) {
        let key = FavouriteKey::for_song(&song, &chart_id);
        let Some(desired) = self.state.try_update(|s| s.begin_toggle(key.clone())).flatten() else {
            tracing::debug!("favourite toggle already in flight");
            return;
        };
        self.error.set(None);

        let args = ToggleFavouriteArgs::from_song(&song, &chart_id, &chart_title);
        match api::favourites::toggle_favourite(&api::client(), &args).await {
            Ok(outcome) => {
                if outcome.is_added() != desired {
                    tracing::info!(song = %song.name, added = outcome.is_added(), "server disagreed with optimistic toggle");
                }
                self.state.update(|s| s.complete_toggle(&key, outcome.is_added()));
            }
            Err(e) if toggle_may_have_applied(&e) => {
                // The request may have reached the server; ask it what happened
                let client = api::client();
                match api::favourites::check_favourite(&client, &song.name, &song.artist, &chart_id).await {
                    Ok(status) => {
                        tracing::info!(song = %song.name, added = status.is_favourited, "favourite state confirmed after failed toggle");
                        self.state.update(|s| s.complete_toggle(&key, status.is_favourited));
                    }
                    Err(check) => {
                        tracing::warn!(song = %song.name, error = %check, "favourite toggle failed");
                        self.state.update(|s| s.fail_toggle(&key));
                        self.error.set(Some(e));
                    }
                }
            }
            Err(e) => {
                tracing::warn!(song = %song.name, error = %e, "favourite toggle failed");
                self.state.update(|s| s.fail_toggle(&key));
                self.error.set(Some(e));
            }
        }
    }

    pub async fn remove(&self, favourite_id: u32) {
        match api::favourites::remove_favourite(&api::client(), favourite_id).await {
            Ok(()) => {
                self.state.update(|s| {
                    s.remove_by_id(favourite_id);
                });
            }
            Err(e) => {
                tracing::warn!(favourite_id, error = %e, "failed to remove favourite");
                self.error.set(Some(e));
            }
        }
    }

    /// Drop everything (logout)
    pub fn reset(&self) {
        self.state.update(FavouritesState::clear);
        self.error.set(None);
        self.guard.update_value(InitGuard::reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FavouriteChartEntry;

    fn fav(song_id: u32, name: &str, artist: &str, entries: &[(u32, &str)]) -> FavouriteSong {
        FavouriteSong {
            song_id,
            song_name: name.into(),
            artist: artist.into(),
            image_url: None,
            added_at: None,
            charts: entries
                .iter()
                .map(|(id, chart)| FavouriteChartEntry {
                    favourite_id: *id,
                    chart_id: chart.to_string(),
                    chart_title: None,
                    position: Some(1),
                    peak_position: Some(1),
                    weeks_on_chart: Some(3),
                    last_week_position: None,
                    added_at: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_key_is_case_insensitive_per_chart() {
        let mut state = FavouritesState::default();
        state.replace_songs(vec![fav(1, "Espresso", "Sabrina Carpenter", &[(10, "hot-100")])]);
        assert!(state.is_favourited(&FavouriteKey::new("espresso ", "SABRINA CARPENTER", "hot-100")));
        assert!(!state.is_favourited(&FavouriteKey::new("Espresso", "Sabrina Carpenter", "billboard-global-200")));
        assert_eq!(state.favourite_id(&FavouriteKey::new("Espresso", "Sabrina Carpenter", "hot-100")), Some(10));
    }

    #[test]
    fn test_optimistic_then_confirmed() {
        let mut state = FavouritesState::default();
        let key = FavouriteKey::new("Snooze", "SZA", "hot-100");

        assert_eq!(state.begin_toggle(key.clone()), Some(true));
        assert!(state.is_favourited(&key));
        assert!(state.is_pending(&key));
        // no double submit while in flight
        assert_eq!(state.begin_toggle(key.clone()), None);

        state.complete_toggle(&key, true);
        assert!(!state.is_pending(&key));
        assert!(state.is_favourited(&key));
    }

    #[test]
    fn test_server_verdict_overrides_guess() {
        let mut state = FavouritesState::default();
        let key = FavouriteKey::new("Snooze", "SZA", "hot-100");
        assert_eq!(state.begin_toggle(key.clone()), Some(true));
        // another tab already had it favourited, so the server removed it
        state.complete_toggle(&key, false);
        assert!(!state.is_favourited(&key));
    }

    #[test]
    fn test_failed_toggle_rolls_back() {
        let mut state = FavouritesState::default();
        state.replace_songs(vec![fav(1, "Greedy", "Tate McRae", &[(4, "hot-100")])]);
        let key = FavouriteKey::new("Greedy", "Tate McRae", "hot-100");

        assert_eq!(state.begin_toggle(key.clone()), Some(false));
        assert!(!state.is_favourited(&key));
        state.fail_toggle(&key);
        assert!(state.is_favourited(&key));
        assert_eq!(state.count(), 1);
    }

    #[test]
    fn test_removal_drops_entry_and_empty_song() {
        let mut state = FavouritesState::default();
        state.replace_songs(vec![
            fav(1, "Feather", "Sabrina Carpenter", &[(7, "hot-100"), (8, "billboard-global-200")]),
            fav(2, "Fortnight", "Taylor Swift", &[(9, "hot-100")]),
        ]);

        let key = FavouriteKey::new("Feather", "Sabrina Carpenter", "hot-100");
        assert_eq!(state.begin_toggle(key.clone()), Some(false));
        state.complete_toggle(&key, false);
        assert_eq!(state.songs[0].charts.len(), 1);

        assert!(state.remove_by_id(9));
        assert_eq!(state.count(), 1);
        assert!(!state.remove_by_id(999));
    }

    #[test]
    fn test_fresh_list_clears_confirmations() {
        let mut state = FavouritesState::default();
        let key = FavouriteKey::new("Snooze", "SZA", "hot-100");
        state.begin_toggle(key.clone());
        state.complete_toggle(&key, true);
        state.replace_songs(Vec::new());
        assert!(!state.is_favourited(&key));
    }

    #[test]
    fn test_only_lost_responses_are_rechecked() {
        assert!(toggle_may_have_applied(&ApiError::Timeout));
        assert!(toggle_may_have_applied(&ApiError::Network("connection reset".into())));
        assert!(!toggle_may_have_applied(&ApiError::Offline));
        assert!(!toggle_may_have_applied(&ApiError::Unauthorized("Session expired".into())));
        assert!(!toggle_may_have_applied(&ApiError::from_status(500, "")));
    }
}
