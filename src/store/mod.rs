//! Application Stores
//!
//! Reactive state containers, one per backend area. Each store is `Copy`
//! (signal handles only) and is provided to components through `AppContext`.

pub mod auth;
pub mod charts;
pub mod favourites;
pub mod guard;
pub mod init;
pub mod music;
pub mod predictions;
pub mod timezone;

use leptos::prelude::*;

pub use auth::AuthStore;
pub use charts::ChartsStore;
pub use favourites::{FavouriteKey, FavouritesStore};
pub use guard::{InitGuard, InitState};
pub use init::InitPhase;
pub use music::MusicStore;
pub use predictions::PredictionsStore;
pub use timezone::TimezoneStore;

/// Request status shown by forms and pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Claim a store's initial load through its guard
pub(crate) fn claim(guard: StoredValue<InitGuard>) -> bool {
    guard.try_update_value(|g| g.try_begin()).unwrap_or(false)
}
