//! Application Context
//!
//! Shared stores provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::store::{
    AuthStore, ChartsStore, FavouritesStore, InitGuard, InitPhase, MusicStore, PredictionsStore, TimezoneStore,
};

/// Every store the pages use, provided once by `App`
#[derive(Clone, Copy)]
pub struct AppContext {
    pub auth: AuthStore,
    pub charts: ChartsStore,
    pub favourites: FavouritesStore,
    pub predictions: PredictionsStore,
    pub timezone: TimezoneStore,
    pub music: MusicStore,
    /// Startup progress for the splash screen
    pub phase: RwSignal<InitPhase>,
    pub(crate) init_guard: StoredValue<InitGuard>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            auth: AuthStore::new(),
            charts: ChartsStore::new(),
            favourites: FavouritesStore::new(),
            predictions: PredictionsStore::new(),
            timezone: TimezoneStore::new(),
            music: MusicStore::new(),
            phase: RwSignal::new(InitPhase::Starting),
            init_guard: StoredValue::new(InitGuard::new()),
        }
    }

    /// Load user-scoped data for a freshly signed-in user
    pub fn after_login(&self) {
        let ctx = *self;
        ctx.favourites.reset();
        ctx.predictions.reset_user_data();
        spawn_local(async move {
            futures_util::future::join(ctx.favourites.init(true), ctx.predictions.init(true)).await;
        });
    }

    pub fn logout(&self) {
        self.auth.logout();
        self.clear_user_data();
    }

    /// The refresh token was rejected; drop everything tied to the user
    pub fn session_expired(&self) {
        tracing::info!("session expired");
        self.auth.session_expired();
        self.clear_user_data();
    }

    fn clear_user_data(&self) {
        self.favourites.reset();
        self.predictions.reset_user_data();
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}
