//! Startup Coordinator
//!
//! Brings the stores up in dependency order: the session first, then the
//! timezone and charts, then everything user-scoped in parallel.

use futures_util::future::join3;
use leptos::prelude::*;

use super::{claim, InitGuard};
use crate::context::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitPhase {
    #[default]
    Starting,
    Auth,
    Timezone,
    Charts,
    UserData,
    Ready,
}

impl InitPhase {
    pub fn label(&self) -> &'static str {
        match self {
            InitPhase::Starting => "Starting",
            InitPhase::Auth => "Checking your session",
            InitPhase::Timezone => "Setting up",
            InitPhase::Charts => "Loading charts",
            InitPhase::UserData => "Loading your data",
            InitPhase::Ready => "Ready",
        }
    }

    /// Charts are usable from here on
    pub fn charts_ready(&self) -> bool {
        matches!(self, InitPhase::UserData | InitPhase::Ready)
    }
}

pub async fn initialize(ctx: AppContext) {
    if !claim(ctx.init_guard) {
        tracing::debug!("initialization already running");
        return;
    }
    tracing::info!("initializing stores");

    ctx.phase.set(InitPhase::Auth);
    ctx.auth.init().await;

    ctx.phase.set(InitPhase::Timezone);
    ctx.timezone.init();

    ctx.phase.set(InitPhase::Charts);
    ctx.charts.init().await;

    ctx.phase.set(InitPhase::UserData);
    let authenticated = ctx.auth.is_authenticated_untracked();
    join3(
        ctx.favourites.init(authenticated),
        ctx.predictions.init(authenticated),
        ctx.music.init(),
    )
    .await;

    ctx.phase.set(InitPhase::Ready);
    ctx.init_guard.update_value(|g: &mut InitGuard| g.finish(true));
    tracing::info!(authenticated, "stores ready");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order_and_labels() {
        assert_eq!(InitPhase::default(), InitPhase::Starting);
        assert!(!InitPhase::Charts.charts_ready());
        assert!(InitPhase::UserData.charts_ready());
        assert_eq!(InitPhase::Charts.label(), "Loading charts");
    }
}
