//! Token Refresh Coordination
//!
//! At most one refresh call is in flight. Requests that hit 401 while it
//! runs await the same shared future and replay once it resolves.

use std::cell::{Cell, RefCell};
use std::future::Future;

use futures_util::future::{LocalBoxFuture, Shared};
use futures_util::FutureExt;

use crate::error::ApiError;

type SharedRefresh = Shared<LocalBoxFuture<'static, Result<String, ApiError>>>;

#[derive(Default)]
pub struct TokenRefresher {
    /// (generation, in-flight refresh)
    slot: RefCell<Option<(u64, SharedRefresh)>>,
    generation: Cell<u64>,
}

impl TokenRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the in-flight refresh, or start one with `start` if none is running.
    /// Resolves to the new access token.
    pub async fn run<F, Fut>(&self, start: F) -> Result<String, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, ApiError>> + 'static,
    {
        let (generation, refresh) = {
            let mut slot = self.slot.borrow_mut();
            match slot.as_ref() {
                Some((generation, refresh)) => {
                    tracing::debug!(generation, "joining in-flight token refresh");
                    (*generation, refresh.clone())
                }
                None => {
                    let generation = self.generation.get() + 1;
                    self.generation.set(generation);
                    tracing::debug!(generation, "starting token refresh");
                    let refresh = start().boxed_local().shared();
                    *slot = Some((generation, refresh.clone()));
                    (generation, refresh)
                }
            }
        };

        let result = refresh.await;

        // Only the batch that owns the slot clears it; a newer refresh may already be running
        let mut slot = self.slot.borrow_mut();
        if matches!(slot.as_ref(), Some((g, _)) if *g == generation) {
            *slot = None;
        }
        result
    }

    /// Number of refreshes started so far
    pub fn started(&self) -> u64 {
        self.generation.get()
    }
}
