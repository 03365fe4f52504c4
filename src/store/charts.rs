//! Charts Store
//!
//! Uses reactive_stores for field-level reactivity over the chart list and
//! the chart being viewed.

use leptos::prelude::*;
use reactive_stores::Store;

use super::{claim, InitGuard};
use crate::api::{self, charts::DEFAULT_CHART_ID};
use crate::error::ApiError;
use crate::format::range_param;
use crate::models::{ChartData, ChartSummary};

/// Songs fetched per page
pub const PAGE_SIZE: u32 = 10;
/// Longest chart the backend serves (Billboard 200)
pub const MAX_RANGE: u32 = 200;

#[derive(Clone, Debug, Default, Store)]
pub struct ChartsState {
    /// Charts offered in the selector
    pub charts: Vec<ChartSummary>,
    /// Chart being shown
    pub current: Option<ChartData>,
    pub selected_id: String,
    /// `YYYY-MM-DD`, None for the latest week
    pub week: Option<String>,
    /// Last position requested
    pub range_end: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<ApiError>,
}

/// Range end for the next page, None once the chart is exhausted
pub fn next_range_end(range_end: u32, has_more: bool) -> Option<u32> {
    let next = (range_end + PAGE_SIZE).min(MAX_RANGE);
    (has_more && next > range_end).then_some(next)
}

/// A full page back means there may be more below
pub fn has_more_songs(returned: usize, requested_end: u32) -> bool {
    requested_end < MAX_RANGE && returned >= requested_end as usize
}

/// Sequence numbers for chart requests; only the latest response may write
#[derive(Debug, Default)]
pub struct ChartRequests {
    latest: u64,
}

impl ChartRequests {
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

/// Drop songs past the requested range, then decide whether another page exists
pub fn accept_page(mut data: ChartData, requested_end: u32) -> (ChartData, bool) {
    data.songs.retain(|s| s.position <= requested_end);
    let more = has_more_songs(data.songs.len(), requested_end);
    (data, more)
}

#[derive(Clone, Copy)]
pub struct ChartsStore {
    pub state: Store<ChartsState>,
    requests: StoredValue<ChartRequests>,
    guard: StoredValue<InitGuard>,
}

impl ChartsStore {
    pub fn new() -> Self {
        Self {
            state: Store::new(ChartsState {
                selected_id: DEFAULT_CHART_ID.to_string(),
                range_end: PAGE_SIZE,
                ..Default::default()
            }),
            requests: StoredValue::new(ChartRequests::default()),
            guard: StoredValue::new(InitGuard::new()),
        }
    }

    /// Load the chart list, then the default chart
    pub async fn init(&self) {
        if !claim(self.guard) {
            return;
        }
        match api::charts::top_charts(&api::client()).await {
            Ok(charts) => {
                tracing::debug!(count = charts.len(), "top charts loaded");
                self.state.charts().set(charts);
            }
            Err(e) => tracing::warn!(error = %e, "failed to load top charts"),
        }
        let ok = self.load_chart(DEFAULT_CHART_ID.to_string(), None).await;
        self.guard.update_value(|g| g.finish(ok));
    }

    /// Switch chart or week; starts again from the first page
    pub async fn load_chart(&self, chart_id: String, week: Option<String>) -> bool {
        self.state.selected_id().set(chart_id);
        self.state.week().set(week.filter(|w| !w.is_empty()));
        self.state.range_end().set(PAGE_SIZE);
        self.state.has_more().set(false);
        self.state.current().set(None);
        self.fetch().await
    }

    pub async fn load_more(&self) -> bool {
        if self.state.loading().get_untracked() {
            return false;
        }
        let end = self.state.range_end().get_untracked();
        let Some(next) = next_range_end(end, self.state.has_more().get_untracked()) else {
            return false;
        };
        self.state.range_end().set(next);
        self.fetch().await
    }

    pub async fn retry(&self) -> bool {
        self.fetch().await
    }

    /// Title of the chart being shown, falling back to the list entry
    pub fn current_title(&self) -> String {
        let id = self.state.selected_id().get();
        if let Some(title) = self.state.current().with(|c| c.as_ref().map(|c| c.title.clone())) {
            if !title.is_empty() {
                return title;
            }
        }
        self.state
            .charts()
            .with(|charts| charts.iter().find(|c| c.id == id).map(|c| c.title.clone()))
            .unwrap_or(id)
    }

    async fn fetch(&self) -> bool {
        let seq = self.requests.try_update_value(ChartRequests::begin).unwrap_or_default();
        let chart_id = self.state.selected_id().get_untracked();
        let week = self.state.week().get_untracked();
        let end = self.state.range_end().get_untracked();

        self.state.loading().set(true);
        self.state.error().set(None);
        tracing::debug!(chart = %chart_id, week = ?week, end, seq, "fetching chart");

        let result = api::charts::fetch_chart(&api::client(), &chart_id, week.as_deref(), &range_param(end)).await;

        if !self.requests.with_value(|r| r.is_current(seq)) {
            tracing::debug!(seq, "dropping stale chart response");
            return false;
        }
        self.state.loading().set(false);
        match result {
            Ok(resp) => {
                let (data, more) = accept_page(resp.data, end);
                self.state.has_more().set(more);
                self.state.current().set(Some(data));
                true
            }
            Err(e) => {
                tracing::warn!(chart = %chart_id, error = %e, "failed to load chart");
                self.state.error().set(Some(e));
                false
            }
        }
    }
}
