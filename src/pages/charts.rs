//! Chart Page
//!
//! `/` and `/charts/:id?week=`; the route decides which chart is shown.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::api::charts::DEFAULT_CHART_ID;
use crate::components::{ChartList, ChartSelector};
use crate::context::use_app;
use crate::store::charts::ChartsStateStoreFields;

#[component]
pub fn ChartPage() -> impl IntoView {
    let ctx = use_app();
    let params = use_params_map();
    let query = use_query_map();

    // Wait until startup has loaded the default chart, then follow the route
    Effect::new(move |_| {
        if !ctx.phase.get().charts_ready() {
            return;
        }
        let chart_id = params
            .with(|p| p.get("id"))
            .unwrap_or_else(|| DEFAULT_CHART_ID.to_string());
        let week = query.with(|q| q.get("week")).filter(|w| !w.is_empty());

        let state = ctx.charts.state;
        let same_chart = state.selected_id().get_untracked() == chart_id;
        let same_week = state.week().get_untracked() == week;
        if same_chart && same_week {
            return;
        }
        tracing::debug!(chart = %chart_id, week = ?week, "route changed chart");
        spawn_local(async move {
            ctx.charts.load_chart(chart_id, week).await;
        });
    });

    view! {
        <div class="chart-page">
            <ChartSelector />
            <ChartList />
        </div>
    }
}
