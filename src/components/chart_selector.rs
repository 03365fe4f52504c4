//! Chart Selector Component
//!
//! Chart dropdown and week picker. Both navigate; the chart page loads.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::context::use_app;
use crate::models::ChartSummary;
use crate::store::charts::ChartsStateStoreFields;

/// `/charts/{id}` with an optional `?week=`
pub fn chart_path(chart_id: &str, week: Option<&str>) -> String {
    let base = format!("/charts/{}", chart_id);
    match week.filter(|w| !w.is_empty()) {
        Some(week) => format!("{}{}", base, crate::api::query_string(&[("week", Some(week))])),
        None => base,
    }
}

#[component]
pub fn ChartSelector() -> impl IntoView {
    let state = use_app().charts.state;
    let navigate = use_navigate();

    let on_chart = {
        let navigate = navigate.clone();
        move |ev| {
            let id = event_target_value(&ev);
            // a new chart starts at its latest week
            navigate(&chart_path(&id, None), Default::default());
        }
    };
    let on_week = move |ev| {
        let week = event_target_value(&ev);
        let id = state.selected_id().get_untracked();
        navigate(&chart_path(&id, Some(&week)), Default::default());
    };

    view! {
        <div class="chart-selector">
            <select
                class="chart-select"
                prop:value=move || state.selected_id().get()
                on:change=on_chart
            >
                <For
                    each=move || state.charts().get()
                    key=|chart: &ChartSummary| chart.id.clone()
                    children=move |chart: ChartSummary| {
                        let id = chart.id.clone();
                        view! {
                            <option value=id.clone() selected=move || state.selected_id().get() == id>
                                {chart.title}
                            </option>
                        }
                    }
                />
            </select>
            <label class="week-picker">
                "Week "
                <input
                    type="date"
                    prop:value=move || state.week().get().unwrap_or_default()
                    on:change=on_week
                />
            </label>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_path() {
        assert_eq!(chart_path("hot-100", None), "/charts/hot-100");
        assert_eq!(chart_path("hot-100", Some("")), "/charts/hot-100");
        assert_eq!(chart_path("billboard-200", Some("2025-03-08")), "/charts/billboard-200?week=2025-03-08");
    }
}
