//! Chart List Component
//!
//! Song cards for the chart being viewed, paged with "Load more".

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{ErrorBanner, Loading, SongCard};
use crate::context::use_app;
use crate::format::{parse_date, week_label};
use crate::models::Song;
use crate::store::charts::ChartsStateStoreFields;

#[component]
pub fn ChartList() -> impl IntoView {
    let charts = use_app().charts;
    let state = charts.state;

    let songs = move || state.current().with(|c| c.as_ref().map(|c| c.songs.clone()).unwrap_or_default());
    let chart_id = move || state.selected_id().get();
    let chart_title = move || charts.current_title();

    let heading = move || {
        state.current().with(|c| {
            c.as_ref().map(|data| {
                let week = parse_date(&data.week).map(week_label).unwrap_or_else(|| data.week.clone());
                (data.title.clone(), week, data.info.clone())
            })
        })
    };

    let load_more = move |_| {
        spawn_local(async move {
            charts.load_more().await;
        });
    };
    let retry = Callback::new(move |_| {
        spawn_local(async move {
            charts.retry().await;
        });
    });

    view! {
        <section class="chart-list">
            {move || heading().map(|(title, week, info)| view! {
                <header class="chart-header">
                    <h1>{title}</h1>
                    <p class="chart-week">{week}</p>
                    <p class="chart-info">{info}</p>
                </header>
            })}

            <ErrorBanner error=Signal::derive(move || state.error().get()) on_retry=retry />

            <ol class="songs">
                <For
                    each=songs
                    key=|song: &Song| (song.position, song.name.clone())
                    children=move |song: Song| {
                        view! { <SongCard song=song chart_id=chart_id() chart_title=chart_title() /> }
                    }
                />
            </ol>

            <Show when=move || state.loading().get()>
                <Loading label="Loading chart…" />
            </Show>

            <Show when=move || state.has_more().get() && !state.loading().get()>
                <button class="load-more-btn" on:click=load_more>"Load more"</button>
            </Show>
        </section>
    }
}
