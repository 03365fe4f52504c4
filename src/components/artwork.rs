//! Artwork Components
//!
//! Cover art and 30-second previews from Apple Music, falling back to the
//! chart's own image.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::apple_music::artwork_url;
use crate::context::use_app;

#[component]
pub fn Artwork(
    #[prop(into)] name: String,
    #[prop(into)] artist: String,
    #[prop(default = None)] fallback: Option<String>,
    #[prop(default = 120)] size: u32,
) -> impl IntoView {
    let music = use_app().music;

    // Runs again once the token arrives
    {
        let (name, artist) = (name.clone(), artist.clone());
        Effect::new(move |_| {
            if music.token.with(Option::is_some) {
                let (name, artist) = (name.clone(), artist.clone());
                spawn_local(async move { music.lookup(name, artist).await });
            }
        });
    }

    let alt = format!("{} by {}", name, artist);
    let src = move || {
        music
            .track(&name, &artist)
            .and_then(|t| t.artwork_url)
            .map(|template| artwork_url(&template, size))
            .or_else(|| fallback.clone())
    };

    view! {
        {move || match src() {
            Some(url) => view! { <img class="artwork" src=url alt=alt.clone() width=size height=size loading="lazy" /> }.into_any(),
            None => view! { <div class="artwork placeholder">"♪"</div> }.into_any(),
        }}
    }
}

/// Play/pause the Apple Music preview, when there is one
#[component]
pub fn PreviewButton(#[prop(into)] name: String, #[prop(into)] artist: String) -> impl IntoView {
    let music = use_app().music;
    let audio_ref = NodeRef::<leptos::html::Audio>::new();
    let (playing, set_playing) = signal(false);

    let preview = move || music.track(&name, &artist).and_then(|t| t.preview_url);

    let toggle = move |_| {
        let Some(audio) = audio_ref.get() else { return };
        if playing.get_untracked() {
            let _ = audio.pause();
            set_playing.set(false);
        } else {
            match audio.play() {
                Ok(_) => set_playing.set(true),
                Err(e) => tracing::debug!(error = ?e, "preview playback refused"),
            }
        }
    };

    view! {
        {move || preview().map(|url| view! {
            <span class="preview">
                <audio node_ref=audio_ref src=url preload="none" on:ended=move |_| set_playing.set(false) />
                <button class="preview-btn" title="Preview" on:click=toggle>
                    {move || if playing.get() { "❚❚" } else { "▶" }}
                </button>
            </span>
        })}
    }
}
