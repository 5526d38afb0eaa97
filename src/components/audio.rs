//! Bridge to the page's `<audio>` element.
//!
//! The browser build talks to the element through `web-sys`; webview builds
//! go through `document::eval`.

use crate::components::{AudioClock, VolumeSignal};
use crate::store::{use_current_song, use_player_store, PlayerAction};
use dioxus::prelude::*;
use tracing::warn;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

pub const AUDIO_ELEMENT_ID: &str = "wy-audio";

const LOG_TARGET: &str = "wymusic::audio";

/// Playback position as reported by the element, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioSnapshot {
    pub current_time: f64,
    pub duration: f64,
    /// End of the furthest buffered range, in seconds.
    pub buffered: f64,
}

impl AudioSnapshot {
    pub fn progress_percent(&self) -> f64 {
        percent_of(self.current_time, self.duration)
    }

    pub fn buffered_percent(&self) -> f64 {
        percent_of(self.buffered, self.duration)
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole.is_finite() && whole > 0.0 && part.is_finite() {
        (part / whole * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(target_arch = "wasm32")]
fn audio_element() -> Option<HtmlAudioElement> {
    window()?
        .document()?
        .get_element_by_id(AUDIO_ELEMENT_ID)?
        .dyn_into::<HtmlAudioElement>()
        .ok()
}

#[cfg(target_arch = "wasm32")]
pub fn play() {
    let Some(audio) = audio_element() else {
        return;
    };
    if let Ok(promise) = audio.play() {
        spawn(async move {
            // Autoplay may be refused until the user interacts with the page.
            let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
        });
    }
}

#[cfg(target_arch = "wasm32")]
pub fn pause() {
    if let Some(audio) = audio_element() {
        let _ = audio.pause();
    }
}

#[cfg(target_arch = "wasm32")]
pub fn seek(seconds: f64) {
    if let Some(audio) = audio_element() {
        audio.set_current_time(seconds.max(0.0));
    }
}

#[cfg(target_arch = "wasm32")]
pub fn set_volume(volume: f64) {
    if let Some(audio) = audio_element() {
        audio.set_volume(volume.clamp(0.0, 1.0));
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn snapshot() -> Option<AudioSnapshot> {
    let audio = audio_element()?;
    let buffered = audio.buffered();
    let buffered_end = match buffered.length() {
        0 => 0.0,
        len => buffered.end(len - 1).unwrap_or(0.0),
    };
    Some(AudioSnapshot {
        current_time: audio.current_time(),
        duration: audio.duration(),
        buffered: buffered_end,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn run_on_audio(statement: &str) {
    let script = format!(
        "const audio = document.getElementById('{AUDIO_ELEMENT_ID}'); if (audio) {{ {statement} }}"
    );
    let _ = document::eval(&script);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn play() {
    run_on_audio("audio.play().catch(() => {});");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn pause() {
    run_on_audio("audio.pause();");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn seek(seconds: f64) {
    run_on_audio(&format!("audio.currentTime = {};", seconds.max(0.0)));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_volume(volume: f64) {
    run_on_audio(&format!("audio.volume = {};", volume.clamp(0.0, 1.0)));
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn snapshot() -> Option<AudioSnapshot> {
    let script = format!(
        "const audio = document.getElementById('{AUDIO_ELEMENT_ID}');
         if (!audio) return null;
         const b = audio.buffered;
         return [audio.currentTime, isFinite(audio.duration) ? audio.duration : 0,
                 b.length ? b.end(b.length - 1) : 0];"
    );
    let values = document::eval(&script)
        .join::<Option<[f64; 3]>>()
        .await
        .ok()
        .flatten()?;
    Some(AudioSnapshot {
        current_time: values[0],
        duration: values[1],
        buffered: values[2],
    })
}

/// The hidden `<audio>` element plus the effects that keep it in step with the
/// store.
#[component]
pub fn AudioElement() -> Element {
    let store = use_player_store();
    let song = use_current_song();
    let volume = use_context::<VolumeSignal>().0;
    let mut clock = use_context::<AudioClock>().0;

    use_effect(move || {
        let playing = store.0.read().playing;
        // Re-run on track change so the new source starts playing.
        let _ = song();
        if playing {
            play();
        } else {
            pause();
        }
    });

    use_effect(move || set_volume(volume()));

    let src = song().and_then(|song| song.url).unwrap_or_default();

    let refresh_clock = move || {
        spawn(async move {
            if let Some(report) = snapshot().await {
                clock.set(report);
            }
        });
    };

    let set_playing = move |playing: bool| {
        if store.0.peek().playing != playing {
            store.dispatch(PlayerAction::SetPlaying(playing));
        }
    };

    rsx! {
        audio {
            id: AUDIO_ELEMENT_ID,
            src: "{src}",
            preload: "auto",
            ontimeupdate: move |_| refresh_clock(),
            onloadedmetadata: move |_| {
                set_volume(*volume.peek());
                refresh_clock();
            },
            onplay: move |_| set_playing(true),
            onpause: move |_| set_playing(false),
            onended: move |_| {
                let current = store.0.peek().current_index;
                let next = store.0.peek().next_index();
                if next.is_some() && next == current {
                    seek(0.0);
                    play();
                } else {
                    store.next();
                }
            },
            onerror: move |_| {
                warn!(target: LOG_TARGET, "audio element failed to load {}", AUDIO_ELEMENT_ID);
                set_playing(false);
            },
        }
    }
}
