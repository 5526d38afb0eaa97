use crate::components::audio::{self, AudioSnapshot};
use crate::components::{
    AudioClock, Icon, IconKind, LyricView, SongList, VolumeSignal, WySlider,
};
use crate::store::{use_current_song, use_play_mode, use_player_store, PlayMode, PlayerAction};
use crate::utils::format_duration;
use dioxus::prelude::*;

fn play_mode_icon(mode: PlayMode) -> IconKind {
    match mode {
        PlayMode::Loop => IconKind::Loop,
        PlayMode::Random => IconKind::Shuffle,
        PlayMode::SingleLoop => IconKind::SingleLoop,
    }
}

/// Duration to show and seek against: the element's once known, otherwise the
/// catalog's.
fn effective_duration(snapshot: &AudioSnapshot, fallback: f64) -> f64 {
    if snapshot.duration.is_finite() && snapshot.duration > 0.0 {
        snapshot.duration
    } else {
        fallback
    }
}

/// Fixed bottom bar: track info, transport controls, progress and volume.
#[component]
pub fn Player() -> Element {
    let store = use_player_store();
    let current_song = use_current_song();
    let play_mode = use_play_mode();
    let mut volume = use_context::<VolumeSignal>().0;
    let mut clock = use_context::<AudioClock>().0;

    // Set while the progress handle is held, so playback reports don't fight
    // the drag.
    let mut seeking = use_signal(|| false);
    let mut seek_preview = use_signal(|| 0.0f64);
    let mut panel_open = use_signal(|| false);
    let mut volume_open = use_signal(|| false);

    let song = current_song();
    let has_song = song.is_some();
    let playing = store.0.read().playing;
    let snapshot = clock();
    let duration = effective_duration(
        &snapshot,
        song.as_ref().map(|s| s.duration_seconds()).unwrap_or(0.0),
    );
    let progress = AudioSnapshot {
        duration,
        ..snapshot
    }
    .progress_percent();
    let shown_time = if seeking() {
        seek_preview() / 100.0 * duration
    } else {
        snapshot.current_time
    };
    let mode = play_mode();

    let on_seek_change = move |percent: f64| {
        seeking.set(true);
        seek_preview.set(percent);
    };

    let on_seek_commit = move |percent: f64| {
        seeking.set(false);
        if duration > 0.0 {
            let target = percent / 100.0 * duration;
            clock.write().current_time = target;
            audio::seek(target);
        }
    };

    let on_volume_change = move |percent: f64| {
        volume.set((percent / 100.0).clamp(0.0, 1.0));
    };

    rsx! {
        div { class: "player-bar",
            div { class: "player-track-info",
                match song.as_ref() {
                    Some(song) => rsx! {
                        if let Some(pic) = song.al.pic_url.clone() {
                            img { class: "player-cover", src: "{pic}?param=68y68", alt: "{song.al.name}" }
                        } else {
                            div { class: "player-cover player-cover-empty" }
                        }
                        div { class: "player-track-text",
                            p { class: "player-track-name", "{song.name}" }
                            p { class: "player-track-artist", "{song.artist_names()}" }
                        }
                    },
                    None => rsx! {
                        div { class: "player-cover player-cover-empty" }
                        div { class: "player-track-text",
                            p { class: "player-track-name", "No track playing" }
                        }
                    },
                }
            }

            div { class: "player-controls",
                div { class: "player-buttons",
                    button {
                        class: "player-button",
                        aria_label: "Previous",
                        disabled: !has_song,
                        onclick: move |_| store.prev(),
                        Icon { kind: IconKind::Prev }
                    }
                    button {
                        class: "player-button player-button-main",
                        aria_label: if playing { "Pause" } else { "Play" },
                        disabled: !has_song,
                        onclick: move |_| store.dispatch(PlayerAction::SetPlaying(!playing)),
                        if playing {
                            Icon { kind: IconKind::Pause }
                        } else {
                            Icon { kind: IconKind::Play }
                        }
                    }
                    button {
                        class: "player-button",
                        aria_label: "Next",
                        disabled: !has_song,
                        onclick: move |_| store.next(),
                        Icon { kind: IconKind::Next }
                    }
                }
                div { class: "player-progress",
                    span { class: "player-time", "{format_duration(shown_time)}" }
                    WySlider {
                        class: "player-progress-slider",
                        value: if seeking() { None } else { Some(progress) },
                        buffer_percent: snapshot.buffered_percent(),
                        disabled: !has_song,
                        on_change: on_seek_change,
                        on_after_change: on_seek_commit,
                    }
                    span { class: "player-time", "{format_duration(duration)}" }
                }
            }

            div { class: "player-extras",
                div { class: "player-volume",
                    button {
                        class: "player-button",
                        aria_label: "Volume",
                        onclick: move |_| volume_open.set(!volume_open()),
                        Icon { kind: IconKind::Volume }
                    }
                    if volume_open() {
                        div { class: "player-volume-popover",
                            WySlider {
                                vertical: true,
                                value: Some(volume() * 100.0),
                                on_change: on_volume_change,
                            }
                        }
                    }
                }
                button {
                    class: "player-button",
                    aria_label: "{mode.label()}",
                    title: "{mode.label()}",
                    onclick: move |_| store.change_play_mode(mode.next()),
                    Icon { kind: play_mode_icon(mode) }
                }
                button {
                    class: if panel_open() { "player-button player-button-active" } else { "player-button" },
                    aria_label: "Playlist",
                    onclick: move |_| panel_open.set(!panel_open()),
                    Icon { kind: IconKind::Queue }
                    span { class: "player-count", "{store.0.read().song_list.len()}" }
                }
            }

            if panel_open() {
                PlayerPanel { on_close: move |_| panel_open.set(false) }
            }
        }
    }
}

/// Playlist and lyrics side by side above the bar.
#[component]
fn PlayerPanel(on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "player-panel",
            SongList {}
            LyricView {}
            button {
                class: "player-panel-close",
                aria_label: "Close",
                onclick: move |_| on_close.call(()),
                Icon { kind: IconKind::Close }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_prefers_element_value() {
        let known = AudioSnapshot {
            duration: 200.0,
            ..AudioSnapshot::default()
        };
        assert_eq!(effective_duration(&known, 180.0), 200.0);

        let unknown = AudioSnapshot {
            duration: f64::NAN,
            ..AudioSnapshot::default()
        };
        assert_eq!(effective_duration(&unknown, 180.0), 180.0);
    }

    #[test]
    fn each_mode_has_its_own_icon() {
        assert_eq!(play_mode_icon(PlayMode::Loop), IconKind::Loop);
        assert_eq!(play_mode_icon(PlayMode::Random), IconKind::Shuffle);
        assert_eq!(play_mode_icon(PlayMode::SingleLoop), IconKind::SingleLoop);
    }
}
