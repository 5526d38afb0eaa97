use crate::api::SongService;
use crate::components::audio::AudioSnapshot;
use crate::components::{AudioElement, Player};
use crate::config::{parse_id_list, AppConfig};
use crate::storage::{load_settings, normalize_volume, save_settings, PlayerSettings, DEFAULT_VOLUME};
use crate::store::{
    use_current_action, use_current_song, use_play_mode, use_player_store, PlayerState, PlayerStore,
};
use dioxus::prelude::*;
use tracing::{info, warn};

const LOG_TARGET: &str = "wymusic::app";

/// Output volume in `[0, 1]`.
#[derive(Clone, Copy, PartialEq)]
pub struct VolumeSignal(pub Signal<f64>);

/// Latest position report from the audio element.
#[derive(Clone, Copy, PartialEq)]
pub struct AudioClock(pub Signal<AudioSnapshot>);

#[component]
pub fn AppShell() -> Element {
    let config = use_context_provider(AppConfig::from_env);
    let player_state = use_signal(PlayerState::default);
    let mut volume = use_signal(|| DEFAULT_VOLUME);
    let clock = use_signal(AudioSnapshot::default);
    let mut settings_loaded = use_signal(|| false);
    let mut load_error = use_signal(|| None::<String>);

    let store = use_context_provider(|| PlayerStore(player_state));
    use_context_provider(|| VolumeSignal(volume));
    use_context_provider(|| AudioClock(clock));

    use_future(move || async move {
        match load_settings().await {
            Ok(settings) => {
                volume.set(settings.volume);
                store.change_play_mode(settings.play_mode);
            }
            Err(err) => warn!(target: LOG_TARGET, "failed to load settings: {err}"),
        }
        settings_loaded.set(true);
    });

    {
        let config = config.clone();
        use_future(move || {
            let config = config.clone();
            async move {
                if config.startup_song_ids.is_empty() {
                    return;
                }
                let service = SongService::new(config.clone());
                let result = match service.get_song_detail(&config.startup_song_ids).await {
                    Ok(details) => service.get_song_list(details).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(songs) => {
                        info!(target: LOG_TARGET, "loaded {} startup songs", songs.len());
                        store.play_songs(songs, 0, false);
                    }
                    Err(err) => {
                        warn!(target: LOG_TARGET, "failed to load startup songs: {err}");
                        load_error.set(Some(err.to_string()));
                    }
                }
            }
        });
    }

    let play_mode = use_play_mode();

    // Persist preferences once the stored ones have been applied
    use_effect(move || {
        let settings = PlayerSettings {
            volume: normalize_volume(volume()),
            play_mode: play_mode(),
        };
        if settings_loaded() {
            spawn(async move {
                if let Err(err) = save_settings(settings).await {
                    warn!(target: LOG_TARGET, "failed to save settings: {err}");
                }
            });
        }
    });

    let current_song = use_current_song();
    let current_action = use_current_action();

    rsx! {
        div { class: "app-container",
            header { class: "app-header",
                span { class: "app-title", "WY Music" }
            }

            main { class: "app-main",
                if let Some(err) = load_error() {
                    div { class: "app-error", "Could not load songs: {err}" }
                }
                if let Some(notice) = current_action().notice() {
                    div { class: "app-notice", "{notice}" }
                }
                match current_song() {
                    Some(song) => rsx! {
                        div { class: "now-playing",
                            if let Some(pic) = song.al.pic_url.clone() {
                                img { class: "now-playing-cover", src: "{pic}", alt: "{song.al.name}" }
                            } else {
                                div { class: "now-playing-cover now-playing-cover-empty" }
                            }
                            h1 { class: "now-playing-title", "{song.name}" }
                            p { class: "now-playing-artist", "{song.artist_names()}" }
                        }
                    },
                    None => rsx! {
                        div { class: "now-playing now-playing-idle",
                            p { "Nothing queued yet" }
                        }
                    },
                }
                AddSongsForm {}
            }

            Player {}
        }

        AudioElement {}
    }
}

/// Look songs up by id and queue them.
#[component]
fn AddSongsForm() -> Element {
    let config = use_context::<AppConfig>();
    let store = use_player_store();
    let mut input = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let submit = move |play: bool| {
        let ids = parse_id_list(&input());
        if ids.is_empty() {
            error.set(Some("Enter one or more numeric song ids".to_string()));
            return;
        }
        let service = SongService::new(config.clone());
        busy.set(true);
        error.set(None);
        spawn(async move {
            let result = match service.get_song_detail(&ids).await {
                Ok(details) => service.get_song_list(details).await,
                Err(err) => Err(err),
            };
            match result {
                Ok(songs) if songs.is_empty() => {
                    error.set(Some("None of those songs are playable".to_string()));
                }
                Ok(songs) => {
                    info!(target: LOG_TARGET, "queued {} songs", songs.len());
                    store.insert_songs(songs, play);
                    input.set(String::new());
                }
                Err(err) => {
                    warn!(target: LOG_TARGET, "failed to add songs: {err}");
                    error.set(Some(err.to_string()));
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        form {
            class: "add-songs",
            onsubmit: {
                let mut submit = submit.clone();
                move |evt: FormEvent| {
                    evt.prevent_default();
                    submit(false);
                }
            },
            input {
                class: "add-songs-input",
                r#type: "text",
                placeholder: "Song ids, comma separated",
                value: "{input}",
                oninput: move |evt: FormEvent| input.set(evt.value()),
            }
            button {
                class: "add-songs-button",
                r#type: "button",
                disabled: busy(),
                onclick: {
                    let mut submit = submit.clone();
                    move |_| submit(true)
                },
                "Play now"
            }
            button {
                class: "add-songs-button",
                r#type: "submit",
                disabled: busy(),
                "Add to playlist"
            }
            if let Some(err) = error() {
                p { class: "add-songs-error", "{err}" }
            }
        }
    }
}
