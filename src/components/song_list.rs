use crate::api::Song;
use crate::components::{Icon, IconKind};
use crate::store::{use_current_index, use_play_list, use_player_store, use_song_list};
use crate::utils::format_duration;
use dioxus::prelude::*;

/// Position of `song_id` in the play order, which differs from the listed
/// order while shuffling.
fn play_list_position(play_list: &[Song], song_id: u64) -> Option<usize> {
    play_list.iter().position(|song| song.id == song_id)
}

/// One row per listed song, paired with its slot in the play order.
fn queue_rows(songs: &[Song], play_list: &[Song]) -> Vec<(Song, Option<usize>)> {
    songs
        .iter()
        .map(|song| (song.clone(), play_list_position(play_list, song.id)))
        .collect()
}

/// Queue in insertion order. Clicking a row plays it, the trash button drops it.
#[component]
pub fn SongList() -> Element {
    let store = use_player_store();
    let songs = use_song_list();
    let play_list = use_play_list();
    let current_index = use_current_index();

    let current = current_index();
    let rows = queue_rows(&songs.read(), &play_list.read());

    rsx! {
        section { class: "song-list",
            div { class: "song-list-header",
                h3 { "Playlist ({rows.len()})" }
                button {
                    class: "song-list-clear",
                    disabled: rows.is_empty(),
                    onclick: move |_| store.clear(),
                    Icon { kind: IconKind::Trash }
                    span { "Clear" }
                }
            }
            if rows.is_empty() {
                p { class: "song-list-empty", "The playlist is empty" }
            } else {
                ul { class: "song-list-items",
                    for (song, play_index) in rows.iter().cloned() {
                        SongRow {
                            key: "{song.id}",
                            active: play_index.is_some() && play_index == current,
                            play_index,
                            song,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SongRow(song: Song, play_index: Option<usize>, active: bool) -> Element {
    let store = use_player_store();
    let song_id = song.id;

    let on_play = move |_: MouseEvent| {
        if let Some(index) = play_index {
            store.play_index(index);
        }
    };

    rsx! {
        li {
            class: if active { "song-row song-row-active" } else { "song-row" },
            onclick: on_play,
            span { class: "song-row-name", "{song.name}" }
            span { class: "song-row-artist", "{song.artist_names()}" }
            span { class: "song-row-duration", "{format_duration(song.duration_seconds())}" }
            button {
                class: "song-row-delete",
                aria_label: "Remove",
                onclick: move |evt| {
                    evt.stop_propagation();
                    store.delete_song(song_id);
                },
                Icon { kind: IconKind::Close }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{PlayMode, PlayerState};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn shuffled_state() -> PlayerState {
        let mut state = PlayerState::default();
        let songs: Vec<Song> = (1..=5).map(Song::with_id).collect();
        state.play_songs(songs, 0, &mut StdRng::seed_from_u64(9));
        state.change_play_mode(PlayMode::Random, &mut StdRng::seed_from_u64(3));
        state
    }

    #[test]
    fn position_follows_shuffled_order() {
        let state = shuffled_state();

        for id in 1..=5 {
            let index = play_list_position(&state.play_list, id).unwrap();
            assert_eq!(state.play_list[index].id, id);
        }
        assert_eq!(play_list_position(&state.play_list, 42), None);
    }

    #[test]
    fn rows_keep_listed_order_and_point_into_play_order() {
        let state = shuffled_state();
        let rows = queue_rows(&state.song_list, &state.play_list);

        let ids: Vec<u64> = rows.iter().map(|(song, _)| song.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        for (song, play_index) in &rows {
            let index = play_index.unwrap();
            assert_eq!(state.play_list[index].id, song.id);
        }
        // Building rows leaves the source list usable.
        assert_eq!(rows.len(), state.song_list.len());
    }

    #[test]
    fn rows_for_empty_queue() {
        assert!(queue_rows(&[], &[]).is_empty());
    }
}
