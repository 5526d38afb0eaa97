//! Client-side player store: state, transitions and selectors, plus the Dioxus
//! glue that shares them through context.

mod selectors;
mod state;

pub use selectors::*;
pub use state::*;

use crate::api::Song;
use dioxus::prelude::*;
use tracing::debug;

const LOG_TARGET: &str = "wymusic::store";

/// Context handle to the shared [`PlayerState`].
#[derive(Clone, Copy, PartialEq)]
pub struct PlayerStore(pub Signal<PlayerState>);

impl PlayerStore {
    pub fn dispatch(mut self, action: PlayerAction) {
        debug!(target: LOG_TARGET, "dispatch {action:?}");
        self.0.write().reduce(action);
    }

    /// Run a batch update against the state in one write.
    pub fn update(mut self, label: &str, f: impl FnOnce(&mut PlayerState)) {
        debug!(target: LOG_TARGET, "batch {label}");
        f(&mut self.0.write());
    }

    /// Replace the playlist. `autoplay` starts playback right away.
    pub fn play_songs(self, songs: Vec<Song>, index: usize, autoplay: bool) {
        self.update("play_songs", |state| {
            state.play_songs(songs, index, &mut rand::thread_rng());
            if autoplay {
                state.playing = true;
            }
        });
    }

    /// Append songs, jumping to the first one when `play` is set.
    pub fn insert_songs(self, songs: Vec<Song>, play: bool) {
        self.update("insert_songs", |state| {
            for (position, song) in songs.into_iter().enumerate() {
                state.insert_song(song, play && position == 0);
            }
            if play {
                state.playing = true;
            }
        });
    }

    pub fn play_index(self, index: usize) {
        self.update("play_index", |state| {
            if index < state.play_list.len() {
                state.current_index = Some(index);
                state.playing = true;
                state.current_action = CurrentAction::Play;
            }
        });
    }

    pub fn next(self) {
        self.update("next", |state| {
            if let Some(index) = state.next_index() {
                state.current_index = Some(index);
            }
        });
    }

    pub fn prev(self) {
        self.update("prev", |state| {
            if let Some(index) = state.prev_index() {
                state.current_index = Some(index);
            }
        });
    }

    pub fn delete_song(self, song_id: u64) {
        self.update("delete_song", |state| state.delete_song(song_id));
    }

    pub fn clear(self) {
        self.update("clear", PlayerState::clear);
    }

    pub fn change_play_mode(self, mode: PlayMode) {
        self.update("change_play_mode", |state| {
            state.change_play_mode(mode, &mut rand::thread_rng())
        });
    }
}

pub fn use_player_store() -> PlayerStore {
    use_context::<PlayerStore>()
}

/// Memoized current song; only re-renders readers when the song changes.
pub fn use_current_song() -> Memo<Option<Song>> {
    let store = use_player_store();
    use_memo(move || get_current_song(&store.0.read()).cloned())
}

pub fn use_play_mode() -> Memo<PlayMode> {
    let store = use_player_store();
    use_memo(move || get_play_mode(&store.0.read()))
}

pub fn use_play_list() -> Memo<Vec<Song>> {
    let store = use_player_store();
    use_memo(move || get_play_list(&store.0.read()).to_vec())
}

pub fn use_current_index() -> Memo<Option<usize>> {
    let store = use_player_store();
    use_memo(move || get_current_index(&store.0.read()))
}

pub fn use_song_list() -> Memo<Vec<Song>> {
    let store = use_player_store();
    use_memo(move || get_song_list(&store.0.read()).to_vec())
}

pub fn use_current_action() -> Memo<CurrentAction> {
    let store = use_player_store();
    use_memo(move || get_current_action(&store.0.read()))
}
