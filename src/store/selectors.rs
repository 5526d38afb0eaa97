//! Read-only projections over [`PlayerState`].

use crate::api::Song;
use crate::store::{CurrentAction, PlayMode, PlayerState};

pub fn get_play_list(state: &PlayerState) -> &[Song] {
    &state.play_list
}

pub fn get_song_list(state: &PlayerState) -> &[Song] {
    &state.song_list
}

pub fn get_play_mode(state: &PlayerState) -> PlayMode {
    state.play_mode
}

pub fn get_current_index(state: &PlayerState) -> Option<usize> {
    state.current_index
}

pub fn get_current_action(state: &PlayerState) -> CurrentAction {
    state.current_action
}

/// `play_list[current_index]`, or `None` when no index is set or it is out of
/// range.
pub fn get_current_song(state: &PlayerState) -> Option<&Song> {
    state
        .current_index
        .and_then(|index| state.play_list.get(index))
}
