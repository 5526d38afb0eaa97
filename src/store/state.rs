use crate::api::Song;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlayMode {
    #[default]
    Loop,
    Random,
    SingleLoop,
}

impl PlayMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Loop => "Loop",
            Self::Random => "Shuffle",
            Self::SingleLoop => "Repeat one",
        }
    }

    /// Mode selected by the next press of the play-mode button.
    pub fn next(self) -> Self {
        match self {
            Self::Loop => Self::Random,
            Self::Random => Self::SingleLoop,
            Self::SingleLoop => Self::Loop,
        }
    }
}

/// The last kind of change made to the playlist, used for toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrentAction {
    Add,
    Play,
    Delete,
    Clear,
    #[default]
    Other,
}

impl CurrentAction {
    /// Short notice shown after a playlist change, if the change warrants one.
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("Added to playlist"),
            Self::Delete => Some("Removed from playlist"),
            Self::Clear => Some("Playlist cleared"),
            Self::Play | Self::Other => None,
        }
    }
}

/// Player state shared through the store.
///
/// `song_list` keeps the order songs were added in; `play_list` is the order
/// they are played in, which differs only in shuffle mode. `current_index`
/// points into `play_list`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerState {
    pub playing: bool,
    pub play_mode: PlayMode,
    pub song_list: Vec<Song>,
    pub play_list: Vec<Song>,
    pub current_index: Option<usize>,
    pub current_action: CurrentAction,
}

/// Primitive state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerAction {
    SetPlaying(bool),
    SetPlayList(Vec<Song>),
    SetSongList(Vec<Song>),
    SetPlayMode(PlayMode),
    SetCurrentIndex(Option<usize>),
    SetCurrentAction(CurrentAction),
}

impl PlayerState {
    pub fn reduce(&mut self, action: PlayerAction) {
        match action {
            PlayerAction::SetPlaying(playing) => self.playing = playing,
            PlayerAction::SetPlayList(list) => self.play_list = list,
            PlayerAction::SetSongList(list) => self.song_list = list,
            PlayerAction::SetPlayMode(mode) => self.play_mode = mode,
            PlayerAction::SetCurrentIndex(index) => self.current_index = index,
            PlayerAction::SetCurrentAction(action) => self.current_action = action,
        }
    }

    /// Replace the playlist and start playing `songs[index]`.
    pub fn play_songs<R: Rng + ?Sized>(&mut self, songs: Vec<Song>, index: usize, rng: &mut R) {
        if songs.is_empty() {
            self.clear();
            return;
        }
        let index = index.min(songs.len() - 1);
        let current_id = songs[index].id;
        let mut play_list = songs.clone();
        let mut current = index;
        if self.play_mode == PlayMode::Random {
            play_list.shuffle(rng);
            current = position_of(&play_list, current_id).unwrap_or(0);
        }

        self.reduce(PlayerAction::SetSongList(songs));
        self.reduce(PlayerAction::SetPlayList(play_list));
        self.reduce(PlayerAction::SetCurrentIndex(Some(current)));
        self.reduce(PlayerAction::SetCurrentAction(CurrentAction::Play));
    }

    /// Add a song, optionally jumping to it. A song already in the list is not
    /// duplicated.
    pub fn insert_song(&mut self, song: Song, play: bool) {
        let existing = position_of(&self.play_list, song.id);
        let index = match existing {
            Some(index) => index,
            None => {
                self.song_list.push(song.clone());
                self.play_list.push(song);
                self.play_list.len() - 1
            }
        };

        if play {
            self.reduce(PlayerAction::SetCurrentIndex(Some(index)));
            self.reduce(PlayerAction::SetCurrentAction(CurrentAction::Play));
        } else {
            if self.current_index.is_none() {
                self.current_index = Some(index);
            }
            self.reduce(PlayerAction::SetCurrentAction(CurrentAction::Add));
        }
    }

    /// Remove a song from both lists, keeping the current song selected when it
    /// survives.
    pub fn delete_song(&mut self, song_id: u64) {
        let Some(removed) = position_of(&self.play_list, song_id) else {
            return;
        };
        self.play_list.remove(removed);
        self.song_list.retain(|song| song.id != song_id);

        let len = self.play_list.len();
        self.current_index = match self.current_index {
            _ if len == 0 => None,
            Some(current) if current > removed => Some(current - 1),
            Some(current) if current == removed => Some(current.min(len - 1)),
            other => other,
        };
        if len == 0 {
            self.playing = false;
        }
        self.reduce(PlayerAction::SetCurrentAction(CurrentAction::Delete));
    }

    pub fn clear(&mut self) {
        self.reduce(PlayerAction::SetSongList(Vec::new()));
        self.reduce(PlayerAction::SetPlayList(Vec::new()));
        self.reduce(PlayerAction::SetCurrentIndex(None));
        self.reduce(PlayerAction::SetPlaying(false));
        self.reduce(PlayerAction::SetCurrentAction(CurrentAction::Clear));
    }

    /// Switch play mode. Shuffle reorders the play list, other modes restore
    /// insertion order; the current song stays current either way.
    pub fn change_play_mode<R: Rng + ?Sized>(&mut self, mode: PlayMode, rng: &mut R) {
        let current_id = self
            .current_index
            .and_then(|index| self.play_list.get(index))
            .map(|song| song.id);

        let mut play_list = self.song_list.clone();
        if mode == PlayMode::Random {
            play_list.shuffle(rng);
        }
        let current_index = current_id.and_then(|id| position_of(&play_list, id));

        self.reduce(PlayerAction::SetPlayMode(mode));
        self.reduce(PlayerAction::SetPlayList(play_list));
        self.reduce(PlayerAction::SetCurrentIndex(current_index));
    }

    /// Index that follows the current one. Single-loop stays put.
    pub fn next_index(&self) -> Option<usize> {
        let len = self.play_list.len();
        let current = self.current_index?;
        if len == 0 {
            return None;
        }
        match self.play_mode {
            PlayMode::SingleLoop => Some(current.min(len - 1)),
            PlayMode::Loop | PlayMode::Random => Some((current + 1) % len),
        }
    }

    pub fn prev_index(&self) -> Option<usize> {
        let len = self.play_list.len();
        let current = self.current_index?;
        if len == 0 {
            return None;
        }
        match self.play_mode {
            PlayMode::SingleLoop => Some(current.min(len - 1)),
            PlayMode::Loop | PlayMode::Random => Some((current + len - 1) % len),
        }
    }
}

fn position_of(list: &[Song], id: u64) -> Option<usize> {
    list.iter().position(|song| song.id == id)
}
