//! The components module contains all shared components for the player.

mod app;
pub mod audio;
mod icons;
mod lyric_view;
mod player;
pub mod slider;
mod song_list;

pub use app::*;
pub use audio::AudioElement;
pub use icons::*;
pub use lyric_view::*;
pub use player::*;
pub use slider::WySlider;
pub use song_list::*;
