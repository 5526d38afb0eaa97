pub mod models;
pub mod song_service;

pub use models::*;
pub use song_service::*;
