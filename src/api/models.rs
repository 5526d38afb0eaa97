use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Singer {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Album {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "picUrl")]
    pub pic_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Song {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ar: Vec<Singer>,
    #[serde(default)]
    pub al: Album,
    /// Duration in milliseconds.
    #[serde(default)]
    pub dt: u64,
    #[serde(default)]
    pub url: Option<String>,
}

impl Song {
    #[cfg(test)]
    pub fn with_id(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn artist_names(&self) -> String {
        self.ar
            .iter()
            .map(|singer| singer.name.as_str())
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(" / ")
    }

    pub fn duration_seconds(&self) -> f64 {
        self.dt as f64 / 1000.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SongUrl {
    pub id: u64,
    #[serde(default)]
    pub url: Option<String>,
}

/// Original lyric text plus its translation, either of which may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Lyric {
    pub lyric: Option<String>,
    pub tlyric: Option<String>,
}

/// One song or a batch of songs, accepted wherever a playable list is built.
#[derive(Debug, Clone, PartialEq)]
pub enum SongBatch {
    One(Song),
    Many(Vec<Song>),
}

impl SongBatch {
    pub fn into_vec(self) -> Vec<Song> {
        match self {
            Self::One(song) => vec![song],
            Self::Many(songs) => songs,
        }
    }
}

impl From<Song> for SongBatch {
    fn from(song: Song) -> Self {
        Self::One(song)
    }
}

impl From<Vec<Song>> for SongBatch {
    fn from(songs: Vec<Song>) -> Self {
        Self::Many(songs)
    }
}

impl From<&[Song]> for SongBatch {
    fn from(songs: &[Song]) -> Self {
        Self::Many(songs.to_vec())
    }
}

// Wire envelopes

#[derive(Debug, Deserialize)]
pub(crate) struct SongUrlResponse {
    #[serde(default)]
    pub data: Vec<SongUrl>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SongDetailResponse {
    #[serde(default)]
    pub songs: Vec<Song>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LyricBody {
    #[serde(default)]
    pub lyric: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LyricResponse {
    #[serde(default)]
    pub lrc: Option<LyricBody>,
    #[serde(default)]
    pub tlyric: Option<LyricBody>,
}

impl From<LyricResponse> for Lyric {
    fn from(response: LyricResponse) -> Self {
        let text = |body: Option<LyricBody>| body.and_then(|body| body.lyric);
        Self {
            lyric: text(response.lrc),
            tlyric: text(response.tlyric),
        }
    }
}
