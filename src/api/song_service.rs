use crate::api::models::*;
use crate::config::AppConfig;
use crate::error::ApiError;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

const LOG_TARGET: &str = "wymusic::api";

/// Song urls, song details and lyrics from the catalog API.
#[derive(Debug, Clone, PartialEq)]
pub struct SongService {
    config: AppConfig,
}

impl SongService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let endpoint = self.config.endpoint(path);
        debug!(target: LOG_TARGET, "GET {endpoint} {params:?}");

        let response = HTTP_CLIENT
            .get(&endpoint)
            .query(params)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!(target: LOG_TARGET, "{endpoint} responded with {status}");
            return Err(ApiError::Status { endpoint, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })
    }

    /// Playable urls for a comma separated id list.
    pub async fn get_song_url(&self, ids: &str) -> Result<Vec<SongUrl>, ApiError> {
        let response: SongUrlResponse = self
            .get_json("song/url", &[("id", ids.to_string())])
            .await?;
        Ok(response.data)
    }

    /// Attach playable urls to the given songs, dropping any song without one.
    pub async fn get_song_list(
        &self,
        songs: impl Into<SongBatch>,
    ) -> Result<Vec<Song>, ApiError> {
        let songs = songs.into().into_vec();
        if songs.is_empty() {
            return Ok(Vec::new());
        }
        let urls = self.get_song_url(&join_ids(songs.iter().map(|s| s.id))).await?;
        let playable = generate_song_list(&songs, &urls);
        if playable.len() < songs.len() {
            debug!(
                target: LOG_TARGET,
                "{} of {} songs have no playable url",
                songs.len() - playable.len(),
                songs.len()
            );
        }
        Ok(playable)
    }

    /// Song metadata for the given ids, in the order the API returns them.
    pub async fn get_song_detail(&self, ids: &[u64]) -> Result<Vec<Song>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let response: SongDetailResponse = self
            .get_json("song/detail", &[("ids", join_ids(ids.iter().copied()))])
            .await?;
        Ok(response.songs)
    }

    /// Lyric and translated lyric. Missing sections come back as `None`.
    pub async fn get_lyric(&self, id: u64) -> Result<Lyric, ApiError> {
        let response: LyricResponse = self.get_json("lyric", &[("id", id.to_string())]).await?;
        Ok(response.into())
    }
}

pub fn join_ids(ids: impl IntoIterator<Item = u64>) -> String {
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Join songs with their urls by id. Songs without a url entry, or whose entry
/// carries no url, are left out.
pub fn generate_song_list(songs: &[Song], urls: &[SongUrl]) -> Vec<Song> {
    songs
        .iter()
        .filter_map(|song| {
            let url = urls
                .iter()
                .find(|entry| entry.id == song.id)
                .and_then(|entry| entry.url.as_deref())
                .filter(|url| !url.is_empty())?;
            Some(Song {
                url: Some(url.to_string()),
                ..song.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(id: u64, url: &str) -> SongUrl {
        SongUrl {
            id,
            url: Some(url.to_string()),
        }
    }

    #[test]
    fn song_without_url_entry_is_dropped() {
        let songs = vec![Song::with_id(1), Song::with_id(2)];
        let result = generate_song_list(&songs, &[url(1, "a")]);

        assert_eq!(
            result,
            vec![Song {
                url: Some("a".to_string()),
                ..Song::with_id(1)
            }]
        );
    }

    #[test]
    fn null_and_empty_urls_are_dropped() {
        let songs = vec![Song::with_id(1), Song::with_id(2), Song::with_id(3)];
        let urls = vec![SongUrl { id: 1, url: None }, url(2, ""), url(3, "c")];
        let result = generate_song_list(&songs, &urls);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 3);
    }

    #[test]
    fn join_keeps_song_order_and_metadata() {
        let mut first = Song::with_id(7);
        first.name = "Seven".to_string();
        let songs = vec![first, Song::with_id(3)];
        let urls = vec![url(3, "three"), url(7, "seven")];
        let result = generate_song_list(&songs, &urls);

        assert_eq!(result[0].name, "Seven");
        assert_eq!(result[0].url.as_deref(), Some("seven"));
        assert_eq!(result[1].url.as_deref(), Some("three"));
    }

    #[test]
    fn ids_are_comma_joined() {
        assert_eq!(join_ids([1, 22, 333]), "1,22,333");
        assert_eq!(join_ids(Vec::<u64>::new()), "");
    }

    #[test]
    fn batch_accepts_single_song() {
        let batch: SongBatch = Song::with_id(5).into();
        assert_eq!(batch.into_vec(), vec![Song::with_id(5)]);
    }

    #[test]
    fn decodes_song_url_payload() {
        let raw = r#"{"data":[{"id":1,"url":"http://x/1.mp3","br":128000},{"id":2,"url":null}],"code":200}"#;
        let response: SongUrlResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].url.as_deref(), Some("http://x/1.mp3"));
        assert_eq!(response.data[1].url, None);
    }

    #[test]
    fn decodes_song_detail_payload() {
        let raw = r#"{"songs":[{"id":9,"name":"Song","ar":[{"id":1,"name":"A"},{"id":2,"name":"B"}],"al":{"id":3,"name":"Al","picUrl":"http://x/p.jpg"},"dt":215000}]}"#;
        let response: SongDetailResponse = serde_json::from_str(raw).unwrap();
        let song = &response.songs[0];

        assert_eq!(song.artist_names(), "A / B");
        assert_eq!(song.al.pic_url.as_deref(), Some("http://x/p.jpg"));
        assert_eq!(song.duration_seconds(), 215.0);
        assert_eq!(song.url, None);
    }

    #[test]
    fn lyric_payload_maps_both_sections() {
        let raw = r#"{"lrc":{"version":3,"lyric":"[00:01.00]hi"},"tlyric":{"lyric":"[00:01.00]你好"}}"#;
        let lyric: Lyric = serde_json::from_str::<LyricResponse>(raw).unwrap().into();

        assert_eq!(lyric.lyric.as_deref(), Some("[00:01.00]hi"));
        assert_eq!(lyric.tlyric.as_deref(), Some("[00:01.00]你好"));
    }

    #[test]
    fn lyric_payload_without_sections_degrades() {
        let raw = r#"{"nolyric":true,"code":200}"#;
        let lyric: Lyric = serde_json::from_str::<LyricResponse>(raw).unwrap().into();

        assert_eq!(lyric, Lyric::default());

        let raw = r#"{"lrc":{"lyric":"x"},"tlyric":{}}"#;
        let lyric: Lyric = serde_json::from_str::<LyricResponse>(raw).unwrap().into();
        assert_eq!(lyric.lyric.as_deref(), Some("x"));
        assert_eq!(lyric.tlyric, None);
    }
}
