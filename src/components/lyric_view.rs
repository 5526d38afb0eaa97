use crate::api::SongService;
use crate::components::{AudioClock, Icon, IconKind};
use crate::config::AppConfig;
use crate::lyric::WyLyric;
use crate::store::use_current_song;
use dioxus::prelude::*;
use tracing::warn;

const LOG_TARGET: &str = "wymusic::lyric";

fn line_element_id(index: usize) -> String {
    format!("wy-lyric-line-{index}")
}

/// Lyrics for the current song, following playback.
#[component]
pub fn LyricView() -> Element {
    let config = use_context::<AppConfig>();
    let current_song = use_current_song();
    let clock = use_context::<AudioClock>().0;

    let lyric = use_resource(move || {
        let config = config.clone();
        let song_id = current_song().map(|song| song.id);
        async move {
            let id = song_id?;
            match SongService::new(config).get_lyric(id).await {
                Ok(lyric) => Some(WyLyric::parse(&lyric)),
                Err(err) => {
                    warn!(target: LOG_TARGET, "failed to load lyric for {id}: {err}");
                    None
                }
            }
        }
    });

    let active_line = use_memo(move || {
        let position = clock().current_time;
        lyric
            .read()
            .as_ref()
            .and_then(|parsed| parsed.as_ref())
            .and_then(|parsed| parsed.line_index_at(position))
    });

    use_effect(move || {
        if let Some(index) = active_line() {
            let script = format!(
                "const line = document.getElementById('{}'); \
                 if (line) {{ line.scrollIntoView({{ block: 'center', behavior: 'smooth' }}); }}",
                line_element_id(index)
            );
            let _ = document::eval(&script);
        }
    });

    let active = active_line();

    rsx! {
        section { class: "lyric-view",
            div { class: "lyric-view-header",
                Icon { kind: IconKind::Lyric }
                h3 { "Lyrics" }
            }
            div { class: "lyric-view-body",
                match &*lyric.read() {
                    None => rsx! {
                        p { class: "lyric-view-status", "Loading lyrics..." }
                    },
                    Some(None) => rsx! {
                        p { class: "lyric-view-status", "No lyrics" }
                    },
                    Some(Some(parsed)) if parsed.is_empty() => rsx! {
                        p { class: "lyric-view-status", "No lyrics" }
                    },
                    Some(Some(parsed)) => rsx! {
                        for (index, line) in parsed.lines.iter().enumerate() {
                            div {
                                key: "{index}",
                                id: line_element_id(index),
                                class: if active == Some(index) { "lyric-line lyric-line-active" } else { "lyric-line" },
                                p { class: "lyric-line-text", "{line.text}" }
                                if let Some(translation) = line.translation.as_ref() {
                                    p { class: "lyric-line-translation", "{translation}" }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_ids_are_stable() {
        assert_eq!(line_element_id(0), "wy-lyric-line-0");
        assert_eq!(line_element_id(12), "wy-lyric-line-12");
    }
}
