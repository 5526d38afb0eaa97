//! LRC parsing for the lyric panel.
//!
//! NetEase style lyrics ship as two LRC documents: the original text and an
//! optional translation keyed by the same timestamps. [`WyLyric`] merges both
//! into one ordered list of lines.

use crate::api::Lyric;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    pub timestamp_seconds: f64,
    pub text: String,
    pub translation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WyLyric {
    pub lines: Vec<LyricLine>,
    /// True when the source had no usable timestamps.
    pub unsynced: bool,
}

// Translations rarely land on exactly the same centisecond.
const TRANSLATION_TOLERANCE_SECONDS: f64 = 0.05;

impl WyLyric {
    pub fn parse(lyric: &Lyric) -> Self {
        let Some(raw) = lyric.lyric.as_deref().filter(|raw| !raw.trim().is_empty()) else {
            return Self::default();
        };

        let mut lines = parse_lrc_lines(raw);
        if lines.is_empty() {
            let lines = strip_lrc_metadata(raw)
                .lines()
                .map(|text| LyricLine {
                    timestamp_seconds: 0.0,
                    text: text.to_string(),
                    translation: None,
                })
                .collect();
            return Self {
                lines,
                unsynced: true,
            };
        }

        if let Some(translated) = lyric.tlyric.as_deref() {
            let translations = parse_lrc_lines(translated);
            for line in &mut lines {
                line.translation = translations
                    .iter()
                    .find(|candidate| {
                        (candidate.timestamp_seconds - line.timestamp_seconds).abs()
                            <= TRANSLATION_TOLERANCE_SECONDS
                    })
                    .map(|candidate| candidate.text.clone());
            }
        }

        Self {
            lines,
            unsynced: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the line that should be highlighted at `seconds`, if any line
    /// has started yet.
    pub fn line_index_at(&self, seconds: f64) -> Option<usize> {
        if self.unsynced || !seconds.is_finite() {
            return None;
        }
        let started = self
            .lines
            .partition_point(|line| line.timestamp_seconds <= seconds);
        started.checked_sub(1)
    }
}

fn parse_lrc_lines(raw_lrc: &str) -> Vec<LyricLine> {
    let mut lines = Vec::<LyricLine>::new();

    for raw_line in raw_lrc.lines() {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut timestamps = Vec::<f64>::new();
        let mut rest = trimmed;

        while rest.starts_with('[') {
            let Some(end_index) = rest.find(']') else {
                break;
            };
            if let Some(value) = parse_lrc_timestamp(&rest[1..end_index]) {
                timestamps.push(value);
            }
            rest = &rest[end_index + 1..];
        }

        let text = rest.trim();
        if timestamps.is_empty() || text.is_empty() {
            continue;
        }

        for timestamp in timestamps {
            lines.push(LyricLine {
                timestamp_seconds: timestamp,
                text: text.to_string(),
                translation: None,
            });
        }
    }

    lines.sort_by(|left, right| {
        left.timestamp_seconds
            .partial_cmp(&right.timestamp_seconds)
            .unwrap_or(Ordering::Equal)
    });

    lines
}

/// `mm:ss[.xx]`, `mm:ss:xx` or `hh:mm:ss[.xx]`. Returns seconds.
fn parse_lrc_timestamp(token: &str) -> Option<f64> {
    let segments = token.split(':').map(str::trim).collect::<Vec<_>>();
    let parse = |segment: &str| segment.replace(',', ".").parse::<f64>().ok();

    let (hours, minutes, seconds) = match segments.as_slice() {
        [minutes, seconds] => (0.0, parse(minutes)?, parse(seconds)?),
        [first, second, third] => {
            let first = parse(first)?;
            let second = parse(second)?;
            // A short, integral last segment is a centisecond field.
            if third.len() <= 2 && !third.contains(['.', ',']) {
                (0.0, first, second + parse(third)? / 100.0)
            } else {
                (first, second, parse(third)?)
            }
        }
        _ => return None,
    };

    if hours < 0.0 || minutes < 0.0 || !(0.0..60.0).contains(&seconds) {
        return None;
    }
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

fn strip_lrc_metadata(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut content = line;
            while content.starts_with('[') {
                let Some(end_index) = content.find(']') else {
                    break;
                };
                content = &content[end_index + 1..];
            }
            let content = content.trim();
            (!content.is_empty()).then(|| content.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lyric(lrc: &str, tlrc: Option<&str>) -> Lyric {
        Lyric {
            lyric: Some(lrc.to_string()),
            tlyric: tlrc.map(str::to_string),
        }
    }

    #[test]
    fn parses_and_sorts_timestamps() {
        let parsed = WyLyric::parse(&lyric(
            "[ti:Title]\n[00:10.50]second\n[00:01.00]first\n[01:02.25][02:00.00]chorus",
            None,
        ));

        let times: Vec<f64> = parsed.lines.iter().map(|l| l.timestamp_seconds).collect();
        assert_eq!(times, vec![1.0, 10.5, 62.25, 120.0]);
        assert_eq!(parsed.lines[0].text, "first");
        assert_eq!(parsed.lines[3].text, "chorus");
        assert!(!parsed.unsynced);
    }

    #[test]
    fn attaches_translation_by_timestamp() {
        let parsed = WyLyric::parse(&lyric(
            "[00:01.00]hello\n[00:05.00]world",
            Some("[by:someone]\n[00:01.00]你好\n[00:05.01]世界"),
        ));

        assert_eq!(parsed.lines[0].translation.as_deref(), Some("你好"));
        assert_eq!(parsed.lines[1].translation.as_deref(), Some("世界"));
    }

    #[test]
    fn accepts_three_segment_timestamps() {
        assert_eq!(parse_lrc_timestamp("01:02:50"), Some(62.5));
        assert_eq!(parse_lrc_timestamp("1:02:03.5"), Some(3723.5));
        assert_eq!(parse_lrc_timestamp("00:07,25"), Some(7.25));
        assert_eq!(parse_lrc_timestamp("ti"), None);
        assert_eq!(parse_lrc_timestamp("1:2:3:4"), None);

        let parsed = WyLyric::parse(&lyric("[00:01:50]first\n[00:00:01.00]intro", None));
        assert!(!parsed.unsynced);
        let times: Vec<f64> = parsed.lines.iter().map(|l| l.timestamp_seconds).collect();
        assert_eq!(times, vec![1.0, 1.5]);
    }

    #[test]
    fn untimed_text_is_unsynced() {
        let parsed = WyLyric::parse(&lyric("just words\nmore words", None));

        assert!(parsed.unsynced);
        assert_eq!(parsed.lines.len(), 2);
        assert_eq!(parsed.line_index_at(30.0), None);
    }

    #[test]
    fn missing_lyric_is_empty() {
        assert!(WyLyric::parse(&Lyric::default()).is_empty());
    }

    #[test]
    fn current_line_follows_playback() {
        let parsed = WyLyric::parse(&lyric("[00:01.00]a\n[00:03.00]b\n[00:06.00]c", None));

        assert_eq!(parsed.line_index_at(0.5), None);
        assert_eq!(parsed.line_index_at(1.0), Some(0));
        assert_eq!(parsed.line_index_at(4.0), Some(1));
        assert_eq!(parsed.line_index_at(100.0), Some(2));
    }
}
