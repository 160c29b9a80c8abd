// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Song source link handling.
//!
//! Songs are described by YouTube links in any of the shapes people paste:
//! `watch?v=` pages, `youtu.be` short links, `embed/` and `v/` URLs, or just
//! the bare 11 character video id.

use std::sync::LazyLock;

use regex::Regex;

// Anything shorter than this still gets the benefit of the doubt while typing.
const PENDING_LEN: usize = 20;

static VIDEO_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)",
        r"youtube\.com/v/([^&\n?#]+)",
        r"^([a-zA-Z0-9_-]{11})$",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

static PARTIAL_URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^https?://(www\.)?youtube\.com/watch\?v=",
        r"^https?://youtu\.be/",
        r"^https?://(www\.)?youtube\.com/embed/",
        r"^https?://(www\.)?youtube\.com/v/",
        r"^youtube\.com/watch\?v=",
        r"^youtu\.be/",
        r"^www\.youtube\.com/watch\?v=",
        r"^[a-zA-Z0-9_-]{0,11}$",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

static MINUTES_SECONDS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+)m(\d+)s").ok());

/// Validation feedback shown next to a song's link while it is edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UrlStatus {
    Valid,
    Pending,
    Invalid,
}

/// Everything we can learn from a source link.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SourceInfo {
    pub(crate) video_id: Option<String>,
    pub(crate) start_time: Option<f64>,
    pub(crate) end_time: Option<f64>,
}

impl SourceInfo {
    pub(crate) fn parse(url: &str) -> Self {
        let (start_time, end_time) = extract_time_params(url);
        Self {
            video_id: extract_video_id(url),
            start_time,
            end_time,
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.video_id.is_some()
    }
}

/// Extracts the video id from any of the supported link shapes.
pub(crate) fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Reads the `t`/`start` and `end` query parameters of an absolute link.
///
/// Relative or half-typed input yields nothing rather than an error.
pub(crate) fn extract_time_params(url: &str) -> (Option<f64>, Option<f64>) {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return (None, None);
    }

    let Some((_, query)) = url.split_once('?') else {
        return (None, None);
    };
    let query = query.split('#').next().unwrap_or_default();

    let param = |name: &str| {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty())
    };

    let start = param("t")
        .or_else(|| param("start"))
        .and_then(parse_time_parameter);
    let end = param("end")
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|end| end.is_finite() && *end > 0.0);

    (start, end)
}

/// Accepts `90`, `1m30s` and `1:30`, falling back to a plain float.
///
/// Negative values clamp to zero; unparseable or non-finite values are
/// dropped.
fn parse_time_parameter(value: &str) -> Option<f64> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        return value.parse::<u64>().ok().map(|s| s as f64);
    }

    if value.contains('m') || value.contains('s') {
        if let Some(caps) = MINUTES_SECONDS.as_ref().and_then(|re| re.captures(value)) {
            let minutes: u64 = caps[1].parse().ok()?;
            let seconds: u64 = caps[2].parse().ok()?;
            return Some(minutes.checked_mul(60)?.checked_add(seconds)? as f64);
        }
    }

    if let Some((m, s)) = value.split_once(':') {
        if let (Ok(m), Ok(s)) = (m.parse::<u64>(), s.parse::<u64>()) {
            return Some(m.checked_mul(60)?.checked_add(s)? as f64);
        }
    }

    value
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .map(|t| t.max(0.0))
}

/// True while the input could still turn into a valid link.
pub(crate) fn is_potential_url(url: &str) -> bool {
    if url.is_empty() {
        return true;
    }
    PARTIAL_URL_PATTERNS.iter().any(|re| re.is_match(url)) || url.len() < PENDING_LEN
}

pub(crate) fn url_status(url: &str) -> UrlStatus {
    if SourceInfo::parse(url).is_valid() {
        UrlStatus::Valid
    } else if is_potential_url(url) {
        UrlStatus::Pending
    } else {
        UrlStatus::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_ids_from_common_shapes() {
        let id = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), id);
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=10"), id);
        assert_eq!(extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"), id);
        assert_eq!(extract_video_id("https://www.youtube.com/v/dQw4w9WgXcQ"), id);
        assert_eq!(extract_video_id("  dQw4w9WgXcQ  "), id);
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=abc"),
            id
        );
    }

    #[test]
    fn rejects_other_links() {
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("https://example.com/watch"), None);
        assert_eq!(extract_video_id("short"), None);
    }

    #[test]
    fn reads_time_parameters() {
        assert_eq!(
            extract_time_params("https://youtube.com/watch?v=dQw4w9WgXcQ&t=90"),
            (Some(90.0), None)
        );
        assert_eq!(
            extract_time_params("https://youtube.com/watch?v=dQw4w9WgXcQ&t=1m30s&end=120"),
            (Some(90.0), Some(120.0))
        );
        assert_eq!(
            extract_time_params("https://youtube.com/embed/dQw4w9WgXcQ?start=1:05"),
            (Some(65.0), None)
        );
        assert_eq!(extract_time_params("youtu.be/dQw4w9WgXcQ?t=5"), (None, None));
    }

    #[test]
    fn out_of_range_time_parameters_are_tamed() {
        let base = "https://youtube.com/watch?v=dQw4w9WgXcQ";
        assert_eq!(extract_time_params(&format!("{base}&t=-50")), (Some(0.0), None));
        assert_eq!(extract_time_params(&format!("{base}&t=inf&end=nan")), (None, None));
        assert_eq!(extract_time_params(&format!("{base}&t=10&end=-inf")), (Some(10.0), None));
        assert_eq!(extract_time_params(&format!("{base}&t=99999999999999999999m1s")), (None, None));
        assert_eq!(extract_time_params(&format!("{base}&t=later")), (None, None));
    }

    #[test]
    fn reports_status_while_typing() {
        assert_eq!(url_status("https://youtu.be/dQw4w9WgXcQ"), UrlStatus::Valid);
        assert_eq!(url_status("https://www.youtube.com/watch?v="), UrlStatus::Pending);
        assert_eq!(url_status("https://"), UrlStatus::Pending);
        assert_eq!(
            url_status("https://soundcloud.com/someone/some-track"),
            UrlStatus::Invalid
        );
    }

    #[test]
    fn parses_id_and_window_together() {
        let info = SourceInfo::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42");
        assert!(info.is_valid());
        assert_eq!(info.video_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!((info.start_time, info.end_time), (Some(42.0), None));
        assert!(!SourceInfo::parse("https://example.com").is_valid());
    }
}
