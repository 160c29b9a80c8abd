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

//! Domain models and core data structures.
//!
//! This module defines the entities a mix commission is made of: the songs
//! the customer picks with their time windows, the notes describing how one
//! song should flow into the next, and the immutable record that is built at
//! submission time and later read back from storage.

pub(crate) mod form;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use uuid::Uuid;

/// Default clip window for a freshly added song, in seconds.
pub(crate) const DEFAULT_WINDOW: (f64, f64) = (0.0, 30.0);

const TRANSITION_KEY_PREFIX: &str = "transition-";

/// Opaque identifier of a song within one form session.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct SongId(String);

impl SongId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SongId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One song as edited in the form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SongEntry {
    pub(crate) id: SongId,
    #[serde(rename = "youtubeUrl")]
    pub(crate) source_url: String,
    pub(crate) start_time: f64,
    pub(crate) end_time: f64,
    #[serde(default)]
    pub(crate) is_expanded: bool,
    #[serde(default)]
    pub(crate) show_waveform: bool,
    #[serde(default)]
    pub(crate) notes: String,
}

impl SongEntry {
    pub(crate) fn new(id: SongId) -> Self {
        Self {
            id,
            source_url: String::new(),
            start_time: DEFAULT_WINDOW.0,
            end_time: DEFAULT_WINDOW.1,
            is_expanded: true,
            show_waveform: false,
            notes: String::new(),
        }
    }

    pub(crate) fn window(&self) -> Window {
        Window::new(self.start_time, self.end_time)
    }
}

/// The `[start, end]` clip bounds selected for a song.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Window {
    pub(crate) start: f64,
    pub(crate) end: f64,
}

impl Window {
    pub(crate) fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub(crate) fn clamp(&self, t: f64) -> f64 {
        t.max(self.start).min(self.end)
    }
}

/// Identifies a transition note by the song it leads into.
///
/// On the wire this is `"transition-" + id`, in memory it is the song id
/// itself so that lookups never depend on string concatenation.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct TransitionKey(pub(crate) SongId);

impl TransitionKey {
    pub(crate) fn into_song(song_id: &SongId) -> Self {
        Self(song_id.clone())
    }

    pub(crate) fn song_id(&self) -> &SongId {
        &self.0
    }

    fn parse(wire: &str) -> Option<Self> {
        wire.strip_prefix(TRANSITION_KEY_PREFIX)
            .filter(|id| !id.is_empty())
            .map(|id| Self(SongId::from(id)))
    }
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", TRANSITION_KEY_PREFIX, self.0)
    }
}

impl Serialize for TransitionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TransitionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = String::deserialize(deserializer)?;
        TransitionKey::parse(&wire).ok_or_else(|| {
            de::Error::custom(format!(
                "transition id must look like `{TRANSITION_KEY_PREFIX}<song id>`, got `{wire}`"
            ))
        })
    }
}

/// Free text describing how the previous song should flow into `id`'s song.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TransitionNote {
    pub(crate) id: TransitionKey,
    #[serde(default)]
    pub(crate) content: String,
}

impl TransitionNote {
    pub(crate) fn new(into: &SongId) -> Self {
        Self {
            id: TransitionKey::into_song(into),
            content: String::new(),
        }
    }
}

/// A song as captured in a submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct MixSong {
    pub(crate) source_url: String,
    pub(crate) start_time: f64,
    pub(crate) end_time: f64,
    pub(crate) song_notes: String,
    /// How this song should hand over to the next one. Always empty for the
    /// last song.
    pub(crate) transition_notes: String,
}

/// Immutable snapshot of a completed form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct SubmissionRecord {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) purpose: String,
    pub(crate) songs: Vec<MixSong>,
}

/// A submission read back from the row store.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct StoredSubmission {
    pub(crate) submission_id: String,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) record: SubmissionRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_key_uses_prefixed_wire_form() {
        let note = TransitionNote {
            id: TransitionKey::into_song(&SongId::from("abc")),
            content: "fade".to_string(),
        };
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(json, r#"{"id":"transition-abc","content":"fade"}"#);

        let back: TransitionNote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }

    #[test]
    fn transition_key_rejects_unprefixed_ids() {
        assert!(serde_json::from_str::<TransitionNote>(r#"{"id":"abc","content":""}"#).is_err());
        assert!(
            serde_json::from_str::<TransitionNote>(r#"{"id":"transition-","content":""}"#).is_err()
        );
    }

    #[test]
    fn song_entry_reads_form_json() {
        let json = r#"{
            "id": "s1",
            "youtubeUrl": "https://youtu.be/dQw4w9WgXcQ",
            "startTime": 12,
            "endTime": 42.5,
            "isExpanded": true,
            "showWaveform": false,
            "notes": "louder"
        }"#;
        let song: SongEntry = serde_json::from_str(json).unwrap();
        assert_eq!(song.id, SongId::from("s1"));
        assert_eq!(song.start_time, 12.0);
        assert_eq!(song.end_time, 42.5);
        assert_eq!(song.notes, "louder");
    }

    #[test]
    fn window_clamps_into_bounds() {
        let window = Window::new(10.0, 20.0);
        assert_eq!(window.clamp(3.0), 10.0);
        assert_eq!(window.clamp(15.0), 15.0);
        assert_eq!(window.clamp(99.0), 20.0);
    }
}
