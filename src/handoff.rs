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

//! Short-lived snapshot of the last successful submission.
//!
//! The success view does not query the row store. Instead the form state that
//! was just submitted is written next to the other application data and read
//! back when the view opens. A snapshot older than [`MAX_AGE_SECS`] counts as
//! absent, as does a missing or unreadable file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    model::{SongEntry, TransitionKey, TransitionNote},
    submission::MixFormData,
};

const APP_DIR: &str = "mixcraft";
const FILE_NAME: &str = "last_submission.json";

pub(crate) const MAX_AGE_SECS: i64 = 60 * 60;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HandoffSnapshot {
    pub(crate) submission_id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) reason: String,
    pub(crate) songs: Vec<SongEntry>,
    pub(crate) transitions: Vec<TransitionNote>,
    pub(crate) created_at: DateTime<Utc>,
}

impl HandoffSnapshot {
    /// Captures the form that was just stored under `submission_id`.
    ///
    /// Only called after a successful submission, so both lists have
    /// already parsed once; should they not, the snapshot carries them empty.
    pub(crate) fn from_form(data: &MixFormData, submission_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            submission_id: submission_id.to_string(),
            name: data.name.clone(),
            email: data.email.clone(),
            reason: data.reason.clone(),
            songs: serde_json::from_str(&data.songs).unwrap_or_default(),
            transitions: serde_json::from_str(&data.transitions).unwrap_or_default(),
            created_at: now,
        }
    }

    /// The transition from song `index` into the song after it, if any.
    pub(crate) fn transition_after(&self, index: usize) -> Option<&TransitionNote> {
        let next = self.songs.get(index + 1)?;
        let key = TransitionKey::into_song(&next.id);
        self.transitions.iter().find(|t| t.id == key)
    }

    pub(crate) fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Duration::seconds(MAX_AGE_SECS)
    }

    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// cannot be written.
    pub(crate) fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), "handoff snapshot written");

        Ok(())
    }

    pub(crate) fn read_from(path: &Path, now: DateTime<Utc>) -> Option<Self> {
        let json = fs::read_to_string(path).ok()?;

        let snapshot: Self = match serde_json::from_str(&json) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "ignoring malformed handoff snapshot");
                return None;
            }
        };

        if snapshot.is_expired(now) {
            debug!(submission_id = %snapshot.submission_id, "handoff snapshot expired");
            return None;
        }

        Some(snapshot)
    }
}

/// Location of the snapshot in the platform data directory.
pub(crate) fn default_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
}
