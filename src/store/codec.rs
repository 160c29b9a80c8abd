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

//! Flattening submissions into rows and inflating them back.
//!
//! Each song of a submission becomes one row. The column order below is the
//! storage contract: rows written by older versions must stay readable, so
//! columns are never reordered.
//!
//! ```text
//! submission_id | timestamp | name | email | purpose | song_number |
//! youtube_url | start_time | end_time | song_notes | transition_notes
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{
    model::{MixSong, StoredSubmission, SubmissionRecord},
    util::format::{format_time, parse_time},
};

pub(crate) const COL_SUBMISSION_ID: usize = 0;
pub(crate) const COL_TIMESTAMP: usize = 1;
pub(crate) const COL_NAME: usize = 2;
pub(crate) const COL_EMAIL: usize = 3;
pub(crate) const COL_PURPOSE: usize = 4;
pub(crate) const COL_SONG_NUMBER: usize = 5;
pub(crate) const COL_SOURCE_URL: usize = 6;
pub(crate) const COL_START_TIME: usize = 7;
pub(crate) const COL_END_TIME: usize = 8;
pub(crate) const COL_SONG_NOTES: usize = 9;
pub(crate) const COL_TRANSITION_NOTES: usize = 10;

pub(crate) const COLUMN_COUNT: usize = 11;

/// Column headings, in storage order.
pub(crate) const COLUMN_NAMES: [&str; COLUMN_COUNT] = [
    "submission_id",
    "timestamp",
    "name",
    "email",
    "purpose",
    "song_number",
    "youtube_url",
    "start_time",
    "end_time",
    "song_notes",
    "transition_notes",
];

/// One positionally addressed storage row.
///
/// Cells are kept as text, exactly as a spreadsheet would hold them. Rows
/// that come back short are padded with empty cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct StoredRow {
    cells: [String; COLUMN_COUNT],
}

impl StoredRow {
    pub(crate) fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: [String; COLUMN_COUNT] = Default::default();
        for (slot, cell) in row.iter_mut().zip(cells) {
            *slot = cell.into();
        }
        Self { cells: row }
    }

    pub(crate) fn cells(&self) -> &[String; COLUMN_COUNT] {
        &self.cells
    }

    pub(crate) fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or_default()
    }

    pub(crate) fn submission_id(&self) -> &str {
        self.cell(COL_SUBMISSION_ID)
    }

    /// Unparseable song numbers sort after every real one.
    fn song_number(&self) -> u64 {
        self.cell(COL_SONG_NUMBER).trim().parse().unwrap_or(u64::MAX)
    }
}

/// Produces one row per song, numbered from 1 in song order.
pub(crate) fn encode(
    record: &SubmissionRecord,
    submission_id: &str,
    timestamp: DateTime<Utc>,
) -> Vec<StoredRow> {
    let timestamp = timestamp.to_rfc3339();

    record
        .songs
        .iter()
        .enumerate()
        .map(|(i, song)| {
            StoredRow::from_cells([
                submission_id.to_string(),
                timestamp.clone(),
                record.name.clone(),
                record.email.clone(),
                record.purpose.clone(),
                (i + 1).to_string(),
                song.source_url.clone(),
                format_time(song.start_time),
                format_time(song.end_time),
                song.song_notes.clone(),
                song.transition_notes.clone(),
            ])
        })
        .collect()
}

/// Rebuilds one submission from its row group.
///
/// Rows may arrive in any order; `song_number` decides the song order and
/// the contact fields come from the first song. Malformed times decode as 0
/// and malformed timestamps as the Unix epoch rather than failing the group.
pub(crate) fn decode_submission(rows: &[StoredRow]) -> Option<StoredSubmission> {
    let mut rows: Vec<&StoredRow> = rows.iter().collect();
    rows.sort_by_key(|row| row.song_number());

    let first = rows.first()?;

    let songs = rows
        .iter()
        .map(|row| MixSong {
            source_url: row.cell(COL_SOURCE_URL).to_string(),
            start_time: parse_time(row.cell(COL_START_TIME)).unwrap_or(0.0),
            end_time: parse_time(row.cell(COL_END_TIME)).unwrap_or(0.0),
            song_notes: row.cell(COL_SONG_NOTES).to_string(),
            transition_notes: row.cell(COL_TRANSITION_NOTES).to_string(),
        })
        .collect();

    Some(StoredSubmission {
        submission_id: first.submission_id().to_string(),
        timestamp: parse_timestamp(first.cell(COL_TIMESTAMP)),
        record: SubmissionRecord {
            name: first.cell(COL_NAME).to_string(),
            email: first.cell(COL_EMAIL).to_string(),
            purpose: first.cell(COL_PURPOSE).to_string(),
            songs,
        },
    })
}

/// Groups an unordered row set by submission and returns the submissions
/// most recent first.
///
/// Rows without a submission id (blank spreadsheet lines) are skipped.
pub(crate) fn decode_listing(rows: &[StoredRow]) -> Vec<StoredSubmission> {
    let mut groups: HashMap<&str, Vec<StoredRow>> = HashMap::new();
    for row in rows.iter().filter(|r| !r.submission_id().trim().is_empty()) {
        groups.entry(row.submission_id()).or_default().push(row.clone());
    }

    let mut submissions: Vec<StoredSubmission> = groups
        .values()
        .filter_map(|group| decode_submission(group))
        .collect();

    submissions.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.submission_id.cmp(&b.submission_id))
    });

    submissions
}

fn parse_timestamp(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
