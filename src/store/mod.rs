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

//! Submission persistence.
//!
//! Submissions are stored as flat rows in an append-only table shaped like a
//! spreadsheet, see [`codec`] for the column contract. The [`RowStore`] trait
//! is the seam to the backend; [`SubmissionStore`] layers id generation,
//! encoding and decoding on top of it.
//!
//! Writes are appends only. There is no read-modify-write anywhere, and no
//! protection against two clients appending at the same moment.

pub(crate) mod codec;
pub(crate) mod sqlite;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::StorageError,
    model::{StoredSubmission, SubmissionRecord},
    store::codec::StoredRow,
};

pub(crate) use sqlite::SqliteRowStore;

/// A tabular, append-only row backend.
pub(crate) trait RowStore {
    fn append(&mut self, rows: &[StoredRow]) -> Result<(), StorageError>;

    fn rows_by_submission_id(&self, submission_id: &str) -> Result<Vec<StoredRow>, StorageError>;

    fn all_rows(&self) -> Result<Vec<StoredRow>, StorageError>;
}

/// Saves and loads whole submissions through a [`RowStore`].
pub(crate) struct SubmissionStore<R> {
    rows: R,
}

impl<R: RowStore> SubmissionStore<R> {
    pub(crate) fn new(rows: R) -> Self {
        Self { rows }
    }

    /// Appends a submission under a freshly generated id and returns the id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Append`] if the backend rejects the rows. No
    /// partial write is assumed to be recoverable.
    pub(crate) fn save_submission(
        &mut self,
        record: &SubmissionRecord,
    ) -> Result<String, StorageError> {
        let submission_id = Uuid::new_v4().to_string();
        let rows = codec::encode(record, &submission_id, Utc::now());

        self.rows.append(&rows)?;
        info!(%submission_id, songs = rows.len(), "submission saved");

        Ok(submission_id)
    }

    pub(crate) fn get_submission(
        &self,
        submission_id: &str,
    ) -> Result<Option<StoredSubmission>, StorageError> {
        let rows = self.rows.rows_by_submission_id(submission_id)?;
        debug!(%submission_id, rows = rows.len(), "loaded submission rows");

        Ok(codec::decode_submission(&rows))
    }

    pub(crate) fn list_submissions(&self) -> Result<Vec<StoredSubmission>, StorageError> {
        let rows = self.rows.all_rows()?;
        let submissions = codec::decode_listing(&rows);
        debug!(rows = rows.len(), submissions = submissions.len(), "listed submissions");

        Ok(submissions)
    }
}
