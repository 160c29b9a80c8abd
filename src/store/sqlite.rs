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

//! SQLite row backend.
//!
//! A single `submissions` table holds the eleven text columns in storage
//! order. The autoincrement `row_id` preserves append order and is never
//! exposed.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use rusqlite::{Connection, params_from_iter};

use crate::{
    error::StorageError,
    store::{
        RowStore,
        codec::{COLUMN_COUNT, COLUMN_NAMES, StoredRow},
    },
};

// Statements list the columns in storage order so rows read back positionally.
static SELECT_ALL: LazyLock<String> = LazyLock::new(|| {
    format!("SELECT {} FROM submissions ORDER BY row_id", COLUMN_NAMES.join(", "))
});

static SELECT_BY_ID: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {} FROM submissions WHERE submission_id = ? ORDER BY row_id",
        COLUMN_NAMES.join(", ")
    )
});

static INSERT_ROW: LazyLock<String> = LazyLock::new(|| {
    format!(
        "INSERT INTO submissions ({}) VALUES ({})",
        COLUMN_NAMES.join(", "),
        ["?"; COLUMN_COUNT].join(", ")
    )
});

pub(crate) struct SqliteRowStore {
    conn: Connection,
}

impl SqliteRowStore {
    /// Opens (creating if needed) the database file and configures it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, WAL mode cannot be
    /// enabled, or the schema cannot be created.
    pub(crate) fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {path}"))?;

        let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
        if journal_mode != "wal" {
            anyhow::bail!(
                "Failed to switch to WAL mode. Current mode: {}",
                journal_mode
            );
        }

        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

        create_schema(&conn)?;

        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS submissions (
            row_id INTEGER PRIMARY KEY AUTOINCREMENT,
            submission_id TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            purpose TEXT NOT NULL,
            song_number TEXT NOT NULL,
            youtube_url TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            song_notes TEXT NOT NULL,
            transition_notes TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_submissions_submission_id
            ON submissions (submission_id);

        COMMIT;",
    )
    .context("Failed to create schema")
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredRow> {
    let mut cells = Vec::with_capacity(COLUMN_COUNT);
    for i in 0..COLUMN_COUNT {
        cells.push(row.get::<_, Option<String>>(i)?.unwrap_or_default());
    }
    Ok(StoredRow::from_cells(cells))
}

impl RowStore for SqliteRowStore {
    fn append(&mut self, rows: &[StoredRow]) -> Result<(), StorageError> {
        let append = |conn: &mut Connection| -> rusqlite::Result<()> {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare_cached(&INSERT_ROW)?;
                for row in rows {
                    stmt.execute(params_from_iter(row.cells().iter()))?;
                }
            }
            tx.commit()
        };

        append(&mut self.conn).map_err(|e| StorageError::Append(e.to_string()))
    }

    fn rows_by_submission_id(&self, submission_id: &str) -> Result<Vec<StoredRow>, StorageError> {
        let mut stmt = self.conn.prepare_cached(&SELECT_BY_ID)?;
        let rows = stmt
            .query_map([submission_id], read_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn all_rows(&self) -> Result<Vec<StoredRow>, StorageError> {
        let mut stmt = self.conn.prepare_cached(&SELECT_ALL)?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
