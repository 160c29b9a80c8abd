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

//! Error taxonomy for the submission pipeline and media preview.
//!
//! Validation and serialization problems are reported back to the user per
//! field, storage problems as a single top-level message, and transport
//! problems only ever degrade the preview.

use std::{collections::BTreeMap, fmt};

use thiserror::Error;

/// Form fields that can carry a field-level error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Field {
    Name,
    Email,
    Reason,
    Songs,
    Transitions,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Reason => "reason",
            Field::Songs => "songs",
            Field::Transitions => "transitions",
        };
        f.write_str(name)
    }
}

/// A single missing or malformed required field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub(crate) struct ValidationError {
    pub(crate) field: Field,
    pub(crate) message: String,
}

impl ValidationError {
    pub(crate) fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every validation failure found in one pass over the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub(crate) struct ValidationErrors(pub(crate) Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Collapses the errors into one message per field, later errors for the
    /// same field replacing earlier ones.
    pub(crate) fn into_field_map(self) -> BTreeMap<Field, String> {
        self.0.into_iter().map(|e| (e.field, e.message)).collect()
    }
}

/// The serialized song or transition list could not be parsed.
#[derive(Debug, Error)]
#[error("failed to parse {field}")]
pub(crate) struct SerializationError {
    pub(crate) field: Field,
    #[source]
    pub(crate) source: serde_json::Error,
}

/// The row store could not append or read rows.
#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("Failed to save submission: {0}")]
    Append(String),

    #[error("Failed to read submissions: {0}")]
    Read(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Read(e.to_string())
    }
}

/// Media playback failure. Never blocks the form.
#[derive(Debug, Clone, PartialEq, Error)]
pub(crate) enum TransportError {
    #[error("transport is not ready")]
    NotReady,

    #[error("transport is unavailable: {0}")]
    Unavailable(String),
}
