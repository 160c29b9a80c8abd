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

//! The submission entry point.
//!
//! [`submit_mix`] is the single boundary between the form and storage. It
//! takes the raw contact fields plus the two serialized lists, and always
//! answers with a [`SubmitMixState`]; nothing it does can fail the caller.

pub(crate) mod assemble;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::{
    error::{Field, SerializationError, ValidationError, ValidationErrors},
    model::{SongEntry, TransitionNote},
    store::{RowStore, SubmissionStore},
    submission::assemble::{AssemblyInput, assemble, validate_contact},
};

pub(crate) const MSG_FIX_ERRORS: &str = "Please fix the errors below.";
pub(crate) const MSG_SUBMITTED: &str = "Your mix has been submitted!";

/// Raw form data as posted by the form view.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct MixFormData {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) reason: String,
    /// JSON array of songs.
    pub(crate) songs: String,
    /// JSON array of transition notes.
    pub(crate) transitions: String,
}

/// Outcome of one submission attempt.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SubmitMixState {
    pub(crate) success: bool,
    pub(crate) message: String,
    pub(crate) field_errors: BTreeMap<Field, String>,
    pub(crate) submission_id: Option<String>,
}

impl SubmitMixState {
    fn failed(message: impl Into<String>, field_errors: BTreeMap<Field, String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            field_errors,
            submission_id: None,
        }
    }

    fn submitted(submission_id: String) -> Self {
        Self {
            success: true,
            message: MSG_SUBMITTED.to_string(),
            field_errors: BTreeMap::new(),
            submission_id: Some(submission_id),
        }
    }
}

/// Empty or whitespace-only text is an empty list.
fn parse_list<T: DeserializeOwned>(field: Field, json: &str) -> Result<Vec<T>, SerializationError> {
    if json.trim().is_empty() {
        return Ok(vec![]);
    }
    serde_json::from_str(json).map_err(|source| SerializationError { field, source })
}

/// Validates, assembles and stores one submission.
pub(crate) fn submit_mix<R: RowStore>(
    store: &mut SubmissionStore<R>,
    data: &MixFormData,
) -> SubmitMixState {
    let mut errors = validate_contact(&data.name, &data.email, &data.reason);

    let songs: Vec<SongEntry> = parse_list(Field::Songs, &data.songs).unwrap_or_else(|e| {
        warn!(error = %e, "rejecting submission");
        errors.push(ValidationError::new(Field::Songs, "Invalid song data."));
        vec![]
    });

    let transitions: Vec<TransitionNote> = parse_list(Field::Transitions, &data.transitions)
        .unwrap_or_else(|e| {
            warn!(error = %e, "rejecting submission");
            errors.push(ValidationError::new(
                Field::Transitions,
                "Invalid transition data.",
            ));
            vec![]
        });

    if songs.is_empty() && !errors.contains(Field::Songs) {
        errors.push(ValidationError::new(
            Field::Songs,
            "Please add at least one song.",
        ));
    }

    if !errors.is_empty() {
        return rejected(errors);
    }

    let record = match assemble(AssemblyInput {
        name: &data.name,
        email: &data.email,
        reason: &data.reason,
        songs: &songs,
        transitions: &transitions,
    }) {
        Ok(record) => record,
        Err(errors) => return rejected(errors),
    };

    match store.save_submission(&record) {
        Ok(submission_id) => {
            info!(%submission_id, "mix submitted");
            SubmitMixState::submitted(submission_id)
        }
        Err(e) => {
            warn!(error = %e, "failed to store submission");
            SubmitMixState::failed(e.to_string(), BTreeMap::new())
        }
    }
}

fn rejected(errors: ValidationErrors) -> SubmitMixState {
    SubmitMixState::failed(MSG_FIX_ERRORS, errors.into_field_map())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::form::MixForm, store::testing::MemoryRowStore};

    fn form_data(form: &MixForm) -> MixFormData {
        MixFormData {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            reason: "Wedding first dance".to_string(),
            songs: form.songs_json().unwrap(),
            transitions: form.transitions_json().unwrap(),
        }
    }

    #[test]
    fn stores_a_valid_submission() {
        let mut form = MixForm::new();
        let second = form.add_song();
        form.set_transition(&second, "slow fade".to_string());

        let mut store = SubmissionStore::new(MemoryRowStore::default());
        let state = submit_mix(&mut store, &form_data(&form));

        assert!(state.success);
        assert_eq!(state.message, MSG_SUBMITTED);
        assert!(state.field_errors.is_empty());

        let id = state.submission_id.unwrap();
        let saved = store.get_submission(&id).unwrap().unwrap();
        assert_eq!(saved.record.songs.len(), 2);
        assert_eq!(saved.record.songs[0].transition_notes, "slow fade");
        assert_eq!(saved.record.songs[1].transition_notes, "");
    }

    #[test]
    fn reports_field_errors_without_storing() {
        let form = MixForm::new();
        let mut data = form_data(&form);
        data.email = "nope".to_string();
        data.reason = " ".to_string();

        let mut store = SubmissionStore::new(MemoryRowStore::default());
        let state = submit_mix(&mut store, &data);

        assert!(!state.success);
        assert_eq!(state.message, MSG_FIX_ERRORS);
        assert!(state.field_errors.contains_key(&Field::Email));
        assert!(state.field_errors.contains_key(&Field::Reason));
        assert!(state.submission_id.is_none());
        assert!(store.list_submissions().unwrap().is_empty());
    }

    #[test]
    fn malformed_lists_are_field_errors() {
        let mut data = form_data(&MixForm::new());
        data.songs = "{not json".to_string();
        data.transitions = r#"[{"id":"abc","content":"x"}]"#.to_string();

        let mut store = SubmissionStore::new(MemoryRowStore::default());
        let state = submit_mix(&mut store, &data);

        assert_eq!(
            state.field_errors.get(&Field::Songs).map(String::as_str),
            Some("Invalid song data.")
        );
        assert_eq!(
            state.field_errors.get(&Field::Transitions).map(String::as_str),
            Some("Invalid transition data.")
        );
    }

    #[test]
    fn an_empty_song_list_is_rejected() {
        let mut data = form_data(&MixForm::new());
        data.songs = "[]".to_string();
        data.transitions = String::new();

        let mut store = SubmissionStore::new(MemoryRowStore::default());
        let state = submit_mix(&mut store, &data);

        assert_eq!(
            state.field_errors.get(&Field::Songs).map(String::as_str),
            Some("Please add at least one song.")
        );
    }

    #[test]
    fn storage_failures_become_a_top_level_message() {
        let data = form_data(&MixForm::new());

        let mut store = SubmissionStore::new(MemoryRowStore::failing());
        let state = submit_mix(&mut store, &data);

        assert!(!state.success);
        assert!(state.message.starts_with("Failed to save submission"));
        assert!(state.field_errors.is_empty());
    }
}
