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

//! Turns the form's two loosely coupled lists into one ordered record.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use crate::{
    error::{Field, ValidationError, ValidationErrors},
    model::{MixSong, SongEntry, SubmissionRecord, TransitionKey, TransitionNote},
};

// Shape check only: something@something.tld without whitespace.
static EMAIL_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Raw form values as they arrive at the submission boundary.
pub(crate) struct AssemblyInput<'a> {
    pub(crate) name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) reason: &'a str,
    pub(crate) songs: &'a [SongEntry],
    pub(crate) transitions: &'a [TransitionNote],
}

/// Checks the contact fields, producing one error per bad field.
pub(crate) fn validate_contact(name: &str, email: &str, reason: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if name.trim().is_empty() {
        errors.push(ValidationError::new(Field::Name, "Name is required."));
    }

    let email = email.trim();
    if email.is_empty() {
        errors.push(ValidationError::new(Field::Email, "Email is required."));
    } else if !is_email_shaped(email) {
        errors.push(ValidationError::new(
            Field::Email,
            "Please enter a valid email address.",
        ));
    }

    if reason.trim().is_empty() {
        errors.push(ValidationError::new(
            Field::Reason,
            "Please tell us the reason for the mix.",
        ));
    }

    errors
}

fn is_email_shaped(email: &str) -> bool {
    EMAIL_SHAPE.as_ref().is_some_and(|re| re.is_match(email))
}

/// Builds the submission record.
///
/// Song `i` carries the note keyed by song `i + 1`, i.e. the transition out
/// of it into the next song. The last song never has one. Duplicate note keys
/// resolve to the last one in the list.
///
/// # Errors
///
/// Returns every contact field problem, plus a [`Field::Songs`] error when
/// there are no songs. No record is produced in that case.
pub(crate) fn assemble(input: AssemblyInput<'_>) -> Result<SubmissionRecord, ValidationErrors> {
    let mut errors = validate_contact(input.name, input.email, input.reason);
    if input.songs.is_empty() {
        errors.push(ValidationError::new(
            Field::Songs,
            "Please add at least one song.",
        ));
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let notes: HashMap<&TransitionKey, &str> = input
        .transitions
        .iter()
        .map(|t| (&t.id, t.content.as_str()))
        .collect();

    let songs = input
        .songs
        .iter()
        .enumerate()
        .map(|(i, song)| {
            let transition_notes = input
                .songs
                .get(i + 1)
                .map(|next| TransitionKey::into_song(&next.id))
                .and_then(|key| notes.get(&key).copied())
                .unwrap_or_default()
                .to_string();

            MixSong {
                source_url: song.source_url.clone(),
                start_time: song.start_time,
                end_time: song.end_time,
                song_notes: song.notes.clone(),
                transition_notes,
            }
        })
        .collect();

    Ok(SubmissionRecord {
        name: input.name.trim().to_string(),
        email: input.email.trim().to_string(),
        purpose: input.reason.trim().to_string(),
        songs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SongId;

    fn song(id: &str) -> SongEntry {
        let mut song = SongEntry::new(SongId::from(id));
        song.source_url = format!("https://youtu.be/{id}");
        song
    }

    fn note(into: &str, content: &str) -> TransitionNote {
        TransitionNote {
            id: TransitionKey::into_song(&SongId::from(into)),
            content: content.to_string(),
        }
    }

    fn input<'a>(songs: &'a [SongEntry], transitions: &'a [TransitionNote]) -> AssemblyInput<'a> {
        AssemblyInput {
            name: " Ada ",
            email: "ada@example.com",
            reason: "Wedding",
            songs,
            transitions,
        }
    }

    #[test]
    fn attaches_the_outgoing_transition_to_each_song() {
        let songs = [song("A"), song("B"), song("C")];
        let transitions = [note("B", "fade"), note("C", "cut")];

        let record = assemble(input(&songs, &transitions)).unwrap();

        let notes: Vec<&str> = record.songs.iter().map(|s| s.transition_notes.as_str()).collect();
        assert_eq!(notes, vec!["fade", "cut", ""]);
    }

    #[test]
    fn keeps_song_order_and_fields() {
        let mut songs = [song("A"), song("B")];
        songs[1].start_time = 12.0;
        songs[1].end_time = 48.0;
        songs[1].notes = "skip the intro".to_string();

        let record = assemble(input(&songs, &[])).unwrap();

        assert_eq!(record.name, "Ada");
        assert_eq!(record.purpose, "Wedding");
        assert_eq!(record.songs[1].source_url, "https://youtu.be/B");
        assert_eq!(record.songs[1].start_time, 12.0);
        assert_eq!(record.songs[1].end_time, 48.0);
        assert_eq!(record.songs[1].song_notes, "skip the intro");
        assert!(record.songs.iter().all(|s| s.transition_notes.is_empty()));
    }

    #[test]
    fn last_duplicate_transition_wins() {
        let songs = [song("A"), song("B")];
        let transitions = [note("B", "first"), note("B", "second")];

        let record = assemble(input(&songs, &transitions)).unwrap();
        assert_eq!(record.songs[0].transition_notes, "second");
    }

    #[test]
    fn orphaned_transitions_are_ignored() {
        let songs = [song("A"), song("B")];
        let transitions = [note("A", "never used"), note("gone", "stale")];

        let record = assemble(input(&songs, &transitions)).unwrap();
        assert_eq!(record.songs[0].transition_notes, "");
        assert_eq!(record.songs[1].transition_notes, "");
    }

    #[test]
    fn rejects_an_empty_song_list() {
        let errors = assemble(input(&[], &[])).unwrap_err();
        assert!(errors.contains(Field::Songs));
    }

    #[test]
    fn reports_every_bad_contact_field() {
        let songs = [song("A")];
        let errors = assemble(AssemblyInput {
            name: "  ",
            email: "not-an-email",
            reason: "",
            songs: &songs,
            transitions: &[],
        })
        .unwrap_err();

        let fields = errors.into_field_map();
        assert_eq!(fields.get(&Field::Name).map(String::as_str), Some("Name is required."));
        assert_eq!(
            fields.get(&Field::Email).map(String::as_str),
            Some("Please enter a valid email address.")
        );
        assert!(fields.contains_key(&Field::Reason));
        assert!(!fields.contains_key(&Field::Songs));
    }

    #[test]
    fn email_shape_is_loose() {
        assert!(is_email_shaped("a@b.co"));
        assert!(is_email_shaped("first.last+tag@sub.example.org"));
        assert!(!is_email_shaped("a@b"));
        assert!(!is_email_shaped("a b@c.com"));
        assert!(!is_email_shaped("@c.com"));
    }
}
