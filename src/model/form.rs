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

//! The song and transition lists owned by one form session.
//!
//! Songs are kept in display order. Transition notes live in a separate list
//! and are tied to songs only through [`TransitionKey`], which names the song
//! a transition leads *into*. A note is created together with every song
//! except the first and removed together with its song.
//!
//! Removing a song from the middle leaves the note keyed to the song after it
//! in place, so that note now describes a different pair. Reordering is not
//! supported for the same reason.

use crate::model::{SongEntry, SongId, TransitionKey, TransitionNote};

/// An editable song field.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SongField {
    SourceUrl(String),
    StartTime(f64),
    EndTime(f64),
    Notes(String),
    ShowWaveform(bool),
}

#[derive(Debug)]
pub(crate) struct MixForm {
    songs: Vec<SongEntry>,
    transitions: Vec<TransitionNote>,
}

impl Default for MixForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MixForm {
    /// A new session starts with one expanded, empty song.
    pub(crate) fn new() -> Self {
        Self {
            songs: vec![SongEntry::new(SongId::generate())],
            transitions: vec![],
        }
    }

    pub(crate) fn songs(&self) -> &[SongEntry] {
        &self.songs
    }

    pub(crate) fn transitions(&self) -> &[TransitionNote] {
        &self.transitions
    }

    pub(crate) fn song(&self, id: &SongId) -> Option<&SongEntry> {
        self.songs.iter().find(|s| &s.id == id)
    }

    /// Appends a new song with the default window and makes it the only
    /// expanded one. Returns its id.
    pub(crate) fn add_song(&mut self) -> SongId {
        self.add_song_with_id(SongId::generate())
    }

    pub(crate) fn add_song_with_id(&mut self, id: SongId) -> SongId {
        let had_songs = !self.songs.is_empty();

        for song in self.songs.iter_mut() {
            song.is_expanded = false;
        }
        self.songs.push(SongEntry::new(id.clone()));

        if had_songs {
            self.transitions.push(TransitionNote::new(&id));
        }

        id
    }

    /// Removes a song and the transition leading into it.
    ///
    /// The last remaining song cannot be removed. Returns whether anything
    /// was removed.
    pub(crate) fn remove_song(&mut self, id: &SongId) -> bool {
        if self.songs.len() <= 1 {
            return false;
        }

        let before = self.songs.len();
        self.songs.retain(|s| &s.id != id);
        if self.songs.len() == before {
            return false;
        }

        let key = TransitionKey::into_song(id);
        self.transitions.retain(|t| t.id != key);

        true
    }

    pub(crate) fn update_song(&mut self, id: &SongId, field: SongField) {
        let Some(song) = self.songs.iter_mut().find(|s| &s.id == id) else {
            return;
        };

        match field {
            SongField::SourceUrl(url) => song.source_url = url,
            SongField::StartTime(t) => song.start_time = t,
            SongField::EndTime(t) => song.end_time = t,
            SongField::Notes(notes) => song.notes = notes,
            SongField::ShowWaveform(show) => song.show_waveform = show,
        }
    }

    /// Expands exactly one song, collapsing all the others.
    pub(crate) fn expand(&mut self, id: &SongId) {
        for song in self.songs.iter_mut() {
            song.is_expanded = &song.id == id;
        }
    }

    pub(crate) fn expanded(&self) -> Option<&SongEntry> {
        self.songs.iter().find(|s| s.is_expanded)
    }

    /// The transition shown between song `index` and the one after it.
    pub(crate) fn transition_after(&self, index: usize) -> Option<&TransitionNote> {
        let next = self.songs.get(index + 1)?;
        let key = TransitionKey::into_song(&next.id);
        self.transitions.iter().find(|t| t.id == key)
    }

    /// Sets the content of the transition leading into `into`, creating the
    /// note if a previous removal left the pair without one.
    pub(crate) fn set_transition(&mut self, into: &SongId, content: String) {
        let key = TransitionKey::into_song(into);
        match self.transitions.iter_mut().find(|t| t.id == key) {
            Some(note) => note.content = content,
            None => self.transitions.push(TransitionNote { id: key, content }),
        }
    }

    /// Serializes the song list as it is handed to the submission entry
    /// point.
    pub(crate) fn songs_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.songs)
    }

    pub(crate) fn transitions_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.transitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(ids: &[&str]) -> MixForm {
        let mut form = MixForm {
            songs: vec![],
            transitions: vec![],
        };
        for id in ids {
            form.add_song_with_id(SongId::from(*id));
        }
        form
    }

    #[test]
    fn new_form_has_one_expanded_song_with_default_window() {
        let form = MixForm::new();
        assert_eq!(form.songs().len(), 1);
        let song = &form.songs()[0];
        assert!(song.is_expanded);
        assert_eq!((song.start_time, song.end_time), (0.0, 30.0));
        assert!(form.transitions().is_empty());
    }

    #[test]
    fn adding_songs_pairs_transitions_with_the_new_song() {
        let form = form_with(&["a", "b", "c"]);

        let keys: Vec<String> = form.transitions().iter().map(|t| t.id.to_string()).collect();
        assert_eq!(keys, vec!["transition-b", "transition-c"]);

        let expanded: Vec<bool> = form.songs().iter().map(|s| s.is_expanded).collect();
        assert_eq!(expanded, vec![false, false, true]);
    }

    #[test]
    fn removing_a_song_drops_its_incoming_transition() {
        let mut form = form_with(&["a", "b", "c"]);
        assert!(form.remove_song(&SongId::from("b")));

        let keys: Vec<String> = form.transitions().iter().map(|t| t.id.to_string()).collect();
        assert_eq!(keys, vec!["transition-c"]);
        assert_eq!(form.songs().len(), 2);
    }

    #[test]
    fn the_last_song_cannot_be_removed() {
        let mut form = form_with(&["a"]);
        assert!(!form.remove_song(&SongId::from("a")));
        assert!(!form.remove_song(&SongId::from("missing")));
        assert_eq!(form.songs().len(), 1);
    }

    #[test]
    fn transition_after_looks_up_the_next_song() {
        let mut form = form_with(&["a", "b"]);
        form.set_transition(&SongId::from("b"), "crossfade".to_string());

        assert_eq!(form.transition_after(0).map(|t| t.content.as_str()), Some("crossfade"));
        assert!(form.transition_after(1).is_none());
    }

    #[test]
    fn set_transition_recreates_a_missing_note() {
        let mut form = form_with(&["a", "b"]);
        form.transitions.clear();
        form.set_transition(&SongId::from("b"), "cut".to_string());
        assert_eq!(form.transition_after(0).map(|t| t.content.as_str()), Some("cut"));
        assert_eq!(form.transitions().len(), 1);
    }

    #[test]
    fn removing_the_first_song_keeps_the_following_pairs() {
        let mut form = form_with(&["a", "b", "c"]);
        form.remove_song(&SongId::from("a"));
        assert_eq!(form.transition_after(0).map(|t| t.id.to_string()).as_deref(), Some("transition-c"));
    }

    #[test]
    fn updates_only_the_addressed_song() {
        let mut form = form_with(&["a", "b"]);
        form.update_song(&SongId::from("a"), SongField::StartTime(5.0));
        form.update_song(&SongId::from("a"), SongField::Notes("intro".to_string()));

        assert_eq!(form.songs()[0].start_time, 5.0);
        assert_eq!(form.songs()[0].notes, "intro");
        assert_eq!(form.songs()[1].start_time, 0.0);
    }

    #[test]
    fn expand_collapses_the_others() {
        let mut form = form_with(&["a", "b"]);
        form.expand(&SongId::from("a"));
        assert_eq!(form.expanded().map(|s| s.id.as_str()), Some("a"));
    }

    #[test]
    fn serializes_lists_for_submission() {
        let form = form_with(&["a", "b"]);
        let songs = form.songs_json().unwrap();
        assert!(songs.contains(r#""youtubeUrl":"""#));
        assert!(songs.contains(r#""startTime":0.0"#));
        assert_eq!(
            form.transitions_json().unwrap(),
            r#"[{"id":"transition-b","content":""}]"#
        );
    }
}
