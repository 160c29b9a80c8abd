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

//! The "commission a mix" form view.
//!
//! The view wraps a [`MixForm`] with everything needed to edit it from the
//! keyboard: one text input per editable field, a focus cursor that walks
//! the visible fields in order, and the feedback from the last submission
//! attempt. Anything that needs the wider application (opening a preview,
//! posting the form) is handed back as a [`FormAction`].

mod event;
mod render;

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use tui_input::Input;

use crate::{
    error::Field,
    model::{
        DEFAULT_WINDOW, SongId,
        form::{MixForm, SongField},
    },
    preview::WindowEdit,
    submission::{MixFormData, SubmitMixState},
    util::youtube::{self, SourceInfo},
};

/// A focusable element of the form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Focus {
    Name,
    Email,
    Reason,
    SongHeader(SongId),
    SongUrl(SongId),
    SongSlider(SongId),
    SongNotes(SongId),
    /// The note for the transition into this song.
    Transition(SongId),
    AddSong,
    Submit,
}

impl Focus {
    pub(crate) fn is_text(&self) -> bool {
        matches!(
            self,
            Focus::Name
                | Focus::Email
                | Focus::Reason
                | Focus::SongUrl(_)
                | Focus::SongNotes(_)
                | Focus::Transition(_)
        )
    }
}

/// Requests the form makes of the application.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FormAction {
    /// The expanded song or its source changed; the live preview must be
    /// brought in line with the form.
    SyncPreview,
    ToggleWaveform(SongId),
    Submit(MixFormData),
}

/// Feedback shown under the form.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Banner {
    pub(crate) success: bool,
    pub(crate) text: String,
}

pub(crate) struct MixFormView {
    pub(crate) form: MixForm,
    inputs: HashMap<Focus, Input>,
    pub(crate) focus: Focus,
    pub(crate) field_errors: BTreeMap<Field, String>,
    pub(crate) banner: Option<Banner>,
    pub(crate) submitting: bool,
}

impl Default for MixFormView {
    fn default() -> Self {
        Self::new()
    }
}

impl MixFormView {
    pub(crate) fn new() -> Self {
        Self {
            form: MixForm::new(),
            inputs: HashMap::new(),
            focus: Focus::Name,
            field_errors: BTreeMap::new(),
            banner: None,
            submitting: false,
        }
    }

    /// Focusable elements in display order. Collapsed songs only expose
    /// their header, and the slider only appears once the link is valid.
    pub(crate) fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Name, Focus::Email, Focus::Reason];

        let songs = self.form.songs();
        for (i, song) in songs.iter().enumerate() {
            order.push(Focus::SongHeader(song.id.clone()));
            if song.is_expanded {
                order.push(Focus::SongUrl(song.id.clone()));
                if youtube::extract_video_id(&song.source_url).is_some() {
                    order.push(Focus::SongSlider(song.id.clone()));
                }
                order.push(Focus::SongNotes(song.id.clone()));
            }
            if let Some(next) = songs.get(i + 1) {
                order.push(Focus::Transition(next.id.clone()));
            }
        }

        order.push(Focus::AddSong);
        order.push(Focus::Submit);
        order
    }

    pub(crate) fn focus_next(&mut self) -> Option<FormAction> {
        self.move_focus(1)
    }

    pub(crate) fn focus_previous(&mut self) -> Option<FormAction> {
        self.move_focus(-1)
    }

    fn move_focus(&mut self, step: isize) -> Option<FormAction> {
        let order = self.focus_order();
        let len = order.len() as isize;
        let current = order.iter().position(|f| f == &self.focus).unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;

        self.set_focus(order[next].clone())
    }

    /// Moves focus, committing a song link when focus leaves it.
    pub(crate) fn set_focus(&mut self, focus: Focus) -> Option<FormAction> {
        let left = std::mem::replace(&mut self.focus, focus);
        match left {
            Focus::SongUrl(id) if self.focus != Focus::SongUrl(id.clone()) => self.commit_url(&id),
            _ => None,
        }
    }

    /// Applies the `t`/`start` and `end` parameters of a committed link to
    /// the song window.
    ///
    /// A missing end, or one not after the start, gives a window of the
    /// default length. A window that still would not be ordered is ignored.
    fn commit_url(&mut self, id: &SongId) -> Option<FormAction> {
        let url = self.form.song(id)?.source_url.clone();
        let info = SourceInfo::parse(&url);

        if let Some(start) = info.start_time.filter(|t| t.is_finite()).map(|t| t.max(0.0).floor()) {
            let length = DEFAULT_WINDOW.1 - DEFAULT_WINDOW.0;
            let end = info
                .end_time
                .map(f64::floor)
                .filter(|end| end.is_finite() && *end > start)
                .unwrap_or(start + length);

            if end > start {
                self.form.update_song(id, SongField::StartTime(start));
                self.form.update_song(id, SongField::EndTime(end));
            }
        }

        Some(FormAction::SyncPreview)
    }

    /// Current text of a text field.
    pub(crate) fn text(&self, focus: &Focus) -> String {
        if let Some(input) = self.inputs.get(focus) {
            return input.value().to_string();
        }

        match focus {
            Focus::SongUrl(id) => self.form.song(id).map(|s| s.source_url.clone()),
            Focus::SongNotes(id) => self.form.song(id).map(|s| s.notes.clone()),
            Focus::Transition(id) => self
                .form
                .transitions()
                .iter()
                .find(|t| t.id.song_id() == id)
                .map(|t| t.content.clone()),
            _ => None,
        }
        .unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn input(&self, focus: &Focus) -> Option<&Input> {
        self.inputs.get(focus)
    }

    fn input_mut(&mut self, focus: &Focus) -> &mut Input {
        let value = self.text(focus);
        self.inputs
            .entry(focus.clone())
            .or_insert_with(|| Input::new(value))
    }

    /// Copies an edited input back into the form.
    fn write_back(&mut self, focus: &Focus) {
        let value = self.text(focus);
        match focus {
            Focus::SongUrl(id) => self.form.update_song(id, SongField::SourceUrl(value)),
            Focus::SongNotes(id) => self.form.update_song(id, SongField::Notes(value)),
            Focus::Transition(id) => self.form.set_transition(id, value),
            _ => {}
        }
    }

    pub(crate) fn expand(&mut self, id: &SongId) -> Option<FormAction> {
        self.form.expand(id);
        self.focus = Focus::SongHeader(id.clone());
        Some(FormAction::SyncPreview)
    }

    pub(crate) fn add_song(&mut self) -> Option<FormAction> {
        let id = self.form.add_song();
        self.focus = Focus::SongUrl(id);
        Some(FormAction::SyncPreview)
    }

    pub(crate) fn remove_song(&mut self, id: &SongId) -> Option<FormAction> {
        if !self.form.remove_song(id) {
            return None;
        }

        self.inputs.retain(|focus, _| match focus {
            Focus::SongUrl(s) | Focus::SongNotes(s) | Focus::Transition(s) => s != id,
            _ => true,
        });
        self.focus = Focus::AddSong;

        Some(FormAction::SyncPreview)
    }

    pub(crate) fn toggle_waveform(&mut self, id: &SongId) -> Option<FormAction> {
        let show = !self.form.song(id)?.show_waveform;
        self.form.update_song(id, SongField::ShowWaveform(show));
        Some(FormAction::ToggleWaveform(id.clone()))
    }

    pub(crate) fn apply_window_edits(&mut self, id: &SongId, edits: &[WindowEdit]) {
        for edit in edits {
            match *edit {
                WindowEdit::Start(v) => self.form.update_song(id, SongField::StartTime(v)),
                WindowEdit::End(v) => self.form.update_song(id, SongField::EndTime(v)),
            }
        }
    }

    /// Serializes the form the way it is posted.
    pub(crate) fn form_data(&self) -> Result<MixFormData> {
        Ok(MixFormData {
            name: self.text(&Focus::Name),
            email: self.text(&Focus::Email),
            reason: self.text(&Focus::Reason),
            songs: self.form.songs_json()?,
            transitions: self.form.transitions_json()?,
        })
    }

    /// Starts a submission unless one is already in flight.
    pub(crate) fn begin_submit(&mut self) -> Result<Option<FormAction>> {
        if self.submitting {
            return Ok(None);
        }

        let data = self.form_data()?;
        self.submitting = true;
        self.banner = None;

        Ok(Some(FormAction::Submit(data)))
    }

    /// Records the outcome of the submission in flight. A successful
    /// submission clears the form.
    pub(crate) fn finish_submit(&mut self, state: &SubmitMixState) {
        if state.success {
            *self = Self::new();
        }

        self.submitting = false;
        self.field_errors = state.field_errors.clone();
        self.banner = Some(Banner {
            success: state.success,
            text: state.message.clone(),
        });
    }

    /// The song holding the focus, or else the expanded one.
    pub(crate) fn current_song(&self) -> Option<SongId> {
        match &self.focus {
            Focus::SongHeader(id) | Focus::SongUrl(id) | Focus::SongSlider(id) | Focus::SongNotes(id) => {
                Some(id.clone())
            }
            _ => self.form.expanded().map(|s| s.id.clone()),
        }
    }

    pub(crate) fn url_status(&self, id: &SongId) -> Option<youtube::UrlStatus> {
        let song = self.form.song(id)?;
        (!song.source_url.is_empty()).then(|| youtube::url_status(&song.source_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(view: &mut MixFormView, focus: Focus, text: &str) {
        view.set_focus(focus.clone());
        *view.input_mut(&focus) = Input::new(text.to_string());
        view.write_back(&focus);
    }

    #[test]
    fn focus_walks_the_visible_fields() {
        let mut view = MixFormView::new();
        let first = view.form.songs()[0].id.clone();
        view.add_song();
        let second = view.form.songs()[1].id.clone();

        assert_eq!(
            view.focus_order(),
            vec![
                Focus::Name,
                Focus::Email,
                Focus::Reason,
                Focus::SongHeader(first),
                Focus::Transition(second.clone()),
                Focus::SongHeader(second.clone()),
                Focus::SongUrl(second.clone()),
                Focus::SongNotes(second),
                Focus::AddSong,
                Focus::Submit,
            ]
        );
    }

    #[test]
    fn focus_wraps_around() {
        let mut view = MixFormView::new();
        view.focus_previous();
        assert_eq!(view.focus, Focus::Submit);
        view.focus_next();
        assert_eq!(view.focus, Focus::Name);
    }

    #[test]
    fn the_slider_is_focusable_once_the_link_is_valid() {
        let mut view = MixFormView::new();
        let id = view.form.songs()[0].id.clone();
        type_text(&mut view, Focus::SongUrl(id.clone()), "https://youtu.be/dQw4w9WgXcQ");

        assert!(view.focus_order().contains(&Focus::SongSlider(id)));
    }

    #[test]
    fn leaving_a_link_applies_its_time_parameters() {
        let mut view = MixFormView::new();
        let id = view.form.songs()[0].id.clone();
        type_text(
            &mut view,
            Focus::SongUrl(id.clone()),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1m30s",
        );

        assert_eq!(view.focus_next(), Some(FormAction::SyncPreview));
        let song = view.form.song(&id).unwrap();
        assert_eq!((song.start_time, song.end_time), (90.0, 120.0));
    }

    fn commit_link(view: &mut MixFormView, id: &SongId, url: &str) -> (f64, f64) {
        type_text(view, Focus::SongUrl(id.clone()), url);
        view.focus_next();
        let song = view.form.song(id).unwrap();
        (song.start_time, song.end_time)
    }

    #[test]
    fn link_time_parameters_keep_the_window_ordered() {
        let mut view = MixFormView::new();
        let id = view.form.songs()[0].id.clone();
        let base = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

        assert_eq!(commit_link(&mut view, &id, &format!("{base}&t=-50")), (0.0, 30.0));
        assert_eq!(commit_link(&mut view, &id, &format!("{base}&t=40&end=nan")), (40.0, 70.0));
        assert_eq!(commit_link(&mut view, &id, &format!("{base}&t=10.2&end=10.7")), (10.0, 40.0));

        // Unusable values leave the last window alone.
        assert_eq!(commit_link(&mut view, &id, &format!("{base}&t=inf&end=inf")), (10.0, 40.0));
        assert_eq!(commit_link(&mut view, &id, &format!("{base}&t=1e300")), (10.0, 40.0));
    }

    #[test]
    fn edits_reach_the_transition_list() {
        let mut view = MixFormView::new();
        view.add_song();
        let second = view.form.songs()[1].id.clone();
        type_text(&mut view, Focus::Transition(second), "drop on the beat");

        assert_eq!(
            view.form.transition_after(0).map(|t| t.content.as_str()),
            Some("drop on the beat")
        );
    }

    #[test]
    fn only_one_submission_is_in_flight() {
        let mut view = MixFormView::new();
        type_text(&mut view, Focus::Name, "Ada");

        let Some(FormAction::Submit(data)) = view.begin_submit().unwrap() else {
            panic!("expected a submission");
        };
        assert_eq!(data.name, "Ada");
        assert!(view.begin_submit().unwrap().is_none());

        view.finish_submit(&SubmitMixState {
            success: false,
            message: "Please fix the errors below.".to_string(),
            field_errors: BTreeMap::from([(Field::Email, "Email is required.".to_string())]),
            submission_id: None,
        });
        assert!(!view.submitting);
        assert_eq!(view.text(&Focus::Name), "Ada");
        assert!(view.field_errors.contains_key(&Field::Email));
    }

    #[test]
    fn a_successful_submission_resets_the_form() {
        let mut view = MixFormView::new();
        type_text(&mut view, Focus::Name, "Ada");
        view.add_song();
        view.begin_submit().unwrap();

        view.finish_submit(&SubmitMixState {
            success: true,
            message: "Your mix has been submitted!".to_string(),
            field_errors: BTreeMap::new(),
            submission_id: Some("sub-1".to_string()),
        });

        assert_eq!(view.text(&Focus::Name), "");
        assert_eq!(view.form.songs().len(), 1);
        assert!(view.banner.as_ref().is_some_and(|b| b.success));
    }

    #[test]
    fn current_song_follows_focus_then_expansion() {
        let mut view = MixFormView::new();
        let first = view.form.songs()[0].id.clone();
        view.add_song();
        let second = view.form.songs()[1].id.clone();

        assert_eq!(view.current_song(), Some(second.clone()));
        view.set_focus(Focus::SongHeader(first.clone()));
        assert_eq!(view.current_song(), Some(first));
        view.set_focus(Focus::Submit);
        assert_eq!(view.current_song(), Some(second));
    }

    #[test]
    fn removing_a_song_forgets_its_inputs() {
        let mut view = MixFormView::new();
        view.add_song();
        let second = view.form.songs()[1].id.clone();
        type_text(&mut view, Focus::SongNotes(second.clone()), "notes");

        assert_eq!(view.remove_song(&second), Some(FormAction::SyncPreview));
        assert!(view.input(&Focus::SongNotes(second)).is_none());
        assert!(view.form.transitions().is_empty());
        let last = view.form.songs()[0].id.clone();
        assert_eq!(view.remove_song(&last), None);
    }
}
