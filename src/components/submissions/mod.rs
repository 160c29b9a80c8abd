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

//! Browser for stored submissions.
//!
//! A table of every submission, most recent first, with a detail pane for
//! the one last opened. The listing and the details are fetched by the task
//! worker; this component only holds what it was given.

mod event;
mod render;

use ratatui::widgets::TableState;

use crate::model::StoredSubmission;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SubmissionsAction {
    Refresh,
    Open(String),
}

pub(crate) struct SubmissionsView {
    submissions: Vec<StoredSubmission>,
    table_state: TableState,
    detail: Option<StoredSubmission>,
    loading: bool,
}

impl SubmissionsView {
    pub(crate) fn new() -> Self {
        Self {
            submissions: vec![],
            table_state: TableState::new(),
            detail: None,
            loading: false,
        }
    }

    pub(crate) fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Replaces the listing, keeping the selection on the same submission
    /// when it is still present.
    pub(crate) fn set_submissions(&mut self, submissions: Vec<StoredSubmission>) {
        let selected_id = self.selected().map(|s| s.submission_id.clone());

        self.submissions = submissions;
        self.loading = false;

        let index = selected_id
            .and_then(|id| self.submissions.iter().position(|s| s.submission_id == id))
            .or(if self.submissions.is_empty() { None } else { Some(0) });
        self.table_state.select(index);
    }

    pub(crate) fn set_detail(&mut self, detail: Option<StoredSubmission>) {
        self.detail = detail;
    }

    pub(crate) fn selected(&self) -> Option<&StoredSubmission> {
        self.table_state.selected().and_then(|i| self.submissions.get(i))
    }

    fn goto_next(&mut self) {
        let len = self.submissions.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self) {
        let len = self.submissions.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self) {
        if !self.submissions.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self) {
        if !self.submissions.is_empty() {
            self.table_state.select(Some(self.submissions.len() - 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::model::SubmissionRecord;

    pub(super) fn stored(id: &str, hour: u32) -> StoredSubmission {
        StoredSubmission {
            submission_id: id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap(),
            record: SubmissionRecord {
                name: format!("name {id}"),
                email: format!("{id}@example.com"),
                purpose: "Party".to_string(),
                songs: vec![],
            },
        }
    }

    #[test]
    fn navigation_wraps_around() {
        let mut view = SubmissionsView::new();
        view.set_submissions(vec![stored("a", 3), stored("b", 2), stored("c", 1)]);
        assert_eq!(view.selected().map(|s| s.submission_id.as_str()), Some("a"));

        view.goto_previous();
        assert_eq!(view.selected().map(|s| s.submission_id.as_str()), Some("c"));
        view.goto_next();
        assert_eq!(view.selected().map(|s| s.submission_id.as_str()), Some("a"));
        view.goto_last();
        assert_eq!(view.selected().map(|s| s.submission_id.as_str()), Some("c"));
    }

    #[test]
    fn refresh_keeps_the_selected_submission() {
        let mut view = SubmissionsView::new();
        view.set_submissions(vec![stored("a", 3), stored("b", 2)]);
        view.goto_next();

        view.set_submissions(vec![stored("new", 4), stored("a", 3), stored("b", 2)]);
        assert_eq!(view.selected().map(|s| s.submission_id.as_str()), Some("b"));

        view.set_submissions(vec![]);
        assert!(view.selected().is_none());
    }
}
