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

//! Key handling for the submissions browser.

use crossterm::event::{Event, KeyCode};

use crate::components::submissions::{SubmissionsAction, SubmissionsView};

impl SubmissionsView {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<SubmissionsAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.goto_next(),
            KeyCode::Char('k') | KeyCode::Up => self.goto_previous(),
            KeyCode::Char('g') => self.goto_first(),
            KeyCode::Char('G') => self.goto_last(),

            KeyCode::Char('r') => return Some(SubmissionsAction::Refresh),

            KeyCode::Enter => {
                return self
                    .selected()
                    .map(|s| SubmissionsAction::Open(s.submission_id.clone()));
            }

            KeyCode::Esc => self.detail = None,

            _ => {}
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::components::submissions::tests::stored;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn enter_opens_the_selected_submission() {
        let mut view = SubmissionsView::new();
        assert_eq!(view.process_event(&key(KeyCode::Enter)), None);

        view.set_submissions(vec![stored("a", 2), stored("b", 1)]);
        view.process_event(&key(KeyCode::Char('j')));

        assert_eq!(
            view.process_event(&key(KeyCode::Enter)),
            Some(SubmissionsAction::Open("b".to_string()))
        );
        assert_eq!(view.process_event(&key(KeyCode::Char('r'))), Some(SubmissionsAction::Refresh));
    }
}
