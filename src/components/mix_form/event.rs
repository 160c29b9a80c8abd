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

//! Keyboard handling for the form view.
//!
//! Tab and BackTab always move focus. Text fields take every other key
//! except Enter, which also moves on. Elsewhere the keys act on the focused
//! element.

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::backend::crossterm::EventHandler;

use crate::components::mix_form::{Focus, FormAction, MixFormView};

impl MixFormView {
    pub(crate) fn process_event(&mut self, event: &Event) -> Result<Option<FormAction>> {
        let Event::Key(key) = event else {
            return Ok(None);
        };

        match key.code {
            KeyCode::Tab => return Ok(self.focus_next()),
            KeyCode::BackTab => return Ok(self.focus_previous()),
            _ => {}
        }

        let focus = self.focus.clone();

        if focus.is_text() {
            if key.code == KeyCode::Enter {
                return Ok(self.focus_next());
            }
            self.input_mut(&focus).handle_event(event);
            self.write_back(&focus);
            return Ok(None);
        }

        let action = match (&focus, key.code) {
            (Focus::SongHeader(id), KeyCode::Enter | KeyCode::Char(' ')) => self.expand(id),
            (Focus::SongHeader(id), KeyCode::Char('x') | KeyCode::Delete) => self.remove_song(id),
            (Focus::SongHeader(id), KeyCode::Char('w')) => self.toggle_waveform(id),

            (Focus::AddSong, KeyCode::Enter) => self.add_song(),
            (Focus::Submit, KeyCode::Enter) => self.begin_submit()?,

            (_, KeyCode::Down | KeyCode::Char('j')) => self.focus_next(),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.focus_previous(),

            _ => None,
        };

        Ok(action)
    }
}
