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

//! Input handling for the range slider.
//!
//! Mouse input is translated to pointer events. A press only counts when it
//! lands on the track row; once the slider holds pointer capture every drag,
//! move and release is taken, wherever it happens. The keyboard nudges the
//! focused handle.

use crossterm::event::{Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};

use crate::components::range_slider::{Handle, PointerEvent, RangeSlider, SliderEffect};

const NUDGE: f64 = 1.0;
const COARSE_NUDGE: f64 = 5.0;

impl RangeSlider {
    pub(crate) fn process_event(&mut self, event: &Event) -> Vec<SliderEffect> {
        match event {
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left)
                    if self.geometry().contains(mouse.column, mouse.row) =>
                {
                    self.press(mouse.column)
                }

                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved
                    if self.is_capturing() =>
                {
                    self.handle(PointerEvent::Move { x: mouse.column })
                }

                MouseEventKind::Up(_) if self.is_capturing() => self.handle(PointerEvent::Up),

                _ => vec![],
            },

            Event::Key(key) => {
                let delta = match (key.code, key.modifiers) {
                    (KeyCode::Left, KeyModifiers::SHIFT) | (KeyCode::Char('H'), _) => -COARSE_NUDGE,
                    (KeyCode::Right, KeyModifiers::SHIFT) | (KeyCode::Char('L'), _) => COARSE_NUDGE,
                    (KeyCode::Left, _) | (KeyCode::Char('h'), _) => -NUDGE,
                    (KeyCode::Right, _) | (KeyCode::Char('l'), _) => NUDGE,

                    (KeyCode::Char('['), _) => {
                        self.focused_handle = Handle::Start;
                        return vec![];
                    }
                    (KeyCode::Char(']'), _) => {
                        self.focused_handle = Handle::End;
                        return vec![];
                    }

                    _ => return vec![],
                };

                self.handle(PointerEvent::Nudge {
                    handle: self.focused_handle,
                    delta,
                })
            }

            _ => vec![],
        }
    }
}
