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

//! Command-line input logic and state management.
//!
//! This module implements the `:` command line. It owns a text input and,
//! when a command is submitted, parses it and dispatches the corresponding
//! application command event.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{MainView, events::AppEvent};

/// Commands that can be typed on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AppCommand {
    Quit,
    ShowView(MainView),
    AddSong,
    RemoveSong,
    ToggleWaveform,
    Submit,
    Refresh,
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Handles a key event, returning whether the command line consumed it.
    ///
    /// While inactive only `:` is consumed, and only when `may_activate`,
    /// so that text fields still receive it.
    pub(crate) fn handle_event(
        &mut self,
        event: &Event,
        may_activate: bool,
        event_tx: &Sender<AppEvent>,
    ) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if may_activate && key_event.code == KeyCode::Char(':') {
                self.active = true;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                if !buffer.is_empty() {
                    let event = match parse_command(&buffer) {
                        Some(command) => AppEvent::Command(command),
                        None => AppEvent::Error(format!("Unknown command: {buffer}")),
                    };
                    event_tx.send(event)?;
                }
            }

            // Delegate everything else to the managed input component.
            _ => {
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }
}

fn parse_command(buffer: &str) -> Option<AppCommand> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let command = match parts.as_slice() {
        ["q"] | ["quit"] => AppCommand::Quit,

        ["add"] => AppCommand::AddSong,
        ["rm"] => AppCommand::RemoveSong,
        ["waveform"] | ["wf"] => AppCommand::ToggleWaveform,
        ["submit"] => AppCommand::Submit,
        ["refresh"] => AppCommand::Refresh,

        ["form"] | ["1"] => AppCommand::ShowView(MainView::Form),
        ["list"] | ["2"] => AppCommand::ShowView(MainView::Submissions),
        ["done"] | ["3"] => AppCommand::ShowView(MainView::Success),

        _ => return None,
    };

    Some(command)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command("q"), Some(AppCommand::Quit));
        assert_eq!(parse_command("list"), Some(AppCommand::ShowView(MainView::Submissions)));
        assert_eq!(parse_command("rm"), Some(AppCommand::RemoveSong));
        assert_eq!(parse_command("rm 2"), None);
        assert_eq!(parse_command("launch"), None);
    }

    #[test]
    fn colon_activates_only_when_allowed() {
        let (tx, _rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(!commander.handle_event(&key(KeyCode::Char(':')), false, &tx).unwrap());
        assert!(!commander.active());

        assert!(commander.handle_event(&key(KeyCode::Char(':')), true, &tx).unwrap());
        assert!(commander.active());
    }

    #[test]
    fn enter_dispatches_the_typed_command() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        commander.handle_event(&key(KeyCode::Char(':')), true, &tx).unwrap();

        for c in "add".chars() {
            commander.handle_event(&key(KeyCode::Char(c)), true, &tx).unwrap();
        }
        commander.handle_event(&key(KeyCode::Enter), true, &tx).unwrap();

        assert!(!commander.active());
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Command(AppCommand::AddSong))));

        commander.handle_event(&key(KeyCode::Char(':')), true, &tx).unwrap();
        commander.handle_event(&key(KeyCode::Char('x')), true, &tx).unwrap();
        commander.handle_event(&key(KeyCode::Enter), true, &tx).unwrap();
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Error(_))));
    }
}
