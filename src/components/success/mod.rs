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

//! Confirmation shown after a mix has been submitted.
//!
//! The view reads the handoff snapshot the task worker wrote, so it shows
//! exactly what was submitted without going back to the row store. With no
//! snapshot it says so and offers the way back to the form.

use std::path::Path;

use chrono::{DateTime, Utc};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::{
    handoff::HandoffSnapshot,
    render::{Render, icons::ICON_SUBMITTED},
    theme::Theme,
    util::format::format_time,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SuccessAction {
    NewMix,
    Browse,
}

pub(crate) struct SuccessView {
    snapshot: Option<HandoffSnapshot>,
    scroll: u16,
}

impl SuccessView {
    pub(crate) fn new() -> Self {
        Self {
            snapshot: None,
            scroll: 0,
        }
    }

    /// Re-reads the snapshot, dropping whatever was shown before.
    pub(crate) fn reload(&mut self, path: Option<&Path>, now: DateTime<Utc>) {
        self.snapshot = path.and_then(|p| HandoffSnapshot::read_from(p, now));
        self.scroll = 0;
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> Option<&HandoffSnapshot> {
        self.snapshot.as_ref()
    }

    pub(crate) fn process_event(&mut self, event: &Event) -> Option<SuccessAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Enter | KeyCode::Char('n') => Some(SuccessAction::NewMix),
            KeyCode::Char('l') => Some(SuccessAction::Browse),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            _ => None,
        }
    }

    fn lines(&self, theme: &Theme) -> Vec<Line<'_>> {
        let label = Style::default().fg(theme.muted_colour);
        let value = Style::default().fg(theme.text_colour);

        let Some(snapshot) = &self.snapshot else {
            return vec![
                Line::from(Span::styled("Nothing to show", value.add_modifier(Modifier::BOLD))),
                Line::from(""),
                Line::from(Span::styled(
                    "The last submission has expired or could not be read.",
                    label,
                )),
            ];
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{ICON_SUBMITTED} Thank you! Your mix request is in."),
                Style::default().fg(theme.success_colour).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![Span::styled("Reference  ", label), Span::styled(snapshot.submission_id.as_str(), value)]),
            Line::from(vec![Span::styled("Name       ", label), Span::styled(snapshot.name.as_str(), value)]),
            Line::from(vec![Span::styled("Email      ", label), Span::styled(snapshot.email.as_str(), value)]),
            Line::from(vec![Span::styled("For        ", label), Span::styled(snapshot.reason.as_str(), value)]),
        ];

        for (i, song) in snapshot.songs.iter().enumerate() {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(format!("Song {}  ", i + 1), Style::default().fg(theme.accent_colour)),
                Span::styled(song.source_url.as_str(), value),
            ]));
            lines.push(Line::from(Span::styled(
                format!("        {} - {}", format_time(song.start_time), format_time(song.end_time)),
                label,
            )));
            if !song.notes.is_empty() {
                lines.push(Line::from(Span::styled(format!("        {}", song.notes), value)));
            }
            if let Some(note) = snapshot.transition_after(i).filter(|t| !t.content.is_empty()) {
                lines.push(Line::from(Span::styled(
                    format!("        into song {}: {}", i + 2, note.content),
                    Style::default().fg(theme.focus_colour),
                )));
            }
        }

        lines
    }
}

impl Render for SuccessView {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::uniform(1))
            .title(" Submitted ")
            .title_bottom(
                Line::from(" enter: new mix  l: browse submissions ")
                    .style(Style::default().fg(theme.muted_colour))
                    .alignment(Alignment::Right),
            );

        f.render_widget(
            Paragraph::new(self.lines(theme))
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0))
                .block(block),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::{model::SongEntry, model::SongId};

    #[test]
    fn shows_the_snapshot_written_for_the_last_submission() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_submission.json");
        let now = Utc::now();

        let snapshot = HandoffSnapshot {
            submission_id: "sub-9".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            reason: "Gala".to_string(),
            songs: vec![SongEntry::new(SongId::from("a"))],
            transitions: vec![],
            created_at: now,
        };
        snapshot.write_to(&path).unwrap();

        let mut view = SuccessView::new();
        view.reload(Some(&path), now);
        assert_eq!(view.snapshot().map(|s| s.submission_id.as_str()), Some("sub-9"));

        view.reload(None, now);
        assert!(view.snapshot().is_none());
    }

    #[test]
    fn keys_lead_back_to_the_form_or_the_listing() {
        let mut view = SuccessView::new();
        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));

        assert_eq!(view.process_event(&key(KeyCode::Enter)), Some(SuccessAction::NewMix));
        assert_eq!(view.process_event(&key(KeyCode::Char('l'))), Some(SuccessAction::Browse));
        assert_eq!(view.process_event(&key(KeyCode::Char('j'))), None);
    }
}
