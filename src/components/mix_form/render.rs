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

//! Rendering for the form view.
//!
//! The form is taller than most terminals, so it is laid out as a column of
//! sections and scrolled just far enough to keep the focused section on
//! screen. The live preview, when there is one, is drawn inside the card of
//! the expanded song.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    components::mix_form::{Focus, MixFormView},
    error::Field,
    model::SongEntry,
    preview::{MediaTransport, Preview},
    render::{
        Render,
        icons::{ICON_INVALID, ICON_PAUSE, ICON_PENDING, ICON_PLAY, ICON_VALID},
    },
    theme::Theme,
    util::{format::format_time, youtube::UrlStatus},
};

const FIELD_HEIGHT: u16 = 3;
const COLLAPSED_HEIGHT: u16 = 3;
const PREVIEW_HEIGHT: u16 = 4;
const WAVEFORM_HEIGHT: u16 = 3;
const ACTIONS_HEIGHT: u16 = 3;

#[derive(Clone, Copy, Debug)]
enum Section {
    Name,
    Email,
    Reason,
    ListErrors,
    Song(usize),
    Transition(usize),
    Actions,
}

impl MixFormView {
    pub(crate) fn draw<T: MediaTransport>(
        &mut self,
        f: &mut Frame,
        area: Rect,
        theme: &Theme,
        mut preview: Option<&mut Preview<T>>,
    ) {
        let sections = self.sections(preview.as_deref());

        let focused = sections
            .iter()
            .position(|(section, _)| self.section_has_focus(*section))
            .unwrap_or(0);

        // Scroll only as far as needed to bring the focused section into view.
        let mut top = 0;
        while top < focused
            && sections[top..=focused].iter().map(|(_, h)| *h).sum::<u16>() > area.height
        {
            top += 1;
        }

        let mut y = area.y;
        for (section, height) in &sections[top..] {
            if y + height > area.y + area.height {
                break;
            }
            let rect = Rect::new(area.x, y, area.width, *height);
            y += height;

            match *section {
                Section::Name => self.draw_text_field(f, rect, theme, &Focus::Name, "Name", Some(Field::Name)),
                Section::Email => self.draw_text_field(f, rect, theme, &Focus::Email, "Email", Some(Field::Email)),
                Section::Reason => self.draw_text_field(
                    f,
                    rect,
                    theme,
                    &Focus::Reason,
                    "What's the mix for?",
                    Some(Field::Reason),
                ),
                Section::ListErrors => self.draw_list_errors(f, rect, theme),
                Section::Song(i) => self.draw_song(f, rect, theme, i, preview.as_deref_mut()),
                Section::Transition(i) => self.draw_transition(f, rect, theme, i),
                Section::Actions => self.draw_actions(f, rect, theme),
            }
        }
    }

    fn sections<T: MediaTransport>(&self, preview: Option<&Preview<T>>) -> Vec<(Section, u16)> {
        let mut sections = vec![
            (Section::Name, FIELD_HEIGHT),
            (Section::Email, FIELD_HEIGHT),
            (Section::Reason, FIELD_HEIGHT),
        ];

        if self.field_errors.contains_key(&Field::Songs)
            || self.field_errors.contains_key(&Field::Transitions)
        {
            sections.push((Section::ListErrors, 1));
        }

        let songs = self.form.songs();
        for (i, song) in songs.iter().enumerate() {
            sections.push((Section::Song(i), self.song_height(song, preview)));
            if i + 1 < songs.len() {
                sections.push((Section::Transition(i), FIELD_HEIGHT));
            }
        }

        sections.push((Section::Actions, ACTIONS_HEIGHT));
        sections
    }

    fn song_height<T: MediaTransport>(&self, song: &SongEntry, preview: Option<&Preview<T>>) -> u16 {
        if !song.is_expanded {
            return COLLAPSED_HEIGHT;
        }

        let mut inner = FIELD_HEIGHT + 1 + FIELD_HEIGHT;
        if self.url_status(&song.id) == Some(UrlStatus::Valid) {
            inner += PREVIEW_HEIGHT;
            if preview.is_some_and(|p| p.waveform.is_some()) {
                inner += WAVEFORM_HEIGHT;
            }
        }
        inner + 2
    }

    fn section_has_focus(&self, section: Section) -> bool {
        let songs = self.form.songs();
        match (section, &self.focus) {
            (Section::Name, Focus::Name)
            | (Section::Email, Focus::Email)
            | (Section::Reason, Focus::Reason) => true,
            (Section::Song(i), Focus::SongHeader(id) | Focus::SongUrl(id) | Focus::SongSlider(id) | Focus::SongNotes(id)) => {
                songs.get(i).is_some_and(|s| &s.id == id)
            }
            (Section::Transition(i), Focus::Transition(id)) => {
                songs.get(i + 1).is_some_and(|s| &s.id == id)
            }
            (Section::Actions, Focus::AddSong | Focus::Submit) => true,
            _ => false,
        }
    }

    fn border_style(&self, focused: bool, theme: &Theme) -> Style {
        if focused {
            Style::default().fg(theme.focus_colour)
        } else {
            Style::default().fg(theme.border_colour)
        }
    }

    fn draw_text_field(
        &mut self,
        f: &mut Frame,
        area: Rect,
        theme: &Theme,
        focus: &Focus,
        title: &str,
        error_field: Option<Field>,
    ) {
        let focused = &self.focus == focus;

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style(focused, theme))
            .title(format!(" {title} "));

        if let Some(error) = error_field.and_then(|field| self.field_errors.get(&field)) {
            block = block.title_bottom(
                Line::from(format!(" {error} ")).style(Style::default().fg(theme.error_colour)),
            );
        }

        let inner = block.inner(area);
        let width = inner.width.max(1) as usize;

        let (value, scroll, cursor) = if focused {
            let input = self.input_mut(focus);
            let scroll = input.visual_scroll(width);
            (input.value().to_string(), scroll, Some(input.visual_cursor()))
        } else {
            (self.text(focus), 0, None)
        };

        f.render_widget(
            Paragraph::new(value)
                .style(Style::default().fg(theme.text_colour))
                .scroll((0, scroll as u16))
                .block(block),
            area,
        );

        if let Some(cursor) = cursor {
            let x = inner.x + (cursor.max(scroll) - scroll) as u16;
            f.set_cursor_position((x, inner.y));
        }
    }

    fn draw_list_errors(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let text: Vec<&str> = [Field::Songs, Field::Transitions]
            .iter()
            .filter_map(|field| self.field_errors.get(field).map(String::as_str))
            .collect();

        f.render_widget(
            Paragraph::new(text.join("  "))
                .style(Style::default().fg(theme.error_colour))
                .block(Block::default().padding(Padding::horizontal(1))),
            area,
        );
    }

    fn draw_song<T: MediaTransport>(
        &mut self,
        f: &mut Frame,
        area: Rect,
        theme: &Theme,
        index: usize,
        preview: Option<&mut Preview<T>>,
    ) {
        let Some(song) = self.form.songs().get(index).cloned() else {
            return;
        };

        let header_focused = self.focus == Focus::SongHeader(song.id.clone());
        let can_remove = self.form.songs().len() > 1;

        let mut title = vec![Span::styled(
            format!(" Song {} ", index + 1),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if header_focused {
            let hint = if can_remove { "enter: expand  w: waveform  x: remove " } else { "enter: expand  w: waveform " };
            title.push(Span::styled(hint, Style::default().fg(theme.muted_colour)));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style(header_focused, theme))
            .title(Line::from(title));

        let inner = block.inner(area);
        f.render_widget(block, area);

        if !song.is_expanded {
            let link = if song.source_url.is_empty() { "No link yet" } else { song.source_url.as_str() };
            let summary = Line::from(vec![
                Span::styled(link, Style::default().fg(theme.text_colour)),
                Span::styled(
                    format!("  {} - {}", format_time(song.start_time), format_time(song.end_time)),
                    Style::default().fg(theme.muted_colour),
                ),
            ]);
            f.render_widget(Paragraph::new(summary), inner);
            return;
        }

        let status = self.url_status(&song.id);
        let preview_rows = match status {
            Some(UrlStatus::Valid) => {
                PREVIEW_HEIGHT
                    + if preview.as_ref().is_some_and(|p| p.waveform.is_some()) { WAVEFORM_HEIGHT } else { 0 }
            }
            _ => 0,
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Length(1),
                Constraint::Length(preview_rows),
                Constraint::Length(FIELD_HEIGHT),
            ])
            .split(inner);

        self.draw_text_field(f, rows[0], theme, &Focus::SongUrl(song.id.clone()), "YouTube link", None);

        let status_line = match status {
            Some(UrlStatus::Valid) => Span::styled(format!("{ICON_VALID} Valid link"), Style::default().fg(theme.success_colour)),
            Some(UrlStatus::Pending) => Span::styled(format!("{ICON_PENDING} Keep typing..."), Style::default().fg(theme.muted_colour)),
            Some(UrlStatus::Invalid) => Span::styled(format!("{ICON_INVALID} Not a YouTube link"), Style::default().fg(theme.error_colour)),
            None => Span::styled("Paste a YouTube link", Style::default().fg(theme.muted_colour)),
        };
        f.render_widget(Paragraph::new(Line::from(status_line)), rows[1]);

        if preview_rows > 0 {
            let slider_focused = self.focus == Focus::SongSlider(song.id.clone());
            match preview.filter(|p| p.song_id() == &song.id) {
                Some(preview) => draw_preview(f, rows[2], theme, preview, slider_focused),
                None => f.render_widget(
                    Paragraph::new("Preview unavailable").style(Style::default().fg(theme.muted_colour)),
                    rows[2],
                ),
            }
        }

        self.draw_text_field(f, rows[3], theme, &Focus::SongNotes(song.id.clone()), "Notes", None);
    }

    fn draw_transition(&mut self, f: &mut Frame, area: Rect, theme: &Theme, index: usize) {
        let Some(next) = self.form.songs().get(index + 1).map(|s| s.id.clone()) else {
            return;
        };
        let title = format!("Transition: song {} into song {}", index + 1, index + 2);
        self.draw_text_field(f, area, theme, &Focus::Transition(next), &title, None);
    }

    fn draw_actions(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let button = |label: &str, focused: bool| {
            let style = if focused {
                Style::default().fg(theme.background_colour).bg(theme.focus_colour)
            } else {
                Style::default().fg(theme.accent_colour)
            };
            Span::styled(format!("[ {label} ]"), style)
        };

        let submit_label = if self.submitting { "Submitting..." } else { "Submit mix" };
        let buttons = Line::from(vec![
            button("+ Add song", self.focus == Focus::AddSong),
            Span::raw("  "),
            button(submit_label, self.focus == Focus::Submit),
        ]);
        f.render_widget(Paragraph::new(buttons).alignment(Alignment::Center), rows[1]);

        if let Some(banner) = &self.banner {
            let colour = if banner.success { theme.success_colour } else { theme.error_colour };
            f.render_widget(
                Paragraph::new(banner.text.as_str())
                    .style(Style::default().fg(colour))
                    .alignment(Alignment::Center),
                rows[2],
            );
        }
    }
}

fn draw_preview<T: MediaTransport>(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    preview: &mut Preview<T>,
    focused: bool,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let sync = preview.sync();
    if sync.is_ready() && sync.duration() > 0.0 {
        preview.slider.draw(f, rows[0], theme);
    } else {
        f.render_widget(
            Paragraph::new("Loading preview...")
                .style(Style::default().fg(theme.muted_colour))
                .alignment(Alignment::Center),
            rows[0],
        );
    }

    let sync = preview.sync();
    let icon = if sync.is_playing() { ICON_PAUSE } else { ICON_PLAY };
    let position = sync.position().unwrap_or(0.0);

    let mut controls = vec![
        Span::styled(format!(" {icon} "), Style::default().fg(theme.accent_colour)),
        Span::styled(
            format!("{} / {}", format_time(position), format_time(sync.duration())),
            Style::default().fg(theme.text_colour),
        ),
    ];
    if focused {
        controls.push(Span::styled(
            "   space: play/pause  [ ]: pick handle  left/right: nudge",
            Style::default().fg(theme.muted_colour),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(controls)), rows[1]);

    if let Some(waveform) = preview.waveform.as_mut() {
        waveform.draw(f, rows[2], theme);
    }
}
