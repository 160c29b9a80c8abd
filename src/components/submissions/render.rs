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

//! UI rendering for the submissions browser.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table, Wrap},
};

use crate::{
    components::submissions::SubmissionsView,
    model::StoredSubmission,
    render::Render,
    theme::Theme,
    util::format::format_time,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

impl Render for SubmissionsView {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.draw_table(f, columns[0], theme);
        self.draw_detail(f, columns[1], theme);
    }
}

impl SubmissionsView {
    fn draw_table(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_colour))
            .title(" Submissions ")
            .title_bottom(Line::from(" enter: open  r: refresh ").style(Style::default().fg(theme.muted_colour)));

        if self.submissions.is_empty() {
            let text = if self.loading { "Loading..." } else { "No submissions yet" };
            f.render_widget(
                Paragraph::new(text)
                    .style(Style::default().fg(theme.muted_colour))
                    .alignment(Alignment::Center)
                    .block(block),
                area,
            );
            return;
        }

        let rows = self.submissions.iter().map(|item| {
            let time = item.timestamp.format(TIMESTAMP_FORMAT).to_string();
            let short_id: String = item.submission_id.chars().take(8).collect();

            Row::new(vec![
                Cell::from(Line::from(time).style(Style::default().fg(theme.table_time_fg))),
                Cell::from(Line::from(item.record.name.as_str()).style(Style::default().fg(theme.table_name_fg))),
                Cell::from(Line::from(item.record.email.as_str()).style(Style::default().fg(theme.table_email_fg))),
                Cell::from(
                    Line::from(item.record.songs.len().to_string())
                        .style(Style::default().fg(theme.table_count_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(Line::from(short_id).style(Style::default().fg(theme.table_id_fg))),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(16),
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Length(5),
                Constraint::Length(8),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from("Submitted"),
                Cell::from("Name"),
                Cell::from("Email"),
                Cell::from(Line::from("Songs").alignment(Alignment::Right)),
                Cell::from("Id"),
            ])
            .style(Style::default().add_modifier(Modifier::BOLD).fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(theme.gauge_track_colour).fg(theme.text_colour))
        .block(block);

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_detail(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1))
            .title(" Details ");

        let lines = match &self.detail {
            Some(submission) => detail_lines(submission, theme),
            None => vec![Line::from(Span::styled(
                "Select a submission and press enter",
                Style::default().fg(theme.muted_colour),
            ))],
        };

        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
            area,
        );
    }
}

fn detail_lines<'a>(submission: &'a StoredSubmission, theme: &Theme) -> Vec<Line<'a>> {
    let label = Style::default().fg(theme.muted_colour);
    let value = Style::default().fg(theme.text_colour);
    let record = &submission.record;

    let mut lines = vec![
        Line::from(vec![Span::styled("Id       ", label), Span::styled(submission.submission_id.as_str(), value)]),
        Line::from(vec![
            Span::styled("Received ", label),
            Span::styled(submission.timestamp.format(TIMESTAMP_FORMAT).to_string(), value),
        ]),
        Line::from(vec![Span::styled("Name     ", label), Span::styled(record.name.as_str(), value)]),
        Line::from(vec![Span::styled("Email    ", label), Span::styled(record.email.as_str(), value)]),
        Line::from(vec![Span::styled("Purpose  ", label), Span::styled(record.purpose.as_str(), value)]),
    ];

    for (i, song) in record.songs.iter().enumerate() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", i + 1), Style::default().fg(theme.accent_colour)),
            Span::styled(song.source_url.as_str(), value.add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {} - {}", format_time(song.start_time), format_time(song.end_time)),
            label,
        )));
        if !song.song_notes.is_empty() {
            lines.push(Line::from(Span::styled(format!("   {}", song.song_notes), value)));
        }
        if !song.transition_notes.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("   then: {}", song.transition_notes),
                Style::default().fg(theme.focus_colour),
            )));
        }
    }

    lines
}
