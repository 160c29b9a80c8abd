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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every application event to provide a reactive user interface.

mod commander;
pub(crate) mod icons;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{App, MainView, render::commander::draw_commander, theme::Theme};

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

const TABS: [(MainView, &str); 3] = [
    (MainView::Form, "1 New mix"),
    (MainView::Submissions, "2 Submissions"),
    (MainView::Success, "3 Last submission"),
];

/// Renders the user interface to the terminal frame.
///
/// The screen is split into a header with the view tabs, the active view,
/// a status line for errors and hints, and the command line.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let theme = app.theme;

    f.render_widget(Block::default().style(Style::default().bg(theme.background_colour)), area);

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, outer[0], app.main_view, &theme);

    match app.main_view {
        MainView::Form => app.form_view.draw(f, outer[1], &theme, app.preview.as_mut()),
        MainView::Submissions => app.submissions_view.draw(f, outer[1], &theme),
        MainView::Success => app.success_view.draw(f, outer[1], &theme),
    }

    draw_status(f, outer[2], app, &theme);

    draw_commander(f, outer[3], &app.commander, &theme);
}

fn draw_header(f: &mut Frame, area: Rect, active: MainView, theme: &Theme) {
    let mut spans = vec![Span::styled(
        " mixcraft ",
        Style::default()
            .fg(theme.background_colour)
            .bg(theme.accent_colour)
            .add_modifier(Modifier::BOLD),
    )];

    for (view, label) in TABS {
        let style = if view == active {
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted_colour)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(label, style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let line = match &app.error {
        Some(error) => Line::from(Span::styled(format!(" {error}"), Style::default().fg(theme.error_colour))),
        None => Line::from(Span::styled(
            " tab: next field  :: command  ctrl+c: quit",
            Style::default().fg(theme.muted_colour),
        )),
    };

    f.render_widget(Paragraph::new(line), area);
}
