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

//! Rendering for the range slider.
//!
//! The track geometry is recorded here on every draw, which is why drawing
//! needs mutable access: pointer input is mapped against where the track was
//! last painted.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    components::range_slider::{Handle, RangeSlider, TrackGeometry},
    render::Render,
    theme::Theme,
    util::format::format_time,
};

const HANDLE: &str = "\u{25CF}";
const PLAYHEAD: &str = "\u{2502}";
const SELECTED: &str = "\u{2501}";
const UNSELECTED: &str = "\u{2500}";

impl Render for RangeSlider {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let props = self.props;

        let handle_style = |handle: Handle| {
            let style = Style::default().fg(theme.accent_colour);
            if handle == self.focused_handle {
                style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                style
            }
        };

        let labels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        f.render_widget(
            Paragraph::new(Span::styled(format_time(props.start_time), handle_style(Handle::Start))),
            labels[0],
        );
        f.render_widget(
            Paragraph::new(Span::styled(format_time(props.end_time), handle_style(Handle::End)))
                .alignment(Alignment::Right),
            labels[1],
        );

        let track = rows[1];
        self.geometry = TrackGeometry {
            left: track.x,
            width: track.width.saturating_sub(1),
            row: track.y,
        };
        let geometry = self.geometry;

        let start = geometry.column_of(props.start_time, &props);
        let end = geometry.column_of(props.end_time, &props);
        let playhead = props
            .current_position
            .map(|t| geometry.column_of(t, &props));

        let cells: Vec<Span> = (track.x..track.x.saturating_add(track.width))
            .map(|column| {
                if column == start || column == end {
                    Span::styled(HANDLE, Style::default().fg(theme.accent_colour))
                } else if Some(column) == playhead {
                    Span::styled(PLAYHEAD, Style::default().fg(theme.text_colour))
                } else if column > start && column < end {
                    Span::styled(SELECTED, Style::default().fg(theme.accent_colour))
                } else {
                    Span::styled(UNSELECTED, Style::default().fg(theme.gauge_track_colour))
                }
            })
            .collect();
        f.render_widget(Paragraph::new(Line::from(cells)), track);

        let duration = format!("Duration: {}", format_time(props.end_time - props.start_time));
        f.render_widget(
            Paragraph::new(duration)
                .style(Style::default().fg(theme.muted_colour))
                .alignment(Alignment::Center),
            rows[2],
        );
    }
}
