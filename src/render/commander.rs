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

//! The `:` command line on the bottom row.
//!
//! Closed, the row lists the commands there are. Open, it shows the prompt
//! and the text typed so far, scrolled to keep the cursor in view.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::{commander::Commander, theme::Theme};

const PROMPT: &str = ":";
const COMMAND_HINT: &str = "add  rm  waveform  submit  refresh  form  list  done  q";

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, commander: &Commander, theme: &Theme) {
    let [prompt_area, input_area] = Layout::horizontal([Constraint::Length(2), Constraint::Min(1)])
        .horizontal_margin(1)
        .areas(area);

    if !commander.active() {
        f.render_widget(
            Paragraph::new(COMMAND_HINT).style(Style::default().fg(theme.muted_colour)),
            input_area,
        );
        return;
    }

    let style = Style::default()
        .fg(theme.commander_colour)
        .bg(theme.gauge_track_colour);

    let scroll = commander.input.visual_scroll(input_area.width.max(1) as usize);

    f.render_widget(Paragraph::new(PROMPT).style(style), prompt_area);
    f.render_widget(
        Paragraph::new(commander.input.value())
            .style(style)
            .scroll((0, scroll as u16)),
        input_area,
    );

    let cursor = commander.input.visual_cursor().saturating_sub(scroll);
    f.set_cursor_position((input_area.x + cursor as u16, input_area.y));
}
