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

//! Best-effort waveform panel.
//!
//! Drawing a real waveform needs decoded audio, which streamed sources do
//! not give us. The panel therefore never fails a preview: it settles on a
//! placeholder explaining why nothing is drawn.

use std::path::Path;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::debug;

use crate::{render::Render, theme::Theme};

const REMOTE_SOURCE: &str = "Audio extraction from streamed sources requires server-side processing";
const INIT_FAILED: &str = "Failed to initialize audio visualization";
const NOT_SUPPORTED: &str = "Waveform preview is not available for this source";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum WaveformState {
    /// The source cannot be visualised; the message says why.
    Placeholder(&'static str),
    Failed(&'static str),
}

pub(crate) struct WaveformPanel {
    state: WaveformState,
}

impl WaveformPanel {
    pub(crate) fn init(source: &str) -> Self {
        let state = if is_remote(source) {
            WaveformState::Placeholder(REMOTE_SOURCE)
        } else if Path::new(source).is_file() {
            WaveformState::Placeholder(NOT_SUPPORTED)
        } else {
            WaveformState::Failed(INIT_FAILED)
        };

        debug!(?state, "waveform panel initialised");
        Self { state }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &WaveformState {
        &self.state
    }
}

fn is_remote(source: &str) -> bool {
    let source = source.trim().to_ascii_lowercase();
    source.starts_with("http://") || source.starts_with("https://") || source.starts_with("ytdl://")
}

impl Render for WaveformPanel {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let (message, colour) = match &self.state {
            WaveformState::Placeholder(message) => (*message, theme.muted_colour),
            WaveformState::Failed(message) => (*message, theme.warning_colour),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_colour))
            .title(" Waveform ");

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(colour))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);

        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streamed_sources_show_a_placeholder() {
        let panel = WaveformPanel::init("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(panel.state(), &WaveformState::Placeholder(REMOTE_SOURCE));
    }

    #[test]
    fn local_files_are_not_visualised() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let panel = WaveformPanel::init(file.path().to_str().unwrap());
        assert_eq!(panel.state(), &WaveformState::Placeholder(NOT_SUPPORTED));
    }

    #[test]
    fn unreadable_sources_degrade_to_a_failure_message() {
        let panel = WaveformPanel::init("/definitely/not/here.ogg");
        assert_eq!(panel.state(), &WaveformState::Failed(INIT_FAILED));
    }
}
