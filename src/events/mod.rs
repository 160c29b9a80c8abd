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

//! Application events and the main event loop.
//!
//! Every thread talks to the UI thread by sending an [`AppEvent`]: the
//! terminal input reader, the tick thread, the task worker, the mpv worker
//! of the live preview and its sampling loop. The loop below applies each
//! event to the [`App`] and redraws.
//!
//! # Organization
//!
//! * [`input`]: routes keyboard and mouse input to the command line and the
//!   active view.
//! * [`handlers`]: applies everything else, including the actions views
//!   hand back.

mod handlers;
mod input;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    commander::AppCommand,
    model::StoredSubmission,
    preview::TransportEvent,
    render::draw,
    submission::SubmitMixState,
};

use handlers::*;
use input::{process_key_event, process_mouse_event};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),

    Tick,

    /// Sampling tick for the preview of the given generation.
    PreviewSample(u64),
    /// Playback state from the mpv worker of the given preview generation.
    Transport {
        generation: u64,
        event: TransportEvent,
    },

    Command(AppCommand),

    SubmissionFinished(SubmitMixState),
    SubmissionsListed(Vec<StoredSubmission>),
    SubmissionLoaded(Option<StoredSubmission>),

    Error(String),

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::Mouse(mouse) => process_mouse_event(app, mouse)?,
            AppEvent::PreviewSample(generation) => handle_preview_sample(app, generation),
            AppEvent::Transport { generation, event } => handle_transport_event(app, generation, event),
            AppEvent::Command(command) => handle_command(app, command)?,
            AppEvent::SubmissionFinished(state) => handle_submission_finished(app, state),
            AppEvent::SubmissionsListed(submissions) => handle_submissions_listed(app, submissions),
            AppEvent::SubmissionLoaded(submission) => handle_submission_loaded(app, submission),
            AppEvent::Error(message) => handle_error(app, message),
            AppEvent::Tick | AppEvent::ExitApplication => {}
        }

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}
