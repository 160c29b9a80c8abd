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

//! The mpv-backed preview transport.
//!
//! [`MpvTransport`] implements [`MediaTransport`] as a command proxy: every
//! operation is sent to a background worker that owns the `libmpv` context,
//! so streaming never blocks the UI thread. The worker publishes what it
//! observes into a shared [`PlaybackStatus`], which answers position and
//! duration queries without a round trip, and raises state changes as
//! [`AppEvent::Transport`] events tagged with the preview generation they
//! belong to.
//!
//! Dropping the transport shuts the worker down and waits for it to exit.

mod commands;

use std::{
    sync::{Arc, Mutex, mpsc},
    thread::JoinHandle,
};

use tracing::debug;

use crate::{
    error::TransportError,
    events::AppEvent,
    model::Window,
    player::commands::PlayerCommand,
    preview::MediaTransport,
};

/// Last values observed by the worker.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct PlaybackStatus {
    pub(crate) time_pos: Option<f64>,
    pub(crate) duration: Option<f64>,
    pub(crate) paused: bool,
    pub(crate) loaded: bool,
}

/// A handle to one mpv playback worker.
pub(crate) struct MpvTransport {
    command_tx: mpsc::Sender<PlayerCommand>,
    status: Arc<Mutex<PlaybackStatus>>,
    worker: Option<JoinHandle<()>>,
}

impl MpvTransport {
    /// Spawns a worker whose events carry `generation`.
    pub(crate) fn new(generation: u64, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
        let status = Arc::new(Mutex::new(PlaybackStatus::default()));

        let worker =
            commands::spawn_player_worker(generation, command_rx, Arc::clone(&status), event_tx);

        Self {
            command_tx,
            status,
            worker: Some(worker),
        }
    }

    fn send(&self, command: PlayerCommand) -> Result<(), TransportError> {
        self.command_tx
            .send(command)
            .map_err(|_| TransportError::Unavailable("player worker has exited".to_string()))
    }

    fn status(&self) -> Result<PlaybackStatus, TransportError> {
        self.status
            .lock()
            .map(|status| *status)
            .map_err(|_| TransportError::Unavailable("player status is poisoned".to_string()))
    }
}

impl MediaTransport for MpvTransport {
    fn load(&mut self, source: &str, window: Window) -> Result<(), TransportError> {
        self.send(PlayerCommand::Load {
            source: source.to_string(),
            start: window.start,
        })
    }

    fn play(&mut self) -> Result<(), TransportError> {
        self.send(PlayerCommand::Play)
    }

    fn pause(&mut self) -> Result<(), TransportError> {
        self.send(PlayerCommand::Pause)
    }

    fn seek(&mut self, t: f64) -> Result<(), TransportError> {
        self.send(PlayerCommand::Seek(t))
    }

    fn current_time(&self) -> Result<f64, TransportError> {
        let status = self.status()?;
        if !status.loaded {
            return Err(TransportError::NotReady);
        }
        status.time_pos.ok_or(TransportError::NotReady)
    }

    fn duration(&self) -> Result<f64, TransportError> {
        self.status()?.duration.ok_or(TransportError::NotReady)
    }
}

impl Drop for MpvTransport {
    fn drop(&mut self) {
        let _ = self.command_tx.send(PlayerCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        debug!("preview transport shut down");
    }
}
