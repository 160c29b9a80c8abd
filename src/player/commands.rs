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

//! MPV worker thread and event processing.
//!
//! The worker owns a `libmpv` context configured for audio-only streaming
//! (`vo=null`, `ytdl=yes`) that starts paused and keeps the file open at its
//! end, so reaching the end pauses rather than unloading. It alternates
//! between draining pending [`PlayerCommand`]s and waiting briefly for mpv
//! events, until it is told to shut down or its command channel closes.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    sync::{
        Arc, Mutex,
        mpsc::{Receiver, Sender, TryRecvError},
    },
    thread::{self, JoinHandle},
};
use tracing::{debug, info, warn};

use crate::{events::AppEvent, player::PlaybackStatus, preview::TransportEvent};

#[derive(Debug)]
pub(crate) enum PlayerCommand {
    Load { source: String, start: f64 },
    Play,
    Pause,
    Seek(f64),
    Shutdown,
}

/// Everything a running worker needs besides the mpv handle.
struct WorkerContext {
    generation: u64,
    status: Arc<Mutex<PlaybackStatus>>,
    event_tx: Sender<AppEvent>,
}

impl WorkerContext {
    fn emit(&self, event: TransportEvent) -> Result<()> {
        self.event_tx
            .send(AppEvent::Transport {
                generation: self.generation,
                event,
            })
            .context("Failed to send transport event")
    }

    fn update(&self, f: impl FnOnce(&mut PlaybackStatus)) {
        if let Ok(mut status) = self.status.lock() {
            f(&mut status);
        }
    }
}

/// Spawns the worker thread.
///
/// If the worker fails outright (for example `libmpv` cannot be initialised)
/// the failure is reported as a transport error for this generation, which
/// degrades the preview without affecting the rest of the form.
pub(crate) fn spawn_player_worker(
    generation: u64,
    command_rx: Receiver<PlayerCommand>,
    status: Arc<Mutex<PlaybackStatus>>,
    event_tx: Sender<AppEvent>,
) -> JoinHandle<()> {
    let ctx = WorkerContext {
        generation,
        status,
        event_tx,
    };

    thread::spawn(move || {
        if let Err(e) = player_worker(&ctx, command_rx) {
            warn!(generation, error = ?e, "mpv worker failure");
            let _ = ctx.emit(TransportEvent::Error(format!("MPV worker failure: {e}")));
        }
    })
}

fn player_worker(ctx: &WorkerContext, command_rx: Receiver<PlayerCommand>) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder
            .set_option("ytdl", "yes")
            .context("Failed to enable ytdl")?;
        builder
            .set_option("keep-open", "yes")
            .context("Failed to set keep-open")?;
        builder
            .set_option("pause", true)
            .context("Failed to start paused")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<bool>("pause", 0)
        .context("Failed to observe pause")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<bool>("eof-reached", 0)
        .context("Failed to observe eof-reached")?;

    info!(generation = ctx.generation, "mpv worker started");

    while process_commands(&mut handler, &command_rx, ctx)? {
        process_mpv_events(&mut handler, ctx)?;
    }

    info!(generation = ctx.generation, "mpv worker stopped");
    Ok(())
}

/// Drains pending commands. Returns `false` once the worker should stop.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &Receiver<PlayerCommand>,
    ctx: &WorkerContext,
) -> Result<bool> {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(TryRecvError::Empty) => return Ok(true),
            Err(TryRecvError::Disconnected) => return Ok(false),
        };

        debug!(?command, "player command");

        let result = match command {
            PlayerCommand::Shutdown => return Ok(false),
            PlayerCommand::Load { source, start } => {
                ctx.update(|status| *status = PlaybackStatus::default());
                handler
                    .set_property("start", start.floor().to_string().as_str())
                    .context("Failed to set start position")
                    .and_then(|()| {
                        handler
                            .command(&["loadfile", &source, "replace"])
                            .context(format!("Failed to load source: {}", &source))
                    })
            }
            PlayerCommand::Play => handler
                .set_property("pause", false)
                .context("Failed to resume"),
            PlayerCommand::Pause => handler
                .set_property("pause", true)
                .context("Failed to pause"),
            PlayerCommand::Seek(t) => handler
                .command(&["seek", &t.to_string(), "absolute"])
                .context("Failed to seek"),
        };

        if let Err(e) = result {
            ctx.emit(TransportEvent::Error(format!("{e:#}")))?;
        }
    }
}

/// Waits up to 50ms for an mpv event and forwards what it means.
fn process_mpv_events(handler: &mut mpv::MpvHandler, ctx: &WorkerContext) -> Result<()> {
    let Some(mpv_event) = handler.wait_event(0.05) else {
        return Ok(());
    };

    let transport_event = match mpv_event {
        mpv::Event::FileLoaded => {
            let duration = handler.get_property::<f64>("duration").ok();
            let time_pos = handler.get_property::<f64>("time-pos").ok();
            ctx.update(|status| {
                status.loaded = true;
                status.duration = duration.or(status.duration);
                status.time_pos = time_pos.or(status.time_pos);
            });
            Some(TransportEvent::Ready)
        }

        mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
            ("duration", Format::Double(duration)) => {
                ctx.update(|status| status.duration = Some(duration));
                None
            }
            ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                ctx.update(|status| status.time_pos = Some(seconds));
                None
            }
            ("pause", Format::Flag(paused)) => {
                let mut loaded = false;
                ctx.update(|status| {
                    status.paused = paused;
                    loaded = status.loaded;
                });
                match (loaded, paused) {
                    (false, _) => None,
                    (true, true) => Some(TransportEvent::Paused),
                    (true, false) => Some(TransportEvent::Playing),
                }
            }
            ("eof-reached", Format::Flag(true)) => Some(TransportEvent::Ended),
            _ => None,
        },

        mpv::Event::EndFile(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR)) | mpv::Event::EndFile(Err(_)) => {
            ctx.update(|status| status.loaded = false);
            Some(TransportEvent::Error("Failed to play source".to_string()))
        }

        _ => None,
    };

    if let Some(event) = transport_event {
        ctx.emit(event)?;
    }

    Ok(())
}
