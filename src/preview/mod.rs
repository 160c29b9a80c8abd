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

//! Live preview of the expanded song.
//!
//! A [`Preview`] bundles everything that exists only while a song is being
//! previewed: the media transport behind a [`MediaSync`], the sampling loop,
//! the range slider and the optional waveform panel. Only one preview is
//! live at a time. Each one is stamped with a generation number and events
//! carrying any other generation are stale and ignored.
//!
//! Dropping a preview cancels its sampling loop before the transport is
//! released.

pub(crate) mod sampling;
pub(crate) mod sync;
pub(crate) mod waveform;

use std::{sync::mpsc::Sender, time::Duration};

use tracing::{debug, warn};

use crate::{
    components::range_slider::{RangeSlider, SliderEffect, SliderProps},
    events::AppEvent,
    model::{SongEntry, SongId, Window},
    preview::{sampling::SamplingLoop, waveform::WaveformPanel},
    util::youtube,
};

pub(crate) use sync::{MediaSync, MediaTransport, SyncDirective, TransportEvent};

/// A change the form must apply to its song after slider input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum WindowEdit {
    Start(f64),
    End(f64),
}

pub(crate) struct Preview<T: MediaTransport> {
    song_id: SongId,
    source: String,
    generation: u64,
    // Declared before `sync` so the loop is cancelled before the transport
    // is dropped.
    sampling: Option<SamplingLoop>,
    sync: MediaSync<T>,
    pub(crate) slider: RangeSlider,
    pub(crate) waveform: Option<WaveformPanel>,
    sample_interval: Duration,
    event_tx: Sender<AppEvent>,
}

impl<T: MediaTransport> Preview<T> {
    /// Creates a preview for `song` and starts loading its source.
    ///
    /// A source the transport refuses is logged and leaves the preview in
    /// its loading state.
    pub(crate) fn open(
        song: &SongEntry,
        transport: T,
        generation: u64,
        sample_interval: Duration,
        event_tx: Sender<AppEvent>,
    ) -> Self {
        let source = playable_source(&song.source_url);
        let mut sync = MediaSync::new(transport, song.window());
        if let Err(e) = sync.load(&source) {
            warn!(song = %song.id, error = %e, "failed to load preview");
        }

        let slider = RangeSlider::new(SliderProps {
            min: 0.0,
            max: song.end_time,
            start_time: song.start_time,
            end_time: song.end_time,
            current_position: None,
        });

        Self {
            song_id: song.id.clone(),
            waveform: song.show_waveform.then(|| WaveformPanel::init(&source)),
            source,
            generation,
            sampling: None,
            sync,
            slider,
            sample_interval,
            event_tx,
        }
    }

    pub(crate) fn song_id(&self) -> &SongId {
        &self.song_id
    }

    /// The source this preview was opened with, after id expansion.
    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn sync(&self) -> &MediaSync<T> {
        &self.sync
    }

    #[cfg(test)]
    pub(crate) fn is_sampling(&self) -> bool {
        self.sampling.as_ref().is_some_and(SamplingLoop::is_running)
    }

    pub(crate) fn set_waveform_visible(&mut self, visible: bool) {
        self.waveform = visible.then(|| WaveformPanel::init(&self.source));
    }

    pub(crate) fn on_transport_event(&mut self, event: TransportEvent) {
        match self.sync.on_transport_event(event) {
            Some(SyncDirective::StartSampling) => {
                let duration = self.sync.duration();
                if duration > 0.0 {
                    let props = *self.slider.props();
                    self.slider.set_bounds(0.0, duration.max(props.end_time));
                }
                self.slider.set_position(self.sync.position());
                self.start_sampling();
            }
            Some(SyncDirective::StopSampling) => self.stop_sampling(),
            None => self.slider.set_position(self.sync.position()),
        }
    }

    fn start_sampling(&mut self) {
        self.stop_sampling();

        let event_tx = self.event_tx.clone();
        let generation = self.generation;
        self.sampling = Some(SamplingLoop::start(self.sample_interval, move || {
            event_tx.send(AppEvent::PreviewSample(generation)).is_ok()
        }));
        debug!(generation, "sampling started");
    }

    fn stop_sampling(&mut self) {
        if let Some(mut sampling) = self.sampling.take() {
            sampling.cancel();
            debug!(generation = self.generation, "sampling stopped");
        }
    }

    /// Brings the window in line with an edit made outside the slider, such
    /// as time parameters in a newly committed link.
    pub(crate) fn set_window(&mut self, window: Window) {
        let props = *self.slider.props();
        self.slider.set_props(SliderProps {
            max: props.max.max(window.end),
            start_time: window.start,
            end_time: window.end,
            ..props
        });

        self.sync.set_start(window.start);
        self.sync.set_end(window.end);
        self.slider.set_position(self.sync.position());
    }

    /// One sampling tick, run on the UI thread.
    pub(crate) fn sample(&mut self) {
        if let Some(t) = self.sync.sample() {
            self.slider.set_position(Some(t));
        }
    }

    pub(crate) fn toggle_playback(&mut self) {
        self.sync.toggle_playback();
    }

    /// Routes slider effects to the transport and returns the window edits
    /// the form must record.
    pub(crate) fn apply_slider_effects(&mut self, effects: &[SliderEffect]) -> Vec<WindowEdit> {
        let mut edits = vec![];

        for effect in effects {
            match *effect {
                SliderEffect::StartChanged(v) => {
                    self.sync.set_start(v);
                    edits.push(WindowEdit::Start(v));
                }
                SliderEffect::EndChanged(v) => {
                    self.sync.set_end(v);
                    edits.push(WindowEdit::End(v));
                }
                SliderEffect::Seek(v) => self.sync.seek(v),
                SliderEffect::CapturePointer | SliderEffect::ReleasePointer => {}
            }
        }

        self.slider.set_position(self.sync.position());
        edits
    }
}

/// Bare video ids are expanded to a watch URL mpv can resolve.
pub(crate) fn playable_source(source: &str) -> String {
    let source = source.trim();
    if source.contains("://") {
        return source.to_string();
    }
    match youtube::extract_video_id(source) {
        Some(id) => format!("https://www.youtube.com/watch?v={id}"),
        None => source.to_string(),
    }
}
