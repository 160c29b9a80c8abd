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

//! Keeps a media transport in step with the selected window.
//!
//! [`MediaSync`] sits between the range slider and a [`MediaTransport`]. It
//! tracks readiness and the last known playhead, clamps seeks into the
//! window, and pauses playback once the playhead reaches the window end.
//! Transport failures are logged and otherwise ignored; they only ever
//! degrade the preview.

use tracing::{debug, warn};

use crate::{error::TransportError, model::Window};

/// A playback engine that can stream a source and report its position.
pub(crate) trait MediaTransport {
    /// Starts loading `source`, paused, using `window` as a hint for the
    /// initial start and end positions.
    fn load(&mut self, source: &str, window: Window) -> Result<(), TransportError>;

    fn play(&mut self) -> Result<(), TransportError>;

    fn pause(&mut self) -> Result<(), TransportError>;

    fn seek(&mut self, t: f64) -> Result<(), TransportError>;

    fn current_time(&self) -> Result<f64, TransportError>;

    fn duration(&self) -> Result<f64, TransportError>;
}

/// State notifications raised by a transport.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TransportEvent {
    Ready,
    Playing,
    Paused,
    Ended,
    Error(String),
}

/// What the owner must do with the sampling loop after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SyncDirective {
    StartSampling,
    StopSampling,
}

pub(crate) struct MediaSync<T> {
    transport: T,
    window: Window,
    ready: bool,
    playing: bool,
    duration: f64,
    position: Option<f64>,
}

impl<T: MediaTransport> MediaSync<T> {
    pub(crate) fn new(transport: T, window: Window) -> Self {
        Self {
            transport,
            window,
            ready: false,
            playing: false,
            duration: 0.0,
            position: None,
        }
    }

    pub(crate) fn load(&mut self, source: &str) -> Result<(), TransportError> {
        self.ready = false;
        self.playing = false;
        self.position = None;
        self.transport.load(source, self.window)
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.ready
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.playing
    }

    pub(crate) fn duration(&self) -> f64 {
        self.duration
    }

    pub(crate) fn position(&self) -> Option<f64> {
        self.position
    }

    pub(crate) fn window(&self) -> Window {
        self.window
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn on_transport_event(&mut self, event: TransportEvent) -> Option<SyncDirective> {
        debug!(?event, "transport event");

        match event {
            TransportEvent::Ready => {
                self.ready = true;
                self.duration = self.transport.duration().unwrap_or(0.0);
                if let Ok(t) = self.transport.current_time() {
                    self.position = Some(t);
                }
                Some(SyncDirective::StartSampling)
            }

            TransportEvent::Playing => {
                self.playing = true;
                self.refresh_position();
                None
            }

            TransportEvent::Paused | TransportEvent::Ended => {
                self.playing = false;
                self.refresh_position();
                None
            }

            TransportEvent::Error(message) => {
                warn!(%message, "preview transport failed");
                self.ready = false;
                self.playing = false;
                Some(SyncDirective::StopSampling)
            }
        }
    }

    fn refresh_position(&mut self) {
        if let Ok(t) = self.transport.current_time() {
            self.position = Some(t);
        }
    }

    /// One sampling tick. Returns the position to publish, if it could be
    /// read.
    pub(crate) fn sample(&mut self) -> Option<f64> {
        if !self.ready {
            return None;
        }

        let t = self.transport.current_time().ok()?;
        self.position = Some(t);

        if t >= self.window.end {
            if let Err(e) = self.transport.pause() {
                debug!(error = %e, "pause at window end failed");
            }
            self.playing = false;
        }

        Some(t)
    }

    pub(crate) fn set_start(&mut self, start: f64) {
        self.window.start = start;

        let position = self.position.unwrap_or(0.0);
        if self.ready && position < start {
            self.seek_to(start);
        }
    }

    pub(crate) fn set_end(&mut self, end: f64) {
        self.window.end = end;

        let position = self.position.unwrap_or(0.0);
        if self.ready && position > end {
            self.seek_to(end);
        }
    }

    /// Seeks within the window. Ignored until the duration is known.
    pub(crate) fn seek(&mut self, t: f64) {
        if !self.ready || self.duration <= 0.0 {
            return;
        }
        self.seek_to(self.window.clamp(t));
    }

    fn seek_to(&mut self, t: f64) {
        match self.transport.seek(t) {
            Ok(()) => self.position = Some(t),
            Err(e) => warn!(error = %e, "preview seek failed"),
        }
    }

    /// Plays or pauses. Playing from at or past the window end restarts from
    /// the window start.
    pub(crate) fn toggle_playback(&mut self) {
        if !self.ready {
            return;
        }

        if self.playing {
            if let Err(e) = self.transport.pause() {
                warn!(error = %e, "preview pause failed");
                return;
            }
            self.playing = false;
            return;
        }

        if self.position.is_some_and(|p| p >= self.window.end) {
            self.seek_to(self.window.start);
        }

        match self.transport.play() {
            Ok(()) => self.playing = true,
            Err(e) => warn!(error = %e, "preview play failed"),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Scripted transport recording every call.
    #[derive(Default)]
    pub(crate) struct FakeTransport {
        pub(crate) time: Option<f64>,
        pub(crate) duration: f64,
        pub(crate) calls: Vec<String>,
    }

    impl MediaTransport for FakeTransport {
        fn load(&mut self, source: &str, window: Window) -> Result<(), TransportError> {
            self.calls.push(format!("load {source} {}-{}", window.start, window.end));
            Ok(())
        }

        fn play(&mut self) -> Result<(), TransportError> {
            self.calls.push("play".to_string());
            Ok(())
        }

        fn pause(&mut self) -> Result<(), TransportError> {
            self.calls.push("pause".to_string());
            Ok(())
        }

        fn seek(&mut self, t: f64) -> Result<(), TransportError> {
            self.calls.push(format!("seek {t}"));
            self.time = Some(t);
            Ok(())
        }

        fn current_time(&self) -> Result<f64, TransportError> {
            self.time.ok_or(TransportError::NotReady)
        }

        fn duration(&self) -> Result<f64, TransportError> {
            Ok(self.duration)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{testing::FakeTransport, *};

    fn ready_sync(time: f64, window: Window) -> MediaSync<FakeTransport> {
        let transport = FakeTransport {
            time: Some(time),
            duration: 200.0,
            calls: vec![],
        };
        let mut sync = MediaSync::new(transport, window);
        assert_eq!(
            sync.on_transport_event(TransportEvent::Ready),
            Some(SyncDirective::StartSampling)
        );
        sync
    }

    fn calls(sync: &MediaSync<FakeTransport>) -> Vec<&str> {
        sync.transport().calls.iter().map(String::as_str).collect()
    }

    #[test]
    fn ready_records_duration_and_position() {
        let sync = ready_sync(12.0, Window::new(10.0, 40.0));
        assert!(sync.is_ready());
        assert_eq!(sync.duration(), 200.0);
        assert_eq!(sync.position(), Some(12.0));
    }

    #[test]
    fn ready_tolerates_an_unreadable_position() {
        let mut sync = MediaSync::new(FakeTransport::default(), Window::new(0.0, 30.0));
        sync.on_transport_event(TransportEvent::Ready);
        assert!(sync.is_ready());
        assert_eq!(sync.position(), None);
    }

    #[test]
    fn sampling_publishes_the_position() {
        let mut sync = ready_sync(15.0, Window::new(10.0, 40.0));
        assert_eq!(sync.sample(), Some(15.0));
        assert!(calls(&sync).is_empty());
    }

    #[test]
    fn sampling_before_ready_does_nothing() {
        let mut sync = MediaSync::new(
            FakeTransport { time: Some(99.0), ..FakeTransport::default() },
            Window::new(0.0, 30.0),
        );
        assert_eq!(sync.sample(), None);
        assert!(calls(&sync).is_empty());
    }

    #[test]
    fn shrinking_the_end_below_the_playhead_pauses_within_one_sample() {
        let mut sync = ready_sync(25.0, Window::new(10.0, 40.0));
        sync.toggle_playback();
        sync.on_transport_event(TransportEvent::Playing);

        sync.set_end(20.0);
        sync.sample();

        assert_eq!(calls(&sync), vec!["play", "seek 20", "pause"]);
        assert!(!sync.is_playing());
    }

    #[test]
    fn sampling_pauses_once_the_playhead_reaches_the_end() {
        let mut sync = ready_sync(25.0, Window::new(10.0, 40.0));
        sync.toggle_playback();

        sync.transport.time = Some(39.9);
        sync.sample();
        assert_eq!(calls(&sync), vec!["play"]);

        sync.transport.time = Some(40.0);
        assert_eq!(sync.sample(), Some(40.0));
        assert_eq!(calls(&sync), vec!["play", "pause"]);
    }

    #[test]
    fn moving_the_end_before_the_playhead_seeks_to_it() {
        let mut sync = ready_sync(35.0, Window::new(10.0, 40.0));
        sync.set_end(30.0);

        assert_eq!(calls(&sync), vec!["seek 30"]);
        assert_eq!(sync.position(), Some(30.0));
    }

    #[test]
    fn moving_the_start_past_the_playhead_seeks_to_it() {
        let mut sync = ready_sync(12.0, Window::new(10.0, 40.0));
        sync.set_start(20.0);
        sync.set_start(15.0);

        assert_eq!(calls(&sync), vec!["seek 20"]);
        assert_eq!(sync.window(), Window::new(15.0, 40.0));
    }

    #[test]
    fn window_edits_before_ready_do_not_touch_the_transport() {
        let mut sync = MediaSync::new(FakeTransport::default(), Window::new(10.0, 40.0));
        sync.set_start(20.0);
        sync.set_end(25.0);
        sync.seek(22.0);
        sync.toggle_playback();

        assert!(calls(&sync).is_empty());
        assert_eq!(sync.window(), Window::new(20.0, 25.0));
    }

    #[test]
    fn seeks_are_clamped_into_the_window() {
        let mut sync = ready_sync(12.0, Window::new(10.0, 40.0));
        sync.seek(2.0);
        sync.seek(90.0);
        sync.seek(33.0);

        assert_eq!(calls(&sync), vec!["seek 10", "seek 40", "seek 33"]);
    }

    #[test]
    fn seeks_need_a_known_duration() {
        let mut sync = MediaSync::new(
            FakeTransport { time: Some(0.0), duration: 0.0, calls: vec![] },
            Window::new(0.0, 30.0),
        );
        sync.on_transport_event(TransportEvent::Ready);
        sync.seek(10.0);
        assert!(calls(&sync).is_empty());
    }

    #[test]
    fn playing_from_the_end_restarts_at_the_window_start() {
        let mut sync = ready_sync(40.0, Window::new(10.0, 40.0));
        sync.toggle_playback();
        assert_eq!(calls(&sync), vec!["seek 10", "play"]);

        sync.toggle_playback();
        assert_eq!(calls(&sync), vec!["seek 10", "play", "pause"]);
    }

    #[test]
    fn errors_stop_sampling() {
        let mut sync = ready_sync(12.0, Window::new(10.0, 40.0));
        assert_eq!(
            sync.on_transport_event(TransportEvent::Error("gone".to_string())),
            Some(SyncDirective::StopSampling)
        );
        assert!(!sync.is_ready());
        assert_eq!(sync.sample(), None);
    }
}
