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

//! The recurring position sampler.
//!
//! A [`SamplingLoop`] runs a callback on its own thread at a fixed interval
//! until it is cancelled, dropped, or the callback asks it to stop.
//! Cancelling blocks until the thread has exited, so no tick can arrive
//! after [`SamplingLoop::cancel`] returns.

use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use tracing::debug;

pub(crate) struct SamplingLoop {
    cancel_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl SamplingLoop {
    /// Starts ticking every `interval`. The loop ends on its own when
    /// `on_tick` returns `false`.
    pub(crate) fn start<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                match cancel_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if !on_tick() {
                            break;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            debug!("sampling loop stopped");
        });

        Self {
            cancel_tx: Some(cancel_tx),
            handle: Some(handle),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the loop and waits for its thread to exit. Idempotent.
    pub(crate) fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SamplingLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    const INTERVAL: Duration = Duration::from_millis(5);

    fn counting() -> (Arc<AtomicUsize>, impl FnMut() -> bool + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let ticks = Arc::clone(&count);
        (count, move || {
            ticks.fetch_add(1, Ordering::SeqCst);
            true
        })
    }

    fn wait_for(count: &AtomicUsize, at_least: usize) {
        for _ in 0..400 {
            if count.load(Ordering::SeqCst) >= at_least {
                return;
            }
            thread::sleep(INTERVAL);
        }
        panic!("sampling loop did not tick {at_least} times");
    }

    #[test]
    fn ticks_until_cancelled() {
        let (count, on_tick) = counting();
        let mut sampling = SamplingLoop::start(INTERVAL, on_tick);
        wait_for(&count, 3);
        assert!(sampling.is_running());

        sampling.cancel();
        assert!(!sampling.is_running());

        let after_cancel = count.load(Ordering::SeqCst);
        thread::sleep(INTERVAL * 10);
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);

        sampling.cancel();
    }

    #[test]
    fn dropping_stops_the_loop() {
        let (count, on_tick) = counting();
        let sampling = SamplingLoop::start(INTERVAL, on_tick);
        wait_for(&count, 1);

        drop(sampling);

        let after_drop = count.load(Ordering::SeqCst);
        thread::sleep(INTERVAL * 10);
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn the_callback_can_end_the_loop() {
        let count = Arc::new(AtomicUsize::new(0));
        let ticks = Arc::clone(&count);
        let mut sampling = SamplingLoop::start(INTERVAL, move || ticks.fetch_add(1, Ordering::SeqCst) < 1);

        wait_for(&count, 2);
        for _ in 0..400 {
            if !sampling.is_running() {
                break;
            }
            thread::sleep(INTERVAL);
        }
        assert!(!sampling.is_running());
        assert_eq!(count.load(Ordering::SeqCst), 2);
        sampling.cancel();
    }
}
