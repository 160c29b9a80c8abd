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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to offload tasks such as
//! potentially blocking database reads and writes from the main UI thread.
//! It provides a dedicated worker loop that owns the submission store,
//! translates [`AppTask`] requests into store operations and broadcasts the
//! results back to the application via [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Other actions are likely more
//! suited to events.

mod handlers;

use std::{
    path::{Path, PathBuf},
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::Result;

use crate::{
    events::AppEvent,
    store::{RowStore, SubmissionStore},
    submission::MixFormData,
};

use handlers::*;

#[derive(Debug)]
pub(crate) enum AppTask {
    Submit(MixFormData),
    ListSubmissions,
    LoadSubmission(String),
}

/// Spawns a background thread to process application tasks.
///
/// The worker takes ownership of the store, so every storage call happens
/// on this one thread.
///
/// # Arguments
///
/// * `store` - The submission store.
/// * `handoff_path` - Where a successful submission is snapshotted for the
///   success view, if anywhere.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker<R: RowStore + Send + 'static>(
    store: SubmissionStore<R>,
    handoff_path: Option<PathBuf>,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut store = store;

        while let Ok(task) = task_rx.recv() {
            let mut ctx = TaskContext {
                store: &mut store,
                handoff_path: handoff_path.as_deref(),
                event_tx: &event_tx,
            };

            if let Err(e) = handle_task(task, &mut ctx) {
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    })
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
struct TaskContext<'a, R> {
    store: &'a mut SubmissionStore<R>,
    handoff_path: Option<&'a Path>,
    event_tx: &'a Sender<AppEvent>,
}

fn handle_task<R: RowStore>(task: AppTask, ctx: &mut TaskContext<R>) -> Result<()> {
    match task {
        AppTask::Submit(data) => submit(ctx, data),
        AppTask::ListSubmissions => list_submissions(ctx),
        AppTask::LoadSubmission(id) => load_submission(ctx, &id),
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::mpsc, time::Duration};

    use super::*;
    use crate::{
        handoff::HandoffSnapshot,
        model::{SongEntry, SongId},
        store::SqliteRowStore,
        submission::MSG_SUBMITTED,
    };

    fn form() -> MixFormData {
        let mut song = SongEntry::new(SongId::from("a"));
        song.source_url = "https://youtu.be/dQw4w9WgXcQ".to_string();
        MixFormData {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            reason: "Gala".to_string(),
            songs: serde_json::to_string(&vec![song]).unwrap(),
            transitions: "[]".to_string(),
        }
    }

    fn recv(rx: &mpsc::Receiver<AppEvent>) -> AppEvent {
        rx.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn submissions_are_stored_snapshotted_and_listed() {
        let dir = tempfile::tempdir().unwrap();
        let handoff = dir.path().join("last_submission.json");

        let store = SubmissionStore::new(SqliteRowStore::open_in_memory().unwrap());
        let (task_tx, task_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let worker = spawn_task_worker(store, Some(handoff.clone()), task_rx, event_tx);

        task_tx.send(AppTask::Submit(form())).unwrap();
        let id = match recv(&event_rx) {
            AppEvent::SubmissionFinished(state) => {
                assert!(state.success);
                assert_eq!(state.message, MSG_SUBMITTED);
                state.submission_id.unwrap()
            }
            other => panic!("unexpected event {other:?}"),
        };

        let snapshot = HandoffSnapshot::read_from(&handoff, chrono::Utc::now()).unwrap();
        assert_eq!(snapshot.submission_id, id);
        assert_eq!(snapshot.songs.len(), 1);

        task_tx.send(AppTask::ListSubmissions).unwrap();
        match recv(&event_rx) {
            AppEvent::SubmissionsListed(list) => {
                assert_eq!(list.len(), 1);
                assert_eq!(list[0].submission_id, id);
            }
            other => panic!("unexpected event {other:?}"),
        }

        task_tx.send(AppTask::LoadSubmission("missing".to_string())).unwrap();
        assert!(matches!(recv(&event_rx), AppEvent::SubmissionLoaded(None)));

        drop(task_tx);
        worker.join().unwrap();
    }

    #[test]
    fn rejected_submissions_leave_no_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let handoff = dir.path().join("last_submission.json");

        let store = SubmissionStore::new(SqliteRowStore::open_in_memory().unwrap());
        let (task_tx, task_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        spawn_task_worker(store, Some(handoff.clone()), task_rx, event_tx);

        let mut data = form();
        data.email = "not-an-email".to_string();
        task_tx.send(AppTask::Submit(data)).unwrap();

        match recv(&event_rx) {
            AppEvent::SubmissionFinished(state) => assert!(!state.success),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(!handoff.exists());
    }
}
