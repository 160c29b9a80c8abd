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

use anyhow::Result;
use chrono::Utc;
use tracing::warn;

use crate::{
    events::AppEvent,
    handoff::HandoffSnapshot,
    store::RowStore,
    submission::{MixFormData, submit_mix},
    tasks::TaskContext,
};

/// Runs the submission entry point and, on success, leaves a snapshot for
/// the success view before reporting back.
pub(super) fn submit<R: RowStore>(ctx: &mut TaskContext<R>, data: MixFormData) -> Result<()> {
    let state = submit_mix(ctx.store, &data);

    if let (Some(submission_id), Some(path)) = (state.submission_id.as_deref(), ctx.handoff_path) {
        let snapshot = HandoffSnapshot::from_form(&data, submission_id, Utc::now());
        if let Err(e) = snapshot.write_to(path) {
            warn!(error = %format!("{e:#}"), "failed to write handoff snapshot");
        }
    }

    ctx.event_tx.send(AppEvent::SubmissionFinished(state))?;

    Ok(())
}

pub(super) fn list_submissions<R: RowStore>(ctx: &mut TaskContext<R>) -> Result<()> {
    let submissions = ctx.store.list_submissions()?;
    ctx.event_tx.send(AppEvent::SubmissionsListed(submissions))?;

    Ok(())
}

pub(super) fn load_submission<R: RowStore>(ctx: &mut TaskContext<R>, submission_id: &str) -> Result<()> {
    let submission = ctx.store.get_submission(submission_id)?;
    ctx.event_tx.send(AppEvent::SubmissionLoaded(submission))?;

    Ok(())
}
