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

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
    App, MainView,
    commander::AppCommand,
    components::{FormAction, SubmissionsAction, SuccessAction, mix_form::Focus},
    error::Field,
    events::AppEvent,
    model::{SongEntry, StoredSubmission},
    player::MpvTransport,
    preview::{Preview, TransportEvent, playable_source},
    submission::SubmitMixState,
    tasks::AppTask,
    util::youtube,
};

pub(super) fn handle_preview_sample(app: &mut App, generation: u64) {
    if let Some(preview) = live_preview(app, generation) {
        preview.sample();
    }
}

pub(super) fn handle_transport_event(app: &mut App, generation: u64, event: TransportEvent) {
    if let TransportEvent::Error(message) = &event {
        warn!(generation, %message, "preview transport error");
    }

    match live_preview(app, generation) {
        Some(preview) => preview.on_transport_event(event),
        None => debug!(generation, ?event, "dropping stale transport event"),
    }
}

// Events stamped with any other generation belong to a preview that has
// since been replaced.
fn live_preview(app: &mut App, generation: u64) -> Option<&mut Preview<MpvTransport>> {
    app.preview.as_mut().filter(|p| p.generation() == generation)
}

pub(super) fn handle_form_action(app: &mut App, action: Option<FormAction>) -> Result<()> {
    match action {
        Some(FormAction::SyncPreview) => sync_preview(app),

        Some(FormAction::ToggleWaveform(id)) => {
            let show = app.form_view.form.song(&id).is_some_and(|s| s.show_waveform);
            if let Some(preview) = app.preview.as_mut().filter(|p| p.song_id() == &id) {
                preview.set_waveform_visible(show);
            }
        }

        Some(FormAction::Submit(data)) => {
            info!(name = %data.name, "submitting mix");
            app.task_tx.send(AppTask::Submit(data))?;
        }

        None => {}
    }

    Ok(())
}

/// Brings the live preview in line with the form.
///
/// Only the expanded song with a valid link gets a preview. A preview for
/// the same song and source is kept and only has its window updated; any
/// other change replaces it.
pub(super) fn sync_preview(app: &mut App) {
    let wanted = app
        .form_view
        .form
        .expanded()
        .filter(|s| youtube::extract_video_id(&s.source_url).is_some())
        .cloned();

    let Some(song) = wanted.filter(|_| app.main_view == MainView::Form) else {
        close_preview(app);
        return;
    };

    if let Some(preview) = app.preview.as_mut() {
        if preview.song_id() == &song.id && preview.source() == playable_source(&song.source_url) {
            if preview.sync().window() != song.window() {
                preview.set_window(song.window());
            }
            return;
        }
    }

    open_preview(app, &song);
}

fn open_preview(app: &mut App, song: &SongEntry) {
    // The old preview must release its player before the new one starts.
    close_preview(app);

    app.preview_generation += 1;
    let generation = app.preview_generation;

    let transport = MpvTransport::new(generation, app.event_tx.clone());
    app.preview = Some(Preview::open(
        song,
        transport,
        generation,
        Duration::from_millis(app.config.sample_interval_ms),
        app.event_tx.clone(),
    ));

    info!(song = %song.id, generation, "preview opened");
}

fn close_preview(app: &mut App) {
    if let Some(preview) = app.preview.take() {
        debug!(generation = preview.generation(), "preview closed");
    }
}

pub(super) fn handle_submissions_action(app: &mut App, action: Option<SubmissionsAction>) -> Result<()> {
    match action {
        Some(SubmissionsAction::Refresh) => {
            app.submissions_view.begin_loading();
            app.task_tx.send(AppTask::ListSubmissions)?;
        }
        Some(SubmissionsAction::Open(id)) => app.task_tx.send(AppTask::LoadSubmission(id))?,
        None => {}
    }

    Ok(())
}

pub(super) fn handle_success_action(app: &mut App, action: Option<SuccessAction>) -> Result<()> {
    match action {
        Some(SuccessAction::NewMix) => handle_set_main_view(app, MainView::Form),
        Some(SuccessAction::Browse) => handle_set_main_view(app, MainView::Submissions),
        None => Ok(()),
    }
}

pub(super) fn handle_command(app: &mut App, command: AppCommand) -> Result<()> {
    match command {
        AppCommand::Quit => app.event_tx.send(AppEvent::ExitApplication)?,

        AppCommand::ShowView(view) => handle_set_main_view(app, view)?,

        AppCommand::Refresh => handle_submissions_action(app, Some(SubmissionsAction::Refresh))?,

        form_command => {
            if app.main_view != MainView::Form {
                handle_set_main_view(app, MainView::Form)?;
            }

            let action = match form_command {
                AppCommand::AddSong => app.form_view.add_song(),
                AppCommand::RemoveSong => match app.form_view.current_song() {
                    Some(id) => app.form_view.remove_song(&id),
                    None => None,
                },
                AppCommand::ToggleWaveform => match app.form_view.current_song() {
                    Some(id) => app.form_view.toggle_waveform(&id),
                    None => None,
                },
                AppCommand::Submit => app.form_view.begin_submit()?,
                _ => None,
            };

            handle_form_action(app, action)?;
        }
    }

    Ok(())
}

pub(super) fn handle_set_main_view(app: &mut App, view: MainView) -> Result<()> {
    app.main_view = view;

    match view {
        MainView::Form => {}
        MainView::Submissions => {
            app.submissions_view.begin_loading();
            app.task_tx.send(AppTask::ListSubmissions)?;
        }
        MainView::Success => app.success_view.reload(app.handoff_path.as_deref(), Utc::now()),
    }

    // Previews only live while the form is on screen.
    sync_preview(app);

    Ok(())
}

pub(super) fn handle_submission_finished(app: &mut App, state: SubmitMixState) {
    app.form_view.finish_submit(&state);

    if state.success {
        if let Err(e) = handle_set_main_view(app, MainView::Success) {
            app.error = Some(e.to_string());
        }
    } else {
        debug!(errors = state.field_errors.len(), message = %state.message, "submission rejected");
        focus_first_error(app);
    }
}

// Sends the focus to the first contact field with an error, if any.
fn focus_first_error(app: &mut App) {
    let target = [(Field::Name, Focus::Name), (Field::Email, Focus::Email), (Field::Reason, Focus::Reason)]
        .into_iter()
        .find(|(field, _)| app.form_view.field_errors.contains_key(field))
        .map(|(_, focus)| focus);

    if let Some(focus) = target {
        let action = app.form_view.set_focus(focus);
        if let Err(e) = handle_form_action(app, action) {
            app.error = Some(e.to_string());
        }
    }
}

pub(super) fn handle_submissions_listed(app: &mut App, submissions: Vec<StoredSubmission>) {
    app.submissions_view.set_submissions(submissions);
}

pub(super) fn handle_submission_loaded(app: &mut App, submission: Option<StoredSubmission>) {
    if submission.is_none() {
        app.error = Some("Submission not found".to_string());
    }
    app.submissions_view.set_detail(submission);
}

pub(super) fn handle_error(app: &mut App, message: String) {
    warn!(%message, "error reported");

    // A failed task may have been the submission in flight.
    app.form_view.submitting = false;
    app.error = Some(message);
}
