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

//! Keyboard and mouse routing.
//!
//! Keys go to the command line first, then to the active view. On the form,
//! a focused slider gets first refusal before the form itself. Mouse input
//! only ever concerns the slider of the live preview; while it holds pointer
//! capture every mouse event goes to it.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use crate::{
    App, MainView,
    components::{mix_form::Focus, range_slider::SliderEffect},
    events::{AppEvent, handlers::*},
};

pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    app.error = None;

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.event_tx.send(AppEvent::ExitApplication)?;
        return Ok(());
    }

    let event = Event::Key(key);

    // Text fields keep ':' for themselves.
    let may_activate = app.main_view != MainView::Form || !app.form_view.focus.is_text();
    if app.commander.handle_event(&event, may_activate, &app.event_tx)? {
        return Ok(());
    }

    match app.main_view {
        MainView::Form => process_form_key(app, &event),
        MainView::Submissions => {
            let action = app.submissions_view.process_event(&event);
            handle_submissions_action(app, action)
        }
        MainView::Success => {
            let action = app.success_view.process_event(&event);
            handle_success_action(app, action)
        }
    }
}

fn process_form_key(app: &mut App, event: &Event) -> Result<()> {
    if let Focus::SongSlider(id) = &app.form_view.focus {
        if let Some(preview) = app.preview.as_mut().filter(|p| p.song_id() == id) {
            if matches!(event, Event::Key(k) if k.code == KeyCode::Char(' ')) {
                preview.toggle_playback();
                return Ok(());
            }

            let effects = preview.slider.process_event(event);
            if !effects.is_empty() {
                let id = id.clone();
                let edits = preview.apply_slider_effects(&effects);
                app.form_view.apply_window_edits(&id, &edits);
                return Ok(());
            }
        }
    }

    let action = app.form_view.process_event(event)?;
    handle_form_action(app, action)
}

pub(super) fn process_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if app.main_view != MainView::Form {
        return Ok(());
    }

    let Some(preview) = app
        .preview
        .as_mut()
        .filter(|p| p.slider.is_capturing() || p.sync().is_ready())
    else {
        return Ok(());
    };

    let effects = preview.slider.process_event(&Event::Mouse(mouse));
    if effects.is_empty() {
        return Ok(());
    }

    let id = preview.song_id().clone();
    let edits = preview.apply_slider_effects(&effects);
    app.form_view.apply_window_edits(&id, &edits);

    // Grabbing a handle also moves the keyboard focus to the slider.
    if effects.contains(&SliderEffect::CapturePointer) {
        let action = app.form_view.set_focus(Focus::SongSlider(id));
        handle_form_action(app, action)?;
    }

    Ok(())
}
