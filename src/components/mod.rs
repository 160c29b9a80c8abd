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

//! Interactive widgets and views.
//!
//! Each component keeps its state in `mod.rs`, its key and mouse handling in
//! `event.rs` and its drawing in `render.rs`.

pub(crate) mod mix_form;
pub(crate) mod range_slider;
pub(crate) mod submissions;
pub(crate) mod success;

pub(crate) use mix_form::{FormAction, MixFormView};
pub(crate) use submissions::{SubmissionsAction, SubmissionsView};
pub(crate) use success::{SuccessAction, SuccessView};
