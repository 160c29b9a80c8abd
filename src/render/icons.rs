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

//! Unicode symbols for the TUI.
//!
//! Chosen for compatibility with most modern terminal emulators and fonts.

// Media controls
pub(crate) const ICON_PLAY: &str = "\u{25B6}";
pub(crate) const ICON_PAUSE: &str = "\u{23F8}";

// Link validation, using Variation Selector-15 [\u{FE0E}] so terminals
// render monochrome text that respects the theme rather than emoji.
pub(crate) const ICON_VALID: &str = "\u{2714}\u{FE0E}";
pub(crate) const ICON_INVALID: &str = "\u{2716}\u{FE0E}";
pub(crate) const ICON_PENDING: &str = "\u{2026}";

pub(crate) const ICON_SUBMITTED: &str = "\u{2605}";
