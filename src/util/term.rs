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

//! Terminal background control via OSC escape sequences.
//!
//! Most modern terminals (XTerm, iTerm2, Alacritty, Kitty) understand OSC 11
//! and OSC 111. Terminals that do not simply ignore them.

use std::io::{self, Write};

const OSC_SET_BACKGROUND: &str = "\x1b]11;";
const OSC_RESET_BACKGROUND: &str = "\x1b]111";
const BEL: &str = "\x07";

/// Paints the whole terminal window background, `hex_colour` being a CSS
/// style string such as `"#281432"`.
pub(crate) fn set_terminal_bg(hex_colour: &str) {
    write_osc(&format!("{OSC_SET_BACKGROUND}{hex_colour}{BEL}"));
}

/// Restores the user's own background colour on the way out.
pub(crate) fn reset_terminal_bg() {
    write_osc(&format!("{OSC_RESET_BACKGROUND}{BEL}"));
}

// Best effort, a terminal we cannot write to is about to be torn down anyway.
fn write_osc(sequence: &str) {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(sequence.as_bytes());
    let _ = stdout.flush();
}
