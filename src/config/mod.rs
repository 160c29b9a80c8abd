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

//! Application configuration.
//!
//! This module manages the application configuration file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "mixcraft";

const DATABASE_FILE: &str = "submissions.db";
const LOG_FILE: &str = "mixcraft.log";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub version: u32,
    pub database_file: String,
    pub log_file: String,
    /// How often the live preview reads the playback position.
    pub sample_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            database_file: data_file(DATABASE_FILE),
            log_file: data_file(LOG_FILE),
            sample_interval_ms: 100,
        }
    }
}

// Falls back to the working directory on platforms without a data dir.
fn data_file(name: &str) -> String {
    dirs::data_dir()
        .map(|dir| dir.join(CONFIG_NAME).join(name))
        .unwrap_or_else(|| PathBuf::from(name))
        .to_string_lossy()
        .into_owned()
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}
