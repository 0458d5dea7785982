/*
    spotify-backup-rs | Rust CLI tool to export liked tracks and playlists to local backup files.
    Copyright (C) 2026  spotify-backup-rs contributors

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

pub mod archive;
pub mod auth;
pub mod config;
pub mod export;
pub mod models;
pub mod paginate;

// Re-export key items for convenience
pub use archive::{Archiver, NoProgress, Progress};
pub use auth::{current_user_name, get_spotify_client};
pub use config::BackupConfig;
pub use export::{write_json, write_text};
pub use models::{BackupDocument, PlaylistRecord, Track};
