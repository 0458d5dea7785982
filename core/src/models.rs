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

use rspotify::model::FullTrack;
use rspotify::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name of the synthetic record holding the user's saved tracks.
pub const LIKED_SONGS_NAME: &str = "Liked Songs ❤";

/// One archived track, narrowed to the fields worth keeping offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub release_date: Option<String>,
    pub duration_ms: u32,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  —  {}  —  {}",
            self.name,
            self.artists.join(", "),
            self.album
        )
    }
}

impl From<FullTrack> for Track {
    fn from(track: FullTrack) -> Self {
        Track {
            id: track.id.map(|id| id.id().to_string()),
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            album: track.album.name,
            release_date: track.album.release_date,
            duration_ms: track.duration.num_milliseconds() as u32,
        }
    }
}

/// One playlist's worth of archived tracks.
///
/// `tracks` keeps server order. An entry is `None` when the service returned
/// an item without usable track data (deleted track, local file without
/// metadata, or a non-track item); those entries still count toward `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub name: String,
    pub tracks: Vec<Option<Track>>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
}

impl PlaylistRecord {
    /// The synthetic record for the user's saved tracks; it has no source URL.
    pub fn liked(tracks: Vec<Option<Track>>) -> Self {
        Self {
            name: LIKED_SONGS_NAME.to_string(),
            total: tracks.len(),
            spotify_url: None,
            tracks,
        }
    }

    pub fn playlist(
        name: impl Into<String>,
        spotify_url: Option<String>,
        tracks: Vec<Option<Track>>,
    ) -> Self {
        Self {
            name: name.into(),
            total: tracks.len(),
            spotify_url,
            tracks,
        }
    }
}

/// The complete aggregate of one run, serialized as a plain JSON array of
/// playlist records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackupDocument {
    pub playlists: Vec<PlaylistRecord>,
}

impl BackupDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PlaylistRecord) {
        self.playlists.push(record);
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Total number of archived entries across all records; equals the sum
    /// of the per-record totals.
    pub fn total_tracks(&self) -> usize {
        self.playlists.iter().map(|p| p.total).sum()
    }
}
