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

use std::time::Duration;

use futures::{pin_mut, TryStreamExt};
use log::{debug, info};
use rspotify::{
    model::{Market, PlayableItem, PlaylistItem, SimplifiedPlaylist},
    prelude::*,
    AuthCodeSpotify,
};

use crate::models::{BackupDocument, PlaylistRecord, Track};
use crate::paginate::{pages, FetchError, PAGE_LIMIT};

/// Observer for pagination feedback.
///
/// The declared total comes straight from the service and may be stale; it
/// is display information, never a bound on the fetch.
pub trait Progress {
    fn begin(&mut self, _label: &str, _declared_total: u32) {}
    fn advance(&mut self, _count: usize) {}
    fn finish(&mut self) {}
}

/// Ignores all progress events.
pub struct NoProgress;

impl Progress for NoProgress {}

/// Walks the authorized user's library and assembles the backup aggregate.
pub struct Archiver {
    spotify: AuthCodeSpotify,
    timeout: Duration,
}

impl Archiver {
    pub fn new(spotify: AuthCodeSpotify, timeout: Duration) -> Self {
        Self { spotify, timeout }
    }

    /// Fetches the whole library, strictly sequentially.
    ///
    /// The liked-tracks record comes first, and only when at least one track
    /// was collected. Playlists follow in index order; a playlist whose index
    /// entry declares zero tracks is skipped without fetching its items. Any
    /// fetch error aborts the run as a whole.
    pub async fn run(&self, progress: &mut dyn Progress) -> Result<BackupDocument, FetchError> {
        let mut document = BackupDocument::new();

        let liked = self.collect_liked(progress).await?;
        info!("collected {} liked tracks", liked.len());
        if !liked.is_empty() {
            document.push(PlaylistRecord::liked(liked));
        }

        let playlists = self.collect_playlist_index(progress).await?;
        info!("found {} playlists", playlists.len());

        for playlist in playlists {
            if playlist.tracks.total == 0 {
                debug!("skipping playlist {:?} with zero declared tracks", playlist.name);
                continue;
            }
            let tracks = self.collect_playlist_items(&playlist, progress).await?;
            let spotify_url = playlist.external_urls.get("spotify").cloned();
            document.push(PlaylistRecord::playlist(playlist.name, spotify_url, tracks));
        }

        info!(
            "aggregate holds {} records, {} tracks",
            document.len(),
            document.total_tracks()
        );
        Ok(document)
    }

    async fn collect_liked(
        &self,
        progress: &mut dyn Progress,
    ) -> Result<Vec<Option<Track>>, FetchError> {
        let stream = pages(
            |offset| {
                self.spotify
                    .current_user_saved_tracks_manual(None, Some(PAGE_LIMIT), Some(offset))
            },
            self.timeout,
        );
        pin_mut!(stream);

        let mut tracks = Vec::new();
        let mut started = false;
        while let Some(page) = stream.try_next().await? {
            if !started {
                progress.begin("Liked Songs", page.total);
                started = true;
            }
            progress.advance(page.items.len());
            tracks.extend(
                page.items
                    .into_iter()
                    .map(|saved| Some(Track::from(saved.track))),
            );
        }
        progress.finish();
        Ok(tracks)
    }

    async fn collect_playlist_index(
        &self,
        progress: &mut dyn Progress,
    ) -> Result<Vec<SimplifiedPlaylist>, FetchError> {
        let stream = pages(
            |offset| {
                self.spotify
                    .current_user_playlists_manual(Some(PAGE_LIMIT), Some(offset))
            },
            self.timeout,
        );
        pin_mut!(stream);

        let mut playlists = Vec::new();
        let mut started = false;
        while let Some(page) = stream.try_next().await? {
            if !started {
                progress.begin("Playlists", page.total);
                started = true;
            }
            progress.advance(page.items.len());
            playlists.extend(page.items);
        }
        progress.finish();
        Ok(playlists)
    }

    async fn collect_playlist_items(
        &self,
        playlist: &SimplifiedPlaylist,
        progress: &mut dyn Progress,
    ) -> Result<Vec<Option<Track>>, FetchError> {
        debug!("fetching items of playlist {:?}", playlist.name);
        let stream = pages(
            |offset| {
                self.spotify.playlist_items_manual(
                    playlist.id.clone(),
                    None,
                    Some(Market::FromToken),
                    Some(PAGE_LIMIT),
                    Some(offset),
                )
            },
            self.timeout,
        );
        pin_mut!(stream);

        let mut tracks = Vec::new();
        let mut started = false;
        while let Some(page) = stream.try_next().await? {
            if !started {
                progress.begin(&playlist.name, page.total);
                started = true;
            }
            progress.advance(page.items.len());
            tracks.extend(page.items.into_iter().map(archived_track));
        }
        progress.finish();
        Ok(tracks)
    }
}

/// Track data for one playlist item. `None` when the item carries no music
/// track: removed server-side, or a non-track entry such as an episode.
fn archived_track(item: PlaylistItem) -> Option<Track> {
    match item.track {
        Some(PlayableItem::Track(track)) => Some(Track::from(track)),
        _ => None,
    }
}
