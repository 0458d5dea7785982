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

use rspotify::{prelude::*, AuthCodeSpotify, Config, Credentials, OAuth};
use thiserror::Error;

use crate::config::BackupConfig;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Spotify authentication failed: {0}")]
    Spotify(#[from] rspotify::ClientError),
}

/// Initializes and authenticates a Spotify client using the Authorization Code Flow.
///
/// This function:
/// 1. Builds credentials and OAuth settings from the [`BackupConfig`].
/// 2. Enables token caching at `<output_dir>/.spotify_cache` with automatic
///    refreshing, so a run whose cached token is still valid (or refreshable)
///    never prompts again.
/// 3. Handles the interactive flow otherwise: `prompt_for_token` (rspotify's
///    `cli` feature) opens the authorization URL in the browser, or prints it,
///    and catches the localhost redirect.
pub async fn get_spotify_client(config: &BackupConfig) -> Result<AuthCodeSpotify, AuthError> {
    let creds = Credentials::new(&config.client_id, &config.client_secret);

    let oauth = OAuth {
        redirect_uri: config.redirect_uri.clone(),
        scopes: config.scopes.clone(),
        ..Default::default()
    };

    let spotify = AuthCodeSpotify::with_config(
        creds,
        oauth,
        Config {
            token_cached: true,
            token_refreshing: true,
            cache_path: config.token_cache_path(),
            ..Default::default()
        },
    );

    let url = spotify.get_authorize_url(false)?;
    spotify.prompt_for_token(&url).await?;

    Ok(spotify)
}

/// Display name of the authorized user, falling back to the bare user id
/// for accounts without one.
pub async fn current_user_name(spotify: &AuthCodeSpotify) -> Result<String, AuthError> {
    let user = spotify.me().await?;
    Ok(user
        .display_name
        .unwrap_or_else(|| user.id.id().to_string()))
}
