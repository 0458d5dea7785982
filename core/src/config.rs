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

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use rspotify::scopes;
use thiserror::Error;

/// Directory that receives the backup files and the token cache, unless
/// `SPOTIFY_BACKUP_DIR` says otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "./spotify_backup";

/// Hidden token-cache file kept inside the output directory.
pub const TOKEN_CACHE_FILE: &str = ".spotify_cache";

const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

/// Everything one run needs to know, resolved up front so the rest of the
/// crate never touches the environment.
#[derive(Debug, Clone)]
pub struct BackupConfig {
    /// Where the JSON and text files are written.
    pub output_dir: PathBuf,
    /// Application registration, as issued by the Spotify developer dashboard.
    pub client_id: String,
    pub client_secret: String,
    /// Local endpoint the authorization flow redirects back to.
    pub redirect_uri: String,
    /// Permissions requested during authorization.
    pub scopes: HashSet<String>,
    /// Upper bound for a single page request.
    pub request_timeout: Duration,
}

impl BackupConfig {
    /// Reads the configuration from the environment.
    ///
    /// `RSPOTIFY_CLIENT_ID` and `RSPOTIFY_CLIENT_SECRET` are required (the
    /// variable names the rspotify ecosystem uses); everything else has a
    /// default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = require("RSPOTIFY_CLIENT_ID")?;
        let client_secret = require("RSPOTIFY_CLIENT_SECRET")?;

        let redirect_uri = env::var("RSPOTIFY_REDIRECT_URI")
            .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string());

        let output_dir = env::var_os("SPOTIFY_BACKUP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let request_timeout = match env::var("SPOTIFY_BACKUP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidVar {
                    var: "SPOTIFY_BACKUP_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            output_dir,
            client_id,
            client_secret,
            redirect_uri,
            scopes: default_scopes(),
            request_timeout,
        })
    }

    /// Path of the hidden token cache, inside the output directory so the
    /// whole backup state lives in one place.
    pub fn token_cache_path(&self) -> PathBuf {
        self.output_dir.join(TOKEN_CACHE_FILE)
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::MissingVar(var))
}

fn default_scopes() -> HashSet<String> {
    // Read-only access to the library: private and collaborative playlists,
    // saved tracks, followed artists.
    scopes!(
        "playlist-read-private",
        "playlist-read-collaborative",
        "user-library-read",
        "user-follow-read"
    )
}
