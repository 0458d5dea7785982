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

use std::fs;
use std::io::{self, Write};

use anyhow::Context;
use backup_core::{
    current_user_name, get_spotify_client, write_json, write_text, Archiver, BackupConfig, Progress,
};
use chrono::Local;
use clap::Parser;
use dotenvy::dotenv;
use log::debug;

#[derive(Parser)]
#[command(name = "spotify-backup")]
#[command(version)]
#[command(about = "Export your Spotify library (liked songs and playlists) to local JSON and text backups", long_about = None)]
struct Cli;

/// In-place `fetched/declared` counter on stderr while a collection is
/// being paginated.
#[derive(Default)]
struct ConsoleProgress {
    label: String,
    declared_total: u32,
    fetched: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, label: &str, declared_total: u32) {
        self.label = label.to_string();
        self.declared_total = declared_total;
        self.fetched = 0;
    }

    fn advance(&mut self, count: usize) {
        self.fetched += count;
        eprint!(
            "\r  {}: {}/{}",
            self.label, self.fetched, self.declared_total
        );
        let _ = io::stderr().flush();
    }

    fn finish(&mut self) {
        if !self.label.is_empty() {
            eprintln!();
            self.label.clear();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    if dotenv().is_err() {
        debug!("no .env file found, using the process environment");
    }
    Cli::parse();

    let config = BackupConfig::from_env().context("incomplete configuration")?;
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    println!("Spotify Backup");
    let spotify = get_spotify_client(&config)
        .await
        .context("Spotify authorization failed")?;

    let user = current_user_name(&spotify)
        .await
        .context("failed to fetch the user profile")?;
    println!("Hello, {user}!");
    println!();

    let archiver = Archiver::new(spotify, config.request_timeout);
    let mut progress = ConsoleProgress::default();
    let document = archiver
        .run(&mut progress)
        .await
        .context("library fetch failed")?;

    println!();
    println!(
        "Done! {} playlists, {} tracks in total",
        document.len(),
        document.total_tracks()
    );

    // One timestamp for both files: the JSON name is minute-granular, the
    // text name day-granular.
    let stamp = Local::now();
    let json_path =
        write_json(&document, &config.output_dir, &stamp).context("JSON export failed")?;
    println!("Saved: {}", json_path.display());
    let text_path =
        write_text(&document, &config.output_dir, &stamp).context("text export failed")?;
    println!("Saved: {}", text_path.display());

    println!();
    println!("Everything is in {}", config.output_dir.display());
    Ok(())
}
