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
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::models::BackupDocument;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write backup file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode backup document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Name of the JSON export. Minute-granular, so repeated runs never
/// overwrite an earlier backup.
pub fn json_file_name(at: &DateTime<Local>) -> String {
    format!("spotify_full_backup_{}.json", at.format("%Y-%m-%d_%H-%M"))
}

/// Name of the text export. Day-granular: a second run on the same day
/// replaces it with the latest snapshot.
pub fn text_file_name(at: &DateTime<Local>) -> String {
    format!("spotify_backup_{}.txt", at.format("%Y-%m-%d"))
}

/// Writes the aggregate as indented JSON.
///
/// Absent track entries stay in the document as `null`, and names in
/// arbitrary scripts are written verbatim (serde_json does not escape
/// non-ASCII).
pub fn write_json(
    document: &BackupDocument,
    dir: &Path,
    at: &DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(json_file_name(at));
    let json = serde_json::to_string_pretty(document)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Writes the human-readable listing: per record, the name underlined with a
/// rule of the same character width, one line per present track, then a
/// blank separator. Entries without track data are skipped.
pub fn write_text(
    document: &BackupDocument,
    dir: &Path,
    at: &DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(text_file_name(at));
    let mut out = String::new();
    for record in &document.playlists {
        out.push_str(&record.name);
        out.push('\n');
        out.push_str(&"-".repeat(record.name.chars().count()));
        out.push('\n');
        for track in record.tracks.iter().flatten() {
            out.push_str(&track.to_string());
            out.push('\n');
        }
        out.push_str("\n\n");
    }
    fs::write(&path, out)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlaylistRecord, Track};
    use chrono::TimeZone;

    fn track(name: &str, artists: &[&str], album: &str) -> Track {
        Track {
            id: None,
            name: name.to_string(),
            artists: artists.iter().map(|a| a.to_string()).collect(),
            album: album.to_string(),
            release_date: None,
            duration_ms: 200_000,
        }
    }

    fn stamp(hour: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 6, hour, min, 0).unwrap()
    }

    #[test]
    fn test_text_export_skips_absent_tracks() {
        let mut document = BackupDocument::new();
        document.push(PlaylistRecord::playlist(
            "Road Trip",
            None,
            vec![
                Some(track("Highway Song", &["The Drivers"], "Asphalt")),
                None,
                Some(track("Night Drive", &["Neon", "Grid"], "Afterglow")),
            ],
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = write_text(&document, dir.path(), &stamp(10, 0)).unwrap();
        let contents = fs::read_to_string(path).unwrap();

        assert_eq!(
            contents,
            "Road Trip\n\
             ---------\n\
             Highway Song  —  The Drivers  —  Asphalt\n\
             Night Drive  —  Neon, Grid  —  Afterglow\n\
             \n\n"
        );
    }

    #[test]
    fn test_header_rule_matches_character_width() {
        let mut document = BackupDocument::new();
        document.push(PlaylistRecord::playlist("Кириллица ❤", None, vec![]));

        let dir = tempfile::tempdir().unwrap();
        let path = write_text(&document, dir.path(), &stamp(10, 0)).unwrap();
        let contents = fs::read_to_string(path).unwrap();

        let mut lines = contents.lines();
        let header = lines.next().unwrap();
        let rule = lines.next().unwrap();
        assert_eq!(rule.chars().count(), header.chars().count());
        assert!(rule.chars().all(|c| c == '-'));
    }

    #[test]
    fn test_same_day_runs_share_the_text_file_but_not_the_json() {
        let first = stamp(9, 15);
        let second = stamp(18, 42);

        assert_ne!(json_file_name(&first), json_file_name(&second));
        assert_eq!(text_file_name(&first), text_file_name(&second));

        let dir = tempfile::tempdir().unwrap();
        let mut early = BackupDocument::new();
        early.push(PlaylistRecord::playlist(
            "Morning",
            None,
            vec![Some(track("Sunrise", &["Dawn"], "Early"))],
        ));
        let mut late = BackupDocument::new();
        late.push(PlaylistRecord::playlist(
            "Evening",
            None,
            vec![Some(track("Sunset", &["Dusk"], "Late"))],
        ));

        write_json(&early, dir.path(), &first).unwrap();
        write_text(&early, dir.path(), &first).unwrap();
        write_json(&late, dir.path(), &second).unwrap();
        let text_path = write_text(&late, dir.path(), &second).unwrap();

        let json_files = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".json"))
            .count();
        assert_eq!(json_files, 2);

        let contents = fs::read_to_string(text_path).unwrap();
        assert!(contents.contains("Evening"));
        assert!(!contents.contains("Morning"));
    }

    #[test]
    fn test_empty_document_still_produces_valid_files() {
        let document = BackupDocument::new();
        let dir = tempfile::tempdir().unwrap();

        let json_path = write_json(&document, dir.path(), &stamp(12, 0)).unwrap();
        let text_path = write_text(&document, dir.path(), &stamp(12, 0)).unwrap();

        assert_eq!(fs::read_to_string(json_path).unwrap(), "[]");
        assert_eq!(fs::read_to_string(text_path).unwrap(), "");
    }

    #[test]
    fn test_json_export_round_trips() {
        let mut document = BackupDocument::new();
        document.push(PlaylistRecord::liked(vec![
            Some(track("群青", &["YOASOBI"], "THE BOOK")),
            None,
        ]));
        document.push(PlaylistRecord::playlist(
            "Mix",
            Some("https://open.spotify.com/playlist/x".to_string()),
            vec![Some(track("Time", &["Pink Floyd"], "The Dark Side of the Moon"))],
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = write_json(&document, dir.path(), &stamp(12, 0)).unwrap();
        let written = fs::read_to_string(path).unwrap();

        // Non-ASCII written verbatim, not \u-escaped.
        assert!(written.contains("群青"));

        let decoded: BackupDocument = serde_json::from_str(&written).unwrap();
        assert_eq!(decoded, document);
    }
}
