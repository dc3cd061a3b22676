use std::fmt::Write as _;

use chrono::DateTime;
use colored::{ColoredString, Colorize};
use rand::{TryRngCore, rngs::OsRng};

use crate::{
    Error, Res,
    types::{AlbumArtist, AlbumTableRow, SavedAlbum},
};

const STATE_BYTES: usize = 16;

/// Generates the OAuth `state` value: 16 bytes from the OS random source,
/// hex encoded.
pub fn generate_state() -> Res<String> {
    let mut bytes = [0u8; STATE_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::Randomness(e.to_string()))?;

    let mut state = String::with_capacity(STATE_BYTES * 2);
    for b in bytes {
        let _ = write!(state, "{b:02x}");
    }
    Ok(state)
}

/// Converts a boolean value to a colored "Yes" or "No".
pub fn bool_to_text(b: bool) -> ColoredString {
    if b { "Yes".green() } else { "No".red() }
}

/// Shortens an RFC 3339 `added_at` timestamp to its date.
pub fn format_added_at(added_at: Option<&str>) -> String {
    match added_at {
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts.format("%Y-%m-%d").to_string(),
            Err(_) => raw.to_string(),
        },
        None => "-".to_string(),
    }
}

pub fn join_artists(artists: &[AlbumArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn album_table_rows(albums: &[SavedAlbum]) -> Vec<AlbumTableRow> {
    albums
        .iter()
        .map(|saved| AlbumTableRow {
            added: format_added_at(saved.added_at.as_deref()),
            name: saved.album.name.clone(),
            artists: join_artists(&saved.album.artists),
        })
        .collect()
}
