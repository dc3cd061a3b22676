use sporlpurge::types::{Album, AlbumArtist, SavedAlbum};
use sporlpurge::utils::*;

fn create_test_album(id: &str, name: &str, added_at: Option<&str>, artists: &[&str]) -> SavedAlbum {
    SavedAlbum {
        added_at: added_at.map(str::to_string),
        album: Album {
            id: id.to_string(),
            name: name.to_string(),
            artists: artists
                .iter()
                .map(|a| AlbumArtist {
                    id: None,
                    name: a.to_string(),
                })
                .collect(),
        },
    }
}

#[test]
fn test_generate_state() {
    let state = generate_state().unwrap();

    // 16 bytes, hex encoded
    assert_eq!(state.len(), 32);
    assert!(
        state
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    );

    let state2 = generate_state().unwrap();
    assert_ne!(state, state2);
}

#[test]
fn test_format_added_at() {
    assert_eq!(format_added_at(Some("2024-03-01T12:00:00Z")), "2024-03-01");
    assert_eq!(format_added_at(Some("not a date")), "not a date");
    assert_eq!(format_added_at(None), "-");
}

#[test]
fn test_join_artists() {
    let album = create_test_album("1", "Split", None, &["First", "Second"]);
    assert_eq!(join_artists(&album.album.artists), "First, Second");
    assert_eq!(join_artists(&[]), "");
}

#[test]
fn test_album_table_rows_keep_order() {
    let albums = vec![
        create_test_album("1", "Zeta", Some("2023-01-02T00:00:00Z"), &["A"]),
        create_test_album("2", "Alpha", None, &["B", "C"]),
    ];

    let rows = album_table_rows(&albums);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Zeta");
    assert_eq!(rows[0].added, "2023-01-02");
    assert_eq!(rows[1].name, "Alpha");
    assert_eq!(rows[1].added, "-");
    assert_eq!(rows[1].artists, "B, C");
}

#[test]
fn test_bool_to_text() {
    assert!(bool_to_text(true).to_string().contains("Yes"));
    assert!(bool_to_text(false).to_string().contains("No"));
}
