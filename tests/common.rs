#![allow(dead_code)]

use std::collections::HashMap;

use serde_json::{Value, json};
use sporlpurge::config::Config;

pub const CLIENT_ID: &str = "client123";
pub const CLIENT_SECRET: &str = "s3cret";
pub const TOKEN: &str = "test-access-token";

/// Configuration pointing every endpoint at a mock server.
pub fn test_config(base_url: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("CLIENT_ID", CLIENT_ID.to_string()),
        ("CLIENT_SECRET", CLIENT_SECRET.to_string()),
        ("TOKEN_URL", format!("{base_url}/api/token")),
        ("API_URL", base_url.to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn album_id(n: usize) -> String {
    format!("album{n:03}")
}

/// A `GET /me/albums` page holding albums `start..start + count`.
pub fn page_body(start: usize, count: usize, total: usize) -> String {
    let items: Vec<Value> = (start..start + count)
        .map(|n| {
            json!({
                "added_at": "2024-03-01T12:00:00Z",
                "album": {
                    "id": album_id(n),
                    "name": format!("Album {n}"),
                    "artists": [{ "id": format!("artist{n}"), "name": format!("Artist {n}") }]
                }
            })
        })
        .collect();

    json!({
        "href": "https://api.spotify.com/v1/me/albums",
        "items": items,
        "limit": 50,
        "offset": start,
        "total": total,
        "next": null
    })
    .to_string()
}
