use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Body of the token endpoint's response.
///
/// Success carries `access_token`; a rejected grant carries `error` and
/// usually `error_description` instead, so every field is optional here and
/// checked by the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// One page of `GET /me/albums`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAlbumsPage {
    pub items: Vec<SavedAlbum>,
    pub total: u64,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAlbum {
    #[serde(default)]
    pub added_at: Option<String>,
    pub album: Album,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub added: String,
    pub name: String,
    pub artists: String,
}

/// Query parameters the provider appends to the redirect URI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}
