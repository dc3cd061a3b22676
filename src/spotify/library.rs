use reqwest::Client;

use crate::{
    Error, Res,
    config::Config,
    types::{SavedAlbum, SavedAlbumsPage},
};

/// Page size used when listing saved albums.
pub const SAVED_ALBUMS_PAGE_LIMIT: u64 = 50;

/// Number of album ids sent per removal request.
pub const REMOVE_BATCH_SIZE: usize = 20;

fn saved_albums_url(config: &Config) -> String {
    format!("{uri}/me/albums", uri = config.api_url)
}

/// Retrieves one page of the user's saved albums.
///
/// # Errors
///
/// Non-success statuses and transport failures map to `Error::Http`; a body
/// that does not look like a saved-albums page maps to `Error::Decode`.
pub async fn get_saved_albums_page(
    client: &Client,
    config: &Config,
    token: &str,
    limit: u64,
    offset: u64,
) -> Res<SavedAlbumsPage> {
    let body = client
        .get(saved_albums_url(config))
        .query(&[("limit", limit), ("offset", offset)])
        .bearer_auth(token)
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(Error::http("saved albums"))?
        .text()
        .await
        .map_err(Error::http("saved albums"))?;

    serde_json::from_str(&body).map_err(Error::decode("saved albums"))
}

/// Collects every saved album, page by page.
///
/// Starts at offset 0 and advances by `limit`. Stops on an empty page or
/// once `offset + limit` reaches the reported total. Order is preserved. A
/// `limit` of 0 is treated as 1.
pub async fn get_all_saved_albums(
    client: &Client,
    config: &Config,
    token: &str,
    limit: u64,
) -> Res<Vec<SavedAlbum>> {
    let limit = limit.max(1);
    let mut all_albums: Vec<SavedAlbum> = Vec::new();
    let mut offset = 0;
    let mut page_number = 1;

    loop {
        let page = get_saved_albums_page(client, config, token, limit, offset).await?;
        tracing::debug!(
            page = page_number,
            offset,
            items = page.items.len(),
            total = page.total,
            "fetched saved albums page"
        );

        if page.items.is_empty() {
            break;
        }
        all_albums.extend(page.items);

        if offset + limit >= page.total {
            break;
        }

        offset += limit;
        page_number += 1;
    }

    Ok(all_albums)
}

/// Removes the given albums from the user's library in one request.
///
/// The caller keeps `ids` within the provider's per-request maximum.
///
/// # Errors
///
/// Transport failures map to `Error::Http`; any non-success status maps to
/// `Error::RemoveFailed`, with the batch number left at 0 for the caller to
/// fill in.
pub async fn remove_saved_albums(
    client: &Client,
    config: &Config,
    token: &str,
    ids: &[String],
) -> Res<()> {
    let res = client
        .delete(saved_albums_url(config))
        .query(&[("ids", ids.join(","))])
        .bearer_auth(token)
        .send()
        .await
        .map_err(Error::http("remove saved albums"))?;

    let status = res.status();
    if !status.is_success() {
        return Err(Error::RemoveFailed { batch: 0, status });
    }
    Ok(())
}
