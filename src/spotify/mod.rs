//! # Spotify Integration Module
//!
//! The slice of the Spotify Web API this tool needs: the authorization code
//! flow and the saved-albums library endpoints.
//!
//! ## Core Modules
//!
//! ### Authentication
//!
//! [`auth`] - Authorization code flow with a client secret:
//! - **Consent URL**: Builds the `/authorize` URL with a random `state`
//! - **Local Callback**: Captures the redirect on a temporary HTTP listener
//! - **Token Exchange**: Trades the code for a bearer token (HTTP Basic auth)
//!
//! ### Library
//!
//! [`library`] - Saved albums:
//! - `GET /me/albums` - Offset pagination with a fixed page size
//! - `DELETE /me/albums?ids=...` - Removal of up to 20 albums per request
//!
//! ## Error Handling
//!
//! Every function returns [`crate::Res`]. There is no retry and no rate-limit
//! back-off; the first failure ends the run.
//!
//! ## Usage Patterns
//!
//! ```rust,ignore
//! let state = utils::generate_state()?;
//! let code = spotify::auth::authorize(&config, &state).await?;
//! let token = spotify::auth::exchange_code(&client, &config, &code).await?;
//! let albums = spotify::library::get_all_saved_albums(
//!     &client,
//!     &config,
//!     &token,
//!     spotify::library::SAVED_ALBUMS_PAGE_LIMIT,
//! )
//! .await?;
//! ```

pub mod auth;
pub mod library;
