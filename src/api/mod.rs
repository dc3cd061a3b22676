//! # API Module
//!
//! HTTP endpoints served by the short-lived local listener that receives the
//! OAuth redirect.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the provider's redirect, checks the `state`
//!   value and hands the authorization code to the waiting flow through a
//!   one-shot channel. A request without a `code` gets `401` and hands over
//!   nothing.
//! - [`health`] - Returns status and version, useful to check that the
//!   listener is up.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use sporlpurge::api::{CallbackState, callback, health};
//!
//! let (state, code_rx) = CallbackState::new("expected-state");
//! let app = Router::new()
//!     .route("/callback", get(callback).layer(Extension(state)))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::{CallbackState, callback};
pub use health::health;
