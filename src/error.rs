use std::{net::SocketAddr, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a purge run.
///
/// None of these are retried. The binary prints the message and exits with a
/// non-zero status.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required environment variable {0}")]
    MissingEnv(String),

    #[error("invalid value for {name}: {reason}")]
    InvalidEnv { name: String, reason: String },

    #[error("failed to generate state: {0}")]
    Randomness(String),

    #[error("failed to start callback server on {addr}: {source}")]
    Server {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("no authorization callback received within {0:?}")]
    CallbackTimeout(Duration),

    #[error("callback server stopped before an authorization code arrived")]
    CallbackClosed,

    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("token request rejected: {}", describe_oauth_error(.error, .description))]
    TokenRejected {
        error: String,
        description: Option<String>,
    },

    #[error("access token not found in response")]
    MissingAccessToken,

    #[error("failed to remove albums in batch {batch}: status {status}")]
    RemoveFailed { batch: usize, status: StatusCode },

    #[error("confirmation prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn http(endpoint: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Error::Http { endpoint, source }
    }

    pub(crate) fn decode(endpoint: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Error::Decode { endpoint, source }
    }
}

fn describe_oauth_error(error: &str, description: &Option<String>) -> String {
    match description {
        Some(d) => format!("{error} ({d})"),
        None => error.to_string(),
    }
}
