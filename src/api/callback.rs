use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, rejection::QueryRejection},
    http::StatusCode,
    response::Html,
};
use tokio::sync::{Mutex, oneshot};

use crate::types::CallbackParams;

/// Shared state between the callback route and the waiting authorization flow.
///
/// The sender is taken on the first valid callback, so at most one code is
/// ever handed over.
#[derive(Clone)]
pub struct CallbackState {
    expected_state: Arc<str>,
    sender: Arc<Mutex<Option<oneshot::Sender<String>>>>,
}

impl CallbackState {
    pub fn new(expected_state: &str) -> (Self, oneshot::Receiver<String>) {
        let (tx, rx) = oneshot::channel();
        let state = CallbackState {
            expected_state: Arc::from(expected_state),
            sender: Arc::new(Mutex::new(Some(tx))),
        };
        (state, rx)
    }
}

pub async fn callback(
    query: Result<Query<CallbackParams>, QueryRejection>,
    Extension(shared_state): Extension<CallbackState>,
) -> (StatusCode, Html<&'static str>) {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::warn!("malformed callback query: {}", rejection);
            return (
                StatusCode::UNAUTHORIZED,
                Html("<h4>Authorization failed.</h4>"),
            );
        }
    };

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        if let Some(err) = params.error {
            tracing::warn!("authorization denied by provider: {}", err);
        }
        return (
            StatusCode::UNAUTHORIZED,
            Html("<h4>Authorization failed.</h4>"),
        );
    };

    if params.state.as_deref() != Some(&*shared_state.expected_state) {
        tracing::warn!(received = ?params.state, "callback state does not match");
        return (StatusCode::UNAUTHORIZED, Html("<h4>State mismatch.</h4>"));
    }

    let Some(sender) = shared_state.sender.lock().await.take() else {
        return (
            StatusCode::CONFLICT,
            Html("<h4>Authorization already completed.</h4>"),
        );
    };

    if sender.send(code).is_err() {
        tracing::warn!("authorization flow stopped waiting before the code arrived");
        return (
            StatusCode::GONE,
            Html("<h4>Authorization is no longer pending.</h4>"),
        );
    }

    tracing::debug!("authorization code handed over");
    (
        StatusCode::OK,
        Html("<h2>Authorization code received.</h2><p>You can close this window.</p>"),
    )
}
