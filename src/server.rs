use std::net::SocketAddr;

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

use crate::{
    Error, Res,
    api::{self, CallbackState},
};

/// The local listener that captures the OAuth redirect.
///
/// The socket is bound in [`CallbackServer::start`], before the caller opens
/// the browser, so the redirect cannot arrive ahead of the listener.
pub struct CallbackServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl CallbackServer {
    /// Binds `addr`, serves `path` and `/health`, and returns the receiving end
    /// of the one-shot code handoff.
    pub async fn start(
        addr: SocketAddr,
        path: &str,
        expected_state: &str,
    ) -> Res<(Self, oneshot::Receiver<String>)> {
        let (state, code_rx) = CallbackState::new(expected_state);

        let mut app = Router::new().route(path, get(api::callback).layer(Extension(state)));
        if path != "/health" {
            app = app.route("/health", get(api::health));
        }

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Server { addr, source })?;
        let addr = listener
            .local_addr()
            .map_err(|source| Error::Server { addr, source })?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(err) = serve.await {
                tracing::error!(%addr, "callback server failed: {}", err);
            }
        });

        tracing::debug!(%addr, "callback server listening");
        Ok((
            CallbackServer {
                addr,
                shutdown: Some(shutdown_tx),
                task,
            },
            code_rx,
        ))
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops accepting connections and waits for in-flight responses.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(err) = (&mut self.task).await {
            tracing::warn!("callback server task ended abnormally: {}", err);
        }
        tracing::debug!(addr = %self.addr, "callback server stopped");
    }
}
