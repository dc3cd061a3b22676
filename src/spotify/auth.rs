use reqwest::{Client, Url};

use crate::{
    Error, Res,
    config::Config,
    info,
    server::CallbackServer,
    success,
    types::TokenResponse,
    warning,
};

/// Builds the consent screen URL for the authorization code flow.
///
/// Scope and redirect URI are form-escaped; the redirect URI is passed
/// verbatim from the configuration so it matches the one sent to the token
/// endpoint byte for byte.
pub fn authorize_url(config: &Config, state: &str) -> Url {
    let mut url = config.auth_url.clone();
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &config.client_id)
        .append_pair("scope", &config.scope)
        .append_pair("redirect_uri", config.redirect_uri.as_str())
        .append_pair("state", state);
    url
}

/// Runs the browser half of the authorization code flow.
///
/// 1. Binds the local callback listener.
/// 2. Opens the consent screen in the default browser. If that fails the URL
///    is printed so the user can open it by hand.
/// 3. Waits for exactly one authorization code, bounded by the configured
///    callback timeout.
/// 4. Shuts the listener down.
pub async fn authorize(config: &Config, state: &str) -> Res<String> {
    authorize_with(config, state, webbrowser::open).await
}

/// Same as [`authorize`], with the browser launch supplied by the caller.
pub async fn authorize_with<F>(config: &Config, state: &str, open_browser: F) -> Res<String>
where
    F: FnOnce(&str) -> std::io::Result<()>,
{
    info!("Starting local server for the OAuth callback");
    let (server, code_rx) =
        CallbackServer::start(config.local_server, config.callback_path(), state).await?;

    let auth_url = authorize_url(config, state);
    tracing::debug!(url = %auth_url, "authorization url");

    info!("Opening browser for Spotify authorization");
    if let Err(e) = open_browser(auth_url.as_str()) {
        tracing::debug!("browser launch failed: {}", e);
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        );
    }

    info!(
        "Waiting for the OAuth callback on {} (timeout {}s)",
        server.local_addr(),
        config.callback_timeout.as_secs()
    );
    let received = tokio::time::timeout(config.callback_timeout, code_rx).await;
    server.shutdown().await;

    match received {
        Ok(Ok(code)) => {
            success!("OAuth callback received");
            Ok(code)
        }
        Ok(Err(_)) => Err(Error::CallbackClosed),
        Err(_) => Err(Error::CallbackTimeout(config.callback_timeout)),
    }
}

/// Exchanges an authorization code for an access token.
///
/// Authenticates with HTTP Basic using the client credentials and sends the
/// grant as a form body. The token is only kept in memory; nothing is
/// persisted or refreshed.
///
/// # Errors
///
/// - `Error::Http` when the request cannot be sent or the body cannot be read
/// - `Error::Decode` when the body is not a JSON object
/// - `Error::TokenRejected` when the provider answers with an OAuth error
/// - `Error::MissingAccessToken` when the body has no `access_token`
pub async fn exchange_code(client: &Client, config: &Config, code: &str) -> Res<String> {
    let res = client
        .post(config.token_url.clone())
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(Error::http("token endpoint"))?;

    let status = res.status();
    let body = res.text().await.map_err(Error::http("token endpoint"))?;
    tracing::debug!(%status, "token endpoint responded");

    let token: TokenResponse =
        serde_json::from_str(&body).map_err(Error::decode("token endpoint"))?;

    match token {
        TokenResponse {
            access_token: Some(access_token),
            ..
        } if !access_token.is_empty() => Ok(access_token),
        TokenResponse {
            error: Some(error),
            error_description,
            ..
        } => Err(Error::TokenRejected {
            error,
            description: error_description,
        }),
        _ => Err(Error::MissingAccessToken),
    }
}
