//! Configuration management for the Spotify Saved Album Purge tool.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files into a single immutable [`Config`] value that
//! is built once at startup and handed to every component that needs it.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory or the local data directory
//! 3. Application defaults (where applicable)
//!
//! Every variable is looked up with a `SPOTIFY_` prefix first and then under
//! its bare name, so both `SPOTIFY_CLIENT_ID` and `CLIENT_ID` work.

use std::{env, fmt, net::SocketAddr, path::PathBuf, time::Duration};

use reqwest::Url;

use crate::{Error, Res, warning};

const ENV_PREFIX: &str = "SPOTIFY_";

pub const DEFAULT_LOCAL_SERVER: &str = "127.0.0.1:4001";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:4001/callback";
pub const DEFAULT_SCOPE: &str = "user-library-read user-library-modify";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_CALLBACK_TIMEOUT_SECS: u64 = 120;

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` in the working directory first and then in the
/// platform-specific local data directory under `sporlpurge/.env`. Values
/// that are already set in the process environment are never overwritten.
/// A missing file is not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/sporlpurge/.env`
/// - macOS: `~/Library/Application Support/sporlpurge/.env`
/// - Windows: `%LOCALAPPDATA%/sporlpurge/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub async fn load_env() -> Res<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlpurge/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    // Runs before logging is set up, so problems go straight to the terminal.
    if let Err(e) = dotenv::dotenv() {
        if should_report(&e) {
            warning!("Cannot parse .env in working directory. Err: {}", e);
        }
    }
    if path.is_file() {
        if let Err(e) = dotenv::from_path(&path) {
            warning!("Cannot parse {}. Err: {}", path.display(), e);
        }
    }
    Ok(())
}

/// A missing `.env` is normal; anything else is worth a warning.
fn should_report(err: &dotenv::Error) -> bool {
    !err.not_found()
}

/// Runtime configuration, read once and never mutated afterwards.
#[derive(Clone)]
pub struct Config {
    pub debug: bool,
    pub client_id: String,
    pub client_secret: String,
    pub local_server: SocketAddr,
    /// Sent to the provider exactly as configured.
    pub redirect_uri: String,
    callback_path: String,
    pub scope: String,
    pub auth_url: Url,
    pub token_url: Url,
    pub api_url: String,
    pub callback_timeout: Duration,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}"))
                .or_else(|| lookup(name))
                .filter(|v| !v.trim().is_empty())
        };
        let required = |name: &str| get(name).ok_or_else(|| Error::MissingEnv(name.to_string()));

        let debug = match get("DEBUG") {
            Some(v) => parse_bool(&v).ok_or_else(|| invalid("DEBUG", "expected a boolean"))?,
            None => false,
        };

        let client_id = required("CLIENT_ID")?;
        let client_secret = required("CLIENT_SECRET")?;

        let local_server = get("LOCAL_SERVER")
            .unwrap_or_else(|| DEFAULT_LOCAL_SERVER.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| invalid("LOCAL_SERVER", e))?;

        let redirect_uri = get("REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());
        let callback_path = parse_url("REDIRECT_URI", &redirect_uri)?.path().to_string();
        let auth_url = parse_url("AUTH_URL", get("AUTH_URL").as_deref().unwrap_or(DEFAULT_AUTH_URL))?;
        let token_url = parse_url(
            "TOKEN_URL",
            get("TOKEN_URL").as_deref().unwrap_or(DEFAULT_TOKEN_URL),
        )?;

        let api_url = get("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        parse_url("API_URL", &api_url)?;
        let api_url = api_url.trim_end_matches('/').to_string();

        let scope = get("SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string());

        let callback_timeout = match get("CALLBACK_TIMEOUT") {
            Some(v) => parse_timeout(&v)?,
            None => Duration::from_secs(DEFAULT_CALLBACK_TIMEOUT_SECS),
        };

        Ok(Config {
            debug,
            client_id,
            client_secret,
            local_server,
            redirect_uri,
            callback_path,
            scope,
            auth_url,
            token_url,
            api_url,
            callback_timeout,
        })
    }

    /// The route the local listener serves, taken from the redirect URI.
    pub fn callback_path(&self) -> &str {
        &self.callback_path
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("debug", &self.debug)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("local_server", &self.local_server)
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("auth_url", &self.auth_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("api_url", &self.api_url)
            .field("callback_timeout", &self.callback_timeout)
            .finish()
    }
}

fn invalid(name: &str, reason: impl fmt::Display) -> Error {
    Error::InvalidEnv {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_url(name: &str, value: &str) -> Res<Url> {
    Url::parse(value).map_err(|e| invalid(name, e))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_timeout(value: &str) -> Res<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid("CALLBACK_TIMEOUT", "must be greater than zero")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(invalid("CALLBACK_TIMEOUT", e)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let config =
            Config::from_lookup(lookup(&[("CLIENT_ID", "id"), ("CLIENT_SECRET", "secret")]))
                .unwrap();

        assert!(!config.debug);
        assert_eq!(config.client_id, "id");
        assert_eq!(config.client_secret, "secret");
        assert_eq!(config.local_server.to_string(), DEFAULT_LOCAL_SERVER);
        assert_eq!(config.redirect_uri.as_str(), DEFAULT_REDIRECT_URI);
        assert_eq!(config.scope, DEFAULT_SCOPE);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.callback_path(), "/callback");
        assert_eq!(
            config.callback_timeout,
            Duration::from_secs(DEFAULT_CALLBACK_TIMEOUT_SECS)
        );
    }

    #[test]
    fn prefixed_variables_take_precedence() {
        let config = Config::from_lookup(lookup(&[
            ("SPOTIFY_CLIENT_ID", "prefixed"),
            ("CLIENT_ID", "bare"),
            ("CLIENT_SECRET", "secret"),
            ("SPOTIFY_SCOPE", "user-library-read"),
        ]))
        .unwrap();

        assert_eq!(config.client_id, "prefixed");
        assert_eq!(config.scope, "user-library-read");
    }

    #[test]
    fn missing_client_id_is_reported_by_name() {
        let err = Config::from_lookup(lookup(&[("CLIENT_SECRET", "secret")])).unwrap_err();
        assert!(matches!(err, Error::MissingEnv(ref name) if name == "CLIENT_ID"));
    }

    #[test]
    fn empty_client_secret_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("CLIENT_ID", "id"), ("CLIENT_SECRET", "  ")]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingEnv(ref name) if name == "CLIENT_SECRET"));
    }

    #[test]
    fn debug_accepts_boolean_spellings() {
        for (raw, expected) in [("1", true), ("True", true), ("f", false), ("FALSE", false)] {
            let config = Config::from_lookup(lookup(&[
                ("CLIENT_ID", "id"),
                ("CLIENT_SECRET", "secret"),
                ("DEBUG", raw),
            ]))
            .unwrap();
            assert_eq!(config.debug, expected, "DEBUG={raw}");
        }

        let err = Config::from_lookup(lookup(&[
            ("CLIENT_ID", "id"),
            ("CLIENT_SECRET", "secret"),
            ("DEBUG", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidEnv { ref name, .. } if name == "DEBUG"));
    }

    #[test]
    fn invalid_local_server_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("CLIENT_ID", "id"),
            ("CLIENT_SECRET", "secret"),
            ("LOCAL_SERVER", "localhost"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidEnv { ref name, .. } if name == "LOCAL_SERVER"));
    }

    #[test]
    fn callback_path_follows_redirect_uri() {
        let config = Config::from_lookup(lookup(&[
            ("CLIENT_ID", "id"),
            ("CLIENT_SECRET", "secret"),
            ("REDIRECT_URI", "http://127.0.0.1:8888/spotify/done"),
        ]))
        .unwrap();
        assert_eq!(config.callback_path(), "/spotify/done");
    }

    #[test]
    fn only_broken_env_files_are_reported() {
        let missing = dotenv::Error::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(!should_report(&missing));

        let broken = dotenv::Error::LineParse("KEY VALUE".to_string(), 3);
        assert!(should_report(&broken));
    }

    #[test]
    fn redirect_uri_is_kept_verbatim() {
        for raw in ["http://LOCALHOST:80", "http://127.0.0.1:4001"] {
            let config = Config::from_lookup(lookup(&[
                ("CLIENT_ID", "id"),
                ("CLIENT_SECRET", "secret"),
                ("REDIRECT_URI", raw),
            ]))
            .unwrap();
            assert_eq!(config.redirect_uri, raw);
            assert_eq!(config.callback_path(), "/");
        }
    }

    #[test]
    fn invalid_redirect_uri_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("CLIENT_ID", "id"),
            ("CLIENT_SECRET", "secret"),
            ("REDIRECT_URI", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidEnv { ref name, .. } if name == "REDIRECT_URI"));
    }

    #[test]
    fn api_url_trailing_slash_is_trimmed() {
        let config = Config::from_lookup(lookup(&[
            ("CLIENT_ID", "id"),
            ("CLIENT_SECRET", "secret"),
            ("API_URL", "http://127.0.0.1:9000/v1/"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:9000/v1");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("abc").is_err());
        assert_eq!(parse_timeout("30").unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config =
            Config::from_lookup(lookup(&[("CLIENT_ID", "id"), ("CLIENT_SECRET", "hunter2")]))
                .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
