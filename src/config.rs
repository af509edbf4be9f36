//! Configuration management for the Spotify Playlist Exporter.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. Values are read once into typed
//! structs which are then passed explicitly to the components that need them.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_CACHE_FILE: &str = ".cache";
pub const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 300;

/// Permissions requested during login.
pub const SCOPES: [&str; 3] = [
    "playlist-read-private",
    "playlist-read-collaborative",
    "user-library-read",
];

/// Loads environment variables from a `.env` file.
///
/// The current directory is searched first, then the platform-specific
/// local data directory under `spotilist/.env`:
/// - Linux: `~/.local/share/spotilist/.env`
/// - macOS: `~/Library/Application Support/spotilist/.env`
/// - Windows: `%LOCALAPPDATA%/spotilist/.env`
///
/// Variables already present in the process environment are never
/// overridden.
///
/// # Returns
///
/// The path of the file that was loaded, or `None` when neither location
/// holds a `.env` file. A missing file is not an error because every value
/// can also come straight from the process environment.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if a `.env` file exists but cannot be
/// parsed.
pub fn load_env() -> Result<Option<PathBuf>> {
    let mut candidates = vec![PathBuf::from(".env")];
    if let Some(mut path) = dirs::data_local_dir() {
        path.push("spotilist/.env");
        candidates.push(path);
    }

    load_env_from(&candidates)
}

/// Loads the first existing file among `candidates`.
///
/// The whole file is parsed before anything is exported, so a malformed
/// line leaves the process environment untouched.
pub fn load_env_from(candidates: &[PathBuf]) -> Result<Option<PathBuf>> {
    let Some(path) = candidates.iter().find(|path| path.is_file()) else {
        return Ok(None);
    };

    let malformed = |e: dotenv::Error| Error::InvalidConfig {
        name: ".env",
        reason: format!("{}: {}", path.display(), e),
    };

    dotenv::from_path_iter(path)
        .map_err(malformed)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(malformed)?;
    dotenv::from_path(path).map_err(malformed)?;

    Ok(Some(path.clone()))
}

/// Settings every command needs. All of them have defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the Spotify Web API (`SPOTIFY_API_URL`).
    pub api_url: String,
    /// Authorization endpoint (`SPOTIFY_API_AUTH_URL`).
    pub auth_url: String,
    /// Token endpoint (`SPOTIFY_API_TOKEN_URL`).
    pub token_url: String,
    /// Where the OAuth token is cached (`SPOTILIST_CACHE_FILE`).
    pub cache_file: PathBuf,
    /// How long `login` waits for the browser redirect
    /// (`SPOTILIST_LOGIN_TIMEOUT`, seconds).
    pub login_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated like missing ones and fall back to the
    /// default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `SPOTILIST_LOGIN_TIMEOUT` is not a
    /// positive number of seconds.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| non_empty(&lookup, key).unwrap_or(default.to_string());

        let login_timeout = match non_empty(&lookup, "SPOTILIST_LOGIN_TIMEOUT") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|e| Error::InvalidConfig {
                    name: "SPOTILIST_LOGIN_TIMEOUT",
                    reason: format!("{raw:?}: {e}"),
                })?;
                if secs == 0 {
                    return Err(Error::InvalidConfig {
                        name: "SPOTILIST_LOGIN_TIMEOUT",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_LOGIN_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url: get("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            auth_url: get("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: get("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            cache_file: PathBuf::from(get("SPOTILIST_CACHE_FILE", DEFAULT_CACHE_FILE)),
            login_timeout,
        })
    }
}

/// Settings only the `login` command needs. All of them are required.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginConfig {
    /// Port of the local callback listener (`HTTP_PORT`).
    pub http_port: u16,
    /// Redirect URI registered with the Spotify application
    /// (`SPOTIFY_REDIRECT_URI`).
    pub redirect_uri: String,
    /// `SPOTIFY_CLIENT_ID`
    pub client_id: String,
    /// `SPOTIFY_CLIENT_SECRET`. Never printed.
    pub client_secret: String,
    pub scopes: Vec<String>,
}

impl LoginConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns [`Error::MissingEnv`] for the first required key that is
    /// absent or empty, and [`Error::InvalidConfig`] if `HTTP_PORT` is not a
    /// valid port number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| non_empty(&lookup, key).ok_or(Error::MissingEnv(key));

        let raw_port = require("HTTP_PORT")?;
        let http_port = raw_port.parse().map_err(|e| Error::InvalidConfig {
            name: "HTTP_PORT",
            reason: format!("{raw_port:?}: {e}"),
        })?;

        Ok(Self {
            http_port,
            redirect_uri: require("SPOTIFY_REDIRECT_URI")?,
            client_id: require("SPOTIFY_CLIENT_ID")?,
            client_secret: require("SPOTIFY_CLIENT_SECRET")?,
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
