//! Error type shared by every layer of the tool.
//!
//! Library code never exits the process. Failures travel up as [`Error`]
//! values and the binary decides how to report them.

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// Every failure the tool can run into, grouped the way they are reported.
#[derive(Debug, Error)]
pub enum Error {
    // configuration
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid value for {name}: {reason}")]
    InvalidConfig { name: &'static str, reason: String },

    #[error("cannot bind callback listener on port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    // authentication
    #[error("state mismatch, callback carried state {received:?}")]
    StateMismatch { received: String },

    #[error("authorization was denied: {0}")]
    AuthorizationDenied(String),

    #[error("callback did not carry an authorization code")]
    MissingCode,

    #[error("no authorization callback received within {0:?}")]
    CallbackTimeout(Duration),

    #[error("callback listener stopped before delivering a result")]
    CallbackAborted,

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("no credentials stored at {}", .0.display())]
    MissingCredentials(PathBuf),

    #[error("credential cache {} is corrupt: {source}", path.display())]
    CorruptCredentials {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // api
    #[error("spotify api returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    // filesystem
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// A follow-up the user can act on, if there is an obvious one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::MissingCredentials(_) | Error::CorruptCredentials { .. } => {
                Some("Run `spotilist login` to store new credentials.")
            }
            Error::Api { status: 401, .. } => {
                Some("The stored token was rejected. Run `spotilist login` again.")
            }
            Error::MissingEnv(_) | Error::InvalidConfig { .. } => {
                Some("Check your .env file or process environment.")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
