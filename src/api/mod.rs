//! # API Module
//!
//! HTTP handlers for the short-lived listener that receives the OAuth
//! redirect during `spotilist login`.
//!
//! ## Endpoints
//!
//! - [`callback`] - `GET /callback?code=...&state=...`. Checks the anti-CSRF
//!   state and hands the authorization code (or the reason there is none) to
//!   the waiting login flow through a one-shot channel. Only the first
//!   request is acted upon.
//! - [`unexpected`] - fallback for every other path. Logs the request and
//!   answers `404 Not Found`.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use spotilist::api::{CallbackState, callback, unexpected};
//!
//! let (tx, rx) = tokio::sync::oneshot::channel();
//! let app = Router::new()
//!     .route("/callback", get(callback).layer(Extension(CallbackState::new("state", tx))))
//!     .fallback(unexpected);
//! ```

mod callback;

pub use callback::{
    CallbackOutcome, CallbackParams, CallbackState, callback, evaluate, unexpected,
};
