use std::sync::Arc;

use axum::{
    Extension,
    extract::Query,
    http::{StatusCode, Uri},
    response::Html,
};
use serde::Deserialize;
use tokio::sync::{Mutex, oneshot};

use crate::{Error, Result, warning};

/// What the login flow hears back from the callback listener.
pub type CallbackOutcome = Result<String>;

/// Shared between the `/callback` handler and the login flow. The sender
/// is taken by the first request, so at most one outcome is ever delivered.
#[derive(Clone)]
pub struct CallbackState {
    expected_state: Arc<str>,
    sender: Arc<Mutex<Option<oneshot::Sender<CallbackOutcome>>>>,
}

impl CallbackState {
    pub fn new(expected_state: &str, sender: oneshot::Sender<CallbackOutcome>) -> Self {
        Self {
            expected_state: Arc::from(expected_state),
            sender: Arc::new(Mutex::new(Some(sender))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub type Reply = (StatusCode, Html<&'static str>);

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(shared_state): Extension<CallbackState>,
) -> Reply {
    let Some(sender) = shared_state.sender.lock().await.take() else {
        warning!("Ignoring repeated callback request");
        return (
            StatusCode::GONE,
            Html("<h4>Login was already handled.</h4>"),
        );
    };

    let (outcome, reply) = evaluate(&shared_state.expected_state, params);
    if sender.send(outcome).is_err() {
        warning!("Login flow stopped waiting before the callback arrived");
    }
    reply
}

pub async fn unexpected(uri: Uri) -> StatusCode {
    warning!("Received unexpected request for: {}", uri);
    StatusCode::NOT_FOUND
}

/// Decides what a callback request means. The state is checked before
/// anything else the request carries.
pub fn evaluate(expected_state: &str, params: CallbackParams) -> (CallbackOutcome, Reply) {
    let received = params.state.unwrap_or_default();
    if received != expected_state {
        return (
            Err(Error::StateMismatch { received }),
            (StatusCode::FORBIDDEN, Html("<h4>State mismatch.</h4>")),
        );
    }

    if let Some(error) = params.error {
        return (
            Err(Error::AuthorizationDenied(error)),
            (StatusCode::FORBIDDEN, Html("<h4>Login failed.</h4>")),
        );
    }

    match params.code.filter(|c| !c.is_empty()) {
        Some(code) => (
            Ok(code),
            (
                StatusCode::OK,
                Html("<h2>Login completed!</h2><p>You may now close this window.</p>"),
            ),
        ),
        None => (
            Err(Error::MissingCode),
            (
                StatusCode::BAD_REQUEST,
                Html("<h4>Missing authorization code.</h4>"),
            ),
        ),
    }
}
