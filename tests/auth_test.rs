mod common;

use std::{collections::HashMap, net::TcpListener};

use axum::{
    Form, Json, Router,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{TimeDelta, TimeZone, Utc};
use serde_json::json;
use reqwest::Url;
use spotilist::{
    Error,
    config::LoginConfig,
    management::CredentialCache,
    spotify::auth::{authorize, authorize_url, credential_from_response, exchange_code},
    types::TokenResponse,
};
use tempfile::tempdir;

// base64("client-id:client-secret")
const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

async fn token(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> Response {
    if headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some(BASIC_AUTH) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid_client"})),
        )
            .into_response();
    }

    let valid = form.get("grant_type").map(String::as_str) == Some("authorization_code")
        && form.get("code").map(String::as_str) == Some("good-code")
        && form.get("redirect_uri").map(String::as_str) == Some("http://127.0.0.1:8080/callback");
    if !valid {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid authorization code"
            })),
        )
            .into_response();
    }

    Json(json!({
        "access_token": "new-access",
        "token_type": "Bearer",
        "scope": "playlist-read-private",
        "expires_in": 3600,
        "refresh_token": "new-refresh"
    }))
    .into_response()
}

async fn mock_accounts() -> String {
    common::serve(Router::new().route("/api/token", post(token))).await
}

#[test]
fn test_authorize_url() {
    let config = common::test_config("https://accounts.example.com");
    let login = common::test_login_config();

    let url = authorize_url(&config, &login, "state123").unwrap();
    let query: HashMap<String, String> = url.query_pairs().into_owned().collect();

    assert_eq!(url.path(), "/authorize");
    assert_eq!(query["client_id"], "client-id");
    assert_eq!(query["response_type"], "code");
    assert_eq!(query["redirect_uri"], "http://127.0.0.1:8080/callback");
    assert_eq!(
        query["scope"],
        "playlist-read-private playlist-read-collaborative user-library-read"
    );
    assert_eq!(query["state"], "state123");
    // The secret never ends up in the browser
    assert!(!url.as_str().contains("client-secret"));
}

#[test]
fn test_authorize_url_rejects_bad_endpoint() {
    let mut config = common::test_config("https://accounts.example.com");
    config.auth_url = "not a url".to_string();

    let result = authorize_url(&config, &common::test_login_config(), "state123");
    assert!(matches!(
        result,
        Err(Error::InvalidConfig {
            name: "SPOTIFY_API_AUTH_URL",
            ..
        })
    ));
}

#[test]
fn test_credential_from_response() {
    let obtained_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let token = TokenResponse {
        access_token: "a".to_string(),
        token_type: "Bearer".to_string(),
        expires_in: 3600,
        refresh_token: None,
        scope: None,
    };

    let credential = credential_from_response(token, obtained_at);

    assert_eq!(credential.access_token, "a");
    assert_eq!(credential.refresh_token, "");
    assert_eq!(credential.expiry, obtained_at + TimeDelta::hours(1));
}

#[tokio::test]
async fn test_exchange_code() {
    let base = mock_accounts().await;
    let config = common::test_config(&base);

    let before = Utc::now();
    let credential = exchange_code(&config, &common::test_login_config(), "good-code")
        .await
        .unwrap();

    assert_eq!(credential.access_token, "new-access");
    assert_eq!(credential.refresh_token, "new-refresh");
    assert_eq!(credential.token_type, "Bearer");
    assert!(credential.expiry >= before + TimeDelta::seconds(3600));
    assert!(credential.expiry <= Utc::now() + TimeDelta::seconds(3600));
}

#[tokio::test]
async fn test_exchange_code_rejected() {
    let base = mock_accounts().await;
    let config = common::test_config(&base);

    let result = exchange_code(&config, &common::test_login_config(), "bad-code").await;
    assert!(matches!(
        result,
        Err(Error::TokenExchange(reason)) if reason == "invalid_grant: Invalid authorization code"
    ));

    let mut login = common::test_login_config();
    login.client_secret = "wrong".to_string();
    let result = exchange_code(&config, &login, "good-code").await;
    assert!(matches!(result, Err(Error::TokenExchange(reason)) if reason == "invalid_client"));
}

fn login_on_free_port() -> LoginConfig {
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    LoginConfig {
        http_port: port,
        ..common::test_login_config()
    }
}

/// Stands in for the browser: follows the redirect with `good-code` and
/// either the state from the authorization URL or `forced_state`.
fn browser(port: u16, forced_state: Option<&'static str>) -> impl FnOnce(&Url) {
    move |auth_url| {
        let query: HashMap<String, String> = auth_url.query_pairs().into_owned().collect();
        let state = forced_state.map_or(query["state"].clone(), str::to_string);
        let callback = format!("http://127.0.0.1:{port}/callback?code=good-code&state={state}");
        tokio::spawn(async move {
            let _ = reqwest::get(callback).await;
        });
    }
}

#[tokio::test]
async fn test_authorize_saves_credential() {
    let base = mock_accounts().await;
    let config = common::test_config(&base);
    let login = login_on_free_port();
    let dir = tempdir().unwrap();
    let cache = CredentialCache::new(dir.path().join(".cache"));

    let credential = authorize(&config, &login, &cache, browser(login.http_port, None))
        .await
        .unwrap();

    assert_eq!(credential.access_token, "new-access");
    assert_eq!(cache.load().await.unwrap(), credential);
}

#[tokio::test]
async fn test_authorize_overwrites_existing_cache() {
    let base = mock_accounts().await;
    let config = common::test_config(&base);
    let login = login_on_free_port();
    let dir = tempdir().unwrap();
    let cache = CredentialCache::new(dir.path().join(".cache"));
    cache.save(&common::test_credential("old-access")).await.unwrap();

    authorize(&config, &login, &cache, browser(login.http_port, None))
        .await
        .unwrap();

    let stored = cache.load().await.unwrap();
    assert_eq!(stored.access_token, "new-access");
    assert_eq!(stored.refresh_token, "new-refresh");
}

#[tokio::test]
async fn test_authorize_rejects_foreign_state() {
    let base = mock_accounts().await;
    let config = common::test_config(&base);
    let login = login_on_free_port();
    let dir = tempdir().unwrap();
    let cache = CredentialCache::new(dir.path().join(".cache"));

    let result = authorize(&config, &login, &cache, browser(login.http_port, Some("forged"))).await;

    assert!(matches!(result, Err(Error::StateMismatch { received }) if received == "forged"));
    assert!(!cache.path().exists());
}

#[tokio::test]
async fn test_authorize_checks_endpoint_before_listening() {
    let mut config = common::test_config("https://accounts.example.com");
    config.auth_url = "not a url".to_string();
    let login = login_on_free_port();
    let dir = tempdir().unwrap();
    let cache = CredentialCache::new(dir.path().join(".cache"));

    let result = authorize(&config, &login, &cache, |_| panic!("browser opened")).await;
    assert!(matches!(result, Err(Error::InvalidConfig { .. })));

    // Nothing was left listening on the callback port
    TcpListener::bind(("127.0.0.1", login.http_port)).unwrap();
}
