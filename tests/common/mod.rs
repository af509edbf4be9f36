#![allow(dead_code)]

use std::{collections::HashMap, path::PathBuf, time::Duration};

use axum::Router;
use chrono::{TimeZone, Utc};
use spotilist::{
    config::{Config, LoginConfig},
    types::Credential,
};

/// Serves `app` on a free local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn test_config(base_url: &str) -> Config {
    Config {
        api_url: format!("{base_url}/v1"),
        auth_url: format!("{base_url}/authorize"),
        token_url: format!("{base_url}/api/token"),
        cache_file: PathBuf::from(".cache"),
        login_timeout: Duration::from_secs(5),
    }
}

pub fn test_login_config() -> LoginConfig {
    LoginConfig {
        http_port: 0,
        redirect_uri: "http://127.0.0.1:8080/callback".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        scopes: vec![
            "playlist-read-private".to_string(),
            "playlist-read-collaborative".to_string(),
            "user-library-read".to_string(),
        ],
    }
}

pub fn test_credential(access_token: &str) -> Credential {
    Credential {
        access_token: access_token.to_string(),
        token_type: "Bearer".to_string(),
        refresh_token: "refresh-me".to_string(),
        expiry: Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap(),
    }
}

pub fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}
