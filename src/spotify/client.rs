use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    Error, Result,
    config::Config,
    management::CredentialCache,
    types::{
        ApiErrorResponse, Credential, Page, PlaylistDetail, PlaylistItem, SimplifiedPlaylist, User,
    },
};

const PLAYLIST_FIELDS: &str = "id,name,tracks.total";
const PLAYLIST_ITEM_FIELDS: &str = "items(track(name,artists(name),external_urls)),next,offset,total";

/// An authenticated handle on the Spotify Web API.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(api_url: &str, credential: &Credential) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token: credential.access_token.clone(),
        }
    }

    /// Builds a client from the cached credential. The token is used as is;
    /// an expired one only shows up as an API error.
    pub async fn from_cache(config: &Config, cache: &CredentialCache) -> Result<Self> {
        let credential = cache.load().await?;
        Ok(Self::new(&config.api_url, &credential))
    }

    pub async fn current_user(&self) -> Result<User> {
        self.get("/me", &[]).await
    }

    pub async fn playlist(&self, playlist_id: &str) -> Result<PlaylistDetail> {
        self.get(
            &format!("/playlists/{playlist_id}"),
            &[("fields", PLAYLIST_FIELDS.to_string())],
        )
        .await
    }

    /// `limit: None` leaves the page size to the provider.
    pub async fn playlists_page(
        &self,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Page<SimplifiedPlaylist>> {
        self.get("/me/playlists", &page_query(offset, limit)).await
    }

    pub async fn playlist_items_page(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Page<PlaylistItem>> {
        let mut query = page_query(offset, limit);
        query.push(("fields", PLAYLIST_ITEM_FIELDS.to_string()));
        self.get(&format!("/playlists/{playlist_id}/tracks"), &query)
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .http
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        Ok(response.json::<T>().await?)
    }
}

fn page_query(offset: u32, limit: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = vec![("offset", offset.to_string())];
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    query
}

/// Prefers the provider's own error message over the raw body.
fn api_error(status: StatusCode, body: &str) -> Error {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => body.trim().to_string(),
    };

    Error::Api {
        status: status.as_u16(),
        message,
    }
}
