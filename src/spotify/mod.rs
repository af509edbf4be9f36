//! # Spotify Integration Module
//!
//! The integration layer between the exporter and the Spotify Web API. It
//! covers the OAuth 2.0 authorization-code login, an authenticated client
//! for the few endpoints the tool needs, and the pagination walk used to
//! list playlists and their tracks.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer
//!      ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code + client secret)
//!     ├── Client (users, playlists, playlist items)
//!     └── Pagination (offset/limit walk over paging objects)
//!      ↓
//! HTTP Layer (reqwest, JSON)
//!      ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET /me` - Current user profile
//! - `GET /me/playlists` - Playlists owned or followed by the user
//! - `GET /playlists/{id}` - Playlist name and track count
//! - `GET /playlists/{id}/tracks` - Playlist items
//! - `POST /api/token` - Authorization code exchange
//!
//! ## Error Handling
//!
//! Every call returns [`crate::Result`]. There are no retries: the first
//! transport or API failure aborts the command. Non-success responses are
//! reported as [`crate::Error::Api`] with Spotify's own message.
//!
//! ## Usage Patterns
//!
//! ```rust,ignore
//! let client = SpotifyClient::from_cache(&config, &cache).await?;
//! let playlists = spotify::playlist::list_playlists(&client).await?;
//! let items = spotify::playlist::list_tracks(&client, &playlists[0].id).await?;
//! ```

pub mod auth;
pub mod client;
pub mod playlist;

pub use client::SpotifyClient;
