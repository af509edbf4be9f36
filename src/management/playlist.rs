use std::path::{Path, PathBuf};

use crate::{
    Result,
    types::{PlaylistDetail, PlaylistDocument, PlaylistItem, TrackEntry},
};

impl PlaylistDocument {
    /// Flattens a playlist and its items into the exported shape. Items
    /// without a track (removed or unavailable) are left out; artist order
    /// is kept.
    pub fn from_playlist(playlist: &PlaylistDetail, items: &[PlaylistItem]) -> Self {
        let tracks = items
            .iter()
            .filter_map(|item| item.track.as_ref())
            .map(|track| TrackEntry {
                name: track.name.clone(),
                artists: track.artists.iter().map(|a| a.name.clone()).collect(),
                url: track.external_urls.spotify.clone().unwrap_or_default(),
            })
            .collect();

        Self {
            id: playlist.id.clone(),
            name: playlist.name.clone(),
            total_tracks: playlist.tracks.total,
            tracks,
        }
    }
}

/// Writes playlist documents to `<base_dir>/<user_id>/<playlist_id>.json`.
#[derive(Debug, Clone)]
pub struct PlaylistWriter {
    base_dir: PathBuf,
}

impl PlaylistWriter {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, user_id: &str, playlist_id: &str) -> PathBuf {
        self.base_dir
            .join(user_id)
            .join(format!("{playlist_id}.json"))
    }

    /// Creates the user directory if needed and overwrites any existing
    /// file for the same playlist.
    pub async fn write(&self, user_id: &str, document: &PlaylistDocument) -> Result<PathBuf> {
        let path = self.path_for(user_id, &document.id);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(document)?;
        async_fs::write(&path, json).await?;
        Ok(path)
    }
}
