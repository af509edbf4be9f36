use std::path::Path;

use tabled::Table;

use crate::{
    Result,
    config::Config,
    info,
    management::{CredentialCache, PlaylistWriter},
    spotify::{self, SpotifyClient},
    success,
    types::{PlaylistDocument, PlaylistTableRow, TrackTableRow},
    utils,
};

/// Prints the tracks of one playlist, or every playlist of the user when no
/// id is given.
pub async fn list(config: &Config, playlist_id: Option<String>, owned: bool) -> Result<()> {
    let cache = CredentialCache::new(&config.cache_file);
    let client = SpotifyClient::from_cache(config, &cache).await?;

    if let Some(playlist_id) = playlist_id {
        let pb = utils::spinner("Fetching playlist tracks...");
        let items = spotify::playlist::list_tracks(&client, &playlist_id).await;
        pb.finish_and_clear();

        let rows: Vec<TrackTableRow> = items?
            .into_iter()
            .filter_map(|item| item.track)
            .map(|track| TrackTableRow {
                name: track.name,
                artists: track
                    .artists
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                url: track.external_urls.spotify.unwrap_or_default(),
            })
            .collect();

        println!("{}", Table::new(rows));
        return Ok(());
    }

    let pb = utils::spinner("Fetching playlists...");
    let playlists = spotify::playlist::list_playlists(&client).await;
    pb.finish_and_clear();
    let mut playlists = playlists?;

    if owned {
        let me = client.current_user().await?;
        playlists.retain(|p| p.owner.id == me.id);
    }

    let rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            id: p.id,
            name: p.name,
            owner: p.owner.display_name.unwrap_or(p.owner.id),
            tracks: p.tracks.total,
        })
        .collect();

    println!("{}", Table::new(rows));
    Ok(())
}

/// Writes one playlist, or every playlist of the user when no id is given,
/// to `<out_dir>/<user id>/<playlist id>.json`. Playlists are processed one
/// after another and the first failure stops the command.
pub async fn download(config: &Config, playlist_id: Option<String>, out_dir: &Path) -> Result<()> {
    let cache = CredentialCache::new(&config.cache_file);
    let client = SpotifyClient::from_cache(config, &cache).await?;
    let user = client.current_user().await?;
    let writer = PlaylistWriter::new(out_dir);

    let playlist_ids = match playlist_id {
        Some(id) => vec![id],
        None => {
            info!("Downloading all playlists");
            let pb = utils::spinner("Fetching playlists...");
            let playlists = spotify::playlist::list_playlists(&client).await;
            pb.finish_and_clear();
            playlists?.into_iter().map(|p| p.id).collect()
        }
    };

    for playlist_id in &playlist_ids {
        let playlist = client.playlist(playlist_id).await?;
        info!("Downloading playlist: {}", playlist.name);

        let pb = utils::spinner(format!("Fetching tracks of {}...", playlist.name));
        let items = spotify::playlist::list_tracks(&client, playlist_id).await;
        pb.finish_and_clear();

        let document = PlaylistDocument::from_playlist(&playlist, &items?);
        let path = writer.write(&user.id, &document).await?;
        success!("Wrote {} tracks to {}", document.tracks.len(), path.display());
    }

    success!("Downloaded {} playlist(s)", playlist_ids.len());
    Ok(())
}
