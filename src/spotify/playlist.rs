use crate::{
    Result,
    spotify::SpotifyClient,
    types::{Page, PlaylistItem, SimplifiedPlaylist},
};

/// Anything that serves a listing one page at a time.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    type Item;

    /// `limit: None` requests the source's default page size.
    async fn fetch_page(&self, offset: u32, limit: Option<u32>) -> Result<Page<Self::Item>>;
}

/// Fetches every page of `source` in order.
///
/// The first page is requested with the default page size and its length
/// becomes the page size for every following request. Each following page
/// starts where the collected items end. Stops when a page carries no `next`
/// link or comes back empty. The first error aborts the whole walk.
pub async fn collect_pages<S: PageSource>(source: &S) -> Result<Vec<S::Item>> {
    let first = source.fetch_page(0, None).await?;
    let page_size = first.items.len() as u32;
    let mut next = first.next;
    let mut collected = first.items;

    while next.is_some() && page_size > 0 {
        let page = source
            .fetch_page(collected.len() as u32, Some(page_size))
            .await?;
        if page.items.is_empty() {
            break;
        }

        next = page.next;
        collected.extend(page.items);
    }

    Ok(collected)
}

/// Playlists owned or followed by the current user.
pub struct UserPlaylists<'a> {
    client: &'a SpotifyClient,
}

impl<'a> UserPlaylists<'a> {
    pub fn new(client: &'a SpotifyClient) -> Self {
        Self { client }
    }
}

impl PageSource for UserPlaylists<'_> {
    type Item = SimplifiedPlaylist;

    async fn fetch_page(
        &self,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Page<SimplifiedPlaylist>> {
        self.client.playlists_page(offset, limit).await
    }
}

/// The items of one playlist.
pub struct PlaylistItems<'a> {
    client: &'a SpotifyClient,
    playlist_id: &'a str,
}

impl<'a> PlaylistItems<'a> {
    pub fn new(client: &'a SpotifyClient, playlist_id: &'a str) -> Self {
        Self {
            client,
            playlist_id,
        }
    }
}

impl PageSource for PlaylistItems<'_> {
    type Item = PlaylistItem;

    async fn fetch_page(&self, offset: u32, limit: Option<u32>) -> Result<Page<PlaylistItem>> {
        self.client
            .playlist_items_page(self.playlist_id, offset, limit)
            .await
    }
}

pub async fn list_playlists(client: &SpotifyClient) -> Result<Vec<SimplifiedPlaylist>> {
    collect_pages(&UserPlaylists::new(client)).await
}

pub async fn list_tracks(client: &SpotifyClient, playlist_id: &str) -> Result<Vec<PlaylistItem>> {
    collect_pages(&PlaylistItems::new(client, playlist_id)).await
}
