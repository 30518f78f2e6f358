use tokio_util::sync::CancellationToken;

use crate::{
    error::WallError,
    management::{GridBounds, GridPlacementStore, PlaylistIngester},
    spotify::{auth::CredentialSource, playlist::PlaylistSource},
    types::{Album, Coordinate},
};

/// One user's wall: the current album list plus its placements.
///
/// This is where the pieces are wired together. A successful load replaces the
/// album list and resets the grid; a failed or cancelled load leaves both
/// untouched. When the playlist API rejects the cached token the session drops
/// it and loads once more with a fresh one.
pub struct WallSession<C, P> {
    ingester: PlaylistIngester<C, P>,
    albums: Vec<Album>,
    store: GridPlacementStore,
    playlist_url: Option<String>,
}

impl<C: CredentialSource, P: PlaylistSource> WallSession<C, P> {
    pub fn new(ingester: PlaylistIngester<C, P>, bounds: GridBounds) -> Self {
        WallSession {
            ingester,
            albums: Vec::new(),
            store: GridPlacementStore::new(bounds),
            playlist_url: None,
        }
    }

    pub async fn load_playlist(&mut self, playlist_url: &str) -> Result<&[Album], WallError> {
        self.load_playlist_with_cancel(playlist_url, &CancellationToken::new())
            .await
    }

    pub async fn load_playlist_with_cancel(
        &mut self,
        playlist_url: &str,
        cancel: &CancellationToken,
    ) -> Result<&[Album], WallError> {
        let albums = match self.ingester.ingest_with_cancel(playlist_url, cancel).await {
            Err(e) if e.is_unauthorized() => {
                self.ingester.tokens().invalidate().await;
                self.ingester.ingest_with_cancel(playlist_url, cancel).await?
            }
            result => result?,
        };

        self.store.reset();
        self.albums = albums;
        self.playlist_url = Some(playlist_url.to_string());
        Ok(&self.albums)
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// Album by its 1-based position in the album list.
    pub fn album(&self, index: usize) -> Option<&Album> {
        index.checked_sub(1).and_then(|i| self.albums.get(i))
    }

    pub fn playlist_url(&self) -> Option<&str> {
        self.playlist_url.as_deref()
    }

    pub fn store(&self) -> &GridPlacementStore {
        &self.store
    }

    pub fn ingester(&self) -> &PlaylistIngester<C, P> {
        &self.ingester
    }

    /// Drops album number `index` (1-based) on `target`.
    ///
    /// Unlike the store, the session refuses unknown albums and cells outside
    /// the grid. Returns the album that was displaced from `target`, if any.
    pub fn place_index(
        &mut self,
        index: usize,
        target: Coordinate,
    ) -> Result<Option<Album>, String> {
        let album = self
            .album(index)
            .cloned()
            .ok_or_else(|| format!("No album #{} (have {})", index, self.albums.len()))?;

        if !self.store.in_bounds(target) {
            let bounds = self.store.bounds();
            return Err(format!(
                "Cell {} is outside the {}x{} grid",
                target, bounds.cols, bounds.rows
            ));
        }

        Ok(self.store.place(album, target))
    }

    pub fn remove(&mut self, target: Coordinate) -> Option<Album> {
        self.store.remove(target)
    }

    pub fn reset(&mut self) {
        self.store.reset();
    }

    pub fn resize(&mut self, bounds: GridBounds) -> Vec<(Coordinate, Album)> {
        self.store.set_bounds(bounds)
    }
}
