use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config,
    error::WallError,
    types::{Credential, PlaylistItem, PlaylistResponse, TracksPage},
};

/// Anything able to return the raw track items of a playlist.
pub trait PlaylistSource: Send + Sync {
    fn fetch_items(
        &self,
        playlist_id: &str,
        credential: &Credential,
    ) -> impl Future<Output = Result<Vec<PlaylistItem>, WallError>> + Send;
}

/// Spotify Web API playlist endpoint.
///
/// Reads `GET {api}/playlists/{id}` and then follows `tracks.next` until the
/// paging object is exhausted. The same credential is used for every page and
/// any failing page fails the whole read, so callers never see a partial list.
#[derive(Debug, Clone)]
pub struct PlaylistEndpoint {
    client: Client,
    api_url: String,
}

impl PlaylistEndpoint {
    pub fn new(client: Client, api_url: String) -> Self {
        PlaylistEndpoint {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env(client: Client) -> Self {
        Self::new(client, config::spotify_apiurl())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        credential: &Credential,
    ) -> Result<T, WallError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&credential.access_token)
            .send()
            .await
            .map_err(|e| WallError::fetch(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
            return Err(WallError::fetch(Some(status.as_u16()), reason));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WallError::fetch(Some(status.as_u16()), format!("malformed body: {}", e)))
    }
}

impl PlaylistSource for PlaylistEndpoint {
    async fn fetch_items(
        &self,
        playlist_id: &str,
        credential: &Credential,
    ) -> Result<Vec<PlaylistItem>, WallError> {
        let url = format!(
            "{uri}/playlists/{id}",
            uri = &self.api_url,
            id = playlist_id
        );

        let first = self.get_json::<PlaylistResponse>(&url, credential).await?;
        let mut items = first.tracks.items;
        let mut next = first.tracks.next;

        while let Some(page_url) = next {
            let page = self.get_json::<TracksPage>(&page_url, credential).await?;
            items.extend(page.items);
            next = page.next;
        }

        Ok(items)
    }
}
