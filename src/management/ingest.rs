use std::{collections::HashSet, sync::Arc};

use tokio_util::sync::CancellationToken;

use crate::{
    error::WallError,
    management::TokenProvider,
    spotify::{auth::CredentialSource, playlist::PlaylistSource},
    types::{Album, PlaylistItem},
};

const PLAYLIST_SEGMENT: &str = "playlist/";

/// Pulls the playlist id out of anything containing `playlist/<id>`.
///
/// The id is the run of word characters (`[A-Za-z0-9_]`) right after the
/// segment. Occurrences followed by no word character are skipped.
pub fn extract_playlist_id(url: &str) -> Result<String, WallError> {
    url.match_indices(PLAYLIST_SEGMENT)
        .map(|(start, _)| {
            url[start + PLAYLIST_SEGMENT.len()..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
        })
        .find(|id| !id.is_empty())
        .ok_or_else(|| WallError::InvalidUrl(url.to_string()))
}

/// Reduces playlist items to their albums, first occurrence wins.
///
/// Items without a track (removed or local files) and albums without an id
/// are skipped. Missing artwork or artists become empty strings.
pub fn dedup_albums(items: &[PlaylistItem]) -> Vec<Album> {
    let mut seen_ids = HashSet::new();

    items
        .iter()
        .filter_map(|item| item.track.as_ref()?.album.as_ref())
        .filter_map(|album| {
            let id = album.id.as_deref().filter(|id| !id.is_empty())?;
            if !seen_ids.insert(id.to_string()) {
                return None;
            }

            Some(Album {
                id: id.to_string(),
                name: album.name.clone(),
                artist: album
                    .artists
                    .first()
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
                image_url: album
                    .images
                    .first()
                    .map(|i| i.url.clone())
                    .unwrap_or_default(),
            })
        })
        .collect()
}

/// Turns a playlist URL into a deduplicated, first-seen ordered album list.
///
/// The ingester never retries and never touches a placement store; resetting
/// the wall after a successful ingest is the caller's job.
pub struct PlaylistIngester<C, P> {
    tokens: Arc<TokenProvider<C>>,
    source: P,
}

impl<C: CredentialSource, P: PlaylistSource> PlaylistIngester<C, P> {
    pub fn new(tokens: Arc<TokenProvider<C>>, source: P) -> Self {
        PlaylistIngester { tokens, source }
    }

    pub fn tokens(&self) -> &Arc<TokenProvider<C>> {
        &self.tokens
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    pub async fn ingest(&self, playlist_url: &str) -> Result<Vec<Album>, WallError> {
        self.ingest_with_cancel(playlist_url, &CancellationToken::new())
            .await
    }

    /// Same as [`ingest`](Self::ingest) but gives up as soon as `cancel` fires.
    ///
    /// A response that arrives after cancellation is discarded and the call
    /// resolves to [`WallError::Cancelled`].
    pub async fn ingest_with_cancel(
        &self,
        playlist_url: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Album>, WallError> {
        let playlist_id = extract_playlist_id(playlist_url)?;

        let credential = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(WallError::Cancelled),
            credential = self.tokens.get_token(false) => credential?,
        };

        let items = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(WallError::Cancelled),
            items = self.source.fetch_items(&playlist_id, &credential) => items?,
        };

        if cancel.is_cancelled() {
            return Err(WallError::Cancelled);
        }

        Ok(dedup_albums(&items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AlbumObject, ArtistRef, Image, TrackObject};

    fn item(id: &str) -> PlaylistItem {
        PlaylistItem {
            track: Some(TrackObject {
                album: Some(AlbumObject {
                    id: Some(id.to_string()),
                    name: format!("Album {}", id),
                    images: vec![
                        Image {
                            url: format!("https://i.scdn.co/image/{}-640", id),
                        },
                        Image {
                            url: format!("https://i.scdn.co/image/{}-64", id),
                        },
                    ],
                    artists: vec![
                        ArtistRef {
                            name: format!("Artist {}", id),
                        },
                        ArtistRef {
                            name: "Featured".to_string(),
                        },
                    ],
                }),
            }),
        }
    }

    #[test]
    fn extracts_id_from_share_url() {
        let id =
            extract_playlist_id("https://open.spotify.com/playlist/2KXw6sx8bGRqZzKI4ASZhQ").unwrap();
        assert_eq!(id, "2KXw6sx8bGRqZzKI4ASZhQ");
    }

    #[test]
    fn id_stops_at_first_non_word_character() {
        let id = extract_playlist_id(
            "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123",
        )
        .unwrap();
        assert_eq!(id, "37i9dQZF1DXcBWIGoYBM5M");
    }

    #[test]
    fn empty_segment_is_skipped_for_later_match() {
        let id = extract_playlist_id("playlist/?x=1&next=playlist/abc_9").unwrap();
        assert_eq!(id, "abc_9");
    }

    #[test]
    fn url_without_playlist_segment_is_rejected() {
        let err = extract_playlist_id("https://open.spotify.com/album/4aawyAB9vmqN3uQ7FjRGTy")
            .unwrap_err();
        assert!(matches!(err, WallError::InvalidUrl(_)));

        assert!(extract_playlist_id("https://open.spotify.com/playlist/").is_err());
        assert!(extract_playlist_id("").is_err());
    }

    #[test]
    fn dedup_keeps_first_seen_order() {
        let items: Vec<PlaylistItem> = ["A", "B", "A", "C", "B"].iter().map(|id| item(id)).collect();

        let albums = dedup_albums(&items);
        let ids: Vec<&str> = albums.iter().map(|a| a.id.as_str()).collect();

        assert_eq!(ids, vec!["A", "B", "C"]);
        assert!(albums.len() <= items.len());
    }

    #[test]
    fn dedup_takes_first_image_and_first_artist() {
        let albums = dedup_albums(&[item("X")]);

        assert_eq!(albums[0].name, "Album X");
        assert_eq!(albums[0].artist, "Artist X");
        assert_eq!(albums[0].image_url, "https://i.scdn.co/image/X-640");
    }

    #[test]
    fn dedup_tolerates_missing_fields() {
        let bare = PlaylistItem {
            track: Some(TrackObject {
                album: Some(AlbumObject {
                    id: Some("bare".to_string()),
                    name: "Bare".to_string(),
                    images: Vec::new(),
                    artists: Vec::new(),
                }),
            }),
        };
        let removed = PlaylistItem { track: None };
        let no_album = PlaylistItem {
            track: Some(TrackObject { album: None }),
        };
        let local = PlaylistItem {
            track: Some(TrackObject {
                album: Some(AlbumObject {
                    id: None,
                    name: "Local files".to_string(),
                    images: Vec::new(),
                    artists: Vec::new(),
                }),
            }),
        };

        let albums = dedup_albums(&[removed, bare, no_album, local]);

        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].id, "bare");
        assert_eq!(albums[0].artist, "");
        assert_eq!(albums[0].image_url, "");
    }

    #[test]
    fn dedup_of_empty_playlist_is_empty() {
        assert!(dedup_albums(&[]).is_empty());
    }
}
