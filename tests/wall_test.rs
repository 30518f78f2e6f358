use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use albumwall::{
    error::WallError,
    management::{GridBounds, PlaylistIngester, TokenProvider, WallSession},
    spotify::{auth::CredentialSource, playlist::PlaylistSource},
    types::{AlbumObject, ArtistRef, Coordinate, Credential, Image, PlaylistItem, TrackObject},
    utils,
};

#[derive(Default)]
struct CountingAuth {
    calls: AtomicUsize,
}

impl CredentialSource for CountingAuth {
    async fn fetch_credential(&self) -> Result<Credential, WallError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Credential::new(format!("token-{}", n)))
    }
}

// Playlists by id, each a list of album ids. Unknown ids answer 404.
struct FakePlaylists {
    playlists: HashMap<String, Vec<String>>,
}

impl FakePlaylists {
    fn new(playlists: Vec<(&str, Vec<&str>)>) -> Self {
        FakePlaylists {
            playlists: playlists
                .into_iter()
                .map(|(id, albums)| {
                    (
                        id.to_string(),
                        albums.iter().map(|a| a.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl PlaylistSource for FakePlaylists {
    async fn fetch_items(
        &self,
        playlist_id: &str,
        _credential: &Credential,
    ) -> Result<Vec<PlaylistItem>, WallError> {
        let albums = self
            .playlists
            .get(playlist_id)
            .ok_or_else(|| WallError::fetch(Some(404), "not found"))?;

        Ok(albums
            .iter()
            .map(|id| PlaylistItem {
                track: Some(TrackObject {
                    album: Some(AlbumObject {
                        id: Some(id.clone()),
                        name: format!("Album {}", id),
                        images: vec![Image {
                            url: format!("https://i.scdn.co/image/{}", id),
                        }],
                        artists: vec![ArtistRef {
                            name: format!("Artist {}", id),
                        }],
                    }),
                }),
            })
            .collect())
    }
}

fn session() -> WallSession<CountingAuth, FakePlaylists> {
    let tokens = Arc::new(TokenProvider::new(CountingAuth::default()));
    let playlists = FakePlaylists::new(vec![
        ("first", vec!["A", "B", "A", "C", "B"]),
        ("second", vec!["X", "Y"]),
        ("empty", vec![]),
    ]);
    WallSession::new(PlaylistIngester::new(tokens, playlists), GridBounds::new(2, 3))
}

fn url(id: &str) -> String {
    format!("https://open.spotify.com/playlist/{}", id)
}

#[tokio::test]
async fn test_load_builds_deduplicated_album_list() {
    let mut session = session();

    let ids: Vec<String> = session
        .load_playlist(&url("first"))
        .await
        .unwrap()
        .iter()
        .map(|a| a.id.clone())
        .collect();

    assert_eq!(ids, vec!["A", "B", "C"]);
    assert_eq!(session.playlist_url(), Some(url("first").as_str()));
}

#[tokio::test]
async fn test_new_playlist_clears_placements() {
    let mut session = session();
    session.load_playlist(&url("first")).await.unwrap();
    session.place_index(1, Coordinate::new(0, 0)).unwrap();
    session.place_index(2, Coordinate::new(2, 1)).unwrap();

    session.load_playlist(&url("second")).await.unwrap();

    assert!(session.store().is_empty());
    assert_eq!(session.albums().len(), 2);
    assert_eq!(session.store().query(Coordinate::new(0, 0)), None);
}

#[tokio::test]
async fn test_failed_load_keeps_current_wall() {
    let mut session = session();
    session.load_playlist(&url("first")).await.unwrap();
    session.place_index(3, Coordinate::new(1, 1)).unwrap();

    let err = session.load_playlist(&url("broken")).await.unwrap_err();
    assert!(matches!(err, WallError::Fetch { status: Some(404), .. }));

    let err = session.load_playlist("not a playlist").await.unwrap_err();
    assert!(matches!(err, WallError::InvalidUrl(_)));

    assert_eq!(session.albums().len(), 3);
    assert_eq!(
        session.store().query(Coordinate::new(1, 1)).map(|a| a.id.as_str()),
        Some("C")
    );
}

#[tokio::test]
async fn test_consecutive_loads_share_one_token() {
    let mut session = session();
    session.load_playlist(&url("first")).await.unwrap();
    session.load_playlist(&url("second")).await.unwrap();

    let tokens = session.ingester().tokens();
    assert_eq!(tokens.source().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_playlist_loads_empty_album_list() {
    let mut session = session();
    assert!(session.load_playlist(&url("empty")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_place_index_moves_and_displaces() {
    let mut session = session();
    session.load_playlist(&url("first")).await.unwrap();

    assert_eq!(session.place_index(1, Coordinate::new(0, 0)).unwrap(), None);
    assert_eq!(session.place_index(1, Coordinate::new(1, 1)).unwrap(), None);
    assert_eq!(session.store().query(Coordinate::new(0, 0)), None);

    let displaced = session.place_index(2, Coordinate::new(1, 1)).unwrap();
    assert_eq!(displaced.map(|a| a.id), Some("A".to_string()));
    assert_eq!(session.store().position_of("A"), None);
    assert_eq!(session.store().position_of("B"), Some(Coordinate::new(1, 1)));
}

#[tokio::test]
async fn test_place_index_rejects_unknown_album_and_outside_cell() {
    let mut session = session();
    session.load_playlist(&url("first")).await.unwrap();

    assert!(session.place_index(0, Coordinate::new(0, 0)).is_err());
    assert!(session.place_index(4, Coordinate::new(0, 0)).is_err());
    assert!(session.place_index(1, Coordinate::new(3, 0)).is_err());
    assert!(session.place_index(1, Coordinate::new(0, 2)).is_err());
    assert!(session.store().is_empty());
}

#[tokio::test]
async fn test_resize_evicts_and_remove_reset_clear() {
    let mut session = session();
    session.load_playlist(&url("first")).await.unwrap();
    session.place_index(1, Coordinate::new(0, 0)).unwrap();
    session.place_index(2, Coordinate::new(2, 1)).unwrap();
    session.place_index(3, Coordinate::new(1, 0)).unwrap();

    let evicted = session.resize(GridBounds::new(1, 3));
    assert_eq!(evicted.len(), 1);
    assert_eq!(evicted[0].0, Coordinate::new(2, 1));

    assert_eq!(session.remove(Coordinate::new(1, 0)).map(|a| a.id), Some("C".to_string()));
    assert_eq!(session.remove(Coordinate::new(1, 0)), None);

    session.reset();
    assert!(session.store().is_empty());
}

#[tokio::test]
async fn test_render_wall_shows_album_numbers() {
    let mut session = session();
    session.load_playlist(&url("first")).await.unwrap();
    session.place_index(3, Coordinate::new(0, 0)).unwrap();
    session.place_index(1, Coordinate::new(2, 1)).unwrap();

    let rendered = utils::render_wall(session.albums(), session.store());
    assert_eq!(rendered, "3 · ·\n· · 1");

    let rows = utils::album_rows(session.albums(), Some(session.store()));
    assert_eq!(rows[0].placed, "2-1");
    assert_eq!(rows[1].placed, "");
    assert_eq!(rows[2].placed, "0-0");
}

#[tokio::test]
async fn test_album_rows_without_wall_leave_placed_empty() {
    let mut session = session();
    session.load_playlist(&url("first")).await.unwrap();
    session.place_index(1, Coordinate::new(0, 0)).unwrap();

    let rows = utils::album_rows(session.albums(), None);

    let indexes: Vec<usize> = rows.iter().map(|r| r.index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
    assert_eq!(rows[0].name, "Album A");
    assert!(rows.iter().all(|r| r.placed.is_empty()));
}

#[test]
fn test_coordinate_key_round_trips() {
    let c = Coordinate::new(4, 2);
    assert_eq!(c.to_string(), "4-2");
    assert_eq!("4-2".parse::<Coordinate>().unwrap(), c);
    assert!("4_2".parse::<Coordinate>().is_err());
    assert!("a-2".parse::<Coordinate>().is_err());
}

#[test]
fn test_parse_coordinate_accepts_both_forms() {
    assert_eq!(utils::parse_coordinate(&["1", "0"]).unwrap(), Coordinate::new(1, 0));
    assert_eq!(utils::parse_coordinate(&["1-0"]).unwrap(), Coordinate::new(1, 0));
    assert!(utils::parse_coordinate(&[]).is_err());
    assert!(utils::parse_coordinate(&["1", "2", "3"]).is_err());
}

#[test]
fn test_credential_is_masked() {
    let credential = Credential::new("BQC1234567890xyz".to_string());
    assert_eq!(credential.masked(), "BQC1…0xyz");
    assert_eq!(Credential::new("short".to_string()).masked(), "*****");
}
