use std::sync::Arc;

use reqwest::Client;

use crate::{
    error::WallError,
    management::{PlaylistIngester, TokenProvider, WallSession},
    spotify::{auth::TokenEndpoint, playlist::PlaylistEndpoint},
};

pub type LiveIngester = PlaylistIngester<TokenEndpoint, PlaylistEndpoint>;
pub type LiveSession = WallSession<TokenEndpoint, PlaylistEndpoint>;

/// Wires the token broker and the playlist API from the environment.
///
/// One HTTP client is shared by both endpoints.
pub fn ingester() -> Result<LiveIngester, WallError> {
    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| WallError::Config(format!("cannot build HTTP client: {}", e)))?;

    let tokens = Arc::new(TokenProvider::new(TokenEndpoint::from_env(client.clone())?));
    Ok(PlaylistIngester::new(
        tokens,
        PlaylistEndpoint::from_env(client),
    ))
}
