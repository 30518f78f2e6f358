//! # Spotify Integration Module
//!
//! This module is the HTTP layer between the wall engine and the outside world.
//! It knows how to reach two endpoints and nothing else:
//!
//! ```text
//! Management Layer (TokenProvider, PlaylistIngester)
//!          ↓
//! Spotify Integration Layer
//!     ├── Token broker (bearer credential)
//!     └── Playlist read (tracks + albums, paged)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Fetches a bearer token from the token broker:
//! - **Plain GET**: No client secret or OAuth dance on this side; the broker owns that
//! - **Tunnel Bypass Header**: Sent on every request so the broker's tunnel skips its warning page
//! - **Error Payloads**: `{ "error": ... }` bodies become [`WallError::Auth`](crate::error::WallError::Auth)
//!
//! ### Playlist Module
//!
//! [`playlist`] - Reads a playlist's track items:
//! - **Bearer Auth**: Uses whatever credential the caller passes in; never stores it
//! - **Pagination**: Follows `tracks.next` until the end of the playlist
//! - **All-or-Nothing**: A failing page fails the whole read
//! - **Status Preservation**: Non-success statuses are kept on the error so a 401
//!   can be told apart from other failures
//!
//! ## Seams
//!
//! Both endpoints are reached through small traits ([`auth::CredentialSource`],
//! [`playlist::PlaylistSource`]) so the management layer can be driven by
//! in-memory fakes in tests.
//!
//! ## Retries
//!
//! Nothing in this module retries. Whether to force a fresh token and try again
//! is decided further up, in [`crate::management::WallSession`].

pub mod auth;
pub mod playlist;
