//! # CLI Module
//!
//! This module provides the command-line interface layer for albumwall. It stands
//! in for the drag-and-drop front end: every gesture a user would make on the
//! wall (drop an album on a cell, clear a cell, reset, resize) is a command here,
//! and every command goes through the same engine types a graphical front end
//! would use.
//!
//! ## Commands
//!
//! - [`albums`] - Imports a playlist once and prints its unique albums
//! - [`wall`] - Imports a playlist and opens an interactive wall editor
//! - [`token`] - Fetches a bearer token from the broker and reports it
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (prompt, tables, spinners)
//!     ↓
//! Management Layer (WallSession, GridPlacementStore, PlaylistIngester, TokenProvider)
//!     ↓
//! Spotify Layer (token broker, playlist endpoint)
//! ```
//!
//! ## Error Handling
//!
//! Setup failures (missing configuration, first import failing) end the program
//! with [`error!`](crate::error!). Inside the interactive editor every failure is
//! reported with [`warning!`](crate::warning!) and the current wall is kept.
//!
//! ## Usage Patterns
//!
//! ```bash
//! albumwall albums https://open.spotify.com/playlist/2KXw6sx8bGRqZzKI4ASZhQ
//! albumwall wall https://open.spotify.com/playlist/2KXw6sx8bGRqZzKI4ASZhQ --rows 3 --cols 4
//! albumwall token
//! ```

mod albums;
mod connect;
mod token;
mod wall;

pub use albums::albums;
pub use connect::LiveIngester;
pub use connect::LiveSession;
pub use token::token;
pub use wall::WallCommand;
pub use wall::wall;
