//! Configuration management for the album wall.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage the token
//! broker location, the Spotify API base URL and the default grid dimensions.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command line flags (grid dimensions only)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::error::WallError;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_BYPASS_HEADER: &str = "ngrok-skip-browser-warning";
pub const DEFAULT_BYPASS_VALUE: &str = "114514";

pub const DEFAULT_GRID_ROWS: u32 = 2;
pub const DEFAULT_GRID_COLS: u32 = 3;
pub const MAX_GRID_ROWS: u32 = 5;
pub const MAX_GRID_COLS: u32 = 6;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `albumwall/.env`.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/albumwall/.env`
/// - macOS: `~/Library/Application Support/albumwall/.env`
/// - Windows: `%LOCALAPPDATA%/albumwall/.env`
///
/// # Returns
///
/// Returns `Ok(true)` if a `.env` file was loaded, `Ok(false)` if none exists
/// (plain environment variables are used instead), or an error string if the
/// directory cannot be created or the file cannot be parsed.
pub async fn load_env() -> Result<bool, String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(false);
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())?;
    Ok(true)
}

/// Location of the user's `.env` file.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("albumwall/.env");
    path
}

/// Returns the token broker URL.
///
/// Retrieves the `ALBUMWALL_TOKEN_URL` environment variable. The broker answers
/// a plain `GET` with `{ "access_token": "..." }` or `{ "error": "..." }`.
///
/// # Errors
///
/// Returns [`WallError::Config`] if the variable is not set, since there is no
/// public default for a private token broker.
pub fn token_url() -> Result<String, WallError> {
    env::var("ALBUMWALL_TOKEN_URL")
        .map_err(|_| WallError::Config("ALBUMWALL_TOKEN_URL must be set".to_string()))
}

/// Header sent with every token request to skip the tunnel's interstitial page.
///
/// Reads `ALBUMWALL_TOKEN_BYPASS_HEADER` and `ALBUMWALL_TOKEN_BYPASS_VALUE`,
/// falling back to the ngrok header.
pub fn token_bypass_header() -> (String, String) {
    (
        env::var("ALBUMWALL_TOKEN_BYPASS_HEADER")
            .unwrap_or_else(|_| DEFAULT_BYPASS_HEADER.to_string()),
        env::var("ALBUMWALL_TOKEN_BYPASS_VALUE")
            .unwrap_or_else(|_| DEFAULT_BYPASS_VALUE.to_string()),
    )
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable, defaulting to
/// `https://api.spotify.com/v1`. A trailing slash is stripped.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL")
        .unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Default number of grid rows, from `ALBUMWALL_GRID_ROWS` (clamped to 1..=5).
pub fn grid_rows() -> u32 {
    read_dimension("ALBUMWALL_GRID_ROWS", DEFAULT_GRID_ROWS, MAX_GRID_ROWS)
}

/// Default number of grid columns, from `ALBUMWALL_GRID_COLS` (clamped to 1..=6).
pub fn grid_cols() -> u32 {
    read_dimension("ALBUMWALL_GRID_COLS", DEFAULT_GRID_COLS, MAX_GRID_COLS)
}

/// Clamps a requested grid dimension into `1..=max`.
pub fn clamp_dimension(value: u32, max: u32) -> u32 {
    value.clamp(1, max)
}

fn read_dimension(key: &str, default: u32, max: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .map(|v| clamp_dimension(v, max))
        .unwrap_or(default)
}
