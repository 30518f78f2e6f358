use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A deduplicated album as shown on the wall. Identity is the catalog id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub image_url: String,
}

/// Grid cell address. Ordered row-major (`y` first, then `x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub y: u32,
    pub x: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Self {
        Coordinate { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

impl FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid coordinate key: {}", s))?;
        let x = x
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid x in {}: {}", s, e))?;
        let y = y
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid y in {}: {}", s, e))?;
        Ok(Coordinate::new(x, y))
    }
}

/// Bearer credential handed out by the token provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub obtained_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(access_token: String) -> Self {
        Credential {
            access_token,
            obtained_at: Utc::now(),
        }
    }

    /// Token with everything but the first and last four characters hidden.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.access_token.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}…{}", head, tail)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistResponse {
    pub tracks: TracksPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub album: Option<AlbumObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumObject {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub name: String,
    pub artist: String,
    pub placed: String,
}

#[derive(Tabled)]
pub struct PlacementTableRow {
    pub cell: String,
    pub album: String,
    pub artist: String,
}
