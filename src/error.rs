//! Error types for playlist ingestion and credential handling.
//!
//! Grid placement never fails, so nothing here covers it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WallError {
    /// The playlist URL has no `playlist/<id>` segment.
    #[error("Invalid playlist URL: {0}")]
    InvalidUrl(String),

    /// The token endpoint was unreachable or answered with an error payload.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The playlist request failed or was rejected.
    #[error("Playlist fetch failed{}: {message}", status_suffix(.status))]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    /// The ingestion was cancelled before it completed.
    #[error("Ingestion cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

impl WallError {
    pub fn fetch(status: Option<u16>, message: impl Into<String>) -> Self {
        WallError::Fetch {
            status,
            message: message.into(),
        }
    }

    /// True when the playlist API rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, WallError::Fetch { status: Some(401), .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_only_for_401_fetch() {
        assert!(WallError::fetch(Some(401), "expired").is_unauthorized());
        assert!(!WallError::fetch(Some(404), "missing").is_unauthorized());
        assert!(!WallError::fetch(None, "offline").is_unauthorized());
        assert!(!WallError::Auth("401".into()).is_unauthorized());
    }

    #[test]
    fn fetch_message_includes_status() {
        let err = WallError::fetch(Some(502), "bad gateway");
        assert_eq!(err.to_string(), "Playlist fetch failed (502): bad gateway");

        let err = WallError::fetch(None, "connection refused");
        assert_eq!(err.to_string(), "Playlist fetch failed: connection refused");
    }
}
