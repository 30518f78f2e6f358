use tokio::sync::Mutex;

use crate::{error::WallError, spotify::auth::CredentialSource, types::Credential};

/// Owns the process-wide cached credential.
///
/// The cache has no expiry check. A stale token is only noticed when the
/// playlist API rejects it, after which the caller either calls
/// [`invalidate`](Self::invalidate) or asks for a forced fetch.
///
/// The lock is never held across the network round trip, so two callers racing
/// on a cold cache may both hit the broker. The last one to finish wins.
pub struct TokenProvider<S> {
    source: S,
    cached: Mutex<Option<Credential>>,
}

impl<S: CredentialSource> TokenProvider<S> {
    pub fn new(source: S) -> Self {
        TokenProvider {
            source,
            cached: Mutex::new(None),
        }
    }

    /// Returns the cached credential, or fetches one when `force` is set or the
    /// cache is empty. A failed fetch leaves the cache as it was.
    pub async fn get_token(&self, force: bool) -> Result<Credential, WallError> {
        if !force {
            if let Some(credential) = self.cached.lock().await.as_ref() {
                return Ok(credential.clone());
            }
        }

        let credential = self.source.fetch_credential().await?;
        *self.cached.lock().await = Some(credential.clone());
        Ok(credential)
    }

    /// Drops the cached credential so the next `get_token` goes to the network.
    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
    }

    pub async fn cached(&self) -> Option<Credential> {
        self.cached.lock().await.clone()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
